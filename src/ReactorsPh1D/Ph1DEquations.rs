//! # Pseudo-homogeneous 1D reactor equations
//!
//! [`Ph1DEquations`] turns a validated [`ReactorConfiguration`] plus a borrowed
//! [`ChemistryService`] into the right-hand side of a differential/algebraic system. The
//! integration itself belongs to an external solver that talks to the model through
//! [`DaeSystem`].
//!
//! A reactor with user-defined kinetics and a configured species list needs no chemistry engine
//! at all and is built with [`Ph1DEquations::from_configuration`].
//!
//! ```text
//! species  SteadyProfile  dω_i/dz = (R_gas,i + alfa·R_surf,i)·MW_i / G
//!          Transient      dω_i/dt = (R_gas,i + alfa·R_surf,i)·MW_i / ρ
//! sites    SteadyProfile  0 = R_site,k / Γ         (first site species: 0 = 1 - Σθ)
//!          Transient      dθ_k/dt = R_site,k / Γ
//! energy   SteadyProfile  dT/dz = Q / (G·Cp)
//!          Transient      dT/dt = Q / (ρ·Cp)
//!          Q = Q_gas + alfa·Q_surf - U·a·(T - T_wall)
//! ```
use super::mixture_properties::{MixtureEvaluator, MixtureState};
use super::reactor_config::{KineticsType, ReactorConfiguration, ResolutionMode};
use super::reactor_errors::{ConfigurationError, EvaluationError};
use super::state_layout::{SpeciesCounts, StateLayout};
use super::transient_recorder::TransientHistory;
use crate::ChemistryService::ChemistryService;
use crate::ChemistryService::configured_species::ConfiguredSpecies;
use crate::Kinetics::kinetics_source::{
    KineticsSource, ProductionRates, RateContext, RateEvaluator,
};
use log::{debug, info};

/// Contract between a reactor model and a stiff DAE integrator.
pub trait DaeSystem {
    fn number_of_equations(&self) -> usize;
    /// one flag per unknown, true for algebraic equations
    fn algebraic_flags(&self) -> Vec<bool>;
    /// fills `dy` with derivatives (or residuals of algebraic equations); 0 on success,
    /// a nonzero status asks the solver to reject the trial state
    fn equations(&mut self, t: f64, y: &[f64], dy: &mut [f64]) -> i32;
    /// records an accepted point
    fn store(&mut self, t: f64, y: &[f64]) -> Result<(), EvaluationError>;
}

/// chemistry service seen by the equations
enum ServiceHandle<'c> {
    Borrowed(&'c dyn ChemistryService),
    /// species list of the configuration, for reactors without chemistry engine
    Configured(ConfiguredSpecies),
}

impl ServiceHandle<'_> {
    fn get(&self) -> &dyn ChemistryService {
        match self {
            ServiceHandle::Borrowed(chemistry) => *chemistry,
            ServiceHandle::Configured(species) => species as &dyn ChemistryService,
        }
    }
}

pub struct Ph1DEquations<'c> {
    config: ReactorConfiguration,
    chemistry: ServiceHandle<'c>,
    /// kg/kmol
    MW: Vec<f64>,
    layout: StateLayout,
    kinetics: KineticsSource,
    mixture: MixtureEvaluator,
    rates: ProductionRates,
    history: TransientHistory,
    /// site density, kmol/m²
    Gamma: f64,
}

impl<'c> Ph1DEquations<'c> {
    /// validates the configuration, sizes every buffer and picks the kinetics source
    pub fn new(
        config: ReactorConfiguration,
        chemistry: &'c dyn ChemistryService,
    ) -> Result<Self, ConfigurationError> {
        config.validate(chemistry)?;
        Self::build(config, ServiceHandle::Borrowed(chemistry))
    }

    fn build(
        config: ReactorConfiguration,
        handle: ServiceHandle<'c>,
    ) -> Result<Self, ConfigurationError> {
        let chemistry = handle.get();
        let counts = SpeciesCounts {
            gas: chemistry.n_gas_species(),
            surface: chemistry.n_surface_species(),
        };
        let layout = StateLayout::resize(&config, counts)?;
        let NC = layout.n_species();
        let SURF_NC = layout.n_sites();
        let Gamma = if SURF_NC > 0 {
            let Gamma = chemistry.site_density();
            if !(Gamma > 0.0) {
                return Err(ConfigurationError::NonPositive {
                    name: "site density",
                    value: Gamma,
                });
            }
            Gamma
        } else {
            0.0
        };
        // user-defined kinetics prefer the configured molecular weights
        let MW = match (config.kinetics, &config.species) {
            (KineticsType::UserDefined, Some(species)) => species.MW.clone(),
            _ => chemistry.molecular_weights().to_vec(),
        };
        let kinetics = KineticsSource::from_config(&config, chemistry.gas_species_names(), &MW)?;
        let enthalpies =
            layout.has_temperature() && kinetics.needs_species_enthalpies(config.enabled);
        let mixture = MixtureEvaluator::new(&config, NC, SURF_NC, enthalpies);
        info!(
            "1D pseudo-homogeneous reactor {:?} ready: {:?} resolution",
            config.problem_name.as_deref().unwrap_or("unnamed"),
            config.resolution
        );
        Ok(Self {
            rates: ProductionRates::new(NC, SURF_NC),
            history: TransientHistory::new(),
            config,
            chemistry: handle,
            MW,
            layout,
            kinetics,
            mixture,
            Gamma,
        })
    }

    fn check_length(&self, found: usize) -> Result<(), EvaluationError> {
        let expected = self.layout.number_of_equations();
        if found != expected {
            return Err(EvaluationError::StateLength { expected, found });
        }
        Ok(())
    }

    /// Evaluates derivatives and residuals at (t, y) into `dy`.
    pub fn try_equations(
        &mut self,
        _t: f64,
        y: &[f64],
        dy: &mut [f64],
    ) -> Result<(), EvaluationError> {
        self.check_length(y.len())?;
        self.check_length(dy.len())?;
        let state = self.layout.view(y);
        let T = state.temperature.unwrap_or(self.config.T0);
        let P = self.config.P;
        let alfa = self.config.alfa;
        let chemistry = self.chemistry.get();
        let MW = self.MW.as_slice();

        let mixture = self
            .mixture
            .evaluate(chemistry, T, P, state.mass_fractions, MW)?;
        let ctx = RateContext {
            T,
            P,
            rho: mixture.rho,
            mass_fractions: state.mass_fractions,
            site_fractions: state.site_fractions,
            molecular_weights: MW,
            enabled: self.config.enabled,
        };
        self.kinetics.reaction_rate(&ctx, chemistry, &mut self.rates)?;
        let rates = &self.rates;

        // G for axial profiles, ρ for time evolution
        let scale = match self.config.resolution {
            ResolutionMode::SteadyProfile => self.config.G,
            ResolutionMode::Transient => mixture.rho,
        };

        let out = self.layout.view_mut(dy);
        for (i, dw) in out.mass_fractions.iter_mut().enumerate() {
            *dw = (rates.gas[i] + alfa * rates.surface_to_gas[i]) * MW[i] / scale;
        }

        if !out.site_fractions.is_empty() {
            for (k, dtheta) in out.site_fractions.iter_mut().enumerate() {
                *dtheta = rates.sites[k] / self.Gamma;
            }
            if self.config.resolution == ResolutionMode::SteadyProfile {
                // site conservation replaces the balance of the first site species
                out.site_fractions[0] = 1.0 - state.site_fractions.iter().sum::<f64>();
            }
        }

        if let Some(dT) = out.temperature {
            let heat = self.kinetics.heat_of_reaction(
                rates,
                &mixture.gas_enthalpies,
                &mixture.site_enthalpies,
            );
            let mut Q = heat.homogeneous + alfa * heat.heterogeneous;
            if let Some(exchange) = &self.config.heat_exchange {
                Q -= exchange.heat_loss(T);
            }
            *dT = Q / (scale * mixture.Cp);
        }
        Ok(())
    }

    /// Appends the accepted point (t, y) to the history of the current resolution mode.
    pub fn try_store(&mut self, t: f64, y: &[f64]) -> Result<(), EvaluationError> {
        self.check_length(y.len())?;
        let state = self.layout.view(y);
        let T = state.temperature.unwrap_or(self.config.T0);
        self.history.record(
            self.config.resolution,
            t,
            self.config.P,
            T,
            state.mass_fractions,
            state.site_fractions,
        );
        Ok(())
    }

    /// y0: inlet mass fractions, fully vacant catalyst (first site species) and inlet temperature
    pub fn initial_state(&self) -> Vec<f64> {
        let mut y0 = vec![0.0; self.layout.number_of_equations()];
        let out = self.layout.view_mut(&mut y0);
        out.mass_fractions.copy_from_slice(&self.config.omega0);
        if let Some(vacancy) = out.site_fractions.first_mut() {
            *vacancy = 1.0;
        }
        if let Some(T) = out.temperature {
            *T = self.config.T0;
        }
        y0
    }

    pub fn sample_points(&self) -> Vec<f64> {
        self.config.sample_points()
    }

    pub fn differential_ids(&self) -> Vec<f64> {
        self.layout.differential_ids()
    }

    ////////////////////////////////////GETTERS////////////////////////////////////////////
    pub fn config(&self) -> &ReactorConfiguration {
        &self.config
    }
    pub fn layout(&self) -> &StateLayout {
        &self.layout
    }
    pub fn kinetics(&self) -> &KineticsSource {
        &self.kinetics
    }
    /// production rates of the last evaluation
    pub fn production_rates(&self) -> &ProductionRates {
        &self.rates
    }
    /// mixture state of the last evaluation
    pub fn mixture(&self) -> &MixtureState {
        self.mixture.state()
    }
    pub fn history(&self) -> &TransientHistory {
        &self.history
    }
    pub fn species_names(&self) -> &[String] {
        self.chemistry.get().gas_species_names()
    }
    /// molecular weights of the gas species used by the balances, kg/kmol
    pub fn molecular_weights(&self) -> &[f64] {
        &self.MW
    }
    /// names of the site species carried by the state vector
    pub fn site_names(&self) -> &[String] {
        if self.layout.n_sites() > 0 {
            self.chemistry.get().surface_species_names()
        } else {
            &[]
        }
    }

    pub fn get_length(&self) -> Vec<f64> {
        self.history.get_length()
    }
    pub fn get_time(&self) -> Vec<f64> {
        self.history.get_time()
    }
    pub fn get_pressure(&self) -> Vec<f64> {
        self.history.get_pressure()
    }
    pub fn get_temperature(&self) -> Vec<f64> {
        self.history.get_temperature()
    }
    pub fn get_specie(&self) -> Vec<Vec<f64>> {
        self.history.get_specie()
    }
    pub fn get_site(&self) -> Vec<Vec<f64>> {
        self.history.get_site()
    }
    pub fn get_temperature_transient(&self) -> Vec<f64> {
        self.history.get_temperature_transient()
    }
    pub fn get_specie_transient(&self) -> Vec<Vec<f64>> {
        self.history.get_specie_transient()
    }
    pub fn get_site_transient(&self) -> Vec<Vec<f64>> {
        self.history.get_site_transient()
    }

    ////////////////////////////////////////////////I/O/////////////////////////////////////////////////////
    pub fn pretty_print_history(&self) {
        self.history.pretty_print(
            self.config.resolution,
            self.species_names(),
            self.site_names(),
        );
    }

    pub fn save_to_csv(&self, filename: Option<String>) -> Result<(), std::io::Error> {
        let name = filename.unwrap_or_else(|| "result_table.csv".to_string());
        self.history.save_to_csv(
            self.config.resolution,
            self.species_names(),
            self.site_names(),
            &name,
        )
    }
}

impl Ph1DEquations<'static> {
    /// Builds a reactor with user-defined kinetics from its configuration alone: species and
    /// molecular weights from the configured species list, properties from the configured Cp
    /// and Lambda.
    pub fn from_configuration(config: ReactorConfiguration) -> Result<Self, ConfigurationError> {
        config.validate_standalone()?;
        let species = config
            .species
            .clone()
            .ok_or(ConfigurationError::ChemistryServiceRequired(
                "a reactor without configured species",
            ))?;
        Self::build(config, ServiceHandle::Configured(species))
    }
}

impl DaeSystem for Ph1DEquations<'_> {
    fn number_of_equations(&self) -> usize {
        self.layout.number_of_equations()
    }

    fn algebraic_flags(&self) -> Vec<bool> {
        self.layout.algebraic_flags()
    }

    fn equations(&mut self, t: f64, y: &[f64], dy: &mut [f64]) -> i32 {
        match self.try_equations(t, y, dy) {
            Ok(()) => 0,
            Err(e) => {
                debug!("trial state rejected at {}: {}", t, e);
                e.status_code()
            }
        }
    }

    fn store(&mut self, t: f64, y: &[f64]) -> Result<(), EvaluationError> {
        self.try_store(t, y)
    }
}
