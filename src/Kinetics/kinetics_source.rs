//! # Kinetics Source Evaluator
//!
//! Production rates of gas and surface species come from one of two interchangeable sources:
//!
//! | Source | Gas-phase rates | Surface rates |
//! |--------|-----------------|---------------|
//! | [`EngineKinetics`] | elementary mechanism of the chemistry service | surface mechanism of the chemistry service |
//! | [`UserDefinedKinetics`] | custom homogeneous reactions | custom heterogeneous reactions (no site species) |
//!
//! Disabled reaction categories always contribute all-zero rate vectors. Both sources are
//! wrapped in [`KineticsSource`] and dispatched through [`RateEvaluator`]; evaluation writes
//! into pre-sized buffers and does not allocate.
use super::custom_kinetics::{ReactionPhase, ResolvedScheme};
use crate::ChemistryService::ChemistryService;
use crate::ReactorsPh1D::reactor_config::{EnabledEquations, KineticsType, ReactorConfiguration};
use crate::ReactorsPh1D::reactor_errors::{ConfigurationError, EvaluationError};
use enum_dispatch::enum_dispatch;
use log::{info, warn};
use nalgebra::DVector;

/// Net production rates of one evaluation.
#[derive(Debug, Clone)]
pub struct ProductionRates {
    /// gas species produced by homogeneous reactions, kmol/(m³·s)
    pub gas: DVector<f64>,
    /// gas species exchanged with the catalyst, kmol/(m²·s)
    pub surface_to_gas: DVector<f64>,
    /// surface species, kmol/(m²·s)
    pub sites: DVector<f64>,
}

impl ProductionRates {
    pub fn new(NC: usize, SURF_NC: usize) -> Self {
        Self {
            gas: DVector::zeros(NC),
            surface_to_gas: DVector::zeros(NC),
            sites: DVector::zeros(SURF_NC),
        }
    }

    pub fn clear(&mut self) {
        self.gas.fill(0.0);
        self.surface_to_gas.fill(0.0);
        self.sites.fill(0.0);
    }

    fn check_finite(&self) -> Result<(), EvaluationError> {
        for rates in [&self.gas, &self.surface_to_gas, &self.sites] {
            if let Some(species) = rates.iter().position(|r| !r.is_finite()) {
                return Err(EvaluationError::UndefinedProductionRate { species });
            }
        }
        Ok(())
    }
}

/// heat released by reactions: homogeneous in W/m³, heterogeneous in W/m² of catalyst
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeatRelease {
    pub homogeneous: f64,
    pub heterogeneous: f64,
}

/// thermodynamic state seen by the kinetics
#[derive(Debug, Clone, Copy)]
pub struct RateContext<'a> {
    pub T: f64,
    pub P: f64,
    /// kg/m³
    pub rho: f64,
    pub mass_fractions: &'a [f64],
    pub site_fractions: &'a [f64],
    /// kg/kmol
    pub molecular_weights: &'a [f64],
    pub enabled: EnabledEquations,
}

/// M = 1/Σ(ωᵢ/Mᵢ)
pub fn mean_molecular_weight(mass_fractions: &[f64], molecular_weights: &[f64]) -> f64 {
    1.0 / mass_fractions
        .iter()
        .zip(molecular_weights.iter())
        .map(|(w, mw)| w / mw)
        .sum::<f64>()
}

/// -Σ Rᵢ·hᵢ: positive when the reactions release heat
pub fn heat_of_reaction(production_rates: &[f64], enthalpies: &[f64]) -> f64 {
    -production_rates
        .iter()
        .zip(enthalpies.iter())
        .map(|(r, h)| r * h)
        .sum::<f64>()
}

#[enum_dispatch]
pub trait RateEvaluator {
    /// fills `rates` for the state in `ctx`
    fn reaction_rate(
        &mut self,
        ctx: &RateContext<'_>,
        chemistry: &dyn ChemistryService,
        rates: &mut ProductionRates,
    ) -> Result<(), EvaluationError>;

    /// heat released by the rates of the last `reaction_rate` call
    fn heat_of_reaction(
        &self,
        rates: &ProductionRates,
        gas_enthalpies: &[f64],
        site_enthalpies: &[f64],
    ) -> HeatRelease;
}

/// rates delegated to the elementary mechanisms of the chemistry service
#[derive(Debug, Clone, Default)]
pub struct EngineKinetics;

impl RateEvaluator for EngineKinetics {
    fn reaction_rate(
        &mut self,
        ctx: &RateContext<'_>,
        chemistry: &dyn ChemistryService,
        rates: &mut ProductionRates,
    ) -> Result<(), EvaluationError> {
        rates.clear();
        if ctx.enabled.homogeneous {
            chemistry.gas_production_rates(
                ctx.T,
                ctx.P,
                ctx.mass_fractions,
                rates.gas.as_mut_slice(),
            )?;
        }
        if ctx.enabled.heterogeneous {
            chemistry.surface_production_rates(
                ctx.T,
                ctx.P,
                ctx.mass_fractions,
                ctx.site_fractions,
                rates.surface_to_gas.as_mut_slice(),
                rates.sites.as_mut_slice(),
            )?;
        }
        rates.check_finite()
    }

    fn heat_of_reaction(
        &self,
        rates: &ProductionRates,
        gas_enthalpies: &[f64],
        site_enthalpies: &[f64],
    ) -> HeatRelease {
        HeatRelease {
            homogeneous: heat_of_reaction(rates.gas.as_slice(), gas_enthalpies),
            heterogeneous: heat_of_reaction(rates.surface_to_gas.as_slice(), gas_enthalpies)
                + heat_of_reaction(rates.sites.as_slice(), site_enthalpies),
        }
    }
}

/// rates of a user-supplied modified-Arrhenius scheme
#[derive(Debug, Clone)]
pub struct UserDefinedKinetics {
    pub scheme: ResolvedScheme,
    reaction_rates: DVector<f64>,
}

impl UserDefinedKinetics {
    pub fn new(scheme: ResolvedScheme) -> Self {
        let NR = scheme.n_reactions();
        Self {
            scheme,
            reaction_rates: DVector::zeros(NR),
        }
    }

    /// rates of the individual reactions from the last evaluation
    pub fn reaction_rates(&self) -> &[f64] {
        self.reaction_rates.as_slice()
    }
}

impl RateEvaluator for UserDefinedKinetics {
    fn reaction_rate(
        &mut self,
        ctx: &RateContext<'_>,
        _chemistry: &dyn ChemistryService,
        rates: &mut ProductionRates,
    ) -> Result<(), EvaluationError> {
        rates.clear();
        let scheme = &self.scheme;
        for (j, reaction) in scheme.reactions.iter().enumerate() {
            let mut r = 0.0;
            if reaction.phase.is_enabled(ctx.enabled) {
                r = scheme.converter * reaction.K_const(ctx.T);
                for (i, exponent) in reaction.orders.iter().flatten() {
                    let C = ctx.rho * ctx.mass_fractions[*i] / ctx.molecular_weights[*i];
                    r *= C.powf(*exponent);
                }
                if !r.is_finite() {
                    return Err(EvaluationError::UndefinedReactionRate { reaction: j });
                }
            }
            self.reaction_rates[j] = r;
        }
        rates
            .gas
            .gemv_tr(1.0, &scheme.homogeneous, &self.reaction_rates, 0.0);
        rates
            .surface_to_gas
            .gemv_tr(1.0, &scheme.heterogeneous, &self.reaction_rates, 0.0);
        Ok(())
    }

    fn heat_of_reaction(
        &self,
        _rates: &ProductionRates,
        gas_enthalpies: &[f64],
        _site_enthalpies: &[f64],
    ) -> HeatRelease {
        let mut heat = HeatRelease::default();
        for (reaction, r) in self.scheme.reactions.iter().zip(self.reaction_rates.iter()) {
            if *r == 0.0 {
                continue;
            }
            let q = -r * reaction.enthalpy_change(gas_enthalpies);
            match reaction.phase {
                ReactionPhase::Homogeneous => heat.homogeneous += q,
                ReactionPhase::Heterogeneous => heat.heterogeneous += q,
            }
        }
        heat
    }
}

#[derive(Debug, Clone)]
#[enum_dispatch(RateEvaluator)]
pub enum KineticsSource {
    Engine(EngineKinetics),
    UserDefined(UserDefinedKinetics),
}

impl KineticsSource {
    /// Picks the source named by the configuration; a custom scheme is resolved against the
    /// gas species list of the reactor.
    pub fn from_config(
        config: &ReactorConfiguration,
        species_names: &[String],
        molecular_weights: &[f64],
    ) -> Result<Self, ConfigurationError> {
        match config.kinetics {
            KineticsType::EngineProvided => Ok(KineticsSource::Engine(EngineKinetics)),
            KineticsType::UserDefined => {
                let scheme = config
                    .custom_scheme
                    .as_ref()
                    .ok_or(ConfigurationError::MissingCustomScheme)?;
                let resolved = scheme.resolve(species_names)?;
                for (reaction, imbalance) in scheme
                    .reactions
                    .iter()
                    .zip(resolved.mass_imbalance(molecular_weights))
                {
                    if imbalance.abs() > 1e-6 {
                        warn!(
                            "custom reaction '{}' does not conserve mass: {:+.4e} kg per kmol of extent",
                            reaction.label, imbalance
                        );
                    }
                }
                info!("user-defined kinetics with {} reactions", resolved.n_reactions());
                Ok(KineticsSource::UserDefined(UserDefinedKinetics::new(resolved)))
            }
        }
    }

    /// Species enthalpies are read only by the energy balance: always for engine kinetics,
    /// for custom schemes only when an enabled reaction carries no reaction enthalpy.
    pub fn needs_species_enthalpies(&self, enabled: EnabledEquations) -> bool {
        match self {
            KineticsSource::Engine(_) => true,
            KineticsSource::UserDefined(kinetics) => kinetics.scheme.uses_species_enthalpies(enabled),
        }
    }
}
