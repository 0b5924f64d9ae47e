//! # Mixture Property Evaluator
//!
//! Produces the "current mixture state" consumed by one evaluation of the equations. With
//! engine-provided kinetics every property comes from the chemistry service; with user-defined
//! kinetics the service is bypassed for density (ideal gas), heat capacity and conductivity,
//! which come from the configuration, and the mean molecular weight is computed from the
//! molecular weights of the reactor. Species enthalpies are queried only when the energy balance
//! reads them.
use super::reactor_config::{KineticsType, ReactorConfiguration};
use super::reactor_errors::EvaluationError;
use crate::ChemistryService::ChemistryService;
use crate::Kinetics::kinetics_source::mean_molecular_weight;
use crate::Thermodynamics::species_thermo::R_U;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertySource {
    Engine,
    Configured { Cp: f64, Lambda: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MixtureState {
    pub T: f64,
    pub P: f64,
    /// kg/m³
    pub rho: f64,
    /// kg/kmol
    pub MWmix: f64,
    /// J/(kg·K)
    pub Cp: f64,
    /// W/(m·K)
    pub Lambda: f64,
    /// J/kmol
    pub gas_enthalpies: Vec<f64>,
    /// J/kmol
    pub site_enthalpies: Vec<f64>,
}

impl MixtureState {
    fn new(NC: usize, SURF_NC: usize) -> Self {
        Self {
            T: 0.0,
            P: 0.0,
            rho: 0.0,
            MWmix: 0.0,
            Cp: 0.0,
            Lambda: 0.0,
            gas_enthalpies: vec![0.0; NC],
            site_enthalpies: vec![0.0; SURF_NC],
        }
    }
}

#[derive(Debug, Clone)]
pub struct MixtureEvaluator {
    source: PropertySource,
    /// species enthalpies are refreshed at every evaluation
    enthalpies: bool,
    state: MixtureState,
}

impl MixtureEvaluator {
    pub fn new(
        config: &ReactorConfiguration,
        NC: usize,
        SURF_NC: usize,
        enthalpies: bool,
    ) -> Self {
        let source = match config.kinetics {
            KineticsType::EngineProvided => PropertySource::Engine,
            KineticsType::UserDefined => PropertySource::Configured {
                Cp: config.Cp,
                Lambda: config.Lambda,
            },
        };
        Self {
            source,
            enthalpies,
            state: MixtureState::new(NC, SURF_NC),
        }
    }

    /// mixture state of the last evaluation
    pub fn state(&self) -> &MixtureState {
        &self.state
    }

    pub fn evaluate(
        &mut self,
        chemistry: &dyn ChemistryService,
        T: f64,
        P: f64,
        mass_fractions: &[f64],
        molecular_weights: &[f64],
    ) -> Result<&MixtureState, EvaluationError> {
        if !(T > 0.0) {
            return Err(EvaluationError::NonPositiveTemperature(T));
        }
        let state = &mut self.state;
        state.T = T;
        state.P = P;
        match self.source {
            PropertySource::Engine => {
                state.MWmix = chemistry.mean_molecular_weight(mass_fractions)?;
                check_molecular_weight(state.MWmix)?;
                state.rho = chemistry.density(T, P, mass_fractions)?;
                state.Cp = chemistry.cp_mass(T, P, mass_fractions)?;
                state.Lambda = chemistry.thermal_conductivity(T, P, mass_fractions)?;
            }
            PropertySource::Configured { Cp, Lambda } => {
                state.MWmix = mean_molecular_weight(mass_fractions, molecular_weights);
                check_molecular_weight(state.MWmix)?;
                state.rho = P * state.MWmix / (R_U * T);
                state.Cp = Cp;
                state.Lambda = Lambda;
            }
        }
        if !(state.rho > 0.0) || !state.rho.is_finite() {
            return Err(EvaluationError::NonPositiveDensity(state.rho));
        }
        if self.enthalpies {
            chemistry.gas_enthalpies(T, &mut state.gas_enthalpies)?;
            if !state.site_enthalpies.is_empty() {
                chemistry.surface_enthalpies(T, &mut state.site_enthalpies)?;
            }
        }
        Ok(&self.state)
    }
}

fn check_molecular_weight(MWmix: f64) -> Result<(), EvaluationError> {
    if !(MWmix > 0.0) || !MWmix.is_finite() {
        return Err(EvaluationError::NonPositiveMolecularWeight(MWmix));
    }
    Ok(())
}
