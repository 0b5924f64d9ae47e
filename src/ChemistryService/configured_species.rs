//! Gas species supplied by the reactor configuration instead of a chemistry engine.
//!
//! Only names and molecular weights are known, so the mixture queries are limited to the mean
//! molecular weight and the ideal-gas density. Heat capacity, transport, enthalpies and
//! elementary rates report [`ChemistryError::Unavailable`].
use super::{ChemistryError, ChemistryService, check_buffer};
use crate::Thermodynamics::species_thermo::R_U;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredSpecies {
    pub names: Vec<String>,
    /// kg/kmol
    pub MW: Vec<f64>,
}

impl ConfiguredSpecies {
    pub fn new(names: &[&str], MW: &[f64]) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            MW: MW.to_vec(),
        }
    }

    /// names must be unique and each one needs a positive molecular weight
    pub fn check(&self) -> Result<(), ChemistryError> {
        if self.names.is_empty() {
            return Err(ChemistryError::InvalidMechanism(
                "configured species list is empty".to_string(),
            ));
        }
        if self.names.len() != self.MW.len() {
            return Err(ChemistryError::InvalidMechanism(format!(
                "{} configured species but {} molecular weights",
                self.names.len(),
                self.MW.len()
            )));
        }
        for (i, (name, mw)) in self.names.iter().zip(self.MW.iter()).enumerate() {
            if !(*mw > 0.0) || !mw.is_finite() {
                return Err(ChemistryError::InvalidMechanism(format!(
                    "molecular weight of {} must be positive",
                    name
                )));
            }
            if self.names[..i].contains(name) {
                return Err(ChemistryError::InvalidMechanism(format!(
                    "species {} is listed twice",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl ChemistryService for ConfiguredSpecies {
    fn gas_species_names(&self) -> &[String] {
        &self.names
    }
    fn surface_species_names(&self) -> &[String] {
        &[]
    }
    fn molecular_weights(&self) -> &[f64] {
        &self.MW
    }
    fn site_density(&self) -> f64 {
        0.0
    }

    fn density(&self, T: f64, P: f64, mass_fractions: &[f64]) -> Result<f64, ChemistryError> {
        if !(T > 0.0) || !(P > 0.0) {
            return Err(ChemistryError::InvalidState(format!(
                "T = {} K, P = {} Pa",
                T, P
            )));
        }
        Ok(P * self.mean_molecular_weight(mass_fractions)? / (R_U * T))
    }

    fn mean_molecular_weight(&self, mass_fractions: &[f64]) -> Result<f64, ChemistryError> {
        check_buffer("mass fractions", mass_fractions, self.MW.len())?;
        Ok(1.0
            / mass_fractions
                .iter()
                .zip(self.MW.iter())
                .map(|(w, mw)| w / mw)
                .sum::<f64>())
    }

    fn cp_mass(&self, _T: f64, _P: f64, _mass_fractions: &[f64]) -> Result<f64, ChemistryError> {
        Err(ChemistryError::Unavailable("heat capacity"))
    }

    fn thermal_conductivity(
        &self,
        _T: f64,
        _P: f64,
        _mass_fractions: &[f64],
    ) -> Result<f64, ChemistryError> {
        Err(ChemistryError::Unavailable("thermal conductivity"))
    }

    fn mixture_diffusion_coefficients(
        &self,
        _T: f64,
        _P: f64,
        _mass_fractions: &[f64],
        _diffusivities: &mut [f64],
    ) -> Result<(), ChemistryError> {
        Err(ChemistryError::Unavailable("diffusion coefficients"))
    }

    fn gas_enthalpies(&self, _T: f64, _enthalpies: &mut [f64]) -> Result<(), ChemistryError> {
        Err(ChemistryError::Unavailable("species enthalpies"))
    }

    fn surface_enthalpies(&self, _T: f64, enthalpies: &mut [f64]) -> Result<(), ChemistryError> {
        check_buffer("surface enthalpies", enthalpies, 0)
    }

    fn gas_production_rates(
        &self,
        _T: f64,
        _P: f64,
        _mass_fractions: &[f64],
        _rates: &mut [f64],
    ) -> Result<(), ChemistryError> {
        Err(ChemistryError::Unavailable("elementary gas reactions"))
    }

    fn surface_production_rates(
        &self,
        _T: f64,
        _P: f64,
        _mass_fractions: &[f64],
        _coverages: &[f64],
        _gas_rates: &mut [f64],
        _site_rates: &mut [f64],
    ) -> Result<(), ChemistryError> {
        Err(ChemistryError::Unavailable("surface reactions"))
    }
}
