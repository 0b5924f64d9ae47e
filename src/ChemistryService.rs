//! # Chemistry Service
//!
//! The reactor equations never compute species properties or elementary reaction rates
//! themselves. Everything that depends on the chemical mechanism is consumed through the
//! [`ChemistryService`] trait: species lists, molecular weights, mixture density, heat
//! capacity, conductivity, diffusion coefficients, molar enthalpies and net production rates
//! of the gas and surface phases.
//!
//! ## Units
//!
//! | Quantity | Units |
//! |----------|-------|
//! | molecular weight | kg/kmol |
//! | gas production rate | kmol/(m³·s) |
//! | surface production rate | kmol/(m²·s) |
//! | site density | kmol/m² |
//! | molar enthalpy | J/kmol |
//! | heat capacity | J/(kg·K) |
//!
//! ## Lifetime contract
//!
//! [`Ph1DEquations`](crate::ReactorsPh1D::Ph1DEquations::Ph1DEquations) borrows the service
//! as `&'c dyn ChemistryService`, so the service must outlive the equation object. All methods
//! take `&self`; an engine with interior caches is not expected to be shared between
//! several equation objects at the same time without external synchronization.
//!
//! ## Reference engine
//!
//! [`ideal_gas_mechanism::IdealGasMechanism`] is a small ideal-gas engine with NASA-7
//! thermodynamics, mass-action gas reactions and Langmuir-Hinshelwood surface reactions.
//! It can be loaded from JSON and is what the examples and tests run against.
//!
//! [`configured_species::ConfiguredSpecies`] is the species list of a reactor configuration. It
//! answers the species and mixture molecular-weight queries only, which is all user-defined
//! kinetics with configured properties needs.
use thiserror::Error;

/// error of the chemistry engine while answering a query
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChemistryError {
    #[error("species '{0}' is not part of the mechanism")]
    UnknownSpecies(String),
    #[error("buffer for {quantity} has {found} entries, expected {expected}")]
    BufferLength {
        quantity: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("temperature {temperature} K is outside of the thermodynamic fit range {range:?}")]
    TemperatureOutOfRange { temperature: f64, range: (f64, f64) },
    #[error("invalid thermodynamic state: {0}")]
    InvalidState(String),
    #[error("invalid mechanism: {0}")]
    InvalidMechanism(String),
    #[error("{0} is not available without a chemistry engine")]
    Unavailable(&'static str),
}

/// Read-only capability object standing for the chemistry/thermodynamics/transport engine.
///
/// Output buffers are supplied by the caller and must have the length of the corresponding
/// species list; the reactor core pre-sizes them once so evaluation stays allocation-free.
pub trait ChemistryService {
    /// names of gas-phase species, in state-vector order
    fn gas_species_names(&self) -> &[String];
    /// names of surface (site) species, in state-vector order; empty without a surface phase
    fn surface_species_names(&self) -> &[String];
    /// molecular weights of gas species, kg/kmol
    fn molecular_weights(&self) -> &[f64];
    /// total site density of the surface phase, kmol/m²
    fn site_density(&self) -> f64;

    fn n_gas_species(&self) -> usize {
        self.gas_species_names().len()
    }
    fn n_surface_species(&self) -> usize {
        self.surface_species_names().len()
    }
    /// position of a gas species in the species list
    fn species_index(&self, name: &str) -> Option<usize> {
        self.gas_species_names().iter().position(|s| s == name)
    }

    /// mixture density, kg/m³
    fn density(&self, T: f64, P: f64, mass_fractions: &[f64]) -> Result<f64, ChemistryError>;
    /// mean molecular weight of the mixture, kg/kmol
    fn mean_molecular_weight(&self, mass_fractions: &[f64]) -> Result<f64, ChemistryError>;
    /// specific heat at constant pressure, J/(kg·K)
    fn cp_mass(&self, T: f64, P: f64, mass_fractions: &[f64]) -> Result<f64, ChemistryError>;
    /// mixture thermal conductivity, W/(m·K)
    fn thermal_conductivity(
        &self,
        T: f64,
        P: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, ChemistryError>;
    /// mixture-averaged diffusion coefficients of gas species, m²/s
    fn mixture_diffusion_coefficients(
        &self,
        T: f64,
        P: f64,
        mass_fractions: &[f64],
        diffusivities: &mut [f64],
    ) -> Result<(), ChemistryError>;
    /// molar enthalpies of gas species (formation enthalpy included), J/kmol
    fn gas_enthalpies(&self, T: f64, enthalpies: &mut [f64]) -> Result<(), ChemistryError>;
    /// molar enthalpies of surface species, J/kmol
    fn surface_enthalpies(&self, T: f64, enthalpies: &mut [f64]) -> Result<(), ChemistryError>;
    /// net production rates of gas species by the gas-phase mechanism, kmol/(m³·s)
    fn gas_production_rates(
        &self,
        T: f64,
        P: f64,
        mass_fractions: &[f64],
        rates: &mut [f64],
    ) -> Result<(), ChemistryError>;
    /// net production rates of the surface mechanism per unit of catalytic area, kmol/(m²·s):
    /// gas species exchanged with the bulk and surface species
    fn surface_production_rates(
        &self,
        T: f64,
        P: f64,
        mass_fractions: &[f64],
        coverages: &[f64],
        gas_rates: &mut [f64],
        site_rates: &mut [f64],
    ) -> Result<(), ChemistryError>;
}

pub(crate) fn check_buffer(
    quantity: &'static str,
    buffer: &[f64],
    expected: usize,
) -> Result<(), ChemistryError> {
    if buffer.len() != expected {
        return Err(ChemistryError::BufferLength {
            quantity,
            expected,
            found: buffer.len(),
        });
    }
    Ok(())
}

pub mod configured_species;
pub mod ideal_gas_mechanism;
mod ideal_gas_mechanism_tests;
#[cfg(test)]
pub(crate) mod test_mechanisms;
