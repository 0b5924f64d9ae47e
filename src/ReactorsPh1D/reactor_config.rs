//! Reactor configuration record.
//!
//! The record is filled once (directly, through the setters, or from JSON) and then handed
//! over to [`Ph1DEquations::new`](super::Ph1DEquations::Ph1DEquations::new), which validates
//! it against the chemistry service before any buffer is sized. After that it is read-only.
//!
//! A configuration with user-defined kinetics may also carry its own gas species list
//! (names and molecular weights). Such a reactor can be built without any chemistry engine
//! through [`Ph1DEquations::from_configuration`](super::Ph1DEquations::Ph1DEquations::from_configuration).
use super::reactor_errors::ConfigurationError;
use crate::ChemistryService::ChemistryService;
use crate::ChemistryService::configured_species::ConfiguredSpecies;
use crate::Kinetics::custom_kinetics::CustomKineticScheme;
use log::{info, warn};
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolutionMode {
    /// unknowns vary along the reactor axis, site balances are algebraic
    #[default]
    SteadyProfile,
    /// unknowns vary in time, every balance is differential
    Transient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KineticsType {
    #[default]
    EngineProvided,
    UserDefined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnabledEquations {
    pub homogeneous: bool,
    pub heterogeneous: bool,
    pub energy: bool,
}

/// heat exchanged with a wall: q = U·a·(T - T_wall), W/m³
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatExchange {
    /// W/(m²·K)
    pub U: f64,
    /// exchange area per unit of reactor volume, m²/m³
    pub area_per_volume: f64,
    /// K
    pub T_wall: f64,
}

impl HeatExchange {
    pub fn heat_loss(&self, T: f64) -> f64 {
        self.U * self.area_per_volume * (T - self.T_wall)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorConfiguration {
    #[serde(default)]
    pub problem_name: Option<String>,
    #[serde(default)]
    pub problem_description: Option<String>,
    /// Pa
    pub P: f64,
    /// inlet (or fixed) temperature, K
    pub T0: f64,
    /// inlet mass fractions, one per gas species
    pub omega0: Vec<f64>,
    /// gas species of a reactor with user-defined kinetics, when no chemistry engine supplies them
    #[serde(default)]
    pub species: Option<ConfiguredSpecies>,
    /// reactor length, m
    pub L: f64,
    /// specific mass flow rate, kg/(m²·s)
    pub G: f64,
    /// catalyst load, m² of catalyst per m³ of reactor
    pub alfa: f64,
    /// specific heat used when the chemistry service is bypassed, J/(kg·K)
    pub Cp: f64,
    /// thermal conductivity used when the chemistry service is bypassed, W/(m·K)
    pub Lambda: f64,
    pub enabled: EnabledEquations,
    #[serde(default)]
    pub resolution: ResolutionMode,
    #[serde(default)]
    pub kinetics: KineticsType,
    #[serde(default)]
    pub custom_scheme: Option<CustomKineticScheme>,
    #[serde(default)]
    pub heat_exchange: Option<HeatExchange>,
    /// final time of a transient run, s
    pub tF: f64,
    /// number of output points
    pub NP: usize,
}

impl Default for ReactorConfiguration {
    fn default() -> Self {
        Self {
            problem_name: None,
            problem_description: None,
            P: 101325.0,
            T0: 298.15,
            omega0: Vec::new(),
            species: None,
            L: 0.0,
            G: 0.0,
            alfa: 0.0,
            Cp: 0.0,
            Lambda: 0.0,
            enabled: EnabledEquations::default(),
            resolution: ResolutionMode::default(),
            kinetics: KineticsType::default(),
            custom_scheme: None,
            heat_exchange: None,
            tF: 0.0,
            NP: 2,
        }
    }
}

impl ReactorConfiguration {
    pub fn new() -> Self {
        Self::default()
    }
    /////////////////////////////////SETTERS////////////////////////////////////////////////////////////////////////////////
    pub fn set_problem_name(&mut self, name: &str) {
        self.problem_name = Some(name.to_string());
    }

    pub fn set_problem_description(&mut self, description: &str) {
        self.problem_description = Some(description.to_string());
    }

    pub fn set_operating_conditions(&mut self, pressure: f64, length: f64, mass_flux: f64) {
        self.P = pressure;
        self.L = length;
        self.G = mass_flux;
    }

    pub fn set_inlet_conditions(&mut self, omega0: Vec<f64>, T0: f64) {
        self.omega0 = omega0;
        self.T0 = T0;
    }

    /// gas species names and molecular weights used by user-defined kinetics
    pub fn set_species(&mut self, species: ConfiguredSpecies) {
        self.species = Some(species);
    }

    pub fn set_catalyst_load(&mut self, alfa: f64) {
        self.alfa = alfa;
    }

    /// properties used when the chemistry service is bypassed
    pub fn set_transport_properties(&mut self, Cp: f64, Lambda: f64) {
        self.Cp = Cp;
        self.Lambda = Lambda;
    }

    pub fn set_reactions(&mut self, homogeneous: bool, heterogeneous: bool) {
        self.enabled.homogeneous = homogeneous;
        self.enabled.heterogeneous = heterogeneous;
    }

    pub fn set_energy(&mut self, energy: bool) {
        self.enabled.energy = energy;
    }

    pub fn set_resolution_type(&mut self, resolution: ResolutionMode) {
        self.resolution = resolution;
    }

    pub fn set_kinetic_type(&mut self, kinetics: KineticsType) {
        self.kinetics = kinetics;
    }

    /// registers a custom scheme and switches to user-defined kinetics
    pub fn set_custom_kinetics(&mut self, scheme: CustomKineticScheme) {
        self.custom_scheme = Some(scheme);
        self.kinetics = KineticsType::UserDefined;
    }

    pub fn set_heat_exchange(&mut self, exchange: HeatExchange) {
        self.heat_exchange = Some(exchange);
    }

    pub fn set_integration_time(&mut self, tF: f64) {
        self.tF = tF;
    }

    pub fn set_number_of_points(&mut self, NP: usize) {
        self.NP = NP;
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    ///////////////////////////////////////////VALIDATION////////////////////////////////////////////////
    /// Checks:
    /// - inlet composition matches the species list of the chemistry service
    /// - a configured species list, if any, is consistent and names the same species
    /// - pressure, temperature and (in steady mode) length and mass flux are positive
    /// - catalyst load is positive when surface reactions are enabled
    /// - configured Cp and Lambda are positive when the service is bypassed
    /// - a custom scheme is present for user-defined kinetics
    pub fn validate(&self, chemistry: &dyn ChemistryService) -> Result<(), ConfigurationError> {
        if let Some(species) = &self.species {
            species.check()?;
            if species.names != chemistry.gas_species_names() {
                return Err(ConfigurationError::ConfiguredSpeciesMismatch {
                    configured: species.names.clone(),
                    service: chemistry.gas_species_names().to_vec(),
                });
            }
        }
        self.check(chemistry.n_gas_species())
    }

    /// Same checks for a reactor without chemistry engine. It needs user-defined kinetics, a
    /// configured species list and, with the energy equation, a reaction enthalpy for every
    /// enabled custom reaction.
    pub fn validate_standalone(&self) -> Result<(), ConfigurationError> {
        if self.kinetics != KineticsType::UserDefined {
            return Err(ConfigurationError::ChemistryServiceRequired(
                "engine-provided kinetics",
            ));
        }
        let species = self
            .species
            .as_ref()
            .ok_or(ConfigurationError::ChemistryServiceRequired(
                "a reactor without configured species",
            ))?;
        species.check()?;
        if let Some(scheme) = &self.custom_scheme {
            if self.enabled.energy && scheme.uses_species_enthalpies(self.enabled) {
                return Err(ConfigurationError::ChemistryServiceRequired(
                    "the heat of a custom reaction without reaction enthalpy",
                ));
            }
        }
        self.check(species.names.len())
    }

    fn check(&self, NC: usize) -> Result<(), ConfigurationError> {
        if NC == 0 {
            return Err(ConfigurationError::SpeciesCountUnknown);
        }
        if self.omega0.len() != NC {
            return Err(ConfigurationError::InletLengthMismatch {
                expected: NC,
                found: self.omega0.len(),
            });
        }
        positive("pressure P", self.P)?;
        positive("inlet temperature T0", self.T0)?;
        match self.resolution {
            ResolutionMode::SteadyProfile => {
                positive("reactor length L", self.L)?;
                positive("specific mass flow rate G", self.G)?;
            }
            ResolutionMode::Transient => positive("integration time tF", self.tF)?,
        }
        if self.enabled.heterogeneous {
            positive("catalyst load alfa", self.alfa)?;
        }
        if self.kinetics == KineticsType::UserDefined {
            if self.custom_scheme.is_none() {
                return Err(ConfigurationError::MissingCustomScheme);
            }
            positive("specific heat Cp", self.Cp)?;
            positive("thermal conductivity Lambda", self.Lambda)?;
        }
        if let Some(exchange) = &self.heat_exchange {
            positive("wall temperature", exchange.T_wall)?;
        }
        if self.NP < 2 {
            return Err(ConfigurationError::TooFewPoints(self.NP));
        }
        if let Some(i) = self.omega0.iter().position(|w| *w < 0.0 || !w.is_finite()) {
            return Err(ConfigurationError::NonPositive {
                name: "inlet mass fraction",
                value: self.omega0[i],
            });
        }
        let sum: f64 = self.omega0.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            warn!("inlet mass fractions sum to {} instead of 1", sum);
        }
        info!("reactor configuration checked!");
        Ok(())
    }

    /// integration horizon: reactor length in steady mode, final time in transient mode
    pub fn horizon(&self) -> f64 {
        match self.resolution {
            ResolutionMode::SteadyProfile => self.L,
            ResolutionMode::Transient => self.tF,
        }
    }

    /// NP evenly spaced output abscissae over [0, horizon]
    pub fn sample_points(&self) -> Vec<f64> {
        let horizon = self.horizon();
        let NP = self.NP.max(2);
        (0..NP)
            .map(|i| horizon * i as f64 / (NP - 1) as f64)
            .collect()
    }

    ////////////////////////PRETTY PRINTING/////////////////////////////
    pub fn pretty_print(&self) {
        println!("\n=== REACTOR CONFIGURATION ===");
        println!("Problem Name: {:?}", self.problem_name);
        println!("Problem Description: {:?}", self.problem_description);

        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value", "Units"]);
        table.add_row(row!["Pressure (P)", format!("{:.2}", self.P), "Pa"]);
        table.add_row(row!["Inlet temperature (T0)", format!("{:.2}", self.T0), "K"]);
        table.add_row(row!["Length (L)", format!("{:.4}", self.L), "m"]);
        table.add_row(row!["Specific mass flow (G)", format!("{:.4}", self.G), "kg/m2/s"]);
        table.add_row(row!["Catalyst load (alfa)", format!("{:.3e}", self.alfa), "1/m"]);
        table.add_row(row!["Heat capacity (Cp)", format!("{:.2}", self.Cp), "J/kg/K"]);
        table.add_row(row![
            "Thermal conductivity (Lambda)",
            format!("{:.6}", self.Lambda),
            "W/m/K"
        ]);
        table.add_row(row!["Integration time (tF)", format!("{:.4}", self.tF), "s"]);
        table.add_row(row!["Number of points (NP)", self.NP, "-"]);
        table.add_row(row!["Homogeneous reactions", self.enabled.homogeneous, ""]);
        table.add_row(row!["Heterogeneous reactions", self.enabled.heterogeneous, ""]);
        table.add_row(row!["Energy equation", self.enabled.energy, ""]);
        table.add_row(row!["Resolution", format!("{:?}", self.resolution), ""]);
        table.add_row(row!["Kinetics", format!("{:?}", self.kinetics), ""]);
        table.printstd();

        println!("\nInlet mass fractions: {:?}", self.omega0);
        if let Some(exchange) = &self.heat_exchange {
            println!(
                "Heat exchange: U = {} W/m2/K, a = {} 1/m, T_wall = {} K",
                exchange.U, exchange.area_per_volume, exchange.T_wall
            );
        }
        if let Some(species) = &self.species {
            println!("Configured species: {:?}, MW = {:?}", species.names, species.MW);
        }
        if let Some(scheme) = &self.custom_scheme {
            scheme.pretty_print();
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if !(value > 0.0) {
        return Err(ConfigurationError::NonPositive { name, value });
    }
    Ok(())
}
