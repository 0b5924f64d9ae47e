//! Ideal-gas reference engine.
//!
//! Gas reactions follow the mass-action law with concentrations in kmol/m³; surface reactions
//! follow the Langmuir-Hinshelwood form where gas species enter through their bulk
//! concentration and adsorbed species through Γ·θ (kmol/m²). All reactions are irreversible;
//! a reversible step is written as two reactions.
//!
//! Properties of the mixture:
//! - density from the ideal-gas law: ρ = P·M/(R·T)
//! - cp = Σ ωᵢ·cpᵢ/Mᵢ
//! - λ = Σ xᵢ·λᵢ (mole-fraction average)
//! - Dᵢ = Dᵢ,ref·(T/298.15)^1.75·(101325/P)
use super::{ChemistryError, ChemistryService, check_buffer};
use crate::Thermodynamics::species_thermo::{R_U, SpeciesThermo};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const R: f64 = 8.314;
const T_REF_DIFFUSION: f64 = 298.15;
const P_REF_DIFFUSION: f64 = 101325.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasSpeciesData {
    pub name: String,
    /// kg/kmol
    pub molecular_weight: f64,
    pub thermo: SpeciesThermo,
    /// W/(m·K)
    #[serde(default = "default_conductivity")]
    pub conductivity: f64,
    /// m²/s at 298.15 K and 1 atm
    #[serde(default = "default_diffusivity")]
    pub diffusivity: f64,
}

fn default_conductivity() -> f64 {
    0.026
}
fn default_diffusivity() -> f64 {
    2.0e-5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceSpeciesData {
    pub name: String,
    #[serde(default)]
    pub thermo: SpeciesThermo,
}

/// irreversible step with Arrhenius constant A·T^n·exp(-E/(R·T)), E in J/mol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementaryReactionData {
    pub equation: String,
    pub reactants: HashMap<String, f64>,
    pub products: HashMap<String, f64>,
    pub A: f64,
    #[serde(default)]
    pub n: f64,
    #[serde(default)]
    pub E: f64,
}

/// serializable form of a mechanism
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MechanismData {
    pub gas_species: Vec<GasSpeciesData>,
    #[serde(default)]
    pub surface_species: Vec<SurfaceSpeciesData>,
    /// kmol/m²
    #[serde(default)]
    pub site_density: f64,
    #[serde(default)]
    pub gas_reactions: Vec<ElementaryReactionData>,
    #[serde(default)]
    pub surface_reactions: Vec<ElementaryReactionData>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Gas(usize),
    Site(usize),
}

#[derive(Debug, Clone)]
struct CompiledReaction {
    A: f64,
    n: f64,
    E: f64,
    reactants: Vec<(Slot, f64)>,
    net: Vec<(Slot, f64)>,
}

impl CompiledReaction {
    fn K_const(&self, T: f64) -> f64 {
        self.A * T.powf(self.n) * f64::exp(-self.E / (R * T))
    }
}

/// Ideal-gas chemistry engine implementing [`ChemistryService`]
#[derive(Debug, Clone)]
pub struct IdealGasMechanism {
    gas_names: Vec<String>,
    surface_names: Vec<String>,
    MW: Vec<f64>,
    gas_thermo: Vec<SpeciesThermo>,
    surface_thermo: Vec<SpeciesThermo>,
    conductivities: Vec<f64>,
    diffusivities: Vec<f64>,
    site_density: f64,
    gas_reactions: Vec<CompiledReaction>,
    surface_reactions: Vec<CompiledReaction>,
}

impl IdealGasMechanism {
    pub fn new(data: MechanismData) -> Result<Self, ChemistryError> {
        if data.gas_species.is_empty() {
            return Err(ChemistryError::InvalidMechanism(
                "mechanism has no gas species".to_string(),
            ));
        }
        for species in &data.gas_species {
            if species.molecular_weight <= 0.0 {
                return Err(ChemistryError::InvalidMechanism(format!(
                    "molecular weight of {} must be positive",
                    species.name
                )));
            }
        }
        if !data.surface_species.is_empty() && data.site_density <= 0.0 {
            return Err(ChemistryError::InvalidMechanism(
                "surface phase requires a positive site density".to_string(),
            ));
        }
        let gas_names: Vec<String> = data.gas_species.iter().map(|s| s.name.clone()).collect();
        let surface_names: Vec<String> =
            data.surface_species.iter().map(|s| s.name.clone()).collect();

        let gas_reactions = data
            .gas_reactions
            .iter()
            .map(|r| compile_reaction(r, &gas_names, &[]))
            .collect::<Result<Vec<_>, _>>()?;
        let surface_reactions = data
            .surface_reactions
            .iter()
            .map(|r| compile_reaction(r, &gas_names, &surface_names))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            "mechanism compiled: {} gas species, {} surface species, {} gas and {} surface reactions",
            gas_names.len(),
            surface_names.len(),
            gas_reactions.len(),
            surface_reactions.len()
        );
        Ok(Self {
            MW: data.gas_species.iter().map(|s| s.molecular_weight).collect(),
            gas_thermo: data.gas_species.iter().map(|s| s.thermo.clone()).collect(),
            surface_thermo: data
                .surface_species
                .iter()
                .map(|s| s.thermo.clone())
                .collect(),
            conductivities: data.gas_species.iter().map(|s| s.conductivity).collect(),
            diffusivities: data.gas_species.iter().map(|s| s.diffusivity).collect(),
            site_density: data.site_density,
            gas_names,
            surface_names,
            gas_reactions,
            surface_reactions,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ChemistryError> {
        let data: MechanismData = serde_json::from_str(json)
            .map_err(|e| ChemistryError::InvalidMechanism(e.to_string()))?;
        Self::new(data)
    }

    fn check_state(T: f64, P: f64) -> Result<(), ChemistryError> {
        if !(T > 0.0) || !(P > 0.0) {
            return Err(ChemistryError::InvalidState(format!(
                "T = {} K, P = {} Pa",
                T, P
            )));
        }
        Ok(())
    }

    fn mole_fraction_denominator(&self, mass_fractions: &[f64]) -> f64 {
        mass_fractions
            .iter()
            .zip(self.MW.iter())
            .map(|(w, mw)| w / mw)
            .sum()
    }

    fn evaluate_reactions(
        reactions: &[CompiledReaction],
        T: f64,
        gas_concentration: impl Fn(usize) -> f64,
        site_concentration: impl Fn(usize) -> f64,
        gas_rates: &mut [f64],
        site_rates: &mut [f64],
    ) {
        gas_rates.iter_mut().for_each(|r| *r = 0.0);
        site_rates.iter_mut().for_each(|r| *r = 0.0);
        for reaction in reactions {
            let mut rate = reaction.K_const(T);
            for (slot, order) in &reaction.reactants {
                let c = match slot {
                    Slot::Gas(i) => gas_concentration(*i),
                    Slot::Site(k) => site_concentration(*k),
                };
                rate *= c.powf(*order);
            }
            for (slot, nu) in &reaction.net {
                match slot {
                    Slot::Gas(i) => gas_rates[*i] += nu * rate,
                    Slot::Site(k) => site_rates[*k] += nu * rate,
                }
            }
        }
    }
}

fn compile_reaction(
    data: &ElementaryReactionData,
    gas_names: &[String],
    surface_names: &[String],
) -> Result<CompiledReaction, ChemistryError> {
    let slot = |name: &str| -> Result<Slot, ChemistryError> {
        if let Some(i) = gas_names.iter().position(|s| s == name) {
            Ok(Slot::Gas(i))
        } else if let Some(k) = surface_names.iter().position(|s| s == name) {
            Ok(Slot::Site(k))
        } else {
            Err(ChemistryError::UnknownSpecies(name.to_string()))
        }
    };
    let mut reactants = Vec::with_capacity(data.reactants.len());
    let mut net: Vec<(Slot, f64)> = Vec::new();
    let mut add_net = |s: Slot, nu: f64| match net.iter_mut().find(|(t, _)| *t == s) {
        Some((_, total)) => *total += nu,
        None => net.push((s, nu)),
    };
    for (name, nu) in &data.reactants {
        let s = slot(name)?;
        reactants.push((s, *nu));
        add_net(s, -nu);
    }
    for (name, nu) in &data.products {
        add_net(slot(name)?, *nu);
    }
    Ok(CompiledReaction {
        A: data.A,
        n: data.n,
        E: data.E,
        reactants,
        net,
    })
}

impl ChemistryService for IdealGasMechanism {
    fn gas_species_names(&self) -> &[String] {
        &self.gas_names
    }
    fn surface_species_names(&self) -> &[String] {
        &self.surface_names
    }
    fn molecular_weights(&self) -> &[f64] {
        &self.MW
    }
    fn site_density(&self) -> f64 {
        self.site_density
    }

    fn density(&self, T: f64, P: f64, mass_fractions: &[f64]) -> Result<f64, ChemistryError> {
        Self::check_state(T, P)?;
        let M = self.mean_molecular_weight(mass_fractions)?;
        Ok(P * M / (R_U * T))
    }

    fn mean_molecular_weight(&self, mass_fractions: &[f64]) -> Result<f64, ChemistryError> {
        check_buffer("mass fractions", mass_fractions, self.MW.len())?;
        Ok(1.0 / self.mole_fraction_denominator(mass_fractions))
    }

    fn cp_mass(&self, T: f64, P: f64, mass_fractions: &[f64]) -> Result<f64, ChemistryError> {
        Self::check_state(T, P)?;
        check_buffer("mass fractions", mass_fractions, self.MW.len())?;
        let mut cp = 0.0;
        for ((w, mw), thermo) in mass_fractions
            .iter()
            .zip(self.MW.iter())
            .zip(self.gas_thermo.iter())
        {
            cp += w * thermo.heat_capacity(T)? / mw;
        }
        Ok(cp)
    }

    fn thermal_conductivity(
        &self,
        T: f64,
        P: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, ChemistryError> {
        Self::check_state(T, P)?;
        check_buffer("mass fractions", mass_fractions, self.MW.len())?;
        let denominator = self.mole_fraction_denominator(mass_fractions);
        Ok(mass_fractions
            .iter()
            .zip(self.MW.iter())
            .zip(self.conductivities.iter())
            .map(|((w, mw), lambda)| (w / mw) / denominator * lambda)
            .sum())
    }

    fn mixture_diffusion_coefficients(
        &self,
        T: f64,
        P: f64,
        mass_fractions: &[f64],
        diffusivities: &mut [f64],
    ) -> Result<(), ChemistryError> {
        Self::check_state(T, P)?;
        check_buffer("mass fractions", mass_fractions, self.MW.len())?;
        check_buffer("diffusivities", diffusivities, self.MW.len())?;
        let factor = (T / T_REF_DIFFUSION).powf(1.75) * (P_REF_DIFFUSION / P);
        for (d, d_ref) in diffusivities.iter_mut().zip(self.diffusivities.iter()) {
            *d = d_ref * factor;
        }
        Ok(())
    }

    fn gas_enthalpies(&self, T: f64, enthalpies: &mut [f64]) -> Result<(), ChemistryError> {
        check_buffer("gas enthalpies", enthalpies, self.gas_thermo.len())?;
        for (h, thermo) in enthalpies.iter_mut().zip(self.gas_thermo.iter()) {
            *h = thermo.enthalpy(T)?;
        }
        Ok(())
    }

    fn surface_enthalpies(&self, T: f64, enthalpies: &mut [f64]) -> Result<(), ChemistryError> {
        check_buffer("surface enthalpies", enthalpies, self.surface_thermo.len())?;
        for (h, thermo) in enthalpies.iter_mut().zip(self.surface_thermo.iter()) {
            *h = thermo.enthalpy(T)?;
        }
        Ok(())
    }

    fn gas_production_rates(
        &self,
        T: f64,
        P: f64,
        mass_fractions: &[f64],
        rates: &mut [f64],
    ) -> Result<(), ChemistryError> {
        check_buffer("gas production rates", rates, self.MW.len())?;
        let rho = self.density(T, P, mass_fractions)?;
        let MW = &self.MW;
        Self::evaluate_reactions(
            &self.gas_reactions,
            T,
            |i| rho * mass_fractions[i] / MW[i],
            |_| 0.0,
            rates,
            &mut [],
        );
        Ok(())
    }

    fn surface_production_rates(
        &self,
        T: f64,
        P: f64,
        mass_fractions: &[f64],
        coverages: &[f64],
        gas_rates: &mut [f64],
        site_rates: &mut [f64],
    ) -> Result<(), ChemistryError> {
        check_buffer("gas production rates", gas_rates, self.MW.len())?;
        check_buffer("coverages", coverages, self.surface_names.len())?;
        check_buffer("site production rates", site_rates, self.surface_names.len())?;
        let rho = self.density(T, P, mass_fractions)?;
        let MW = &self.MW;
        let gamma = self.site_density;
        Self::evaluate_reactions(
            &self.surface_reactions,
            T,
            |i| rho * mass_fractions[i] / MW[i],
            |k| gamma * coverages[k],
            gas_rates,
            site_rates,
        );
        Ok(())
    }
}
