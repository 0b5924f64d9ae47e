//! # User-defined kinetic schemes
//!
//! A custom scheme bypasses the elementary mechanism of the chemistry engine. Every reaction is
//! described by a modified Arrhenius constant and at most two empirical concentration orders:
//!
//! ```text
//! r_j = converter · k_j · T^n_j · exp(-Ea_j/(R·T)) · C_a^a · C_b^b
//! ```
//!
//! with concentrations C = ρ·ω/M in kmol/m³ and Ea in J/mol. Participants carry signed integer
//! stoichiometric coefficients (negative for reactants). Species are referenced by name and,
//! optionally, by their index in the chemistry engine; both are cross-checked at resolution.
//!
//! Homogeneous reactions are rates per unit of reactor volume, heterogeneous reactions are
//! rates per unit of catalytic area and are multiplied by the catalyst load in the balances.
use crate::ReactorsPh1D::reactor_config::EnabledEquations;
use crate::ReactorsPh1D::reactor_errors::ConfigurationError;
use log::{info, warn};
use nalgebra::DMatrix;
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};

/// Gas constant in J/(mol·K), the units of activation energies
pub const R_G: f64 = 8.314;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReactionPhase {
    Homogeneous,
    #[default]
    Heterogeneous,
}

impl ReactionPhase {
    /// whether reactions of this phase are switched on
    pub fn is_enabled(self, enabled: EnabledEquations) -> bool {
        match self {
            ReactionPhase::Homogeneous => enabled.homogeneous,
            ReactionPhase::Heterogeneous => enabled.heterogeneous,
        }
    }
}

/// empirical concentration order of one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateOrder {
    pub species: String,
    #[serde(default)]
    pub index: Option<usize>,
    pub exponent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub species: String,
    #[serde(default)]
    pub index: Option<usize>,
    pub coefficient: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomReaction {
    pub label: String,
    /// pre-exponential factor
    pub k: f64,
    /// activation energy, J/mol
    pub Ea: f64,
    /// temperature exponent
    #[serde(default)]
    pub n: f64,
    #[serde(default)]
    pub first_order: Option<RateOrder>,
    #[serde(default)]
    pub second_order: Option<RateOrder>,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub phase: ReactionPhase,
    /// J/kmol of reaction extent; replaces Σν·h when present
    #[serde(default)]
    pub reaction_enthalpy: Option<f64>,
}

impl CustomReaction {
    pub fn new(label: &str, k: f64, Ea: f64, n: f64) -> Self {
        Self {
            label: label.to_string(),
            k,
            Ea,
            n,
            first_order: None,
            second_order: None,
            participants: Vec::new(),
            phase: ReactionPhase::default(),
            reaction_enthalpy: None,
        }
    }
    pub fn with_orders(mut self, first: Option<(&str, f64)>, second: Option<(&str, f64)>) -> Self {
        let order = |(species, exponent): (&str, f64)| RateOrder {
            species: species.to_string(),
            index: None,
            exponent,
        };
        self.first_order = first.map(order);
        self.second_order = second.map(order);
        self
    }
    pub fn with_participants(mut self, participants: &[(&str, i32)]) -> Self {
        self.participants = participants
            .iter()
            .map(|(species, coefficient)| Participant {
                species: species.to_string(),
                index: None,
                coefficient: *coefficient,
            })
            .collect();
        self
    }
    pub fn with_phase(mut self, phase: ReactionPhase) -> Self {
        self.phase = phase;
        self
    }
    pub fn with_reaction_enthalpy(mut self, dH: f64) -> Self {
        self.reaction_enthalpy = Some(dH);
        self
    }
}

fn one() -> f64 {
    1.0
}

/// ordered set of user reactions plus the unit conversion factor applied to every rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomKineticScheme {
    pub reactions: Vec<CustomReaction>,
    #[serde(default = "one")]
    pub converter: f64,
}

/// Column (parallel-vector) form of a custom scheme, one entry per reaction in each column.
/// An index of -1 in `index1`/`index2` means the order is absent. `engine_index` is the
/// chemistry-engine index of the first species in the name list of each reaction, -1 when it
/// is not supplied.
#[derive(Debug, Clone, Default)]
pub struct KineticColumns {
    pub k: Vec<f64>,
    pub Eatt: Vec<f64>,
    pub n: Vec<f64>,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub index1: Vec<i32>,
    pub index2: Vec<i32>,
    pub engine_index: Vec<i32>,
    pub name: Vec<Vec<String>>,
    pub stoich: Vec<Vec<i32>>,
    pub converter: f64,
}

impl CustomKineticScheme {
    pub fn new(reactions: Vec<CustomReaction>, converter: f64) -> Self {
        Self {
            reactions,
            converter,
        }
    }

    /// Builds a scheme from the column form. Every column must have `NR` entries and the name
    /// and stoichiometry lists of each reaction must have equal lengths.
    pub fn from_columns(
        NR: usize,
        columns: KineticColumns,
        species_names: &[String],
    ) -> Result<Self, ConfigurationError> {
        let check = |column: &'static str, found: usize| {
            if found != NR {
                Err(ConfigurationError::ColumnLengthMismatch {
                    column,
                    expected: NR,
                    found,
                })
            } else {
                Ok(())
            }
        };
        check("k", columns.k.len())?;
        check("Eatt", columns.Eatt.len())?;
        check("n", columns.n.len())?;
        check("a", columns.a.len())?;
        check("b", columns.b.len())?;
        check("index1", columns.index1.len())?;
        check("index2", columns.index2.len())?;
        check("engine_index", columns.engine_index.len())?;
        check("name", columns.name.len())?;
        check("stoich", columns.stoich.len())?;

        let mut reactions = Vec::with_capacity(NR);
        for j in 0..NR {
            let label = format!("R{}", j + 1);
            let (names, stoich) = (&columns.name[j], &columns.stoich[j]);
            if names.len() != stoich.len() {
                return Err(ConfigurationError::ColumnLengthMismatch {
                    column: "stoich",
                    expected: names.len(),
                    found: stoich.len(),
                });
            }
            let order = |index: i32, exponent: f64| -> Result<Option<RateOrder>, ConfigurationError> {
                if index < 0 {
                    return Ok(None);
                }
                let index = index as usize;
                let species = species_names.get(index).ok_or_else(|| {
                    ConfigurationError::SpeciesIndexOutOfRange {
                        reaction: label.clone(),
                        index,
                        species_count: species_names.len(),
                    }
                })?;
                Ok(Some(RateOrder {
                    species: species.clone(),
                    index: Some(index),
                    exponent,
                }))
            };
            let mut reaction = CustomReaction::new(&label, columns.k[j], columns.Eatt[j], columns.n[j]);
            reaction.first_order = order(columns.index1[j], columns.a[j])?;
            reaction.second_order = order(columns.index2[j], columns.b[j])?;
            reaction.participants = names
                .iter()
                .zip(stoich.iter())
                .map(|(species, coefficient)| Participant {
                    species: species.clone(),
                    index: None,
                    coefficient: *coefficient,
                })
                .collect();
            if columns.engine_index[j] >= 0 {
                let reference = reaction.participants.first_mut().ok_or(
                    ConfigurationError::ColumnLengthMismatch {
                        column: "name",
                        expected: 1,
                        found: 0,
                    },
                )?;
                reference.index = Some(columns.engine_index[j] as usize);
            }
            reactions.push(reaction);
        }
        Ok(Self::new(reactions, columns.converter))
    }

    /// true when an enabled reaction takes its heat from the species enthalpies
    pub fn uses_species_enthalpies(&self, enabled: EnabledEquations) -> bool {
        self.reactions
            .iter()
            .any(|r| r.reaction_enthalpy.is_none() && r.phase.is_enabled(enabled))
    }

    /// Resolves species references against the species list of the chemistry service.
    pub fn resolve(&self, species_names: &[String]) -> Result<ResolvedScheme, ConfigurationError> {
        if self.reactions.is_empty() {
            warn!("custom kinetic scheme contains no reactions");
        }
        let NC = species_names.len();
        let NR = self.reactions.len();
        let mut homogeneous = DMatrix::zeros(NR, NC);
        let mut heterogeneous = DMatrix::zeros(NR, NC);
        let mut reactions = Vec::with_capacity(NR);
        for (j, reaction) in self.reactions.iter().enumerate() {
            let locate = |species: &str, given: Option<usize>| {
                resolve_species(&reaction.label, species, given, species_names)
            };
            let first = match &reaction.first_order {
                Some(order) => Some((locate(&order.species, order.index)?, order.exponent)),
                None => None,
            };
            let second = match &reaction.second_order {
                Some(order) => Some((locate(&order.species, order.index)?, order.exponent)),
                None => None,
            };
            let stoichiometry = match reaction.phase {
                ReactionPhase::Homogeneous => &mut homogeneous,
                ReactionPhase::Heterogeneous => &mut heterogeneous,
            };
            let mut coefficients = Vec::with_capacity(reaction.participants.len());
            for participant in &reaction.participants {
                let i = locate(&participant.species, participant.index)?;
                stoichiometry[(j, i)] += participant.coefficient as f64;
                coefficients.push((i, participant.coefficient as f64));
            }
            reactions.push(ResolvedReaction {
                k: reaction.k,
                Ea: reaction.Ea,
                n: reaction.n,
                orders: [first, second],
                phase: reaction.phase,
                reaction_enthalpy: reaction.reaction_enthalpy,
                coefficients,
            });
        }
        info!(
            "custom kinetic scheme resolved: {} reactions over {} species",
            NR, NC
        );
        Ok(ResolvedScheme {
            reactions,
            homogeneous,
            heterogeneous,
            converter: self.converter,
        })
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Reaction", "k", "Ea, J/mol", "n", "orders", "stoichiometry", "phase"]);
        for reaction in &self.reactions {
            let orders: Vec<String> = reaction
                .first_order
                .iter()
                .chain(reaction.second_order.iter())
                .map(|o| format!("{}^{}", o.species, o.exponent))
                .collect();
            let stoich: Vec<String> = reaction
                .participants
                .iter()
                .map(|p| format!("{:+} {}", p.coefficient, p.species))
                .collect();
            table.add_row(row![
                reaction.label,
                format!("{:.3e}", reaction.k),
                format!("{:.1}", reaction.Ea),
                format!("{:.2}", reaction.n),
                orders.join(" "),
                stoich.join(" "),
                format!("{:?}", reaction.phase)
            ]);
        }
        println!("\nCustom kinetic scheme (converter = {}):", self.converter);
        table.printstd();
    }
}

fn resolve_species(
    reaction: &str,
    species: &str,
    given: Option<usize>,
    species_names: &[String],
) -> Result<usize, ConfigurationError> {
    let resolved = species_names.iter().position(|s| s == species);
    match (resolved, given) {
        (_, Some(index)) if index >= species_names.len() => {
            Err(ConfigurationError::SpeciesIndexOutOfRange {
                reaction: reaction.to_string(),
                index,
                species_count: species_names.len(),
            })
        }
        (Some(resolved), Some(given)) if resolved != given => {
            Err(ConfigurationError::SpeciesIndexMismatch {
                reaction: reaction.to_string(),
                species: species.to_string(),
                given,
                resolved,
            })
        }
        (Some(resolved), _) => Ok(resolved),
        (None, _) => Err(ConfigurationError::UnknownSpecies {
            reaction: reaction.to_string(),
            species: species.to_string(),
        }),
    }
}

/// reaction with species references replaced by indices
#[derive(Debug, Clone)]
pub struct ResolvedReaction {
    pub k: f64,
    pub Ea: f64,
    pub n: f64,
    pub orders: [Option<(usize, f64)>; 2],
    pub phase: ReactionPhase,
    pub reaction_enthalpy: Option<f64>,
    pub coefficients: Vec<(usize, f64)>,
}

impl ResolvedReaction {
    /// k·T^n·exp(-Ea/(R·T))
    pub fn K_const(&self, T: f64) -> f64 {
        self.k * T.powf(self.n) * f64::exp(-self.Ea / (R_G * T))
    }

    /// ΔH of the reaction, J/kmol: the supplied value or Σν·h
    pub fn enthalpy_change(&self, enthalpies: &[f64]) -> f64 {
        match self.reaction_enthalpy {
            Some(dH) => dH,
            None => self
                .coefficients
                .iter()
                .map(|(i, nu)| nu * enthalpies[*i])
                .sum(),
        }
    }
}

/// Custom scheme ready for evaluation. The stoichiometric matrices are reactions × species,
/// one for each phase, so production rates are Sᵀ·r.
#[derive(Debug, Clone)]
pub struct ResolvedScheme {
    pub reactions: Vec<ResolvedReaction>,
    pub homogeneous: DMatrix<f64>,
    pub heterogeneous: DMatrix<f64>,
    pub converter: f64,
}

impl ResolvedScheme {
    pub fn n_reactions(&self) -> usize {
        self.reactions.len()
    }

    /// true when an enabled reaction takes its heat from the species enthalpies
    pub fn uses_species_enthalpies(&self, enabled: EnabledEquations) -> bool {
        self.reactions
            .iter()
            .any(|r| r.reaction_enthalpy.is_none() && r.phase.is_enabled(enabled))
    }

    /// mass produced by a unit extent of every reaction, kg/kmol; zero for balanced reactions
    pub fn mass_imbalance(&self, molecular_weights: &[f64]) -> Vec<f64> {
        self.reactions
            .iter()
            .map(|r| {
                r.coefficients
                    .iter()
                    .map(|(i, nu)| nu * molecular_weights[*i])
                    .sum()
            })
            .collect()
    }
}
