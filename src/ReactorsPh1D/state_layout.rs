//! # State Layout Manager
//!
//! The unknown vector handed to the solver is one flat buffer:
//!
//! ```text
//! [ ω_0 .. ω_NC-1 | θ_0 .. θ_NS-1 | T ]
//!   mass fractions   site fractions  temperature
//!                    (heterogeneous)  (energy)
//! ```
//!
//! [`StateLayout::resize`] fixes the segment sizes and the [`EquationKind`] of every unknown
//! once; [`StateView`] and [`StateViewMut`] give named access to the segments without copying.
use super::reactor_config::{KineticsType, ReactorConfiguration, ResolutionMode};
use super::reactor_errors::ConfigurationError;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationKind {
    Differential,
    Algebraic,
}

/// species counts reported by the chemistry service or the configured species list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesCounts {
    pub gas: usize,
    pub surface: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateLayout {
    NC: usize,
    SURF_NC: usize,
    energy: bool,
    kinds: Vec<EquationKind>,
}

impl StateLayout {
    /// NE = NC + (heterogeneous ? NS : 0) + (energy ? 1 : 0)
    ///
    /// Site equations are algebraic in steady-profile mode (steady closure of the surface
    /// balance) and differential in transient mode. Custom schemes carry no site species, so
    /// with user-defined kinetics the surface segment is empty.
    pub fn resize(
        config: &ReactorConfiguration,
        counts: SpeciesCounts,
    ) -> Result<Self, ConfigurationError> {
        if counts.gas == 0 {
            return Err(ConfigurationError::SpeciesCountUnknown);
        }
        let SURF_NC = match (config.enabled.heterogeneous, config.kinetics) {
            (false, _) | (true, KineticsType::UserDefined) => 0,
            (true, KineticsType::EngineProvided) if counts.surface == 0 => {
                return Err(ConfigurationError::MissingSurfacePhase);
            }
            (true, KineticsType::EngineProvided) => counts.surface,
        };
        let energy = config.enabled.energy;
        let site_kind = match config.resolution {
            ResolutionMode::SteadyProfile => EquationKind::Algebraic,
            ResolutionMode::Transient => EquationKind::Differential,
        };
        let mut kinds = Vec::with_capacity(counts.gas + SURF_NC + 1);
        kinds.extend(std::iter::repeat(EquationKind::Differential).take(counts.gas));
        kinds.extend(std::iter::repeat(site_kind).take(SURF_NC));
        if energy {
            kinds.push(EquationKind::Differential);
        }
        let layout = Self {
            NC: counts.gas,
            SURF_NC,
            energy,
            kinds,
        };
        info!(
            "state layout: NE = {} ({} species, {} sites, energy: {}), {} algebraic equations",
            layout.number_of_equations(),
            layout.NC,
            layout.SURF_NC,
            layout.energy,
            layout.n_algebraic()
        );
        Ok(layout)
    }

    pub fn number_of_equations(&self) -> usize {
        self.kinds.len()
    }
    pub fn n_species(&self) -> usize {
        self.NC
    }
    pub fn n_sites(&self) -> usize {
        self.SURF_NC
    }
    pub fn has_temperature(&self) -> bool {
        self.energy
    }
    /// position of the temperature in the state vector
    pub fn temperature_index(&self) -> Option<usize> {
        self.energy.then_some(self.NC + self.SURF_NC)
    }
    pub fn equation_kinds(&self) -> &[EquationKind] {
        &self.kinds
    }
    pub fn n_algebraic(&self) -> usize {
        self.kinds
            .iter()
            .filter(|k| **k == EquationKind::Algebraic)
            .count()
    }
    /// one flag per unknown, true for algebraic equations
    pub fn algebraic_flags(&self) -> Vec<bool> {
        self.kinds
            .iter()
            .map(|k| *k == EquationKind::Algebraic)
            .collect()
    }
    /// IDA-style id vector: 1.0 for differential, 0.0 for algebraic unknowns
    pub fn differential_ids(&self) -> Vec<f64> {
        self.kinds
            .iter()
            .map(|k| match k {
                EquationKind::Differential => 1.0,
                EquationKind::Algebraic => 0.0,
            })
            .collect()
    }

    /// Splits a state buffer of length NE into its segments.
    pub fn view<'a>(&self, y: &'a [f64]) -> StateView<'a> {
        let (mass_fractions, rest) = y.split_at(self.NC);
        let (site_fractions, rest) = rest.split_at(self.SURF_NC);
        StateView {
            mass_fractions,
            site_fractions,
            temperature: if self.energy { rest.first().copied() } else { None },
        }
    }

    /// Splits a derivative buffer of length NE into its segments.
    pub fn view_mut<'a>(&self, dy: &'a mut [f64]) -> StateViewMut<'a> {
        let (mass_fractions, rest) = dy.split_at_mut(self.NC);
        let (site_fractions, rest) = rest.split_at_mut(self.SURF_NC);
        StateViewMut {
            mass_fractions,
            site_fractions,
            temperature: if self.energy { rest.first_mut() } else { None },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    pub mass_fractions: &'a [f64],
    pub site_fractions: &'a [f64],
    pub temperature: Option<f64>,
}

#[derive(Debug)]
pub struct StateViewMut<'a> {
    pub mass_fractions: &'a mut [f64],
    pub site_fractions: &'a mut [f64],
    pub temperature: Option<&'a mut f64>,
}
