use crate::ChemistryService::ChemistryError;
use serde::{Deserialize, Serialize};

/// Universal gas constant in J/(kmol·K)
pub const R_U: f64 = 8314.462618;

/// NASA 7-coefficient polynomials
///
/// cp/R = a1 + a2 T + a3 T² + a4 T³ + a5 T⁴
/// h/RT = a1 + a2 T/2 + a3 T²/3 + a4 T³/4 + a5 T⁴/5 + a6/T
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nasa7 {
    /// lower bound, midpoint and upper bound of the fit, K
    pub T_range: (f64, f64, f64),
    pub low: [f64; 7],
    pub high: [f64; 7],
}

impl Nasa7 {
    fn coefficients(&self, T: f64) -> Result<&[f64; 7], ChemistryError> {
        let (T_low, T_mid, T_high) = self.T_range;
        if T < T_low || T > T_high {
            return Err(ChemistryError::TemperatureOutOfRange {
                temperature: T,
                range: (T_low, T_high),
            });
        }
        if T < T_mid {
            Ok(&self.low)
        } else {
            Ok(&self.high)
        }
    }

    /// molar heat capacity, J/(kmol·K)
    pub fn Cp(&self, T: f64) -> Result<f64, ChemistryError> {
        let a = self.coefficients(T)?;
        Ok(R_U * (a[0] + a[1] * T + a[2] * T.powi(2) + a[3] * T.powi(3) + a[4] * T.powi(4)))
    }

    /// molar enthalpy, J/kmol
    pub fn dh(&self, T: f64) -> Result<f64, ChemistryError> {
        let a = self.coefficients(T)?;
        Ok(R_U
            * T
            * (a[0]
                + a[1] * T / 2.0
                + a[2] * T.powi(2) / 3.0
                + a[3] * T.powi(3) / 4.0
                + a[4] * T.powi(4) / 5.0
                + a[5] / T))
    }
}

/// thermodynamic model of one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpeciesThermo {
    Nasa7(Nasa7),
    /// Cp in J/(kmol·K), h_ref in J/kmol at T_ref
    ConstantCp { Cp: f64, h_ref: f64, T_ref: f64 },
}

impl SpeciesThermo {
    /// molar heat capacity, J/(kmol·K)
    pub fn heat_capacity(&self, T: f64) -> Result<f64, ChemistryError> {
        match self {
            SpeciesThermo::Nasa7(nasa) => nasa.Cp(T),
            SpeciesThermo::ConstantCp { Cp, .. } => Ok(*Cp),
        }
    }

    /// molar enthalpy, J/kmol
    pub fn enthalpy(&self, T: f64) -> Result<f64, ChemistryError> {
        match self {
            SpeciesThermo::Nasa7(nasa) => nasa.dh(T),
            SpeciesThermo::ConstantCp { Cp, h_ref, T_ref } => Ok(h_ref + Cp * (T - T_ref)),
        }
    }
}

impl Default for SpeciesThermo {
    fn default() -> Self {
        SpeciesThermo::ConstantCp {
            Cp: 0.0,
            h_ref: 0.0,
            T_ref: 298.15,
        }
    }
}
