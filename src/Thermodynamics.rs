/// Species thermodynamic fits used by the reference chemistry engine.
///
/// Two models are available: the 7-coefficient NASA polynomials (two temperature ranges joined
/// at a common midpoint) and a constant heat-capacity model with a reference enthalpy.
///
///  # Examples
/// ```
/// use Ph1DReactor::Thermodynamics::species_thermo::SpeciesThermo;
/// let thermo = SpeciesThermo::ConstantCp { Cp: 29_100.0, h_ref: 0.0, T_ref: 298.15 };
/// let h = thermo.enthalpy(398.15).unwrap();
/// assert!((h - 2_910_000.0).abs() < 1e-6);
/// ```
pub mod species_thermo;
mod species_thermo_tests;
