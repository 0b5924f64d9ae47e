/// User-defined modified-Arrhenius reactions: construction from records or from the column
/// form, resolution of species against the chemistry service and stoichiometric matrices.
pub mod custom_kinetics;
mod custom_kinetics_tests;
/// Production rates from either the chemistry service or a custom scheme, and the heat
/// they release.
pub mod kinetics_source;
