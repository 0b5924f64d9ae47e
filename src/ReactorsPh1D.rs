//! # Pseudo-homogeneous one-dimensional catalytic reactor
//!
//! Governing equations of a plug-flow reactor in which gas-phase chemistry and the chemistry
//! of a catalyst dispersed in the volume are lumped into one phase. The model is assembled for
//! an external stiff ODE/DAE solver; it does not integrate anything itself.
//!
//! | Unknown | Count | SteadyProfile (along z) | Transient (in t) |
//! |---------|-------|-------------------------|------------------|
//! | mass fractions ω | NC | differential | differential |
//! | site fractions θ | NS, heterogeneous reactions only | algebraic | differential |
//! | temperature T | 1, energy balance only | differential | differential |
//!
//! Typical use:
//! 1. fill a [`reactor_config::ReactorConfiguration`];
//! 2. build [`Ph1DEquations::Ph1DEquations`] with a borrowed chemistry service, or with
//!    `from_configuration` for user-defined kinetics over a configured species list;
//! 3. hand it to a solver through [`Ph1DEquations::DaeSystem`], calling `store` at every
//!    accepted point;
//! 4. read the profiles back with the `get_*` accessors.

/// Fatal setup errors and per-evaluation errors with their solver status codes
pub mod reactor_errors;
/// Reactor configuration record, setters, validation and printing
pub mod reactor_config;
/// Size and meaning of every entry of the state vector
pub mod state_layout;
/// Density, heat capacity, conductivity and species enthalpies at the current state
pub mod mixture_properties;
/// Assembler of derivatives and residuals
#[allow(non_snake_case)]
pub mod Ph1DEquations;
pub mod transient_recorder;
mod state_layout_tests;
