use crate::ChemistryService::configured_species::ConfiguredSpecies;
use crate::ChemistryService::ideal_gas_mechanism::{
    ElementaryReactionData, GasSpeciesData, IdealGasMechanism, MechanismData, SurfaceSpeciesData,
};
use crate::Kinetics::custom_kinetics::{CustomKineticScheme, CustomReaction, KineticColumns, ReactionPhase};
use crate::ReactorsPh1D::Ph1DEquations::{DaeSystem, Ph1DEquations};
use crate::ReactorsPh1D::reactor_config::{HeatExchange, ReactorConfiguration, ResolutionMode};
use crate::ReactorsPh1D::reactor_errors::EvaluationError;
use crate::Thermodynamics::species_thermo::{Nasa7, SpeciesThermo};
use log::{error, info};
use std::collections::HashMap;

/// Explicit Euler march over the sample points of the model: every output interval is split
/// into `substeps` steps, and a step whose end state is rejected by the model is halved.
/// Only suitable for purely differential systems.
pub fn explicit_march(eq: &mut Ph1DEquations<'_>, substeps: usize) -> Result<(), EvaluationError> {
    let points = eq.sample_points();
    let mut y = eq.initial_state();
    let mut dy = vec![0.0; y.len()];
    let mut scratch = vec![0.0; y.len()];
    eq.store(points[0], &y)?;
    for window in points.windows(2) {
        let (mut t, t_end) = (window[0], window[1]);
        let h0 = (t_end - t) / substeps.max(1) as f64;
        while t_end - t > 1e-12 * h0 {
            eq.try_equations(t, &y, &mut dy)?;
            let mut h = h0.min(t_end - t);
            let mut halvings = 0;
            let trial = loop {
                let trial: Vec<f64> = y.iter().zip(dy.iter()).map(|(yi, di)| yi + h * di).collect();
                match eq.try_equations(t + h, &trial, &mut scratch) {
                    Ok(()) => break trial,
                    Err(e) if halvings < 30 => {
                        info!("step {:e} rejected at {}: {}", h, t, e);
                        h *= 0.5;
                        halvings += 1;
                    }
                    Err(e) => return Err(e),
                }
            };
            y = trial;
            t += h;
        }
        eq.store(t_end, &y)?;
    }
    Ok(())
}

fn constant_cp(Cp: f64, h_ref: f64) -> SpeciesThermo {
    SpeciesThermo::ConstantCp {
        Cp,
        h_ref,
        T_ref: 298.15,
    }
}

fn nasa7(low: [f64; 7], high: [f64; 7]) -> SpeciesThermo {
    SpeciesThermo::Nasa7(Nasa7 {
        T_range: (200.0, 1000.0, 3500.0),
        low,
        high,
    })
}

/// H2, O2, H2O and N2 with GRI-Mech 3.0 NASA polynomials and a three-step platinum surface
fn hydrogen_on_platinum() -> MechanismData {
    let species = |name: &str, molecular_weight: f64, thermo: SpeciesThermo| GasSpeciesData {
        name: name.to_string(),
        molecular_weight,
        thermo,
        conductivity: 0.05,
        diffusivity: 4.0e-5,
    };
    let step = |equation: &str, reactants: &[(&str, f64)], products: &[(&str, f64)], A: f64, E: f64| {
        let to_map = |side: &[(&str, f64)]| -> HashMap<String, f64> {
            side.iter().map(|(s, nu)| (s.to_string(), *nu)).collect()
        };
        ElementaryReactionData {
            equation: equation.to_string(),
            reactants: to_map(reactants),
            products: to_map(products),
            A,
            n: 0.0,
            E,
        }
    };
    let site = |name: &str, h_ref: f64| SurfaceSpeciesData {
        name: name.to_string(),
        thermo: constant_cp(0.0, h_ref),
    };
    MechanismData {
        gas_species: vec![
            species(
                "H2",
                2.016,
                nasa7(
                    [2.34433112, 7.98052075e-03, -1.94781510e-05, 2.01572094e-08, -7.37611761e-12, -9.17935173e+02, 6.83010238e-01],
                    [3.33727920, -4.94024731e-05, 4.99456778e-07, -1.79566394e-10, 2.00255376e-14, -9.50158922e+02, -3.20502331e+00],
                ),
            ),
            species(
                "O2",
                31.998,
                nasa7(
                    [3.78245636, -2.99673416e-03, 9.84730201e-06, -9.68129509e-09, 3.24372837e-12, -1.06394356e+03, 3.65767573e+00],
                    [3.28253784, 1.48308754e-03, -7.57966669e-07, 2.09470555e-10, -2.16717794e-14, -1.08845772e+03, 5.45323129e+00],
                ),
            ),
            species(
                "H2O",
                18.015,
                nasa7(
                    [4.19864056, -2.03643410e-03, 6.52040211e-06, -5.48797062e-09, 1.77197817e-12, -3.02937267e+04, -8.49032208e-01],
                    [3.03399249, 2.17691804e-03, -1.64072518e-07, -9.70419870e-11, 1.68200992e-14, -3.00042971e+04, 4.96677010e+00],
                ),
            ),
            species(
                "N2",
                28.014,
                nasa7(
                    [3.298677, 1.4082404e-03, -3.963222e-06, 5.641515e-09, -2.444854e-12, -1.0208999e+03, 3.950372],
                    [2.92664, 1.4879768e-03, -5.68476e-07, 1.0097038e-10, -6.753351e-15, -9.227977e+02, 5.980528],
                ),
            ),
        ],
        surface_species: vec![site("PT(S)", 0.0), site("H(S)", -40.0e6), site("O(S)", -110.0e6)],
        site_density: 2.7063e-8,
        gas_reactions: Vec::new(),
        surface_reactions: vec![
            step("H2+2PT(S)=>2H(S)", &[("H2", 1.0), ("PT(S)", 2.0)], &[("H(S)", 2.0)], 4.46e13, 0.0),
            step("O2+2PT(S)=>2O(S)", &[("O2", 1.0), ("PT(S)", 2.0)], &[("O(S)", 2.0)], 1.8e13, 0.0),
            step(
                "2H(S)+O(S)=>H2O+3PT(S)",
                &[("H(S)", 2.0), ("O(S)", 1.0)],
                &[("H2O", 1.0), ("PT(S)", 3.0)],
                3.7e18,
                11_500.0,
            ),
        ],
    }
}

/// isomerization-like A => 2B diluted in nitrogen
fn a_to_b() -> MechanismData {
    let species = |name: &str, molecular_weight: f64, h_ref: f64| GasSpeciesData {
        name: name.to_string(),
        molecular_weight,
        thermo: constant_cp(30_000.0, h_ref),
        conductivity: 0.03,
        diffusivity: 2.0e-5,
    };
    MechanismData {
        gas_species: vec![species("A", 40.0, 0.0), species("B", 20.0, -50.0e6), species("N2", 28.0, 0.0)],
        gas_reactions: vec![ElementaryReactionData {
            equation: "A=>2B".to_string(),
            reactants: HashMap::from([("A".to_string(), 1.0)]),
            products: HashMap::from([("B".to_string(), 2.0)]),
            A: 1.0e5,
            n: 0.0,
            E: 5.0e4,
        }],
        ..MechanismData::default()
    }
}

pub fn reactor_examples(task: usize) {
    match task {
        0 => {
            // STEADY PROFILE, ENGINE KINETICS, ADIABATIC
            let mech = match IdealGasMechanism::new(a_to_b()) {
                Ok(mech) => mech,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            let mut config = ReactorConfiguration::new();
            config.set_problem_name("A => 2B");
            config.set_problem_description("adiabatic plug flow, gas-phase reaction only");
            config.set_operating_conditions(101325.0, 0.5, 1.0);
            config.set_inlet_conditions(vec![0.2, 0.0, 0.8], 700.0);
            config.set_reactions(true, false);
            config.set_energy(true);
            config.set_number_of_points(11);
            config.pretty_print();
            let mut eq = match Ph1DEquations::new(config, &mech) {
                Ok(eq) => eq,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            match explicit_march(&mut eq, 200) {
                Ok(()) => eq.pretty_print_history(),
                Err(e) => error!("integration failed: {}", e),
            }
        }
        1 => {
            // STEADY PROFILE, USER-DEFINED KINETICS FROM COLUMNS, COOLED WALL, NO CHEMISTRY ENGINE
            let species = ConfiguredSpecies::new(&["A", "B", "N2"], &[40.0, 20.0, 28.0]);
            let columns = KineticColumns {
                k: vec![5.0e4],
                Eatt: vec![5.0e4],
                n: vec![0.0],
                a: vec![1.0],
                b: vec![0.0],
                index1: vec![0],
                index2: vec![-1],
                engine_index: vec![0],
                name: vec![vec!["A".to_string(), "B".to_string()]],
                stoich: vec![vec![-1, 2]],
                converter: 1.0,
            };
            let mut scheme = match CustomKineticScheme::from_columns(1, columns, &species.names) {
                Ok(scheme) => scheme,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            scheme.reactions[0].phase = ReactionPhase::Homogeneous;
            scheme.reactions[0].reaction_enthalpy = Some(-9.0e7);
            let mut config = ReactorConfiguration::new();
            config.set_problem_name("A => 2B, custom kinetics");
            config.set_operating_conditions(101325.0, 0.5, 1.0);
            config.set_inlet_conditions(vec![0.2, 0.0, 0.8], 700.0);
            config.set_species(species);
            config.set_reactions(true, false);
            config.set_energy(true);
            config.set_custom_kinetics(scheme);
            config.set_transport_properties(1100.0, 0.04);
            config.set_heat_exchange(HeatExchange {
                U: 50.0,
                area_per_volume: 40.0,
                T_wall: 700.0,
            });
            config.set_number_of_points(11);
            config.pretty_print();
            let mut eq = match Ph1DEquations::from_configuration(config) {
                Ok(eq) => eq,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            match explicit_march(&mut eq, 200) {
                Ok(()) => eq.pretty_print_history(),
                Err(e) => error!("integration failed: {}", e),
            }
        }
        2 => {
            // TRANSIENT CATALYST START-UP, SURFACE CHEMISTRY
            let mech = match IdealGasMechanism::new(hydrogen_on_platinum()) {
                Ok(mech) => mech,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            let mut config = ReactorConfiguration::new();
            config.set_problem_name("H2 oxidation on Pt");
            config.set_operating_conditions(101325.0, 0.05, 0.5);
            config.set_inlet_conditions(vec![0.02, 0.2, 0.0, 0.78], 700.0);
            config.set_reactions(false, true);
            config.set_catalyst_load(1.0e3);
            config.set_resolution_type(ResolutionMode::Transient);
            config.set_integration_time(1.0e-2);
            config.set_number_of_points(11);
            config.pretty_print();
            let mut eq = match Ph1DEquations::new(config, &mech) {
                Ok(eq) => eq,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            info!(
                "{} equations, algebraic: {:?}",
                eq.number_of_equations(),
                eq.algebraic_flags()
            );
            match explicit_march(&mut eq, 2000) {
                Ok(()) => {
                    eq.pretty_print_history();
                    if let Err(e) = eq.save_to_csv(Some("h2_on_pt_transient.csv".to_string())) {
                        error!("{}", e);
                    }
                }
                Err(e) => error!("integration failed: {}", e),
            }
        }
        3 => {
            // CUSTOM SCHEME AS JSON
            let scheme = CustomKineticScheme::new(
                vec![
                    CustomReaction::new("A=>2B", 5.0e4, 5.0e4, 0.0)
                        .with_orders(Some(("A", 1.0)), None)
                        .with_participants(&[("A", -1), ("B", 2)])
                        .with_phase(ReactionPhase::Homogeneous),
                ],
                1.0,
            );
            scheme.pretty_print();
            match serde_json::to_string_pretty(&scheme) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("{}", e),
            }
        }
        _ => {
            error!("no example with number {}", task);
        }
    }
}
