//! Small mechanisms shared by the unit tests of the crate.
use super::ideal_gas_mechanism::{
    ElementaryReactionData, GasSpeciesData, IdealGasMechanism, MechanismData, SurfaceSpeciesData,
};
use crate::Thermodynamics::species_thermo::{Nasa7, SpeciesThermo};
use std::collections::HashMap;

pub fn constant_cp(Cp: f64, h_ref: f64) -> SpeciesThermo {
    SpeciesThermo::ConstantCp {
        Cp,
        h_ref,
        T_ref: 298.15,
    }
}

pub fn gas(name: &str, molecular_weight: f64, h_ref: f64) -> GasSpeciesData {
    GasSpeciesData {
        name: name.to_string(),
        molecular_weight,
        thermo: constant_cp(30_000.0, h_ref),
        conductivity: 0.03,
        diffusivity: 2.0e-5,
    }
}

pub fn reaction(
    equation: &str,
    reactants: &[(&str, f64)],
    products: &[(&str, f64)],
    A: f64,
    E: f64,
) -> ElementaryReactionData {
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
}

/// A => 2B with inert N2, exothermic by 100 MJ/kmol of A
pub fn a_to_b_data() -> MechanismData {
    MechanismData {
        gas_species: vec![
            gas("A", 40.0, 0.0),
            gas("B", 20.0, -50.0e6),
            gas("N2", 28.0, 0.0),
        ],
        surface_species: Vec::new(),
        site_density: 0.0,
        gas_reactions: vec![reaction("A=>2B", &[("A", 1.0)], &[("B", 2.0)], 1.0e3, 2.0e4)],
        surface_reactions: Vec::new(),
    }
}

pub fn a_to_b() -> IdealGasMechanism {
    IdealGasMechanism::new(a_to_b_data()).unwrap()
}

/// hydrogen oxidation on platinum reduced to three irreversible surface steps
pub fn h2_on_pt_data() -> MechanismData {
    MechanismData {
        gas_species: vec![
            gas("H2", 2.016, 0.0),
            gas("O2", 31.998, 0.0),
            gas("H2O", 18.015, -241.826e6),
            gas("N2", 28.014, 0.0),
        ],
        surface_species: vec![
            SurfaceSpeciesData {
                name: "PT(S)".to_string(),
                thermo: constant_cp(0.0, 0.0),
            },
            SurfaceSpeciesData {
                name: "H(S)".to_string(),
                thermo: constant_cp(0.0, -40.0e6),
            },
            SurfaceSpeciesData {
                name: "O(S)".to_string(),
                thermo: constant_cp(0.0, -110.0e6),
            },
        ],
        site_density: 2.7063e-8,
        gas_reactions: Vec::new(),
        surface_reactions: vec![
            reaction(
                "H2+2PT(S)=>2H(S)",
                &[("H2", 1.0), ("PT(S)", 2.0)],
                &[("H(S)", 2.0)],
                4.46e13,
                0.0,
            ),
            reaction(
                "O2+2PT(S)=>2O(S)",
                &[("O2", 1.0), ("PT(S)", 2.0)],
                &[("O(S)", 2.0)],
                1.8e13,
                0.0,
            ),
            reaction(
                "2H(S)+O(S)=>H2O+3PT(S)",
                &[("H(S)", 2.0), ("O(S)", 1.0)],
                &[("H2O", 1.0), ("PT(S)", 3.0)],
                3.7e18,
                11_500.0,
            ),
        ],
    }
}

pub fn h2_on_pt() -> IdealGasMechanism {
    IdealGasMechanism::new(h2_on_pt_data()).unwrap()
}

/// A => 2B with NASA-7 thermodynamics fitted between 300 and 3000 K
pub fn a_to_b_nasa7() -> IdealGasMechanism {
    let mut data = a_to_b_data();
    for species in data.gas_species.iter_mut() {
        let a = [3.5, 0.0, 0.0, 0.0, 0.0, -1000.0, 4.0];
        species.thermo = SpeciesThermo::Nasa7(Nasa7 {
            T_range: (300.0, 1000.0, 3000.0),
            low: a,
            high: a,
        });
    }
    IdealGasMechanism::new(data).unwrap()
}

/// reversible adsorption A + PT(S) <=> A(S) written as two irreversible steps
pub fn adsorption(k_ads: f64, k_des: f64) -> IdealGasMechanism {
    IdealGasMechanism::new(MechanismData {
        gas_species: vec![gas("A", 40.0, 0.0), gas("N2", 28.0, 0.0)],
        surface_species: vec![
            SurfaceSpeciesData {
                name: "PT(S)".to_string(),
                thermo: constant_cp(0.0, 0.0),
            },
            SurfaceSpeciesData {
                name: "A(S)".to_string(),
                thermo: constant_cp(0.0, -20.0e6),
            },
        ],
        site_density: 2.7e-8,
        gas_reactions: Vec::new(),
        surface_reactions: vec![
            reaction("A+PT(S)=>A(S)", &[("A", 1.0), ("PT(S)", 1.0)], &[("A(S)", 1.0)], k_ads, 0.0),
            reaction("A(S)=>A+PT(S)", &[("A(S)", 1.0)], &[("A", 1.0), ("PT(S)", 1.0)], k_des, 0.0),
        ],
    })
    .unwrap()
}
