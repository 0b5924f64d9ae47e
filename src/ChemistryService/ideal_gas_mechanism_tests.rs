#[cfg(test)]
mod tests {
    use crate::ChemistryService::ideal_gas_mechanism::IdealGasMechanism;
    use crate::ChemistryService::test_mechanisms::{a_to_b, a_to_b_data, h2_on_pt, reaction};
    use crate::ChemistryService::{ChemistryError, ChemistryService};
    use crate::Thermodynamics::species_thermo::R_U;
    use approx::assert_relative_eq;

    #[test]
    fn test_species_lists() {
        let mech = h2_on_pt();
        assert_eq!(mech.n_gas_species(), 4);
        assert_eq!(mech.n_surface_species(), 3);
        assert_eq!(mech.species_index("H2O"), Some(2));
        assert_eq!(mech.species_index("PT(S)"), None);
        assert_relative_eq!(mech.site_density(), 2.7063e-8);
    }

    #[test]
    fn test_ideal_gas_density_of_pure_nitrogen() {
        let mech = h2_on_pt();
        let omega = [0.0, 0.0, 0.0, 1.0];
        let rho = mech.density(300.0, 101325.0, &omega).unwrap();
        assert_relative_eq!(rho, 101325.0 * 28.014 / (R_U * 300.0), max_relative = 1e-12);
        assert_relative_eq!(mech.mean_molecular_weight(&omega).unwrap(), 28.014);
    }

    #[test]
    fn test_cp_mass_of_mixture() {
        let mech = a_to_b();
        let omega = [0.5, 0.5, 0.0];
        // every species has cp = 30 kJ/(kmol K)
        let expected = 0.5 * 30_000.0 / 40.0 + 0.5 * 30_000.0 / 20.0;
        assert_relative_eq!(mech.cp_mass(500.0, 1e5, &omega).unwrap(), expected);
    }

    #[test]
    fn test_conductivity_is_mole_fraction_average() {
        let mech = a_to_b();
        let lambda = mech.thermal_conductivity(500.0, 1e5, &[0.2, 0.3, 0.5]).unwrap();
        assert_relative_eq!(lambda, 0.03, max_relative = 1e-12);
    }

    #[test]
    fn test_diffusivity_scaling() {
        let mech = a_to_b();
        let mut d = vec![0.0; 3];
        mech.mixture_diffusion_coefficients(298.15, 2.0 * 101325.0, &[1.0, 0.0, 0.0], &mut d)
            .unwrap();
        assert_relative_eq!(d[0], 1.0e-5, max_relative = 1e-12);
    }

    #[test]
    fn test_gas_rates_conserve_mass() {
        let mech = a_to_b();
        let MW = mech.molecular_weights().to_vec();
        let mut rates = vec![0.0; 3];
        mech.gas_production_rates(800.0, 101325.0, &[0.3, 0.1, 0.6], &mut rates)
            .unwrap();
        assert!(rates[0] < 0.0);
        assert_relative_eq!(rates[1], -2.0 * rates[0], max_relative = 1e-12);
        assert_eq!(rates[2], 0.0);
        let mass: f64 = rates.iter().zip(MW.iter()).map(|(r, m)| r * m).sum();
        assert!(mass.abs() < 1e-12 * rates[0].abs() * 40.0);
    }

    #[test]
    fn test_mass_action_rate_value() {
        let mech = a_to_b();
        let (T, P) = (800.0, 101325.0);
        let omega = [0.3, 0.1, 0.6];
        let rho = mech.density(T, P, &omega).unwrap();
        let mut rates = vec![0.0; 3];
        mech.gas_production_rates(T, P, &omega, &mut rates).unwrap();
        let k = 1.0e3 * f64::exp(-2.0e4 / (8.314 * T));
        assert_relative_eq!(rates[0], -k * rho * 0.3 / 40.0, max_relative = 1e-12);
    }

    #[test]
    fn test_surface_rates_conserve_sites() {
        let mech = h2_on_pt();
        let omega = [0.02, 0.1, 0.0, 0.88];
        let theta = [0.6, 0.3, 0.1];
        let mut gas = vec![0.0; 4];
        let mut sites = vec![0.0; 3];
        mech.surface_production_rates(700.0, 101325.0, &omega, &theta, &mut gas, &mut sites)
            .unwrap();
        let total: f64 = sites.iter().sum();
        let scale = sites.iter().map(|s| s.abs()).fold(0.0, f64::max);
        assert!(total.abs() <= 1e-10 * scale);
        assert!(gas[0] < 0.0, "hydrogen is adsorbed");
        assert!(gas[1] < 0.0, "oxygen is adsorbed");
        assert!(gas[2] > 0.0, "water desorbs");
        assert_eq!(gas[3], 0.0);
    }

    #[test]
    fn test_enthalpies() {
        let mech = h2_on_pt();
        let mut h = vec![0.0; 4];
        mech.gas_enthalpies(298.15, &mut h).unwrap();
        assert_relative_eq!(h[2], -241.826e6);
        let mut hs = vec![0.0; 3];
        mech.surface_enthalpies(298.15, &mut hs).unwrap();
        assert_relative_eq!(hs[2], -110.0e6);
    }

    #[test]
    fn test_buffer_length_is_checked() {
        let mech = a_to_b();
        let mut rates = vec![0.0; 2];
        let err = mech
            .gas_production_rates(800.0, 101325.0, &[0.3, 0.1, 0.6], &mut rates)
            .unwrap_err();
        assert_eq!(
            err,
            ChemistryError::BufferLength {
                quantity: "gas production rates",
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_invalid_state() {
        let mech = a_to_b();
        assert!(matches!(
            mech.density(-10.0, 101325.0, &[1.0, 0.0, 0.0]),
            Err(ChemistryError::InvalidState(_))
        ));
    }

    #[test]
    fn test_unknown_species_in_reaction() {
        let mut data = a_to_b_data();
        data.gas_reactions
            .push(reaction("C=>A", &[("C", 1.0)], &[("A", 1.0)], 1.0, 0.0));
        let err = IdealGasMechanism::new(data).unwrap_err();
        assert_eq!(err, ChemistryError::UnknownSpecies("C".to_string()));
    }

    #[test]
    fn test_surface_phase_requires_site_density() {
        let mut data = crate::ChemistryService::test_mechanisms::h2_on_pt_data();
        data.site_density = 0.0;
        assert!(matches!(
            IdealGasMechanism::new(data),
            Err(ChemistryError::InvalidMechanism(_))
        ));
    }

    #[test]
    fn test_from_json_str() {
        let json = serde_json::to_string(&a_to_b_data()).unwrap();
        let mech = IdealGasMechanism::from_json_str(&json).unwrap();
        assert_eq!(mech.gas_species_names(), &["A", "B", "N2"]);
        assert!(IdealGasMechanism::from_json_str("{ not json").is_err());
    }
}
