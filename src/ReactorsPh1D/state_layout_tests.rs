#[cfg(test)]
mod tests {
    use crate::ReactorsPh1D::reactor_config::{KineticsType, ReactorConfiguration, ResolutionMode};
    use crate::ReactorsPh1D::reactor_errors::ConfigurationError;
    use crate::ReactorsPh1D::state_layout::{EquationKind, SpeciesCounts, StateLayout};

    const COUNTS: SpeciesCounts = SpeciesCounts { gas: 5, surface: 3 };

    fn config(heterogeneous: bool, energy: bool) -> ReactorConfiguration {
        let mut config = ReactorConfiguration::new();
        config.set_reactions(true, heterogeneous);
        config.set_energy(energy);
        config
    }

    #[test]
    fn test_full_layout() {
        let layout = StateLayout::resize(&config(true, true), COUNTS).unwrap();
        assert_eq!(layout.number_of_equations(), 9);
        assert_eq!(layout.n_species(), 5);
        assert_eq!(layout.n_sites(), 3);
        assert_eq!(layout.temperature_index(), Some(8));
        assert_eq!(layout.n_algebraic(), 3);
        assert_eq!(
            layout.algebraic_flags(),
            vec![false, false, false, false, false, true, true, true, false]
        );
        assert_eq!(
            layout.differential_ids(),
            vec![1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_minimal_layout() {
        let layout = StateLayout::resize(&config(false, false), COUNTS).unwrap();
        assert_eq!(layout.number_of_equations(), 5);
        assert_eq!(layout.n_sites(), 0);
        assert_eq!(layout.temperature_index(), None);
        assert!(
            layout
                .equation_kinds()
                .iter()
                .all(|k| *k == EquationKind::Differential)
        );
    }

    #[test]
    fn test_transient_sites_are_differential() {
        let mut config = config(true, false);
        config.set_resolution_type(ResolutionMode::Transient);
        let layout = StateLayout::resize(&config, COUNTS).unwrap();
        assert_eq!(layout.number_of_equations(), 8);
        assert_eq!(layout.n_algebraic(), 0);
    }

    #[test]
    fn test_user_defined_kinetics_has_no_site_segment() {
        let mut config = config(true, true);
        config.set_kinetic_type(KineticsType::UserDefined);
        let layout = StateLayout::resize(&config, COUNTS).unwrap();
        assert_eq!(layout.number_of_equations(), 6);
        assert_eq!(layout.temperature_index(), Some(5));
    }

    #[test]
    fn test_sizing_errors() {
        let no_gas = SpeciesCounts { gas: 0, surface: 3 };
        assert!(matches!(
            StateLayout::resize(&config(false, false), no_gas),
            Err(ConfigurationError::SpeciesCountUnknown)
        ));
        let no_surface = SpeciesCounts { gas: 5, surface: 0 };
        assert!(matches!(
            StateLayout::resize(&config(true, false), no_surface),
            Err(ConfigurationError::MissingSurfacePhase)
        ));
    }

    #[test]
    fn test_views() {
        let layout = StateLayout::resize(&config(true, true), COUNTS).unwrap();
        let y: Vec<f64> = (0..9).map(|i| i as f64).collect();
        let view = layout.view(&y);
        assert_eq!(view.mass_fractions, &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(view.site_fractions, &[5.0, 6.0, 7.0]);
        assert_eq!(view.temperature, Some(8.0));

        let mut dy = vec![0.0; 9];
        let out = layout.view_mut(&mut dy);
        out.site_fractions[2] = 1.0;
        if let Some(T) = out.temperature {
            *T = 2.0;
        }
        assert_eq!(dy[7], 1.0);
        assert_eq!(dy[8], 2.0);
    }
}
