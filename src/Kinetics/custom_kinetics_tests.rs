#[cfg(test)]
mod tests {
    use crate::Kinetics::custom_kinetics::{
        CustomKineticScheme, CustomReaction, KineticColumns, R_G, RateOrder, ReactionPhase,
    };
    use crate::ReactorsPh1D::reactor_config::EnabledEquations;
    use crate::ReactorsPh1D::reactor_errors::ConfigurationError;
    use approx::assert_relative_eq;

    fn names() -> Vec<String> {
        vec!["A".to_string(), "B".to_string(), "N2".to_string()]
    }

    fn a_to_b(phase: ReactionPhase) -> CustomReaction {
        CustomReaction::new("A=>2B", 1.0e5, 2.0e4, 0.0)
            .with_orders(Some(("A", 1.0)), None)
            .with_participants(&[("A", -1), ("B", 2)])
            .with_phase(phase)
    }

    fn columns() -> KineticColumns {
        KineticColumns {
            k: vec![1.0e5],
            Eatt: vec![2.0e4],
            n: vec![0.5],
            a: vec![1.0],
            b: vec![0.0],
            index1: vec![0],
            index2: vec![-1],
            engine_index: vec![0],
            name: vec![vec!["A".to_string(), "B".to_string()]],
            stoich: vec![vec![-1, 2]],
            converter: 1.0,
        }
    }

    #[test]
    fn test_from_columns() {
        let scheme = CustomKineticScheme::from_columns(1, columns(), &names()).unwrap();
        assert_eq!(scheme.reactions.len(), 1);
        let reaction = &scheme.reactions[0];
        assert_eq!(reaction.label, "R1");
        assert_eq!(
            reaction.first_order,
            Some(RateOrder {
                species: "A".to_string(),
                index: Some(0),
                exponent: 1.0
            })
        );
        assert!(reaction.second_order.is_none());
        assert_eq!(reaction.participants.len(), 2);
        assert_eq!(reaction.participants[0].index, Some(0));
        assert_eq!(reaction.participants[1].index, None);
        assert_eq!(reaction.participants[1].coefficient, 2);
        assert!(scheme.resolve(&names()).is_ok());
    }

    #[test]
    fn test_from_columns_engine_index() {
        let mut cols = columns();
        cols.engine_index = vec![-1];
        let scheme = CustomKineticScheme::from_columns(1, cols, &names()).unwrap();
        assert_eq!(scheme.reactions[0].participants[0].index, None);

        // A is species 0 of the engine, not 2
        let mut cols = columns();
        cols.engine_index = vec![2];
        let scheme = CustomKineticScheme::from_columns(1, cols, &names()).unwrap();
        assert!(matches!(
            scheme.resolve(&names()),
            Err(ConfigurationError::SpeciesIndexMismatch {
                given: 2,
                resolved: 0,
                ..
            })
        ));

        let mut cols = columns();
        cols.engine_index.clear();
        assert!(matches!(
            CustomKineticScheme::from_columns(1, cols, &names()),
            Err(ConfigurationError::ColumnLengthMismatch {
                column: "engine_index",
                expected: 1,
                found: 0
            })
        ));
    }

    #[test]
    fn test_from_columns_length_mismatch_names_the_column() {
        let mut cols = columns();
        cols.Eatt.push(1.0);
        let err = CustomKineticScheme::from_columns(1, cols, &names()).unwrap_err();
        match err {
            ConfigurationError::ColumnLengthMismatch {
                column,
                expected,
                found,
            } => {
                assert_eq!(column, "Eatt");
                assert_eq!(expected, 1);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_from_columns_stoichiometry_mismatch() {
        let mut cols = columns();
        cols.stoich[0].push(1);
        let err = CustomKineticScheme::from_columns(1, cols, &names()).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::ColumnLengthMismatch { column: "stoich", .. }
        ));
    }

    #[test]
    fn test_from_columns_index_out_of_range() {
        let mut cols = columns();
        cols.index1[0] = 7;
        let err = CustomKineticScheme::from_columns(1, cols, &names()).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::SpeciesIndexOutOfRange {
                index: 7,
                species_count: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_builds_stoichiometric_matrices() {
        let scheme = CustomKineticScheme::new(
            vec![
                a_to_b(ReactionPhase::Homogeneous),
                a_to_b(ReactionPhase::Heterogeneous),
            ],
            1.0,
        );
        let resolved = scheme.resolve(&names()).unwrap();
        assert_eq!(resolved.n_reactions(), 2);
        assert_eq!(resolved.homogeneous.shape(), (2, 3));
        assert_eq!(resolved.homogeneous[(0, 0)], -1.0);
        assert_eq!(resolved.homogeneous[(0, 1)], 2.0);
        assert_eq!(resolved.homogeneous[(1, 0)], 0.0);
        assert_eq!(resolved.heterogeneous[(0, 1)], 0.0);
        assert_eq!(resolved.heterogeneous[(1, 0)], -1.0);
        assert_eq!(resolved.heterogeneous[(1, 1)], 2.0);
        assert_eq!(resolved.reactions[0].orders[0], Some((0, 1.0)));
        assert_eq!(resolved.reactions[0].orders[1], None);
    }

    #[test]
    fn test_resolve_unknown_species() {
        let reaction = CustomReaction::new("X", 1.0, 0.0, 0.0).with_participants(&[("CO", -1)]);
        let err = CustomKineticScheme::new(vec![reaction], 1.0)
            .resolve(&names())
            .unwrap_err();
        match err {
            ConfigurationError::UnknownSpecies { reaction, species } => {
                assert_eq!(reaction, "X");
                assert_eq!(species, "CO");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_resolve_index_mismatch() {
        let mut reaction = a_to_b(ReactionPhase::Homogeneous);
        reaction.participants[0].index = Some(1);
        let err = CustomKineticScheme::new(vec![reaction], 1.0)
            .resolve(&names())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::SpeciesIndexMismatch {
                given: 1,
                resolved: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_rate_constant_and_enthalpy_change() {
        let mut reaction = a_to_b(ReactionPhase::Homogeneous);
        reaction.n = 1.0;
        let resolved = CustomKineticScheme::new(vec![reaction], 1.0)
            .resolve(&names())
            .unwrap();
        let r = &resolved.reactions[0];
        let T = 700.0;
        assert_relative_eq!(
            r.K_const(T),
            1.0e5 * T * f64::exp(-2.0e4 / (R_G * T)),
            epsilon = 1e-12
        );
        // -1·h_A + 2·h_B
        let h = [10.0e6, -30.0e6, 0.0];
        assert_relative_eq!(r.enthalpy_change(&h), -70.0e6);
    }

    #[test]
    fn test_supplied_reaction_enthalpy_overrides_species_enthalpies() {
        let reaction = a_to_b(ReactionPhase::Homogeneous).with_reaction_enthalpy(-1.0e8);
        let resolved = CustomKineticScheme::new(vec![reaction], 1.0)
            .resolve(&names())
            .unwrap();
        assert_eq!(resolved.reactions[0].enthalpy_change(&[1.0, 2.0, 3.0]), -1.0e8);
    }

    #[test]
    fn test_mass_imbalance() {
        let balanced = a_to_b(ReactionPhase::Homogeneous);
        let unbalanced = CustomReaction::new("A=>B", 1.0, 0.0, 0.0)
            .with_participants(&[("A", -1), ("B", 1)]);
        let resolved = CustomKineticScheme::new(vec![balanced, unbalanced], 1.0)
            .resolve(&names())
            .unwrap();
        let imbalance = resolved.mass_imbalance(&[40.0, 20.0, 28.0]);
        assert_relative_eq!(imbalance[0], 0.0);
        assert_relative_eq!(imbalance[1], -20.0);
    }

    #[test]
    fn test_uses_species_enthalpies_of_enabled_reactions() {
        let enabled = |homogeneous, heterogeneous| EnabledEquations {
            homogeneous,
            heterogeneous,
            energy: true,
        };
        let scheme = CustomKineticScheme::new(
            vec![
                a_to_b(ReactionPhase::Homogeneous).with_reaction_enthalpy(-1.0e8),
                a_to_b(ReactionPhase::Heterogeneous),
            ],
            1.0,
        );
        assert!(!scheme.uses_species_enthalpies(enabled(true, false)));
        assert!(scheme.uses_species_enthalpies(enabled(true, true)));
        let resolved = scheme.resolve(&names()).unwrap();
        assert!(!resolved.uses_species_enthalpies(enabled(true, false)));
        assert!(resolved.uses_species_enthalpies(enabled(false, true)));
    }

    #[test]
    fn test_converter_defaults_to_one_in_json() {
        let scheme: CustomKineticScheme = serde_json::from_str(r#"{ "reactions": [] }"#).unwrap();
        assert_eq!(scheme.converter, 1.0);
        assert!(scheme.reactions.is_empty());
    }
}
