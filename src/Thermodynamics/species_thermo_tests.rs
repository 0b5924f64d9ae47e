#[cfg(test)]
mod tests {
    use crate::ChemistryService::ChemistryError;
    use crate::Thermodynamics::species_thermo::{Nasa7, R_U, SpeciesThermo};
    use approx::assert_relative_eq;

    // GRI-Mech 3.0 fit for N2
    fn n2() -> Nasa7 {
        Nasa7 {
            T_range: (300.0, 1000.0, 5000.0),
            low: [
                0.03298677e2,
                0.14082404e-2,
                -0.03963222e-4,
                0.05641515e-7,
                -0.02444854e-10,
                -0.10208999e4,
                0.03950372e2,
            ],
            high: [
                0.02926640e2,
                0.14879768e-2,
                -0.05684760e-5,
                0.10097038e-9,
                -0.06753351e-13,
                -0.09227977e4,
                0.05980528e2,
            ],
        }
    }

    #[test]
    fn test_nasa_n2_heat_capacity() {
        let nasa = n2();
        // ~29.1 kJ/(kmol K) around room temperature
        let cp = nasa.Cp(300.0).unwrap();
        assert_relative_eq!(cp / 1000.0, 29.1, epsilon = 0.1);
        let cp_high = nasa.Cp(1500.0).unwrap();
        assert!(cp_high > cp);
    }

    #[test]
    fn test_nasa_n2_enthalpy_near_zero_at_reference() {
        let nasa = n2();
        let h = nasa.dh(300.0).unwrap();
        // formation enthalpy of N2 is zero, sensible part from 298.15 K to 300 K is tiny
        assert!(h.abs() < 1.0e5, "h = {}", h);
    }

    #[test]
    fn test_nasa_ranges_are_continuous_at_midpoint() {
        let nasa = n2();
        let below = nasa.dh(999.999).unwrap();
        let above = nasa.dh(1000.0).unwrap();
        assert_relative_eq!(below, above, max_relative = 1e-3);
    }

    #[test]
    fn test_nasa_out_of_range() {
        let nasa = n2();
        match nasa.Cp(6000.0) {
            Err(ChemistryError::TemperatureOutOfRange { temperature, range }) => {
                assert_eq!(temperature, 6000.0);
                assert_eq!(range, (300.0, 5000.0));
            }
            other => panic!("expected TemperatureOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_constant_cp_model() {
        let thermo = SpeciesThermo::ConstantCp {
            Cp: 3.5 * R_U,
            h_ref: -241.8e6,
            T_ref: 298.15,
        };
        assert_relative_eq!(thermo.heat_capacity(800.0).unwrap(), 3.5 * R_U);
        assert_relative_eq!(
            thermo.enthalpy(398.15).unwrap(),
            -241.8e6 + 350.0 * R_U,
            max_relative = 1e-12
        );
    }
}
