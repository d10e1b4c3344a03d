/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Chemistry::network::{ReactionNetwork, requires_carrier};
    use crate::Chemistry::rate_laws::{
        ArrheniusRate, ConstantRate, EV_TO_KELVIN, ElectronImpactRate, RateConstantSource,
        RateExpression, RateLaw, RateLibrary, TabulatedTeRate,
    };
    use crate::Chemistry::rate_table::parse_rate_table;
    use crate::GlobalModel::model::ModelError;
    use approx::assert_relative_eq;

    #[test]
    fn test_builtin_mechanism_resolves() {
        let network = ReactionNetwork::builtin_humid_air();
        assert!(network.no_reactions() > 50);

        // first entry: e + N2 => e + e + N2+
        let first = network.reaction(1);
        assert_eq!(first.eq, "e + N2 => e + e + N2+");
        assert_eq!(first.reactants, vec![17, 51]);
        assert_eq!(first.products, vec![17, 17, 2]);

        // every reaction has a rate law
        for j in 1..=network.no_reactions() {
            assert!(
                network.rates.law(j).is_some(),
                "reaction {} without rate law",
                j
            );
        }
    }

    #[test]
    fn test_unknown_species_is_load_error() {
        let content = r#"{
            "name": "broken",
            "reactions": [
                { "eq": "e + Xe => Xe+ + e + e",
                  "reactants": ["e", "Xe"], "products": ["Xe+", "e", "e"],
                  "rate": { "type": "constant", "value": 1.0e-15 } }
            ]
        }"#;
        match ReactionNetwork::from_json_str(content) {
            Err(ModelError::UnknownSpecies(formula)) => assert_eq!(formula, "Xe"),
            other => panic!("expected UnknownSpecies, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_too_many_slots_is_load_error() {
        let content = r#"{
            "name": "broken",
            "reactions": [
                { "eq": "five reactants",
                  "reactants": ["e", "e", "e", "e", "e"], "products": ["e"],
                  "rate": { "type": "constant", "value": 1.0 } }
            ]
        }"#;
        assert!(matches!(
            ReactionNetwork::from_json_str(content),
            Err(ModelError::MalformedMechanism(_))
        ));
    }

    #[test]
    fn test_garbage_json_is_load_error() {
        assert!(matches!(
            ReactionNetwork::from_json_str("{ not json"),
            Err(ModelError::MalformedMechanism(_))
        ));
    }

    #[test]
    fn test_carrier_membership() {
        // hydrogen-bearing species depend on the carrier
        for i in [11, 16, 26, 32, 44, 50] {
            assert!(requires_carrier(i));
        }
        // pure N/O species do not
        for i in [1, 17, 34, 36, 39] {
            assert!(!requires_carrier(i));
        }
    }

    #[test]
    fn test_rate_law_evaluation() {
        let constant = ConstantRate { value: 2.5e-16 };
        assert_eq!(constant.rate(300.0, 50000.0), 2.5e-16);

        let arrhenius = ArrheniusRate {
            a: 4.4e-18,
            n: 0.0,
            ea: 3220.0,
        };
        let expected = 4.4e-18 * f64::exp(-3220.0 / 500.0);
        assert_relative_eq!(arrhenius.rate(500.0, 1.0e4), expected, max_relative = 1e-12);

        let electron = ElectronImpactRate {
            a: 1.0e-14,
            n: 0.5,
            ea: 15.6,
        };
        let te_ev: f64 = 2.0;
        let expected = 1.0e-14 * te_ev.sqrt() * f64::exp(-15.6 / te_ev);
        assert_relative_eq!(
            electron.rate(300.0, te_ev * EV_TO_KELVIN),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_tabulated_rate_interpolation() {
        let table = TabulatedTeRate {
            te_ev: vec![1.0, 2.0, 4.0],
            rate: vec![1.0e-18, 3.0e-18, 5.0e-18],
        };
        // clamped ends
        assert_eq!(table.rate(300.0, 0.5 * EV_TO_KELVIN), 1.0e-18);
        assert_eq!(table.rate(300.0, 10.0 * EV_TO_KELVIN), 5.0e-18);
        // midpoint of the first segment
        assert_relative_eq!(
            table.rate(300.0, 1.5 * EV_TO_KELVIN),
            2.0e-18,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_rate_library_missing_law_is_zero() {
        let mut library = RateLibrary::new(3);
        library.set_law(
            2,
            RateLaw::Constant(ConstantRate { value: 7.0e-16 }),
        );
        assert_eq!(library.rate_constant(1, 300.0, 300.0), 0.0);
        assert_eq!(library.rate_constant(2, 300.0, 300.0), 7.0e-16);
        assert_eq!(library.rate_constant(3, 300.0, 300.0), 0.0);
    }

    #[test]
    fn test_rate_table_parsing() {
        let mut library = RateLibrary::new(5);
        let content = "Te(eV),R2,R5,R99\n\
                       1.0,1.0e-18,2.0e-18,9.0e-18\n\
                       2.0,3.0e-18,4.0e-18,9.0e-18\n";
        let loaded = parse_rate_table(content, &mut library).expect("table parses");
        // R99 is outside the mechanism and skipped
        assert_eq!(loaded, 2);
        assert_relative_eq!(
            library.rate_constant(2, 300.0, 1.5 * EV_TO_KELVIN),
            2.0e-18,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            library.rate_constant(5, 300.0, 1.5 * EV_TO_KELVIN),
            3.0e-18,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_rate_table_rejects_garbage() {
        let mut library = RateLibrary::new(5);
        assert!(parse_rate_table("", &mut library).is_err());
        assert!(parse_rate_table("Te(eV),R1\nnot,a,number\n", &mut library).is_err());
        // a single Te point cannot be interpolated
        assert!(parse_rate_table("Te(eV),R1\n1.0,1.0e-18\n", &mut library).is_err());
    }
}
