/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Chemistry::network::{NetworkReaction, ReactionNetwork};
    use crate::Chemistry::rate_laws::{ConstantRate, RateLaw, RateLibrary};
    use crate::Chemistry::species::NO_SPECIES;
    use crate::GlobalModel::model::GlobalModel;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Synthetic network from (eq, reactants, products, constant k) tuples.
    fn toy_network(reactions: Vec<(&str, Vec<usize>, Vec<usize>, f64)>) -> ReactionNetwork {
        let mut rates = RateLibrary::new(reactions.len());
        let mut resolved = Vec::new();
        for (position, (eq, reactants, products, k)) in reactions.into_iter().enumerate() {
            resolved.push(NetworkReaction {
                eq: eq.to_string(),
                reactants,
                products,
            });
            rates.set_law(position + 1, RateLaw::Constant(ConstantRate { value: k }));
        }
        ReactionNetwork::from_reactions("toy", resolved, rates)
    }

    #[test]
    fn test_default_densities() {
        let model = GlobalModel::new(toy_network(vec![]));
        assert_eq!(model.species[0].density, 2.40e25); // M
        assert_eq!(model.species[17].density, 1.00e3); // e
        assert_eq!(model.species[51].density, 1.92e25); // N2
        assert_eq!(model.species[52].density, 4.80e24); // O2
        assert_eq!(model.species[53].density, 1.20e24); // H2O
        assert_eq!(model.species[36].density, 0.0); // O3
        assert_eq!(model.simulation_time, 0.0);
        assert_eq!(model.last_saved_simulation_time, -1.0);
    }

    #[test]
    fn test_incidence_lists_with_dedup() {
        // R1: O3 -> NO2, R2: O + O3 -> O + O2 (catalytic in O),
        // R3: O3 + O3 -> O3 + O2 (multi-role: loss 2, source 1)
        let network = toy_network(vec![
            ("O3 => NO2", vec![36], vec![39], 1.0),
            ("O + O3 => O + O2", vec![34, 36], vec![34, 52], 1.0),
            ("O3 + O3 => O3 + O2", vec![36, 36], vec![36, 52], 1.0),
        ]);
        let mut model = GlobalModel::new(network);
        model.set_balance_equations();

        // O3: loses through all three, net loss 1 for the multi-role one
        assert_eq!(model.species[36].loss_list, vec![(1, 1), (2, 1), (3, 1)]);
        assert_eq!(model.species[36].source_list, vec![]);
        // O cancels out completely
        assert_eq!(model.species[34].loss_list, vec![]);
        assert_eq!(model.species[34].source_list, vec![]);
        // NO2 and O2 are pure products
        assert_eq!(model.species[39].source_list, vec![(1, 1)]);
        assert_eq!(model.species[52].source_list, vec![(2, 1), (3, 1)]);
    }

    #[test]
    fn test_balance_evaluation_literal_density_product() {
        let network = toy_network(vec![
            ("O3 => NO2", vec![36], vec![39], 2.0),
            ("O3 + O3 => O3 + O2", vec![36, 36], vec![36, 52], 4.0),
        ]);
        let mut model = GlobalModel::new(network);
        model.set_balance_equations();
        model.species[36].set_density(10.0);
        model.set_reaction_rates();
        model.process_balance_equations();

        // loss(O3) = 2*10*1 + 4*(10*10)*1 : the duplicated reactant
        // contributes its density squared
        assert_relative_eq!(model.species[36].loss, 420.0, max_relative = 1e-12);
        assert_relative_eq!(model.species[39].source, 20.0, max_relative = 1e-12);
        assert_eq!(model.species[39].loss, 0.0);
    }

    #[test]
    fn test_loss_skipped_at_zero_density() {
        let network = toy_network(vec![("O3 => NO2", vec![36], vec![39], 2.0)]);
        let mut model = GlobalModel::new(network);
        model.set_balance_equations();
        model.set_reaction_rates();
        // O3 density is zero: its loss must stay zero even though the
        // incidence list is populated
        model.process_balance_equations();
        assert_eq!(model.species[36].loss, 0.0);
        assert_eq!(model.species[39].source, 0.0);
    }

    #[test]
    fn test_carrier_bypass() {
        // chemically meaningless topology, only exercises the bypass: a
        // source feeding H (hydrogen-bearing) and one feeding O
        let network = toy_network(vec![
            ("O3 => H", vec![36], vec![32], 1.0),
            ("O3 => O", vec![36], vec![34], 1.0),
        ]);
        let mut model = GlobalModel::new(network);
        model.set_balance_equations();
        model.species[36].set_density(10.0);
        model.set_reaction_rates();

        model.process_balance_equations();
        assert_relative_eq!(model.species[32].source, 10.0, max_relative = 1e-12);

        // with the carrier gone, hydrogen-bearing species are skipped for
        // the step while the rest is still evaluated
        model.set_h2o_density(0.0);
        model.process_balance_equations();
        assert_eq!(model.species[32].source, 0.0);
        assert_eq!(model.species[32].loss, 0.0);
        assert_relative_eq!(model.species[34].source, 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_balance_is_bitwise_no_op() {
        let network = toy_network(vec![("O3 => NO2", vec![36], vec![39], 1.0)]);
        let mut model = GlobalModel::new(network);
        model.species[36].set_density(123456.789);
        let density_bits = model.species[36].density.to_bits();

        model.species[36].source = 5.5;
        model.species[36].loss = 5.5;
        model.process_time_step_species_densities();

        assert_eq!(model.species[36].density.to_bits(), density_bits);
    }

    #[test]
    fn test_golden_single_reaction_decay() {
        // A -> B at k = 1.0, A0 = 100, dt = 0.1: plain explicit Euler decay,
        // cross-checked against the same update applied externally
        let network = toy_network(vec![("O3 => NO2", vec![36], vec![39], 1.0)]);
        let mut model = GlobalModel::new(network);
        model.set_balance_equations();
        model.dt = 0.1;
        model.species[36].set_density(100.0);
        model.set_reaction_rates();

        let dt = 0.1;
        let mut expected_a: f64 = 100.0;
        let mut expected_b: f64 = 0.0;
        for _ in 0..10 {
            model.process_balance_equations();
            model.process_time_step_species_densities();

            let loss = 1.0 * expected_a * 1.0;
            expected_b += loss * dt;
            expected_a += (0.0 - loss) * dt;

            assert_eq!(model.species[36].density, expected_a);
            assert_eq!(model.species[39].density, expected_b);
        }
        // closed form of the explicit scheme after 10 steps
        assert_relative_eq!(
            model.species[36].density,
            100.0 * 0.9f64.powi(10),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            model.species[36].density + model.species[39].density,
            100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    #[should_panic(expected = "outside the species table")]
    fn test_out_of_range_species_index_is_fatal() {
        let network = toy_network(vec![("broken", vec![99], vec![39], 1.0)]);
        let _ = GlobalModel::new(network);
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut file = NamedTempFile::new().expect("temp file");
        let mut header: Vec<String> = (1..=NO_SPECIES).map(|i| format!("#S{}", i)).collect();
        header.push("Time(s)".to_string());
        header.push("StepNo".to_string());
        writeln!(file, "{}", header.join(",")).expect("write header");

        // two rows, the later one must win
        let early: Vec<String> = (1..=NO_SPECIES + 2).map(|_| "1.0".to_string()).collect();
        writeln!(file, "{}", early.join(",")).expect("write row");
        let mut row: Vec<String> = (1..=NO_SPECIES).map(|i| format!("{}e10", i)).collect();
        row.push("1.5e-6".to_string());
        row.push("30000".to_string());
        writeln!(file, "{}", row.join(",")).expect("write row");

        let network = toy_network(vec![]);
        let mut model = GlobalModel::new(network);
        assert!(model.read_species_density_data_file(file.path()));

        assert_eq!(model.species[7].density, 7.0e10);
        assert_eq!(model.species[53].density, 53.0e10);
        let total: f64 = (1..=NO_SPECIES).map(|i| i as f64 * 1.0e10).sum();
        assert_relative_eq!(model.species[0].density, total, max_relative = 1e-12);
        assert_eq!(model.simulation_time, 1.5e-6);
        assert_eq!(model.last_saved_simulation_time, 1.5e-6);
        assert_eq!(model.step_count, 30000);
    }

    #[test]
    fn test_checkpoint_fallback_on_bad_data() {
        let network = toy_network(vec![]);

        // missing file
        let mut model = GlobalModel::new(network.clone());
        assert!(!model.read_species_density_data_file(std::path::Path::new(
            "no_such_checkpoint.csv"
        )));
        assert_eq!(model.simulation_time, 0.0);
        assert_eq!(model.species[51].density, 1.92e25);

        // header only: the long line is not numeric
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "#N+,#N2+,#N3+,#N4+,#O+,#O2+,#O4+,#NO+,#N2O+,#NO2+,Time(s),StepNo"
        )
        .expect("write header");
        let mut model = GlobalModel::new(network.clone());
        assert!(!model.read_species_density_data_file(file.path()));
        assert_eq!(model.simulation_time, 0.0);

        // a numeric but short row
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "1.0,2.0,3.0,4.0,5.0,6.0,7.0,8.0,9.0,10.0,11.0,12.0,13.0")
            .expect("write row");
        let mut model = GlobalModel::new(network);
        assert!(!model.read_species_density_data_file(file.path()));
        assert_eq!(model.step_count, 0);
    }
}
