use std::path::Path;

pub fn global_model_examples(task: usize) {
    //
    match task {
        0 => {
            // SHORT DEFAULT RUN: built-in humid air mechanism, 2 eV pulse
            use crate::GlobalModel::integrator::RunControl;
            use crate::GlobalModel::model::GlobalModel;
            use crate::Chemistry::network::ReactionNetwork;

            let network = ReactionNetwork::builtin_humid_air();
            let mut model = GlobalModel::new(network);
            model.set_peak_electron_temperature_ev(2.0);
            model.total_time = 1e-8;
            model.set_balance_equations();
            model.set_reaction_rates();
            model.print_list_of_reactions();

            model
                .process_main_loop(Path::new("example_output.csv"), &RunControl::default())
                .expect("example run");
            model.print_species_formula_and_density();
        }
        1 => {
            // SYNTHETIC NETWORK: single constant-rate conversion O3 -> NO2
            use crate::Chemistry::network::{NetworkReaction, ReactionNetwork};
            use crate::Chemistry::rate_laws::{ConstantRate, RateLaw, RateLibrary};
            use crate::GlobalModel::model::GlobalModel;

            let reactions = vec![NetworkReaction {
                eq: "O3 => NO2".to_string(),
                reactants: vec![36],
                products: vec![39],
            }];
            let mut rates = RateLibrary::new(1);
            rates.set_law(1, RateLaw::Constant(ConstantRate { value: 1.0e-2 }));
            let network = ReactionNetwork::from_reactions("toy_decay", reactions, rates);

            let mut model = GlobalModel::new(network);
            model.set_balance_equations();
            model.set_o3_density(1.0e10);
            model.set_reaction_rates();
            for _ in 0..10 {
                model.process_balance_equations();
                model.process_time_step_species_densities();
                model.simulation_time += model.dt;
                model.step_count += 1;
            }
            println!(
                "O3 {:?}  NO2 {:?}",
                model.species[36].density, model.species[39].density
            );
        }
        2 => {
            // BACKGROUND RUNNER: poll samples while the worker integrates
            use crate::Chemistry::network::ReactionNetwork;
            use crate::GlobalModel::model::GlobalModel;
            use crate::GlobalModel::runner::ModelRunner;

            let network = ReactionNetwork::builtin_humid_air();
            let mut model = GlobalModel::new(network);
            model.set_peak_electron_temperature_ev(2.0);
            model.total_time = 1e-9;
            model.set_balance_equations();

            let runner = ModelRunner::spawn(model, "example_output.csv".into());
            while !runner.is_finished() {
                if let Some(sample) = runner.poll_sample() {
                    println!("t = {} s, step {}", sample.simulation_time, sample.step_no);
                }
            }
            let model = runner.join().expect("runner result");
            println!("final electron density: {}", model.species[17].density);
        }
        _ => {
            println!("no such task");
        }
    }
}
