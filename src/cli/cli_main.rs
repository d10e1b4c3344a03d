//! Command line front of the simulator.
//!
//! The solver flags mirror the ones of the original discharge code:
//! `-Te` (peak electron temperature, eV), `-[H2O]` (water density, m-3),
//! `-totaltime` (s), `-plasmatime` (pulse width, s), `-dt` (step size, s).
//! Every flag is optional; a missing or non-numeric value leaves the
//! built-in default untouched for that parameter only.

use crate::Chemistry::network::ReactionNetwork;
use crate::GlobalModel::integrator::RunControl;
use crate::GlobalModel::model::{GlobalModel, ModelError};
use log::warn;
use std::path::Path;

/// Sample stream the simulator appends to and restarts from.
pub const OUTPUT_FILE: &str = "output.csv";

/// Flag-style argument list: `-flag value` pairs scanned positionally.
pub struct CommandLineInput {
    arguments: Vec<String>,
    flag_names: Vec<String>,
    flag_descriptions: Vec<String>,
    flag_values: Vec<Option<String>>,
}

impl CommandLineInput {
    pub fn new(arguments: Vec<String>) -> Self {
        Self {
            arguments,
            flag_names: Vec::new(),
            flag_descriptions: Vec::new(),
            flag_values: Vec::new(),
        }
    }

    pub fn print_argument_list(&self) {
        println!("\nECHO COMMAND: {}", self.arguments.join(" "));
    }

    pub fn set_flag_name(&mut self, flag_tag: &str, flag_description: &str) {
        self.flag_names.push(flag_tag.to_string());
        self.flag_descriptions.push(flag_description.to_string());
        self.flag_values.push(None);
    }

    /// Scan the argument list: the token after a known flag becomes its
    /// value.
    pub fn set_flag_values(&mut self) {
        for (i, name) in self.flag_names.iter().enumerate() {
            for (j, argument) in self.arguments.iter().enumerate() {
                if name == argument {
                    self.flag_values[i] = self.arguments.get(j + 1).cloned();
                }
            }
        }
    }

    pub fn print_flag_values(&self) {
        println!();
        for (i, name) in self.flag_names.iter().enumerate() {
            let value = self.flag_values[i].as_deref().unwrap_or("EMPTY");
            println!(
                "{}   {:>12}\t{}\t{}",
                i, name, value, self.flag_descriptions[i]
            );
        }
    }

    /// Numeric value of a flag; `None` when the flag is absent or its value
    /// does not parse (the parameter keeps its default in that case).
    pub fn float_flag_value(&self, flag_index: usize) -> Option<f64> {
        let value = self.flag_values.get(flag_index)?.as_deref()?;
        match value.parse::<f64>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!(
                    "flag {} value <{}> is not a number, keeping the default",
                    self.flag_names[flag_index], value
                );
                None
            }
        }
    }
}

/// Apply command line overrides to the model. Each parameter is validated
/// on its own; one malformed value never blocks the others.
pub fn set_parameters_from_command_line_input(model: &mut GlobalModel, arguments: Vec<String>) {
    println!("\nCOMMAND_LINE_INPUT_PARAMETERS\n");

    let mut command_line = CommandLineInput::new(arguments);
    command_line.print_argument_list();

    command_line.set_flag_name("-Te", "Electron temperature in eV");
    command_line.set_flag_name("-[H2O]", "Density of water in m-3");
    command_line.set_flag_name("-totaltime", "Total simulation time in s");
    command_line.set_flag_name("-plasmatime", "Plasma pulse time in s");
    command_line.set_flag_name("-dt", "Simulation time step in s");
    command_line.set_flag_values();
    command_line.print_flag_values();

    if let Some(value) = command_line.float_flag_value(0) {
        model.set_peak_electron_temperature_ev(value);
    }
    if let Some(value) = command_line.float_flag_value(1) {
        model.set_h2o_density(value);
    }
    if let Some(value) = command_line.float_flag_value(2) {
        model.total_time = value;
    }
    if let Some(value) = command_line.float_flag_value(3) {
        model.plasma_time = value;
    }
    if let Some(value) = command_line.float_flag_value(4) {
        model.dt = value;
    }
    println!();
}

/// Full solver run: built-in mechanism, command line overrides, restart
/// from an existing stream when one is present, then the two-phase loop.
pub fn run_simulation_cli(arguments: Vec<String>) -> Result<(), ModelError> {
    let network = ReactionNetwork::builtin_humid_air();
    let mut model = GlobalModel::new(network);

    set_parameters_from_command_line_input(&mut model, arguments);
    model.set_balance_equations();
    model.read_species_density_data_file(Path::new(OUTPUT_FILE));
    model.set_reaction_rates();

    model.print_species_formula_and_density();
    model.print_list_of_reactions();

    model.process_main_loop(Path::new(OUTPUT_FILE), &RunControl::default())
}
