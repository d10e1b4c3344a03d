//! # Global Model Module
//!
//! ## Purpose
//! State and per-step chemistry of the zero-dimensional plasma model: the
//! species and reaction arenas, the one-time incidence construction linking
//! species to the reactions producing/consuming them, the per-step balance
//! evaluation and the explicit density update. The time loop itself lives in
//! the `integrator` module, sample persistence in `sampling`.
//!
//! ## Main Data Structures
//! - `GlobalModel`: owns both arenas and all simulation-time state. Species
//!   and reactions are addressed by integer index only (1-indexed, slot 0 of
//!   the species arena is the aggregate "M" bucket, slot 0 of the reaction
//!   arena is unused)
//! - `SimulationPhase`: NotStarted -> Pulse -> Afterglow -> Finished
//! - `ModelError`: crate-wide error enum
//!
//! ## Key Logic Implementation
//! 1. **Incidence construction** (`set_balance_equations`): for every
//!    species, every reaction is scanned for occurrences in reactant slots
//!    (loss, with multiplicity) and product slots (source), then the
//!    per-species overlap reduction cancels reactions that both produce and
//!    consume the species. Runs once; the lists are read-only afterwards
//! 2. **Balance evaluation** (`process_balance_equations`): replays the
//!    incidence lists against current densities and rate constants. The
//!    rate of one reaction contribution is
//!    `k * (product of reactant slot densities) * multiplier`; a reactant
//!    listed twice contributes its density squared
//! 3. **Density update** (`process_time_step_species_densities`): explicit
//!    Euler step `density += (source - loss) * dt` with a non-fatal
//!    doubling warning and a skip of exactly balanced species
//!
//! The model is strictly single-threaded: one writer, no locks, every step
//! runs to completion before the next one starts.

use crate::Chemistry::network::{CARRIER_SPECIES_NO, ReactionNetwork, requires_carrier};
use crate::Chemistry::rate_laws::{EV_TO_KELVIN, RateConstantSource};
use crate::Chemistry::reaction::Reaction;
use crate::Chemistry::species::{NO_EVOLVED_SPECIES, NO_SPECIES, Species};
use log::warn;
use prettytable::{Cell, Row, Table, row};
use thiserror::Error;

/// Densities already above this floor trigger the instability warning when
/// they more than double in a single step.
pub const DENSITY_DOUBLING_NOISE_FLOOR: f64 = 1.0e5;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed mechanism: {0}")]
    MalformedMechanism(String),
    #[error("unknown species formula: {0}")]
    UnknownSpecies(String),
    #[error("malformed rate table: {0}")]
    MalformedRateTable(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    NotStarted,
    Pulse,
    Afterglow,
    Finished,
}

pub struct GlobalModel {
    /// Species arena, `0..=NO_SPECIES`; index 0 is the "M" bucket.
    pub species: Vec<Species>,
    /// Reaction arena, 1-indexed; slot 0 is an unused placeholder.
    pub reactions: Vec<Reaction>,
    rates: Box<dyn RateConstantSource + Send>,

    pub peak_electron_temperature: f64,
    pub electron_temperature: f64,
    pub gas_temperature: f64,

    pub step_count: u64,
    pub dt: f64,
    pub simulation_time: f64,
    pub last_saved_simulation_time: f64,
    pub plasma_time: f64,
    pub total_time: f64,
    pub phase: SimulationPhase,
}

impl GlobalModel {
    /// Build the model from a resolved network: allocate both arenas, copy
    /// the topology in and apply the default initial densities. The arenas
    /// are fixed in shape from here on; only densities, rate constants and
    /// the per-step accumulators mutate afterwards.
    pub fn new(network: ReactionNetwork) -> Self {
        let species = (0..=NO_SPECIES).map(Species::new).collect();
        let no_reactions = network.no_reactions();
        let mut reactions = vec![Reaction::new(); no_reactions + 1];
        for j in 1..=no_reactions {
            let topology = network.reaction(j);
            reactions[j].set_topology(&topology.reactants, &topology.products);
        }

        let mut model = Self {
            species,
            reactions,
            rates: Box::new(network.rates),
            peak_electron_temperature: 298.0,
            electron_temperature: 298.0,
            gas_temperature: 298.0,
            step_count: 0,
            dt: 50e-12,
            simulation_time: 0.0,
            last_saved_simulation_time: -1.0,
            plasma_time: 1e-9,
            total_time: 1e-6,
            phase: SimulationPhase::NotStarted,
        };
        model.set_default_species_densities();
        model
    }

    /// Swap the rate-constant source (synthetic rates in tests/examples).
    pub fn set_rate_source(&mut self, rates: Box<dyn RateConstantSource + Send>) {
        self.rates = rates;
    }

    pub fn no_reactions(&self) -> usize {
        self.reactions.len() - 1
    }

    //////////////////////////////// INITIAL STATE ////////////////////////////////

    /// Atmospheric-pressure humid air at default composition.
    pub fn set_default_species_densities(&mut self) {
        for species in self.species.iter_mut() {
            species.set_density(0.0);
        }
        self.species[0].set_density(2.40e25); // M
        self.species[17].set_density(1.00e3); // e
        self.species[36].set_density(0.00e0); // O3
        self.species[39].set_density(0.00e0); // NO2
        self.species[51].set_density(1.92e25); // N2
        self.species[52].set_density(4.80e24); // O2
        self.species[53].set_density(1.20e24); // H2O
    }

    pub fn set_h2o_density(&mut self, density_value: f64) {
        self.species[53].set_density(density_value);
    }

    pub fn set_no2_density(&mut self, density_value: f64) {
        self.species[39].set_density(density_value);
    }

    pub fn set_o3_density(&mut self, density_value: f64) {
        self.species[36].set_density(density_value);
    }

    pub fn set_peak_electron_temperature_ev(&mut self, temperature_value_ev: f64) {
        self.peak_electron_temperature = temperature_value_ev * EV_TO_KELVIN;
    }

    pub fn set_electron_temperature_kelvin(&mut self, temperature_value: f64) {
        self.electron_temperature = temperature_value;
    }

    pub fn set_gas_temperature_kelvin(&mut self, temperature_value: f64) {
        self.gas_temperature = temperature_value;
    }

    //////////////////////////////// RATE REFRESH ////////////////////////////////

    /// Refresh every rate constant from the rate-law source at the current
    /// gas and electron temperatures.
    pub fn set_reaction_rates(&mut self) {
        for j in 1..=self.no_reactions() {
            self.reactions[j].rate_constant =
                self.rates
                    .rate_constant(j, self.gas_temperature, self.electron_temperature);
        }
    }

    //////////////////////////////// INCIDENCE CONSTRUCTION ////////////////////////////////

    /// One-time network construction pass. For every species, scan every
    /// reaction: occurrences in reactant slots become a loss entry with the
    /// occurrence count as multiplier, occurrences in product slots a source
    /// entry. The per-species overlap reduction then cancels the common
    /// multiplier part of reactions present in both lists.
    pub fn set_balance_equations(&mut self) {
        let (species, reactions) = (&mut self.species, &self.reactions);
        for (i, species_record) in species.iter_mut().enumerate().skip(1) {
            for (j, reaction) in reactions.iter().enumerate().skip(1) {
                let mut repeat_loss = 0;
                for k in 1..=reaction.no_reactants() {
                    if reaction.reactant(k) == i {
                        repeat_loss += 1;
                    }
                }
                if repeat_loss > 0 {
                    species_record.add_loss_reaction(j, repeat_loss);
                }

                let mut repeat_source = 0;
                for k in 1..=reaction.no_products() {
                    if reaction.product(k) == i {
                        repeat_source += 1;
                    }
                }
                if repeat_source > 0 {
                    species_record.add_source_reaction(j, repeat_source);
                }
            }
            species_record.reduce_reaction_lists();
        }
    }

    //////////////////////////////// BALANCE EVALUATION ////////////////////////////////

    /// Recompute total source and loss rates for every evolved species by
    /// replaying the incidence lists against current densities and rate
    /// constants.
    pub fn process_balance_equations(&mut self) {
        let carrier_absent = self.species[CARRIER_SPECIES_NO].density == 0.0;

        for i in 1..=NO_EVOLVED_SPECIES {
            self.species[i].loss = 0.0;
            self.species[i].source = 0.0;

            // no water, no hydrogen chemistry for this step
            if carrier_absent && requires_carrier(i) {
                continue;
            }

            // a species already at zero density loses nothing
            if self.species[i].density > 0.0 {
                let mut loss = 0.0;
                for &(j, multiplier) in &self.species[i].loss_list {
                    let reaction = &self.reactions[j];
                    let mut aux_density = 1.0;
                    for k in 1..=reaction.no_reactants() {
                        aux_density *= self.species[reaction.reactant(k)].density;
                    }
                    loss += reaction.rate_constant * aux_density * multiplier as f64;
                }
                self.species[i].loss = loss;
            }

            // source is evaluated unconditionally: density can grow from zero
            let mut source = 0.0;
            for &(j, multiplier) in &self.species[i].source_list {
                let reaction = &self.reactions[j];
                let mut aux_density = 1.0;
                for k in 1..=reaction.no_reactants() {
                    aux_density *= self.species[reaction.reactant(k)].density;
                }
                source += reaction.rate_constant * aux_density * multiplier as f64;
            }
            self.species[i].source = source;
        }
    }

    //////////////////////////////// DENSITY UPDATE ////////////////////////////////

    /// Explicit Euler update of every evolved species from the current
    /// source/loss balance. A species whose density would more than double
    /// in one step while already above the noise floor gets a non-fatal
    /// warning. An exactly balanced species (source == loss) is left
    /// untouched.
    pub fn process_time_step_species_densities(&mut self) {
        for i in 1..=NO_EVOLVED_SPECIES {
            let species = &self.species[i];
            if species.loss > 0.0 || species.source > 0.0 {
                let sources_minus_losses = species.source - species.loss;
                let delta = sources_minus_losses * self.dt;

                if sources_minus_losses > 0.0
                    && delta > species.density
                    && species.density > DENSITY_DOUBLING_NOISE_FLOOR
                {
                    warn!(
                        "species [{}] > x2 density at time {}",
                        species.formula, self.simulation_time
                    );
                }

                let new_density = species.density + delta;
                if sources_minus_losses != 0.0 {
                    self.species[i].set_density(new_density);
                }
            }
        }
    }

    //////////////////////////////// REPORTING ////////////////////////////////

    pub fn print_species_formula_and_density(&self) {
        let mut table = Table::new();
        table.add_row(row!["No.", "Formula", "Density (m-3)"]);
        for (i, species) in self.species.iter().enumerate() {
            table.add_row(row![i, species.formula, format!("{:e}", species.density)]);
        }
        println!("\nSPECIES\n");
        table.printstd();
    }

    pub fn print_list_of_reactions(&self) {
        let mut table = Table::new();
        table.add_row(row![
            "No.", "Rate", "r1", "r2", "r3", "r4", "--->", "p1", "p2", "p3", "p4"
        ]);
        for j in 1..=self.no_reactions() {
            let reaction = &self.reactions[j];
            let mut columns: Vec<String> = vec![
                j.to_string(),
                format!("{:e}", reaction.rate_constant),
            ];
            for k in 1..=4 {
                if k <= reaction.no_reactants() {
                    columns.push(self.species[reaction.reactant(k)].formula.clone());
                } else {
                    columns.push(String::new());
                }
            }
            columns.push("--->".to_string());
            for k in 1..=4 {
                if k <= reaction.no_products() {
                    columns.push(self.species[reaction.product(k)].formula.clone());
                } else {
                    columns.push(String::new());
                }
            }
            table.add_row(Row::new(columns.iter().map(|c| Cell::new(c)).collect()));
        }
        println!("\nREACTION_LIST\n");
        table.printstd();
    }
}
