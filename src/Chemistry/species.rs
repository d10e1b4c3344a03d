//! # Species Module
//!
//! ## Purpose
//! Per-species state of the global model: formula, number density and the
//! source/loss bookkeeping that links a species to the reactions producing
//! and consuming it. One `Species` record per tracked species, owned by the
//! model in a flat arena and addressed only by integer index.
//!
//! ## Main Data Structures
//! - `Species`: density, transient source/loss accumulators and the two
//!   incidence lists `(reaction no, multiplier)` built once at startup
//! - `SPECIES_FORMULAS`: static index -> formula table; index 0 is the
//!   aggregate background bucket "M", simulated species live in `1..=NO_SPECIES`
//!
//! ## Key Logic Implementation
//! 1. **Density floor**: `set_density` clamps any value below
//!    `MINIMUM_DENSITY` to exactly zero, so near-empty species cannot drift
//!    into denormals or negative densities
//! 2. **Incidence lists**: `add_source_reaction`/`add_loss_reaction` append
//!    `(reaction no, multiplier)` pairs during network construction
//! 3. **Overlap reduction**: `reduce_reaction_lists` cancels the common part
//!    of the multipliers when the same reaction appears in both lists
//!    (species produced and consumed by one reaction), then compacts both
//!    lists in place
//!
//! Indices out of the species range are programming errors, not runtime
//! conditions: the arena is plain-indexed and panics on misuse.

/// Number of tracked species (1-indexed; index 0 is the "M" bucket).
pub const NO_SPECIES: usize = 53;

/// Species `1..=NO_EVOLVED_SPECIES` are advanced by the integrator.
/// The remaining indices (N2, O2, H2O) are background reservoirs: they enter
/// density products but their own densities are never stepped.
pub const NO_EVOLVED_SPECIES: usize = 50;

/// Densities below this value are stored as exactly 0.0.
pub const MINIMUM_DENSITY: f64 = 1.0e-3;

/// Static index -> formula table of the humid air mechanism.
pub const SPECIES_FORMULAS: [&str; NO_SPECIES + 1] = [
    "M",
    "N+",
    "N2+",
    "N3+",
    "N4+",
    "O+",
    "O2+",
    "O4+",
    "NO+",
    "N2O+",
    "NO2+",
    "H+",
    "H2+",
    "H3+",
    "OH+",
    "H2O+",
    "H3O+",
    "e",
    "O-",
    "O2-",
    "O3-",
    "O4-",
    "NO-",
    "N2O-",
    "NO2-",
    "NO3-",
    "H-",
    "OH-",
    "N(2_D)",
    "N2(A_3_Sigma)",
    "N2(B_3_Pi)",
    "O(1_D)",
    "H",
    "N",
    "O",
    "O2(a_1_Delta)",
    "O3",
    "NO",
    "N2O",
    "NO2",
    "NO3",
    "N2O3",
    "N2O4",
    "N2O5",
    "H2",
    "OH",
    "HO2",
    "H2O2",
    "HNO",
    "HNO2",
    "HNO3",
    "N2",
    "O2",
    "H2O",
];

/// Returns the species index for a formula, searching the static table.
pub fn species_index(formula: &str) -> Option<usize> {
    SPECIES_FORMULAS.iter().position(|&f| f == formula)
}

/// One tracked species of the global model.
#[derive(Debug, Clone)]
pub struct Species {
    pub formula: String,
    pub density: f64,
    /// Total loss rate of the current step, reset by the balance evaluator.
    pub loss: f64,
    /// Total source rate of the current step, reset by the balance evaluator.
    pub source: f64,
    /// Reactions producing this species: (reaction no, multiplier).
    pub source_list: Vec<(usize, usize)>,
    /// Reactions consuming this species: (reaction no, multiplier).
    pub loss_list: Vec<(usize, usize)>,
}

impl Species {
    /// Create the species record for a given index of the static table.
    pub fn new(species_index: usize) -> Self {
        debug_assert!(species_index <= NO_SPECIES);
        Self {
            formula: SPECIES_FORMULAS[species_index].to_string(),
            density: 0.0,
            loss: 0.0,
            source: 0.0,
            source_list: Vec::new(),
            loss_list: Vec::new(),
        }
    }

    /// Set the density, clamping values below the floor to exactly zero.
    pub fn set_density(&mut self, density_value: f64) {
        if density_value < MINIMUM_DENSITY {
            self.density = 0.0;
        } else {
            self.density = density_value;
        }
    }

    pub fn add_source_reaction(&mut self, reaction_no: usize, multiplier: usize) {
        self.source_list.push((reaction_no, multiplier));
    }

    pub fn add_loss_reaction(&mut self, reaction_no: usize, multiplier: usize) {
        self.loss_list.push((reaction_no, multiplier));
    }

    pub fn no_source_reactions(&self) -> usize {
        self.source_list.len()
    }

    pub fn no_loss_reactions(&self) -> usize {
        self.loss_list.len()
    }

    /// Cancel multiplier overlap between the source and loss lists.
    ///
    /// A reaction appearing in both lists produces and consumes this species
    /// at once (catalytic or multi-role participation). Only the net effect
    /// must survive, otherwise the balance evaluator would double count:
    /// - equal multipliers: the reaction is net-neutral for this species,
    ///   dropped from both lists
    /// - source > loss: net source multiplier `source - loss`, loss entry dropped
    /// - source < loss: net loss multiplier `loss - source`, source entry dropped
    ///
    /// Must run once per species over the complete raw lists, after the
    /// network scan and before the first balance evaluation. Entries keep
    /// their relative order through compaction.
    pub fn reduce_reaction_lists(&mut self) {
        for is in 0..self.source_list.len() {
            let (source_reaction_no, source_multiplier) = self.source_list[is];
            for il in 0..self.loss_list.len() {
                let (loss_reaction_no, loss_multiplier) = self.loss_list[il];
                if source_reaction_no != loss_reaction_no {
                    continue;
                }
                if source_multiplier == loss_multiplier {
                    self.source_list[is].1 = 0;
                    self.loss_list[il].1 = 0;
                } else if source_multiplier > loss_multiplier {
                    self.source_list[is].1 = source_multiplier - loss_multiplier;
                    self.loss_list[il].1 = 0;
                } else {
                    self.source_list[is].1 = 0;
                    self.loss_list[il].1 = loss_multiplier - source_multiplier;
                }
            }
        }
        // compact, keeping relative order
        self.source_list.retain(|&(_, multiplier)| multiplier > 0);
        self.loss_list.retain(|&(_, multiplier)| multiplier > 0);
    }
}
