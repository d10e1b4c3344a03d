//! # Reaction Network Module
//!
//! ## Purpose
//! Assembles the reaction network the integrator runs on: resolves a
//! mechanism file (JSON, same shape as a reaction library) against the
//! static species table and pairs the resulting topology with a
//! `RateLibrary` of rate laws. The built-in humid air mechanism ships with
//! the crate and is embedded at compile time.
//!
//! ## Main Data Structures
//! - `MechanismFile`/`MechanismEntry`: serde image of the JSON mechanism,
//!   reactants/products given as formula strings
//! - `NetworkReaction`: resolved topology, species referenced by index only
//! - `ReactionNetwork`: resolved reactions + rate library + carrier bypass
//!   configuration, consumed by `GlobalModel::new`
//!
//! ## Key Logic Implementation
//! 1. **Formula resolution**: every reactant/product formula is looked up in
//!    `SPECIES_FORMULAS`; an unknown formula is a load error, not a warning,
//!    since an unresolvable mechanism cannot produce a valid network
//! 2. **Slot limit**: at most 4 reactant and 4 product slots per reaction,
//!    checked at load time
//! 3. **Carrier bypass configuration**: the hydrogen-bearing species set is
//!    part of the static network configuration. When the carrier (H2O) has
//!    exactly zero density these species are skipped by the balance
//!    evaluator for the step
//!
//! ## Usage Pattern
//! ```rust,ignore
//! let network = ReactionNetwork::builtin_humid_air();
//! let model = GlobalModel::new(network);
//! ```

use super::rate_laws::{RateLaw, RateLibrary};
use super::reaction::MAX_REACTION_SPECIES;
use super::species::species_index;
use crate::GlobalModel::model::ModelError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Species index of the carrier the bypass set depends on (H2O).
pub const CARRIER_SPECIES_NO: usize = 53;

/// Hydrogen-bearing species skipped when the carrier density is zero.
/// Static network configuration, not derived from the formula strings.
pub const HYDROGEN_BEARING_SPECIES: [usize; 16] =
    [11, 12, 13, 14, 15, 16, 26, 27, 32, 44, 45, 46, 47, 48, 49, 50];

/// True for species whose chemistry requires the carrier to be present.
pub fn requires_carrier(species_no: usize) -> bool {
    HYDROGEN_BEARING_SPECIES.contains(&species_no)
}

/// One reaction of a mechanism file, species as formula strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanismEntry {
    pub eq: String,
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    pub rate: RateLaw,
}

/// serde image of a mechanism JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanismFile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub reactions: Vec<MechanismEntry>,
}

/// Resolved reaction topology: only species indices, no strings besides the
/// display equation.
#[derive(Debug, Clone)]
pub struct NetworkReaction {
    pub eq: String,
    pub reactants: Vec<usize>,
    pub products: Vec<usize>,
}

/// Resolved mechanism, ready to be turned into the model arenas.
#[derive(Debug, Clone)]
pub struct ReactionNetwork {
    pub name: String,
    reactions: Vec<NetworkReaction>,
    pub rates: RateLibrary,
}

impl ReactionNetwork {
    /// The humid air mechanism shipped with the crate.
    pub fn builtin_humid_air() -> Self {
        Self::from_json_str(include_str!("../../data/humid_air_mechanism.json"))
            .expect("built-in mechanism is valid")
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ModelError> {
        let content = fs::read_to_string(path)?;
        let network = Self::from_json_str(&content)?;
        info!(
            "mechanism <{}> loaded from {}: {} reactions",
            network.name,
            path.display(),
            network.no_reactions()
        );
        Ok(network)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ModelError> {
        let mechanism: MechanismFile = serde_json::from_str(content)
            .map_err(|e| ModelError::MalformedMechanism(e.to_string()))?;

        let mut reactions = Vec::with_capacity(mechanism.reactions.len());
        let mut rates = RateLibrary::new(mechanism.reactions.len());
        for (position, entry) in mechanism.reactions.into_iter().enumerate() {
            let reaction_no = position + 1;
            if entry.reactants.is_empty()
                || entry.reactants.len() > MAX_REACTION_SPECIES
                || entry.products.len() > MAX_REACTION_SPECIES
            {
                return Err(ModelError::MalformedMechanism(format!(
                    "reaction {} <{}>: 1..{} reactant and at most {} product slots allowed",
                    reaction_no, entry.eq, MAX_REACTION_SPECIES, MAX_REACTION_SPECIES
                )));
            }
            let reactants = resolve_formulas(&entry.reactants)?;
            let products = resolve_formulas(&entry.products)?;
            reactions.push(NetworkReaction {
                eq: entry.eq,
                reactants,
                products,
            });
            rates.set_law(reaction_no, entry.rate);
        }

        Ok(Self {
            name: mechanism.name,
            reactions,
            rates,
        })
    }

    /// Build a network directly from resolved reactions (synthetic networks
    /// for examples and tests).
    pub fn from_reactions(
        name: &str,
        reactions: Vec<NetworkReaction>,
        rates: RateLibrary,
    ) -> Self {
        Self {
            name: name.to_string(),
            reactions,
            rates,
        }
    }

    pub fn no_reactions(&self) -> usize {
        self.reactions.len()
    }

    /// Resolved topology of a reaction, 1-indexed.
    pub fn reaction(&self, reaction_no: usize) -> &NetworkReaction {
        &self.reactions[reaction_no - 1]
    }
}

fn resolve_formulas(formulas: &[String]) -> Result<Vec<usize>, ModelError> {
    formulas
        .iter()
        .map(|formula| {
            species_index(formula).ok_or_else(|| ModelError::UnknownSpecies(formula.clone()))
        })
        .collect()
}
