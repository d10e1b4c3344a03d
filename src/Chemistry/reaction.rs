//! Static topology and current rate constant of a single reaction.
//!
//! Up to four reactant and four product slots, holding species indices into
//! the model arena. Duplicate entries express stoichiometry > 1 (e.g.
//! `e + e + N2+` lists the electron index twice). Accessors are 1-indexed to
//! match the reaction numbering convention of the mechanism files; asking
//! for a slot beyond the populated count is a caller bug.

use super::species::NO_SPECIES;

/// Maximum number of reactant or product slots per reaction.
pub const MAX_REACTION_SPECIES: usize = 4;

#[derive(Debug, Clone)]
pub struct Reaction {
    /// Current rate constant, refreshed from the rate-law source each step.
    pub rate_constant: f64,
    reactants: [usize; MAX_REACTION_SPECIES],
    products: [usize; MAX_REACTION_SPECIES],
    no_reactants: usize,
    no_products: usize,
}

impl Default for Reaction {
    fn default() -> Self {
        Self {
            rate_constant: 0.0,
            reactants: [0; MAX_REACTION_SPECIES],
            products: [0; MAX_REACTION_SPECIES],
            no_reactants: 0,
            no_products: 0,
        }
    }
}

impl Reaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set reactant and product species indices. Called once at network
    /// construction; a slot referencing an index outside the species table
    /// is a defect in the mechanism data and fails fast here.
    pub fn set_topology(&mut self, reactants: &[usize], products: &[usize]) {
        assert!(
            reactants.len() <= MAX_REACTION_SPECIES && products.len() <= MAX_REACTION_SPECIES,
            "reaction topology exceeds {} species slots",
            MAX_REACTION_SPECIES
        );
        for &species_no in reactants.iter().chain(products.iter()) {
            assert!(
                species_no <= NO_SPECIES,
                "reaction references species index {} outside the species table",
                species_no
            );
        }
        self.no_reactants = reactants.len();
        self.no_products = products.len();
        self.reactants[..reactants.len()].copy_from_slice(reactants);
        self.products[..products.len()].copy_from_slice(products);
    }

    pub fn no_reactants(&self) -> usize {
        self.no_reactants
    }

    pub fn no_products(&self) -> usize {
        self.no_products
    }

    /// Species index of the k-th reactant slot, 1-indexed.
    pub fn reactant(&self, k: usize) -> usize {
        debug_assert!(k >= 1 && k <= self.no_reactants);
        self.reactants[k - 1]
    }

    /// Species index of the k-th product slot, 1-indexed.
    pub fn product(&self, k: usize) -> usize {
        debug_assert!(k >= 1 && k <= self.no_products);
        self.products[k - 1]
    }
}
