/// Per-species state of the model: formula, number density with a hard
/// floor, and the deduplicated source/loss incidence lists built once at
/// network construction. The static index -> formula table of the humid air
/// mechanism lives here as well; index 0 is the aggregate "M" bucket.
pub mod species;
/// Static reaction topology: up to 4 reactant and 4 product species slots,
/// duplicates expressing stoichiometry, plus the rate constant refreshed
/// every step.
pub mod reaction;
/// Rate constants as functions of gas and electron temperature: analytic
/// laws (constant, Arrhenius, electron impact) and piecewise-linear tables,
/// behind the narrow `RateConstantSource` seam the integrator depends on.
pub mod rate_laws;
/// Loader for tabulated electron-impact rate coefficients produced offline
/// by a Boltzmann solver (CSV with one `R<no>` column per reaction).
pub mod rate_table;
/// Mechanism files and the resolved reaction network: formula resolution
/// against the species table, the built-in humid air mechanism and the
/// carrier bypass configuration.
pub mod network;
mod network_tests;
