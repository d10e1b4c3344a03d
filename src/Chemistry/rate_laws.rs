//! # Rate Laws Module
//!
//! ## Purpose
//! Reaction rate constants as a function of gas and electron temperature.
//! The integrator only ever sees the narrow `RateConstantSource` seam:
//! `reaction no + (Tgas, Te) -> k`. Everything else here is one concrete
//! implementation of that seam, built from the mechanism file.
//!
//! ## Main Data Structures
//! - `RateLaw`: enum of rate expressions, statically dispatched with
//!   `enum_dispatch` through the `RateExpression` trait
//!   - `Constant`: temperature independent
//!   - `Arrhenius`: gas-temperature law `a * (T/300)^n * exp(-ea/T)`
//!   - `ElectronImpact`: electron-temperature law on Te in eV
//!   - `TabulatedTe`: piecewise-linear table in Te (eV), e.g. Boltzmann
//!     solver output loaded by `rate_table`
//! - `RateLibrary`: 1-indexed reaction no -> optional `RateLaw`; reactions
//!   without defined data return a rate of 0.0, which is not an error
//!
//! ## Usage Pattern
//! ```rust,ignore
//! let mut lib = RateLibrary::new(no_reactions);
//! lib.set_law(1, RateLaw::from(ArrheniusRate { a: 1.5e-17, n: 0.0, ea: 3600.0 }));
//! let k = lib.rate_constant(1, 298.0, 298.0);
//! ```

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

/// 1 eV expressed in Kelvin.
pub const EV_TO_KELVIN: f64 = 11605.0;

/// The seam between the integrator and the rate lookup. Implementations
/// must return a non-negative rate constant; zero means "no data". Tests
/// and synthetic networks plug their own sources in through this trait.
pub trait RateConstantSource {
    fn rate_constant(&self, reaction_no: usize, t_gas: f64, t_electron: f64) -> f64;
}

#[enum_dispatch]
pub trait RateExpression {
    /// Rate constant for the given gas and electron temperatures, both in K.
    fn rate(&self, t_gas: f64, t_electron: f64) -> f64;
}

/// Temperature-independent rate constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantRate {
    pub value: f64,
}

impl RateExpression for ConstantRate {
    fn rate(&self, _t_gas: f64, _t_electron: f64) -> f64 {
        self.value
    }
}

/// Gas-temperature Arrhenius law `a * (T/300)^n * exp(-ea/T)`, `ea` in K.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrheniusRate {
    pub a: f64,
    pub n: f64,
    pub ea: f64,
}

impl RateExpression for ArrheniusRate {
    fn rate(&self, t_gas: f64, _t_electron: f64) -> f64 {
        self.a * (t_gas / 300.0).powf(self.n) * f64::exp(-self.ea / t_gas)
    }
}

/// Electron-impact law `a * Te^n * exp(-ea/Te)` with Te in eV, `ea` in eV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectronImpactRate {
    pub a: f64,
    pub n: f64,
    pub ea: f64,
}

impl RateExpression for ElectronImpactRate {
    fn rate(&self, _t_gas: f64, t_electron: f64) -> f64 {
        let te_ev = t_electron / EV_TO_KELVIN;
        if te_ev <= 0.0 {
            return 0.0;
        }
        self.a * te_ev.powf(self.n) * f64::exp(-self.ea / te_ev)
    }
}

/// Piecewise-linear rate table over electron temperature in eV.
/// Ends are clamped: below the first point and above the last one the
/// boundary value is returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabulatedTeRate {
    pub te_ev: Vec<f64>,
    pub rate: Vec<f64>,
}

impl RateExpression for TabulatedTeRate {
    fn rate(&self, _t_gas: f64, t_electron: f64) -> f64 {
        if self.te_ev.is_empty() || self.te_ev.len() != self.rate.len() {
            return 0.0;
        }
        let te_ev = t_electron / EV_TO_KELVIN;
        if te_ev <= self.te_ev[0] {
            return self.rate[0].max(0.0);
        }
        let last = self.te_ev.len() - 1;
        if te_ev >= self.te_ev[last] {
            return self.rate[last].max(0.0);
        }
        let upper = self.te_ev.partition_point(|&t| t < te_ev);
        let (t0, t1) = (self.te_ev[upper - 1], self.te_ev[upper]);
        let (k0, k1) = (self.rate[upper - 1], self.rate[upper]);
        let fraction = (te_ev - t0) / (t1 - t0);
        (k0 + fraction * (k1 - k0)).max(0.0)
    }
}

/// Rate expression attached to one reaction of the mechanism.
#[enum_dispatch(RateExpression)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RateLaw {
    Constant(ConstantRate),
    Arrhenius(ArrheniusRate),
    ElectronImpact(ElectronImpactRate),
    TabulatedTe(TabulatedTeRate),
}

/// Reaction no -> rate law lookup, 1-indexed (slot 0 unused).
#[derive(Debug, Clone, Default)]
pub struct RateLibrary {
    laws: Vec<Option<RateLaw>>,
}

impl RateLibrary {
    pub fn new(no_reactions: usize) -> Self {
        Self {
            laws: vec![None; no_reactions + 1],
        }
    }

    pub fn no_reactions(&self) -> usize {
        self.laws.len().saturating_sub(1)
    }

    pub fn set_law(&mut self, reaction_no: usize, law: RateLaw) {
        debug_assert!(reaction_no >= 1 && reaction_no < self.laws.len());
        self.laws[reaction_no] = Some(law);
    }

    pub fn law(&self, reaction_no: usize) -> Option<&RateLaw> {
        self.laws.get(reaction_no).and_then(|law| law.as_ref())
    }
}

impl RateConstantSource for RateLibrary {
    fn rate_constant(&self, reaction_no: usize, t_gas: f64, t_electron: f64) -> f64 {
        match self.law(reaction_no) {
            Some(law) => law.rate(t_gas, t_electron),
            // reactions without defined rate data contribute nothing
            None => 0.0,
        }
    }
}
