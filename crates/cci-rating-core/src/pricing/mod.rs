//! Indicative pricing: credit spread by grade, risk measures on the
//! amortization schedule, and rate composition against market curves.

pub mod duration;
pub mod spread;

pub use duration::macaulay_duration;
pub use spread::{compose_pricing, credit_spread, PricingResult};
