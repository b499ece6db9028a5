//! Credit rating and indicative pricing engine for real-estate-backed
//! notes (CCIs).
//!
//! The engine scores a note on four pillars (collateral, credit,
//! structure and market scenario), aggregates them into a grade on a
//! ten-step scale, generates the amortization schedule, and composes an
//! indicative rate from the assigned credit spread and market curves.
//!
//! All arithmetic uses [`rust_decimal::Decimal`]; floating point never
//! touches a monetary value or a rate.

pub mod analysis;
pub mod cashflow;
pub mod error;
pub mod pricing;
pub mod scale;
pub mod scorecard;
pub mod types;

pub use analysis::{analyze, AnalysisReport, AnalysisRequest};
pub use error::RatingError;
pub use scale::RatingGrade;
pub use types::{ComputationOutput, Money, Rate, Score};

/// Result alias used across the engine.
pub type RatingResult<T> = Result<T, RatingError>;
