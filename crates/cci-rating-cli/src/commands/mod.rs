pub mod pricing;
pub mod rate;
pub mod schedule;
pub mod scorecard;
