//! Record validation engine.
//!
//! Provides rule and result types, the field schema registry, and a
//! pure-logic evaluator.

pub mod evaluator;
pub mod rules;
pub mod schema;
