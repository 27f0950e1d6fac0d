//! Core of `reqlint`: reviews requirements documents for expression-quality
//! issues with a language model.
//!
//! The pipeline runs one way: raw text is split into chapters ([`segment`]),
//! each chapter becomes a prompt ([`review::prompt`]) evaluated by the model
//! ([`review::client`]), and the raw responses are folded into an
//! [`report::AggregatedReport`].

pub mod config;
pub mod engine;
pub mod errors;
pub mod extract;
pub mod model;
pub mod providers;
pub mod report;
pub mod review;
pub mod rules;
pub mod segment;

pub use errors::ReviewError;
pub use rules::{EvaluationRule, RuleSet};
