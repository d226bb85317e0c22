//! Prompt derivation and interactive answer collection
//!
//! The module is structured in layers:
//! - `spec`, `rules`, `engine`: derive questions from a parameters template and
//!   merge the answers back
//! - `interface`: Pure abstract interfaces independent of any UI library
//! - `dialoguer`, `automatic`: Concrete prompt providers
//! - `handler`: Runs a derived question against a provider

pub mod automatic;
pub mod dialoguer;
pub mod engine;
pub mod fingerprint;
pub mod handler;
pub mod interface;
pub mod rules;
pub mod spec;

pub use engine::{derive_prompts, reconstitute};
pub use handler::PromptHandler;
pub use interface::*;
pub use spec::{AnswerFormat, PromptKind, PromptSpec, Validation, Validator};
