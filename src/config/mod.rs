//! Configuration data handled by the prompt engine
//!
//! - `ConfigTemplate`: the parsed `parameters` mapping of a template document
//! - `AnswerSet`: flat answers keyed by prompt name
//! - `known`: settings decided before the template is processed

pub mod known;

use serde_json::{Map, Value};

pub use known::{DatabaseEngine, KnownSettings};

/// Nested, insertion-ordered mapping from template key to its default value.
pub type ConfigTemplate = Map<String, Value>;

/// Flat mapping from prompt name to the answer given for it.
pub type AnswerSet = Map<String, Value>;
