/// Handles argument parsing and the generation run.
pub mod cli;

/// Reading and writing parameters documents.
pub mod codec;

/// Parameters templates, answers and settings known before prompting.
pub mod config;

/// Constants used throughout paramgen.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Prompt derivation and user interaction.
pub mod prompt;
