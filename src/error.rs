use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Prompt failed. Original error: {0}")]
    PromptError(#[from] dialoguer::Error),

    /// A flattened answer key runs through a value that is not a mapping.
    #[error("Cannot place answer '{key}': '{segment}' is a value, not a mapping.")]
    TemplateShape { key: String, segment: String },

    /// A template key already contains the reserved path separator.
    #[error("Template key '{key}' contains the reserved separator '{separator}'.")]
    TemplateKey { key: String, separator: String },

    /// An answer was rejected and the prompt could not be repeated.
    #[error("Invalid answer for '{name}': {message}")]
    Validation { name: String, message: String },

    #[error("Malformed parameters document: {0}.")]
    Document(String),

    #[error("Cannot proceed: output file '{output}' already exists. Use --force to overwrite it.")]
    OutputExists { output: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with paramgen's Error as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
