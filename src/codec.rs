//! Reading and writing parameters documents
//!
//! A parameters document is YAML with a single `parameters` root mapping.

use crate::config::ConfigTemplate;
use crate::constants::PARAMETERS_ROOT;
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Marker written as the first line of every generated document.
pub fn generated_header() -> String {
    format!("# Generated with {}#{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Parses a parameters document and returns its `parameters` mapping.
///
/// # Errors
/// * `Error::YAMLParseError` if `content` is not valid YAML
/// * `Error::Document` if there is no `parameters` mapping at the root
pub fn parse(content: &str) -> Result<ConfigTemplate> {
    let document: Value = if content.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(content)?
    };

    let Value::Object(mut root) = document else {
        return Err(Error::Document("the document root is not a mapping".to_string()));
    };

    match root.remove(PARAMETERS_ROOT) {
        Some(Value::Object(parameters)) => Ok(parameters),
        Some(Value::Null) => Ok(Map::new()),
        Some(_) => Err(Error::Document(format!("'{PARAMETERS_ROOT}' is not a mapping"))),
        None => Err(Error::Document(format!("missing '{PARAMETERS_ROOT}' mapping"))),
    }
}

/// Serializes `config` as a parameters document, header line included.
pub fn serialize(config: &ConfigTemplate) -> Result<String> {
    let mut root = Map::new();
    root.insert(PARAMETERS_ROOT.to_string(), Value::Object(config.clone()));

    let body = serde_yaml::to_string(&Value::Object(root))?;
    Ok(format!("{}\n{body}", generated_header()))
}
