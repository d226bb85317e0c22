//! Derivation of prompts from a parameters template and reconstitution of the
//! answers into the template's nested shape.
//!
//! Nested mappings are flattened into prompt names joined with
//! [`PATH_SEPARATOR`] (`parent -> child`); [`reconstitute`] reverses the join.

use crate::config::{AnswerSet, ConfigTemplate, KnownSettings};
use crate::constants::{keys, PATH_SEPARATOR};
use crate::error::{Error, Result};
use crate::prompt::rules::{self, Decision, Entry};
use crate::prompt::PromptSpec;
use serde_json::{Map, Value};

/// Produces the ordered questions for every key of `template`.
///
/// # Errors
/// * `Error::TemplateKey` if a template key contains the path separator
pub fn derive_prompts(
    template: &ConfigTemplate,
    known: &KnownSettings,
) -> Result<Vec<PromptSpec>> {
    derive_with_prefix(template, known, "")
}

fn derive_with_prefix(
    template: &ConfigTemplate,
    known: &KnownSettings,
    prefix: &str,
) -> Result<Vec<PromptSpec>> {
    let mut prompts = Vec::new();

    for (key, value) in template {
        if key.contains(PATH_SEPARATOR) {
            return Err(Error::TemplateKey {
                key: format!("{prefix}{key}"),
                separator: PATH_SEPARATOR.to_string(),
            });
        }

        let name = format!("{prefix}{key}");
        match rules::decide(&Entry { name: &name, value, known }) {
            Decision::Skip => log::debug!("Skipping prompt for '{name}'."),
            Decision::Emit(prompt) => prompts.push(prompt),
            Decision::Nested => {
                if let Value::Object(children) = value {
                    let child_prefix = format!("{name}{PATH_SEPARATOR}");
                    prompts.extend(derive_with_prefix(children, known, &child_prefix)?);
                }
            }
        }
    }

    Ok(prompts)
}

/// Merges `answers` into a copy of `template`.
///
/// The storage engine from `known` replaces the template's driver, unanswered
/// connection fields become `null`, and flattened names are written back into
/// nested mappings. `template` itself is never modified.
///
/// # Errors
/// * `Error::TemplateShape` if a flattened name passes through a non-mapping value
pub fn reconstitute(
    template: &ConfigTemplate,
    known: &KnownSettings,
    answers: &AnswerSet,
) -> Result<ConfigTemplate> {
    let mut config = template.clone();

    if config.contains_key(keys::DATABASE_DRIVER) {
        config.insert(
            keys::DATABASE_DRIVER.to_string(),
            Value::String(known.engine.driver().to_string()),
        );
    }

    for key in keys::CONNECTION {
        if config.contains_key(*key) {
            let answer = answers.get(*key).filter(|a| !is_absent(a)).cloned();
            config.insert(key.to_string(), answer.unwrap_or(Value::Null));
        }
    }

    for (name, answer) in answers {
        if keys::CONNECTION.contains(&name.as_str()) {
            continue;
        }

        if name.contains(PATH_SEPARATOR) {
            place_nested(&mut config, name, answer.clone())?;
        } else if name == keys::INSERT_DEFAULTS && answer == &Value::Bool(true) {
            // A confirmed toggle keeps the defaults shipped in the template.
            let defaults = template.get(name).cloned().unwrap_or(Value::Bool(true));
            config.insert(name.clone(), defaults);
        } else {
            config.insert(name.clone(), answer.clone());
        }
    }

    Ok(config)
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn place_nested(config: &mut ConfigTemplate, name: &str, answer: Value) -> Result<()> {
    let mut segments: Vec<&str> = name.split(PATH_SEPARATOR).collect();
    let Some(leaf) = segments.pop() else {
        return Ok(());
    };

    let mut node = config;
    for segment in segments {
        let child = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        node = match child {
            Value::Object(map) => map,
            _ => {
                return Err(Error::TemplateShape {
                    key: name.to_string(),
                    segment: segment.to_string(),
                })
            }
        };
    }

    node.insert(leaf.to_string(), answer);
    Ok(())
}
