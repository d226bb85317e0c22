//! Ordered rule table deciding how each template key is asked
//!
//! Rules are evaluated top to bottom and the first matching rule decides.
//! Named keys come first, type-driven fallbacks last.

use crate::config::KnownSettings;
use crate::constants::{database, keys, ldap, INSECURE_SECRET, SUPPORTED_LOCALES};
use crate::prompt::fingerprint;
use crate::prompt::spec::{value_to_input, AnswerFormat, PromptSpec, Validator};
use regex::Regex;
use serde_json::Value;

/// Key names that hold a password.
const PASSWORD_PATTERN: &str = r"(?i)passwd|password";

/// One template key as seen by the rules.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    /// Full prompt name, including the path of enclosing mappings.
    pub name: &'a str,
    pub value: &'a Value,
    pub known: &'a KnownSettings,
}

impl Entry<'_> {
    /// The template value unless it is null or an empty string.
    fn existing(&self) -> Option<&Value> {
        match self.value {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            value => Some(value),
        }
    }

    fn existing_or(&self, fallback: impl Into<Value>) -> Value {
        self.existing().cloned().unwrap_or_else(|| fallback.into())
    }

    /// The template value when it renders to one of `choices`.
    fn existing_choice(&self, choices: &[&str]) -> Option<Value> {
        self.existing()
            .filter(|value| choices.contains(&value_to_input(value).as_str()))
            .cloned()
    }
}

/// What a rule decided for a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// No question is asked for the key.
    Skip,
    Emit(PromptSpec),
    /// The key holds a mapping whose entries are asked one by one.
    Nested,
}

pub struct Rule {
    pub name: &'static str,
    applies: fn(&Entry) -> bool,
    decide: fn(&Entry) -> Decision,
}

pub const RULES: &[Rule] = &[
    Rule { name: "storage engine", applies: is_storage_engine, decide: skip },
    Rule {
        name: "network connection on a file based engine",
        applies: is_network_field_without_network,
        decide: skip,
    },
    Rule {
        name: "database host",
        applies: |e| e.name == keys::DATABASE_HOST,
        decide: database_host,
    },
    Rule {
        name: "database port",
        applies: |e| e.name == keys::DATABASE_PORT,
        decide: database_port,
    },
    Rule {
        name: "database name",
        applies: |e| e.name == keys::DATABASE_NAME,
        decide: database_name,
    },
    Rule {
        name: "database user",
        applies: |e| e.name == keys::DATABASE_USER,
        decide: database_user,
    },
    Rule {
        name: "database path",
        applies: |e| e.name == keys::DATABASE_PATH,
        decide: database_path,
    },
    Rule {
        name: "database password",
        applies: |e| e.name == keys::DATABASE_PASSWORD,
        decide: database_password,
    },
    Rule {
        name: "insert defaults toggle",
        applies: |e| e.name == keys::INSERT_DEFAULTS,
        decide: insert_defaults,
    },
    Rule { name: "session secret", applies: |e| e.name == keys::SECRET, decide: secret },
    Rule {
        name: "locale",
        applies: |e| e.name == keys::LOCALE || e.name == keys::FALLBACK_LOCALE,
        decide: locale,
    },
    Rule { name: "directory service", applies: is_ldap_field, decide: ldap_field },
    Rule { name: "nested mapping", applies: |e| e.value.is_object(), decide: nested },
    Rule { name: "password-like key", applies: is_password_like, decide: password_like },
    Rule { name: "sequence", applies: |e| e.value.is_array(), decide: skip },
    Rule { name: "null value", applies: |e| e.value.is_null(), decide: null_value },
    Rule { name: "boolean value", applies: |e| e.value.is_boolean(), decide: boolean_value },
    Rule { name: "number value", applies: |e| e.value.is_number(), decide: number_value },
    Rule { name: "string value", applies: |e| e.value.is_string(), decide: string_value },
];

/// Applies the first matching rule to `entry`.
pub fn decide(entry: &Entry) -> Decision {
    match RULES.iter().find(|rule| (rule.applies)(entry)) {
        Some(rule) => {
            log::trace!("Key '{}' handled by rule '{}'.", entry.name, rule.name);
            (rule.decide)(entry)
        }
        None => Decision::Skip,
    }
}

/// Whether a key name looks like it holds a password.
pub fn is_password_like(entry: &Entry) -> bool {
    is_password_key(entry.name)
}

pub fn is_password_key(name: &str) -> bool {
    match Regex::new(PASSWORD_PATTERN) {
        Ok(re) => re.is_match(name),
        Err(err) => {
            log::warn!("Invalid password pattern '{PASSWORD_PATTERN}': {err}");
            false
        }
    }
}

fn is_storage_engine(entry: &Entry) -> bool {
    entry.name == keys::DATABASE_DRIVER
}

fn is_network_field_without_network(entry: &Entry) -> bool {
    entry.known.engine.is_file_based()
        && [
            keys::DATABASE_HOST,
            keys::DATABASE_PORT,
            keys::DATABASE_NAME,
            keys::DATABASE_USER,
        ]
        .contains(&entry.name)
}

fn is_ldap_field(entry: &Entry) -> bool {
    [
        ldap::HOST,
        ldap::PORT,
        ldap::VERSION,
        ldap::USER_BASE_DN,
        ldap::USER_NAME_ATTRIBUTE,
        ldap::ROLE_BASE_DN,
        ldap::ROLE_NAME_ATTRIBUTE,
        ldap::ROLE_USER_ATTRIBUTE,
        ldap::ROLE_USER_ID,
        ldap::BIND_DN,
        ldap::BIND_PWD,
    ]
    .contains(&entry.name)
}

fn skip(_: &Entry) -> Decision {
    Decision::Skip
}

fn nested(_: &Entry) -> Decision {
    Decision::Nested
}

fn database_host(entry: &Entry) -> Decision {
    Decision::Emit(
        PromptSpec::text(entry.name, "Enter database hostname:")
            .with_default(entry.existing_or(database::DEFAULT_HOST)),
    )
}

/// The port follows the selected engine, never the template.
fn database_port(entry: &Entry) -> Decision {
    Decision::Emit(
        PromptSpec::text(entry.name, "Enter database port:")
            .with_default(entry.known.engine.default_port())
            .with_validator(Validator::DatabasePort)
            .with_format(AnswerFormat::Number),
    )
}

fn database_name(entry: &Entry) -> Decision {
    Decision::Emit(
        PromptSpec::text(entry.name, "Enter name of an existing database:")
            .with_default(entry.existing_or(database::DEFAULT_NAME)),
    )
}

fn database_user(entry: &Entry) -> Decision {
    Decision::Emit(
        PromptSpec::text(entry.name, "Enter username for database:")
            .with_default(entry.known.engine.default_user()),
    )
}

fn database_path(entry: &Entry) -> Decision {
    if !entry.known.engine.is_file_based() {
        return Decision::Skip;
    }
    Decision::Emit(
        PromptSpec::text(entry.name, "Enter path to database:")
            .with_default(entry.existing_or(database::DEFAULT_PATH)),
    )
}

fn database_password(entry: &Entry) -> Decision {
    Decision::Emit(
        PromptSpec::masked(entry.name, "Enter password for database user:")
            .with_default(entry.existing_or("")),
    )
}

fn insert_defaults(entry: &Entry) -> Decision {
    Decision::Emit(
        PromptSpec::confirm(
            entry.name,
            format!("Do you want to insert {} defaults to config?", entry.name),
        )
        .with_default(true),
    )
}

fn secret(entry: &Entry) -> Decision {
    let default = match entry.value {
        Value::String(s) if s == INSECURE_SECRET => Value::String(fingerprint::generate()),
        other => other.clone(),
    };
    Decision::Emit(
        PromptSpec::text(entry.name, "Session secret for web-cookies:").with_default(default),
    )
}

fn locale(entry: &Entry) -> Decision {
    let default = entry
        .existing_choice(SUPPORTED_LOCALES)
        .unwrap_or_else(|| SUPPORTED_LOCALES[0].into());
    Decision::Emit(
        PromptSpec::single_choice(
            entry.name,
            format!("Select language for {}", entry.name),
            SUPPORTED_LOCALES,
        )
        .with_default(default),
    )
}

fn ldap_field(entry: &Entry) -> Decision {
    let name = entry.name;
    let spec = match name {
        ldap::HOST => PromptSpec::text(name, "Enter LDAP hostname:")
            .with_default(entry.value.clone())
            .with_validator(Validator::LdapHost),
        ldap::PORT => PromptSpec::text(name, "Enter LDAP port:")
            .with_default(entry.existing_or(ldap::DEFAULT_PORT))
            .with_validator(Validator::LdapPort)
            .with_format(AnswerFormat::Number),
        ldap::VERSION => {
            let format = if entry.value.is_number() {
                AnswerFormat::Number
            } else {
                AnswerFormat::Text
            };
            PromptSpec::single_choice(name, "Select LDAP version:", ldap::VERSIONS)
                .with_default(entry.existing_choice(ldap::VERSIONS).unwrap_or(Value::Null))
                .with_format(format)
        }
        ldap::USER_BASE_DN => PromptSpec::text(
            name,
            "Enter distinguished name where users are stored in the LDAP directory:",
        )
        .with_default(entry.value.clone()),
        ldap::USER_NAME_ATTRIBUTE => PromptSpec::text(
            name,
            "Enter attribute name that holds the username (login name) in the LDAP directory:",
        )
        .with_default(entry.existing_or("uid")),
        ldap::ROLE_BASE_DN => PromptSpec::text(
            name,
            "Enter distinguished name where roles are stored in the LDAP directory:",
        )
        .with_default(entry.value.clone()),
        ldap::ROLE_NAME_ATTRIBUTE => {
            PromptSpec::text(name, "Enter attribute name that holds the role name:")
                .with_default(entry.existing_or("cn"))
        }
        ldap::ROLE_USER_ATTRIBUTE => {
            PromptSpec::text(name, "Enter attribute name to check if a user is in a group:")
                .with_default(entry.existing_or("memberUid"))
        }
        ldap::ROLE_USER_ID => PromptSpec::single_choice(
            name,
            "How is the user referenced in the role user attribute (username or distinguished name)?",
            ldap::ROLE_USER_IDS,
        )
        .with_default(entry.existing_choice(ldap::ROLE_USER_IDS).unwrap_or(Value::Null)),
        ldap::BIND_DN => PromptSpec::text(
            name,
            "Enter distinguished name to bind with if the LDAP server only allows bound requests:",
        )
        .with_default(entry.value.clone()),
        ldap::BIND_PWD => PromptSpec::masked(name, "Enter password for the bind user:")
            .with_default(entry.value.clone()),
        _ => return Decision::Skip,
    };
    Decision::Emit(spec)
}

fn format_of(value: &Value) -> AnswerFormat {
    match value {
        Value::Number(_) => AnswerFormat::Number,
        Value::Bool(_) => AnswerFormat::Boolean,
        _ => AnswerFormat::Text,
    }
}

fn password_like(entry: &Entry) -> Decision {
    Decision::Emit(
        PromptSpec::masked(entry.name, format!("Enter password for {}:", entry.name))
            .with_default(entry.value.clone())
            .with_format(format_of(entry.value)),
    )
}

fn null_value(entry: &Entry) -> Decision {
    Decision::Emit(PromptSpec::text(entry.name, format!("Enter value for {}:", entry.name)))
}

fn boolean_value(entry: &Entry) -> Decision {
    Decision::Emit(
        PromptSpec::confirm(entry.name, format!("Do you want to enable {}:", entry.name))
            .with_default(entry.value.clone()),
    )
}

fn number_value(entry: &Entry) -> Decision {
    Decision::Emit(
        PromptSpec::text(entry.name, format!("Enter value for {}:", entry.name))
            .with_default(entry.value.clone())
            .with_validator(Validator::Numeric)
            .with_format(AnswerFormat::Number),
    )
}

fn string_value(entry: &Entry) -> Decision {
    Decision::Emit(
        PromptSpec::text(entry.name, format!("Enter value for {}:", entry.name))
            .with_default(entry.value.clone()),
    )
}
