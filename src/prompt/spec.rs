//! Questions produced by the derivation engine

use crate::constants::{ldap, validation};
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// How a question is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptKind {
    Text,
    /// Text input that is not echoed.
    Masked,
    SingleChoice,
    MultiChoice,
    /// Yes/no question.
    Confirm,
}

/// Type the raw terminal input is converted to before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerFormat {
    Text,
    Number,
    Boolean,
}

/// Outcome of a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accepted,
    /// Human-readable reason; the question should be asked again.
    Rejected(String),
}

/// Input checks attached to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Validator {
    /// Digits only; the empty string is accepted.
    Numeric,
    /// At least one digit, nothing else.
    DatabasePort,
    /// `ldap://` or `ldaps://` URI with a host.
    LdapHost,
    /// Integer in `1..=65535`.
    LdapPort,
}

impl Validator {
    pub fn validate(&self, input: &str) -> Validation {
        let accepted = match self {
            Validator::Numeric => input.chars().all(|c| c.is_ascii_digit()),
            Validator::DatabasePort => {
                !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
            }
            Validator::LdapHost => is_ldap_uri(input),
            Validator::LdapPort => {
                matches!(input.trim().parse::<u32>(), Ok(port) if (1..=65535).contains(&port))
            }
        };

        if accepted {
            Validation::Accepted
        } else {
            Validation::Rejected(self.rejection_message().to_string())
        }
    }

    fn rejection_message(&self) -> &'static str {
        match self {
            Validator::Numeric => validation::NOT_A_NUMBER,
            Validator::DatabasePort => validation::PORT_NOT_A_NUMBER,
            Validator::LdapHost => validation::INVALID_LDAP_HOST,
            Validator::LdapPort => validation::PORT_OUT_OF_RANGE,
        }
    }
}

fn is_ldap_uri(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => {
            ldap::SCHEMES.contains(&url.scheme())
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// One question to present to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptSpec {
    /// Template key, or a path joined with the separator for nested keys.
    pub name: String,
    pub kind: PromptKind,
    pub message: String,
    pub default: Option<Value>,
    /// Only populated for choice kinds.
    pub choices: Vec<String>,
    pub validator: Option<Validator>,
    pub format: AnswerFormat,
}

impl PromptSpec {
    fn new(name: &str, kind: PromptKind, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            message: message.into(),
            default: None,
            choices: Vec::new(),
            validator: None,
            format: AnswerFormat::Text,
        }
    }

    pub fn text(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, PromptKind::Text, message)
    }

    pub fn masked(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, PromptKind::Masked, message)
    }

    pub fn confirm(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, PromptKind::Confirm, message).with_format(AnswerFormat::Boolean)
    }

    pub fn single_choice<S: AsRef<str>>(
        name: &str,
        message: impl Into<String>,
        choices: &[S],
    ) -> Self {
        let mut spec = Self::new(name, PromptKind::SingleChoice, message);
        spec.choices = choices.iter().map(|c| c.as_ref().to_string()).collect();
        spec
    }

    pub fn multi_choice<S: AsRef<str>>(
        name: &str,
        message: impl Into<String>,
        choices: &[S],
    ) -> Self {
        let mut spec = Self::new(name, PromptKind::MultiChoice, message);
        spec.choices = choices.iter().map(|c| c.as_ref().to_string()).collect();
        spec
    }

    /// Sets the default, treating `null` as no default.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        let default = default.into();
        self.default = if default.is_null() { None } else { Some(default) };
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_format(mut self, format: AnswerFormat) -> Self {
        self.format = format;
        self
    }

    /// Runs the attached validator, if any.
    pub fn validate(&self, input: &str) -> Validation {
        match &self.validator {
            Some(validator) => validator.validate(input),
            None => Validation::Accepted,
        }
    }

    /// The default as it is shown in a text field.
    pub fn default_input(&self) -> Option<String> {
        self.default.as_ref().map(value_to_input)
    }

    /// Converts raw input into the typed answer stored for this question.
    ///
    /// Empty input falls back to the default, or to `null` without one.
    pub fn parse_input(&self, input: &str) -> Value {
        if input.is_empty() {
            return self.default.clone().unwrap_or(Value::Null);
        }

        match self.format {
            AnswerFormat::Text => Value::String(input.to_string()),
            AnswerFormat::Number => parse_number(input),
            AnswerFormat::Boolean => match input {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                other => Value::String(other.to_string()),
            },
        }
    }
}

fn parse_number(input: &str) -> Value {
    let trimmed = input.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(input.to_string()))
}

/// Renders a value the way a user would type it.
pub(crate) fn value_to_input(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_accepts_digits_and_empty_input() {
        assert_eq!(Validator::Numeric.validate("123"), Validation::Accepted);
        assert_eq!(Validator::Numeric.validate(""), Validation::Accepted);
        assert_eq!(
            Validator::Numeric.validate("12a"),
            Validation::Rejected("This is not a number!".to_string())
        );
    }

    #[test]
    fn database_port_requires_digits() {
        assert_eq!(Validator::DatabasePort.validate("5432"), Validation::Accepted);
        assert!(matches!(Validator::DatabasePort.validate("abc"), Validation::Rejected(_)));
        assert!(matches!(Validator::DatabasePort.validate(""), Validation::Rejected(_)));
    }

    #[test]
    fn ldap_host_requires_ldap_scheme() {
        assert_eq!(
            Validator::LdapHost.validate("ldap://ldap.example.org"),
            Validation::Accepted
        );
        assert_eq!(Validator::LdapHost.validate("ldaps://10.0.0.1"), Validation::Accepted);
        assert!(matches!(
            Validator::LdapHost.validate("ldap.example.org"),
            Validation::Rejected(_)
        ));
        assert!(matches!(
            Validator::LdapHost.validate("http://ldap.example.org"),
            Validation::Rejected(_)
        ));
        assert!(matches!(Validator::LdapHost.validate("ldap://"), Validation::Rejected(_)));
    }

    #[test]
    fn ldap_port_must_be_in_range() {
        assert_eq!(Validator::LdapPort.validate("389"), Validation::Accepted);
        assert_eq!(Validator::LdapPort.validate("65535"), Validation::Accepted);
        assert_eq!(
            Validator::LdapPort.validate("0"),
            Validation::Rejected("Port is out of range (1-65535)!".to_string())
        );
        assert!(matches!(Validator::LdapPort.validate("65536"), Validation::Rejected(_)));
        assert!(matches!(Validator::LdapPort.validate("port"), Validation::Rejected(_)));
    }

    #[test]
    fn null_default_means_no_default() {
        let spec = PromptSpec::text("key", "Enter value").with_default(Value::Null);
        assert_eq!(spec.default, None);
        assert_eq!(spec.default_input(), None);
    }

    #[test]
    fn empty_input_falls_back_to_default() {
        let spec = PromptSpec::text("port", "Enter port")
            .with_default(5432)
            .with_format(AnswerFormat::Number);
        assert_eq!(spec.parse_input(""), json!(5432));

        let spec = PromptSpec::text("name", "Enter name");
        assert_eq!(spec.parse_input(""), Value::Null);
    }

    #[test]
    fn number_format_keeps_answers_numeric() {
        let spec = PromptSpec::text("port", "Enter port").with_format(AnswerFormat::Number);
        assert_eq!(spec.parse_input("8080"), json!(8080));
        assert_eq!(spec.parse_input("1.5"), json!(1.5));
        assert_eq!(spec.parse_input("many"), json!("many"));
    }

    #[test]
    fn boolean_format_parses_literals() {
        let spec = PromptSpec::masked("passwd_flag", "Enter password");
        let spec = spec.with_format(AnswerFormat::Boolean);
        assert_eq!(spec.parse_input("true"), json!(true));
        assert_eq!(spec.parse_input("false"), json!(false));
        assert_eq!(spec.parse_input("yes"), json!("yes"));
    }

    #[test]
    fn default_input_renders_scalars() {
        let spec = PromptSpec::text("port", "Enter port").with_default(389);
        assert_eq!(spec.default_input(), Some("389".to_string()));
        let spec = PromptSpec::text("host", "Enter host").with_default("localhost");
        assert_eq!(spec.default_input(), Some("localhost".to_string()));
    }

    #[test]
    fn choice_builders_keep_choice_order() {
        let spec = PromptSpec::single_choice("locale", "Select language", &["en", "de"]);
        assert_eq!(spec.kind, PromptKind::SingleChoice);
        assert_eq!(spec.choices, vec!["en", "de"]);

        let spec = PromptSpec::multi_choice("import", "Select data", &["epsg", "demo"]);
        assert_eq!(spec.kind, PromptKind::MultiChoice);
        assert_eq!(spec.choices, vec!["epsg", "demo"]);
    }

    #[test]
    fn prompt_without_validator_accepts_anything() {
        let spec = PromptSpec::text("anything", "Enter value");
        assert_eq!(spec.validate("whatever"), Validation::Accepted);
    }
}
