//! Executes derived questions against a prompt provider
//!
//! Raw input is validated with the question's validator and converted to the
//! question's answer format. Rejected input is asked for again when the
//! provider is interactive and reported as an error otherwise.

use super::interface::{
    ConfirmationConfig, MultipleChoiceConfig, PromptProvider, SingleChoiceConfig,
    TextPromptConfig,
};
use super::spec::{value_to_input, PromptKind, PromptSpec, Validation};
use crate::error::{Error, Result};
use serde_json::Value;

/// Creates and executes prompts for derived questions
pub struct PromptHandler<P: PromptProvider> {
    provider: P,
}

impl<P: PromptProvider> PromptHandler<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Asks `spec` and returns the typed answer.
    pub fn ask(&self, spec: &PromptSpec) -> Result<Value> {
        match spec.kind {
            PromptKind::Text | PromptKind::Masked => self.prompt_text(spec),
            PromptKind::SingleChoice => self.prompt_single_choice(spec),
            PromptKind::MultiChoice => self.prompt_multiple_choice(spec),
            PromptKind::Confirm => self.prompt_confirmation(spec),
        }
    }

    /// Checks an answer supplied up front instead of asking for it.
    ///
    /// # Errors
    /// * `Error::Validation` if the question's validator rejects the answer
    /// * `Error::Validation` if a choice answer is not one of the choices
    pub fn accept(&self, spec: &PromptSpec, answer: &Value) -> Result<Value> {
        let input = value_to_input(answer);
        if let Validation::Rejected(message) = spec.validate(&input) {
            return Err(Error::Validation { name: spec.name.clone(), message });
        }
        self.check_choices(spec, answer)?;

        Ok(match answer {
            Value::String(s) => spec.parse_input(s),
            other => other.clone(),
        })
    }

    fn check_choices(&self, spec: &PromptSpec, answer: &Value) -> Result<()> {
        let is_choice = |value: &Value| spec.choices.contains(&value_to_input(value));
        let offending = match (&spec.kind, answer) {
            (PromptKind::SingleChoice, value) if !is_choice(value) => Some(value_to_input(value)),
            (PromptKind::MultiChoice, Value::Array(items)) => {
                items.iter().find(|item| !is_choice(item)).map(value_to_input)
            }
            (PromptKind::MultiChoice, value) => Some(value_to_input(value)),
            _ => None,
        };

        match offending {
            Some(input) => Err(Error::Validation {
                name: spec.name.clone(),
                message: format!("'{input}' is not one of: {}", spec.choices.join(", ")),
            }),
            None => Ok(()),
        }
    }

    fn prompt_text(&self, spec: &PromptSpec) -> Result<Value> {
        let config = self.create_text_config(spec);
        loop {
            let input = self.provider.prompt_text(&config)?;
            if let Some(answer) = self.resolve_input(spec, &input)? {
                return Ok(answer);
            }
        }
    }

    fn prompt_single_choice(&self, spec: &PromptSpec) -> Result<Value> {
        let config = self.create_single_choice_config(spec);
        let selection_index = self.provider.prompt_single_choice(&config)?;
        let selected_choice = spec.choices.get(selection_index).cloned().unwrap_or_default();

        if spec.default_input().as_deref() == Some(selected_choice.as_str()) {
            return Ok(spec.default.clone().unwrap_or(Value::Null));
        }
        Ok(spec.parse_input(&selected_choice))
    }

    fn prompt_multiple_choice(&self, spec: &PromptSpec) -> Result<Value> {
        let config = self.create_multiple_choice_config(spec);
        let indices = self.provider.prompt_multiple_choice(&config)?;

        let selected: Vec<Value> = indices
            .iter()
            .filter_map(|&i| spec.choices.get(i))
            .map(|choice| Value::String(choice.clone()))
            .collect();

        Ok(Value::Array(selected))
    }

    fn prompt_confirmation(&self, spec: &PromptSpec) -> Result<Value> {
        let config = self.create_confirmation_config(spec);
        let result = self.provider.prompt_confirmation(&config)?;
        Ok(Value::Bool(result))
    }

    /// Returns `None` when the input was rejected and should be asked again.
    fn resolve_input(&self, spec: &PromptSpec, input: &str) -> Result<Option<Value>> {
        let unchanged = match spec.default_input() {
            Some(default) => input.is_empty() || input == default,
            None => input.is_empty() && !self.provider.is_interactive(),
        };
        if unchanged {
            return Ok(Some(spec.parse_input("")));
        }

        match spec.validate(input) {
            Validation::Accepted => Ok(Some(spec.parse_input(input))),
            Validation::Rejected(message) if self.provider.is_interactive() => {
                println!("{message}");
                Ok(None)
            }
            Validation::Rejected(message) => {
                Err(Error::Validation { name: spec.name.clone(), message })
            }
        }
    }

    // Configuration creation methods

    fn create_text_config(&self, spec: &PromptSpec) -> TextPromptConfig {
        TextPromptConfig {
            name: spec.name.clone(),
            prompt: spec.message.clone(),
            default: spec.default_input().filter(|d| !d.is_empty()),
            masked: spec.kind == PromptKind::Masked,
        }
    }

    fn create_single_choice_config(&self, spec: &PromptSpec) -> SingleChoiceConfig {
        SingleChoiceConfig {
            name: spec.name.clone(),
            prompt: spec.message.clone(),
            choices: spec.choices.clone(),
            default_index: self.find_default_choice_index(&spec.choices, spec.default.as_ref()),
        }
    }

    fn create_multiple_choice_config(&self, spec: &PromptSpec) -> MultipleChoiceConfig {
        let default_strings = match &spec.default {
            Some(Value::Array(arr)) => arr.iter().map(value_to_input).collect(),
            _ => Vec::new(),
        };

        MultipleChoiceConfig {
            name: spec.name.clone(),
            prompt: spec.message.clone(),
            choices: spec.choices.clone(),
            defaults: spec.choices.iter().map(|c| default_strings.contains(c)).collect(),
        }
    }

    fn create_confirmation_config(&self, spec: &PromptSpec) -> ConfirmationConfig {
        ConfirmationConfig {
            name: spec.name.clone(),
            prompt: spec.message.clone(),
            default: spec.default.as_ref().and_then(Value::as_bool).unwrap_or(false),
        }
    }

    fn find_default_choice_index(
        &self,
        choices: &[String],
        default_value: Option<&Value>,
    ) -> Option<usize> {
        let default = value_to_input(default_value?);
        choices.iter().position(|choice| *choice == default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::interface::{
        ConfirmationPrompter, MultipleChoicePrompter, SingleChoicePrompter, TextPrompter,
    };
    use crate::prompt::{AnswerFormat, Validator};
    use serde_json::json;
    use std::cell::RefCell;

    /// Mock provider for testing
    #[derive(Debug, Default)]
    struct MockProvider {
        interactive: bool,
        text_responses: RefCell<Vec<String>>,
        single_choice_responses: RefCell<Vec<usize>>,
        multiple_choice_responses: RefCell<Vec<Vec<usize>>>,
        confirmation_responses: RefCell<Vec<bool>>,

        // Track calls for verification
        text_calls: RefCell<Vec<TextPromptConfig>>,
        single_choice_calls: RefCell<Vec<SingleChoiceConfig>>,
        multiple_choice_calls: RefCell<Vec<MultipleChoiceConfig>>,
        confirmation_calls: RefCell<Vec<ConfirmationConfig>>,
    }

    impl MockProvider {
        fn interactive() -> Self {
            Self { interactive: true, ..Default::default() }
        }

        fn unattended() -> Self {
            Self::default()
        }

        fn with_text_response(self, response: &str) -> Self {
            self.text_responses.borrow_mut().push(response.to_string());
            self
        }

        fn with_single_choice_response(self, response: usize) -> Self {
            self.single_choice_responses.borrow_mut().push(response);
            self
        }

        fn with_multiple_choice_response(self, response: Vec<usize>) -> Self {
            self.multiple_choice_responses.borrow_mut().push(response);
            self
        }

        fn with_confirmation_response(self, response: bool) -> Self {
            self.confirmation_responses.borrow_mut().push(response);
            self
        }
    }

    impl TextPrompter for MockProvider {
        fn prompt_text(&self, config: &TextPromptConfig) -> Result<String> {
            self.text_calls.borrow_mut().push(config.clone());
            Ok(self.text_responses.borrow_mut().remove(0))
        }
    }

    impl SingleChoicePrompter for MockProvider {
        fn prompt_single_choice(&self, config: &SingleChoiceConfig) -> Result<usize> {
            self.single_choice_calls.borrow_mut().push(config.clone());
            Ok(self.single_choice_responses.borrow_mut().remove(0))
        }
    }

    impl MultipleChoicePrompter for MockProvider {
        fn prompt_multiple_choice(
            &self,
            config: &MultipleChoiceConfig,
        ) -> Result<Vec<usize>> {
            self.multiple_choice_calls.borrow_mut().push(config.clone());
            Ok(self.multiple_choice_responses.borrow_mut().remove(0))
        }
    }

    impl ConfirmationPrompter for MockProvider {
        fn prompt_confirmation(&self, config: &ConfirmationConfig) -> Result<bool> {
            self.confirmation_calls.borrow_mut().push(config.clone());
            Ok(self.confirmation_responses.borrow_mut().remove(0))
        }
    }

    impl PromptProvider for MockProvider {
        fn is_interactive(&self) -> bool {
            self.interactive
        }
    }

    fn port_prompt() -> PromptSpec {
        PromptSpec::text("database_port", "Enter the database port:")
            .with_default(5432)
            .with_validator(Validator::DatabasePort)
            .with_format(AnswerFormat::Number)
    }

    #[test]
    fn test_prompt_text_basic() {
        let handler = PromptHandler::new(MockProvider::interactive().with_text_response("Alice"));
        let spec = PromptSpec::text("name", "Enter your name").with_default("John");

        assert_eq!(handler.ask(&spec).unwrap(), json!("Alice"));

        let calls = handler.provider.text_calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt, "Enter your name");
        assert_eq!(calls[0].default, Some("John".to_string()));
        assert!(!calls[0].masked);
    }

    #[test]
    fn test_masked_prompt_has_no_visible_default() {
        let handler = PromptHandler::new(MockProvider::interactive().with_text_response(""));
        let spec = PromptSpec::masked("database_password", "Enter the database password:")
            .with_default("secret");

        assert_eq!(handler.ask(&spec).unwrap(), json!("secret"));

        let calls = handler.provider.text_calls.borrow();
        assert!(calls[0].masked);
    }

    #[test]
    fn test_rejected_input_is_asked_again() {
        let provider = MockProvider::interactive()
            .with_text_response("abc")
            .with_text_response("5433");
        let handler = PromptHandler::new(provider);

        assert_eq!(handler.ask(&port_prompt()).unwrap(), json!(5433));
        assert_eq!(handler.provider.text_calls.borrow().len(), 2);
    }

    #[test]
    fn test_rejected_input_fails_when_unattended() {
        let handler = PromptHandler::new(MockProvider::unattended().with_text_response("abc"));

        let err = handler.ask(&port_prompt()).unwrap_err();

        assert!(matches!(
            err,
            Error::Validation { ref name, ref message }
                if name == "database_port" && message == "A port has to be a number"
        ));
    }

    #[test]
    fn test_default_is_accepted_unchanged() {
        let handler = PromptHandler::new(MockProvider::unattended().with_text_response("5432"));
        assert_eq!(handler.ask(&port_prompt()).unwrap(), json!(5432));
    }

    #[test]
    fn test_empty_answer_without_default_is_null_when_unattended() {
        let handler = PromptHandler::new(MockProvider::unattended().with_text_response(""));
        let spec = PromptSpec::text("ldap_host", "Enter the LDAP host:")
            .with_validator(Validator::LdapHost);

        assert_eq!(handler.ask(&spec).unwrap(), Value::Null);
    }

    #[test]
    fn test_prompt_single_choice() {
        let handler = PromptHandler::new(MockProvider::interactive().with_single_choice_response(1));
        let spec = PromptSpec::single_choice("locale", "Select language", &["en", "de", "it"])
            .with_default("it");

        assert_eq!(handler.ask(&spec).unwrap(), json!("de"));

        let calls = handler.provider.single_choice_calls.borrow();
        assert_eq!(calls[0].choices, vec!["en", "de", "it"]);
        assert_eq!(calls[0].default_index, Some(2));
    }

    #[test]
    fn test_numeric_choice_keeps_number_format() {
        let handler = PromptHandler::new(MockProvider::interactive().with_single_choice_response(1));
        let spec = PromptSpec::single_choice("ldap_version", "Select version", &["3", "2"])
            .with_default(3)
            .with_format(AnswerFormat::Number);

        assert_eq!(handler.ask(&spec).unwrap(), json!(2));
        assert_eq!(handler.provider.single_choice_calls.borrow()[0].default_index, Some(0));
    }

    #[test]
    fn test_prompt_multiple_choice() {
        let handler =
            PromptHandler::new(MockProvider::interactive().with_multiple_choice_response(vec![0, 2]));
        let spec = PromptSpec::multi_choice("import", "Select data", &["epsg", "demo", "acl"])
            .with_default(json!(["demo"]));

        assert_eq!(handler.ask(&spec).unwrap(), json!(["epsg", "acl"]));

        let calls = handler.provider.multiple_choice_calls.borrow();
        assert_eq!(calls[0].defaults, vec![false, true, false]);
    }

    #[test]
    fn test_prompt_confirmation() {
        let handler = PromptHandler::new(MockProvider::interactive().with_confirmation_response(false));
        let spec = PromptSpec::confirm("fom", "Insert defaults?").with_default(true);

        assert_eq!(handler.ask(&spec).unwrap(), json!(false));
        assert!(handler.provider.confirmation_calls.borrow()[0].default);
    }

    #[test]
    fn test_confirmation_null_default_is_false() {
        let handler = PromptHandler::new(MockProvider::interactive().with_confirmation_response(true));
        let spec = PromptSpec::confirm("debug", "Enable debug?");

        assert_eq!(handler.ask(&spec).unwrap(), json!(true));
        assert!(!handler.provider.confirmation_calls.borrow()[0].default);
    }

    #[test]
    fn test_prefilled_answers_are_validated() {
        let handler = PromptHandler::new(MockProvider::unattended());

        assert_eq!(handler.accept(&port_prompt(), &json!("5433")).unwrap(), json!(5433));
        assert_eq!(handler.accept(&port_prompt(), &json!(5433)).unwrap(), json!(5433));
        assert!(matches!(
            handler.accept(&port_prompt(), &json!("abc")),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_prefilled_choice_must_be_offered() {
        let handler = PromptHandler::new(MockProvider::unattended());
        let locale = PromptSpec::single_choice("locale", "Select language", &["en", "de"]);
        let version = PromptSpec::single_choice("ldap_version", "Select LDAP version:", &["2", "3"])
            .with_format(AnswerFormat::Number);

        assert_eq!(handler.accept(&locale, &json!("de")).unwrap(), json!("de"));
        assert_eq!(handler.accept(&version, &json!(3)).unwrap(), json!(3));

        let err = handler.accept(&locale, &json!("klingon")).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation { ref name, ref message }
                if name == "locale" && message.contains("klingon")
        ));
        assert!(matches!(
            handler.accept(&version, &json!("banana")),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_prefilled_multi_choice_items_must_be_offered() {
        let handler = PromptHandler::new(MockProvider::unattended());
        let spec = PromptSpec::multi_choice("features", "Select features", &["a", "b", "c"]);

        assert_eq!(handler.accept(&spec, &json!(["a", "c"])).unwrap(), json!(["a", "c"]));
        assert!(matches!(
            handler.accept(&spec, &json!(["a", "z"])),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            handler.accept(&spec, &json!("a")),
            Err(Error::Validation { .. })
        ));
    }
}
