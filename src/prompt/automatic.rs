//! Prompt provider that answers without user interaction.
//!
//! Every question is answered with a predefined response for its name, or with
//! the question's own default. Used for `--non-interactive` runs and tests.

use super::interface::*;
use crate::error::Result;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct AutomaticPrompter {
    text_responses: HashMap<String, String>,
    choice_responses: HashMap<String, usize>,
    multiple_choice_responses: HashMap<String, Vec<usize>>,
    confirmation_responses: HashMap<String, bool>,
}

impl AutomaticPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined text response for the prompt called `name`
    pub fn with_text_response(mut self, name: &str, response: &str) -> Self {
        self.text_responses.insert(name.to_string(), response.to_string());
        self
    }

    /// Add a predefined choice response for the prompt called `name`
    pub fn with_choice_response(mut self, name: &str, choice_index: usize) -> Self {
        self.choice_responses.insert(name.to_string(), choice_index);
        self
    }

    /// Add a predefined multiple choice response for the prompt called `name`
    pub fn with_multiple_choice_response(
        mut self,
        name: &str,
        choice_indices: Vec<usize>,
    ) -> Self {
        self.multiple_choice_responses.insert(name.to_string(), choice_indices);
        self
    }

    /// Add a predefined confirmation response for the prompt called `name`
    pub fn with_confirmation_response(mut self, name: &str, response: bool) -> Self {
        self.confirmation_responses.insert(name.to_string(), response);
        self
    }
}

impl TextPrompter for AutomaticPrompter {
    fn prompt_text(&self, config: &TextPromptConfig) -> Result<String> {
        let response = self
            .text_responses
            .get(&config.name)
            .cloned()
            .or_else(|| config.default.clone())
            .unwrap_or_default();

        if config.masked {
            log::info!("Auto-answering '{}' with a hidden value", config.name);
        } else {
            log::info!("Auto-answering '{}' with: '{}'", config.name, response);
        }
        Ok(response)
    }
}

impl SingleChoicePrompter for AutomaticPrompter {
    fn prompt_single_choice(&self, config: &SingleChoiceConfig) -> Result<usize> {
        let response = self
            .choice_responses
            .get(&config.name)
            .copied()
            .or(config.default_index)
            .unwrap_or(0);

        log::info!(
            "Auto-answering '{}' with option {}: '{}'",
            config.name,
            response,
            config.choices.get(response).map(String::as_str).unwrap_or("<invalid>")
        );
        Ok(response)
    }
}

impl MultipleChoicePrompter for AutomaticPrompter {
    fn prompt_multiple_choice(
        &self,
        config: &MultipleChoiceConfig,
    ) -> Result<Vec<usize>> {
        let response = self
            .multiple_choice_responses
            .get(&config.name)
            .cloned()
            .unwrap_or_else(|| {
                config
                    .defaults
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &selected)| selected.then_some(i))
                    .collect()
            });

        log::info!("Auto-answering '{}' with options: {:?}", config.name, response);
        Ok(response)
    }
}

impl ConfirmationPrompter for AutomaticPrompter {
    fn prompt_confirmation(&self, config: &ConfirmationConfig) -> Result<bool> {
        let response =
            self.confirmation_responses.get(&config.name).copied().unwrap_or(config.default);

        log::info!("Auto-answering '{}' with: {}", config.name, response);
        Ok(response)
    }
}

impl PromptProvider for AutomaticPrompter {
    fn is_interactive(&self) -> bool {
        false
    }
}
