use crate::{
    config::{known::ENGINE_PROMPT_NAME, AnswerSet, DatabaseEngine, KnownSettings},
    constants::STDIN_INDICATOR,
    error::{Error, Result},
    ioutils::read_from,
    prompt::{PromptHandler, PromptProvider, PromptSpec},
};
use serde_json::{Map, Value};

/// Collects answers from command line arguments and user prompts
pub struct AnswerCollector<P: PromptProvider> {
    handler: PromptHandler<P>,
}

impl<P: PromptProvider> AnswerCollector<P> {
    pub fn new(provider: P) -> Self {
        Self { handler: PromptHandler::new(provider) }
    }

    /// Decides the storage engine: command line first, then a prefilled
    /// `dbType` answer, then the engine selection prompt.
    pub fn known_settings(
        &self,
        engine: Option<DatabaseEngine>,
        prefilled: &AnswerSet,
    ) -> Result<KnownSettings> {
        if let Some(engine) = engine {
            return Ok(KnownSettings::new(engine));
        }

        let prompt = KnownSettings::engine_prompt();
        let answer = match prefilled.get(ENGINE_PROMPT_NAME) {
            Some(answer) => answer.clone(),
            None => self.handler.ask(&prompt)?,
        };

        let known = KnownSettings::from_engine_answer(&answer);
        log::debug!("Using database driver '{}'.", known.engine);
        Ok(known)
    }

    /// Answers every prompt in order; prefilled answers skip their prompt
    /// but still go through the prompt's validator.
    pub fn collect_answers(
        &self,
        prompts: &[PromptSpec],
        prefilled: &AnswerSet,
    ) -> Result<AnswerSet> {
        let mut answers = Map::new();

        for prompt in prompts {
            let answer = match prefilled.get(&prompt.name) {
                Some(answer) => {
                    log::debug!("Using provided answer for '{}'.", prompt.name);
                    self.handler.accept(prompt, answer)?
                }
                None => self.handler.ask(prompt)?,
            };
            answers.insert(prompt.name.clone(), answer);
        }

        for name in prefilled.keys() {
            let asked = prompts.iter().any(|p| &p.name == name);
            if !asked && name != ENGINE_PROMPT_NAME {
                log::warn!("Ignoring answer for '{name}': no such question.");
            }
        }

        Ok(answers)
    }
}

/// Reads the `--answers` argument: inline JSON, or stdin for `-`.
pub fn load_prefilled_answers(answers_arg: Option<String>) -> Result<AnswerSet> {
    let Some(answers_arg) = answers_arg else {
        return Ok(Map::new());
    };

    let answers_str = if answers_arg == STDIN_INDICATOR {
        read_from(std::io::stdin())?
    } else {
        answers_arg
    };
    parse_string_to_json(answers_str)
}

/// Parse a string into a JSON object.
fn parse_string_to_json(buf: String) -> Result<AnswerSet> {
    match serde_json::from_str::<Value>(&buf) {
        Ok(value) => Ok(into_answer_set(value)),
        Err(initial_err) => {
            // Shell invocations sometimes over-escape quotes (\").
            if buf.contains("\\\"") {
                let cleaned = buf.replace("\\\"", "\"");
                match serde_json::from_str::<Value>(&cleaned) {
                    Ok(value) => Ok(into_answer_set(value)),
                    Err(_) => Err(Error::JSONParseError(initial_err)),
                }
            } else {
                Err(Error::JSONParseError(initial_err))
            }
        }
    }
}

fn into_answer_set(value: Value) -> AnswerSet {
    match value {
        Value::Object(map) => map,
        other => {
            log::warn!("Ignoring answers that are not a JSON object: {other}");
            Map::new()
        }
    }
}
