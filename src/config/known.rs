//! Settings decided before prompt derivation runs

use crate::constants::database;
use crate::prompt::{AnswerFormat, PromptKind, PromptSpec};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Storage engine selected for the generated application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DatabaseEngine {
    /// File based SQLite database (`pdo_sqlite`).
    Sqlite,
    /// MySQL server (`pdo_mysql`).
    Mysql,
    /// PostgreSQL server (`pdo_pgsql`).
    Postgres,
    /// Any driver identifier paramgen has no defaults for.
    Other(String),
}

/// Engines offered by the selection prompt, as (label, driver) pairs.
const ENGINE_CHOICES: &[(&str, &str)] =
    &[("Sqlite", "pdo_sqlite"), ("MySQL", "pdo_mysql"), ("PostgreSQL", "pdo_pgsql")];

/// Name of the engine selection prompt.
pub const ENGINE_PROMPT_NAME: &str = "dbType";

impl DatabaseEngine {
    pub fn from_driver(driver: &str) -> Self {
        match driver {
            "pdo_sqlite" => DatabaseEngine::Sqlite,
            "pdo_mysql" => DatabaseEngine::Mysql,
            "pdo_pgsql" => DatabaseEngine::Postgres,
            other => DatabaseEngine::Other(other.to_string()),
        }
    }

    /// Maps a label of the selection prompt (e.g. `PostgreSQL`) to its engine.
    pub fn from_label(label: &str) -> Option<Self> {
        ENGINE_CHOICES
            .iter()
            .find(|(choice, _)| *choice == label)
            .map(|(_, driver)| Self::from_driver(driver))
    }

    /// Driver identifier written to the generated configuration.
    pub fn driver(&self) -> &str {
        match self {
            DatabaseEngine::Sqlite => "pdo_sqlite",
            DatabaseEngine::Mysql => "pdo_mysql",
            DatabaseEngine::Postgres => "pdo_pgsql",
            DatabaseEngine::Other(driver) => driver,
        }
    }

    /// File based engines have no host, port, database name or user.
    pub fn is_file_based(&self) -> bool {
        matches!(self, DatabaseEngine::Sqlite)
    }

    pub fn default_port(&self) -> u16 {
        match self {
            DatabaseEngine::Postgres => database::POSTGRES_PORT,
            DatabaseEngine::Mysql | DatabaseEngine::Sqlite => database::MYSQL_PORT,
            DatabaseEngine::Other(driver) => {
                log::warn!(
                    "Unknown database driver '{driver}', using generic port default."
                );
                database::MYSQL_PORT
            }
        }
    }

    pub fn default_user(&self) -> &'static str {
        match self {
            DatabaseEngine::Postgres => database::POSTGRES_USER,
            DatabaseEngine::Mysql => database::MYSQL_USER,
            DatabaseEngine::Sqlite => "",
            DatabaseEngine::Other(driver) => {
                log::warn!(
                    "Unknown database driver '{driver}', using empty user default."
                );
                ""
            }
        }
    }
}

impl Display for DatabaseEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.driver())
    }
}

impl From<String> for DatabaseEngine {
    fn from(driver: String) -> Self {
        Self::from_driver(&driver)
    }
}

impl From<DatabaseEngine> for String {
    fn from(engine: DatabaseEngine) -> Self {
        engine.driver().to_string()
    }
}

/// Facts decided by the surrounding workflow that prompts must honor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownSettings {
    pub engine: DatabaseEngine,
}

impl KnownSettings {
    pub fn new(engine: DatabaseEngine) -> Self {
        Self { engine }
    }

    /// Question asked when no engine was given on the command line.
    pub fn engine_prompt() -> PromptSpec {
        PromptSpec {
            name: ENGINE_PROMPT_NAME.to_string(),
            kind: PromptKind::SingleChoice,
            message: "Which database type do you want to use?".to_string(),
            default: Some("PostgreSQL".into()),
            choices: ENGINE_CHOICES.iter().map(|(label, _)| label.to_string()).collect(),
            validator: None,
            format: AnswerFormat::Text,
        }
    }

    /// Builds the settings from the answer to [`KnownSettings::engine_prompt`].
    ///
    /// Accepts a prompt label (`PostgreSQL`) or a driver identifier (`pdo_pgsql`).
    pub fn from_engine_answer(answer: &serde_json::Value) -> Self {
        let engine = match answer.as_str() {
            Some(label) => DatabaseEngine::from_label(label).unwrap_or_else(|| {
                let engine = DatabaseEngine::from_driver(label);
                if let DatabaseEngine::Other(driver) = &engine {
                    log::warn!("Unknown database type '{driver}', using it as the driver");
                }
                engine
            }),
            None => {
                log::warn!("Database type answer {answer} is not a string, using PostgreSQL");
                DatabaseEngine::Postgres
            }
        };
        Self::new(engine)
    }
}
