use engine_runtime::FilterError;
use expression_engine::ConfigurationError;
use filter_syntax::SyntaxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read or write a file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    #[error("Invalid filter: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Invalid mapping: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
