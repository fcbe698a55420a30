use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Embedding provider error: {0}")]
    Provider(String),

    #[error("Schema error in {file}: {detail}")]
    Schema { file: String, detail: String },

    #[error("Embedding count mismatch: {left} vs {right}")]
    ArityMismatch { left: usize, right: usize },

    #[error("Unsupported output mode: {0}")]
    InvalidMode(String),

    #[error("Missing required query field: {0}")]
    MissingField(&'static str),

    #[error("Completion mode requested but no completer is configured")]
    MissingCompleter,

    #[error("Cannot rank against an empty corpus")]
    EmptyCorpus,

    #[error("Cosine similarity is undefined for a zero-norm vector")]
    UndefinedSimilarity,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
