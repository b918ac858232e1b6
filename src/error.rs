use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pogo-icons operations
#[derive(Error, Diagnostic, Debug)]
pub enum PogoError {
    #[error("IO error: {0}")]
    #[diagnostic(code(pogo::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pogo::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(pogo::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(pogo::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Network error: {message}")]
    #[diagnostic(code(pogo::network))]
    Network {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(pogo::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl PogoError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: &std::path::Path, action: &str, err: impl std::fmt::Display) -> Self {
        PogoError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to {}: {}", action, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, PogoError>;
