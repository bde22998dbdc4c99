// ~/privshield/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("registry call failed on '{path}': {message}")]
    Os { path: String, message: String },

    #[error("value '{name}' has unexpected type")]
    UnexpectedType { name: String },

    #[error("registry is not available on this platform")]
    Unsupported,
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to start powershell: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("script exited with status {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("scripts directory not found: {0}")]
    MissingDir(PathBuf),

    #[error("script not found: {0}")]
    NotFound(String),

    #[error("unsupported script type: {0}")]
    UnsupportedType(PathBuf),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Shell(#[from] ShellError),
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("no category or setting matches '{0}'")]
    UnknownPath(String),
}
