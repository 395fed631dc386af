use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a rule schema.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read schema {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid schema {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
