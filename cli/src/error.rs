use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config '{}': {}", path.display(), source.message())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
}
