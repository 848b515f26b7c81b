use std::path::Path;

use render::{OutputFormat, RenderOptions};
use serde::Deserialize;

use crate::error::CliError;

/// Contents of a `vbible.toml` file. Every key is optional.
///
/// ```toml
/// format = "html"
///
/// [render]
/// overlap_keep_right = false
/// ```
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: OutputFormat,
    pub render: RenderOptions,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.render.overlap_keep_right);
    }

    #[test]
    fn reads_format_and_render_table() {
        let config: Config =
            toml::from_str("format = \"html\"\n[render]\noverlap_keep_right = false\n").unwrap();
        assert_eq!(config.format, OutputFormat::Html);
        assert!(!config.render.overlap_keep_right);
    }

    #[test]
    fn load_reports_path_on_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = Config::load(&missing).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));

        let bad = dir.path().join("vbible.toml");
        std::fs::write(&bad, "format = \"pdf\"\n").unwrap();
        let err = Config::load(&bad).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
        assert!(err.to_string().contains("vbible.toml"));
    }
}
