use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FolioError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
	pub export: ExportConfig,
	pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
	/// Template used when none is given on the command line.
	pub template: String,
	pub output_dir: PathBuf,
	/// Appended to the slugified person name to form the output file name.
	pub file_suffix: String,
}

impl Default for ExportConfig {
	fn default() -> Self {
		Self {
			template: "minimal".to_string(),
			output_dir: PathBuf::from("dist"),
			file_suffix: "-portfolio.html".to_string(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// Reload the resume file when it changes on disk.
	pub watch: bool,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 3000,
			watch: true,
		}
	}
}

impl Config {
	/// Loads `path` if given, otherwise `./folio.toml` when it exists, otherwise defaults.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let path = match path {
			Some(p) => p.to_path_buf(),
			None => {
				let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
				if !fallback.exists() {
					tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
					return Ok(Self::default());
				}
				fallback
			}
		};

		let raw = fs::read_to_string(&path).map_err(|source| FolioError::Read {
			path: path.clone(),
			source,
		})?;
		let config = toml::from_str(&raw).map_err(|source| FolioError::Toml {
			path: path.clone(),
			source,
		})?;
		tracing::debug!(path = %path.display(), "loaded configuration");
		Ok(config)
	}

	pub fn save(&self, path: &Path) -> Result<()> {
		let raw = toml::to_string_pretty(self)?;
		fs::write(path, raw).map_err(|source| FolioError::Write {
			path: path.to_path_buf(),
			source,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_partial_config_keeps_defaults() {
		let config: Config = toml::from_str(
			r#"
[export]
template = "bold"

[server]
port = 8080
"#,
		)
		.unwrap();
		assert_eq!(config.export.template, "bold");
		assert_eq!(config.export.file_suffix, "-portfolio.html");
		assert_eq!(config.server.port, 8080);
		assert_eq!(config.server.host, "127.0.0.1");
		assert!(config.server.watch);
	}

	#[test]
	fn test_save_then_load() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("folio.toml");
		let mut config = Config::default();
		config.export.output_dir = PathBuf::from("public");
		config.save(&path).unwrap();

		let loaded = Config::load(Some(&path)).unwrap();
		assert_eq!(loaded, config);
	}

	#[test]
	fn test_missing_explicit_config_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
		assert!(matches!(err, FolioError::Read { .. }));
	}
}
