use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
	#[error("failed to read {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write {path}: {source}")]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("unsupported resume format for {path} (expected .json, .yaml, .yml or .toml)")]
	UnsupportedFormat { path: PathBuf },

	#[error("malformed JSON in {path}: {source}")]
	Json {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("malformed YAML in {path}: {source}")]
	Yaml {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("malformed TOML in {path}: {source}")]
	Toml {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("failed to serialize configuration: {0}")]
	ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, FolioError>;
