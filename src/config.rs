use std::io::ErrorKind;
use std::path::Path;
use serde::Deserialize;
use crate::compiler::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "jsig-build.toml";

/// Build layout and compiler settings. Every field defaults to the jSignature layout.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
	pub source: String,
	pub plugins_dir: String,
	pub plugins: Vec<String>,
	pub dist: String,
	/// Global the no-conflict wrapper binds to `$`.
	pub wrapper_alias: String,
	pub create_missing: bool,
	pub compiler: CompilerConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
	pub endpoint: String,
	pub level: Option<String>,
	pub timeout_secs: u64,
}

impl Default for BuildConfig {
	fn default() -> Self {
		Self {
			source: "src/jSignature.js".into(),
			plugins_dir: "src/plugins/".into(),
			plugins: vec![
				"jSignature.UndoButton.js".into(),
				"jSignature.CompressorBase30.js".into(),
				"jSignature.CompressorSVG.js".into(),
			],
			dist: "libs/".into(),
			wrapper_alias: "jQuery".into(),
			create_missing: false,
			compiler: CompilerConfig::default(),
		}
	}
}

impl Default for CompilerConfig {
	fn default() -> Self {
		Self {
			endpoint: DEFAULT_ENDPOINT.into(),
			level: None,
			timeout_secs: DEFAULT_TIMEOUT.as_secs(),
		}
	}
}

impl BuildConfig {
	/// Loads the config at `path`. A missing file yields the defaults unless `required`.
	pub async fn load(path: &Path, required: bool) -> Result<Self> {
		let text = match tokio::fs::read_to_string(path).await {
			Ok(text) => text,
			Err(e) if e.kind() == ErrorKind::NotFound && !required => {
				tracing::debug!(path = %path.display(), "no config file, using defaults");
				return Ok(Self::default());
			}
			Err(e) => return Err(Error::io(path, e)),
		};

		let config = Self::parse(&text).map_err(|e| Error::Config {
			path: path.into(),
			message: e.message().to_string(),
		})?;

		config.validate().map_err(|message| Error::Config {
			path: path.into(),
			message,
		})?;

		Ok(config)
	}

	pub fn validate(&self) -> Result<(), String> {
		if self.compiler.timeout_secs == 0 {
			return Err("`compiler.timeout_secs` must be at least 1".into());
		}

		Ok(())
	}

	pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(text)
	}
}
