use std::fmt::{self, Display};
use serde::Deserialize;
use strum::VariantNames;

/// Optimisation level understood by the Closure Compiler service.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, strum::Display, strum::EnumString, strum::VariantNames)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CompressionLevel {
	WhitespaceOnly,
	#[default]
	SimpleOptimizations,
	AdvancedOptimizations,
}

impl CompressionLevel {
	/// Resolves a level name, falling back to the default for anything unrecognized.
	pub fn resolve(name: Option<&str>) -> Self {
		let Some(name) = name else {
			return Self::default();
		};

		name.parse().unwrap_or_else(|_| {
			tracing::warn!(
				requested = name,
				expected = %Self::VARIANTS.join(", "),
				"unknown compilation level, using {}",
				Self::default(),
			);
			Self::default()
		})
	}
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct Diagnostic {
	#[serde(default)]
	pub lineno: i64,
	#[serde(default)]
	pub charno: i64,
	#[serde(default)]
	pub line: String,
	#[serde(default)]
	pub error: String,
}

impl Diagnostic {
	pub fn new(lineno: i64, charno: i64, line: &str, error: &str) -> Self {
		Self {
			lineno,
			charno,
			line: line.into(),
			error: error.into(),
		}
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ln {}, ch {}, '{}' - {}", self.lineno, self.charno, self.line, self.error)
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerError {
	#[serde(default)]
	pub code: i64,
	#[serde(default)]
	pub error: String,
}

/// JSON body returned by the compile endpoint. Every key is optional.
///
/// `warnings` and `statistics` are only ever logged, so they stay untyped.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResponse {
	pub compiled_code: Option<String>,
	pub errors: Option<Vec<Diagnostic>>,
	pub warnings: Option<serde_json::Value>,
	pub server_errors: Option<Vec<ServerError>>,
	pub statistics: Option<serde_json::Value>,
}
