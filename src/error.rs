use std::fmt::{self, Display};
use std::path::PathBuf;
use crate::types::Diagnostic;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to access `{}`: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Input file `{}` does not exist", .path.display())]
	MissingInput {
		path: PathBuf,
	},

	#[error("Invalid config `{}`: {message}", .path.display())]
	Config {
		path: PathBuf,
		message: String,
	},

	#[error("Compilation server responded with non-OK status of {status}")]
	Service {
		status: u16,
	},

	#[error("Compilation server rejected the request: {}", .messages.join("; "))]
	ServerRejected {
		messages: Vec<String>,
	},

	#[error("{0}")]
	Compilation(Diagnostics),

	#[error("Compilation server response is missing `{field}`")]
	MissingField {
		field: &'static str,
	},

	#[error("Request to compilation server failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Malformed compilation server response: {0}")]
	Response(#[from] serde_json::Error),
}

impl Error {
	pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}

/// Source errors reported by the compiler, rendered one per line.
#[derive(Debug, Clone)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl Display for Diagnostics {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Compilation Error:")?;

		for diag in &self.0 {
			write!(f, "\n{}", diag)?;
		}

		Ok(())
	}
}
