use std::time::Duration;
use reqwest::StatusCode;
use crate::error::{Diagnostics, Error, Result};
use crate::types::*;

pub const DEFAULT_ENDPOINT: &str = "https://closure-compiler.appspot.com/compile";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const OUTPUT_INFO: &[&str] = &["compiled_code", "warnings", "errors", "statistics"];

/// Client for the Closure Compiler web service.
pub struct Compiler {
	client: reqwest::Client,
	endpoint: String,
}

impl Compiler {
	pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()?;

		Ok(Self {
			client,
			endpoint: endpoint.into(),
		})
	}

	/// Sends `code` to the service and returns the compiled output.
	/// One request per call, never retried.
	pub async fn compress(&self, code: &str, level: Option<CompressionLevel>) -> Result<String> {
		let level = level.unwrap_or_default();
		tracing::info!(%level, endpoint = %self.endpoint, bytes = code.len(), "compiling");

		let response = self.client
			.post(&self.endpoint)
			.form(&form_fields(code, level))
			.send()
			.await?;

		let status = response.status();
		let body = response.text().await?;

		parse_response(status, &body)
	}
}

/// Form fields in the order the service documents them. `output_info` repeats.
fn form_fields(code: &str, level: CompressionLevel) -> Vec<(&'static str, String)> {
	let mut fields = vec![
		("js_code", code.to_string()),
		("compilation_level", level.to_string()),
		("output_format", "json".to_string()),
	];

	fields.extend(OUTPUT_INFO.iter().map(|info| ("output_info", info.to_string())));
	fields
}

pub fn parse_response(status: StatusCode, body: &str) -> Result<String> {
	if status != StatusCode::OK {
		return Err(Error::Service { status: status.as_u16() });
	}

	let response: CompileResponse = serde_json::from_str(body)?;

	if let Some(server_errors) = response.server_errors {
		return Err(Error::ServerRejected {
			messages: server_errors.iter().map(|e| format!("{} (code {})", e.error, e.code)).collect(),
		});
	}

	if let Some(errors) = response.errors {
		return Err(Error::Compilation(Diagnostics(errors)));
	}

	match &response.warnings {
		Some(serde_json::Value::Array(warnings)) => {
			for warning in warnings {
				tracing::warn!(%warning, "compiler warning");
			}
		}
		Some(warning) => tracing::warn!(%warning, "compiler warning"),
		None => {}
	}

	if let Some(statistics) = &response.statistics {
		tracing::debug!(%statistics, "compiler statistics");
	}

	response.compiled_code.ok_or(Error::MissingField { field: "compiledCode" })
}
