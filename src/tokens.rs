use std::path::Path;
use chrono::{DateTime, Utc};
use tokio::process::Command;

pub const BUILD_DATE: &str = "${buildDate}";
pub const COMMIT_ID: &str = "${commitID}";

pub fn build_date() -> String {
	format_build_date(Utc::now())
}

pub fn format_build_date(now: DateTime<Utc>) -> String {
	now.format("%Y-%m-%dT%H:%M").to_string()
}

/// `commit ID <hash>` for the HEAD of the repository at `dir`, or an empty
/// string when git is unavailable or `dir` isn't a repository.
pub async fn revision_label(dir: &Path) -> String {
	query_revision(&mut rev_parse(dir)).await
}

fn rev_parse(dir: &Path) -> Command {
	let mut command = Command::new("git");
	command.args(["rev-parse", "HEAD"]).current_dir(dir);
	command
}

async fn query_revision(command: &mut Command) -> String {
	match command.output().await {
		Ok(out) if out.status.success() => {
			let hash = String::from_utf8_lossy(&out.stdout);
			format_revision(hash.trim())
		}
		Ok(out) => {
			tracing::warn!(status = %out.status, stderr = %String::from_utf8_lossy(&out.stderr).trim(), "git rev-parse failed, leaving commit ID empty");
			String::new()
		}
		Err(e) => {
			tracing::warn!(error = %e, "git is unavailable, leaving commit ID empty");
			String::new()
		}
	}
}

fn format_revision(hash: &str) -> String {
	if hash.is_empty() {
		String::new()
	} else {
		format!("commit ID {}", hash)
	}
}

pub fn substitute(source: &str, build_date: &str, revision: &str) -> String {
	source
		.replace(BUILD_DATE, build_date)
		.replace(COMMIT_ID, revision)
}
