use std::fmt::{self, Display};
use std::io::ErrorKind;
use std::path::PathBuf;
use crate::error::{Error, Result};

/// A project-relative file path with explicit text I/O.
///
/// Path arithmetic works on the raw path string and always returns a new node.
/// Reads tolerate missing files and writes only touch files that already exist,
/// unless the node was handed out by a context that creates missing outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	root: PathBuf,
	fullpath: String,
	name: String,
	create: bool,
}

impl Node {
	pub fn new(root: impl Into<PathBuf>, fullpath: impl Into<String>, create: bool) -> Self {
		let fullpath = fullpath.into();
		let name = match fullpath.rfind('/') {
			Some(i) => fullpath[i + 1..].to_string(),
			None => fullpath.clone(),
		};

		Self {
			root: root.into(),
			fullpath,
			name,
			create,
		}
	}

	pub fn fullpath(&self) -> &str {
		&self.fullpath
	}

	/// Last `/`-delimited segment of the path. Empty for paths ending in `/`.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn path(&self) -> PathBuf {
		self.root.join(&self.fullpath)
	}

	/// Removes every trailing character that appears anywhere in `suffix`.
	///
	/// This is a character-set trim, not an exact suffix match:
	/// `"foo.min.js"` stripped of `".js"` is `"foo.min"`, and `"bass.js"` becomes `"ba"`.
	pub fn strip_suffix(&self, suffix: &str) -> Self {
		let stripped = self.fullpath.trim_end_matches(|c| suffix.contains(c));
		self.derive(stripped.to_string())
	}

	pub fn append_suffix(&self, suffix: &str) -> Self {
		self.derive(format!("{}{}", self.fullpath, suffix))
	}

	fn derive(&self, fullpath: String) -> Self {
		Self::new(self.root.clone(), fullpath, self.create)
	}

	/// Reads the file as text. Returns `None` when there is no regular file at the path.
	pub async fn read_text(&self) -> Result<Option<String>> {
		let path = self.path();
		tracing::debug!(path = %path.display(), "reading");

		match tokio::fs::metadata(&path).await {
			Ok(meta) if meta.is_file() => {}
			Ok(_) => return Ok(None),
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(Error::io(path, e)),
		}

		match tokio::fs::read_to_string(&path).await {
			Ok(text) => Ok(Some(text)),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
			Err(e) => Err(Error::io(path, e)),
		}
	}

	/// Replaces the file's content with `text`.
	///
	/// A missing file is left missing unless this node creates missing outputs,
	/// in which case parent directories are created too.
	pub async fn write_text(&self, text: &str) -> Result<WriteOutcome> {
		let path = self.path();
		let exists = match tokio::fs::metadata(&path).await {
			Ok(meta) => meta.is_file(),
			Err(e) if e.kind() == ErrorKind::NotFound => false,
			Err(e) => return Err(Error::io(path, e)),
		};

		if !exists {
			if !self.create {
				tracing::warn!(path = %path.display(), "output file does not exist, skipping write");
				return Ok(WriteOutcome::SkippedMissing);
			}

			if let Some(parent) = path.parent() {
				tokio::fs::create_dir_all(parent).await.map_err(|e| Error::io(parent, e))?;
			}
		}

		tokio::fs::write(&path, text).await.map_err(|e| Error::io(&path, e))?;
		tracing::debug!(path = %path.display(), bytes = text.len(), "written");

		Ok(if exists { WriteOutcome::Updated } else { WriteOutcome::Created })
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WriteOutcome {
	Updated,
	Created,
	/// Left alone because the file doesn't exist and creation is off.
	SkippedMissing,
}

impl Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn node(path: &str) -> Node {
		Node::new("/", path, false)
	}

	#[test]
	fn name_is_last_segment() {
		assert_eq!(node("src/plugins/jSignature.UndoButton.js").name(), "jSignature.UndoButton.js");
		assert_eq!(node("jSignature.js").name(), "jSignature.js");
		assert_eq!(node("libs/").name(), "");
		assert_eq!(node("libs/").to_string(), "");
	}

	#[test]
	fn strip_suffix_trims_character_set() {
		assert_eq!(node("foo.min.js").strip_suffix(".js").fullpath(), "foo.min");
		assert_eq!(node("libs/jSignature.min.js").strip_suffix(".js").fullpath(), "libs/jSignature.min");
		assert_eq!(node("bass.js").strip_suffix(".js").fullpath(), "ba");
		assert_eq!(node("foo.css").strip_suffix(".js").fullpath(), "foo.c");
		assert_eq!(node("foo").strip_suffix("").fullpath(), "foo");
	}

	#[test]
	fn strip_then_append_round_trips_when_stem_is_clear() {
		let original = node("libs/jSignature.min.js");
		assert_eq!(original.strip_suffix(".js").append_suffix(".js"), original);

		// the stem itself ends in a character from the set, so it gets eaten too
		let eaten = node("libs/bundle.jss.js");
		assert_eq!(eaten.strip_suffix(".js").append_suffix(".js").fullpath(), "libs/bundle.js");
	}

	#[test]
	fn path_arithmetic_leaves_original_untouched() {
		let original = node("libs/jSignature.min.js");
		let derived = original.strip_suffix(".js").append_suffix(".noconflict.js");

		assert_eq!(derived.fullpath(), "libs/jSignature.min.noconflict.js");
		assert_eq!(derived.name(), "jSignature.min.noconflict.js");
		assert_eq!(original.fullpath(), "libs/jSignature.min.js");
	}

	#[tokio::test]
	async fn read_missing_file_is_none() {
		let dir = TempDir::new().unwrap();
		let node = Node::new(dir.path(), "nope.js", false);

		assert_eq!(node.read_text().await.unwrap(), None);
	}

	#[tokio::test]
	async fn read_directory_is_none() {
		let dir = TempDir::new().unwrap();
		std::fs::create_dir(dir.path().join("libs")).unwrap();

		assert_eq!(Node::new(dir.path(), "libs/", false).read_text().await.unwrap(), None);
	}

	#[tokio::test]
	async fn read_existing_file() {
		let dir = TempDir::new().unwrap();
		std::fs::write(dir.path().join("a.js"), "var a;").unwrap();

		let text = Node::new(dir.path(), "a.js", false).read_text().await.unwrap();
		assert_eq!(text.as_deref(), Some("var a;"));
	}

	#[tokio::test]
	async fn write_to_missing_file_is_noop() {
		let dir = TempDir::new().unwrap();
		let node = Node::new(dir.path(), "libs/out.js", false);

		assert_eq!(node.write_text("var x=1;").await.unwrap(), WriteOutcome::SkippedMissing);
		assert!(!node.path().exists());
	}

	#[tokio::test]
	async fn write_overwrites_existing_file() {
		let dir = TempDir::new().unwrap();
		std::fs::write(dir.path().join("out.js"), "old content that is longer").unwrap();
		let node = Node::new(dir.path(), "out.js", false);

		assert_eq!(node.write_text("new").await.unwrap(), WriteOutcome::Updated);
		assert_eq!(std::fs::read_to_string(node.path()).unwrap(), "new");
	}

	#[tokio::test]
	async fn empty_text_truncates_existing_file() {
		let dir = TempDir::new().unwrap();
		std::fs::write(dir.path().join("out.js"), "stale").unwrap();
		let node = Node::new(dir.path(), "out.js", false);

		assert_eq!(node.write_text("").await.unwrap(), WriteOutcome::Updated);
		assert_eq!(std::fs::read_to_string(node.path()).unwrap(), "");
	}

	#[tokio::test]
	async fn create_policy_makes_missing_file_and_parents() {
		let dir = TempDir::new().unwrap();
		let node = Node::new(dir.path(), "libs/nested/out.js", true);

		assert_eq!(node.write_text("var x=1;").await.unwrap(), WriteOutcome::Created);
		assert_eq!(std::fs::read_to_string(node.path()).unwrap(), "var x=1;");
	}
}
