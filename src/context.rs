mod node;

pub use node::{Node, WriteOutcome};

use std::path::{Path, PathBuf};

/// Hands out [`Node`]s rooted at the project directory.
#[derive(Clone, Debug)]
pub struct Context {
	root: PathBuf,
	create_missing: bool,
}

impl Context {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			create_missing: false,
		}
	}

	/// Let nodes create output files that don't exist yet instead of skipping them.
	pub fn create_missing(mut self, create: bool) -> Self {
		self.create_missing = create;
		self
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn node(&self, path: &str) -> Node {
		Node::new(&self.root, path, self.create_missing)
	}
}
