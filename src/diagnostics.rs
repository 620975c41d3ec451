//! Non-fatal problems collected during a run.
//!
//! Nothing reported here aborts a listing: the affected file, type reference or registry
//! entry is skipped or resolved by policy, and the run continues.

use std::fmt;
use std::path::{Path, PathBuf};

/// Category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
	/// The file parsed with syntax errors and was skipped.
	ParseFailure,
	/// The file could not be read from disk and was skipped.
	UnreadableFile,
	/// A type reference had a shape the renderer does not know; it was omitted.
	UnsupportedType,
	/// Two public types share a simple name; the later one owns the registry entry.
	AmbiguousTypeName,
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	/// Category of the problem.
	pub kind: DiagnosticKind,
	/// Source file the problem belongs to, when known.
	pub path: Option<PathBuf>,
	/// Human readable description.
	pub message: String,
}

impl Diagnostic {
	/// Create a diagnostic tied to a source file.
	pub fn for_file(kind: DiagnosticKind, path: &Path, message: impl Into<String>) -> Self {
		Self {
			kind,
			path: Some(path.to_path_buf()),
			message: message.into(),
		}
	}

	/// Create a diagnostic without a file.
	pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
		Self {
			kind,
			path: None,
			message: message.into(),
		}
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.path {
			Some(path) => write!(f, "{}: {}", path.display(), self.message),
			None => write!(f, "{}", self.message),
		}
	}
}

/// Append-only collector that mirrors every diagnostic to `tracing`.
#[derive(Debug, Default)]
pub struct Diagnostics {
	entries: Vec<Diagnostic>,
}

impl Diagnostics {
	/// Create an empty collector.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a diagnostic and log it.
	pub fn report(&mut self, diagnostic: Diagnostic) {
		match diagnostic.kind {
			DiagnosticKind::AmbiguousTypeName => tracing::debug!(kind = ?diagnostic.kind, "{diagnostic}"),
			_ => tracing::warn!(kind = ?diagnostic.kind, "{diagnostic}"),
		}
		self.entries.push(diagnostic);
	}

	/// Number of recorded diagnostics.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether nothing was reported.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Consume the collector, yielding diagnostics in report order.
	pub fn into_vec(self) -> Vec<Diagnostic> {
		self.entries
	}
}
