use std::path::PathBuf;

/// Aggregate errors produced by the apilisting API.
///
/// Only failures at the crate boundary are fatal. Problems inside individual source files
/// are reported as [`crate::Diagnostic`]s and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ApiListingError {
	/// Failed to perform IO operations.
	#[error("{context}: {source}")]
	Io {
		/// What was being attempted when the failure happened.
		context: String,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// The input path does not point at a Java file or a directory.
	#[error("input '{}' is neither a Java source file nor a directory", .0.display())]
	InvalidInput(PathBuf),
	/// Failed to encode the listing as JSON.
	#[error("failed to serialize listing: {0}")]
	Serialization(#[from] serde_json::Error),
	/// The Java grammar could not be loaded into the parser.
	#[error("failed to load Java grammar: {0}")]
	Grammar(String),
}

impl ApiListingError {
	/// Wrap an IO error with a short description of the failed operation.
	pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
		Self::Io {
			context: context.into(),
			source,
		}
	}
}

/// Result type returned by the apilisting library.
pub type Result<T> = std::result::Result<T, ApiListingError>;
