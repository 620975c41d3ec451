use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ApiListingError, Result};

/// Path fragments excluded by default; internal implementation packages are not API.
pub const DEFAULT_EXCLUDED_FRAGMENTS: &[&str] = &["implementation"];

/// File names that are never listed even though they end in `.java`.
const SKIPPED_FILE_NAMES: &[&str] = &["package-info.java", "module-info.java"];

/// Decides which files under an input root are Java sources worth listing.
#[derive(Debug, Clone)]
pub struct SourceFilter {
	excluded_fragments: Vec<String>,
}

impl Default for SourceFilter {
	fn default() -> Self {
		Self {
			excluded_fragments: DEFAULT_EXCLUDED_FRAGMENTS.iter().map(|s| s.to_string()).collect(),
		}
	}
}

impl SourceFilter {
	/// Create a filter with the default exclusions.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the excluded path fragments.
	pub fn with_excluded_fragments<I, S>(mut self, fragments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.excluded_fragments = fragments.into_iter().map(Into::into).collect();
		self
	}

	/// Add one more excluded path fragment.
	pub fn exclude(mut self, fragment: impl Into<String>) -> Self {
		self.excluded_fragments.push(fragment.into());
		self
	}

	/// Fragments currently excluded.
	pub fn excluded_fragments(&self) -> &[String] {
		&self.excluded_fragments
	}

	/// Whether `path` (found under `root`) should be listed.
	///
	/// Exclusion fragments are matched against the path relative to `root`, so the location
	/// of the checkout itself never hides its sources.
	pub fn accepts(&self, root: &Path, path: &Path) -> bool {
		let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
			return false;
		};
		if !name.ends_with(".java") || SKIPPED_FILE_NAMES.contains(&name) {
			return false;
		}
		let relative = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
		!self
			.excluded_fragments
			.iter()
			.any(|fragment| relative.contains(fragment.as_str()))
	}
}

/// Collect the Java sources under `input`, sorted by path.
///
/// `input` may be a single `.java` file, which is returned as-is when the filter accepts it.
pub fn discover(input: &Path, filter: &SourceFilter) -> Result<Vec<PathBuf>> {
	if input.is_file() {
		let root = input.parent().unwrap_or(input);
		if input.extension().is_some_and(|ext| ext == "java") {
			return Ok(if filter.accepts(root, input) {
				vec![input.to_path_buf()]
			} else {
				Vec::new()
			});
		}
		return Err(ApiListingError::InvalidInput(input.to_path_buf()));
	}
	if !input.is_dir() {
		return Err(ApiListingError::InvalidInput(input.to_path_buf()));
	}

	let mut files = Vec::new();
	for entry in WalkDir::new(input).follow_links(false) {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				tracing::warn!(error = %err, "skipping unreadable directory entry");
				continue;
			}
		};
		if entry.file_type().is_dir() {
			continue;
		}
		if filter.accepts(input, entry.path()) {
			files.push(entry.into_path());
		}
	}
	files.sort();
	tracing::debug!(
		count = files.len(),
		root = %input.display(),
		excluded = ?filter.excluded_fragments(),
		"discovered java sources"
	);
	Ok(files)
}
