//! Orchestration of a listing run.
//!
//! A run moves through `Idle → BuildingRegistry → Rendering → Done`. Every source is parsed
//! and lowered first (in parallel when enabled), the known-type registry is built from all
//! units, and only then does rendering start, so a reference in one file can link to a type
//! declared in any other.

/// Stable identifiers for packages, types and members.
pub mod ids;
/// Arena-backed navigation tree builder.
pub mod navigation;
/// Known-type registry built before rendering.
pub mod registry;
/// Access-level inclusion rule.
pub mod visibility;

use std::fmt;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use self::navigation::NavigationBuilder;
use self::registry::RegistryBuilder;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::error::Result;
use crate::model::ApiListing;
use crate::render::{DEFAULT_INDENT_WIDTH, Renderer};
use crate::source::{SourceFilter, discover};
use crate::syntax::parse::ParsedSource;
use crate::syntax::{CompilationUnit, lower_unit, parse_source};

/// Listing name used when the caller does not supply one.
pub const DEFAULT_LISTING_NAME: &str = "api";

/// Knobs for a listing run.
#[derive(Debug, Clone)]
pub struct AnalyserOptions {
	/// Name stored on the listing.
	listing_name: String,
	/// Spaces per indentation level.
	indent_width: usize,
	/// Parse sources on the rayon pool.
	parallel: bool,
	/// Which discovered files are listed.
	source_filter: SourceFilter,
}

impl Default for AnalyserOptions {
	fn default() -> Self {
		Self {
			listing_name: DEFAULT_LISTING_NAME.to_string(),
			indent_width: DEFAULT_INDENT_WIDTH,
			parallel: true,
			source_filter: SourceFilter::default(),
		}
	}
}

impl AnalyserOptions {
	/// Options with the defaults: four-space indent, parallel parsing, default exclusions.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the name stored on the resulting listing.
	pub fn with_listing_name(mut self, name: impl Into<String>) -> Self {
		self.listing_name = name.into();
		self
	}

	/// Sets the number of spaces per indentation level.
	pub fn with_indent_width(mut self, width: usize) -> Self {
		self.indent_width = width;
		self
	}

	/// Replaces the path fragments that exclude files from discovery.
	pub fn with_excluded_fragments<I, S>(mut self, fragments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.source_filter = self.source_filter.with_excluded_fragments(fragments);
		self
	}

	/// Enables or disables parallel parsing.
	pub fn with_parallel(mut self, parallel: bool) -> Self {
		self.parallel = parallel;
		self
	}

	/// Replaces the discovery filter.
	pub fn with_source_filter(mut self, filter: SourceFilter) -> Self {
		self.source_filter = filter;
		self
	}
}

/// Result of a run: the listing plus everything that was skipped along the way.
#[derive(Debug, Clone)]
pub struct Analysis {
	/// The rendered listing.
	pub listing: ApiListing,
	/// Non-fatal problems, in the order they were found.
	pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
	Idle,
	BuildingRegistry,
	Rendering,
	Done,
}

impl fmt::Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Idle => "idle",
			Self::BuildingRegistry => "building-registry",
			Self::Rendering => "rendering",
			Self::Done => "done",
		};
		f.write_str(name)
	}
}

struct Run {
	phase: Phase,
}

impl Run {
	fn new() -> Self {
		Self { phase: Phase::Idle }
	}

	fn advance(&mut self, next: Phase) {
		debug!(from = %self.phase, to = %next, "listing phase");
		self.phase = next;
	}
}

/// Outcome of loading one file.
enum Loaded {
	Unit(CompilationUnit),
	Skipped(Diagnostic),
}

/// Produces an [`ApiListing`] from Java sources.
#[derive(Debug, Clone, Default)]
pub struct Analyser {
	options: AnalyserOptions,
}

impl Analyser {
	/// Create an analyser with the given options.
	pub fn new(options: AnalyserOptions) -> Self {
		Self { options }
	}

	/// Discover, parse and render every Java source under `input`.
	pub fn analyse_path(&self, input: &Path) -> Result<Analysis> {
		let files = discover(input, &self.options.source_filter)?;
		let loaded = self.load_all(&files, |path| load_file(path))?;
		Ok(self.finish_loaded(loaded))
	}

	/// Parse and render in-memory sources keyed by their path.
	pub fn analyse_sources(&self, sources: &[(PathBuf, String)]) -> Result<Analysis> {
		let loaded = self.load_all(sources, |(path, text)| load_text(path, text))?;
		Ok(self.finish_loaded(loaded))
	}

	/// Render an already lowered syntax model.
	pub fn analyse_units(&self, units: Vec<CompilationUnit>) -> Analysis {
		self.render(units, Diagnostics::new())
	}

	fn load_all<T, F>(&self, inputs: &[T], load: F) -> Result<Vec<Loaded>>
	where
		T: Sync,
		F: Fn(&T) -> Result<Loaded> + Sync,
	{
		if self.options.parallel {
			inputs.par_iter().map(&load).collect()
		} else {
			inputs.iter().map(&load).collect()
		}
	}

	fn finish_loaded(&self, loaded: Vec<Loaded>) -> Analysis {
		let mut diagnostics = Diagnostics::new();
		let mut units = Vec::with_capacity(loaded.len());
		for outcome in loaded {
			match outcome {
				Loaded::Unit(unit) => units.push(unit),
				Loaded::Skipped(diagnostic) => diagnostics.report(diagnostic),
			}
		}
		self.render(units, diagnostics)
	}

	fn render(&self, mut units: Vec<CompilationUnit>, mut diagnostics: Diagnostics) -> Analysis {
		let mut run = Run::new();
		units.sort_by(|a, b| a.path.cmp(&b.path));

		run.advance(Phase::BuildingRegistry);
		let mut builder = RegistryBuilder::new();
		for unit in &units {
			builder.add_unit(unit);
		}
		let known = builder.build();
		for collision in known.collisions() {
			diagnostics.report(Diagnostic::new(
				DiagnosticKind::AmbiguousTypeName,
				format!(
					"simple name `{}` declared by both `{}` and `{}`; links resolve to `{}`",
					collision.name, collision.previous, collision.current, collision.current
				),
			));
		}
		debug!(types = known.len(), units = units.len(), "registry built");
		if known.is_empty() {
			debug!("no public or protected types found");
		}

		run.advance(Phase::Rendering);
		let mut nav = NavigationBuilder::with_packages(known.packages());
		let mut renderer = Renderer::new(&known, self.options.indent_width, &mut diagnostics);
		for unit in &units {
			renderer.render_unit(unit, &mut nav);
		}
		let tokens = renderer.finish();
		if !diagnostics.is_empty() {
			debug!(count = diagnostics.len(), "diagnostics collected");
		}

		run.advance(Phase::Done);
		let mut listing = ApiListing::new(self.options.listing_name.clone());
		listing.tokens = tokens;
		listing.navigation = nav.finish();
		Analysis {
			listing,
			diagnostics: diagnostics.into_vec(),
		}
	}
}

fn load_file(path: &Path) -> Result<Loaded> {
	match std::fs::read_to_string(path) {
		Ok(text) => load_text(path, &text),
		Err(err) => Ok(Loaded::Skipped(Diagnostic::for_file(
			DiagnosticKind::UnreadableFile,
			path,
			format!("could not read file: {err}"),
		))),
	}
}

fn load_text(path: &Path, text: &str) -> Result<Loaded> {
	match parse_source(text)? {
		ParsedSource::Clean(tree) => Ok(Loaded::Unit(lower_unit(path, text, &tree))),
		ParsedSource::Failed(offset) => Ok(Loaded::Skipped(Diagnostic::for_file(
			DiagnosticKind::ParseFailure,
			path,
			format!("syntax error near line {}; file skipped", line_of(text, offset)),
		))),
	}
}

/// One-based line number of a byte offset.
fn line_of(text: &str, offset: usize) -> usize {
	let end = offset.min(text.len());
	text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
