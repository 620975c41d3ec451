//! Token rendering of the visible API.
//!
//! [`Renderer`] owns the output buffer and borrows the frozen [`KnownTypes`] registry. The
//! traversal threads indentation depth and the navigation parent through its recursion as
//! plain arguments; the renderer itself only carries run-wide state.

mod decls;
mod traverse;
mod types;
/// Token buffer and emission helpers.
pub mod writer;

use std::path::{Path, PathBuf};

pub use self::writer::TokenWriter;
use crate::analyse::registry::KnownTypes;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::model::Token;

/// Default number of spaces per indentation level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Renders compilation units into a single token stream.
pub struct Renderer<'a> {
	/// Registry used to link type references.
	known: &'a KnownTypes,
	/// Spaces per indentation level.
	indent_width: usize,
	/// Output buffer.
	out: TokenWriter,
	/// Sink for non-fatal problems.
	diagnostics: &'a mut Diagnostics,
	/// File currently being rendered, for diagnostics.
	current_file: Option<PathBuf>,
}

impl<'a> Renderer<'a> {
	/// Create a renderer over a frozen registry.
	pub fn new(known: &'a KnownTypes, indent_width: usize, diagnostics: &'a mut Diagnostics) -> Self {
		Self {
			known,
			indent_width,
			out: TokenWriter::new(),
			diagnostics,
			current_file: None,
		}
	}

	/// Tokens rendered so far.
	pub fn tokens(&self) -> &[Token] {
		self.out.tokens()
	}

	/// Consume the renderer, yielding the token stream.
	pub fn finish(self) -> Vec<Token> {
		self.out.into_tokens()
	}

	fn report(&mut self, kind: DiagnosticKind, message: String) {
		let diagnostic = match self.current_file.as_deref() {
			Some(path) => Diagnostic::for_file(kind, path, message),
			None => Diagnostic::new(kind, message),
		};
		self.diagnostics.report(diagnostic);
	}

	fn set_current_file(&mut self, path: &Path) {
		self.current_file = Some(path.to_path_buf());
	}
}
