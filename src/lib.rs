//! Core library for apilisting, rendering the public API surface of Java sources.
//!
//! The crate walks parsed Java compilation units, keeps only the declarations that form the
//! public contract (public and protected types and members), and renders them into a flat
//! token stream together with a navigation tree. The resulting [`ApiListing`] is stable
//! across runs, so two listings of different versions of a library can be diffed directly.
//!
//! The high-level entry point is [`Analyser`], which discovers sources, parses them with the
//! bundled tree-sitter front end, builds the known-type registry and renders the listing.
//! Callers that already hold a syntax model can drive [`analyse::Analyser::analyse_units`]
//! directly.

/// Orchestration of a listing run: registry, navigation and the run state machine.
pub mod analyse;

/// Run diagnostics reported for non-fatal problems.
pub mod diagnostics;

/// Error types for fatal failures at the crate boundary.
pub mod error;

/// Output model: tokens, navigation nodes and the listing itself.
pub mod model;

/// Token rendering of types and declarations.
pub mod render;

/// Source discovery for Java trees.
pub mod source;

/// Syntax model consumed by the renderer, and the tree-sitter front end producing it.
pub mod syntax;

pub use crate::analyse::{Analyser, AnalyserOptions, Analysis};
pub use crate::diagnostics::{Diagnostic, DiagnosticKind};
pub use crate::error::{ApiListingError, Result};
pub use crate::model::{ApiListing, NavigationNode, Token, TokenKind, TypeKind};
