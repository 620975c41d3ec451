//! Output model of a listing run.
//!
//! The token sequence *is* the rendered document: concatenating every token's value and
//! breaking the line on [`TokenKind::NewLine`] reproduces the source-like text shown to
//! reviewers.

use serde::{Deserialize, Serialize};

/// Classification of a rendered token, used by viewers for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
	/// Language keyword or modifier (`public`, `class`, `extends`).
	Keyword,
	/// Brackets, braces, separators.
	Punctuation,
	/// Indentation and spacing.
	Whitespace,
	/// Line break marker; its value is always empty.
	NewLine,
	/// Reference to a type, optionally linked to its declaration.
	TypeName,
	/// Name of a member (field, constructor, method, enum constant).
	MemberName,
	/// Free text such as parameter names or initializer expressions.
	Text,
	/// A string literal, kept verbatim including its quotes.
	StringLiteral,
}

/// Smallest unit of the rendered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
	/// Highlighting class of the token.
	pub kind: TokenKind,
	/// Literal text of the token.
	pub value: String,
	/// Stable identifier of the declaration this token links to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub navigate_to_id: Option<String>,
}

impl Token {
	/// Create an unlinked token.
	pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
		Self {
			kind,
			value: value.into(),
			navigate_to_id: None,
		}
	}

	/// Create a token that links to the declaration identified by `id`.
	pub fn linked(kind: TokenKind, value: impl Into<String>, id: impl Into<String>) -> Self {
		Self {
			kind,
			value: value.into(),
			navigate_to_id: Some(id.into()),
		}
	}
}

/// Kind of a navigation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
	/// A Java package grouping top-level types.
	Package,
	/// Class declaration.
	Class,
	/// Interface declaration.
	Interface,
	/// Enum declaration.
	Enum,
	/// Any other type-like declaration (records, annotation types).
	Unknown,
}

impl TypeKind {
	/// Lowercase display name of the kind.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Package => "package",
			Self::Class => "class",
			Self::Interface => "interface",
			Self::Enum => "enum",
			Self::Unknown => "unknown",
		}
	}
}

/// Entry of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationNode {
	/// Stable identifier; type nodes share it with the TypeName token of their header.
	pub id: String,
	/// Text shown in the navigation pane.
	pub text: String,
	/// Node classification.
	pub kind: TypeKind,
	/// Nested navigation entries, in discovery order.
	#[serde(default)]
	pub child_items: Vec<NavigationNode>,
}

impl NavigationNode {
	/// Create a leaf node.
	pub fn new(id: impl Into<String>, text: impl Into<String>, kind: TypeKind) -> Self {
		Self {
			id: id.into(),
			text: text.into(),
			kind,
			child_items: Vec::new(),
		}
	}

	/// Visit this node and all descendants depth-first.
	pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a NavigationNode)) {
		visit(self);
		for child in &self.child_items {
			child.walk(visit);
		}
	}
}

/// The complete rendered API of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiListing {
	/// Review name supplied by the caller.
	pub name: String,
	/// Rendered document, in order.
	pub tokens: Vec<Token>,
	/// Navigation roots (one per package, sorted by package name).
	pub navigation: Vec<NavigationNode>,
}

impl ApiListing {
	/// Create an empty listing.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			tokens: Vec::new(),
			navigation: Vec::new(),
		}
	}

	/// Reconstruct the plain text of the listing.
	pub fn to_text(&self) -> String {
		let mut out = String::new();
		for token in &self.tokens {
			match token.kind {
				TokenKind::NewLine => out.push('\n'),
				_ => out.push_str(&token.value),
			}
		}
		out
	}

	/// Every navigation id in the tree, depth-first.
	pub fn navigation_ids(&self) -> Vec<&str> {
		let mut ids = Vec::new();
		for root in &self.navigation {
			root.walk(&mut |node| ids.push(node.id.as_str()));
		}
		ids
	}

	/// Serialize the listing as JSON.
	pub fn to_json(&self, pretty: bool) -> crate::Result<String> {
		let json = if pretty {
			serde_json::to_string_pretty(self)?
		} else {
			serde_json::to_string(self)?
		};
		Ok(json)
	}
}
