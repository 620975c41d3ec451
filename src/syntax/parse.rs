use std::ops::Range;
use std::path::Path;

use tree_house_bindings::{Grammar, Input, Node, Parser, Tree};

use crate::error::{ApiListingError, Result};

/// Outcome of parsing a single file.
pub enum ParsedSource {
	/// The tree is free of error and missing nodes.
	Clean(Tree),
	/// The parser had to recover; the earliest problem starts at this byte offset.
	Failed(usize),
}

/// Read and parse a Java file.
pub fn parse_file(path: &Path) -> Result<(String, ParsedSource)> {
	let text = std::fs::read_to_string(path)
		.map_err(|e| ApiListingError::io(format!("failed to read source file '{}'", path.display()), e))?;
	let parsed = parse_source(&text)?;
	Ok((text, parsed))
}

/// Parse Java source text.
pub fn parse_source(text: &str) -> Result<ParsedSource> {
	let grammar =
		Grammar::try_from(tree_sitter_java::LANGUAGE).map_err(|e| ApiListingError::Grammar(e.to_string()))?;
	let mut parser = Parser::new();
	parser.set_grammar(grammar).map_err(|e| ApiListingError::Grammar(e.to_string()))?;

	let Some(tree) = parser.parse(JavaText(text), None) else {
		return Ok(ParsedSource::Failed(0));
	};
	match first_recovery(tree.root_node()) {
		Some(offset) => Ok(ParsedSource::Failed(offset)),
		None => Ok(ParsedSource::Clean(tree)),
	}
}

/// Earliest `ERROR` or inserted (missing) node in the tree.
///
/// Expression nesting in method bodies and initializers is unbounded, so the walk keeps its
/// own stack instead of recursing.
fn first_recovery(root: Node<'_>) -> Option<usize> {
	let mut earliest: Option<u32> = None;
	let mut pending = vec![root];
	while let Some(node) = pending.pop() {
		if node.kind() == "ERROR" || node.is_missing() {
			let start = node.start_byte();
			earliest = Some(earliest.map_or(start, |seen| seen.min(start)));
			continue;
		}
		pending.extend(node.children());
	}
	earliest.map(|offset| offset as usize)
}

/// Whole source text handed to the parser as a single chunk.
struct JavaText<'a>(&'a str);

impl<'a> Input for JavaText<'a> {
	// `&str` is a one-chunk cursor at offset zero, so every position is already in view.
	type Cursor = &'a str;

	fn cursor_at(&mut self, _offset: u32) -> &mut Self::Cursor {
		&mut self.0
	}

	fn eq(&mut self, a: Range<u32>, b: Range<u32>) -> bool {
		let bytes = self.0.as_bytes();
		let a = bytes.get(a.start as usize..a.end as usize);
		a.is_some() && a == bytes.get(b.start as usize..b.end as usize)
	}
}
