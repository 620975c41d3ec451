use crate::model::{Token, TokenKind};

/// Append-only token buffer with helpers for the shapes the renderer emits.
#[derive(Debug, Default)]
pub struct TokenWriter {
	tokens: Vec<Token>,
}

impl TokenWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Tokens written so far.
	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	/// Consume the writer.
	pub fn into_tokens(self) -> Vec<Token> {
		self.tokens
	}

	/// Append a prebuilt token.
	pub fn push(&mut self, token: Token) {
		self.tokens.push(token);
	}

	/// Keyword token.
	pub fn keyword(&mut self, value: &str) {
		self.push(Token::new(TokenKind::Keyword, value));
	}

	/// Punctuation token.
	pub fn punct(&mut self, value: &str) {
		self.push(Token::new(TokenKind::Punctuation, value));
	}

	/// Single space.
	pub fn space(&mut self) {
		self.push(Token::new(TokenKind::Whitespace, " "));
	}

	/// Leading indentation for a line at `depth`; nothing at depth zero.
	pub fn indent(&mut self, depth: usize, width: usize) {
		let columns = depth * width;
		if columns > 0 {
			self.push(Token::new(TokenKind::Whitespace, " ".repeat(columns)));
		}
	}

	/// Line break.
	pub fn newline(&mut self) {
		self.push(Token::new(TokenKind::NewLine, ""));
	}

	/// Type name, linked when `id` is known.
	pub fn type_name(&mut self, value: &str, id: Option<&str>) {
		let token = match id {
			Some(id) => Token::linked(TokenKind::TypeName, value, id),
			None => Token::new(TokenKind::TypeName, value),
		};
		self.push(token);
	}

	/// Member name, linked when `id` is known.
	pub fn member(&mut self, value: &str, id: Option<&str>) {
		let token = match id {
			Some(id) => Token::linked(TokenKind::MemberName, value, id),
			None => Token::new(TokenKind::MemberName, value),
		};
		self.push(token);
	}

	/// Free text.
	pub fn text(&mut self, value: &str) {
		self.push(Token::new(TokenKind::Text, value));
	}

	/// String literal, verbatim.
	pub fn string_literal(&mut self, value: &str) {
		self.push(Token::new(TokenKind::StringLiteral, value));
	}

	/// Each modifier as a keyword followed by a space.
	pub fn modifiers(&mut self, modifiers: &[String]) {
		for modifier in modifiers {
			self.keyword(modifier);
			self.space();
		}
	}

	/// `, ` between items.
	pub fn comma(&mut self) {
		self.punct(",");
		self.space();
	}
}
