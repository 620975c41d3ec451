use super::Renderer;
use crate::diagnostics::DiagnosticKind;
use crate::syntax::{TypeParam, TypeRef};

impl Renderer<'_> {
	/// Render a type reference, recursing into array elements and type arguments.
	pub fn render_type(&mut self, ty: &TypeRef) {
		match ty {
			TypeRef::Array { element, dimensions } => {
				self.render_type(element);
				for _ in 0..*dimensions {
					self.out.punct("[]");
				}
			}
			TypeRef::Primitive(name) => self.out.type_name(name, None),
			TypeRef::Void => self.out.type_name("void", None),
			TypeRef::TypeParameter(name) | TypeRef::Wildcard(name) => self.linked_type_name(name),
			TypeRef::Reference { name, arguments } => {
				self.linked_type_name(name);
				if arguments.is_empty() {
					return;
				}
				self.out.punct("<");
				for (i, argument) in arguments.iter().enumerate() {
					if i > 0 {
						self.out.comma();
					}
					self.render_type(argument);
				}
				self.out.punct(">");
			}
			TypeRef::Unsupported(text) => {
				self.report(DiagnosticKind::UnsupportedType, format!("unsupported type shape `{text}` omitted"));
			}
		}
	}

	/// Render a declared type parameter list, `<A, B extends X & Y>`.
	pub fn render_type_params(&mut self, params: &[TypeParam]) {
		if params.is_empty() {
			return;
		}
		self.out.punct("<");
		for (i, param) in params.iter().enumerate() {
			if i > 0 {
				self.out.comma();
			}
			self.linked_type_name(&param.name);
			if param.bounds.is_empty() {
				continue;
			}
			self.out.space();
			self.out.keyword("extends");
			self.out.space();
			for (j, bound) in param.bounds.iter().enumerate() {
				if j > 0 {
					self.out.space();
					self.out.punct("&");
					self.out.space();
				}
				self.render_type(bound);
			}
		}
		self.out.punct(">");
	}

	/// Render `types` separated by `, `.
	pub fn render_type_list(&mut self, types: &[TypeRef]) {
		for (i, ty) in types.iter().enumerate() {
			if i > 0 {
				self.out.comma();
			}
			self.render_type(ty);
		}
	}

	fn linked_type_name(&mut self, name: &str) {
		let id = self.known.lookup(name);
		self.out.type_name(name, id);
	}
}
