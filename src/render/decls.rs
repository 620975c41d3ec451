use super::Renderer;
use crate::analyse::ids::{member_id, stable_id};
use crate::analyse::navigation::{NavHandle, NavigationBuilder};
use crate::model::{NavigationNode, TypeKind};
use crate::syntax::{CallableDecl, DeclKind, EnumConstant, FieldDecl, TypeDecl};

/// Navigation kind shown for a declaration kind.
pub(crate) fn nav_kind(kind: DeclKind) -> TypeKind {
	match kind {
		DeclKind::Class => TypeKind::Class,
		DeclKind::Interface => TypeKind::Interface,
		DeclKind::Enum => TypeKind::Enum,
		DeclKind::Record | DeclKind::Annotation => TypeKind::Unknown,
	}
}

impl Renderer<'_> {
	/// Render the header line of a type and attach its navigation node under `parent`.
	///
	/// The caller has already emitted the indentation. Returns the handle that becomes the
	/// navigation parent of the type's members.
	pub fn render_type_header(&mut self, decl: &TypeDecl, parent: NavHandle, nav: &mut NavigationBuilder) -> NavHandle {
		let id = stable_id(&decl.qualified_name);

		self.out.modifiers(&decl.modifiers);
		self.out.keyword(decl.kind.keyword());
		self.out.space();
		self.out.type_name(&decl.name, Some(&id));
		self.render_type_params(&decl.type_params);

		if !decl.extends.is_empty() {
			self.out.space();
			self.out.keyword("extends");
			self.out.space();
			self.render_type_list(&decl.extends);
		}
		if !decl.implements.is_empty() {
			self.out.space();
			self.out.keyword("implements");
			self.out.space();
			self.render_type_list(&decl.implements);
		}

		self.out.space();
		self.out.punct("{");
		self.out.newline();

		nav.attach(parent, NavigationNode::new(id, decl.name.as_str(), nav_kind(decl.kind)))
	}

	/// Render one field declaration line.
	pub fn render_field(&mut self, field: &FieldDecl, depth: usize) {
		self.out.indent(depth, self.indent_width);
		self.out.modifiers(&field.modifiers);
		self.render_type(&field.ty);
		self.out.space();
		for (i, declarator) in field.declarators.iter().enumerate() {
			if i > 0 {
				self.out.comma();
			}
			self.out.member(&declarator.name, None);
			if let Some(init) = &declarator.initializer {
				self.out.space();
				self.out.punct("=");
				self.out.space();
				if init.string_literal {
					self.out.string_literal(&init.text);
				} else {
					self.out.text(&init.text);
				}
			}
		}
		self.out.punct(";");
		self.out.newline();
	}

	/// Render a constructor or method signature followed by an empty body.
	pub fn render_callable(&mut self, callable: &CallableDecl, owner_id: &str, depth: usize) {
		self.out.indent(depth, self.indent_width);
		self.out.modifiers(&callable.modifiers);
		if !callable.type_params.is_empty() {
			self.render_type_params(&callable.type_params);
			self.out.space();
		}
		if let Some(ret) = &callable.return_type {
			self.render_type(ret);
			self.out.space();
		}

		let id = member_id(owner_id, callable);
		self.out.member(&callable.name, Some(&id));
		self.out.punct("(");
		for (i, param) in callable.params.iter().enumerate() {
			if i > 0 {
				self.out.comma();
			}
			self.render_type(&param.ty);
			if param.varargs {
				self.out.punct("...");
			}
			self.out.space();
			self.out.text(&param.name);
		}
		self.out.punct(")");
		self.out.space();

		if !callable.throws.is_empty() {
			self.out.keyword("throws");
			self.out.space();
			self.render_type_list(&callable.throws);
			self.out.space();
		}

		self.out.punct("{");
		self.out.space();
		self.out.punct("}");
		self.out.newline();
	}

	/// Render enum constants, one per line; the last one closes the list with `;`.
	pub fn render_enum_constants(&mut self, constants: &[EnumConstant], depth: usize) {
		let last = constants.len().saturating_sub(1);
		for (i, constant) in constants.iter().enumerate() {
			self.out.indent(depth, self.indent_width);
			self.out.member(&constant.name, None);
			if let Some(arguments) = &constant.arguments {
				self.out.punct("(");
				self.out.text(arguments);
				self.out.punct(")");
			}
			self.out.punct(if i == last { ";" } else { "," });
			self.out.newline();
		}
	}
}
