use super::Renderer;
use crate::analyse::ids::{DEFAULT_PACKAGE, stable_id};
use crate::analyse::navigation::{NavHandle, NavigationBuilder};
use crate::analyse::visibility::is_included;
use crate::syntax::{CompilationUnit, TypeDecl};

impl Renderer<'_> {
	/// Render every visible top-level type of `unit`, in source order.
	///
	/// Navigation nodes are attached under the unit's package root, which must already exist
	/// in `nav` for any package that owns a visible type.
	pub fn render_unit(&mut self, unit: &CompilationUnit, nav: &mut NavigationBuilder) {
		self.set_current_file(&unit.path);
		let package = unit.package.as_deref().unwrap_or(DEFAULT_PACKAGE);
		let Some(root) = nav.package(package) else {
			tracing::trace!(path = %unit.path.display(), "no visible types");
			return;
		};
		for decl in &unit.types {
			self.render_type_decl(decl, 0, root, nav);
		}
	}

	/// Render one type and everything visible inside it.
	///
	/// Body order is fixed: enum constants, fields, constructors, methods, then member types.
	pub fn render_type_decl(&mut self, decl: &TypeDecl, depth: usize, parent: NavHandle, nav: &mut NavigationBuilder) {
		if !is_included(decl.access) {
			return;
		}

		self.out.indent(depth, self.indent_width);
		let handle = self.render_type_header(decl, parent, nav);
		let owner_id = stable_id(&decl.qualified_name);
		let inner = depth + 1;

		self.render_enum_constants(&decl.enum_constants, inner);
		for field in decl.fields.iter().filter(|f| is_included(f.access)) {
			self.render_field(field, inner);
		}
		for constructor in decl.constructors.iter().filter(|c| is_included(c.access)) {
			self.render_callable(constructor, &owner_id, inner);
		}
		for method in decl.methods.iter().filter(|m| is_included(m.access)) {
			self.render_callable(method, &owner_id, inner);
		}
		for nested in &decl.nested {
			self.render_type_decl(nested, inner, handle, nav);
		}

		self.out.indent(depth, self.indent_width);
		self.out.punct("}");
		self.out.newline();
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::analyse::registry::RegistryBuilder;
	use crate::diagnostics::Diagnostics;
	use crate::model::{TokenKind, TypeKind};
	use crate::syntax::{Access, CallableDecl, DeclKind, Declarator, EnumConstant, FieldDecl, TypeRef};

	fn field(access: Access, ty: &str, name: &str) -> FieldDecl {
		FieldDecl {
			access,
			modifiers: modifiers_for(access),
			ty: TypeRef::named(ty),
			declarators: vec![Declarator {
				name: name.to_string(),
				initializer: None,
			}],
		}
	}

	fn callable(access: Access, ret: Option<&str>, name: &str) -> CallableDecl {
		CallableDecl {
			access,
			modifiers: modifiers_for(access),
			type_params: Vec::new(),
			return_type: ret.map(TypeRef::named),
			name: name.to_string(),
			params: Vec::new(),
			throws: Vec::new(),
		}
	}

	fn modifiers_for(access: Access) -> Vec<String> {
		match access {
			Access::Public => vec!["public".to_string()],
			Access::Protected => vec!["protected".to_string()],
			Access::Private => vec!["private".to_string()],
			Access::PackagePrivate => Vec::new(),
		}
	}

	fn render(units: &[CompilationUnit]) -> (String, Vec<crate::model::NavigationNode>) {
		let mut builder = RegistryBuilder::new();
		for unit in units {
			builder.add_unit(unit);
		}
		let known = builder.build();
		let mut nav = NavigationBuilder::with_packages(known.packages());
		let mut diagnostics = Diagnostics::new();
		let mut renderer = Renderer::new(&known, 4, &mut diagnostics);
		for unit in units {
			renderer.render_unit(unit, &mut nav);
		}
		let text = renderer
			.finish()
			.iter()
			.map(|t| if t.kind == TokenKind::NewLine { "\n" } else { t.value.as_str() })
			.collect();
		(text, nav.finish())
	}

	#[test]
	fn simple_public_class() {
		let mut person = TypeDecl::new(DeclKind::Class, Access::Public, "Person", "p.Person");
		person.modifiers = vec!["public".to_string()];
		person.fields.push(field(Access::Public, "String", "name"));
		person.constructors.push(callable(Access::Public, None, "Person"));
		person.methods.push(callable(Access::Public, Some("String"), "getName"));
		let mut unit = CompilationUnit::new("p/Person.java", Some("p".to_string()));
		unit.types.push(person);

		let (text, nav) = render(&[unit]);
		assert_eq!(
			text,
			"public class Person {\n    public String name;\n    public Person() { }\n    public String getName() { }\n}\n"
		);
		assert_eq!(nav.len(), 1);
		assert_eq!(nav[0].kind, TypeKind::Package);
		assert_eq!(nav[0].child_items.len(), 1);
		assert_eq!(nav[0].child_items[0].id, "p.Person");
	}

	#[test]
	fn private_nested_types_are_skipped_entirely() {
		let mut outer = TypeDecl::new(DeclKind::Class, Access::Public, "Outer", "p.Outer");
		let mut hidden = TypeDecl::new(DeclKind::Class, Access::Private, "Hidden", "p.Outer.Hidden");
		hidden.fields.push(field(Access::Public, "int", "leak"));
		hidden
			.nested
			.push(TypeDecl::new(DeclKind::Class, Access::Public, "Deeper", "p.Outer.Hidden.Deeper"));
		outer.nested.push(hidden);
		outer
			.nested
			.push(TypeDecl::new(DeclKind::Interface, Access::Public, "Visible", "p.Outer.Visible"));
		let mut unit = CompilationUnit::new("p/Outer.java", Some("p".to_string()));
		unit.types.push(outer);

		let (text, nav) = render(&[unit]);
		assert!(!text.contains("Hidden"));
		assert!(!text.contains("leak"));
		assert!(!text.contains("Deeper"));
		assert!(text.contains("    interface Visible {\n    }\n"));

		let outer_nav = &nav[0].child_items[0];
		assert_eq!(outer_nav.child_items.len(), 1);
		assert_eq!(outer_nav.child_items[0].id, "p.Outer.Visible");
		assert_eq!(outer_nav.child_items[0].kind, TypeKind::Interface);
	}

	#[test]
	fn body_order_is_fixed_regardless_of_declaration_order() {
		let mut color = TypeDecl::new(DeclKind::Enum, Access::Public, "Color", "p.Color");
		color
			.nested
			.push(TypeDecl::new(DeclKind::Class, Access::Public, "Nested", "p.Color.Nested"));
		color.methods.push(callable(Access::Public, Some("int"), "rgb"));
		color.constructors.push(callable(Access::Protected, None, "Color"));
		color.fields.push(field(Access::Public, "int", "value"));
		color.fields.push(field(Access::PackagePrivate, "int", "internal"));
		color.enum_constants = vec![
			EnumConstant {
				name: "RED".to_string(),
				arguments: None,
			},
			EnumConstant {
				name: "BLUE".to_string(),
				arguments: None,
			},
		];
		let mut unit = CompilationUnit::new("p/Color.java", Some("p".to_string()));
		unit.types.push(color);

		let (text, _) = render(&[unit]);
		let position = |needle: &str| text.find(needle).unwrap();
		assert!(position("RED,") < position("BLUE;"));
		assert!(position("BLUE;") < position("int value;"));
		assert!(position("int value;") < position("Color() { }"));
		assert!(position("Color() { }") < position("rgb()"));
		assert!(position("rgb()") < position("class Nested"));
		assert!(!text.contains("internal"));
	}

	#[test]
	fn cross_file_references_link_to_types_rendered_later() {
		let mut api = TypeDecl::new(DeclKind::Interface, Access::Public, "Api", "a.Api");
		api.methods.push(callable(Access::Public, Some("Widget"), "widget"));
		let mut first = CompilationUnit::new("a/Api.java", Some("a".to_string()));
		first.types.push(api);
		let mut second = CompilationUnit::new("z/Widget.java", Some("z".to_string()));
		second
			.types
			.push(TypeDecl::new(DeclKind::Class, Access::Public, "Widget", "z.Widget"));

		let units = [first, second];
		let mut builder = RegistryBuilder::new();
		for unit in &units {
			builder.add_unit(unit);
		}
		let known = builder.build();
		let mut nav = NavigationBuilder::with_packages(known.packages());
		let mut diagnostics = Diagnostics::new();
		let mut renderer = Renderer::new(&known, 4, &mut diagnostics);
		for unit in &units {
			renderer.render_unit(unit, &mut nav);
		}
		let tokens = renderer.finish();
		let linked: Vec<&str> = tokens
			.iter()
			.filter(|t| t.value == "Widget" && t.kind == TokenKind::TypeName)
			.filter_map(|t| t.navigate_to_id.as_deref())
			.collect();
		assert_eq!(linked, vec!["z.Widget", "z.Widget"]);
	}
}
