//! Lowering of tree-sitter-java parse trees into the owned syntax model.

use std::path::Path;

use tree_house_bindings::{Node, Tree};

use super::{
	Access, CallableDecl, CompilationUnit, DeclKind, Declarator, EnumConstant, FieldDecl, Initializer, Param,
	TypeDecl, TypeParam, TypeRef,
};

/// Node kinds that denote a type in a signature position.
const TYPE_KINDS: &[&str] = &[
	"void_type",
	"integral_type",
	"floating_point_type",
	"boolean_type",
	"type_identifier",
	"scoped_type_identifier",
	"generic_type",
	"array_type",
	"annotated_type",
];

/// Body in which a member is declared; decides implicit access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
	TopLevel,
	Class,
	Interface,
	Enum,
}

/// Lower a cleanly parsed compilation unit.
pub fn lower_unit(path: &Path, text: &str, tree: &Tree) -> CompilationUnit {
	let root = tree.root_node();
	let mut unit = CompilationUnit::new(path, None);

	for child in root.children() {
		if child.kind() == "package_declaration" {
			unit.package = package_name(&child, text);
		}
	}

	for child in root.children() {
		if decl_kind(child.kind()).is_some() {
			let prefix = unit.package.clone().unwrap_or_default();
			if let Some(decl) = lower_type_decl(&child, text, &prefix, Container::TopLevel, &[]) {
				unit.types.push(decl);
			}
		}
	}

	unit
}

fn decl_kind(kind: &str) -> Option<DeclKind> {
	match kind {
		"class_declaration" => Some(DeclKind::Class),
		"interface_declaration" => Some(DeclKind::Interface),
		"enum_declaration" => Some(DeclKind::Enum),
		"record_declaration" => Some(DeclKind::Record),
		"annotation_type_declaration" => Some(DeclKind::Annotation),
		_ => None,
	}
}

fn package_name(node: &Node<'_>, text: &str) -> Option<String> {
	let name = node
		.children()
		.find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))?;
	Some(compact(slice_text(&name, text)?, ""))
}

fn lower_type_decl(
	node: &Node<'_>,
	text: &str,
	prefix: &str,
	container: Container,
	outer_scope: &[String],
) -> Option<TypeDecl> {
	let kind = decl_kind(node.kind())?;
	let name = identifier_text(node, text)?;
	let qualified_name = if prefix.is_empty() {
		name.clone()
	} else {
		format!("{prefix}.{name}")
	};
	let modifiers = modifiers_of(node, text);
	let access = access_of(&modifiers, container, false);

	let mut decl = TypeDecl::new(kind, access, name, qualified_name);
	decl.modifiers = modifiers;

	let mut scope = outer_scope.to_vec();
	if let Some(params) = node.children().find(|c| c.kind() == "type_parameters") {
		decl.type_params = lower_type_params(&params, text, &mut scope);
	}

	for child in node.children() {
		match child.kind() {
			"superclass" => decl.extends.extend(types_in(&child, text, &scope)),
			"extends_interfaces" | "super_interfaces" => {
				let list: Vec<TypeRef> = child
					.children()
					.filter(|c| c.kind() == "type_list")
					.flat_map(|list| types_in(&list, text, &scope))
					.collect();
				if child.kind() == "extends_interfaces" {
					decl.extends.extend(list);
				} else {
					decl.implements.extend(list);
				}
			}
			_ => {}
		}
	}

	let member_container = match kind {
		DeclKind::Interface | DeclKind::Annotation => Container::Interface,
		DeclKind::Enum => Container::Enum,
		DeclKind::Class | DeclKind::Record => Container::Class,
	};
	let body = node.children().find(|c| {
		matches!(
			c.kind(),
			"class_body" | "interface_body" | "enum_body" | "annotation_type_body"
		)
	});
	if let Some(body) = body {
		lower_body(&body, text, &mut decl, member_container, &scope);
	}

	Some(decl)
}

fn lower_body(body: &Node<'_>, text: &str, decl: &mut TypeDecl, container: Container, scope: &[String]) {
	for member in body.children() {
		match member.kind() {
			"enum_constant" => {
				if let Some(constant) = lower_enum_constant(&member, text) {
					decl.enum_constants.push(constant);
				}
			}
			"enum_body_declarations" => lower_body(&member, text, decl, container, scope),
			"field_declaration" | "constant_declaration" => {
				decl.fields.extend(lower_field(&member, text, container, scope));
			}
			"constructor_declaration" => {
				if let Some(ctor) = lower_callable(&member, text, container, scope, true) {
					decl.constructors.push(ctor);
				}
			}
			"method_declaration" | "annotation_type_element_declaration" => {
				if let Some(method) = lower_callable(&member, text, container, scope, false) {
					decl.methods.push(method);
				}
			}
			kind if decl_kind(kind).is_some() => {
				let prefix = decl.qualified_name.clone();
				if let Some(nested) = lower_type_decl(&member, text, &prefix, container, scope) {
					decl.nested.push(nested);
				}
			}
			_ => {}
		}
	}
}

fn lower_enum_constant(node: &Node<'_>, text: &str) -> Option<EnumConstant> {
	let name = identifier_text(node, text)?;
	let arguments = node
		.children()
		.find(|c| c.kind() == "argument_list")
		.and_then(|args| slice_text(&args, text))
		.map(|raw| {
			let raw = raw.trim();
			let inner = raw.strip_prefix('(').unwrap_or(raw);
			let inner = inner.strip_suffix(')').unwrap_or(inner);
			compact(inner, " ")
		});
	Some(EnumConstant { name, arguments })
}

/// Lowers a field declaration, one [`FieldDecl`] per run of declarators sharing a type.
///
/// C-style dimensions on a declarator (`int a, b[];`) belong to that variable only.
fn lower_field(node: &Node<'_>, text: &str, container: Container, scope: &[String]) -> Vec<FieldDecl> {
	let modifiers = modifiers_of(node, text);
	let access = access_of(&modifiers, container, false);
	let Some(ty_node) = node.children().find(|c| TYPE_KINDS.contains(&c.kind())) else {
		return Vec::new();
	};
	let base = lower_type_ref(&ty_node, text, scope);

	let mut fields: Vec<FieldDecl> = Vec::new();
	for (declarator, dims) in node
		.children()
		.filter(|c| c.kind() == "variable_declarator")
		.filter_map(|d| lower_declarator(&d, text))
	{
		let ty = match dims {
			0 => base.clone(),
			extra => with_dimensions(base.clone(), extra),
		};
		match fields.last_mut() {
			Some(last) if last.ty == ty => last.declarators.push(declarator),
			_ => fields.push(FieldDecl {
				access,
				modifiers: modifiers.clone(),
				ty,
				declarators: vec![declarator],
			}),
		}
	}
	fields
}

/// A declarator and the number of C-style dimensions written after its name.
fn lower_declarator(node: &Node<'_>, text: &str) -> Option<(Declarator, usize)> {
	let ident = node.children().find(|c| c.kind() == "identifier")?;
	let name = slice_text(&ident, text)?.to_string();
	let name_end = ident.byte_range().end;
	let dims = node
		.children()
		.find(|c| c.kind() == "dimensions")
		.map_or(0, |d| count_dimensions(&d, text));
	let initializer = node
		.children()
		.find(|c| {
			c.start_byte() >= name_end
				&& !matches!(c.kind(), "dimensions" | "=" | "line_comment" | "block_comment")
		})
		.and_then(|value| {
			let raw = slice_text(&value, text)?;
			Some(Initializer {
				text: compact(raw, " "),
				string_literal: value.kind() == "string_literal",
			})
		});
	Some((Declarator { name, initializer }, dims))
}

fn lower_callable(
	node: &Node<'_>,
	text: &str,
	container: Container,
	outer_scope: &[String],
	constructor: bool,
) -> Option<CallableDecl> {
	let name = identifier_text(node, text)?;
	let modifiers = modifiers_of(node, text);
	let access = access_of(&modifiers, container, constructor);

	let mut scope = outer_scope.to_vec();
	let type_params = node
		.children()
		.find(|c| c.kind() == "type_parameters")
		.map(|params| lower_type_params(&params, text, &mut scope))
		.unwrap_or_default();

	let return_type = if constructor {
		None
	} else {
		let ty = node.children().find(|c| TYPE_KINDS.contains(&c.kind()))?;
		Some(lower_type_ref(&ty, text, &scope))
	};

	let params = node
		.children()
		.find(|c| c.kind() == "formal_parameters")
		.map(|list| lower_params(&list, text, &scope))
		.unwrap_or_default();

	let throws = node
		.children()
		.find(|c| c.kind() == "throws")
		.map(|clause| types_in(&clause, text, &scope))
		.unwrap_or_default();

	Some(CallableDecl {
		access,
		modifiers,
		type_params,
		return_type,
		name,
		params,
		throws,
	})
}

fn lower_params(list: &Node<'_>, text: &str, scope: &[String]) -> Vec<Param> {
	let mut params = Vec::new();
	for param in list.children() {
		let varargs = match param.kind() {
			"formal_parameter" => false,
			"spread_parameter" => true,
			_ => continue,
		};
		let Some(ty_node) = param.children().find(|c| TYPE_KINDS.contains(&c.kind())) else {
			continue;
		};
		let mut ty = lower_type_ref(&ty_node, text, scope);

		let name = if varargs {
			param
				.children()
				.find(|c| c.kind() == "variable_declarator")
				.and_then(|d| identifier_text(&d, text))
		} else {
			if let Some(dims) = param.children().find(|c| c.kind() == "dimensions") {
				ty = with_dimensions(ty, count_dimensions(&dims, text));
			}
			identifier_text(&param, text)
		};
		let Some(name) = name else {
			continue;
		};
		params.push(Param { ty, name, varargs });
	}
	params
}

fn lower_type_params(node: &Node<'_>, text: &str, scope: &mut Vec<String>) -> Vec<TypeParam> {
	let declared: Vec<Node<'_>> = node.children().filter(|c| c.kind() == "type_parameter").collect();
	let names: Vec<Option<String>> = declared
		.iter()
		.map(|param| {
			param
				.children()
				.find(|c| matches!(c.kind(), "type_identifier" | "identifier"))
				.and_then(|ident| slice_text(&ident, text).map(str::to_string))
		})
		.collect();
	scope.extend(names.iter().flatten().cloned());

	declared
		.iter()
		.zip(names)
		.filter_map(|(param, name)| {
			let name = name?;
			let bounds = param
				.children()
				.find(|c| c.kind() == "type_bound")
				.map(|bound| types_in(&bound, text, scope))
				.unwrap_or_default();
			Some(TypeParam { name, bounds })
		})
		.collect()
}

/// Lower every direct child of `node` that is a type.
fn types_in(node: &Node<'_>, text: &str, scope: &[String]) -> Vec<TypeRef> {
	node.children()
		.filter(|c| TYPE_KINDS.contains(&c.kind()))
		.map(|c| lower_type_ref(&c, text, scope))
		.collect()
}

fn lower_type_ref(node: &Node<'_>, text: &str, scope: &[String]) -> TypeRef {
	let raw = slice_text(node, text).unwrap_or_default();
	match node.kind() {
		"void_type" => TypeRef::Void,
		"integral_type" | "floating_point_type" | "boolean_type" => TypeRef::Primitive(raw.trim().to_string()),
		"type_identifier" => {
			let name = raw.trim().to_string();
			if scope.contains(&name) {
				TypeRef::TypeParameter(name)
			} else {
				TypeRef::named(name)
			}
		}
		"scoped_type_identifier" => TypeRef::named(compact(raw, "")),
		"generic_type" => {
			let Some(head) = node
				.children()
				.find(|c| matches!(c.kind(), "type_identifier" | "scoped_type_identifier"))
			else {
				return TypeRef::Unsupported(compact(raw, " "));
			};
			let name = compact(slice_text(&head, text).unwrap_or_default(), "");
			let arguments = node
				.children()
				.filter(|c| c.kind() == "type_arguments")
				.flat_map(|args| {
					args.children()
						.filter(|c| TYPE_KINDS.contains(&c.kind()) || c.kind() == "wildcard")
						.map(|arg| lower_type_ref(&arg, text, scope))
						.collect::<Vec<_>>()
				})
				.collect();
			TypeRef::generic(name, arguments)
		}
		"array_type" => {
			let Some(element) = node.children().find(|c| TYPE_KINDS.contains(&c.kind())) else {
				return TypeRef::Unsupported(compact(raw, " "));
			};
			let dimensions = node
				.children()
				.find(|c| c.kind() == "dimensions")
				.map(|dims| count_dimensions(&dims, text))
				.unwrap_or(1);
			with_dimensions(lower_type_ref(&element, text, scope), dimensions)
		}
		"annotated_type" => match node
			.children()
			.filter(|c| TYPE_KINDS.contains(&c.kind()))
			.last()
		{
			Some(inner) => lower_type_ref(&inner, text, scope),
			None => TypeRef::Unsupported(compact(raw, " ")),
		},
		"wildcard" => TypeRef::Wildcard(compact(raw, " ")),
		_ => TypeRef::Unsupported(compact(raw, " ")),
	}
}

fn with_dimensions(ty: TypeRef, extra: usize) -> TypeRef {
	match ty {
		TypeRef::Array { element, dimensions } => TypeRef::Array {
			element,
			dimensions: dimensions + extra,
		},
		other => TypeRef::Array {
			element: Box::new(other),
			dimensions: extra.max(1),
		},
	}
}

fn count_dimensions(node: &Node<'_>, text: &str) -> usize {
	slice_text(node, text)
		.map(|dims| dims.matches('[').count())
		.unwrap_or(1)
		.max(1)
}

/// Modifier keywords of a declaration with annotations and comments removed.
fn modifiers_of(node: &Node<'_>, text: &str) -> Vec<String> {
	let Some(mods) = node.children().find(|c| c.kind() == "modifiers") else {
		return Vec::new();
	};
	let range = mods.byte_range();
	let (start, end) = (range.start as usize, range.end as usize);

	let mut kept = String::new();
	let mut cursor = start;
	for child in mods.children() {
		if matches!(
			child.kind(),
			"marker_annotation" | "annotation" | "line_comment" | "block_comment"
		) {
			let skip = child.byte_range();
			kept.push_str(text.get(cursor..skip.start as usize).unwrap_or_default());
			kept.push(' ');
			cursor = skip.end as usize;
		}
	}
	kept.push_str(text.get(cursor..end).unwrap_or_default());
	kept.split_whitespace().map(str::to_string).collect()
}

fn access_of(modifiers: &[String], container: Container, constructor: bool) -> Access {
	for modifier in modifiers {
		match modifier.as_str() {
			"public" => return Access::Public,
			"protected" => return Access::Protected,
			"private" => return Access::Private,
			_ => {}
		}
	}
	match container {
		Container::Interface => Access::Public,
		Container::Enum if constructor => Access::Private,
		Container::TopLevel | Container::Class | Container::Enum => Access::PackagePrivate,
	}
}

fn identifier_text(node: &Node<'_>, text: &str) -> Option<String> {
	let ident = node.children().find(|c| c.kind() == "identifier")?;
	Some(slice_text(&ident, text)?.to_string())
}

fn slice_text<'a>(node: &Node<'_>, text: &'a str) -> Option<&'a str> {
	let range = node.byte_range();
	text.get(range.start as usize..range.end as usize)
}

/// Collapse whitespace runs to `sep`.
fn compact(raw: &str, sep: &str) -> String {
	raw.split_whitespace().collect::<Vec<_>>().join(sep)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::syntax::parse::{ParsedSource, parse_source};

	fn lower(src: &str) -> CompilationUnit {
		let ParsedSource::Clean(tree) = parse_source(src).expect("grammar") else {
			panic!("expected a clean parse");
		};
		lower_unit(Path::new("Test.java"), src, &tree)
	}

	#[test]
	fn lowers_package_modifiers_and_members() {
		let unit = lower(
			r#"package com.example;

@Deprecated
public final class Store<K extends Comparable<K>, V> extends Base implements Api, Closeable {
    public static final String NAME = "store", ALIAS = NAME;
    private int hidden;
    protected Store(int size) throws IOException {}
    public <R> List<R> map(Function<V, R> f, String... tags) { return null; }
    int size() { return 0; }
}
"#,
		);
		assert_eq!(unit.package.as_deref(), Some("com.example"));
		let store = &unit.types[0];
		assert_eq!(store.qualified_name, "com.example.Store");
		assert_eq!(store.modifiers, vec!["public", "final"]);
		assert_eq!(store.access, Access::Public);
		assert_eq!(store.type_params.len(), 2);
		assert_eq!(store.type_params[0].bounds[0].to_source(), "Comparable<K>");
		assert_eq!(store.extends, vec![TypeRef::named("Base")]);
		assert_eq!(store.implements.len(), 2);

		let name = &store.fields[0];
		assert_eq!(name.declarators.len(), 2);
		let first = name.declarators[0].initializer.as_ref().unwrap();
		assert_eq!(first.text, "\"store\"");
		assert!(first.string_literal);
		let second = name.declarators[1].initializer.as_ref().unwrap();
		assert_eq!(second.text, "NAME");
		assert!(!second.string_literal);
		assert_eq!(store.fields[1].access, Access::Private);

		let ctor = &store.constructors[0];
		assert_eq!(ctor.access, Access::Protected);
		assert_eq!(ctor.return_type, None);
		assert_eq!(ctor.throws, vec![TypeRef::named("IOException")]);

		let map = &store.methods[0];
		assert_eq!(map.type_params[0].name, "R");
		assert_eq!(
			map.return_type,
			Some(TypeRef::generic("List", vec![TypeRef::TypeParameter("R".to_string())]))
		);
		assert_eq!(map.params[0].ty.to_source(), "Function<V, R>");
		assert!(map.params[1].varargs);
		assert_eq!(map.params[1].name, "tags");

		assert_eq!(store.methods[1].access, Access::PackagePrivate);
	}

	#[test]
	fn interface_members_are_implicitly_public() {
		let unit = lower(
			"package p; interface Shape { double PI = 3.14; double area(); class Unit {} private void helper() {} }",
		);
		let shape = &unit.types[0];
		assert_eq!(shape.access, Access::PackagePrivate);
		assert_eq!(shape.fields[0].access, Access::Public);
		assert_eq!(shape.methods[0].access, Access::Public);
		assert_eq!(shape.methods[1].access, Access::Private);
		assert_eq!(shape.nested[0].access, Access::Public);
		assert_eq!(shape.nested[0].qualified_name, "p.Shape.Unit");
	}

	#[test]
	fn enum_constants_and_constructors() {
		let unit = lower(
			"public enum Level { LOW(1), HIGH(2 ,  3), OFF; Level(int a) {} Level(int a, int b) {} public int weight() { return 0; } }",
		);
		let level = &unit.types[0];
		assert_eq!(unit.package, None);
		assert_eq!(level.kind, DeclKind::Enum);
		let names: Vec<&str> = level.enum_constants.iter().map(|c| c.name.as_str()).collect();
		assert_eq!(names, vec!["LOW", "HIGH", "OFF"]);
		assert_eq!(level.enum_constants[1].arguments.as_deref(), Some("2 , 3"));
		assert_eq!(level.enum_constants[2].arguments, None);
		assert!(level.constructors.iter().all(|c| c.access == Access::Private));
		assert_eq!(level.methods[0].access, Access::Public);
	}

	#[test]
	fn array_dimensions_accumulate() {
		let unit = lower("public class A { public String[][] names; public void take(int values[]) {} }");
		let a = &unit.types[0];
		assert_eq!(a.fields[0].ty.to_source(), "String[][]");
		assert_eq!(a.methods[0].params[0].ty.to_source(), "int[]");
	}

	#[test]
	fn declarator_dimensions_belong_to_their_variable() {
		let unit = lower("public class A { public int counts[]; public int a, b[], c[]; public long[] d, e[]; }");
		let fields = &unit.types[0].fields;
		let shapes: Vec<(String, Vec<&str>)> = fields
			.iter()
			.map(|f| (f.ty.to_source(), f.declarators.iter().map(|d| d.name.as_str()).collect()))
			.collect();
		assert_eq!(
			shapes,
			vec![
				("int[]".to_string(), vec!["counts"]),
				("int".to_string(), vec!["a"]),
				("int[]".to_string(), vec!["b", "c"]),
				("long[]".to_string(), vec!["d"]),
				("long[][]".to_string(), vec!["e"]),
			]
		);
		assert!(fields.iter().all(|f| f.access == Access::Public));
	}

	#[test]
	fn enum_arguments_keep_inner_parentheses() {
		let unit = lower("public enum E { A(foo()), B((1 + 2) * 3), C((x)); }");
		let args: Vec<Option<&str>> = unit.types[0]
			.enum_constants
			.iter()
			.map(|c| c.arguments.as_deref())
			.collect();
		assert_eq!(args, vec![Some("foo()"), Some("(1 + 2) * 3"), Some("(x)")]);
	}

	#[test]
	fn annotations_are_not_modifiers() {
		let unit = lower("public class A { @Override @SuppressWarnings(\"x\") public static String toString() { return \"\"; } }");
		assert_eq!(unit.types[0].methods[0].modifiers, vec!["public", "static"]);
	}
}
