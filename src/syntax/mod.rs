//! Owned syntax model of Java compilation units.
//!
//! This is the boundary between the parser and the renderer. The bundled front end
//! ([`parse`] + [`lower`]) produces it from source text with tree-sitter, but any producer
//! that fills these types can drive the renderer.

pub mod lower;
pub mod parse;

use std::path::{Path, PathBuf};

pub use self::lower::lower_unit;
pub use self::parse::{parse_file, parse_source};

/// Declared (or implied) access level of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
	/// `public`.
	Public,
	/// `protected`.
	Protected,
	/// No access modifier in a context where that means package visibility.
	PackagePrivate,
	/// `private`.
	Private,
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
	/// `class`.
	Class,
	/// `interface`.
	Interface,
	/// `enum`.
	Enum,
	/// `record`.
	Record,
	/// `@interface`.
	Annotation,
}

impl DeclKind {
	/// Keyword introducing the declaration.
	pub fn keyword(self) -> &'static str {
		match self {
			Self::Class => "class",
			Self::Interface => "interface",
			Self::Enum => "enum",
			Self::Record => "record",
			Self::Annotation => "@interface",
		}
	}
}

/// Reference to a type, as written in a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
	/// `Element[]...`; `dimensions` counts the bracket pairs.
	Array {
		/// Innermost element type.
		element: Box<TypeRef>,
		/// Number of `[]` pairs, at least one.
		dimensions: usize,
	},
	/// `int`, `boolean`, `double` and friends.
	Primitive(String),
	/// `void`.
	Void,
	/// Class or interface type, optionally parameterized.
	Reference {
		/// Name as written, possibly qualified (`Map.Entry`).
		name: String,
		/// Type arguments in order; empty for raw or plain types.
		arguments: Vec<TypeRef>,
	},
	/// Use of a type variable that is in scope (`T`).
	TypeParameter(String),
	/// `?`, `? extends X`, `? super X`, kept as written.
	Wildcard(String),
	/// A shape the front end could not classify; carries the raw source text.
	Unsupported(String),
}

impl TypeRef {
	/// Plain, unparameterized reference type.
	pub fn named(name: impl Into<String>) -> Self {
		Self::Reference {
			name: name.into(),
			arguments: Vec::new(),
		}
	}

	/// Parameterized reference type.
	pub fn generic(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
		Self::Reference {
			name: name.into(),
			arguments,
		}
	}

	/// Source-like text of the type.
	pub fn to_source(&self) -> String {
		match self {
			Self::Array { element, dimensions } => format!("{}{}", element.to_source(), "[]".repeat(*dimensions)),
			Self::Primitive(text) | Self::TypeParameter(text) | Self::Wildcard(text) | Self::Unsupported(text) => {
				text.clone()
			}
			Self::Void => "void".to_string(),
			Self::Reference { name, arguments } if arguments.is_empty() => name.clone(),
			Self::Reference { name, arguments } => {
				let args: Vec<String> = arguments.iter().map(TypeRef::to_source).collect();
				format!("{name}<{}>", args.join(", "))
			}
		}
	}
}

/// Declared type parameter (`T extends Comparable<T>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
	/// Name of the type variable.
	pub name: String,
	/// Upper bounds, in order.
	pub bounds: Vec<TypeRef>,
}

/// One variable within a field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarator {
	/// Variable name.
	pub name: String,
	/// Initializer expression text, when present.
	pub initializer: Option<Initializer>,
}

/// Initializer expression of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initializer {
	/// Expression source text.
	pub text: String,
	/// Whether the expression is a single string literal.
	pub string_literal: bool,
}

/// Field (or interface constant) declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
	/// Effective access.
	pub access: Access,
	/// Modifier keywords in source order, annotations excluded.
	pub modifiers: Vec<String>,
	/// Declared type shared by all declarators, trailing `[]` after a name included.
	pub ty: TypeRef,
	/// One or more declared variables.
	pub declarators: Vec<Declarator>,
}

/// Formal parameter of a constructor or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
	/// Parameter type.
	pub ty: TypeRef,
	/// Parameter name.
	pub name: String,
	/// Whether this is a trailing varargs parameter.
	pub varargs: bool,
}

/// Constructor or method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableDecl {
	/// Effective access.
	pub access: Access,
	/// Modifier keywords in source order, annotations excluded.
	pub modifiers: Vec<String>,
	/// Declared type parameters.
	pub type_params: Vec<TypeParam>,
	/// Return type; `None` for constructors.
	pub return_type: Option<TypeRef>,
	/// Member name (the type name for constructors).
	pub name: String,
	/// Formal parameters.
	pub params: Vec<Param>,
	/// Declared thrown types.
	pub throws: Vec<TypeRef>,
}

/// Enum constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
	/// Constant name.
	pub name: String,
	/// Constructor argument text without the surrounding parentheses.
	pub arguments: Option<String>,
}

/// Class, interface, enum, record or annotation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
	/// Effective access.
	pub access: Access,
	/// Modifier keywords in source order, annotations excluded.
	pub modifiers: Vec<String>,
	/// Declaration kind.
	pub kind: DeclKind,
	/// Simple name.
	pub name: String,
	/// Fully-qualified name, including enclosing types.
	pub qualified_name: String,
	/// Declared type parameters.
	pub type_params: Vec<TypeParam>,
	/// Supertypes after `extends`; at most one for classes.
	pub extends: Vec<TypeRef>,
	/// Interfaces after `implements`.
	pub implements: Vec<TypeRef>,
	/// Enum constants in source order.
	pub enum_constants: Vec<EnumConstant>,
	/// Fields in source order.
	pub fields: Vec<FieldDecl>,
	/// Constructors in source order.
	pub constructors: Vec<CallableDecl>,
	/// Methods in source order.
	pub methods: Vec<CallableDecl>,
	/// Member types in source order.
	pub nested: Vec<TypeDecl>,
}

impl TypeDecl {
	/// Create an empty declaration; members are filled in by the producer.
	pub fn new(kind: DeclKind, access: Access, name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
		Self {
			access,
			modifiers: Vec::new(),
			kind,
			name: name.into(),
			qualified_name: qualified_name.into(),
			type_params: Vec::new(),
			extends: Vec::new(),
			implements: Vec::new(),
			enum_constants: Vec::new(),
			fields: Vec::new(),
			constructors: Vec::new(),
			methods: Vec::new(),
			nested: Vec::new(),
		}
	}
}

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
	/// Path the unit was read from; orders rendering.
	pub path: PathBuf,
	/// Declared package, `None` for the default package.
	pub package: Option<String>,
	/// Top-level type declarations in source order.
	pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
	/// Create an empty unit.
	pub fn new(path: impl AsRef<Path>, package: Option<String>) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			package,
			types: Vec::new(),
		}
	}
}
