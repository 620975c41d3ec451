use std::collections::{BTreeMap, BTreeSet};

use super::ids::{DEFAULT_PACKAGE, stable_id};
use super::visibility::is_included;
use crate::syntax::{CompilationUnit, TypeDecl};

/// A simple name that was bound to more than one public type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
	/// The contested simple name.
	pub name: String,
	/// Id that was overwritten.
	pub previous: String,
	/// Id that now owns the name.
	pub current: String,
}

/// Immutable mapping from simple type names to stable ids, plus the packages that own
/// at least one visible type.
#[derive(Debug, Clone, Default)]
pub struct KnownTypes {
	types: BTreeMap<String, String>,
	packages: BTreeSet<String>,
	collisions: Vec<Collision>,
}

impl KnownTypes {
	/// Id registered for a simple name.
	pub fn lookup(&self, name: &str) -> Option<&str> {
		self.types.get(name).map(String::as_str)
	}

	/// Package names with visible types, sorted.
	pub fn packages(&self) -> impl Iterator<Item = &str> {
		self.packages.iter().map(String::as_str)
	}

	/// Overwrites that happened while building, in the order they occurred.
	pub fn collisions(&self) -> &[Collision] {
		&self.collisions
	}

	/// Number of registered simple names.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Whether no type was registered.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}

/// Collects visible type declarations across every unit before rendering starts.
///
/// Units must be added in rendering order; when two types share a simple name the one
/// added last owns the entry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
	known: KnownTypes,
}

impl RegistryBuilder {
	/// Create an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register every visible type declared in `unit`, depth-first.
	pub fn add_unit(&mut self, unit: &CompilationUnit) -> &mut Self {
		let package = unit.package.as_deref().unwrap_or(DEFAULT_PACKAGE);
		for decl in &unit.types {
			self.add_type(package, decl);
		}
		self
	}

	fn add_type(&mut self, package: &str, decl: &TypeDecl) {
		if !is_included(decl.access) {
			return;
		}

		let id = stable_id(&decl.qualified_name);
		if let Some(previous) = self.known.types.insert(decl.name.clone(), id.clone())
			&& previous != id
		{
			self.known.collisions.push(Collision {
				name: decl.name.clone(),
				previous,
				current: id,
			});
		}
		self.known.packages.insert(package.to_string());

		for nested in &decl.nested {
			self.add_type(package, nested);
		}
	}

	/// Freeze the registry.
	pub fn build(self) -> KnownTypes {
		self.known
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::syntax::{Access, DeclKind};

	fn unit(path: &str, package: Option<&str>, types: Vec<TypeDecl>) -> CompilationUnit {
		let mut unit = CompilationUnit::new(path, package.map(str::to_string));
		unit.types = types;
		unit
	}

	#[test]
	fn registers_visible_types_and_nested_types() {
		let mut outer = TypeDecl::new(DeclKind::Class, Access::Public, "Outer", "a.Outer");
		outer
			.nested
			.push(TypeDecl::new(DeclKind::Enum, Access::Protected, "Mode", "a.Outer.Mode"));
		let mut hidden = TypeDecl::new(DeclKind::Class, Access::Private, "Hidden", "a.Outer.Hidden");
		hidden
			.nested
			.push(TypeDecl::new(DeclKind::Class, Access::Public, "Deep", "a.Outer.Hidden.Deep"));
		outer.nested.push(hidden);

		let mut builder = RegistryBuilder::new();
		builder.add_unit(&unit("A.java", Some("a"), vec![outer]));
		let known = builder.build();

		assert_eq!(known.lookup("Outer"), Some("a.Outer"));
		assert_eq!(known.lookup("Mode"), Some("a.Outer.Mode"));
		assert_eq!(known.lookup("Hidden"), None);
		assert_eq!(known.lookup("Deep"), None);
		assert_eq!(known.len(), 2);
		assert_eq!(known.packages().collect::<Vec<_>>(), vec!["a"]);
	}

	#[test]
	fn later_units_win_simple_name_collisions() {
		let first = unit(
			"a/Node.java",
			Some("a"),
			vec![TypeDecl::new(DeclKind::Class, Access::Public, "Node", "a.Node")],
		);
		let second = unit(
			"b/Node.java",
			Some("b"),
			vec![TypeDecl::new(DeclKind::Interface, Access::Public, "Node", "b.Node")],
		);

		let mut builder = RegistryBuilder::new();
		builder.add_unit(&first).add_unit(&second);
		let known = builder.build();

		assert_eq!(known.lookup("Node"), Some("b.Node"));
		assert_eq!(
			known.collisions(),
			&[Collision {
				name: "Node".to_string(),
				previous: "a.Node".to_string(),
				current: "b.Node".to_string(),
			}]
		);
		assert_eq!(known.packages().collect::<Vec<_>>(), vec!["a", "b"]);
	}

	#[test]
	fn default_package_is_tracked() {
		let mut builder = RegistryBuilder::new();
		builder.add_unit(&unit(
			"Main.java",
			None,
			vec![TypeDecl::new(DeclKind::Class, Access::Public, "Main", "Main")],
		));
		let known = builder.build();
		assert_eq!(known.packages().collect::<Vec<_>>(), vec![DEFAULT_PACKAGE]);
		assert_eq!(known.lookup("Main"), Some("Main"));
		assert!(!known.is_empty());
	}

	#[test]
	fn hidden_only_units_register_nothing() {
		let mut builder = RegistryBuilder::new();
		builder.add_unit(&unit(
			"a/Secret.java",
			Some("a"),
			vec![TypeDecl::new(DeclKind::Class, Access::PackagePrivate, "Secret", "a.Secret")],
		));
		let known = builder.build();
		assert!(known.is_empty());
		assert_eq!(known.lookup("Secret"), None);
	}
}
