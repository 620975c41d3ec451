use std::collections::BTreeMap;

use super::ids::package_id;
use crate::model::{NavigationNode, TypeKind};

/// Handle to a node inside a [`NavigationBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavHandle(usize);

#[derive(Debug)]
struct Slot {
	node: NavigationNode,
	children: Vec<usize>,
}

/// Arena-backed builder for the navigation tree.
///
/// Package roots exist up front; type nodes are attached to a parent handle as the
/// traversal enters each type, and nodes are never removed.
#[derive(Debug, Default)]
pub struct NavigationBuilder {
	slots: Vec<Slot>,
	packages: BTreeMap<String, usize>,
}

impl NavigationBuilder {
	/// Create a builder with one root per package name.
	pub fn with_packages<'a>(packages: impl IntoIterator<Item = &'a str>) -> Self {
		let mut builder = Self::default();
		for package in packages {
			let index = builder.push(NavigationNode::new(package_id(package), package, TypeKind::Package));
			builder.packages.insert(package.to_string(), index);
		}
		builder
	}

	/// Handle of a package root, if the package owns visible types.
	pub fn package(&self, name: &str) -> Option<NavHandle> {
		self.packages.get(name).copied().map(NavHandle)
	}

	/// Attach a new node under `parent` and return its handle.
	pub fn attach(&mut self, parent: NavHandle, node: NavigationNode) -> NavHandle {
		let index = self.push(node);
		self.slots[parent.0].children.push(index);
		NavHandle(index)
	}

	fn push(&mut self, node: NavigationNode) -> usize {
		self.slots.push(Slot {
			node,
			children: Vec::new(),
		});
		self.slots.len() - 1
	}

	/// Materialize the tree: package roots sorted by name, children in attach order.
	pub fn finish(self) -> Vec<NavigationNode> {
		let mut slots: Vec<Option<Slot>> = self.slots.into_iter().map(Some).collect();
		self.packages
			.into_values()
			.filter_map(|index| take_subtree(&mut slots, index))
			.collect()
	}
}

fn take_subtree(slots: &mut [Option<Slot>], index: usize) -> Option<NavigationNode> {
	let Slot { mut node, children } = slots.get_mut(index)?.take()?;
	node.child_items = children
		.into_iter()
		.filter_map(|child| take_subtree(slots, child))
		.collect();
	Some(node)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn attaches_children_in_order_under_sorted_packages() {
		let mut nav = NavigationBuilder::with_packages(["b.pkg", "a.pkg"]);
		let b = nav.package("b.pkg").unwrap();
		let a = nav.package("a.pkg").unwrap();
		let outer = nav.attach(b, NavigationNode::new("b.pkg.Outer", "Outer", TypeKind::Class));
		nav.attach(outer, NavigationNode::new("b.pkg.Outer.Inner", "Inner", TypeKind::Enum));
		nav.attach(a, NavigationNode::new("a.pkg.Z", "Z", TypeKind::Interface));
		nav.attach(a, NavigationNode::new("a.pkg.Y", "Y", TypeKind::Class));

		let tree = nav.finish();
		assert_eq!(tree.len(), 2);
		assert_eq!(tree[0].text, "a.pkg");
		assert_eq!(tree[0].kind, TypeKind::Package);
		let a_children: Vec<&str> = tree[0].child_items.iter().map(|c| c.text.as_str()).collect();
		assert_eq!(a_children, vec!["Z", "Y"]);
		assert_eq!(tree[1].child_items[0].child_items[0].id, "b.pkg.Outer.Inner");
	}

	#[test]
	fn unknown_package_has_no_handle() {
		let nav = NavigationBuilder::with_packages(["a"]);
		assert!(nav.package("b").is_none());
	}
}
