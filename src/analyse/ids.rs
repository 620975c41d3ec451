use once_cell::sync::Lazy;
use regex::Regex;

use crate::syntax::{CallableDecl, TypeParam};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Package name used for compilation units without a `package` declaration.
pub const DEFAULT_PACKAGE: &str = "(default package)";

/// Navigation id of the default package.
pub const DEFAULT_PACKAGE_ID: &str = "default-package";

/// Stable identifier for a fully-qualified declaration name.
pub fn stable_id(qualified_name: &str) -> String {
	WHITESPACE_RUN.replace_all(qualified_name.trim(), "-").into_owned()
}

/// Navigation id of a package.
pub fn package_id(package: &str) -> String {
	if package == DEFAULT_PACKAGE {
		DEFAULT_PACKAGE_ID.to_string()
	} else {
		stable_id(package)
	}
}

/// Definition id of a constructor or method, scoped by its owning type.
///
/// The signature text covers modifiers, type parameters, return type, name, named
/// parameters and the throws clause, so overloads get distinct ids.
pub fn member_id(owner_id: &str, callable: &CallableDecl) -> String {
	let mut signature = String::new();
	for modifier in &callable.modifiers {
		signature.push_str(modifier);
		signature.push(' ');
	}
	if !callable.type_params.is_empty() {
		signature.push_str(&type_params_source(&callable.type_params));
		signature.push(' ');
	}
	if let Some(ret) = &callable.return_type {
		signature.push_str(&ret.to_source());
		signature.push(' ');
	}
	signature.push_str(&callable.name);
	signature.push('(');
	let params: Vec<String> = callable
		.params
		.iter()
		.map(|p| {
			let dots = if p.varargs { "..." } else { "" };
			format!("{}{dots} {}", p.ty.to_source(), p.name)
		})
		.collect();
	signature.push_str(&params.join(", "));
	signature.push(')');
	if !callable.throws.is_empty() {
		let throws: Vec<String> = callable.throws.iter().map(|t| t.to_source()).collect();
		signature.push_str(" throws ");
		signature.push_str(&throws.join(", "));
	}
	format!("{owner_id}.{}", stable_id(&signature))
}

fn type_params_source(params: &[TypeParam]) -> String {
	let rendered: Vec<String> = params
		.iter()
		.map(|p| {
			if p.bounds.is_empty() {
				p.name.clone()
			} else {
				let bounds: Vec<String> = p.bounds.iter().map(|b| b.to_source()).collect();
				format!("{} extends {}", p.name, bounds.join(" & "))
			}
		})
		.collect();
	format!("<{}>", rendered.join(", "))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::syntax::{Access, Param, TypeRef};

	#[test]
	fn stable_id_collapses_whitespace() {
		assert_eq!(stable_id("com.example.Foo"), "com.example.Foo");
		assert_eq!(stable_id(" a.b  Foo\t"), "a.b-Foo");
	}

	#[test]
	fn default_package_has_fixed_id() {
		assert_eq!(package_id(DEFAULT_PACKAGE), "default-package");
		assert_eq!(package_id("com.example"), "com.example");
	}

	#[test]
	fn member_id_distinguishes_overloads() {
		let mut method = CallableDecl {
			access: Access::Public,
			modifiers: vec!["public".to_string()],
			type_params: Vec::new(),
			return_type: Some(TypeRef::named("String")),
			name: "get".to_string(),
			params: vec![Param {
				ty: TypeRef::generic("List", vec![TypeRef::named("String")]),
				name: "keys".to_string(),
				varargs: false,
			}],
			throws: vec![TypeRef::named("IOException")],
		};
		assert_eq!(
			member_id("a.Foo", &method),
			"a.Foo.public-String-get(List<String>-keys)-throws-IOException"
		);

		method.params[0].varargs = true;
		assert_eq!(
			member_id("a.Foo", &method),
			"a.Foo.public-String-get(List<String>...-keys)-throws-IOException"
		);
	}
}
