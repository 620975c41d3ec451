use crate::syntax::Access;

/// Whether a declaration with this access belongs to the rendered API.
///
/// Public and protected declarations are part of the contract a library exposes to its
/// users (protected members are reachable through subclassing). Private and
/// package-private declarations are not.
pub fn is_included(access: Access) -> bool {
	match access {
		Access::Public | Access::Protected => true,
		Access::PackagePrivate | Access::Private => false,
	}
}
