//! Property accessors.
//!
//! An [`Accessor`] is the stable identity of "property P on type T". It is a
//! plain string path (dotted for nested properties) bound to the owner type's
//! [`TypeKey`], so two accessors built for the same type and path always
//! compare and hash equal.
//!
//! Values are resolved from a `serde_json::Value` snapshot of the instance,
//! which keeps rules independent of the concrete owner type.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a Rust type used as a registry key.
///
/// Equality and hashing use the `TypeId` only; the name is kept for display.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by `std::any::type_name`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        // Generic names contain `::` inside angle brackets; only strip the outer path.
        let outer = self.name.split('<').next().unwrap_or(self.name);
        match outer.rfind("::") {
            Some(idx) => &self.name[idx + 2..],
            None => self.name,
        }
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Stable identifier for a property of a type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Accessor {
    owner: TypeKey,
    path: String,
}

impl Accessor {
    /// Resolve `path` on `T`.
    ///
    /// # Arguments
    ///
    /// * `path` - Property name, or a dotted path for nested properties
    ///   (e.g. `"address.city"`)
    ///
    /// # Example
    ///
    /// ```
    /// use classrules::accessor::Accessor;
    ///
    /// struct Person;
    ///
    /// let a = Accessor::new::<Person>("email");
    /// let b = Accessor::new::<Person>("email");
    /// assert_eq!(a, b);
    /// assert_eq!(a.name(), "email");
    /// ```
    pub fn new<T: ?Sized + 'static>(path: impl Into<String>) -> Self {
        Self::for_type(TypeKey::of::<T>(), path)
    }

    /// Resolve `path` on an owner known only by its key.
    pub fn for_type(owner: TypeKey, path: impl Into<String>) -> Self {
        Self {
            owner,
            path: path.into(),
        }
    }

    /// The type that declares this property.
    pub fn owner(&self) -> TypeKey {
        self.owner
    }

    /// The full property path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The last segment of the path.
    pub fn name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// Look this property up in a snapshot of an instance.
    ///
    /// Returns `None` when any segment of the path is missing or when an
    /// intermediate segment is not an object.
    pub fn value_in<'v>(&self, snapshot: &'v Value) -> Option<&'v Value> {
        self.path
            .split('.')
            .try_fold(snapshot, |current, segment| current.as_object()?.get(segment))
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Accessor({}.{})", self.owner.short_name(), self.path)
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner.short_name(), self.path)
    }
}

impl Serialize for Accessor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    struct Person;
    struct Company;

    #[test]
    fn test_same_type_and_path_are_equal() {
        let mut set = HashSet::new();
        set.insert(Accessor::new::<Person>("email"));
        set.insert(Accessor::new::<Person>("email"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_owner_type_distinguishes_accessors() {
        let a = Accessor::new::<Person>("name");
        let b = Accessor::new::<Company>("name");
        assert_ne!(a, b);
        assert_eq!(a.owner(), TypeKey::of::<Person>());
    }

    #[test]
    fn test_name_is_last_path_segment() {
        let accessor = Accessor::new::<Person>("address.city");
        assert_eq!(accessor.path(), "address.city");
        assert_eq!(accessor.name(), "city");
    }

    #[test]
    fn test_value_in_walks_nested_objects() {
        let snapshot = json!({
            "email": "a@b.com",
            "address": { "city": "Lisbon" }
        });

        assert_eq!(
            Accessor::new::<Person>("email").value_in(&snapshot),
            Some(&json!("a@b.com"))
        );
        assert_eq!(
            Accessor::new::<Person>("address.city").value_in(&snapshot),
            Some(&json!("Lisbon"))
        );
        assert_eq!(Accessor::new::<Person>("address.zip").value_in(&snapshot), None);
        assert_eq!(Accessor::new::<Person>("email.domain").value_in(&snapshot), None);
    }

    #[test]
    fn test_display_uses_short_type_name() {
        let accessor = Accessor::new::<Person>("email");
        assert_eq!(accessor.to_string(), "Person.email");
        assert_eq!(TypeKey::of::<Person>().to_string(), "Person");
    }
}
