//! Type descriptors for templates.
//!
//! A [`TypeTag`] is the hashable key identifying the shape of object a
//! template builds. Two variants cover the shapes that share a template
//! store in practice:
//!
//! - [`TypeTag::Nominal`]: a named constructible type (the common case).
//! - [`TypeTag::Tagged`]: a primitive shape carrying a distinguishing label,
//!   so several templates can target the same underlying shape (e.g. two
//!   differently-seeded map templates).
//!
//! Tags compare by value and are cheap to clone.
//!
//! ## Examples
//!
//! ```rust
//! use specimen::TypeTag;
//!
//! struct User;
//!
//! assert_eq!(TypeTag::of::<User>(), TypeTag::nominal("User"));
//! assert_ne!(
//!     TypeTag::tagged("map", "foo"),
//!     TypeTag::tagged("map", "bar"),
//! );
//! ```

use std::borrow::Cow;
use std::fmt;

/// A hashable descriptor for the shape of object a template builds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// A named constructible type.
    Nominal(Cow<'static, str>),
    /// A primitive shape distinguished by a label.
    Tagged {
        base: Cow<'static, str>,
        label: Cow<'static, str>,
    },
}

impl TypeTag {
    /// Creates a nominal tag from a type name.
    #[must_use]
    pub fn nominal(name: impl Into<Cow<'static, str>>) -> Self {
        TypeTag::Nominal(name.into())
    }

    /// Creates a tagged-shape tag from a base shape name and a label.
    #[must_use]
    pub fn tagged(
        base: impl Into<Cow<'static, str>>,
        label: impl Into<Cow<'static, str>>,
    ) -> Self {
        TypeTag::Tagged {
            base: base.into(),
            label: label.into(),
        }
    }

    /// Derives the nominal tag for a Rust type from its unqualified name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use specimen::TypeTag;
    ///
    /// struct Order;
    /// assert_eq!(TypeTag::of::<Order>(), TypeTag::nominal("Order"));
    /// ```
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        let name = full.rsplit("::").next().unwrap_or(full);
        TypeTag::Nominal(Cow::Owned(name.to_string()))
    }

    /// Returns the tag's display name: the type name, or `base[label]`.
    #[must_use]
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Nominal(name) => write!(f, "{}", name),
            TypeTag::Tagged { base, label } => write!(f, "{}[{}]", base, label),
        }
    }
}
