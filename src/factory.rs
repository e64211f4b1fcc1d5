//! Bound factories: partial application over a template store.
//!
//! A [`Factory`] closes over a [`TemplateStore`], a type descriptor, and a
//! set of bound attributes. Call-time attributes win over bound attributes,
//! which win over stored defaults. `bind` produces a new factory with
//! further attributes overlaid — the original is never mutated.
//!
//! ## Examples
//!
//! ```rust
//! use specimen::{attrs, TemplateStore, TypeTag};
//!
//! let tag = TypeTag::nominal("Sample");
//! let store = TemplateStore::new([(tag.clone(), attrs! { "x": 1 })]);
//!
//! let factory = store.bind(tag, attrs! { "y": 2 });
//! let rebound = factory.bind(attrs! { "y": 5 });
//!
//! assert_eq!(
//!     factory.attributes(attrs! {}).unwrap(),
//!     attrs! { "x": 1, "y": 2 },
//! );
//! assert_eq!(
//!     rebound.attributes(attrs! {}).unwrap(),
//!     attrs! { "x": 1, "y": 5 },
//! );
//! ```

use crate::{AttrMap, Result, TemplateStore, TypeTag, Value};
use serde::de::DeserializeOwned;

/// A template store partially applied to a type descriptor and a set of
/// bound attributes.
#[derive(Clone, Debug)]
pub struct Factory<'a> {
    store: &'a TemplateStore,
    tag: TypeTag,
    attrs: AttrMap,
}

impl<'a> Factory<'a> {
    pub(crate) fn new(store: &'a TemplateStore, tag: TypeTag, attrs: AttrMap) -> Self {
        Factory { store, tag, attrs }
    }

    /// The bound type descriptor.
    #[must_use]
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// The bound attributes.
    #[must_use]
    pub fn bound_attrs(&self) -> &AttrMap {
        &self.attrs
    }

    /// Computes attributes for the bound descriptor; call-time `attrs` win
    /// over the bound attributes.
    pub fn attributes(&self, attrs: AttrMap) -> Result<AttrMap> {
        self.store.attributes(&self.tag, self.attrs.overlaid(&attrs))
    }

    /// Makes a dynamic sample of the bound descriptor.
    pub fn make(&self, attrs: AttrMap) -> Result<Value> {
        self.store.make(&self.tag, self.attrs.overlaid(&attrs))
    }

    /// Makes a typed sample of the bound descriptor.
    pub fn make_as<T: DeserializeOwned>(&self, attrs: AttrMap) -> Result<T> {
        self.store.make_as(&self.tag, self.attrs.overlaid(&attrs))
    }

    /// Returns a new factory with `attrs` overlaid onto the bound
    /// attributes (new attributes win). This factory is unaffected.
    #[must_use]
    pub fn bind(&self, attrs: AttrMap) -> Factory<'a> {
        Factory {
            store: self.store,
            tag: self.tag.clone(),
            attrs: self.attrs.overlaid(&attrs),
        }
    }
}
