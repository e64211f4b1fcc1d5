//! Template storage and sample materialization.
//!
//! A [`TemplateStore`] maps type descriptors to default attribute mappings
//! and resolves a requested descriptor plus caller overrides into computed
//! attributes, recursively materializing nested descriptor defaults. It can
//! hand the computed attributes back as a map, as a dynamic
//! [`Value::Object`], or as a concrete typed object.
//!
//! ## Overview
//!
//! - **Overlay semantics**: overrides always win over stored defaults and
//!   are never recursively resolved, even when an override happens to be a
//!   type-descriptor reference.
//! - **No template contamination**: computed attributes are always a fresh
//!   copy; stored defaults are never mutated by a resolution call.
//! - **Nested resolution**: a default whose value references another
//!   registered descriptor resolves to a materialized nested object. There
//!   is no cycle detection — a template that (transitively) references
//!   itself is a template-authoring defect.
//!
//! ## Examples
//!
//! ```rust
//! use serde::Deserialize;
//! use specimen::{attrs, TemplateStore, TypeTag};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i64, y: i64 }
//!
//! let tag = TypeTag::of::<Point>();
//! let store = TemplateStore::new([(tag.clone(), attrs! { "x": 1, "y": 2 })]);
//!
//! let point: Point = store.make_as(&tag, attrs! { "y": 3 }).unwrap();
//! assert_eq!(point, Point { x: 1, y: 3 });
//! ```

use crate::{from_value, AttrMap, Error, Factory, Result, Simplify, TypeTag, Value, ValueSimplifier};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A collection of default attribute mappings used to make sample objects.
#[derive(Clone, Debug, Default)]
pub struct TemplateStore {
    templates: IndexMap<TypeTag, AttrMap>,
}

impl TemplateStore {
    /// Creates a store from `(descriptor, defaults)` pairs.
    #[must_use]
    pub fn new(templates: impl IntoIterator<Item = (TypeTag, AttrMap)>) -> Self {
        TemplateStore {
            templates: templates.into_iter().collect(),
        }
    }

    /// Creates a store with no templates.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the template for `tag`.
    pub fn insert(&mut self, tag: TypeTag, defaults: AttrMap) {
        self.templates.insert(tag, defaults);
    }

    /// Returns the stored defaults for `tag`, if any.
    #[must_use]
    pub fn template(&self, tag: &TypeTag) -> Option<&AttrMap> {
        self.templates.get(tag)
    }

    /// Returns `true` if a template is registered for `tag`.
    #[must_use]
    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.templates.contains_key(tag)
    }

    /// Seeds a template from an example instance using the generic
    /// simplifier, keyed by the instance's own type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde::Serialize;
    /// use specimen::{attrs, TemplateStore, TypeTag};
    ///
    /// #[derive(Serialize)]
    /// struct Sample { x: i64, y: i64 }
    ///
    /// let mut store = TemplateStore::empty();
    /// store.add(&Sample { x: 1, y: 2 }).unwrap();
    ///
    /// let attrs = store.attributes(&TypeTag::of::<Sample>(), attrs! {}).unwrap();
    /// assert_eq!(attrs, attrs! { "x": 1, "y": 2 });
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSimplify`] if the instance has no extractable
    /// fields.
    pub fn add<T: Serialize>(&mut self, instance: &T) -> Result<()> {
        self.add_with(instance, &ValueSimplifier, None)
    }

    /// Seeds a template from an example instance with an explicit simplifier
    /// and/or an explicit type descriptor.
    ///
    /// When `tag` is `None`, the template is keyed by
    /// [`TypeTag::of::<T>()`](TypeTag::of). Passing an explicit tag lets
    /// several templates share one underlying shape (tagged-shape
    /// descriptors).
    pub fn add_with<T>(
        &mut self,
        instance: &T,
        simplifier: &dyn Simplify<T>,
        tag: Option<TypeTag>,
    ) -> Result<()> {
        let defaults = simplifier.one(instance)?;
        let tag = tag.unwrap_or_else(TypeTag::of::<T>);
        self.templates.insert(tag, defaults);
        Ok(())
    }

    /// Computes the attributes for a sample of `tag`, with `overrides`
    /// overlaid onto the stored defaults.
    ///
    /// Defaults that reference another registered descriptor resolve to
    /// materialized nested objects unless the same attribute is overridden.
    /// The returned map is always a fresh copy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] if `tag` has no template.
    pub fn attributes(&self, tag: &TypeTag, overrides: AttrMap) -> Result<AttrMap> {
        self.resolve(tag, overrides, &mut |nested: &TypeTag| {
            self.make(nested, AttrMap::new())
        })
    }

    /// Makes a sample of `tag` in its dynamic form: a [`Value::Object`]
    /// carrying the computed attributes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] if `tag` has no template.
    pub fn make(&self, tag: &TypeTag, overrides: AttrMap) -> Result<Value> {
        Ok(Value::Object(self.attributes(tag, overrides)?))
    }

    /// Makes a typed sample of `T`: the computed attributes fed into `T` as
    /// its fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] if `tag` has no template; construction
    /// failures (missing or mismatched fields) propagate unmodified as
    /// [`Error::Build`].
    pub fn make_as<T: DeserializeOwned>(&self, tag: &TypeTag, overrides: AttrMap) -> Result<T> {
        from_value(self.make(tag, overrides)?)
    }

    /// Returns a [`Factory`] closing over this store, `tag`, and `attrs`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use specimen::{attrs, TemplateStore, TypeTag};
    ///
    /// let tag = TypeTag::nominal("Point");
    /// let store = TemplateStore::new([(tag.clone(), attrs! { "x": 1 })]);
    /// let factory = store.bind(tag, attrs! { "y": 2 });
    ///
    /// let attrs = factory.attributes(attrs! { "z": 3 }).unwrap();
    /// assert_eq!(attrs, attrs! { "x": 1, "y": 2, "z": 3 });
    /// ```
    #[must_use]
    pub fn bind(&self, tag: TypeTag, attrs: AttrMap) -> Factory<'_> {
        Factory::new(self, tag, attrs)
    }

    /// The shared resolution step: copy the stored defaults, resolve nested
    /// descriptor references through `nest`, then overlay the overrides.
    ///
    /// `nest` decides what a nested descriptor materializes into:
    /// [`Self::make`] for plain attribute computation, or an identity
    /// cache's `get` so nested samples are themselves cached.
    pub(crate) fn resolve(
        &self,
        tag: &TypeTag,
        overrides: AttrMap,
        nest: &mut dyn FnMut(&TypeTag) -> Result<Value>,
    ) -> Result<AttrMap> {
        let template = self
            .templates
            .get(tag)
            .ok_or_else(|| Error::unknown_type(tag))?;
        let mut computed = template.clone();
        for (key, value) in computed.iter_mut() {
            let nested = match value {
                Value::Ref(inner)
                    if self.templates.contains_key(inner) && !overrides.contains_key(key) =>
                {
                    inner.clone()
                }
                _ => continue,
            };
            *value = nest(&nested)?;
        }
        computed.extend(overrides);
        Ok(computed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    #[test]
    fn test_resolution_leaves_template_untouched() {
        let tag = TypeTag::nominal("T");
        let store = TemplateStore::new([(tag.clone(), attrs! { "x": 1 })]);

        let mut computed = store.attributes(&tag, attrs! { "y": 2 }).unwrap();
        computed.insert("x".to_string(), Value::from(99));

        assert_eq!(store.template(&tag), Some(&attrs! { "x": 1 }));
        assert_eq!(store.attributes(&tag, attrs! {}).unwrap(), attrs! { "x": 1 });
    }

    #[test]
    fn test_unknown_tag() {
        let store = TemplateStore::empty();
        let err = store
            .attributes(&TypeTag::nominal("Missing"), attrs! {})
            .unwrap_err();
        assert!(matches!(err, Error::UnknownType(_)));
    }

    #[test]
    fn test_unregistered_reference_stays_literal() {
        let tag = TypeTag::nominal("T");
        let other = TypeTag::nominal("Elsewhere");
        let store = TemplateStore::new([(tag.clone(), attrs! { "x": other.clone() })]);

        let computed = store.attributes(&tag, attrs! {}).unwrap();
        assert_eq!(computed.get("x"), Some(&Value::Ref(other)));
    }
}
