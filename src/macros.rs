/// Builds an [`AttrMap`](crate::AttrMap) from literal entries.
///
/// Values are converted through [`Value::from`](crate::Value), so primitives,
/// strings, chrono dates/times, already-built [`Value`](crate::Value)s, and
/// [`TypeTag`](crate::TypeTag)s (which become type-descriptor references) all
/// work directly.
///
/// # Examples
///
/// ```rust
/// use specimen::{attrs, Value};
///
/// let sample = attrs! {
///     "name": "Alice",
///     "age": 30,
///     "note": Value::Null,
/// };
/// assert_eq!(sample.get("name"), Some(&Value::from("Alice")));
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::AttrMap::new()
    };

    ( $( $key:literal : $value:expr ),* $(,)? ) => {{
        let mut map = $crate::AttrMap::new();
        $(
            map.insert($key.to_string(), $crate::Value::from($value));
        )*
        map
    }};
}

#[cfg(test)]
mod tests {
    use crate::{AttrMap, Number, TypeTag, Value};

    #[test]
    fn test_attrs_macro_empty() {
        assert_eq!(attrs! {}, AttrMap::new());
    }

    #[test]
    fn test_attrs_macro_primitives() {
        let map = attrs! {
            "a": 42,
            "b": 3.5,
            "c": "hello",
            "d": true,
            "e": Value::Null,
        };
        assert_eq!(map.get("a"), Some(&Value::Number(Number::Int(42))));
        assert_eq!(map.get("b"), Some(&Value::Number(Number::Float(3.5))));
        assert_eq!(map.get("c"), Some(&Value::String("hello".to_string())));
        assert_eq!(map.get("d"), Some(&Value::Bool(true)));
        assert_eq!(map.get("e"), Some(&Value::Null));
    }

    #[test]
    fn test_attrs_macro_type_references() {
        let map = attrs! { "child": TypeTag::nominal("Child") };
        assert_eq!(
            map.get("child"),
            Some(&Value::Ref(TypeTag::nominal("Child")))
        );
    }

    #[test]
    fn test_attrs_macro_trailing_comma() {
        assert_eq!(attrs! { "x": 1 }, attrs! { "x": 1, });
    }
}
