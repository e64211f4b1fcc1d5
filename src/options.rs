//! Configuration options for the tabular formats.
//!
//! [`FormatOptions`] controls how cell text becomes typed values and how
//! values become cell text:
//!
//! - **Named parsers** bind a declared type name (`x (date)`, or a dedicated
//!   type row) to a parse function.
//! - **Column parsers/renderers** pin a specific column regardless of
//!   declared types.
//! - **Kind renderers and kind names** key off a value's runtime
//!   [`Kind`]: renderers replace the default text form, names rename or
//!   suppress the displayed type annotation.
//! - **Types location** selects where per-column type declarations live:
//!   inline in the header, in a dedicated row, or nowhere.
//! - **Minimum column widths** and **padding** shape the boxed form.
//!
//! ## Examples
//!
//! ```rust
//! use specimen::{FormatOptions, TypesLocation, Value};
//!
//! let options = FormatOptions::new()
//!     .with_types_location(TypesLocation::Header)
//!     .with_named_parser("upper", |text| Ok(Value::from(text.to_uppercase())))
//!     .with_minimum_width("x", 5)
//!     .with_padding(2);
//! ```

use crate::{Error, Kind, Number, Result, Value};
use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use std::rc::Rc;

/// Parses one cell's text into a typed value.
///
/// Returning [`Error::InvalidValue`] requests the raw-text fallback for that
/// single cell; any other error aborts the whole parse.
pub type ParseFn = Rc<dyn Fn(&str) -> Result<Value>>;

/// Renders one value into its cell text.
pub type RenderFn = Rc<dyn Fn(&Value) -> String>;

/// Where per-column type declarations live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypesLocation {
    /// Inline in the header: `name (typename)`.
    Header,
    /// In a dedicated row immediately after the header; an empty cell means
    /// no declared type for that column.
    Row,
}

/// Configuration for parsing and rendering tabular text.
pub struct FormatOptions {
    pub(crate) type_parse: IndexMap<String, ParseFn>,
    pub(crate) column_parse: IndexMap<String, ParseFn>,
    pub(crate) type_render: IndexMap<Kind, RenderFn>,
    pub(crate) type_names: IndexMap<Kind, Option<String>>,
    pub(crate) column_render: IndexMap<String, RenderFn>,
    pub(crate) default_parse: ParseFn,
    pub(crate) default_render: RenderFn,
    pub(crate) types_location: Option<TypesLocation>,
    pub(crate) minimum_column_widths: IndexMap<String, usize>,
    pub(crate) padding: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            type_parse: IndexMap::new(),
            column_parse: IndexMap::new(),
            type_render: IndexMap::new(),
            type_names: IndexMap::new(),
            column_render: IndexMap::new(),
            default_parse: Rc::new(|text: &str| Ok(parse_literal(text))),
            default_render: Rc::new(render_literal),
            types_location: None,
            minimum_column_widths: IndexMap::new(),
            padding: 1,
        }
    }
}

impl FormatOptions {
    /// Creates default options: literal parsing/rendering, no type
    /// declarations, single-space padding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets where per-column type declarations appear.
    #[must_use]
    pub fn with_types_location(mut self, location: TypesLocation) -> Self {
        self.types_location = Some(location);
        self
    }

    /// Binds a declared type name to a parse function.
    ///
    /// Declared names resolve here first, then fall back to the intrinsic
    /// parsers (`int`, `float`, `bool`, `str`, `date`, `time`).
    #[must_use]
    pub fn with_named_parser(
        mut self,
        name: impl Into<String>,
        parse: impl Fn(&str) -> Result<Value> + 'static,
    ) -> Self {
        self.type_parse.insert(name.into(), Rc::new(parse));
        self
    }

    /// Pins a parse function to a column, taking precedence over declared
    /// types and the default parser.
    #[must_use]
    pub fn with_column_parser(
        mut self,
        column: impl Into<String>,
        parse: impl Fn(&str) -> Result<Value> + 'static,
    ) -> Self {
        self.column_parse.insert(column.into(), Rc::new(parse));
        self
    }

    /// Replaces the default parser used for columns with no explicit or
    /// declared parser.
    #[must_use]
    pub fn with_default_parser(mut self, parse: impl Fn(&str) -> Result<Value> + 'static) -> Self {
        self.default_parse = Rc::new(parse);
        self
    }

    /// Registers a renderer for values of a given runtime kind.
    #[must_use]
    pub fn with_kind_renderer(
        mut self,
        kind: Kind,
        render: impl Fn(&Value) -> String + 'static,
    ) -> Self {
        self.type_render.insert(kind, Rc::new(render));
        self
    }

    /// Overrides the displayed type name for a runtime kind.
    ///
    /// `Some(name)` renames it; `None` suppresses the annotation entirely —
    /// the column shows no inline type and an empty cell in a dedicated type
    /// row.
    #[must_use]
    pub fn with_kind_name(mut self, kind: Kind, name: Option<&str>) -> Self {
        self.type_names.insert(kind, name.map(str::to_string));
        self
    }

    /// Pins a renderer to a column, taking precedence over kind renderers
    /// and the default renderer.
    #[must_use]
    pub fn with_column_renderer(
        mut self,
        column: impl Into<String>,
        render: impl Fn(&Value) -> String + 'static,
    ) -> Self {
        self.column_render.insert(column.into(), Rc::new(render));
        self
    }

    /// Replaces the default renderer.
    #[must_use]
    pub fn with_default_renderer(mut self, render: impl Fn(&Value) -> String + 'static) -> Self {
        self.default_render = Rc::new(render);
        self
    }

    /// Floors a column's rendered width (boxed form only).
    #[must_use]
    pub fn with_minimum_width(mut self, column: impl Into<String>, width: usize) -> Self {
        self.minimum_column_widths.insert(column.into(), width);
        self
    }

    /// Sets the symmetric whitespace margin inside each boxed cell.
    /// Default is 1.
    #[must_use]
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }
}

/// The default literal parser.
///
/// Attempts a literal reading of the cell text: `null`, booleans, integers,
/// floats (digit-shaped text only, so words like `inf` stay strings), and
/// quote-wrapped literal strings. Anything else — including malformed
/// literals like `1 2` — is kept as the verbatim string, so this parser
/// never fails.
///
/// # Examples
///
/// ```rust
/// use specimen::{parse_literal, Value};
///
/// assert_eq!(parse_literal("1"), Value::from(1));
/// assert_eq!(parse_literal("1.5"), Value::from(1.5));
/// assert_eq!(parse_literal("null"), Value::Null);
/// assert_eq!(parse_literal("1 2"), Value::from("1 2"));
/// assert_eq!(parse_literal("' bar'"), Value::from(" bar"));
/// ```
#[must_use]
pub fn parse_literal(text: &str) -> Value {
    match text {
        "" => return Value::String(String::new()),
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Some(inner) = unquote(text) {
        return Value::String(inner);
    }
    if looks_numeric(text) {
        if let Ok(i) = text.parse::<i64>() {
            return Value::Number(Number::Int(i));
        }
        if let Ok(f) = text.parse::<f64>() {
            return Value::Number(Number::Float(f));
        }
    }
    Value::String(text.to_string())
}

/// The default renderer.
///
/// Stringifies the value in its literal text form and wraps it in
/// disambiguating quote syntax whenever the text has leading or trailing
/// whitespace, so [`parse_literal`] recovers the exact original string.
///
/// # Examples
///
/// ```rust
/// use specimen::{render_literal, Value};
///
/// assert_eq!(render_literal(&Value::from(1)), "1");
/// assert_eq!(render_literal(&Value::Null), "null");
/// assert_eq!(render_literal(&Value::from(" bar")), "' bar'");
/// ```
#[must_use]
pub fn render_literal(value: &Value) -> String {
    let rendered = value.to_string();
    match value {
        Value::String(_) if needs_quotes(&rendered) => quote(&rendered),
        _ => rendered,
    }
}

fn looks_numeric(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
}

fn needs_quotes(text: &str) -> bool {
    let starts = text.chars().next().is_some_and(|c| c.is_whitespace());
    let ends = text.chars().next_back().is_some_and(|c| c.is_whitespace());
    starts || ends
}

fn quote(text: &str) -> String {
    let q = if text.contains('\'') { '"' } else { '\'' };
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(q);
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c == q => {
                quoted.push('\\');
                quoted.push(c);
            }
            c => quoted.push(c),
        }
    }
    quoted.push(q);
    quoted
}

fn unquote(text: &str) -> Option<String> {
    let mut chars = text.chars();
    let first = chars.next()?;
    let last = text.chars().next_back()?;
    if text.chars().count() < 2 || first != last || !matches!(first, '\'' | '"') {
        return None;
    }
    let inner: String = {
        let without_last: Vec<char> = chars.collect();
        without_last[..without_last.len().saturating_sub(1)]
            .iter()
            .collect()
    };
    let mut unescaped = String::with_capacity(inner.len());
    let mut iter = inner.chars();
    while let Some(ch) = iter.next() {
        if ch == '\\' {
            match iter.next() {
                Some('n') => unescaped.push('\n'),
                Some('t') => unescaped.push('\t'),
                Some('r') => unescaped.push('\r'),
                Some(other) => unescaped.push(other),
                None => unescaped.push('\\'),
            }
        } else {
            unescaped.push(ch);
        }
    }
    Some(unescaped)
}

/// Looks up an intrinsic parser for a primitive type name.
pub(crate) fn intrinsic_parser(name: &str) -> Option<ParseFn> {
    let parse: ParseFn = match name {
        "int" => Rc::new(|text: &str| {
            text.trim()
                .parse::<i64>()
                .map(|i| Value::Number(Number::Int(i)))
                .map_err(|e| Error::invalid_value(text, e))
        }),
        "float" => Rc::new(|text: &str| {
            text.trim()
                .parse::<f64>()
                .map(|f| Value::Number(Number::Float(f)))
                .map_err(|e| Error::invalid_value(text, e))
        }),
        "bool" => Rc::new(|text: &str| match text.trim() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            other => Err(Error::invalid_value(other, "expected true or false")),
        }),
        "str" => Rc::new(|text: &str| Ok(Value::String(text.to_string()))),
        "date" => Rc::new(|text: &str| {
            NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|e| Error::invalid_value(text, e))
        }),
        "time" => Rc::new(|text: &str| {
            let trimmed = text.trim();
            NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
                .map(Value::Time)
                .map_err(|e| Error::invalid_value(text, e))
        }),
        _ => return None,
    };
    Some(parse)
}
