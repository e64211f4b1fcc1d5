//! The CSV text form.
//!
//! [`CsvFormat`] is the comma-separated sibling of
//! [`GridFormat`](crate::GridFormat): the same header/type-row/data state
//! machine over RFC-4180-style lexing. Rendering writes CRLF-terminated
//! rows with minimal quoting; there is no width negotiation.
//!
//! ## Examples
//!
//! ```rust
//! use specimen::{attrs, CsvFormat};
//!
//! let format = CsvFormat::new();
//! let records = vec![attrs! { "x": 1, "y": "foo" }];
//!
//! let rendered = format.render(&records);
//! assert_eq!(rendered, "x,y\r\n1,foo\r\n");
//! assert_eq!(format.parse(&rendered).unwrap(), records);
//! ```

use crate::options::{FormatOptions, TypesLocation};
use crate::table::{build_rows, ParseEngine};
use crate::{AttrMap, Result};

/// Parses and renders the CSV form.
#[derive(Default)]
pub struct CsvFormat {
    options: FormatOptions,
}

impl CsvFormat {
    /// Creates a CSV format with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a CSV format with the given options.
    #[must_use]
    pub fn with_options(options: FormatOptions) -> Self {
        CsvFormat { options }
    }

    /// The format's options.
    #[must_use]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Parses CSV text into typed records.
    ///
    /// Accepts both LF and CRLF line endings; quoted fields may contain
    /// delimiters, doubled quotes, and newlines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTypeName`](crate::Error::UnknownTypeName) for
    /// an unresolvable declared type, and propagates any non-recoverable
    /// parser error.
    pub fn parse(&self, text: &str) -> Result<Vec<AttrMap>> {
        let mut engine = ParseEngine::new(&self.options);
        for row in lex(text) {
            engine.feed(&row)?;
        }
        Ok(engine.finish())
    }

    /// Renders records as CSV.
    #[must_use]
    pub fn render(&self, records: &[AttrMap]) -> String {
        self.render_impl(records, None)
    }

    /// Renders records with column order led by the reference's first
    /// record. An empty reference behaves like no reference.
    #[must_use]
    pub fn render_with(&self, records: &[AttrMap], reference: &[AttrMap]) -> String {
        self.render_impl(records, reference.first())
    }

    fn render_impl(&self, records: &[AttrMap], ref_first: Option<&AttrMap>) -> String {
        let columns = ref_first.map(|first| first.keys().cloned().collect::<Vec<_>>());
        let rows = build_rows(records, &self.options, columns);

        let mut out = String::new();
        if !rows.header.is_empty() {
            write_record(&mut out, rows.header.values());
        }
        if self.options.types_location == Some(TypesLocation::Row) {
            if let Some(types) = &rows.types {
                write_record(&mut out, types.values());
            }
        }
        for row in &rows.rows {
            write_record(&mut out, row.values());
        }
        out
    }
}

fn write_record<'v>(out: &mut String, fields: impl Iterator<Item = &'v String>) {
    let fields: Vec<&String> = fields.collect();
    // a lone empty field is quoted so the row is not mistaken for a blank line
    if fields.len() == 1 && fields[0].is_empty() {
        out.push_str("\"\"\r\n");
        return;
    }
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        if field.contains(',') || field.contains('"') || field.contains('\r') || field.contains('\n')
        {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}

fn lex(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        field.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                }
                other => field.push(other),
            }
        } else {
            match ch {
                '"' if field.is_empty() => {
                    in_quotes = true;
                    field_was_quoted = true;
                }
                ',' => {
                    fields.push(std::mem::take(&mut field));
                    field_was_quoted = false;
                }
                '\r' => {}
                '\n' => {
                    // a truly blank line yields no row; a quoted empty field does
                    if fields.is_empty() && field.is_empty() && !field_was_quoted {
                        continue;
                    }
                    fields.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut fields));
                    field_was_quoted = false;
                }
                other => field.push(other),
            }
        }
    }
    if !fields.is_empty() || !field.is_empty() || field_was_quoted {
        fields.push(field);
        rows.push(fields);
    }
    rows
}
