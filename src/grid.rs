//! The boxed-table text form.
//!
//! [`GridFormat`] parses and renders the ASCII grid form used to spell out
//! expected data in tests:
//!
//! ```text
//! +---+-----+
//! | x | y   |
//! +---+-----+
//! | 1 | foo |
//! +---+-----+
//! ```
//!
//! Border lines (`+---+`) and blank lines are skipped; content lines are
//! split on `|` and each cell trimmed, with matching `'`/`"` quoting
//! available to preserve leading or trailing whitespace. Parsing records the
//! maximum observed width per column so a later render can line up
//! byte-for-byte with the original text.
//!
//! ## Round trips
//!
//! ```rust
//! use specimen::GridFormat;
//!
//! let grid = GridFormat::new();
//! let source = "\
//! +---+-----+
//! | x | y   |
//! +---+-----+
//! | 1 | foo |
//! +---+-----+
//! ";
//! let parsed = grid.parse(source).unwrap();
//! assert_eq!(grid.render_with(&parsed.records, &parsed), source);
//! ```

use crate::options::{FormatOptions, TypesLocation};
use crate::table::{build_rows, display_width, ParseEngine, Widths};
use crate::{AttrMap, Result};
use indexmap::IndexMap;
use std::ops::Deref;

/// Parses and renders the boxed-table form.
#[derive(Default)]
pub struct GridFormat {
    options: FormatOptions,
}

/// The result of parsing a boxed table: the records plus the maximum
/// observed text width per column (padding excluded).
///
/// Dereferences to the record slice, and can be passed back to
/// [`GridFormat::render_with`] as the reference so a re-render preserves the
/// original column widths.
#[derive(Debug)]
pub struct ParsedGrid {
    pub records: Vec<AttrMap>,
    pub widths: IndexMap<String, usize>,
}

impl Deref for ParsedGrid {
    type Target = [AttrMap];

    fn deref(&self) -> &[AttrMap] {
        &self.records
    }
}

impl PartialEq<Vec<AttrMap>> for ParsedGrid {
    fn eq(&self, other: &Vec<AttrMap>) -> bool {
        self.records == *other
    }
}

/// A reference for width and column-order negotiation when rendering.
pub enum Reference<'a> {
    /// A prior parse carrying recorded widths.
    Parsed(&'a ParsedGrid),
    /// Plain records; order and widths are inferred by rendering them.
    Records(&'a [AttrMap]),
}

impl<'a> From<&'a ParsedGrid> for Reference<'a> {
    fn from(parsed: &'a ParsedGrid) -> Self {
        Reference::Parsed(parsed)
    }
}

impl<'a> From<&'a [AttrMap]> for Reference<'a> {
    fn from(records: &'a [AttrMap]) -> Self {
        Reference::Records(records)
    }
}

impl<'a> From<&'a Vec<AttrMap>> for Reference<'a> {
    fn from(records: &'a Vec<AttrMap>) -> Self {
        Reference::Records(records.as_slice())
    }
}

impl GridFormat {
    /// Creates a grid format with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grid format with the given options.
    #[must_use]
    pub fn with_options(options: FormatOptions) -> Self {
        GridFormat { options }
    }

    /// The format's options.
    #[must_use]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Parses boxed-table text into typed records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTypeName`](crate::Error::UnknownTypeName) for
    /// an unresolvable declared type, and propagates any non-recoverable
    /// parser error. Malformed literal cells do not fail — they fall back to
    /// their raw text.
    pub fn parse(&self, text: &str) -> Result<ParsedGrid> {
        let padding = self.options.padding;
        let pad_text = " ".repeat(padding);
        let mut engine = ParseEngine::new(&self.options);
        let mut widths: Vec<usize> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('+') {
                continue;
            }
            let pieces: Vec<&str> = line.split('|').collect();
            if pieces.len() < 3 {
                continue;
            }
            let raw_cells = &pieces[1..pieces.len() - 1];

            let mut line_widths = Vec::with_capacity(raw_cells.len());
            for part in raw_cells {
                let mut width = display_width(part);
                if width >= padding * 2 && part.starts_with(&pad_text) && part.ends_with(&pad_text)
                {
                    width -= padding * 2;
                }
                line_widths.push(width);
            }
            for (i, width) in line_widths.into_iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(width);
                } else {
                    widths.push(width);
                }
            }

            let cells: Vec<String> = raw_cells.iter().map(|p| p.trim().to_string()).collect();
            engine.feed(&cells)?;
        }

        let records = engine.finish();
        let mut column_widths = IndexMap::new();
        if let Some(first) = records.first() {
            for (column, width) in first.keys().zip(widths) {
                column_widths.insert(column.clone(), width);
            }
        }
        Ok(ParsedGrid {
            records,
            widths: column_widths,
        })
    }

    /// Renders records as a boxed table.
    ///
    /// Column order comes from the first record; widths fit the content,
    /// floored by the configured minimums.
    #[must_use]
    pub fn render(&self, records: &[AttrMap]) -> String {
        self.render_impl(records, None)
    }

    /// Renders records against a reference.
    ///
    /// The reference's column order comes first (data-only columns append in
    /// first-seen order) and its widths floor the computed ones; a record
    /// missing a reference column renders the null placeholder in that cell.
    #[must_use]
    pub fn render_with<'r>(
        &self,
        records: &[AttrMap],
        reference: impl Into<Reference<'r>>,
    ) -> String {
        self.render_impl(records, Some(reference.into()))
    }

    fn render_impl(&self, records: &[AttrMap], reference: Option<Reference<'_>>) -> String {
        let options = &self.options;
        let mut widths = Widths::new(&options.minimum_column_widths);
        let mut columns: Option<Vec<String>> = None;

        match reference {
            Some(Reference::Parsed(parsed)) => {
                widths.observe_widths(&parsed.widths);
                columns = Some(parsed.widths.keys().cloned().collect());
            }
            Some(Reference::Records(ref_records)) => {
                let ref_rows = build_rows(ref_records, options, None);
                ref_rows.update_widths(&mut widths, options.types_location);
                columns = ref_rows.columns;
            }
            None => {}
        }

        let rows = build_rows(records, options, columns);
        rows.update_widths(&mut widths, options.types_location);

        let padding = options.padding;
        let mut divider = String::new();
        for (_, width) in widths.iter() {
            divider.push('+');
            divider.push_str(&"-".repeat(width + padding * 2));
        }
        divider.push_str("+\n");

        let mut out = String::new();
        out.push_str(&divider);
        if !rows.header.is_empty() {
            push_row(&mut out, &rows.header, &widths, padding);
            out.push_str(&divider);
        }
        if options.types_location == Some(TypesLocation::Row) {
            if let Some(types) = &rows.types {
                push_row(&mut out, types, &widths, padding);
                out.push_str(&divider);
            }
        }
        for row in &rows.rows {
            push_row(&mut out, row, &widths, padding);
        }
        out.push_str(&divider);
        out
    }
}

fn push_row(
    out: &mut String,
    texts: &IndexMap<String, String>,
    widths: &Widths,
    padding: usize,
) {
    let pad = " ".repeat(padding);
    for (column, text) in texts {
        out.push('|');
        out.push_str(&pad);
        out.push_str(text);
        let fill = widths.get(column).saturating_sub(display_width(text));
        out.push_str(&" ".repeat(fill));
        out.push_str(&pad);
    }
    out.push_str("|\n");
}
