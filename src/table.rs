//! Shared machinery for the tabular formats.
//!
//! Both lexical forms — the boxed grid and CSV — reduce their input to rows
//! of raw text cells and feed them through the same [`ParseEngine`] state
//! machine; rendering assembles the same [`RenderedRows`] structure before
//! the form-specific layout step. Column widths are negotiated through
//! [`Widths`].

use crate::options::{intrinsic_parser, FormatOptions, ParseFn, TypesLocation};
use crate::{AttrMap, Error, Result, Value};
use indexmap::IndexMap;
use unicode_width::UnicodeWidthStr;

pub(crate) fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Per-column maximum observed text width, floored by configured minimums.
pub(crate) struct Widths(IndexMap<String, usize>);

impl Widths {
    pub(crate) fn new(minimums: &IndexMap<String, usize>) -> Self {
        Widths(minimums.clone())
    }

    pub(crate) fn observe(&mut self, column: &str, width: usize) {
        let entry = self.0.entry(column.to_string()).or_insert(0);
        if width > *entry {
            *entry = width;
        }
    }

    pub(crate) fn observe_texts(&mut self, texts: &IndexMap<String, String>) {
        for (column, text) in texts {
            self.observe(column, display_width(text));
        }
    }

    pub(crate) fn observe_widths(&mut self, widths: &IndexMap<String, usize>) {
        for (column, width) in widths {
            self.observe(column, *width);
        }
    }

    pub(crate) fn get(&self, column: &str) -> usize {
        self.0.get(column).copied().unwrap_or(0)
    }

    pub(crate) fn iter(&self) -> indexmap::map::Iter<'_, String, usize> {
        self.0.iter()
    }
}

/// Splits a header cell of the form `name (typename)` into its parts.
///
/// The name must be non-empty and contain neither spaces nor `(`; trailing
/// text after the closing parenthesis is tolerated and ignored.
pub(crate) fn split_header(cell: &str) -> Option<(String, String)> {
    let split = cell.find(|c: char| c == ' ' || c == '(')?;
    let name = &cell[..split];
    if name.is_empty() {
        return None;
    }
    let rest = cell[split..].trim_start_matches(' ');
    if !rest.starts_with('(') {
        return None;
    }
    let close = rest.rfind(')')?;
    let type_name = &rest[1..close];
    if type_name.is_empty() {
        return None;
    }
    Some((name.to_string(), type_name.to_string()))
}

/// The row state machine shared by both lexical forms.
///
/// The first row fed is the header (with inline `name (type)` splitting
/// under the header convention); under the dedicated-row convention the next
/// row declares per-column types and yields no record; every further row is
/// a data row.
pub(crate) struct ParseEngine<'o> {
    options: &'o FormatOptions,
    column_parse: IndexMap<String, ParseFn>,
    columns: Option<Vec<String>>,
    types_row_handled: bool,
    records: Vec<AttrMap>,
}

impl<'o> ParseEngine<'o> {
    pub(crate) fn new(options: &'o FormatOptions) -> Self {
        ParseEngine {
            options,
            column_parse: options.column_parse.clone(),
            columns: None,
            types_row_handled: options.types_location != Some(TypesLocation::Row),
            records: Vec::new(),
        }
    }

    pub(crate) fn feed(&mut self, cells: &[String]) -> Result<()> {
        if self.columns.is_none() {
            let mut columns = Vec::with_capacity(cells.len());
            let mut declared = Vec::new();
            for cell in cells {
                if self.options.types_location == Some(TypesLocation::Header) {
                    if let Some((name, type_name)) = split_header(cell) {
                        declared.push((name.clone(), type_name));
                        columns.push(name);
                        continue;
                    }
                }
                columns.push(cell.clone());
            }
            self.resolve_type_names(&declared)?;
            self.columns = Some(columns);
            return Ok(());
        }
        let columns = self.columns.clone().unwrap_or_default();

        if !self.types_row_handled {
            let declared: Vec<(String, String)> = columns
                .iter()
                .cloned()
                .zip(cells.iter().cloned())
                .collect();
            self.resolve_type_names(&declared)?;
            self.types_row_handled = true;
            return Ok(());
        }

        let mut record = AttrMap::with_capacity(columns.len());
        for (column, cell) in columns.iter().zip(cells) {
            let parser = self
                .column_parse
                .get(column)
                .cloned()
                .unwrap_or_else(|| self.options.default_parse.clone());
            let value = match parser(cell) {
                Ok(value) => value,
                // recoverable: keep the raw cell text and carry on
                Err(Error::InvalidValue { .. }) => Value::String(cell.clone()),
                Err(other) => return Err(other),
            };
            record.insert(column.clone(), value);
        }
        self.records.push(record);
        Ok(())
    }

    /// Remembers the resolved parser for each newly declared column.
    fn resolve_type_names(&mut self, declared: &[(String, String)]) -> Result<()> {
        for (column, name) in declared {
            if name.is_empty() || self.column_parse.contains_key(column) {
                continue;
            }
            let parser = self
                .options
                .type_parse
                .get(name)
                .cloned()
                .or_else(|| intrinsic_parser(name))
                .ok_or_else(|| Error::UnknownTypeName(name.clone()))?;
            self.column_parse.insert(column.clone(), parser);
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Vec<AttrMap> {
        self.records
    }
}

/// Records rendered to per-column cell text, plus the header and optional
/// type-annotation texts derived from the first record.
pub(crate) struct RenderedRows {
    pub(crate) columns: Option<Vec<String>>,
    pub(crate) types: Option<IndexMap<String, String>>,
    pub(crate) header: IndexMap<String, String>,
    pub(crate) rows: Vec<IndexMap<String, String>>,
}

pub(crate) fn build_rows(
    records: &[AttrMap],
    options: &FormatOptions,
    ref_columns: Option<Vec<String>>,
) -> RenderedRows {
    // Column order: reference columns first, then extras from the first
    // record in first-seen order. No records means no columns at all.
    let columns: Option<Vec<String>> = records.first().map(|first| {
        let first_columns: Vec<String> = first.keys().cloned().collect();
        match &ref_columns {
            None => first_columns,
            Some(base) => {
                let mut merged = base.clone();
                for column in first_columns {
                    if !merged.contains(&column) {
                        merged.push(column);
                    }
                }
                merged
            }
        }
    });

    // The first record's value kinds fix the per-column type annotations.
    let types: Option<IndexMap<String, String>> = match (records.first(), &columns) {
        (Some(first), Some(columns)) => {
            let mut types = IndexMap::with_capacity(columns.len());
            for column in columns {
                let text = match first.get(column) {
                    Some(value) => {
                        let kind = value.kind();
                        match options.type_names.get(&kind) {
                            Some(Some(name)) => name.clone(),
                            Some(None) => String::new(),
                            None => kind.name().to_string(),
                        }
                    }
                    None => String::new(),
                };
                types.insert(column.clone(), text);
            }
            Some(types)
        }
        _ => None,
    };

    let mut rows = Vec::with_capacity(records.len());
    if let Some(columns) = &columns {
        for record in records {
            let mut row = IndexMap::with_capacity(columns.len());
            for column in columns {
                let value = record.get(column).cloned().unwrap_or(Value::Null);
                let text = match options.column_render.get(column) {
                    Some(render) => render(&value),
                    None => match options.type_render.get(&value.kind()) {
                        Some(render) => render(&value),
                        None => (options.default_render)(&value),
                    },
                };
                row.insert(column.clone(), text);
            }
            rows.push(row);
        }
    }

    let mut header = IndexMap::new();
    if let Some(columns) = &columns {
        for column in columns {
            let mut text = column.clone();
            if options.types_location == Some(TypesLocation::Header) {
                if let Some(types) = &types {
                    if let Some(type_name) = types.get(column) {
                        if !type_name.is_empty() {
                            text = format!("{} ({})", column, type_name);
                        }
                    }
                }
            }
            header.insert(column.clone(), text);
        }
    }

    RenderedRows {
        columns,
        types,
        header,
        rows,
    }
}

impl RenderedRows {
    pub(crate) fn update_widths(&self, widths: &mut Widths, types_location: Option<TypesLocation>) {
        if !self.header.is_empty() {
            widths.observe_texts(&self.header);
        }
        if let Some(types) = &self.types {
            if types_location == Some(TypesLocation::Row) {
                widths.observe_texts(types);
            }
        }
        for row in &self.rows {
            widths.observe_texts(row);
        }
    }
}
