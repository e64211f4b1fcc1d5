//! Tabular test data: parse a boxed table, tweak the records, render them
//! back against the original layout.
//!
//! Run with: `cargo run --example tables`

use specimen::{attrs, GridFormat, Value};

fn main() {
    let grid = GridFormat::new();

    let source = "
        +----+---------+--------+
        | id | city    | rating |
        +----+---------+--------+
        | 1  | Lisbon  | 4.5    |
        | 2  | Tbilisi | 4.8    |
        +----+---------+--------+
    ";
    let parsed = grid.parse(source).expect("well-formed table");
    println!("parsed {} records", parsed.records.len());
    for record in parsed.records.iter() {
        println!("  {:?}", record.get("city"));
    }

    // Add a record and render with the parse as the reference: the original
    // column order and widths are preserved.
    let mut records = parsed.records.clone();
    records.push(attrs! { "id": 3, "city": "Osaka", "rating": Value::from(4.9) });
    let rendered = grid.render_with(&records, &parsed);
    println!("{}", rendered);
}
