//! # specimen
//!
//! A toolkit for constructing sample objects in tests, built around
//! declarative default-attribute templates and a small human-readable
//! tabular text format for specifying and comparing sets of records.
//!
//! ## Key Features
//!
//! - **Templates**: register default attributes per type descriptor once,
//!   then materialize samples with per-call overrides
//! - **Recursive defaults**: a default that references another registered
//!   descriptor materializes as a real nested sample
//! - **Identity caching**: [`SampleSet`] guarantees one sample per logical
//!   identity, so related samples share referents the way persisted rows do
//! - **Tabular test data**: boxed tables and CSV parse into typed records
//!   and render back with byte-for-byte round-trip fidelity
//! - **Serde Powered**: templates seed from real instances via `Serialize`,
//!   and samples materialize into concrete types via `Deserialize`
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! specimen = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Templates and overrides
//!
//! ```rust
//! use serde::Deserialize;
//! use specimen::{attrs, TemplateStore, TypeTag};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! let tag = TypeTag::of::<User>();
//! let store = TemplateStore::new([(tag.clone(), attrs! { "id": 1, "name": "Alice" })]);
//!
//! // Overrides win over the stored defaults; the template is never mutated.
//! let user: User = store.make_as(&tag, attrs! { "name": "Bob" }).unwrap();
//! assert_eq!(user, User { id: 1, name: "Bob".to_string() });
//! ```
//!
//! ### One sample per identity
//!
//! ```rust
//! use std::rc::Rc;
//! use specimen::{attrs, SampleSet, TemplateStore, TypeTag};
//!
//! let tag = TypeTag::nominal("Account");
//! let store = TemplateStore::new([(tag.clone(), attrs! { "id": 7, "owner": "Alice" })]);
//!
//! let set = SampleSet::keyed_by(&store, &["id"]);
//! let first = set.get(&tag, attrs! {}).unwrap();
//! let second = set.get(&tag, attrs! {}).unwrap();
//! assert!(Rc::ptr_eq(&first, &second));
//! ```
//!
//! ### Tabular test data
//!
//! ```rust
//! use specimen::{attrs, GridFormat};
//!
//! let grid = GridFormat::new();
//! let parsed = grid
//!     .parse(
//!         "
//!         +---+-----+
//!         | x | y   |
//!         +---+-----+
//!         | 1 | foo |
//!         +---+-----+
//!         ",
//!     )
//!     .unwrap();
//! assert_eq!(parsed.records, vec![attrs! { "x": 1, "y": "foo" }]);
//!
//! // Rendering against the parse reproduces the original layout.
//! let rendered = grid.render_with(&parsed.records, &parsed);
//! assert!(rendered.contains("| 1 | foo |"));
//! ```
//!
//! ## Scope
//!
//! Everything here is a synchronous, single-threaded, in-memory
//! transformation: there is no I/O beyond the text handed in and out of the
//! tabular formats, and no persistence. ORM-specific adapters live outside
//! the crate; their boundary contract is the [`IdentifyFn`] shape (see
//! [`identify_by_fields`]) plus a [`Simplify`] implementation per source
//! family. Types intentionally use `Rc`/`RefCell` and are not `Send`.

pub mod csv;
pub mod de;
pub mod error;
pub mod factory;
pub mod grid;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod set;
pub mod simplify;
pub mod store;
mod table;
pub mod tag;
pub mod value;

pub use csv::CsvFormat;
pub use de::from_value;
pub use error::{Error, Result};
pub use factory::Factory;
pub use grid::{GridFormat, ParsedGrid, Reference};
pub use map::AttrMap;
pub use options::{parse_literal, render_literal, FormatOptions, ParseFn, RenderFn, TypesLocation};
pub use ser::{to_value, ValueSerializer};
pub use set::{identify_by_fields, Identity, IdentifyFn, SampleSet};
pub use simplify::{Simplify, ValueSimplifier};
pub use store::TemplateStore;
pub use tag::TypeTag;
pub use value::{Kind, Number, Value};
