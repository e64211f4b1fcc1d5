//! Your first specimen experience: templates, overrides, factories, and
//! identity-cached sample sets.
//!
//! Run with: `cargo run --example quickstart`

use serde::Deserialize;
use specimen::{attrs, SampleSet, TemplateStore, TypeTag};
use std::rc::Rc;

#[derive(Deserialize, Debug, PartialEq)]
struct User {
    id: i64,
    name: String,
    active: bool,
}

fn main() {
    let tag = TypeTag::of::<User>();
    let store = TemplateStore::new([(
        tag.clone(),
        attrs! { "id": 1, "name": "Alice", "active": true },
    )]);

    // Defaults with per-call overrides.
    let user: User = store
        .make_as(&tag, attrs! { "name": "Bob" })
        .expect("template matches the struct");
    println!("made: {:?}", user);

    // A factory fixes common attributes once.
    let inactive = store.bind(tag.clone(), attrs! { "active": false });
    let user: User = inactive
        .make_as(attrs! { "id": 2 })
        .expect("template matches the struct");
    println!("from factory: {:?}", user);

    // A sample set hands back the same sample per identity.
    let set = SampleSet::keyed_by(&store, &["id"]);
    let first = set.get(&tag, attrs! {}).expect("known tag");
    let second = set.get(&tag, attrs! {}).expect("known tag");
    println!("same sample twice: {}", Rc::ptr_eq(&first, &second));
}
