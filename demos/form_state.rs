//! Example: a profile form backed by a tracked record.

use tracked_kit::prelude::*;

fn main() {
    println!("=== Form State Example ===\n");

    // The initial value doubles as the form's shape: these fields, and
    // only these fields, exist for the lifetime of the tracker.
    let mut form = Tracked::new(Value::record([
        ("name", Value::from("Ada Lovelace")),
        ("email", Value::from("ada@example.com")),
        ("age", Value::Int(36)),
        (
            "address",
            Value::record([
                ("city", Value::from("London")),
                ("zip", Value::from("W1")),
            ]),
        ),
    ]));

    println!("Loaded form, pristine: {}", form.pristine());

    // The user edits two fields. Patches name only what changed.
    form.set(Value::record([
        ("email", Value::from("ada@analytical.engine")),
        (
            "address",
            Value::record([("city", Value::from("Marylebone"))]),
        ),
    ]))
    .expect("fields exist");

    println!("After edits, dirty: {}", form.dirty());
    println!("Pending changes: {:#?}", form.diff());

    // "Reset" button: back to the last save.
    form.revert();
    println!("\nAfter reset, pristine: {}", form.pristine());

    // Edit again and save this time.
    form.set(Value::record([("age", Value::Int(37))]))
        .expect("field exists");
    form.commit();
    println!("After save, pristine: {}", form.pristine());
    println!("Saved value: {:#?}", form.value());

    // A typo in a field name is a programming error, and surfaces
    // instead of being silently ignored.
    let err = form
        .set(Value::record([("emial", Value::from("oops"))]))
        .unwrap_err();
    println!("\nRejected patch: {err}");
}
