//! WebAssembly bindings for tracked-kit.
//!
//! Enable with the `wasm` feature:
//!
//! ```toml
//! [dependencies]
//! tracked-kit = { version = "0.1", features = ["wasm"] }
//! ```
//!
//! `Tracked` is exposed as a JavaScript class that accepts plain JS
//! values: objects become records, primitives become scalars. JS
//! numbers are always tracked as floats.

use alloc::collections::BTreeMap;
use alloc::string::ToString;

use wasm_bindgen::prelude::*;

use crate::{Diff, Value};

// ── Value conversion ────────────────────────────────────────────────

fn js_to_value(js: &JsValue) -> Result<Value, JsError> {
    if js.is_null() || js.is_undefined() {
        return Ok(Value::Null);
    }
    if let Some(flag) = js.as_bool() {
        return Ok(Value::Bool(flag));
    }
    if let Some(number) = js.as_f64() {
        return Ok(Value::Float(number));
    }
    if let Some(text) = js.as_string() {
        return Ok(Value::Str(text));
    }
    if js.is_object() {
        let object = js_sys::Object::from(js.clone());
        let mut fields = BTreeMap::new();
        for entry in js_sys::Object::entries(&object).iter() {
            let pair = js_sys::Array::from(&entry);
            let name = pair
                .get(0)
                .as_string()
                .ok_or_else(|| JsError::new("record keys must be strings"))?;
            fields.insert(name, js_to_value(&pair.get(1))?);
        }
        return Ok(Value::Record(fields));
    }
    Err(JsError::new("unsupported value"))
}

fn value_to_js(value: &Value) -> JsValue {
    match value {
        Value::Null => JsValue::NULL,
        Value::Bool(flag) => JsValue::from_bool(*flag),
        Value::Int(number) => JsValue::from_f64(*number as f64),
        Value::Float(number) => JsValue::from_f64(*number),
        Value::Str(text) => JsValue::from_str(text),
        Value::Record(fields) => {
            let object = js_sys::Object::new();
            for (name, field) in fields {
                let _ = js_sys::Reflect::set(
                    &object,
                    &JsValue::from_str(name),
                    &value_to_js(field),
                );
            }
            object.into()
        }
    }
}

fn diff_to_js(diff: &Diff) -> JsValue {
    match diff {
        Diff::Value(change) => {
            let object = js_sys::Object::new();
            let _ = js_sys::Reflect::set(
                &object,
                &JsValue::from_str("previous"),
                &value_to_js(&change.previous),
            );
            let _ = js_sys::Reflect::set(
                &object,
                &JsValue::from_str("current"),
                &value_to_js(&change.current),
            );
            object.into()
        }
        Diff::Record(fields) => {
            let object = js_sys::Object::new();
            for (name, field) in fields {
                let _ = js_sys::Reflect::set(
                    &object,
                    &JsValue::from_str(name),
                    &diff_to_js(field),
                );
            }
            object.into()
        }
    }
}

// ── Tracked ─────────────────────────────────────────────────────────

/// A tracked value for use from JavaScript.
#[wasm_bindgen(js_name = Tracked)]
pub struct WasmTracked {
    inner: crate::Tracked,
}

#[wasm_bindgen(js_class = Tracked)]
impl WasmTracked {
    /// Track a value. Objects are classified as records, everything
    /// else as scalars; the classification is permanent.
    #[wasm_bindgen(constructor)]
    pub fn new(value: &JsValue) -> Result<WasmTracked, JsError> {
        Ok(Self {
            inner: crate::Tracked::new(js_to_value(value)?),
        })
    }

    /// A fresh snapshot of the current value.
    pub fn value(&self) -> JsValue {
        value_to_js(&self.inner.value())
    }

    /// Assign a new value: a full replacement for a scalar, a patch for
    /// a record. Throws on unknown fields or shape mismatches.
    pub fn set(&mut self, value: &JsValue) -> Result<(), JsError> {
        self.inner
            .set(js_to_value(value)?)
            .map_err(|err| JsError::new(&err.to_string()))
    }

    /// `true` iff no uncommitted change exists.
    pub fn pristine(&self) -> bool {
        self.inner.pristine()
    }

    /// `true` iff at least one uncommitted change exists.
    pub fn dirty(&self) -> bool {
        self.inner.dirty()
    }

    /// Make the current value the new baseline.
    pub fn commit(&mut self) {
        self.inner.commit();
    }

    /// Restore the committed baseline.
    pub fn revert(&mut self) {
        self.inner.revert();
    }

    /// The changes since the last commit as a plain object whose shape
    /// mirrors the tracked value, or `undefined` when pristine.
    pub fn diff(&self) -> JsValue {
        match self.inner.diff() {
            Some(diff) => diff_to_js(&diff),
            None => JsValue::UNDEFINED,
        }
    }
}
