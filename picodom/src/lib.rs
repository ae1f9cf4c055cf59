// SPDX-License-Identifier: Apache-2.0

//! A self-contained JSON document-object-model.
//!
//! [`JsonValue`] represents any JSON value as an owned tree: build it
//! programmatically, parse it from text, mutate it through auto-vivifying
//! accessors, and serialize it back in compact or tab-indented form.
//!
//! Value-level access never fails: reads that miss return a shared sentinel
//! so lookups chain safely, and writes that cannot apply are silent no-ops.
//! Only document-level parsing and file I/O report errors.
//!
//! The text format is JSON plus documented extensions: `NaN`, `Infinity`
//! and `-Infinity` are accepted as float literals and re-emitted bare.
//!
//! ```
//! use picodom::JsonValue;
//!
//! let mut doc = JsonValue::new();
//! doc.set("name", "picodom");
//! if let Some(items) = doc.entry("items") {
//!     if let Some(slot) = items.entry_at(1) {
//!         slot.assign(2_i64);
//!     }
//! }
//!
//! assert!(doc["items"][0].is_null());
//! assert_eq!(doc["items"][1].to_integer(), 2);
//! assert!(doc["missing"]["chain"].is_sentinel());
//!
//! let text = doc.to_json(true);
//! assert_eq!(text, r#"{"name":"picodom","items":[null,2]}"#);
//! assert_eq!(JsonValue::parse(&text).unwrap(), doc);
//! ```

mod buffer;
mod error;
mod escape;
mod io;
mod number;
mod parser;
mod value;
mod writer;

pub use error::{JsonError, ParseError, ParseErrorKind};
pub use value::{JsonType, JsonValue, Members};
