// SPDX-License-Identifier: Apache-2.0

//! Whole-file helpers: read-and-parse, serialize-and-write.
//!
//! Both directions move the entire document in one call; there is no
//! streaming. See [`crate::JsonError::error_line`] for the -1/line failure
//! signal.

use std::fs;
use std::path::Path;

use crate::error::JsonError;
use crate::value::JsonValue;

impl JsonValue {
    /// Reads `path` in full and parses it as a JSON document.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<JsonValue, JsonError> {
        let text = fs::read_to_string(path)?;
        Ok(JsonValue::parse(&text)?)
    }

    /// Serializes the tree and writes it to `path` in a single call,
    /// replacing any existing file.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, compact: bool) -> Result<(), JsonError> {
        fs::write(path, self.to_json(compact))?;
        Ok(())
    }
}
