// SPDX-License-Identifier: Apache-2.0

//! The JSON value tree.
//!
//! [`JsonValue`] is the single entity of the crate: a sum-type payload with
//! an optional member name. Containers own their children in insertion
//! order; name and index lookup are linear scans.
//!
//! Value-level operations are fail-soft and never panic. Reads that miss
//! resolve to the shared [`JsonValue::invalid`] sentinel so access can chain
//! (`&doc["a"][0]` is safe on any shape); writes that cannot apply resolve
//! to `None` or a silent no-op.

use core::fmt;
use core::mem;
use core::ops::Index;

use crate::error::ParseError;
use crate::parser;
use crate::writer;

/// The type of a [`JsonValue`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Null,
    Object,
    Array,
    String,
    Boolean,
    Integer,
    Float,
}

/// Payload storage. The enum makes "exactly one payload is live" structural
/// rather than a convention.
#[derive(Debug, Clone)]
enum Kind {
    Null,
    Object(Vec<JsonValue>),
    Array(Vec<JsonValue>),
    String(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
}

/// A JSON document value.
///
/// Defaults to `Null`; assignment and auto-vivification reshape it in place.
/// A member of an Object additionally carries its name.
#[derive(Debug, Clone)]
pub struct JsonValue {
    kind: Kind,
    name: Option<String>,
    sentinel: bool,
}

/// The process-wide "no such element" sentinel. Never mutated: the mutable
/// API cannot reach it, and every mutation entry point additionally checks
/// the sentinel flag so clones of it are equally inert.
static INVALID: JsonValue = JsonValue {
    kind: Kind::Null,
    name: None,
    sentinel: true,
};

impl JsonValue {
    /// Creates a `Null` value.
    pub const fn new() -> Self {
        JsonValue {
            kind: Kind::Null,
            name: None,
            sentinel: false,
        }
    }

    /// Creates an empty Object.
    pub fn new_object() -> Self {
        JsonValue {
            kind: Kind::Object(Vec::new()),
            name: None,
            sentinel: false,
        }
    }

    /// Creates an empty Array.
    pub fn new_array() -> Self {
        JsonValue {
            kind: Kind::Array(Vec::new()),
            name: None,
            sentinel: false,
        }
    }

    /// The shared read-only sentinel returned by lookups that miss.
    pub fn invalid() -> &'static JsonValue {
        &INVALID
    }

    /// Parses a JSON document from text.
    ///
    /// Trailing input after a complete top-level value is ignored.
    pub fn parse(text: &str) -> Result<JsonValue, ParseError> {
        parser::parse_document(text)
    }

    /// Serializes the tree to JSON text, compact or tab-indented.
    pub fn to_json(&self, compact: bool) -> String {
        writer::write_document(self, compact)
    }

    /// The payload type. The sentinel reports `Null`.
    pub fn json_type(&self) -> JsonType {
        match &self.kind {
            Kind::Null => JsonType::Null,
            Kind::Object(_) => JsonType::Object,
            Kind::Array(_) => JsonType::Array,
            Kind::String(_) => JsonType::String,
            Kind::Boolean(_) => JsonType::Boolean,
            Kind::Integer(_) => JsonType::Integer,
            Kind::Float(_) => JsonType::Float,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind, Kind::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, Kind::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, Kind::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, Kind::String(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.kind, Kind::Boolean(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.kind, Kind::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self.kind, Kind::Float(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, Kind::Integer(_) | Kind::Float(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, Kind::Object(_) | Kind::Array(_))
    }

    /// True for the [`JsonValue::invalid`] sentinel and its clones.
    pub fn is_sentinel(&self) -> bool {
        self.sentinel
    }

    /// The member name, present only when this value is an Object member.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of children of a container; `0` for everything else.
    pub fn member_count(&self) -> usize {
        self.children().map_or(0, Vec::len)
    }

    // ------------------------------------------------------------------
    // Coercions
    // ------------------------------------------------------------------

    /// The string payload, or `None` if this is not a String.
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            Kind::String(text) => Some(text),
            _ => None,
        }
    }

    /// The boolean payload, or `None` if this is not a Boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match &self.kind {
            Kind::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer payload, or `None` if this is not an Integer.
    pub fn as_integer(&self) -> Option<i64> {
        match &self.kind {
            Kind::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// The float payload, or `None` if this is not a Float.
    pub fn as_float(&self) -> Option<f64> {
        match &self.kind {
            Kind::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The string payload, or `""` on any other type.
    pub fn to_str(&self) -> &str {
        self.as_str().unwrap_or("")
    }

    /// The boolean payload, or `false` on any other type.
    pub fn to_boolean(&self) -> bool {
        self.as_boolean().unwrap_or(false)
    }

    /// The integer payload; a Float truncates; anything else is `0`.
    pub fn to_integer(&self) -> i64 {
        match &self.kind {
            Kind::Integer(value) => *value,
            Kind::Float(value) => *value as i64,
            _ => 0,
        }
    }

    /// The float payload; an Integer converts; anything else is `0.0`.
    pub fn to_float(&self) -> f64 {
        match &self.kind {
            Kind::Float(value) => *value,
            Kind::Integer(value) => *value as f64,
            _ => 0.0,
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// The Object member named `name`, or the sentinel if this is not an
    /// Object or no member matches. Names compare by exact byte equality.
    pub fn get(&self, name: &str) -> &JsonValue {
        if let Kind::Object(children) = &self.kind {
            for child in children {
                if child.name.as_deref() == Some(name) {
                    return child;
                }
            }
        }
        JsonValue::invalid()
    }

    /// The child at `index` of a container, or the sentinel if out of range
    /// or this is not a container.
    pub fn at(&self, index: usize) -> &JsonValue {
        match self.children() {
            Some(children) => children.get(index).unwrap_or_else(|| JsonValue::invalid()),
            None => JsonValue::invalid(),
        }
    }

    /// Read-only forward iterator over a container's children; empty for
    /// non-containers.
    pub fn members(&self) -> Members<'_> {
        let slice: &[JsonValue] = match &self.kind {
            Kind::Object(children) | Kind::Array(children) => children,
            _ => &[],
        };
        Members {
            inner: slice.iter(),
        }
    }

    // ------------------------------------------------------------------
    // Write access
    // ------------------------------------------------------------------

    /// The mutable Object member named `name`, auto-vivifying as needed: a
    /// `Null` receiver becomes an empty Object first, and a missing member
    /// is appended as a new `Null` child owning `name`.
    ///
    /// Returns `None` — with no mutation or allocation — when the receiver
    /// is the sentinel, the name is empty, or the receiver is neither Null
    /// nor an Object.
    pub fn entry(&mut self, name: &str) -> Option<&mut JsonValue> {
        if self.sentinel || name.is_empty() {
            return None;
        }
        if matches!(self.kind, Kind::Null) {
            self.kind = Kind::Object(Vec::new());
        }
        let Kind::Object(children) = &mut self.kind else {
            return None;
        };
        if let Some(found) = children
            .iter()
            .position(|child| child.name.as_deref() == Some(name))
        {
            return children.get_mut(found);
        }
        let mut member = JsonValue::new();
        member.name = Some(name.to_string());
        children.push(member);
        children.last_mut()
    }

    /// The mutable child at `index`, auto-vivifying as needed: a `Null`
    /// receiver becomes an empty Array first, and an Array is extended with
    /// `Null` elements until `index` exists. Objects are addressable in
    /// range but never extended by index.
    ///
    /// Returns `None` when the receiver is the sentinel, is neither Null nor
    /// a container, or is an Object with `index` out of range.
    pub fn entry_at(&mut self, index: usize) -> Option<&mut JsonValue> {
        if self.sentinel {
            return None;
        }
        if matches!(self.kind, Kind::Null) {
            self.kind = Kind::Array(Vec::new());
        }
        let extendable = matches!(self.kind, Kind::Array(_));
        let children = self.children_mut()?;
        if index < children.len() {
            return children.get_mut(index);
        }
        if !extendable {
            return None;
        }
        while children.len() <= index {
            children.push(JsonValue::new());
        }
        children.get_mut(index)
    }

    /// Replaces the payload with `value`'s, keeping this value's name.
    /// Silent no-op on the sentinel.
    pub fn assign(&mut self, value: impl Into<JsonValue>) -> &mut Self {
        if !self.sentinel {
            let mut source = value.into();
            self.kind = mem::replace(&mut source.kind, Kind::Null);
        }
        self
    }

    /// Sets the member `name` to `value`, auto-vivifying through
    /// [`JsonValue::entry`]. No-op where `entry` would refuse.
    pub fn set(&mut self, name: &str, value: impl Into<JsonValue>) -> &mut Self {
        if let Some(member) = self.entry(name) {
            member.assign(value);
        }
        self
    }

    /// Sets the element at `index` to `value`, auto-vivifying through
    /// [`JsonValue::entry_at`]. No-op where `entry_at` would refuse.
    pub fn set_at(&mut self, index: usize, value: impl Into<JsonValue>) -> &mut Self {
        if let Some(element) = self.entry_at(index) {
            element.assign(value);
        }
        self
    }

    /// Appends to this value: an Array gains `value` as a new element; a
    /// String is extended when `value` is also a String. Anything else,
    /// including the sentinel, is a silent no-op.
    pub fn append(&mut self, value: impl Into<JsonValue>) -> &mut Self {
        if self.sentinel {
            return self;
        }
        let mut source = value.into();
        match &mut self.kind {
            Kind::Array(children) => {
                source.name = None;
                source.sentinel = false;
                children.push(source);
            }
            Kind::String(text) => {
                if let Kind::String(addition) = &source.kind {
                    text.push_str(addition);
                }
            }
            _ => {}
        }
        self
    }

    // ------------------------------------------------------------------
    // Internal
    // ------------------------------------------------------------------

    fn children(&self) -> Option<&Vec<JsonValue>> {
        match &self.kind {
            Kind::Object(children) | Kind::Array(children) => Some(children),
            _ => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<JsonValue>> {
        match &mut self.kind {
            Kind::Object(children) | Kind::Array(children) => Some(children),
            _ => None,
        }
    }

    /// Attaches a member name. Parser-side: names are set on freshly parsed
    /// children before they join their Object.
    pub(crate) fn give_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Appends a parsed child to a container without the public API's
    /// copy-in semantics.
    pub(crate) fn push_child(&mut self, child: JsonValue) {
        if let Some(children) = self.children_mut() {
            children.push(child);
        }
    }
}

impl Default for JsonValue {
    fn default() -> Self {
        Self::new()
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue {
            kind: Kind::Boolean(value),
            name: None,
            sentinel: false,
        }
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue {
            kind: Kind::Integer(value),
            name: None,
            sentinel: false,
        }
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::from(value as i64)
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue {
            kind: Kind::Float(value),
            name: None,
            sentinel: false,
        }
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::from(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue {
            kind: Kind::String(value),
            name: None,
            sentinel: false,
        }
    }
}

impl From<&JsonValue> for JsonValue {
    fn from(value: &JsonValue) -> Self {
        value.clone()
    }
}

impl Index<&str> for JsonValue {
    type Output = JsonValue;

    fn index(&self, name: &str) -> &JsonValue {
        self.get(name)
    }
}

impl Index<usize> for JsonValue {
    type Output = JsonValue;

    fn index(&self, index: usize) -> &JsonValue {
        self.at(index)
    }
}

/// Structural equality: type, name, ordered children, scalar payloads.
/// Two NaN floats compare equal so round-tripped trees stay comparable.
impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name {
            return false;
        }
        match (&self.kind, &other.kind) {
            (Kind::Null, Kind::Null) => true,
            (Kind::Object(a), Kind::Object(b)) => a == b,
            (Kind::Array(a), Kind::Array(b)) => a == b,
            (Kind::String(a), Kind::String(b)) => a == b,
            (Kind::Boolean(a), Kind::Boolean(b)) => a == b,
            (Kind::Integer(a), Kind::Integer(b)) => a == b,
            (Kind::Float(a), Kind::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json(true))
    }
}

/// Dropping a deep tree must not recurse once per nesting level: children
/// are drained into a flat worklist so every node drops with an already
/// empty child vector.
impl Drop for JsonValue {
    fn drop(&mut self) {
        let Some(children) = self.children_mut() else {
            return;
        };
        if children.is_empty() {
            return;
        }
        let mut worklist = mem::take(children);
        let mut index = 0;
        while index < worklist.len() {
            let mut grandchildren = match worklist.get_mut(index).and_then(Self::children_mut) {
                Some(nested) => mem::take(nested),
                None => Vec::new(),
            };
            worklist.append(&mut grandchildren);
            index += 1;
        }
    }
}

/// Read-only forward iterator over a container's children.
#[derive(Debug, Clone)]
pub struct Members<'a> {
    inner: core::slice::Iter<'a, JsonValue>,
}

impl<'a> Iterator for Members<'a> {
    type Item = &'a JsonValue;

    fn next(&mut self) -> Option<&'a JsonValue> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Members<'_> {}

impl<'a> IntoIterator for &'a JsonValue {
    type Item = &'a JsonValue;
    type IntoIter = Members<'a>;

    fn into_iter(self) -> Members<'a> {
        self.members()
    }
}
