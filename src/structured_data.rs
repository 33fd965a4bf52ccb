//! STRUCTURED-DATA as a mapping from SD-ID to its parameters.
//!
//! Both levels keep insertion order so encoding is deterministic, but
//! equality ignores order: two messages carrying the same elements in a
//! different sequence compare equal.

use std::borrow::Cow;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One SD-ELEMENT: an SD-ID and its (name, value) parameters. Parameter
/// names are unique; inserting an existing name overwrites its value.
#[derive(Clone, Debug, Eq)]
pub struct SdElement {
    id: String,
    params: Vec<(String, String)>,
}

impl SdElement {
    fn new(id: String) -> Self {
        SdElement {
            id,
            params: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set `name` to `value`, last write wins.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.params.iter_mut().find(|(key, _)| *key == name) {
            Some((_, old)) => *old = value,
            None => self.params.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl PartialEq for SdElement {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .all(|(name, value)| other.get(name) == Some(value.as_str()))
    }
}

impl Serialize for SdElement {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(self.params.len()))?;
        for (name, value) in &self.params {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for SdElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.id)?;
        for (name, value) in &self.params {
            write!(f, " {}=\"{}\"", name, escape_param_value(value))?;
        }
        f.write_str("]")
    }
}

#[derive(Clone, Debug, Default, Eq)]
pub struct StructuredData {
    elements: Vec<SdElement>,
}

impl StructuredData {
    pub fn new() -> Self {
        StructuredData::default()
    }

    /// Returns the element for `id`, creating an empty one if it is not
    /// there yet. A repeated SD-ID merges into the first element.
    pub fn insert_element(&mut self, id: impl Into<String>) -> &mut SdElement {
        let id = id.into();
        let index = match self.elements.iter().position(|element| element.id == id) {
            Some(index) => index,
            None => {
                self.elements.push(SdElement::new(id));
                self.elements.len() - 1
            }
        };

        &mut self.elements[index]
    }

    pub fn insert(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.insert_element(id).insert(name, value);
    }

    pub fn get(&self, id: &str) -> Option<&SdElement> {
        self.elements.iter().find(|element| element.id == id)
    }

    /// Lookup by SD-ID, param name pair
    pub fn param(&self, id: &str, name: &str) -> Option<&str> {
        self.get(id).and_then(|element| element.get(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SdElement> {
        self.elements.iter()
    }

    /// The number of distinct SD-IDs
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl PartialEq for StructuredData {
    fn eq(&self, other: &Self) -> bool {
        self.elements.len() == other.elements.len()
            && self
                .elements
                .iter()
                .all(|element| other.get(&element.id) == Some(element))
    }
}

impl Serialize for StructuredData {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(self.elements.len()))?;
        for element in &self.elements {
            map.serialize_entry(&element.id, element)?;
        }
        map.end()
    }
}

/// Wire form: `-` when empty, otherwise the elements back to back.
impl fmt::Display for StructuredData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return f.write_str(crate::rfc5424::NILVALUE);
        }
        for element in &self.elements {
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

fn needs_escape(ch: char) -> bool {
    matches!(ch, '"' | '\\' | ']')
}

/// Escape `"`, `\` and `]` inside a PARAM-VALUE (RFC 5424 section 6.3.3).
pub(crate) fn escape_param_value(value: &str) -> Cow<'_, str> {
    if !value.contains(needs_escape) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 4);
    for ch in value.chars() {
        if needs_escape(ch) {
            out.push('\\');
        }
        out.push(ch);
    }

    Cow::Owned(out)
}

/// Inverse of [`escape_param_value`]. A backslash before any other character
/// is kept as is.
pub(crate) fn unescape_param_value(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some(next) if needs_escape(next) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }

    Cow::Owned(out)
}
