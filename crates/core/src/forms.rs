//! Submitted form contents.
//!
//! [`FormData`] keeps entries in document order with duplicates, like the
//! browser's own form data, and offers the two encodings the page uses: the raw
//! entry list (sent as multipart by the client) and a flat JSON object.

use serde_json::{Map, Value};

/// The forms the page intercepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormId {
    MissingPerson,
    Volunteer,
    Contact,
    Sighting,
}

impl FormId {
    /// Element id of the form in the page markup.
    pub fn element_id(self) -> &'static str {
        use crate::constants::*;
        match self {
            FormId::MissingPerson => MISSING_PERSON_FORM_ID,
            FormId::Volunteer => VOLUNTEER_FORM_ID,
            FormId::Contact => CONTACT_FORM_ID,
            FormId::Sighting => SIGHTING_FORM_ID,
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        [
            FormId::MissingPerson,
            FormId::Volunteer,
            FormId::Contact,
            FormId::Sighting,
        ]
        .into_iter()
        .find(|form| form.element_id() == id)
    }
}

/// An uploaded file field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FilePart),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .push((name.into(), FormValue::Text(value.into())));
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: FilePart) {
        self.entries.push((name.into(), FormValue::File(file)));
    }

    pub fn entries(&self) -> &[(String, FormValue)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First text value for `name`, or the empty string when absent.
    pub fn text(&self, name: &str) -> &str {
        self.entries
            .iter()
            .find_map(|(key, value)| match value {
                FormValue::Text(text) if key == name => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or("")
    }

    /// Flattens the entries into a JSON object.
    ///
    /// Later entries overwrite earlier ones with the same name, and file parts
    /// become empty objects, matching what `JSON.stringify(Object.fromEntries(..))`
    /// sends for the same form.
    pub fn to_json_object(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.entries {
            let json = match value {
                FormValue::Text(text) => Value::String(text.clone()),
                FormValue::File(_) => Value::Object(Map::new()),
            };
            map.insert(name.clone(), json);
        }
        Value::Object(map)
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (name, value) in iter {
            form.push_text(name, value);
        }
        form
    }
}
