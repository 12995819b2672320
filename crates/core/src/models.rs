//! Records exchanged with the case API.
//!
//! Everything here is transient: records are decoded from a response, rendered,
//! and dropped. Nothing is cached between operations.

use std::collections::BTreeSet;
use std::fmt;

use findthem_types::PersonId;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{
    REPORTER_CONTACT_INPUT, REPORTER_NAME_INPUT, SIGHTING_DATE_INPUT, SIGHTING_DETAILS_INPUT,
    SIGHTING_LOCATION_INPUT,
};
use crate::error::{FormError, FormResult};
use crate::forms::FormData;

/// A missing-person case as returned by the search endpoint.
///
/// Text fields the backend omits or sends as `null` decode to empty strings, so a
/// sparse record still renders (the page shows the blank rather than failing).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: PersonId,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub age: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub gender: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub last_seen: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub last_seen_date: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub photo_url: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub contact_name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub contact_phone: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_reported: Option<String>,
}

/// Accepts any JSON value. Scalars render as text (`28`, `true`), null, arrays
/// and objects as empty. Ages are stored as numbers for seeded cases but as
/// form text for reported ones.
fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'a> serde::de::Visitor<'a> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a JSON value")
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_seq<A: serde::de::SeqAccess<'a>>(self, mut seq: A) -> Result<String, A::Error> {
            while seq.next_element::<serde::de::IgnoredAny>()?.is_some() {}
            Ok(String::new())
        }

        fn visit_map<A: serde::de::MapAccess<'a>>(self, mut map: A) -> Result<String, A::Error> {
            while map
                .next_entry::<serde::de::IgnoredAny, serde::de::IgnoredAny>()?
                .is_some()
            {}
            Ok(String::new())
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

/// Distinct, non-empty regions of the given records in sorted order.
///
/// Used to populate the region filter options the way the browse page does.
pub fn regions_from_records(records: &[PersonRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.region.trim())
        .filter(|region| !region.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A report of having seen a specific missing person.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingReport {
    pub person_id: PersonId,
    pub location: String,
    pub date: String,
    pub details: String,
    pub reporter_name: String,
    pub reporter_contact: String,
}

impl SightingReport {
    /// Builds a report from the sighting form inputs and the hidden person id.
    ///
    /// # Errors
    ///
    /// Returns `FormError::MissingPersonId` when the hidden input is blank, which
    /// happens if the form is submitted after a reset without reopening it.
    pub fn from_form(person_id: &str, form: &FormData) -> FormResult<Self> {
        if person_id.trim().is_empty() {
            return Err(FormError::MissingPersonId);
        }
        Ok(Self {
            person_id: PersonId::parse(person_id)?,
            location: form.text(SIGHTING_LOCATION_INPUT).to_owned(),
            date: form.text(SIGHTING_DATE_INPUT).to_owned(),
            details: form.text(SIGHTING_DETAILS_INPUT).to_owned(),
            reporter_name: form.text(REPORTER_NAME_INPUT).to_owned(),
            reporter_contact: form.text(REPORTER_CONTACT_INPUT).to_owned(),
        })
    }
}

/// Body returned by every submission endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitAck {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected() -> Self {
        Self::default()
    }
}
