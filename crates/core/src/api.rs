//! The network collaborator seam.
//!
//! The page controller talks to the case backend only through [`CaseApi`], so
//! handlers can run against an in-memory double in tests and against the reqwest
//! client (`findthem-client`) everywhere else.

use async_trait::async_trait;
use findthem_types::PersonId;

use crate::error::ApiResult;
use crate::forms::FormData;
use crate::models::{PersonRecord, SightingReport, SubmitAck};

/// Free-text query and region facet for the search endpoint.
///
/// Both parts are sent even when empty; the backend treats an empty value as
/// "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub region: String,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            region: region.into(),
        }
    }

    /// An unfiltered query, which returns every case.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.region.is_empty()
    }
}

/// Operations the page performs against the case backend.
#[async_trait]
pub trait CaseApi: Send + Sync {
    /// `GET /search?q=..&region=..`
    async fn search(&self, query: &SearchQuery) -> ApiResult<Vec<PersonRecord>>;

    /// Looks up a single case. `Ok(None)` means the backend has no such case.
    async fn fetch_person(&self, id: &PersonId) -> ApiResult<Option<PersonRecord>>;

    /// `POST /report-missing` as multipart form data.
    async fn report_missing(&self, form: &FormData) -> ApiResult<SubmitAck>;

    /// `POST /volunteer-signup` with the form flattened to a JSON object.
    async fn volunteer_signup(&self, form: &FormData) -> ApiResult<SubmitAck>;

    /// `POST /report-sighting` with a JSON body.
    async fn report_sighting(&self, report: &SightingReport) -> ApiResult<SubmitAck>;
}

/// Picks the record whose id loosely matches `id` out of a full result set.
///
/// This is the fallback detail lookup for backends that only expose `/search`.
pub fn find_person(records: Vec<PersonRecord>, id: &PersonId) -> Option<PersonRecord> {
    records.into_iter().find(|record| record.id.matches(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: serde_json::Value, name: &str) -> PersonRecord {
        serde_json::from_value(serde_json::json!({ "id": id, "name": name })).unwrap()
    }

    #[test]
    fn empty_query_has_neither_text_nor_region() {
        assert!(SearchQuery::all().is_empty());
        assert!(!SearchQuery::new("", "Northeast").is_empty());
        assert!(!SearchQuery::new("Jane", "").is_empty());
    }

    #[test]
    fn find_person_compares_ids_loosely() {
        let records = vec![
            record(serde_json::json!(1), "Sarah"),
            record(serde_json::json!(2), "David"),
        ];
        let found = find_person(records, &PersonId::parse("2").unwrap()).unwrap();
        assert_eq!(found.name, "David");
    }

    #[test]
    fn find_person_returns_none_for_unknown_id() {
        let records = vec![record(serde_json::json!(1), "Sarah")];
        assert!(find_person(records, &PersonId::parse("42").unwrap()).is_none());
    }
}
