//! reqwest implementation of [`CaseApi`].

use async_trait::async_trait;
use findthem_core::constants::{
    PERSONS_PATH, REPORT_MISSING_PATH, REPORT_SIGHTING_PATH, SEARCH_PATH, VOLUNTEER_SIGNUP_PATH,
};
use findthem_core::{
    find_person, ApiError, ApiResult, CaseApi, FormData, FormValue, PersonId, PersonRecord,
    SearchQuery, SightingReport, SubmitAck,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ClientConfig, ClientResult, DetailLookup};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Talks to the case backend over HTTP.
///
/// No retries: a failed call is reported once and the user decides whether to
/// try again.
#[derive(Clone, Debug)]
pub struct HttpCaseApi {
    client: Client,
    cfg: ClientConfig,
}

impl HttpCaseApi {
    pub fn new(cfg: ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder().user_agent(APP_USER_AGENT);
        if let Some(timeout) = cfg.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, cfg })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.cfg
    }

    fn person_url(&self, id: &PersonId) -> ApiResult<Url> {
        let mut url = Url::parse(&self.cfg.endpoint(PERSONS_PATH))
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport("base url cannot carry a path".into()))?
            .push(id.as_str());
        Ok(url)
    }

    /// Sends the request and returns the status and body, whatever the status.
    /// Callers decide which statuses are failures.
    async fn send(&self, request: RequestBuilder) -> ApiResult<(StatusCode, String)> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok((status, body))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "case API returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<SubmitAck> {
        let payload = serde_json::to_vec(body)?;
        let request = self
            .client
            .post(self.cfg.endpoint(path))
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        self.fetch_json(request).await
    }

    async fn scan_for_person(&self, id: &PersonId) -> ApiResult<Option<PersonRecord>> {
        let records = self.search(&SearchQuery::all()).await?;
        Ok(find_person(records, id))
    }

    async fn fetch_person_direct(&self, id: &PersonId) -> ApiResult<Option<PersonRecord>> {
        let url = self.person_url(id)?;
        let (status, body) = self.send(self.client.get(url)).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Builds the multipart body for a report form, files included.
fn multipart_form(data: &FormData) -> ApiResult<Form> {
    let mut form = Form::new();
    for (name, value) in data.entries() {
        form = match value {
            FormValue::Text(text) => form.text(name.clone(), text.clone()),
            FormValue::File(file) => {
                let mut part = Part::bytes(file.bytes.clone()).file_name(file.filename.clone());
                if let Some(content_type) = &file.content_type {
                    part = part
                        .mime_str(content_type)
                        .map_err(|e| ApiError::InvalidPart {
                            field: name.clone(),
                            reason: e.to_string(),
                        })?;
                }
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl CaseApi for HttpCaseApi {
    async fn search(&self, query: &SearchQuery) -> ApiResult<Vec<PersonRecord>> {
        tracing::debug!(q = %query.text, region = %query.region, "GET {}", SEARCH_PATH);
        let request = self
            .client
            .get(self.cfg.endpoint(SEARCH_PATH))
            .query(&[("q", query.text.as_str()), ("region", query.region.as_str())]);
        self.fetch_json(request).await
    }

    async fn fetch_person(&self, id: &PersonId) -> ApiResult<Option<PersonRecord>> {
        match self.cfg.detail_lookup() {
            DetailLookup::ScanSearch => self.scan_for_person(id).await,
            DetailLookup::Direct => self.fetch_person_direct(id).await,
        }
    }

    async fn report_missing(&self, data: &FormData) -> ApiResult<SubmitAck> {
        tracing::debug!(fields = data.entries().len(), "POST {}", REPORT_MISSING_PATH);
        let request = self
            .client
            .post(self.cfg.endpoint(REPORT_MISSING_PATH))
            .multipart(multipart_form(data)?);
        self.fetch_json(request).await
    }

    async fn volunteer_signup(&self, data: &FormData) -> ApiResult<SubmitAck> {
        tracing::debug!("POST {}", VOLUNTEER_SIGNUP_PATH);
        self.post_json(VOLUNTEER_SIGNUP_PATH, &data.to_json_object())
            .await
    }

    async fn report_sighting(&self, report: &SightingReport) -> ApiResult<SubmitAck> {
        tracing::debug!(person_id = %report.person_id, "POST {}", REPORT_SIGHTING_PATH);
        self.post_json(REPORT_SIGHTING_PATH, report).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findthem_core::FilePart;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(server: &MockServer, lookup: DetailLookup) -> HttpCaseApi {
        let base_url = findthem_core::NonEmptyText::new(server.uri()).unwrap();
        HttpCaseApi::new(ClientConfig::new(base_url, None, lookup).unwrap()).unwrap()
    }

    fn cases() -> serde_json::Value {
        serde_json::json!([
            {
                "id": 1,
                "name": "Sarah Johnson",
                "age": 28,
                "gender": "Female",
                "last_seen": "Central Park, New York",
                "last_seen_date": "2024-01-15",
                "region": "Northeast",
                "description": "Red jacket",
                "contact_name": "Michael Johnson",
                "contact_phone": "(555) 123-4567",
                "contact_email": "m.johnson@email.com",
                "photo_url": "/static/images/default-avatar.png"
            },
            {
                "id": 2,
                "name": "David Chen",
                "age": 45,
                "gender": "Male",
                "last_seen": "Downtown Seattle",
                "last_seen_date": "2024-01-10",
                "region": "Northwest",
                "description": "Glasses",
                "contact_name": "Lisa Chen",
                "contact_phone": "(555) 987-6543",
                "contact_email": "l.chen@email.com",
                "photo_url": "/static/images/default-avatar.png"
            }
        ])
    }

    #[tokio::test]
    async fn search_sends_both_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Jane Doe"))
            .and(query_param("region", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(cases()))
            .expect(1)
            .mount(&server)
            .await;

        let records = api(&server, DetailLookup::ScanSearch)
            .search(&SearchQuery::new("Jane Doe", ""))
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "David Chen");
        assert_eq!(records[1].age, "45");
    }

    #[tokio::test]
    async fn server_error_is_a_status_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = api(&server, DetailLookup::ScanSearch)
            .search(&SearchQuery::new("x", ""))
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_returns_error_statuses_to_the_caller() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/persons/3"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such case"))
            .mount(&server)
            .await;

        let api = api(&server, DetailLookup::Direct);
        let request = api.client.get(format!("{}/persons/3", server.uri()));
        let (status, body) = api.send(request).await.unwrap();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "no such case");
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = api(&server, DetailLookup::ScanSearch)
            .search(&SearchQuery::new("x", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let cfg = ClientConfig::new(
            findthem_core::NonEmptyText::new(base_url).unwrap(),
            None,
            DetailLookup::ScanSearch,
        )
        .unwrap();
        let api = HttpCaseApi::new(cfg).unwrap();

        let err = api.search(&SearchQuery::new("x", "")).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn scan_lookup_filters_unfiltered_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", ""))
            .and(query_param("region", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(cases()))
            .expect(2)
            .mount(&server)
            .await;

        let api = api(&server, DetailLookup::ScanSearch);
        let found = api
            .fetch_person(&PersonId::parse("2").unwrap())
            .await
            .unwrap();
        let missing = api
            .fetch_person(&PersonId::parse("99").unwrap())
            .await
            .unwrap();

        assert_eq!(found.map(|p| p.name), Some("David Chen".to_string()));
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn direct_lookup_maps_404_to_none() {
        let server = MockServer::start().await;
        let person = cases()[0].clone();
        Mock::given(method("GET"))
            .and(path("/persons/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(person))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/persons/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api = api(&server, DetailLookup::Direct);
        let found = api
            .fetch_person(&PersonId::parse("1").unwrap())
            .await
            .unwrap();
        let missing = api
            .fetch_person(&PersonId::parse("404").unwrap())
            .await
            .unwrap();

        assert_eq!(found.map(|p| p.name), Some("Sarah Johnson".to_string()));
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn volunteer_signup_posts_flat_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/volunteer-signup"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "name": "Lee",
                "availability": "weekends"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "success": true, "message": "ok" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let form: FormData = [("name", "Lee"), ("availability", "weekends")]
            .into_iter()
            .collect();
        let ack = api(&server, DetailLookup::ScanSearch)
            .volunteer_signup(&form)
            .await
            .unwrap();

        assert!(ack.success);
        assert_eq!(ack.message.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn sighting_is_posted_in_camel_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/report-sighting"))
            .and(body_json(serde_json::json!({
                "personId": "1",
                "location": "Pier 39",
                "date": "2024-02-02",
                "details": "Walking north",
                "reporterName": "Robin",
                "reporterContact": "555-0100"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": false })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let report = SightingReport {
            person_id: PersonId::parse("1").unwrap(),
            location: "Pier 39".into(),
            date: "2024-02-02".into(),
            details: "Walking north".into(),
            reporter_name: "Robin".into(),
            reporter_contact: "555-0100".into(),
        };
        let ack = api(&server, DetailLookup::ScanSearch)
            .report_sighting(&report)
            .await
            .unwrap();

        assert!(!ack.success);
    }

    #[tokio::test]
    async fn missing_person_report_is_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/report-missing"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
            )
            .mount(&server)
            .await;

        let mut form: FormData = [("name", "Alex Kim"), ("region", "Southwest")]
            .into_iter()
            .collect();
        form.push_file(
            "photo",
            FilePart {
                filename: "alex.png".into(),
                content_type: Some("image/png".into()),
                bytes: b"PNGDATA".to_vec(),
            },
        );

        let ack = api(&server, DetailLookup::ScanSearch)
            .report_missing(&form)
            .await
            .unwrap();
        assert!(ack.success);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let content_type = requests[0]
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data"), "got {content_type}");

        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"name\""));
        assert!(body.contains("Alex Kim"));
        assert!(body.contains("filename=\"alex.png\""));
        assert!(body.contains("PNGDATA"));
    }

    #[test]
    fn invalid_file_content_type_is_rejected() {
        let mut form = FormData::new();
        form.push_file(
            "photo",
            FilePart {
                filename: "x.bin".into(),
                content_type: Some("not a mime type".into()),
                bytes: vec![],
            },
        );

        assert!(matches!(
            multipart_form(&form),
            Err(ApiError::InvalidPart { .. })
        ));
    }
}
