//! End-to-end page sessions against an in-process case backend.
//!
//! The backend is a small axum app serving the same routes and payload shapes as
//! the production server, so the controller and the HTTP client are exercised
//! together over a real socket.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use findthem_client::{ClientConfig, DetailLookup, HttpCaseApi};
use findthem_core::constants::*;
use findthem_core::{
    Effect, ElementRef, FormData, FormId, ModalId, NonEmptyText, PageConfig, PageController,
    ResultsPanel, UiEvent, Visibility,
};
use scraper::{Html, Selector};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Backend {
    cases: Arc<Vec<Value>>,
    missing_fields: Arc<Mutex<Vec<String>>>,
    volunteers: Arc<Mutex<Vec<Value>>>,
    sightings: Arc<Mutex<Vec<Value>>>,
}

async fn search(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    let region = params.get("region").cloned().unwrap_or_default();
    let hits = backend
        .cases
        .iter()
        .filter(|case| {
            let text = |key: &str| case[key].as_str().unwrap_or_default().to_lowercase();
            (q.is_empty() || text("name").contains(&q) || text("last_seen").contains(&q))
                && (region.is_empty() || case["region"] == region.as_str())
        })
        .cloned()
        .collect::<Vec<_>>();
    Json(Value::Array(hits))
}

async fn report_missing(
    State(backend): State<Backend>,
    mut multipart: Multipart,
) -> Result<Json<Value>, StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        backend.missing_fields.lock().unwrap().push(name);
    }
    Ok(Json(json!({ "success": true, "message": "Report submitted successfully" })))
}

async fn volunteer_signup(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend.volunteers.lock().unwrap().push(body);
    Json(json!({ "success": true }))
}

async fn report_sighting(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend.sightings.lock().unwrap().push(body);
    Json(json!({ "success": true, "message": "Sighting reported successfully" }))
}

async fn start_backend(cases: Vec<Value>) -> (Backend, String) {
    let backend = Backend {
        cases: Arc::new(cases),
        ..Backend::default()
    };
    let app = Router::new()
        .route("/search", get(search))
        .route("/report-missing", post(report_missing))
        .route("/volunteer-signup", post(volunteer_signup))
        .route("/report-sighting", post(report_sighting))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (backend, format!("http://{addr}"))
}

fn page_for(base_url: &str) -> PageController {
    let cfg = ClientConfig::new(
        NonEmptyText::new(base_url).unwrap(),
        None,
        DetailLookup::ScanSearch,
    )
    .unwrap();
    let api = Arc::new(HttpCaseApi::new(cfg).unwrap());
    PageController::new(api, Arc::new(PageConfig::default()))
}

fn jane() -> Value {
    json!({
        "id": 7,
        "name": "Jane Doe",
        "age": 34,
        "gender": "Female",
        "last_seen": "Harbor Street, Boston",
        "last_seen_date": "2024-03-02",
        "region": "Northeast",
        "description": "Green raincoat, carrying a backpack",
        "photo_url": "/static/images/jane.png",
        "contact_name": "John Doe",
        "contact_phone": "(555) 222-3333",
        "contact_email": "john.doe@email.com"
    })
}

fn omar() -> Value {
    json!({
        "id": "12",
        "name": "Omar Haddad",
        "age": "19",
        "gender": "Male",
        "last_seen": "Mission District, San Francisco",
        "last_seen_date": "2024-02-20",
        "region": "West",
        "description": "Blue hoodie",
        "photo_url": "/static/images/default-avatar.png",
        "contact_name": "Rana Haddad",
        "contact_phone": "(555) 444-1212",
        "contact_email": "rana@email.com"
    })
}

fn select_texts(html: &str, selector: &str) -> Vec<String> {
    let doc = Html::parse_fragment(html);
    let selector = Selector::parse(selector).unwrap();
    doc.select(&selector)
        .map(|e| e.text().collect::<String>().trim().to_string())
        .collect()
}

#[tokio::test]
async fn search_then_view_details_shows_every_field() {
    let (_backend, base_url) = start_backend(vec![jane(), omar()]).await;
    let mut page = page_for(&base_url);

    page.handle(UiEvent::SearchInput("Jane".into())).await;
    page.handle(UiEvent::SearchKeyUp { key: "Enter".into() })
        .await;

    let titles = select_texts(&page.view().results_html, ".case-card h3");
    assert_eq!(titles, vec!["Jane Doe".to_string()]);

    let doc = Html::parse_fragment(&page.view().results_html);
    let details_button = Selector::parse(".btn-case-details").unwrap();
    let person_id = doc
        .select(&details_button)
        .next()
        .and_then(|b| b.value().attr("data-person-id"))
        .unwrap()
        .to_string();
    assert_eq!(person_id, "7");

    let effects = page
        .handle(UiEvent::Click(ElementRef::button(
            CASE_DETAILS_BUTTON_CLASS,
            person_id,
        )))
        .await;
    assert!(effects.is_empty());
    assert_eq!(page.view().case_modal, Visibility::Shown);

    let details = &page.view().modal_content_html;
    for value in [
        "Jane Doe",
        "34",
        "Female",
        "Harbor Street, Boston",
        "2024-03-02",
        "Northeast",
        "Green raincoat, carrying a backpack",
        "John Doe",
        "(555) 222-3333",
        "john.doe@email.com",
    ] {
        assert!(details.contains(value), "missing {value:?} in {details}");
    }
}

#[tokio::test]
async fn region_filter_searches_immediately() {
    let (_backend, base_url) = start_backend(vec![jane(), omar()]).await;
    let mut page = page_for(&base_url);

    page.refresh_region_options().await.unwrap();
    assert_eq!(page.view().region_options, vec!["Northeast", "West"]);

    page.handle(UiEvent::RegionChanged("West".into())).await;
    let titles = select_texts(&page.view().results_html, ".case-card h3");
    assert_eq!(titles, vec!["Omar Haddad".to_string()]);

    let options = select_texts(&page.view().region_options_html(), "option[selected]");
    assert_eq!(options, vec!["West".to_string()]);
}

#[tokio::test]
async fn unmatched_search_shows_no_results_message() {
    let (_backend, base_url) = start_backend(vec![jane()]).await;
    let mut page = page_for(&base_url);

    page.handle(UiEvent::SearchInput("nobody".into())).await;
    page.handle(UiEvent::Click(ElementRef::with_id(SEARCH_BUTTON_ID)))
        .await;

    assert_eq!(
        page.view().results,
        ResultsPanel::Message(SEARCH_EMPTY_MESSAGE)
    );
}

#[tokio::test]
async fn unknown_case_alerts_without_opening_modal() {
    let (_backend, base_url) = start_backend(vec![jane()]).await;
    let mut page = page_for(&base_url);

    let effects = page
        .handle(UiEvent::Click(ElementRef::button(
            CASE_DETAILS_BUTTON_CLASS,
            "99",
        )))
        .await;

    assert_eq!(effects, vec![Effect::alert(CASE_NOT_FOUND_MESSAGE)]);
    assert_eq!(page.view().case_modal, Visibility::Hidden);
}

#[tokio::test]
async fn sighting_from_case_modal_is_posted_and_closes_form() {
    let (backend, base_url) = start_backend(vec![jane()]).await;
    let mut page = page_for(&base_url);

    page.handle(UiEvent::Click(ElementRef::button(
        CASE_DETAILS_BUTTON_CLASS,
        "7",
    )))
    .await;
    page.handle(UiEvent::Click(ElementRef::button(
        REPORT_SIGHTING_MODAL_BUTTON_CLASS,
        "7",
    )))
    .await;
    assert_eq!(page.view().modal(ModalId::Case), Visibility::Hidden);
    assert_eq!(page.view().modal(ModalId::Sighting), Visibility::Shown);

    let data: FormData = [
        (SIGHTING_LOCATION_INPUT, "Boston Common"),
        (SIGHTING_DATE_INPUT, "2024-03-05"),
        (SIGHTING_DETAILS_INPUT, "Near the fountain"),
        (REPORTER_NAME_INPUT, "Pat"),
        (REPORTER_CONTACT_INPUT, "pat@email.com"),
    ]
    .into_iter()
    .collect();
    let effects = page
        .handle(UiEvent::FormSubmitted {
            form: FormId::Sighting,
            data,
        })
        .await;

    assert_eq!(
        effects,
        vec![
            Effect::alert(SIGHTING_SUCCESS_MESSAGE),
            Effect::ResetForm(FormId::Sighting),
        ]
    );
    assert_eq!(page.view().modal(ModalId::Sighting), Visibility::Hidden);

    let sightings = backend.sightings.lock().unwrap().clone();
    assert_eq!(
        sightings,
        vec![json!({
            "personId": "7",
            "location": "Boston Common",
            "date": "2024-03-05",
            "details": "Near the fountain",
            "reporterName": "Pat",
            "reporterContact": "pat@email.com"
        })]
    );
}

#[tokio::test]
async fn report_and_volunteer_forms_reach_the_backend() {
    let (backend, base_url) = start_backend(vec![]).await;
    let mut page = page_for(&base_url);

    let report: FormData = [("name", "Alex Kim"), ("age", "15"), ("region", "South")]
        .into_iter()
        .collect();
    let effects = page
        .handle(UiEvent::FormSubmitted {
            form: FormId::MissingPerson,
            data: report,
        })
        .await;
    assert_eq!(
        effects,
        vec![
            Effect::alert(MISSING_REPORT_SUCCESS_MESSAGE),
            Effect::ResetForm(FormId::MissingPerson),
        ]
    );
    assert_eq!(
        *backend.missing_fields.lock().unwrap(),
        vec!["name", "age", "region"]
    );

    let signup: FormData = [("name", "Lee"), ("email", "lee@email.com")]
        .into_iter()
        .collect();
    let effects = page
        .handle(UiEvent::FormSubmitted {
            form: FormId::Volunteer,
            data: signup,
        })
        .await;
    assert_eq!(effects[0], Effect::alert(VOLUNTEER_SUCCESS_MESSAGE));
    assert_eq!(
        *backend.volunteers.lock().unwrap(),
        vec![json!({ "name": "Lee", "email": "lee@email.com" })]
    );
}

#[tokio::test]
async fn unreachable_backend_degrades_to_messages() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let mut page = page_for(&base_url);

    page.handle(UiEvent::SearchInput("Jane".into())).await;
    page.handle(UiEvent::SearchKeyUp { key: "Enter".into() })
        .await;
    assert_eq!(
        page.view().results,
        ResultsPanel::Message(SEARCH_ERROR_MESSAGE)
    );

    let effects = page
        .handle(UiEvent::Click(ElementRef::button(
            CASE_DETAILS_BUTTON_CLASS,
            "7",
        )))
        .await;
    assert_eq!(effects, vec![Effect::alert(CASE_ERROR_MESSAGE)]);

    let effects = page
        .handle(UiEvent::FormSubmitted {
            form: FormId::Volunteer,
            data: FormData::new(),
        })
        .await;
    assert_eq!(effects, vec![Effect::alert(VOLUNTEER_ERROR_MESSAGE)]);
}
