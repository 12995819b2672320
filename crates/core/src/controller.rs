//! The page controller.
//!
//! Translates [`UiEvent`]s into [`CaseApi`] calls and [`ViewState`] changes.
//! Every handler owns its failure: network and application errors are logged and
//! collapsed into that handler's generic message, and the page stays usable.
//!
//! ## Flow
//!
//! ```text
//! host ──UiEvent──▶ PageController::handle ──▶ CaseApi
//!   ▲                      │
//!   └──── Vec<Effect> ◀────┴──▶ ViewState (results panel, modals, nav, reveal)
//! ```

use std::sync::Arc;

use findthem_types::PersonId;

use crate::api::{CaseApi, SearchQuery};
use crate::config::PageConfig;
use crate::constants::*;
use crate::error::ApiResult;
use crate::events::{Effect, ElementRef, UiEvent};
use crate::forms::{FormData, FormId};
use crate::models::{regions_from_records, PersonRecord, SightingReport, SubmitAck};
use crate::scroll::{AnchorLayout, RevealTracker};
use crate::view::{
    render_case_cards, render_case_details, render_message, ModalId, ResultsPanel, ViewState,
    Visibility,
};

/// Messages shown after a submission, per form.
struct SubmissionMessages {
    success: &'static str,
    failure: &'static str,
}

#[derive(Clone)]
pub struct PageController {
    api: Arc<dyn CaseApi>,
    cfg: Arc<PageConfig>,
    view: ViewState,
}

impl PageController {
    /// Creates a controller over a fresh page: modals hidden, nav closed, no results.
    pub fn new(api: Arc<dyn CaseApi>, cfg: Arc<PageConfig>) -> Self {
        let view = ViewState {
            reveal: RevealTracker::new(cfg.reveal_threshold()),
            ..ViewState::new()
        };
        Self { api, cfg, view }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &PageConfig {
        &self.cfg
    }

    /// Handles one event to completion and returns the effects for the host.
    pub async fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::Click(target) => self.handle_click(target).await,
            UiEvent::AnchorClicked { href, layout } => self.handle_anchor(&href, layout),
            UiEvent::SearchInput(value) => {
                self.view.search_input = value;
                Vec::new()
            }
            UiEvent::SearchKeyUp { key } => {
                if key == "Enter" {
                    self.perform_search().await;
                }
                Vec::new()
            }
            UiEvent::RegionChanged(region) => {
                self.view.region_filter = region;
                self.perform_search().await;
                Vec::new()
            }
            UiEvent::FormSubmitted { form, data } => self.submit_form(form, data).await,
            UiEvent::RevealTargetAdded { key } => match self.view.reveal.observe(key.clone()) {
                Some(style) => vec![Effect::ApplyRevealStyle { key, style }],
                None => Vec::new(),
            },
            UiEvent::Intersection { key, ratio } => match self.view.reveal.intersect(&key, ratio) {
                Some(style) => vec![Effect::ApplyRevealStyle { key, style }],
                None => Vec::new(),
            },
        }
    }

    // ========================================================================
    // CLICK DELEGATION
    // ========================================================================

    async fn handle_click(&mut self, target: ElementRef) -> Vec<Effect> {
        if target.is(NAV_TOGGLE_ID) {
            self.view.nav.toggle();
            return Vec::new();
        }

        if target.is(SEARCH_BUTTON_ID) {
            self.perform_search().await;
            return Vec::new();
        }

        if target.has_class(CASE_DETAILS_BUTTON_CLASS) {
            let raw = target.person_id.unwrap_or_default();
            return self.show_case_details(&raw).await;
        }

        if target.has_class(REPORT_SIGHTING_BUTTON_CLASS)
            || target.has_class(REPORT_SIGHTING_MODAL_BUTTON_CLASS)
        {
            let raw = target.person_id.unwrap_or_default();
            self.show_sighting_form(&raw);
            return Vec::new();
        }

        if target.has_class(CLOSE_MODAL_CLASS) {
            if let Some(modal) = target.closest_modal {
                self.view.set_modal(modal, Visibility::Hidden);
            }
            return Vec::new();
        }

        // A click landing on the modal element itself is a click on its backdrop.
        if target.has_class(MODAL_CLASS) {
            if let Some(modal) = target.id.as_deref().and_then(ModalId::from_element_id) {
                self.view.set_modal(modal, Visibility::Hidden);
            }
        }

        Vec::new()
    }

    fn handle_anchor(&mut self, href: &str, layout: Option<AnchorLayout>) -> Vec<Effect> {
        if href == "#" || !href.starts_with('#') {
            return Vec::new();
        }
        let Some(layout) = layout else {
            tracing::debug!(href, "anchor target not found");
            return Vec::new();
        };

        self.view.nav.close();
        vec![Effect::ScrollTo {
            top: layout.scroll_top(),
            smooth: true,
        }]
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    /// Runs a search with the current input and region values.
    ///
    /// With both empty, the prompt is shown and no request is made.
    pub async fn perform_search(&mut self) {
        let query = SearchQuery::new(
            self.view.search_input.clone(),
            self.view.region_filter.clone(),
        );

        if query.is_empty() {
            self.show_results_message(SEARCH_PROMPT_MESSAGE);
            return;
        }

        tracing::debug!(q = %query.text, region = %query.region, "searching cases");
        match self.api.search(&query).await {
            Ok(records) => self.display_results(records),
            Err(e) => {
                tracing::error!("Search error: {}", e);
                self.show_results_message(SEARCH_ERROR_MESSAGE);
            }
        }
    }

    fn display_results(&mut self, records: Vec<PersonRecord>) {
        if records.is_empty() {
            self.show_results_message(SEARCH_EMPTY_MESSAGE);
            return;
        }
        tracing::info!(count = records.len(), "rendering search results");
        self.view.results_html = render_case_cards(&records);
        self.view.results = ResultsPanel::Cards(records);
    }

    fn show_results_message(&mut self, message: &'static str) {
        self.view.results = ResultsPanel::Message(message);
        self.view.results_html = render_message(message);
    }

    /// Fills the region filter from the full case list.
    ///
    /// On failure the existing options are kept.
    pub async fn refresh_region_options(&mut self) -> ApiResult<()> {
        let records = self.api.search(&SearchQuery::all()).await?;
        self.view.region_options = regions_from_records(&records);
        Ok(())
    }

    // ========================================================================
    // MODALS
    // ========================================================================

    /// Looks up a case and shows it in the case modal.
    ///
    /// Unknown ids produce the "not found" alert and leave the modal untouched.
    pub async fn show_case_details(&mut self, raw_id: &str) -> Vec<Effect> {
        let id = match PersonId::parse(raw_id) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("case details requested without a usable id: {}", e);
                return vec![Effect::alert(CASE_NOT_FOUND_MESSAGE)];
            }
        };

        match self.api.fetch_person(&id).await {
            Ok(Some(person)) => {
                self.view.modal_content_html = render_case_details(&person);
                self.view.case_modal = Visibility::Shown;
                Vec::new()
            }
            Ok(None) => vec![Effect::alert(CASE_NOT_FOUND_MESSAGE)],
            Err(e) => {
                tracing::error!("Error fetching case details: {}", e);
                vec![Effect::alert(CASE_ERROR_MESSAGE)]
            }
        }
    }

    /// Opens the sighting modal for `raw_id`, closing the case modal.
    ///
    /// The modal opens even for a blank id; submitting it is then refused by
    /// [`SightingReport::from_form`] before any request is made.
    pub fn show_sighting_form(&mut self, raw_id: &str) {
        if raw_id.trim().is_empty() {
            tracing::warn!("sighting form opened without a person id");
        }
        self.view.open_sighting_form(raw_id);
    }

    // ========================================================================
    // FORMS
    // ========================================================================

    async fn submit_form(&mut self, form: FormId, data: FormData) -> Vec<Effect> {
        match form {
            FormId::MissingPerson => {
                let outcome = self.api.report_missing(&data).await;
                let messages = SubmissionMessages {
                    success: MISSING_REPORT_SUCCESS_MESSAGE,
                    failure: REPORT_ERROR_MESSAGE,
                };
                finish_submission(form, outcome, &messages).1
            }
            FormId::Volunteer => {
                let outcome = self.api.volunteer_signup(&data).await;
                let messages = SubmissionMessages {
                    success: VOLUNTEER_SUCCESS_MESSAGE,
                    failure: VOLUNTEER_ERROR_MESSAGE,
                };
                finish_submission(form, outcome, &messages).1
            }
            // TODO: confirm with the site owners whether contact messages should be
            // posted somewhere; the page only acknowledges them locally.
            FormId::Contact => vec![
                Effect::alert(CONTACT_SUCCESS_MESSAGE),
                Effect::ResetForm(FormId::Contact),
            ],
            FormId::Sighting => self.submit_sighting(&data).await,
        }
    }

    async fn submit_sighting(&mut self, data: &FormData) -> Vec<Effect> {
        let report = match SightingReport::from_form(&self.view.sighting_person_id, data) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Sighting report error: {}", e);
                return vec![Effect::alert(REPORT_ERROR_MESSAGE)];
            }
        };

        let outcome = self.api.report_sighting(&report).await;
        let messages = SubmissionMessages {
            success: SIGHTING_SUCCESS_MESSAGE,
            failure: REPORT_ERROR_MESSAGE,
        };
        let (accepted, effects) = finish_submission(FormId::Sighting, outcome, &messages);
        if accepted {
            self.view.sighting_modal = Visibility::Hidden;
        }
        effects
    }
}

/// Maps a submission outcome to its alert, plus a reset when it was accepted.
fn finish_submission(
    form: FormId,
    outcome: ApiResult<SubmitAck>,
    messages: &SubmissionMessages,
) -> (bool, Vec<Effect>) {
    match outcome {
        Ok(ack) if ack.success => {
            if let Some(ack_message) = ack.message.as_deref() {
                tracing::debug!(form = form.element_id(), ack_message, "submission accepted");
            }
            (
                true,
                vec![Effect::alert(messages.success), Effect::ResetForm(form)],
            )
        }
        Ok(ack) => {
            tracing::error!(
                form = form.element_id(),
                ack_message = ack.message.as_deref().unwrap_or(""),
                "submission rejected"
            );
            (false, vec![Effect::alert(messages.failure)])
        }
        Err(e) => {
            tracing::error!(form = form.element_id(), "Form submission error: {}", e);
            (false, vec![Effect::alert(messages.failure)])
        }
    }
}
