//! # FindThem Core
//!
//! Page logic for the FindThem missing-persons site.
//!
//! This crate holds everything that does not touch the network or a real document:
//! - Case records, sighting reports and submitted form data
//! - The page view state (results panel, modals, navigation, reveal tracking)
//! - HTML fragment rendering for results and case details
//! - The [`PageController`] that maps UI events onto [`CaseApi`] calls
//!
//! **No transport concerns**: the HTTP implementation of [`CaseApi`] lives in
//! `findthem-client`; binding to a browser or terminal belongs to the host.

pub mod api;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod events;
pub mod forms;
pub mod models;
pub mod scroll;
pub mod view;

pub use api::{find_person, CaseApi, SearchQuery};
pub use config::{reveal_threshold_from_env_value, ConfigError, PageConfig, REVEAL_THRESHOLD_VAR};
pub use controller::PageController;
pub use error::{ApiError, ApiResult, FormError};
pub use events::{Effect, ElementRef, UiEvent};
pub use forms::{FilePart, FormData, FormId, FormValue};
pub use models::{regions_from_records, PersonRecord, SightingReport, SubmitAck};
pub use scroll::{AnchorLayout, RevealPhase, RevealStyle, RevealTracker};
pub use view::{ModalId, ResultsPanel, ViewState, Visibility};

pub use findthem_types::{NonEmptyText, PersonId};
