//! Page view state.
//!
//! `ViewState` is the controller's model of the parts of the document it owns.
//! Hosts mirror it into the real page (or print it, in the terminal session);
//! tests assert on it directly.

use crate::constants::{CASE_MODAL_ID, SIGHTING_MODAL_ID};
use crate::models::PersonRecord;
use crate::scroll::RevealTracker;
use crate::view::render::render_region_options;

/// The two modals on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModalId {
    Case,
    Sighting,
}

impl ModalId {
    pub fn element_id(self) -> &'static str {
        match self {
            ModalId::Case => CASE_MODAL_ID,
            ModalId::Sighting => SIGHTING_MODAL_ID,
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        match id {
            CASE_MODAL_ID => Some(ModalId::Case),
            SIGHTING_MODAL_ID => Some(ModalId::Sighting),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

impl Visibility {
    /// CSS `display` value for the modal element.
    pub fn display(self) -> &'static str {
        match self {
            Visibility::Hidden => "none",
            Visibility::Shown => "block",
        }
    }
}

/// Mobile navigation: `navMenu` and `navToggle` carry the `active` class together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    pub menu_active: bool,
}

impl NavState {
    pub fn toggle(&mut self) {
        self.menu_active = !self.menu_active;
    }

    pub fn close(&mut self) {
        self.menu_active = false;
    }
}

/// What the results panel currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResultsPanel {
    /// Server-rendered content, untouched since page load.
    #[default]
    Initial,
    /// A single-paragraph message (prompt, no matches, or error).
    Message(&'static str),
    /// The grid of case cards for the last successful search.
    Cards(Vec<PersonRecord>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub nav: NavState,
    /// Current value of `searchInput`.
    pub search_input: String,
    /// Current value of `regionFilter`.
    pub region_filter: String,
    pub results: ResultsPanel,
    /// `innerHTML` of `searchResults` matching `results`; empty while `Initial`.
    pub results_html: String,
    pub case_modal: Visibility,
    /// `innerHTML` of `modalContent`.
    pub modal_content_html: String,
    pub sighting_modal: Visibility,
    /// Value of the hidden `sightingPersonId` input.
    pub sighting_person_id: String,
    /// Regions offered by `regionFilter`, besides "All Regions".
    pub region_options: Vec<String>,
    pub reveal: RevealTracker,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self, modal: ModalId) -> Visibility {
        match modal {
            ModalId::Case => self.case_modal,
            ModalId::Sighting => self.sighting_modal,
        }
    }

    pub fn set_modal(&mut self, modal: ModalId, visibility: Visibility) {
        match modal {
            ModalId::Case => self.case_modal = visibility,
            ModalId::Sighting => self.sighting_modal = visibility,
        }
    }

    /// Prepares the sighting form for `person_id`, stored as given in the
    /// hidden input. The case modal is always hidden afterwards, whatever its
    /// previous state.
    pub fn open_sighting_form(&mut self, person_id: &str) {
        self.sighting_person_id = person_id.trim().to_owned();
        self.sighting_modal = Visibility::Shown;
        self.case_modal = Visibility::Hidden;
    }

    /// `innerHTML` of `regionFilter` for the current options and selection.
    pub fn region_options_html(&self) -> String {
        render_region_options(&self.region_options, &self.region_filter)
    }

    /// Records currently rendered as cards.
    pub fn result_cards(&self) -> &[PersonRecord] {
        match &self.results {
            ResultsPanel::Cards(records) => records,
            _ => &[],
        }
    }
}
