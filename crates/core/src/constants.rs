//! Constants used throughout the FindThem core crate.
//!
//! The element ids and class names are the binding contract with the page markup;
//! the messages are the exact user-facing texts the page shows.

// ============================================================================
// ELEMENT IDS
// ============================================================================

pub const NAV_TOGGLE_ID: &str = "navToggle";
pub const NAV_MENU_ID: &str = "navMenu";
pub const SEARCH_INPUT_ID: &str = "searchInput";
pub const SEARCH_BUTTON_ID: &str = "searchBtn";
pub const REGION_FILTER_ID: &str = "regionFilter";
pub const SEARCH_RESULTS_ID: &str = "searchResults";
pub const CASE_MODAL_ID: &str = "caseModal";
pub const MODAL_CONTENT_ID: &str = "modalContent";
pub const SIGHTING_MODAL_ID: &str = "sightingModal";
pub const SIGHTING_PERSON_ID_INPUT: &str = "sightingPersonId";

pub const MISSING_PERSON_FORM_ID: &str = "missingPersonForm";
pub const VOLUNTEER_FORM_ID: &str = "volunteerForm";
pub const CONTACT_FORM_ID: &str = "contactForm";
pub const SIGHTING_FORM_ID: &str = "sightingForm";

/// Sighting form input ids, which double as the field names in submitted form data.
pub const SIGHTING_LOCATION_INPUT: &str = "sighting_location";
pub const SIGHTING_DATE_INPUT: &str = "sighting_date";
pub const SIGHTING_DETAILS_INPUT: &str = "sighting_details";
pub const REPORTER_NAME_INPUT: &str = "reporter_name";
pub const REPORTER_CONTACT_INPUT: &str = "reporter_contact";

// ============================================================================
// CLASS NAMES
// ============================================================================

pub const ACTIVE_CLASS: &str = "active";
pub const CASE_DETAILS_BUTTON_CLASS: &str = "btn-case-details";
pub const REPORT_SIGHTING_BUTTON_CLASS: &str = "btn-report-sighting";
pub const REPORT_SIGHTING_MODAL_BUTTON_CLASS: &str = "btn-report-sighting-modal";
pub const CLOSE_MODAL_CLASS: &str = "close-modal";
pub const MODAL_CLASS: &str = "modal";

/// Selectors whose elements fade in the first time they scroll into view.
pub const REVEAL_SELECTORS: [&str; 3] = [".case-card", ".found-card", ".form-group"];

/// Fraction of an element that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;

// ============================================================================
// USER-FACING MESSAGES
// ============================================================================

pub const SEARCH_PROMPT_MESSAGE: &str = "Please enter a search term or select a region.";
pub const SEARCH_EMPTY_MESSAGE: &str =
    "No matching cases found. Please try different search terms.";
pub const SEARCH_ERROR_MESSAGE: &str =
    "Sorry, there was an error performing your search. Please try again.";

pub const CASE_NOT_FOUND_MESSAGE: &str = "Case details not found.";
pub const CASE_ERROR_MESSAGE: &str = "Error loading case details. Please try again.";

pub const MISSING_REPORT_SUCCESS_MESSAGE: &str =
    "Thank you for submitting the report. We will review it and add it to our database.";
pub const REPORT_ERROR_MESSAGE: &str =
    "There was an error submitting your report. Please try again.";
pub const VOLUNTEER_SUCCESS_MESSAGE: &str =
    "Thank you for signing up as a volunteer! We will contact you soon.";
pub const VOLUNTEER_ERROR_MESSAGE: &str =
    "There was an error with your submission. Please try again.";
pub const CONTACT_SUCCESS_MESSAGE: &str =
    "Thank you for your message. We will respond as soon as possible.";
pub const SIGHTING_SUCCESS_MESSAGE: &str =
    "Thank you for reporting this sighting. This information could be crucial in reuniting a family.";

// ============================================================================
// ENDPOINTS
// ============================================================================

pub const SEARCH_PATH: &str = "/search";
pub const REPORT_MISSING_PATH: &str = "/report-missing";
pub const VOLUNTEER_SIGNUP_PATH: &str = "/volunteer-signup";
pub const REPORT_SIGHTING_PATH: &str = "/report-sighting";
pub const PERSONS_PATH: &str = "/persons";
