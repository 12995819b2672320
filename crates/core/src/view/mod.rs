pub mod render;
pub mod state;

pub use render::{
    escape_html, render_case_cards, render_case_details, render_message, render_region_options,
};
pub use state::{ModalId, NavState, ResultsPanel, ViewState, Visibility};
