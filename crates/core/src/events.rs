//! Events the host feeds into the controller and effects it gets back.
//!
//! Clicks are delegated: the host reports the clicked element once, as an
//! [`ElementRef`], and the controller routes it by id and class. Re-rendered
//! cards therefore need no per-element listeners.

use crate::forms::{FormData, FormId};
use crate::scroll::{AnchorLayout, RevealStyle};
use crate::view::ModalId;

/// The host's description of a clicked element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementRef {
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Value of the `data-person-id` attribute, if any.
    pub person_id: Option<String>,
    /// The closest `.modal` ancestor (or the element itself, if it is a modal).
    pub closest_modal: Option<ModalId>,
}

impl ElementRef {
    /// An element identified only by its id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// A button carrying a class and a `data-person-id` attribute.
    pub fn button(class: impl Into<String>, person_id: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            person_id: Some(person_id.into()),
            ..Self::default()
        }
    }

    /// The backdrop of a modal: the modal element itself.
    pub fn backdrop(modal: ModalId) -> Self {
        Self {
            id: Some(modal.element_id().to_owned()),
            classes: vec![crate::constants::MODAL_CLASS.to_owned()],
            person_id: None,
            closest_modal: Some(modal),
        }
    }

    /// A `.close-modal` control inside `modal`.
    pub fn close_control(modal: ModalId) -> Self {
        Self {
            classes: vec![crate::constants::CLOSE_MODAL_CLASS.to_owned()],
            closest_modal: Some(modal),
            ..Self::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// A click anywhere on the page.
    Click(ElementRef),
    /// A click on an `a[href^="#"]` link. `layout` is `None` when the target
    /// element does not exist.
    AnchorClicked {
        href: String,
        layout: Option<AnchorLayout>,
    },
    /// `input` on `searchInput`.
    SearchInput(String),
    /// `keyup` on `searchInput`.
    SearchKeyUp { key: String },
    /// `change` on `regionFilter`.
    RegionChanged(String),
    /// `submit` on one of the intercepted forms.
    FormSubmitted { form: FormId, data: FormData },
    /// An element matching a reveal selector was added to the page.
    RevealTargetAdded { key: String },
    /// An observed element crossed into or out of the viewport.
    Intersection { key: String, ratio: f64 },
}

/// Instructions for the host that have no place in [`ViewState`](crate::ViewState).
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Alert(String),
    ScrollTo { top: f64, smooth: bool },
    ResetForm(FormId),
    ApplyRevealStyle { key: String, style: RevealStyle },
}

impl Effect {
    pub fn alert(message: &str) -> Self {
        Effect::Alert(message.to_owned())
    }
}
