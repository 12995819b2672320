//! Anchor scrolling and scroll-triggered reveal.

use std::collections::BTreeMap;

use crate::constants::{REVEAL_SELECTORS, REVEAL_THRESHOLD};

/// Geometry the host measures when an in-page anchor is clicked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorLayout {
    /// `getBoundingClientRect().top` of the anchor target.
    pub target_top: f64,
    /// Current vertical scroll offset of the window.
    pub page_y_offset: f64,
    /// Height of the fixed navbar, which would otherwise cover the target.
    pub nav_height: f64,
}

impl AnchorLayout {
    /// Document offset to scroll to so the target sits just below the navbar.
    pub fn scroll_top(&self) -> f64 {
        self.target_top + self.page_y_offset - self.nav_height
    }
}

/// Inline style applied to a reveal target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
    pub transition: &'static str,
}

impl RevealStyle {
    pub const HIDDEN: RevealStyle = RevealStyle {
        opacity: "0",
        transform: "translateY(20px)",
        transition: "opacity 0.5s ease, transform 0.5s ease",
    };

    pub const VISIBLE: RevealStyle = RevealStyle {
        opacity: "1",
        transform: "translateY(0)",
        transition: "opacity 0.5s ease, transform 0.5s ease",
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    Pending,
    Revealed,
}

/// Tracks which observed elements have scrolled into view.
///
/// Reveal is one-shot: once an element is revealed it stays revealed, even when
/// it later leaves the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealTracker {
    threshold: f64,
    elements: BTreeMap<String, RevealPhase>,
}

impl Default for RevealTracker {
    fn default() -> Self {
        Self::new(REVEAL_THRESHOLD)
    }
}

impl RevealTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            elements: BTreeMap::new(),
        }
    }

    /// True when an element with these classes is one the page animates.
    pub fn is_target(classes: &[String]) -> bool {
        REVEAL_SELECTORS.iter().any(|selector| {
            let class = selector.trim_start_matches('.');
            classes.iter().any(|c| c == class)
        })
    }

    /// Starts observing `key`. Returns the style to apply, or `None` when the
    /// element is already being observed.
    pub fn observe(&mut self, key: impl Into<String>) -> Option<RevealStyle> {
        let key = key.into();
        if self.elements.contains_key(&key) {
            return None;
        }
        self.elements.insert(key, RevealPhase::Pending);
        Some(RevealStyle::HIDDEN)
    }

    /// Handles an intersection report. Returns the visible style only on the
    /// transition from pending to revealed.
    pub fn intersect(&mut self, key: &str, ratio: f64) -> Option<RevealStyle> {
        let phase = self.elements.get_mut(key)?;
        if *phase == RevealPhase::Revealed || ratio <= 0.0 || ratio < self.threshold {
            return None;
        }
        *phase = RevealPhase::Revealed;
        Some(RevealStyle::VISIBLE)
    }

    pub fn phase(&self, key: &str) -> Option<RevealPhase> {
        self.elements.get(key).copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.elements
            .values()
            .filter(|phase| **phase == RevealPhase::Revealed)
            .count()
    }
}
