//! Line commands for driving a page session from a terminal or a script.
//!
//! Each line names one user action and maps onto a single [`UiEvent`], except
//! for a few session commands (`regions`, `show`, `help`, `quit`) handled by the
//! runner itself.

use anyhow::{Context, bail};
use findthem_core::constants::*;
use findthem_core::{AnchorLayout, ElementRef, FormData, FormId, ModalId, UiEvent};

pub const HELP: &str = "\
commands:
  type <text>                  set the search input
  key <name>                   key released in the search input (e.g. Enter)
  enter                        same as `key Enter`
  search                       click the search button
  region [name]                pick a region (empty for all regions)
  details <id>                 click View Details on a case card
  sighting <id>                click Report Sighting on a case card
  modal-sighting <id>          click Report Sighting inside the case modal
  close case|sighting          click a modal's close control
  backdrop case|sighting       click outside a modal's content
  nav                          toggle the mobile menu
  anchor <href> [top offset nav-height]
                               click an in-page link
  submit <form> [name=value&...]
                               submit missingPersonForm, volunteerForm,
                               contactForm or sightingForm
  observe <key>                register a reveal target
  intersect <key> <ratio>      report a visibility ratio for a reveal target
  regions                      reload the region filter options
  show                         print the page state
  help                         print this help
  quit                         end the session";

#[derive(Debug, PartialEq)]
pub enum Command {
    Event(UiEvent),
    Regions,
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "type" => Command::Event(UiEvent::SearchInput(rest.to_string())),
        "key" => Command::Event(UiEvent::SearchKeyUp {
            key: required(rest, "key name")?.to_string(),
        }),
        "enter" => Command::Event(UiEvent::SearchKeyUp {
            key: "Enter".to_string(),
        }),
        "search" => Command::Event(UiEvent::Click(ElementRef::with_id(SEARCH_BUTTON_ID))),
        "region" => Command::Event(UiEvent::RegionChanged(rest.to_string())),
        "details" => card_click(CASE_DETAILS_BUTTON_CLASS, rest)?,
        "sighting" => card_click(REPORT_SIGHTING_BUTTON_CLASS, rest)?,
        "modal-sighting" => card_click(REPORT_SIGHTING_MODAL_BUTTON_CLASS, rest)?,
        "close" => Command::Event(UiEvent::Click(ElementRef::close_control(modal(rest)?))),
        "backdrop" => Command::Event(UiEvent::Click(ElementRef::backdrop(modal(rest)?))),
        "nav" => Command::Event(UiEvent::Click(ElementRef::with_id(NAV_TOGGLE_ID))),
        "anchor" => anchor(rest)?,
        "submit" => submit(rest)?,
        "observe" => Command::Event(UiEvent::RevealTargetAdded {
            key: required(rest, "element key")?.to_string(),
        }),
        "intersect" => {
            let mut parts = rest.split_whitespace();
            let key = parts.next().context("intersect needs an element key")?;
            let ratio = parts
                .next()
                .context("intersect needs a ratio")?
                .parse::<f64>()
                .context("ratio must be a number")?;
            Command::Event(UiEvent::Intersection {
                key: key.to_string(),
                ratio,
            })
        }
        "regions" => Command::Regions,
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {other:?}, try `help`"),
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, what: &str) -> anyhow::Result<&'a str> {
    if rest.is_empty() {
        bail!("missing {what}");
    }
    Ok(rest)
}

fn card_click(class: &str, rest: &str) -> anyhow::Result<Command> {
    let id = required(rest, "case id")?;
    Ok(Command::Event(UiEvent::Click(ElementRef::button(class, id))))
}

fn modal(rest: &str) -> anyhow::Result<ModalId> {
    match rest {
        "case" => Ok(ModalId::Case),
        "sighting" => Ok(ModalId::Sighting),
        other => ModalId::from_element_id(other)
            .with_context(|| format!("unknown modal {other:?}, expected case or sighting")),
    }
}

fn anchor(rest: &str) -> anyhow::Result<Command> {
    let mut parts = rest.split_whitespace();
    let href = parts.next().context("anchor needs an href")?.to_string();
    let numbers = parts
        .map(|p| p.parse::<f64>().with_context(|| format!("not a number: {p:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let layout = match numbers.as_slice() {
        [] => None,
        [target_top, page_y_offset, nav_height] => Some(AnchorLayout {
            target_top: *target_top,
            page_y_offset: *page_y_offset,
            nav_height: *nav_height,
        }),
        _ => bail!("anchor layout needs exactly three numbers: top offset nav-height"),
    };
    Ok(Command::Event(UiEvent::AnchorClicked { href, layout }))
}

/// `submit <form> a=1&b=two words`. Values run to the next `&`.
fn submit(rest: &str) -> anyhow::Result<Command> {
    let (form_name, fields) = match rest.split_once(char::is_whitespace) {
        Some((name, fields)) => (name, fields.trim()),
        None => (rest, ""),
    };
    let form = FormId::from_element_id(required(form_name, "form id")?)
        .with_context(|| format!("unknown form {form_name:?}"))?;

    let mut data = FormData::new();
    for pair in fields.split('&').filter(|p| !p.trim().is_empty()) {
        let (name, value) = pair
            .split_once('=')
            .with_context(|| format!("expected name=value, got {pair:?}"))?;
        data.push_text(name.trim(), value.trim());
    }
    Ok(Command::Event(UiEvent::FormSubmitted { form, data }))
}
