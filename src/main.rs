mod script;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use findthem_client::{ClientConfig, HttpCaseApi};
use findthem_core::{
    Effect, ModalId, PageConfig, PageController, REVEAL_THRESHOLD_VAR, ResultsPanel,
    reveal_threshold_from_env_value,
};
use script::{Command, HELP, parse_line};

/// Main entry point for an interactive FindThem page session
///
/// Reads one command per line from stdin, feeds the resulting events to a
/// `PageController` backed by the HTTP case API, and prints the effects and the
/// page state that changed. Piping a file of commands replays a scripted visit.
///
/// # Environment Variables
/// - `FINDTHEM_BASE_URL`: case API address (default: "http://127.0.0.1:5000")
/// - `FINDTHEM_TIMEOUT_SECS`: per-request timeout in seconds (default: none)
/// - `FINDTHEM_DETAIL_LOOKUP`: "scan" or "direct" (default: "scan")
/// - `FINDTHEM_REVEAL_THRESHOLD`: visible fraction that reveals an element (default: 0.1)
///
/// # Returns
/// * `Ok(())` - When stdin closes or `quit` is entered
/// * `Err(anyhow::Error)` - If configuration is invalid or stdin cannot be read
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("findthem=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client_cfg = ClientConfig::from_env()?;
    let threshold = reveal_threshold_from_env_value(std::env::var(REVEAL_THRESHOLD_VAR).ok())?;
    let page_cfg = Arc::new(PageConfig::new(threshold)?);

    tracing::info!(
        base_url = %client_cfg.base_url(),
        lookup = ?client_cfg.detail_lookup(),
        "++ FindThem session started"
    );

    let api = Arc::new(HttpCaseApi::new(client_cfg)?);
    let mut page = PageController::new(api, page_cfg);

    if let Err(e) = page.refresh_region_options().await {
        tracing::warn!("could not load regions: {}", e);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("error: {e:#}");
                continue;
            }
        };

        match command {
            Command::Event(event) => {
                let before = page.view().clone();
                let effects = page.handle(event).await;
                for effect in &effects {
                    println!("{}", describe_effect(effect));
                }
                for change in describe_changes(&before, &page) {
                    println!("{change}");
                }
            }
            Command::Regions => match page.refresh_region_options().await {
                Ok(()) => println!("regions: {}", page.view().region_options.join(", ")),
                Err(e) => eprintln!("error: {e}"),
            },
            Command::Show => println!("{}", describe_page(&page)),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    tracing::info!("-- FindThem session ended");
    Ok(())
}

fn describe_effect(effect: &Effect) -> String {
    match effect {
        Effect::Alert(message) => format!("alert: {message}"),
        Effect::ScrollTo { top, smooth } => {
            format!("scroll to {top}{}", if *smooth { " (smooth)" } else { "" })
        }
        Effect::ResetForm(form) => format!("reset {}", form.element_id()),
        Effect::ApplyRevealStyle { key, style } => format!(
            "style {key}: opacity {}, transform {}",
            style.opacity, style.transform
        ),
    }
}

/// One line per visible part of the page that differs from `before`.
fn describe_changes(before: &findthem_core::ViewState, page: &PageController) -> Vec<String> {
    let after = page.view();
    let mut changes = Vec::new();

    if before.nav != after.nav {
        changes.push(format!(
            "menu {}",
            if after.nav.menu_active { "open" } else { "closed" }
        ));
    }
    if before.results_html != after.results_html {
        changes.push(describe_results(&after.results));
    }
    for modal in [ModalId::Case, ModalId::Sighting] {
        if before.modal(modal) != after.modal(modal) {
            changes.push(format!(
                "{}: display {}",
                modal.element_id(),
                after.modal(modal).display()
            ));
        }
    }
    if before.modal_content_html != after.modal_content_html {
        changes.push(format!("case details: {}", after.modal_content_html));
    }
    if before.sighting_person_id != after.sighting_person_id {
        changes.push(format!("sighting for case {}", after.sighting_person_id));
    }
    changes
}

fn describe_results(results: &ResultsPanel) -> String {
    match results {
        ResultsPanel::Initial => "results cleared".to_string(),
        ResultsPanel::Message(message) => format!("results: {message}"),
        ResultsPanel::Cards(records) => {
            let mut out = format!("results: {} case(s)", records.len());
            for record in records {
                out.push_str(&format!(
                    "\n  [{}] {}, age {}, last seen {} on {}",
                    record.id, record.name, record.age, record.last_seen, record.last_seen_date
                ));
            }
            out
        }
    }
}

fn describe_page(page: &PageController) -> String {
    let view = page.view();
    let mut lines = vec![
        format!("search input: {:?}", view.search_input),
        format!("region filter: {:?}", view.region_filter),
        describe_results(&view.results),
        format!("menu active: {}", view.nav.menu_active),
    ];
    for modal in [ModalId::Case, ModalId::Sighting] {
        lines.push(format!(
            "{}: display {}",
            modal.element_id(),
            view.modal(modal).display()
        ));
    }
    lines.push(format!("regions: {}", view.region_options.join(", ")));
    lines.push(format!("revealed elements: {}", view.reveal.revealed_count()));
    lines.join("\n")
}
