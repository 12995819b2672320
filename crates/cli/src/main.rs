use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use findthem_client::{ClientConfig, HttpCaseApi};
use findthem_core::constants::*;
use findthem_core::{
    reveal_threshold_from_env_value, Effect, ElementRef, FilePart, FormData, FormId,
    PageConfig, PageController, UiEvent, Visibility, REVEAL_THRESHOLD_VAR,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "findthem")]
#[command(about = "FindThem missing persons CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search open cases by name or location
    Search {
        /// Free text to match (optional when a region is given)
        #[arg(default_value = "")]
        text: String,
        /// Region filter
        #[arg(long, default_value = "")]
        region: String,
    },
    /// Show one case
    Details {
        /// Case id
        id: String,
    },
    /// List the regions that currently have cases
    Regions,
    /// Report a missing person
    ReportMissing {
        /// Form field as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
        /// File field as name=path (repeatable)
        #[arg(long = "file", value_parser = parse_key_path)]
        files: Vec<(String, PathBuf)>,
    },
    /// Sign up as a volunteer
    Volunteer {
        /// Form field as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
    },
    /// Report a sighting of a missing person
    Sighting {
        /// Case id
        id: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long, default_value = "")]
        details: String,
        #[arg(long, default_value = "")]
        reporter_name: String,
        #[arg(long, default_value = "")]
        reporter_contact: String,
    },
    /// Send a message to the site team
    Contact {
        /// Form field as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))
}

fn parse_key_path(raw: &str) -> Result<(String, PathBuf), String> {
    parse_key_value(raw).map(|(k, v)| (k, PathBuf::from(v)))
}

fn text_form(fields: Vec<(String, String)>) -> FormData {
    fields.into_iter().collect()
}

fn content_type_for(path: &std::path::Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    };
    Some(mime.to_string())
}

fn print_effects(effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::Alert(message) => println!("{}", message),
            Effect::ResetForm(form) => tracing::debug!("form {} reset", form.element_id()),
            other => tracing::debug!("ignoring effect {:?}", other),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("findthem=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'findthem --help' for commands");
        return Ok(());
    };

    let client_cfg = ClientConfig::from_env()?;
    let threshold = reveal_threshold_from_env_value(std::env::var(REVEAL_THRESHOLD_VAR).ok())?;
    let page_cfg = Arc::new(PageConfig::new(threshold)?);
    let api = Arc::new(HttpCaseApi::new(client_cfg)?);
    let mut page = PageController::new(api, page_cfg);

    match command {
        Commands::Search { text, region } => {
            page.handle(UiEvent::SearchInput(text)).await;
            page.handle(UiEvent::RegionChanged(region)).await;
            println!("{}", page.view().results_html);
        }
        Commands::Details { id } => {
            let effects = page
                .handle(UiEvent::Click(ElementRef::button(
                    CASE_DETAILS_BUTTON_CLASS,
                    id,
                )))
                .await;
            print_effects(&effects);
            if page.view().case_modal == Visibility::Shown {
                println!("{}", page.view().modal_content_html);
            }
        }
        Commands::Regions => match page.refresh_region_options().await {
            Ok(()) if page.view().region_options.is_empty() => println!("No regions found."),
            Ok(()) => {
                for region in &page.view().region_options {
                    println!("{}", region);
                }
            }
            Err(e) => eprintln!("Error loading regions: {}", e),
        },
        Commands::ReportMissing { fields, files } => {
            let mut data = text_form(fields);
            for (name, path) in files {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                data.push_file(
                    name,
                    FilePart {
                        filename,
                        content_type: content_type_for(&path),
                        bytes,
                    },
                );
            }
            submit(&mut page, FormId::MissingPerson, data).await;
        }
        Commands::Volunteer { fields } => {
            submit(&mut page, FormId::Volunteer, text_form(fields)).await;
        }
        Commands::Sighting {
            id,
            location,
            date,
            details,
            reporter_name,
            reporter_contact,
        } => {
            page.handle(UiEvent::Click(ElementRef::button(
                REPORT_SIGHTING_BUTTON_CLASS,
                id,
            )))
            .await;
            let data: FormData = [
                (SIGHTING_LOCATION_INPUT, location),
                (SIGHTING_DATE_INPUT, date),
                (SIGHTING_DETAILS_INPUT, details),
                (REPORTER_NAME_INPUT, reporter_name),
                (REPORTER_CONTACT_INPUT, reporter_contact),
            ]
            .into_iter()
            .collect();
            submit(&mut page, FormId::Sighting, data).await;
        }
        Commands::Contact { fields } => {
            submit(&mut page, FormId::Contact, text_form(fields)).await;
        }
    }

    Ok(())
}

async fn submit(page: &mut PageController, form: FormId, data: FormData) {
    let effects = page.handle(UiEvent::FormSubmitted { form, data }).await;
    print_effects(&effects);
}
