//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use thiserror::Error;
use tracing::info;

use crate::gemini::{GeminiClient, GeminiConfig};
use crate::orchestrator::{
    parse_reference_urls, PlanError, PlanOrchestrator, TripRequest, COUNT_RANGE,
};
use crate::place::{Country, Destination};
use crate::reference::{LibraryConfig, LocalReferenceLibrary};
use crate::report::{text_summary, ReportConfig, ReportRenderer, DEFAULT_FONT_FILE};
use crate::session::{GeneratedPlan, Session, TourGuide};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("API key is not set; export GEMINI_API_KEY or pass --api-key")]
    MissingCredential,
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("readline error: {0}")]
    Readline(#[from] ReadlineError),
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "AI city tour guide: itinerary, route map and PDF",
    long_about = None
)]
pub struct Cli {
    /// Country to visit
    #[arg(long, value_enum, default_value_t = Country::Spain)]
    pub country: Country,
    /// City to visit
    #[arg(long, default_value = "Madrid")]
    pub city: String,
    /// Reference sites, comma separated
    #[arg(long, default_value = "https://www.spain.info")]
    pub sites: String,
    /// Number of must-visit places
    #[arg(long, default_value_t = 5, value_parser = count_in_range)]
    pub must_visit: u8,
    /// Number of optional places
    #[arg(long, default_value_t = 5, value_parser = count_in_range)]
    pub optional: u8,
    /// Extra instruction for the planner (e.g. "skip museums")
    #[arg(long)]
    pub refine: Option<String>,
    /// Keep asking for refinements after the first plan
    #[arg(long)]
    pub interactive: bool,
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Gemini model name
    #[arg(long, default_value = "gemini-2.5-flash")]
    pub model: String,
    /// Gemini API base URL
    #[arg(long, default_value = "https://generativelanguage.googleapis.com")]
    pub api_base: String,
    /// Base directory for reference PDFs (TourGuide/<country>/<city>) and maps
    #[arg(long)]
    pub base_dir: Option<PathBuf>,
    /// Directory for the generated guide (defaults to the base directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// TTF font used in the guide (defaults to <base-dir>/NanumGothic.ttf)
    #[arg(long)]
    pub font: Option<PathBuf>,
}

fn count_in_range(value: &str) -> std::result::Result<u8, String> {
    let count: u8 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if COUNT_RANGE.contains(&count) {
        Ok(count)
    } else {
        Err(format!(
            "must be between {} and {}",
            COUNT_RANGE.start(),
            COUNT_RANGE.end()
        ))
    }
}

impl Cli {
    pub fn trip_request(&self) -> TripRequest {
        let mut request = TripRequest::new(Destination::new(self.country, self.city.as_str()))
            .with_reference_urls(parse_reference_urls(&self.sites))
            .with_counts(self.must_visit, self.optional);
        if let Some(refine) = self.refine.as_deref() {
            request = request.with_refinement(refine);
        }
        request
    }

    fn base_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let api_key = cli
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(AppError::MissingCredential)?
        .to_string();

    let base_dir = cli.base_dir()?;
    let generator = GeminiClient::new(GeminiConfig {
        base_url: cli.api_base.clone(),
        model: cli.model.clone(),
        api_key,
        ..GeminiConfig::default()
    })?;
    let library = LocalReferenceLibrary::new(LibraryConfig {
        base_dir: base_dir.clone(),
        ..LibraryConfig::default()
    });
    let request = cli.trip_request();
    let reference_dir = library.ensure_destination_dir(&request.destination)?;
    info!(dir = %reference_dir.display(), "reference folder ready");

    let renderer = ReportRenderer::new(ReportConfig {
        output_dir: cli.output_dir.clone().unwrap_or_else(|| base_dir.clone()),
        font_path: cli.font.clone().unwrap_or_else(|| base_dir.join(DEFAULT_FONT_FILE)),
        ..ReportConfig::default()
    });
    let guide = TourGuide::new(PlanOrchestrator::new(generator, library), renderer, base_dir);

    let mut session = Session::new();
    let plan = session.regenerate(&guide, &request)?;
    print_plan(plan);

    if cli.interactive {
        refine_loop(&guide, &mut session, request)?;
    }
    Ok(())
}

/// Reads refinement requests until `quit` or EOF; each one replaces the plan.
fn refine_loop(
    guide: &TourGuide<GeminiClient, LocalReferenceLibrary>,
    session: &mut Session,
    request: TripRequest,
) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    println!("\nType a change request (e.g. \"drop stop 2\"), `reset` to clear, `quit` to exit.");

    loop {
        match rl.readline("refine> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                match input {
                    "quit" | "exit" => break,
                    "reset" => {
                        session.reset();
                        println!("Session cleared. Type a request to start again.");
                    }
                    feedback => {
                        let refined = request.clone().with_refinement(feedback);
                        match session.regenerate(guide, &refined) {
                            Ok(plan) => print_plan(plan),
                            // Failures end this request only; the previous plan stays.
                            Err(err) => eprintln!("error: {err}"),
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn print_plan(plan: &GeneratedPlan) {
    println!("{}", text_summary(&plan.itinerary, &plan.destination));
    match &plan.document {
        Ok(path) => println!("Guide saved: {}", path.display()),
        Err(err) => println!("Guide not created: {err}"),
    }
    match &plan.map {
        Ok(path) => println!("Route map: {}", path.display()),
        Err(err) => println!("Route map not created: {err}"),
    }
}
