//! Report rendering: the downloadable PDF guide and the plain-text summary.
//!
//! Rendering never panics on environmental problems. A missing font, a
//! locked output file and friends come back as [`RenderError`] values so the
//! caller can show them and carry on.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::elements::{Break, Paragraph};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Element as _};
use thiserror::Error;
use tracing::{info, warn};

use crate::place::{Destination, Itinerary, Place};
use crate::route_url::{place_search_url, route_url};

/// Font used when none is configured; expected next to the binary's working dir.
pub const DEFAULT_FONT_FILE: &str = "NanumGothic.ttf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to render: the itinerary is empty")]
    EmptyItinerary,
    #[error("font file not found: {}", .path.display())]
    MissingFont { path: PathBuf },
    #[error("could not load font {}: {message}", .path.display())]
    FontLoad { path: PathBuf, message: String },
    #[error("'{}' is already open or write-protected; close it and try again", .path.display())]
    FileLocked { path: PathBuf },
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("PDF build failed: {0}")]
    Build(String),
    #[error("document was built but {} does not exist", .path.display())]
    NotWritten { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub font_path: PathBuf,
    pub font_size: u8,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            font_path: PathBuf::from(DEFAULT_FONT_FILE),
            font_size: 10,
        }
    }
}

/// File name of the guide for a destination.
pub fn document_file_name(destination: &Destination) -> String {
    format!(
        "{}_{}_Tour_Guide.pdf",
        destination.country,
        destination.city_component()
    )
}

#[derive(Debug, Clone)]
pub struct ReportRenderer {
    config: ReportConfig,
}

impl ReportRenderer {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn document_path(&self, destination: &Destination) -> PathBuf {
        self.config.output_dir.join(document_file_name(destination))
    }

    /// Writes the A4 guide and returns its path.
    pub fn render(
        &self,
        itinerary: &Itinerary,
        destination: &Destination,
    ) -> Result<PathBuf, RenderError> {
        let result = self.try_render(itinerary, destination);
        match &result {
            Ok(path) => info!(path = %path.display(), places = itinerary.len(), "wrote guide"),
            Err(err) => warn!(error = %err, "guide rendering failed"),
        }
        result
    }

    fn try_render(
        &self,
        itinerary: &Itinerary,
        destination: &Destination,
    ) -> Result<PathBuf, RenderError> {
        if itinerary.is_empty() {
            return Err(RenderError::EmptyItinerary);
        }

        let font_path = &self.config.font_path;
        if !font_path.is_file() {
            return Err(RenderError::MissingFont {
                path: font_path.clone(),
            });
        }
        let family = load_font_family(font_path)?;

        fs::create_dir_all(&self.config.output_dir).map_err(|source| RenderError::Io {
            path: self.config.output_dir.clone(),
            source,
        })?;

        let document = self.compose(family, itinerary, destination);
        let mut bytes = Vec::new();
        document
            .render(&mut bytes)
            .map_err(|err| RenderError::Build(err.to_string()))?;

        let path = self.document_path(destination);
        fs::write(&path, &bytes).map_err(|source| classify_write_error(&path, source))?;

        if path.is_file() {
            Ok(path)
        } else {
            Err(RenderError::NotWritten { path })
        }
    }

    fn compose(
        &self,
        family: FontFamily<FontData>,
        itinerary: &Itinerary,
        destination: &Destination,
    ) -> genpdf::Document {
        let mut doc = genpdf::Document::new(family);
        doc.set_title(format!("{} travel guide", destination));
        doc.set_paper_size(genpdf::PaperSize::A4);
        doc.set_font_size(self.config.font_size);
        doc.set_line_spacing(1.4);

        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(15);
        decorator.set_header(|page| {
            Paragraph::new(format!("- {} -", page)).aligned(Alignment::Center)
        });
        doc.set_page_decorator(decorator);

        doc.push(
            Paragraph::new(format!(
                "{} travel guide ({})",
                destination.city, destination.country
            ))
            .styled(Style::new().bold().with_font_size(16)),
        );
        doc.push(Break::new(1));

        if let Some(url) = route_url(itinerary) {
            let link = Style::new().with_color(Color::Rgb(0, 0, 255));
            doc.push(Paragraph::new("Open the full route in Google Maps:"));
            doc.push(Paragraph::new(url).styled(link));
        }
        doc.push(Paragraph::new(format!(
            "{} stops, about {:.1} km in straight lines",
            itinerary.len(),
            itinerary.total_distance_km()
        )));
        doc.push(Break::new(1.5));

        for place in itinerary {
            push_place(&mut doc, place);
        }

        doc
    }
}

fn push_place(doc: &mut genpdf::Document, place: &Place) {
    doc.push(
        Paragraph::new(format!(
            "{}. [{}] {}",
            place.sequence_number, place.category, place.name
        ))
        .styled(Style::new().bold()),
    );
    if !place.description.is_empty() {
        doc.push(Paragraph::new(place.description.clone()));
    }
    doc.push(Paragraph::new(format!(
        "- Admission: {} | Reservation: {}",
        or_dash(&place.price_hint),
        or_dash(&place.reservation_hint)
    )));
    doc.push(Break::new(1));
}

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() { "-" } else { text }
}

/// Loads one TTF file and uses it for every style.
fn load_font_family(path: &Path) -> Result<FontFamily<FontData>, RenderError> {
    let data = FontData::load(path, None).map_err(|err| RenderError::FontLoad {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(FontFamily {
        regular: data.clone(),
        bold: data.clone(),
        italic: data.clone(),
        bold_italic: data,
    })
}

fn classify_write_error(path: &Path, source: io::Error) -> RenderError {
    match source.kind() {
        io::ErrorKind::PermissionDenied | io::ErrorKind::ResourceBusy => RenderError::FileLocked {
            path: path.to_path_buf(),
        },
        _ => RenderError::Io {
            path: path.to_path_buf(),
            source,
        },
    }
}

/// Human-readable itinerary for terminals.
pub fn text_summary(itinerary: &Itinerary, destination: &Destination) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Recommended route for {}", destination);
    let legs = itinerary.leg_distances_km();
    for (index, place) in itinerary.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n{}. {} [{}]",
            place.sequence_number, place.name, place.category
        );
        if !place.description.is_empty() {
            let _ = writeln!(out, "   {}", place.description);
        }
        let _ = writeln!(
            out,
            "   Admission: {} | Reservation: {}",
            or_dash(&place.price_hint),
            or_dash(&place.reservation_hint)
        );
        let _ = writeln!(out, "   Map: {}", place_search_url(place));
        if let Some(km) = legs.get(index) {
            let _ = writeln!(out, "   Next stop: ~{:.1} km", km);
        }
    }
    if let Some(url) = route_url(itinerary) {
        let _ = writeln!(out, "\nFull route: {}", url);
    }
    out
}
