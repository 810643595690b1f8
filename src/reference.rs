//! Local reference material (PDF guides dropped next to the app).
//!
//! Layout: `{base_dir}/TourGuide/{country}/{city}/*.pdf`.

use std::any::Any;
use std::fs;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::place::Destination;
use crate::traits::ReferenceSource;

/// Character budget for reference text sent to the generation service.
pub const MAX_REFERENCE_CHARS: usize = 5000;

/// Top-level folder under the base directory holding per-destination material.
pub const LIBRARY_DIR: &str = "TourGuide";

#[derive(Debug, Clone)]
pub struct LibraryConfig {
    pub base_dir: PathBuf,
    pub max_chars: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            max_chars: MAX_REFERENCE_CHARS,
        }
    }
}

/// Directory holding reference material (and the route map) for a destination.
pub fn destination_dir(base_dir: &Path, destination: &Destination) -> PathBuf {
    base_dir
        .join(LIBRARY_DIR)
        .join(destination.country.name())
        .join(destination.city_component())
}

/// Returns the longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[derive(Debug, Clone)]
pub struct LocalReferenceLibrary {
    config: LibraryConfig,
}

impl LocalReferenceLibrary {
    pub fn new(config: LibraryConfig) -> Self {
        Self { config }
    }

    pub fn destination_dir(&self, destination: &Destination) -> PathBuf {
        destination_dir(&self.config.base_dir, destination)
    }

    /// Creates the destination folder so users have somewhere to drop PDFs.
    pub fn ensure_destination_dir(&self, destination: &Destination) -> io::Result<PathBuf> {
        let dir = self.destination_dir(destination);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Extracts and concatenates text from every PDF for `destination`.
    ///
    /// Missing folders and empty folders produce an explanatory string.
    pub fn extract(&self, destination: &Destination) -> String {
        let dir = self.destination_dir(destination);

        let files = match pdf_files(&dir) {
            Ok(files) => files,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "reference directory unavailable");
                return format!("Reference directory not found: {}", dir.display());
            }
        };

        if files.is_empty() {
            warn!(dir = %dir.display(), "no reference PDFs");
            return format!("No PDF files found in {}", dir.display());
        }

        let texts: Vec<String> = files
            .par_iter()
            .filter_map(|path| match extract_pdf_text(path) {
                Ok(text) => Some(text),
                Err(reason) => {
                    warn!(file = %path.display(), error = %reason, "skipping unreadable PDF");
                    None
                }
            })
            .collect();

        let joined = texts.concat();
        let text = truncate_chars(&joined, self.config.max_chars).to_string();
        debug!(files = files.len(), chars = text.chars().count(), "extracted reference text");
        text
    }
}

impl ReferenceSource for LocalReferenceLibrary {
    fn reference_text(&self, destination: &Destination) -> String {
        self.extract(destination)
    }
}

/// Text of one PDF.
///
/// The extractor panics on some embedded font encodings, so a panic is
/// reported like any other parse failure.
fn extract_pdf_text(path: &Path) -> Result<String, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("extractor panicked: {detail}")
}

/// PDF files directly inside `dir`, sorted by name.
fn pdf_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
