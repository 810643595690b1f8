//! Binary assets checked in next to the fixtures.

use std::path::PathBuf;

/// A real TTF (DejaVu Sans) so the guide can actually be rendered.
pub fn font_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/DejaVuSans.ttf")
}
