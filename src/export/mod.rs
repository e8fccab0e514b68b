//! Document encoding: raster encoders, the single-page PDF writer, output file names.

pub(crate) mod filename;
pub(crate) mod pdf;
pub(crate) mod raster;

use crate::foundation::core::CanvasSize;
use crate::foundation::error::{PosterError, PosterResult};

/// Output document kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Png,
    Pdf,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
        }
    }

    /// Parse `png`/`pdf` (case-insensitive, leading dot allowed).
    pub fn parse(s: &str) -> PosterResult<Self> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            other => Err(PosterError::validation(format!(
                "unsupported document format '{other}' (expected png or pdf)"
            ))),
        }
    }
}

/// Encoded poster bytes plus what they contain.
#[derive(Clone, Debug)]
pub struct PosterDocument {
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
    /// Pixel size of the embedded raster.
    pub size: CanvasSize,
}
