//! Human-facing error messages.
use std::io;
use std::path::Path;

use crate::error::{CloudError, MeasureError};

/// Describe a failed font file read, with a suggestion for the caller.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    let suggestion = match err.kind() {
        _ if path.is_dir() => "The path names a directory; point it at a .ttf or .otf file.",
        io::ErrorKind::NotFound => "Check that the font file exists at this path.",
        io::ErrorKind::PermissionDenied => "The font file is not readable by this process.",
        io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData => {
            "The font data looks truncated; re-download or re-export it."
        }
        _ => "Register the font from bytes instead if the file cannot be read.",
    };
    format!("{operation} {}: {err}. {suggestion}", path.display())
}

/// Return an actionable hint for a layout error.
pub fn error_hint(err: &CloudError) -> String {
    use CloudError::*;
    match err {
        InvalidWord(msg) => format!("{msg}. Every word needs text and a positive weight."),
        InvalidStyle(msg) => format!("{msg}. Check the weight resolver."),
        Measurement { text, source, .. } => match source {
            MeasureError::UnknownFont(font) => {
                format!("'{text}' uses font '{font}', which the measurer does not know. Register it first.")
            }
            other => format!("Could not measure '{text}': {other}."),
        },
        GrowthLimit { iterations, .. } => format!(
            "Canvas still too small after {iterations} growth steps. Raise max_growth_iterations or shrink the words."
        ),
        GrowthStalled { .. } => "The growth function must return a larger size.".to_string(),
        Config(msg) => format!("{msg}. Invalid configuration."),
        Io(io) => format!("{io}"),
        Json(e) => format!("{e}. Check the JSON input."),
    }
}
