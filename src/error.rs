use thiserror::Error;

/// Failure reported by a [`TextMeasurer`](crate::TextMeasurer).
#[derive(Error, Debug)]
pub enum MeasureError {
    /// The measuring backend could not produce dimensions.
    #[error("measurement unavailable: {0}")]
    Unavailable(String),

    /// No font is registered under the requested family name.
    #[error("unknown font family '{0}'")]
    UnknownFont(String),

    /// A font resource could not be loaded or parsed.
    #[error("could not load font '{font}': {reason}")]
    FontLoad { font: String, reason: String },

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum CloudError {
    /// Word with empty text or a non-positive weight.
    #[error("invalid word: {0}")]
    InvalidWord(String),

    /// A weight resolver produced an unusable style.
    #[error("invalid style: {0}")]
    InvalidStyle(String),

    /// The text measurer failed, including its retry.
    #[error("could not measure '{text}' in {font}: {source}")]
    Measurement {
        text: String,
        font: String,
        #[source]
        source: MeasureError,
    },

    /// Canvas growth did not converge.
    #[error("canvas growth gave up after {iterations} iterations at {width:.1}x{height:.1}")]
    GrowthLimit {
        iterations: usize,
        width: f64,
        height: f64,
    },

    /// The growth function failed to enlarge the canvas.
    #[error("growth function did not enlarge a {width:.1}x{height:.1} canvas")]
    GrowthStalled { width: f64, height: f64 },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
