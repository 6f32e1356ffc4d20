//! Spiral word cloud layout.
//!
//! Places weighted words on a canvas without overlap. Each word searches
//! outward along a placement path from the canvas centre; hitboxes keep a
//! buffer of clear space between words and from the border; the canvas
//! grows until everything fits when grow-to-fit is on.
//!
//! ```no_run
//! use spiral_cloud::{layout, HeuristicMeasurer, LayoutConfig, Size, Word};
//!
//! let words = vec![Word::new("Seattle", 10.0)?, Word::new("Boise", 7.0)?];
//! let result = layout(Size::new(250.0, 250.0), &words, &LayoutConfig::default(), HeuristicMeasurer::default())?;
//! for placed in &result.placed {
//!     let center = placed.center(result.canvas);
//!     println!("{} at ({:.1}, {:.1})", placed.word.text, center.x, center.y);
//! }
//! # Ok::<(), spiral_cloud::CloudError>(())
//! ```

pub mod collision;
pub mod config;
pub mod error;
pub mod errors;
pub mod font_file;
pub mod frequency;
pub mod growth;
pub mod hitbox;
pub mod layout;
pub mod measure;
pub mod placement;
pub mod stats;
pub mod types;
pub mod weight;

pub use collision::CollisionEngine;
pub use config::LayoutConfig;
pub use error::{CloudError, MeasureError};
pub use errors::{error_hint, format_io_error};
pub use font_file::FontFileMeasurer;
pub use frequency::FrequencyMap;
pub use growth::{grow_once, preflight, stacked_min, GrowthFunction, ProportionalGrowth, WordStats};
pub use hitbox::Hitbox;
pub use layout::{layout, replay, LayoutResult, PlacedWord, WordCloud};
pub use measure::{HeuristicMeasurer, MeasureCache, TextMeasurer};
pub use placement::{trace_path, Frame, Placement, RosettePlacement, SpiralPlacement, SpiralState};
pub use stats::LayoutStats;
pub use types::{Color, Dimensions, FontDescriptor, FontFace, Point, Size, StyledWord, Word};
pub use weight::{
    FixedFontWeight, LinearWeight, OpacityWeight, SizeRamp, TwoToneWeight, WeightResolver,
};
