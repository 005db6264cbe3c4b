use eco_core::EcoError;
use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rendering charts or composing panels
#[derive(Error, Debug)]
pub enum ChartError {
    /// The table lacks a column or holds an unreadable cell
    #[error(transparent)]
    Table(#[from] EcoError),

    /// The drawing backend failed
    #[error("Failed to draw chart: {0}")]
    Render(String),

    /// A chart image could not be read back for a panel
    #[error("Failed to read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// More images than grid cells
    #[error("{images} images do not fit a {rows}x{cols} panel grid")]
    PanelOverflow {
        images: usize,
        rows: usize,
        cols: usize,
    },

    /// A grid with no rows or no columns
    #[error("Panel grid {rows}x{cols} has no cells")]
    EmptyGrid { rows: usize, cols: usize },

    /// A grouped chart was given no grouping column
    #[error("Chart {0} needs a grouping column")]
    MissingGrouping(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(err.to_string())
    }
}

/// Type alias for Results using ChartError
pub type Result<T> = std::result::Result<T, ChartError>;
