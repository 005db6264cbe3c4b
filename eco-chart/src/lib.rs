//! PNG charts and composite panels for the seasonal metric tables.
//!
//! A [`ChartSpec`] names what to draw; [`render_chart`] draws it from a
//! [`eco_core::Table`] into a PNG file. [`compose_panel`] reads rendered
//! charts back from disk and lays them out on a titled grid.

pub mod error;
pub mod palette;
pub mod panel;
pub mod render;
pub mod series;
pub mod spec;

pub use error::{ChartError, Result};
pub use panel::{compose_panel, PanelLayout, PanelPlan};
pub use render::render_chart;
pub use spec::{ChartKind, ChartSpec};
