//! Composite panels built from chart images already on disk.

use crate::error::{ChartError, Result};
use image::imageops::{self, FilterType};
use log::debug;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const TITLE_FONT: (&str, i32) = ("sans-serif", 32);

/// Grid shape of a panel, filled row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub rows: usize,
    pub cols: usize,
}

/// How a panel's cells are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelPlan {
    /// Cells holding an image, the first `filled` in row-major order.
    pub filled: usize,
    /// Trailing cells left blank.
    pub hidden: usize,
}

impl PanelLayout {
    pub fn new(rows: usize, cols: usize) -> PanelLayout {
        PanelLayout { rows, cols }
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Plan the placement of `images` images; fails when they do not fit.
    pub fn plan(&self, images: usize) -> Result<PanelPlan> {
        if self.capacity() == 0 {
            return Err(ChartError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if images > self.capacity() {
            return Err(ChartError::PanelOverflow {
                images,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(PanelPlan {
            filled: images,
            hidden: self.capacity() - images,
        })
    }
}

/// Largest size with the aspect ratio of `image` that fits inside `cell`.
pub fn fit_within(image: (u32, u32), cell: (u32, u32)) -> (u32, u32) {
    let (iw, ih) = image;
    let (cw, ch) = cell;
    if iw == 0 || ih == 0 || cw == 0 || ch == 0 {
        return (0, 0);
    }
    let (iw, ih, cw, ch) = (iw as u64, ih as u64, cw as u64, ch as u64);
    // width-bound when the image is relatively wider than the cell
    let (w, h) = if iw * ch >= ih * cw {
        (cw, ih * cw / iw)
    } else {
        (iw * ch / ih, ch)
    };
    (w.max(1) as u32, h.max(1) as u32)
}

/// Compose `images` onto a `layout` grid under `title` and save the result
/// as a PNG of `size` pixels at `output`.
///
/// Images are scaled to fit their cell with the aspect ratio kept and are
/// centred in it. Unused trailing cells stay blank. Nothing is written when
/// the images do not fit the grid.
pub fn compose_panel(
    images: &[PathBuf],
    layout: PanelLayout,
    title: &str,
    size: (u32, u32),
    output: &Path,
) -> Result<PanelPlan> {
    let plan = layout.plan(images.len())?;

    let root = BitMapBackend::new(output, size).into_drawing_area();
    root.fill(&WHITE)?;
    let body = root.titled(title, TITLE_FONT)?;
    let cells = body.split_evenly((layout.rows, layout.cols));

    for (cell, path) in cells.iter().zip(images) {
        let picture = image::open(path)
            .map_err(|source| ChartError::Image {
                path: path.clone(),
                source,
            })?
            .to_rgb8();
        let cell_size = cell.dim_in_pixel();
        let (w, h) = fit_within(picture.dimensions(), cell_size);
        if w == 0 || h == 0 {
            continue;
        }
        let scaled = imageops::resize(&picture, w, h, FilterType::Triangle);
        let origin = (((cell_size.0 - w) / 2) as i32, ((cell_size.1 - h) / 2) as i32);
        let element: BitMapElement<(i32, i32)> =
            BitMapElement::with_owned_buffer(origin, (w, h), scaled.into_raw()).ok_or_else(
                || ChartError::Render(format!("bitmap buffer mismatch for {}", path.display())),
            )?;
        cell.draw(&element)?;
    }
    debug!(
        "{}: {} images, {} blank cells",
        output.display(),
        plan.filled,
        plan.hidden
    );
    root.present()?;
    Ok(plan)
}
