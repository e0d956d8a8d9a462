//! Non-cuttable surface analysis
//!
//! Finds dark areas on a photo of the material to be cut, such as knots,
//! prints or stickers, so parts can be checked against them.
//!
//! The analysis:
//! 1. Optionally rotate the photo a quarter turn
//! 2. Mask dark pixels as non-cuttable
//! 3. Label 8-connected regions of the mask
//! 4. Drop regions whose bounding box is not larger than the threshold

mod mask;
mod regions;

use crate::config::SurfaceOptions;
use crate::error::{PartsError, Result};
use image::{DynamicImage, ImageReader};
use std::path::Path;
use tracing::debug;

pub use mask::{SurfaceMask, create_custom_mask, create_noncuttable_mask};
pub use regions::{PixelBounds, Region, find_notable_regions, label_regions};

/// Find the notable non-cuttable regions of a surface image
pub fn analyze_surface(img: &DynamicImage, options: &SurfaceOptions) -> Vec<Region> {
    let rgba = if options.rotate {
        img.rotate90().to_rgba8()
    } else {
        img.to_rgba8()
    };
    let (width, height) = rgba.dimensions();

    let mask = create_noncuttable_mask(&rgba);
    let regions = label_regions(&mask, width, height);
    let found = regions.len();
    let notable = find_notable_regions(regions, options.min_region_size);
    debug!(found, notable = notable.len(), "labeled surface regions");
    notable
}

/// Load a surface image from disk and analyze it
pub fn analyze_surface_file<P: AsRef<Path>>(path: P, options: &SurfaceOptions) -> Result<Vec<Region>> {
    let path = path.as_ref();
    let img = ImageReader::open(path)
        .map_err(|e| PartsError::io(path, e))?
        .decode()?;
    Ok(analyze_surface(&img, options))
}
