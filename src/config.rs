//! Options for assembling cuts, writing parts and analyzing surfaces

use crate::error::{PartsError, Result};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Options for matching fragment endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Decimal digits kept when snapping endpoints before comparison.
    /// 0 snaps to whole units, negative values snap to tens, hundreds, ...
    /// Must lie in [`AssembleOptions::PRECISION_RANGE`].
    pub precision: i32,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self { precision: 0 }
    }
}

impl AssembleOptions {
    /// Precisions whose snapping grid stays finite and non-zero, with room
    /// for snapped coordinates in an `i64`
    pub const PRECISION_RANGE: RangeInclusive<i32> = -6..=9;

    /// Reject precisions outside [`Self::PRECISION_RANGE`].
    pub fn validate(&self) -> Result<()> {
        if Self::PRECISION_RANGE.contains(&self.precision) {
            Ok(())
        } else {
            Err(PartsError::InvalidPrecision {
                precision: self.precision,
                min: *Self::PRECISION_RANGE.start(),
                max: *Self::PRECISION_RANGE.end(),
            })
        }
    }
}

/// Options for splitting a drawing file into part files
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOptions {
    pub assemble: AssembleOptions,
    /// Directory the part files are written to
    pub output_dir: PathBuf,
    /// Part files are named `{prefix}{index}.svg`
    pub prefix: String,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            assemble: AssembleOptions::default(),
            output_dir: PathBuf::from("."),
            prefix: "output".to_string(),
        }
    }
}

impl SplitOptions {
    /// Destination of the part at `index`.
    pub fn part_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("{}{}.svg", self.prefix, index))
    }
}

/// Options for non-cuttable surface analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Regions whose bounding box is no taller and no wider than this
    /// (in pixels) are discarded
    pub min_region_size: u32,
    /// Rotate the surface image 90° clockwise before analysis
    pub rotate: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            min_region_size: 10,
            rotate: false,
        }
    }
}
