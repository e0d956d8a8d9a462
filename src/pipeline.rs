//! End-to-end flow: drawing in, one file per part out

use crate::config::{AssembleOptions, SplitOptions};
use crate::cuts::{CutPath, GroupedPath, assemble, group_parts};
use crate::error::{PartsError, Result};
use crate::surface::Region;
use crate::svg::{read_svg, write_svg};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A part whose bounding box touches a non-cuttable region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceConflict {
    /// Index of the part in output order
    pub part: usize,
    /// `Region::id` of the region it touches, counting from 1
    pub region: usize,
}

/// Assemble raw paths into cuts and group the cuts into parts
pub fn split_into_parts(paths: Vec<CutPath>, options: &AssembleOptions) -> Result<Vec<GroupedPath>> {
    let path_count = paths.len();
    let cuts = assemble(paths, options)?;
    let cut_count = cuts.len();
    let parts = group_parts(cuts)?;
    info!(
        paths = path_count,
        cuts = cut_count,
        parts = parts.len(),
        "grouped drawing into parts"
    );
    Ok(parts)
}

/// Write each part to `{output_dir}/{prefix}{index}.svg`
pub fn write_parts(parts: &[GroupedPath], options: &SplitOptions) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&options.output_dir)
        .map_err(|e| PartsError::io(&options.output_dir, e))?;

    let mut written = Vec::with_capacity(parts.len());
    for (index, part) in parts.iter().enumerate() {
        let dest = options.part_path(index);
        write_svg(part, &dest)?;
        debug!(part = index, members = part.len(), dest = %dest.display(), "wrote part");
        written.push(dest);
    }
    Ok(written)
}

/// Read a drawing, split it into parts and write one file per part
pub fn split_svg_file<P: AsRef<Path>>(input: P, options: &SplitOptions) -> Result<Vec<PathBuf>> {
    let paths = read_svg(input)?;
    let parts = split_into_parts(paths, &options.assemble)?;
    write_parts(&parts, options)
}

/// Every (part, region) pair whose bounding boxes overlap
pub fn find_surface_conflicts(parts: &[GroupedPath], regions: &[Region]) -> Vec<SurfaceConflict> {
    let mut conflicts = Vec::new();
    for (index, part) in parts.iter().enumerate() {
        let Some(bounds) = part.bbox() else {
            continue;
        };
        for region in regions.iter().filter(|r| r.overlaps(&bounds)) {
            conflicts.push(SurfaceConflict {
                part: index,
                region: region.id,
            });
        }
    }
    conflicts
}
