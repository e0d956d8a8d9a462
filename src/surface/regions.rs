//! Connected-component labeling of non-cuttable pixels

use super::mask::SurfaceMask;
use crate::cuts::Bounds;
use tracing::warn;

/// Pixel-space bounding box, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelBounds {
    fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn update(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }
}

/// One 8-connected group of marked pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Discovery order in a row-major scan, starting at 1
    pub id: usize,
    /// Member pixels as `(x, y)`
    pub pixels: Vec<(u32, u32)>,
    pub bounds: PixelBounds,
}

impl Region {
    /// Bounds in drawing space. One pixel is taken as one drawing unit.
    pub fn to_bounds(&self) -> Bounds {
        Bounds::new(
            self.bounds.min_x as f64,
            self.bounds.min_y as f64,
            self.bounds.max_x as f64,
            self.bounds.max_y as f64,
        )
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.to_bounds().overlaps(other)
    }
}

/// Label the 8-connected regions of a mask.
///
/// Uses an explicit work stack, so region size is not limited by the call
/// stack. A mask that does not hold `width * height` pixels has no regions.
pub fn label_regions(mask: &SurfaceMask, width: u32, height: u32) -> Vec<Region> {
    let w = width as usize;
    let h = height as usize;
    if w.checked_mul(h) != Some(mask.len()) {
        warn!(
            mask_len = mask.len(),
            width, height, "mask size does not match image size"
        );
        return Vec::new();
    }
    let mut visited = vec![false; mask.len()];
    let mut regions = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if mask[idx] != 1 || visited[idx] {
                continue;
            }

            visited[idx] = true;
            stack.push((x, y));
            let mut pixels = Vec::new();
            let mut bounds = PixelBounds::at(x as u32, y as u32);

            while let Some((px, py)) = stack.pop() {
                pixels.push((px as u32, py as u32));
                bounds.update(px as u32, py as u32);

                for oy in -1i32..=1 {
                    for ox in -1i32..=1 {
                        if ox == 0 && oy == 0 {
                            continue;
                        }
                        let ny = py as i32 + oy;
                        let nx = px as i32 + ox;
                        if ny < 0 || ny >= h as i32 || nx < 0 || nx >= w as i32 {
                            continue;
                        }
                        let nidx = ny as usize * w + nx as usize;
                        if mask[nidx] == 1 && !visited[nidx] {
                            visited[nidx] = true;
                            stack.push((nx as usize, ny as usize));
                        }
                    }
                }
            }

            regions.push(Region {
                id: regions.len() + 1,
                pixels,
                bounds,
            });
        }
    }

    regions
}

/// Keep regions whose bounding box is taller or wider than `threshold`.
pub fn find_notable_regions(regions: Vec<Region>, threshold: u32) -> Vec<Region> {
    regions
        .into_iter()
        .filter(|r| r.bounds.height() > threshold || r.bounds.width() > threshold)
        .collect()
}
