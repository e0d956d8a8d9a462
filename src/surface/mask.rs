//! Binary masks over a photo of the cutting surface

use image::{Rgba, RgbaImage};

/// One byte per pixel in row-major order, 1 where the pixel is marked
pub type SurfaceMask = Vec<u8>;

/// Channel value below which a pixel counts as dark
const DARK_THRESHOLD: u8 = 20;

/// Mark pixels that cannot be cut through.
/// Pixels with R < 20, G < 20, B < 20 are considered non-cuttable
pub fn create_noncuttable_mask(img: &RgbaImage) -> SurfaceMask {
    create_custom_mask(img, |r, g, b| {
        r < DARK_THRESHOLD && g < DARK_THRESHOLD && b < DARK_THRESHOLD
    })
}

/// Create a mask with a predicate over each pixel's RGB channels
pub fn create_custom_mask<F>(img: &RgbaImage, predicate: F) -> SurfaceMask
where
    F: Fn(u8, u8, u8) -> bool,
{
    let (width, height) = img.dimensions();
    let pixel_count = (width * height) as usize;
    let mut mask = vec![0u8; pixel_count];

    for (i, pixel) in img.pixels().enumerate() {
        let Rgba([r, g, b, _]) = *pixel;
        if predicate(r, g, b) {
            mask[i] = 1;
        }
    }

    mask
}
