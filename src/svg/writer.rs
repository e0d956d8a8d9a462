use crate::cuts::{Bounds, GroupedPath};
use crate::error::{PartsError, Result};
use quick_xml::escape::escape;
use std::path::Path;

/// Space left around a part, as a fraction of its larger dimension
const VIEWBOX_MARGIN: f64 = 0.1;

/// Format a number with 6 decimal places, treating -0 as 0
fn f(n: f64) -> String {
    let n = if n == 0.0 { 0.0 } else { n };
    format!("{:.6}", n)
}

/// Serialize a part as a standalone SVG document. Every member becomes one
/// `<path>` carrying its own attributes.
pub fn part_to_svg(part: &GroupedPath) -> String {
    let bounds = part
        .bbox()
        .unwrap_or(Bounds::new(0.0, 0.0, 0.0, 0.0))
        .with_margin(VIEWBOX_MARGIN);
    // A lone point or straight line still needs a visible canvas
    let w = bounds.width().max(1.0);
    let h = bounds.height().max(1.0);
    let view_box = format!("{} {} {} {}", f(bounds.min_x), f(bounds.min_y), f(w), f(h));

    let elements: Vec<String> = part
        .members()
        .iter()
        .map(|member| {
            let attrs: Vec<String> = member
                .attributes()
                .pairs()
                .into_iter()
                .map(|(name, value)| format!("{}=\"{}\"", name, escape(value)))
                .collect();
            format!(
                "<path d=\"{}\" {}/>",
                escape(&member.to_bez_path().to_svg()),
                attrs.join(" ")
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="{}">
    {}
</svg>"#,
        f(w),
        f(h),
        view_box,
        elements.join("\n    ")
    )
}

/// Write a part to `dest` as an SVG file.
pub fn write_svg<P: AsRef<Path>>(part: &GroupedPath, dest: P) -> Result<()> {
    let dest = dest.as_ref();
    std::fs::write(dest, part_to_svg(part)).map_err(|e| PartsError::io(dest, e))
}
