use super::attributes::StyleAttributes;
use crate::cuts::CutPath;
use crate::error::{PartsError, Result};
use kurbo::{BezPath, Circle, Ellipse, Rect, RoundedRect, Shape};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;
use tracing::{debug, warn};

/// Flattening tolerance used when converting circles, ellipses and rounded
/// corners to Béziers
const SHAPE_TOLERANCE: f64 = 1e-3;

/// Read every drawable element of an SVG file as a path.
pub fn read_svg<P: AsRef<Path>>(path: P) -> Result<Vec<CutPath>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| PartsError::io(path, e))?;
    parse_svg(&content)
}

/// Parse SVG content into paths.
///
/// `<path>`, `<line>`, `<polyline>`, `<polygon>`, `<rect>`, `<circle>` and
/// `<ellipse>` are converted; anything under `<defs>` is ignored. Elements
/// without geometry are skipped.
pub fn parse_svg(content: &str) -> Result<Vec<CutPath>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut paths = Vec::new();
    let mut defs_depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"defs" {
                    defs_depth += 1;
                } else if defs_depth == 0
                    && let Some(path) = parse_element(e)?
                {
                    paths.push(path);
                }
            }
            Ok(Event::Empty(ref e)) => {
                if defs_depth == 0
                    && let Some(path) = parse_element(e)?
                {
                    paths.push(path);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"defs" {
                    defs_depth = defs_depth.saturating_sub(1);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    debug!(paths = paths.len(), "parsed drawing");
    Ok(paths)
}

/// Raw attributes of an element, XML-unescaped
fn collect_attributes(e: &BytesStart) -> Vec<(String, String)> {
    e.attributes()
        .flatten()
        .map(|attr| {
            let key = std::str::from_utf8(attr.key.as_ref()).unwrap_or("");
            let raw = std::str::from_utf8(&attr.value).unwrap_or("");
            let value = unescape(raw)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| raw.to_string());
            (key.to_string(), value)
        })
        .collect()
}

fn parse_element(e: &BytesStart) -> Result<Option<CutPath>> {
    let local = e.local_name();
    let tag = std::str::from_utf8(local.as_ref()).unwrap_or("");
    if !matches!(
        tag,
        "path" | "line" | "polyline" | "polygon" | "rect" | "circle" | "ellipse"
    ) {
        return Ok(None);
    }

    let attrs = collect_attributes(e);
    let lookup = |name: &str| {
        attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    };
    let number = |name: &str| lookup(name).map(parse_length).unwrap_or(0.0);

    let geometry = match tag {
        "path" => {
            let d = lookup("d").unwrap_or("");
            if d.trim().is_empty() {
                None
            } else {
                Some(BezPath::from_svg(d).map_err(|err| PartsError::PathData {
                    data: d.to_string(),
                    message: err.to_string(),
                })?)
            }
        }
        "line" => {
            let mut path = BezPath::new();
            path.move_to((number("x1"), number("y1")));
            path.line_to((number("x2"), number("y2")));
            Some(path)
        }
        "polyline" => polyline_path(lookup("points").unwrap_or(""), false),
        "polygon" => polyline_path(lookup("points").unwrap_or(""), true),
        "rect" => {
            let (x, y) = (number("x"), number("y"));
            let (w, h) = (number("width"), number("height"));
            // Corners are circular. A missing radius takes the other one's value
            let rx = lookup("rx").map(parse_length);
            let ry = lookup("ry").map(parse_length);
            if let (Some(rx), Some(ry)) = (rx, ry)
                && rx != ry
            {
                warn!(rx, ry, "rect has elliptical corners, using rx for both axes");
            }
            let r = rx.or(ry).unwrap_or(0.0);
            if w <= 0.0 || h <= 0.0 {
                None
            } else if r > 0.0 {
                Some(RoundedRect::new(x, y, x + w, y + h, r).to_path(SHAPE_TOLERANCE))
            } else {
                Some(Rect::new(x, y, x + w, y + h).to_path(SHAPE_TOLERANCE))
            }
        }
        "circle" => {
            let r = number("r");
            (r > 0.0).then(|| {
                Circle::new((number("cx"), number("cy")), r).to_path(SHAPE_TOLERANCE)
            })
        }
        "ellipse" => {
            let (rx, ry) = (number("rx"), number("ry"));
            (rx > 0.0 && ry > 0.0).then(|| {
                Ellipse::new((number("cx"), number("cy")), (rx, ry), 0.0)
                    .to_path(SHAPE_TOLERANCE)
            })
        }
        _ => None,
    };

    let Some(geometry) = geometry.filter(|g| g.segments().next().is_some()) else {
        warn!(element = tag, "skipping element without geometry");
        return Ok(None);
    };

    let style = StyleAttributes::from_raw(attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    CutPath::from_bez_path(&geometry, style).map(Some)
}

/// Parse a coordinate or length, ignoring a trailing `px`
fn parse_length(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .parse()
        .unwrap_or(0.0)
}

/// Build a path from a `points` attribute. An odd trailing number is dropped.
fn polyline_path(points: &str, close: bool) -> Option<BezPath> {
    let numbers: Vec<f64> = points
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();

    let mut pairs = numbers.chunks_exact(2).map(|c| (c[0], c[1]));
    let first = pairs.next()?;
    let mut path = BezPath::new();
    path.move_to(first);
    for p in pairs {
        path.line_to(p);
    }
    if close {
        path.close_path();
    }
    Some(path)
}
