//! A single curve path with its style attributes.

use super::bounds::Bounds;
use crate::error::{PartsError, Result};
use crate::svg::StyleAttributes;
use kurbo::{BezPath, ParamCurve, ParamCurveArclen, ParamCurveExtrema, PathSeg, Point};

const ARCLEN_ACCURACY: f64 = 1e-6;

/// Distance under which two points are the same point.
const POINT_EPSILON: f64 = 1e-9;

/// An ordered, non-empty run of curve segments sharing one set of attributes
#[derive(Debug, Clone, PartialEq)]
pub struct CutPath {
    segments: Vec<PathSeg>,
    attributes: StyleAttributes,
}

impl CutPath {
    pub fn new(segments: Vec<PathSeg>, attributes: StyleAttributes) -> Result<Self> {
        if segments.is_empty() {
            return Err(PartsError::EmptyPath);
        }
        Ok(Self {
            segments,
            attributes,
        })
    }

    /// Build from a kurbo path. Subpath breaks become discontinuities and a
    /// `Z` adds its closing line when the subpath is not already closed.
    pub fn from_bez_path(path: &BezPath, attributes: StyleAttributes) -> Result<Self> {
        Self::new(path.segments().collect(), attributes)
    }

    pub fn segments(&self) -> &[PathSeg] {
        &self.segments
    }

    pub fn attributes(&self) -> &StyleAttributes {
        &self.attributes
    }

    pub fn start(&self) -> Point {
        self.segments[0].start()
    }

    pub fn end(&self) -> Point {
        self.segments[self.segments.len() - 1].end()
    }

    /// Point at parametric position `t` along the whole path.
    ///
    /// `t` picks a segment in proportion to arc length, then the segment is
    /// evaluated at the remaining local fraction. Values outside `[0, 1]`
    /// are clamped.
    pub fn point(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let lengths: Vec<f64> = self
            .segments
            .iter()
            .map(|seg| seg.arclen(ARCLEN_ACCURACY))
            .collect();
        let total: f64 = lengths.iter().sum();

        if total <= 0.0 || !total.is_finite() {
            // Degenerate lengths: split the parameter evenly across segments
            let n = self.segments.len() as f64;
            let scaled = t * n;
            let idx = (scaled.floor() as usize).min(self.segments.len() - 1);
            return self.segments[idx].eval(scaled - idx as f64);
        }

        let target = t * total;
        let mut walked = 0.0;
        for (seg, len) in self.segments.iter().zip(&lengths) {
            if *len > 0.0 && target <= walked + len {
                return seg.eval(((target - walked) / len).clamp(0.0, 1.0));
            }
            walked += len;
        }
        self.end()
    }

    /// Each segment's end meets the next segment's start.
    pub fn is_continuous(&self) -> bool {
        self.segments
            .windows(2)
            .all(|pair| pair[0].end().distance(pair[1].start()) <= POINT_EPSILON)
    }

    /// Continuous and ending where it starts. Never fails: anything that
    /// prevents deciding closure, such as a break between segments or
    /// non-finite coordinates, reports `false`.
    pub fn is_closed(&self) -> bool {
        if !self.is_continuous() {
            return false;
        }
        self.start().distance(self.end()) <= POINT_EPSILON
    }

    pub fn bbox(&self) -> Bounds {
        let mut bounds = Bounds::from_rect(self.segments[0].bounding_box());
        for seg in &self.segments[1..] {
            bounds.expand(&Bounds::from_rect(seg.bounding_box()));
        }
        bounds
    }

    /// Start point of every segment.
    pub fn points(&self) -> Vec<Point> {
        self.segments.iter().map(|seg| seg.start()).collect()
    }

    /// One single-segment path per segment, all with this path's attributes.
    pub fn split(&self) -> Vec<CutPath> {
        self.segments
            .iter()
            .map(|seg| CutPath {
                segments: vec![*seg],
                attributes: self.attributes.clone(),
            })
            .collect()
    }

    pub fn to_bez_path(&self) -> BezPath {
        BezPath::from_path_segments(self.segments.iter().copied())
    }
}
