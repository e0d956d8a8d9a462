use kurbo::Rect;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.x1, rect.y1)
    }

    pub fn expand(&mut self, other: &Bounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when `inner` lies strictly inside `self` on all four sides.
    ///
    /// Boxes that share an edge are not nested, so a box never contains
    /// itself.
    pub fn strictly_contains(&self, inner: &Bounds) -> bool {
        self.min_x < inner.min_x
            && self.max_x > inner.max_x
            && self.min_y < inner.min_y
            && self.max_y > inner.max_y
    }

    /// True when the two boxes share any area or edge.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Grow the box on every side by `fraction` of its larger dimension.
    pub fn with_margin(&self, fraction: f64) -> Bounds {
        let margin = self.width().max(self.height()) * fraction;
        Bounds::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }
}

/// Union of a sequence of boxes, `None` when the sequence is empty.
pub fn union_bounds<I>(boxes: I) -> Option<Bounds>
where
    I: IntoIterator<Item = Bounds>,
{
    let mut combined: Option<Bounds> = None;
    for b in boxes {
        match &mut combined {
            None => combined = Some(b),
            Some(cb) => cb.expand(&b),
        }
    }
    combined
}
