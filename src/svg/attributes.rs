/// Attribute names kept from the input drawing, in output order.
pub const PRESERVED_ATTRIBUTES: [&str; 7] = [
    "transform",
    "fill",
    "stroke",
    "stroke-width",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
];

const DEFAULT_FILL: &str = "none";
const DEFAULT_STROKE: &str = "#000000";
const DEFAULT_STROKE_WIDTH: &str = "0.5";
const DEFAULT_LINECAP: &str = "round";
const DEFAULT_LINEJOIN: &str = "round";
const DEFAULT_MITERLIMIT: &str = "10";

/// Style attributes carried by each path through to the output drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleAttributes {
    /// Kept verbatim for output; never applied to the geometry.
    pub transform: Option<String>,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: String,
    pub stroke_linecap: String,
    pub stroke_linejoin: String,
    pub stroke_miterlimit: String,
}

impl Default for StyleAttributes {
    fn default() -> Self {
        Self {
            transform: None,
            fill: DEFAULT_FILL.to_string(),
            stroke: DEFAULT_STROKE.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH.to_string(),
            stroke_linecap: DEFAULT_LINECAP.to_string(),
            stroke_linejoin: DEFAULT_LINEJOIN.to_string(),
            stroke_miterlimit: DEFAULT_MITERLIMIT.to_string(),
        }
    }
}

impl StyleAttributes {
    /// Build from raw `(name, value)` pairs, keeping only preserved names.
    /// Missing attributes fall back to the defaults.
    pub fn from_raw<'a, I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut attrs = Self::default();
        for (key, value) in raw {
            let value = value.to_string();
            match key {
                "transform" => attrs.transform = Some(value),
                "fill" => attrs.fill = value,
                "stroke" => attrs.stroke = value,
                "stroke-width" => attrs.stroke_width = value,
                "stroke-linecap" => attrs.stroke_linecap = value,
                "stroke-linejoin" => attrs.stroke_linejoin = value,
                "stroke-miterlimit" => attrs.stroke_miterlimit = value,
                _ => {}
            }
        }
        attrs
    }

    /// Present attributes as `(name, value)` pairs in `PRESERVED_ATTRIBUTES` order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(PRESERVED_ATTRIBUTES.len());
        if let Some(transform) = &self.transform {
            pairs.push(("transform", transform.as_str()));
        }
        pairs.push(("fill", self.fill.as_str()));
        pairs.push(("stroke", self.stroke.as_str()));
        pairs.push(("stroke-width", self.stroke_width.as_str()));
        pairs.push(("stroke-linecap", self.stroke_linecap.as_str()));
        pairs.push(("stroke-linejoin", self.stroke_linejoin.as_str()));
        pairs.push(("stroke-miterlimit", self.stroke_miterlimit.as_str()));
        pairs
    }
}
