//! SVG drawing input and output
//!
//! Reads drawing elements as paths with a fixed set of style attributes,
//! and writes parts back out with every member's attributes intact.

pub mod attributes;
pub mod reader;
pub mod writer;

pub use attributes::{PRESERVED_ATTRIBUTES, StyleAttributes};
pub use reader::{parse_svg, read_svg};
pub use writer::{part_to_svg, write_svg};
