//! # laser-parts
//!
//! A Rust library for turning fragmented laser-cutting drawings back into
//! separate, cuttable parts.
//!
//! ## Features
//!
//! - **Cut assembly**: Chain open curve fragments whose endpoints meet into
//!   closed or maximal continuous cuts
//! - **Part grouping**: Pair each outer cut with the cuts nested inside it,
//!   resolving overlapping bounding boxes by checking which outline really
//!   surrounds the inner cut
//! - **SVG I/O**: Read drawing paths and shapes, write one SVG per part with
//!   every path's style intact
//! - **Surface analysis**: Find dark, non-cuttable regions on a photo of the
//!   material
//!
//! ## Example - Splitting a Drawing
//!
//! ```rust,ignore
//! use laser_parts::{SplitOptions, split_svg_file};
//!
//! let written = split_svg_file("drawing.svg", &SplitOptions::default()).unwrap();
//! println!("wrote {} parts", written.len());
//! ```
//!
//! ## Example - Surface Analysis
//!
//! ```rust,ignore
//! use laser_parts::{SurfaceOptions, surface::analyze_surface_file};
//!
//! let regions = analyze_surface_file("plywood.png", &SurfaceOptions::default()).unwrap();
//! for region in regions {
//!     println!("{:?}", region.bounds);
//! }
//! ```

pub mod config;
pub mod cuts;
pub mod error;
pub mod pipeline;
pub mod surface;
pub mod svg;

// Re-export commonly used items
pub use config::{AssembleOptions, SplitOptions, SurfaceOptions};
pub use cuts::{Cut, CutPath, GroupedPath, assemble, consolidate, group_parts};
pub use error::{PartsError, Result};
pub use pipeline::{
    SurfaceConflict, find_surface_conflicts, split_into_parts, split_svg_file, write_parts,
};
