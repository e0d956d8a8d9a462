//! Cut reconstruction
//!
//! Turns raw drawing paths into parts:
//! 1. Split paths into closed loops and open fragments
//! 2. Chain fragments whose endpoints meet into assembled cuts
//! 3. Group cuts into parts: an outer cut plus the cuts nested inside it

pub mod assemble;
pub mod bounds;
pub mod group;
pub mod hierarchy;
pub mod path;

pub use assemble::{Fragment, assemble, assemble_chains, assemble_cuts, endpoints};
pub use bounds::Bounds;
pub use group::{Cut, GroupedPath, consolidate};
pub use hierarchy::{group_parts, surrounds};
pub use path::CutPath;
