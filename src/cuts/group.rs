//! Grouped paths and the cut variant shared by the assembler and grouper.

use super::bounds::{Bounds, union_bounds};
use super::path::CutPath;
use kurbo::Point;

/// Several paths treated as one logical unit. Members keep their own
/// attributes and are never groups themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedPath {
    members: Vec<CutPath>,
}

impl GroupedPath {
    pub fn new(members: Vec<CutPath>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[CutPath] {
        &self.members
    }

    pub fn into_members(self) -> Vec<CutPath> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Union box over all members, `None` for an empty group.
    pub fn bbox(&self) -> Option<Bounds> {
        union_bounds(self.members.iter().map(CutPath::bbox))
    }

    /// Every member's segment start points, in member order.
    pub fn points(&self) -> Vec<Point> {
        self.members.iter().flat_map(CutPath::points).collect()
    }
}

/// One cuttable contour: a path that already closes on itself, or a chain
/// of fragments joined at their endpoints
#[derive(Debug, Clone, PartialEq)]
pub enum Cut {
    Closed(CutPath),
    Chain(GroupedPath),
}

impl Cut {
    /// Bounding box; an empty chain has none.
    pub fn bbox(&self) -> Option<Bounds> {
        match self {
            Cut::Closed(path) => Some(path.bbox()),
            Cut::Chain(group) => group.bbox(),
        }
    }

    pub fn points(&self) -> Vec<Point> {
        match self {
            Cut::Closed(path) => path.points(),
            Cut::Chain(group) => group.points(),
        }
    }

    pub fn into_members(self) -> Vec<CutPath> {
        match self {
            Cut::Closed(path) => vec![path],
            Cut::Chain(group) => group.into_members(),
        }
    }
}

impl From<CutPath> for Cut {
    fn from(path: CutPath) -> Self {
        Cut::Closed(path)
    }
}

impl From<GroupedPath> for Cut {
    fn from(group: GroupedPath) -> Self {
        Cut::Chain(group)
    }
}

/// Flatten cuts into one group, pulling the members of chained cuts up a
/// level so the result never nests a group.
pub fn consolidate<I>(cuts: I) -> GroupedPath
where
    I: IntoIterator<Item = Cut>,
{
    GroupedPath::new(cuts.into_iter().flat_map(Cut::into_members).collect())
}
