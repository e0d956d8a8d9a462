//! Grouping assembled cuts into parts.
//!
//! Bounding-box containment gives a first guess at which outer cut owns
//! each inner cut. When more than one outer cut's box holds the same cut,
//! the outer cut's own points decide: it must have a point beyond each of
//! the four corners of the inner cut's box. Cuts that no candidate
//! surrounds are regrouped among themselves.

use super::bounds::Bounds;
use super::group::{Cut, GroupedPath, consolidate};
use crate::error::{PartsError, Result};
use kurbo::Point;
use tracing::debug;

/// An outer cut and the cuts assigned to it, as indices into the cut list.
/// The outer cut is always the first member.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Group {
    outer: usize,
    members: Vec<usize>,
}

impl Group {
    fn new(outer: usize) -> Self {
        Self {
            outer,
            members: vec![outer],
        }
    }
}

/// Group cuts into parts: one outer cut followed by the cuts nested in it.
///
/// Fails when two outer cuts both surround the same cut, or when nesting
/// cannot be resolved.
pub fn group_parts(cuts: Vec<Cut>) -> Result<Vec<GroupedPath>> {
    let boxes: Vec<Option<Bounds>> = cuts.iter().map(Cut::bbox).collect();
    let all: Vec<usize> = (0..cuts.len()).collect();
    let groups = group_indices(&cuts, &boxes, &all)?;

    let mut slots: Vec<Option<Cut>> = cuts.into_iter().map(Some).collect();
    Ok(groups
        .into_iter()
        .map(|group| {
            consolidate(
                group
                    .members
                    .into_iter()
                    .filter_map(|idx| slots[idx].take()),
            )
        })
        .collect())
}

fn group_indices(cuts: &[Cut], boxes: &[Option<Bounds>], subset: &[usize]) -> Result<Vec<Group>> {
    let contains = |outer: usize, inner: usize| match (&boxes[outer], &boxes[inner]) {
        (Some(o), Some(i)) => o.strictly_contains(i),
        _ => false,
    };

    let mut groups: Vec<Group> = subset
        .iter()
        .copied()
        .filter(|&cut| !subset.iter().any(|&other| contains(other, cut)))
        .map(Group::new)
        .collect();

    // First pass: a cut held by exactly one outer box belongs to it
    let mut ambiguous: Vec<(usize, Vec<usize>)> = Vec::new();
    for &cut in subset {
        let candidates: Vec<usize> = (0..groups.len())
            .filter(|&g| contains(groups[g].outer, cut))
            .collect();
        match candidates.as_slice() {
            [] => {}
            [only] => groups[*only].members.push(cut),
            _ => ambiguous.push((cut, candidates)),
        }
    }

    let mut unresolved = Vec::new();
    for (cut, candidates) in ambiguous {
        let Some(bounds) = boxes[cut] else {
            unresolved.push(cut);
            continue;
        };
        let surrounding: Vec<usize> = candidates
            .into_iter()
            .filter(|&g| surrounds(&cuts[groups[g].outer].points(), &bounds))
            .collect();
        match surrounding.as_slice() {
            [] => unresolved.push(cut),
            [only] => groups[*only].members.push(cut),
            _ => {
                return Err(PartsError::AmbiguousContainment {
                    cut,
                    candidates: surrounding.iter().map(|&g| groups[g].outer).collect(),
                });
            }
        }
    }

    match unresolved.len() {
        0 => {}
        1 => groups.push(Group::new(unresolved[0])),
        remaining if remaining >= subset.len() => {
            return Err(PartsError::UnresolvableNesting { remaining });
        }
        remaining => {
            debug!(remaining, "regrouping unresolved cuts");
            groups.extend(group_indices(cuts, boxes, &unresolved)?);
        }
    }

    Ok(groups)
}

/// True when `points` has at least one point beyond each corner of
/// `bounds`. Different corners may be satisfied by different points.
pub fn surrounds(points: &[Point], bounds: &Bounds) -> bool {
    let mut top_left = false;
    let mut bottom_left = false;
    let mut bottom_right = false;
    let mut top_right = false;

    for p in points {
        if p.x < bounds.min_x && p.y < bounds.min_y {
            top_left = true;
        }
        if p.x < bounds.min_x && p.y > bounds.max_y {
            bottom_left = true;
        }
        if p.x > bounds.max_x && p.y > bounds.max_y {
            bottom_right = true;
        }
        if p.x > bounds.max_x && p.y < bounds.min_y {
            top_right = true;
        }
    }

    top_left && bottom_left && bottom_right && top_right
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuts::CutPath;
    use crate::svg::StyleAttributes;
    use kurbo::{Line, PathSeg};

    /// Closed polygon through `vertices`
    fn polygon(vertices: &[(f64, f64)]) -> Cut {
        let segments = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .map(|(&a, &b)| PathSeg::Line(Line::new(a, b)))
            .collect();
        Cut::Closed(CutPath::new(segments, StyleAttributes::default()).unwrap())
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Cut {
        polygon(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
    }

    fn first_start(part: &GroupedPath) -> Point {
        part.members()[0].start()
    }

    #[test]
    fn test_surrounds_needs_all_four_corners() {
        let bounds = Bounds::new(10.0, 10.0, 20.0, 20.0);
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 30.0),
            Point::new(30.0, 30.0),
            Point::new(30.0, 0.0),
        ];
        assert!(surrounds(&corners, &bounds));
        assert!(!surrounds(&corners[..3], &bounds));
        // On the box edge is not beyond it
        assert!(!surrounds(&[Point::new(10.0, 0.0)], &bounds));
    }

    #[test]
    fn test_nested_rectangles_form_one_part() {
        let cuts = vec![
            rect(10.0, 10.0, 20.0, 20.0),
            rect(0.0, 0.0, 30.0, 30.0),
            rect(5.0, 5.0, 25.0, 25.0),
        ];
        let parts = group_parts(cuts).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].len(), 3);
        assert_eq!(first_start(&parts[0]), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_side_by_side_parts() {
        let cuts = vec![
            rect(0.0, 0.0, 10.0, 10.0),
            rect(20.0, 0.0, 30.0, 10.0),
            rect(22.0, 2.0, 28.0, 8.0),
            rect(2.0, 2.0, 8.0, 8.0),
        ];
        let parts = group_parts(cuts).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].members()[1].start(), Point::new(2.0, 2.0));
        assert_eq!(parts[1].members()[1].start(), Point::new(22.0, 2.0));
    }

    #[test]
    fn test_ambiguous_cut_goes_to_surrounding_outer() {
        // Both outer boxes hold the small square, only the rectangle
        // has points beyond all four of its corners
        let cuts = vec![
            rect(0.0, 0.0, 60.0, 100.0),
            polygon(&[(40.0, -10.0), (100.0, -10.0), (100.0, 110.0)]),
            rect(45.0, 45.0, 55.0, 55.0),
        ];
        let parts = group_parts(cuts).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[0].members()[1].start(), Point::new(45.0, 45.0));
        assert_eq!(parts[1].len(), 1);
        assert_eq!(first_start(&parts[1]), Point::new(40.0, -10.0));
    }

    #[test]
    fn test_double_surround_is_fatal() {
        let cuts = vec![
            rect(0.0, 0.0, 60.0, 100.0),
            rect(40.0, -10.0, 100.0, 110.0),
            rect(45.0, 45.0, 55.0, 55.0),
        ];
        match group_parts(cuts) {
            Err(PartsError::AmbiguousContainment { cut, candidates }) => {
                assert_eq!(cut, 2);
                assert_eq!(candidates, vec![0, 1]);
            }
            other => panic!("expected ambiguous containment, got {other:?}"),
        }
    }

    #[test]
    fn test_single_unresolved_cut_becomes_its_own_part() {
        let cuts = vec![
            polygon(&[(0.0, 0.0), (60.0, 0.0), (0.0, 100.0)]),
            polygon(&[(40.0, -10.0), (100.0, -10.0), (100.0, 110.0)]),
            rect(45.0, 45.0, 55.0, 55.0),
        ];
        let parts = group_parts(cuts).unwrap();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.len() == 1));
        assert_eq!(first_start(&parts[2]), Point::new(45.0, 45.0));
    }

    #[test]
    fn test_unresolved_cuts_are_regrouped() {
        let cuts = vec![
            polygon(&[(0.0, 0.0), (60.0, 0.0), (0.0, 100.0)]),
            polygon(&[(40.0, -10.0), (100.0, -10.0), (100.0, 110.0)]),
            rect(47.0, 47.0, 53.0, 53.0),
            rect(42.0, 40.0, 58.0, 60.0),
        ];
        let parts = group_parts(cuts).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].len(), 2);
        assert_eq!(first_start(&parts[2]), Point::new(42.0, 40.0));
        assert_eq!(parts[2].members()[1].start(), Point::new(47.0, 47.0));
    }

    #[test]
    fn test_chains_are_flattened_into_parts() {
        let chain = Cut::Chain(GroupedPath::new(
            rect(2.0, 2.0, 8.0, 8.0).into_members()[0].split(),
        ));
        let parts = group_parts(vec![rect(0.0, 0.0, 10.0, 10.0), chain]).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].len(), 5);
    }

    #[test]
    fn test_every_cut_lands_in_exactly_one_part() {
        let cuts = vec![
            rect(0.0, 0.0, 100.0, 100.0),
            rect(10.0, 10.0, 40.0, 40.0),
            rect(15.0, 15.0, 20.0, 20.0),
            rect(200.0, 0.0, 300.0, 100.0),
            rect(250.0, 50.0, 260.0, 60.0),
        ];
        let parts = group_parts(cuts).unwrap();
        let total: usize = parts.iter().map(GroupedPath::len).sum();
        assert_eq!(parts.len(), 2);
        assert_eq!(total, 5);
    }

    #[test]
    fn test_empty_input_has_no_parts() {
        assert!(group_parts(Vec::new()).unwrap().is_empty());
    }
}
