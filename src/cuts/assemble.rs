//! Endpoint matching that chains open fragments into cuts.
//!
//! Fragments are processed in input order. Each rounded endpoint is owned
//! by the chain that first registered it; when a fragment touches two
//! different chains, the chain at its end point is folded into the chain at
//! its start point. Chains live in an arena and merges go through a
//! disjoint-set forest, so no index ever needs rewriting.

use super::group::{Cut, GroupedPath};
use super::path::CutPath;
use crate::config::AssembleOptions;
use crate::error::Result;
use kurbo::Point;
use std::collections::HashMap;
use tracing::debug;

/// An open piece of curve waiting to be matched at its endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub start: Point,
    pub end: Point,
    pub path: CutPath,
}

impl Fragment {
    pub fn new(path: CutPath) -> Self {
        Self {
            start: path.point(0.0),
            end: path.point(1.0),
            path,
        }
    }
}

/// Separate closed paths from open fragments.
///
/// Continuous open paths become one fragment each. Discontinuous paths are
/// split so every segment is matched on its own.
pub fn endpoints(paths: Vec<CutPath>) -> (Vec<CutPath>, Vec<Fragment>) {
    let mut closed = Vec::new();
    let mut fragments = Vec::new();

    for path in paths {
        if path.is_closed() {
            closed.push(path);
        } else if path.is_continuous() {
            fragments.push(Fragment::new(path));
        } else {
            fragments.extend(path.split().into_iter().map(Fragment::new));
        }
    }

    (closed, fragments)
}

/// Endpoint snapped to the matching grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GridPoint {
    x: i64,
    y: i64,
}

impl GridPoint {
    fn snap(p: Point, precision: i32) -> Self {
        let scale = 10f64.powi(precision);
        Self {
            x: (p.x * scale).round_ties_even() as i64,
            y: (p.y * scale).round_ties_even() as i64,
        }
    }
}

/// Disjoint-set forest over chain ids
#[derive(Debug, Default)]
struct ChainSets {
    parent: Vec<usize>,
}

impl ChainSets {
    fn make_set(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut id: usize) -> usize {
        while self.parent[id] != id {
            self.parent[id] = self.parent[self.parent[id]];
            id = self.parent[id];
        }
        id
    }

    /// Make `absorbed` resolve to `survivor`. Both must be roots.
    fn absorb(&mut self, survivor: usize, absorbed: usize) {
        self.parent[absorbed] = survivor;
    }
}

/// Chain fragments whose snapped endpoints coincide.
///
/// Returns one group per connected chain in order of first discovery.
/// Fragments keep the order in which they joined their chain. Fails when
/// `options.precision` is out of range.
pub fn assemble_chains(
    fragments: Vec<Fragment>,
    options: &AssembleOptions,
) -> Result<Vec<GroupedPath>> {
    options.validate()?;
    let mut chains: Vec<Option<Vec<CutPath>>> = Vec::new();
    let mut sets = ChainSets::default();
    let mut owners: HashMap<GridPoint, usize> = HashMap::new();

    for fragment in fragments {
        let start = GridPoint::snap(fragment.start, options.precision);
        let end = GridPoint::snap(fragment.end, options.precision);

        let start_owner = owners.get(&start).copied().map(|id| sets.find(id));
        let end_owner = owners.get(&end).copied().map(|id| sets.find(id));

        let target = match (start_owner, end_owner) {
            (Some(survivor), Some(absorbed)) if survivor != absorbed => {
                let moved = chains[absorbed].take().unwrap_or_default();
                debug!(
                    survivor,
                    absorbed,
                    moved = moved.len(),
                    "merging chains"
                );
                if let Some(chain) = chains[survivor].as_mut() {
                    chain.extend(moved);
                }
                sets.absorb(survivor, absorbed);
                survivor
            }
            (Some(owner), Some(_)) => owner,
            (Some(owner), None) => {
                owners.insert(end, owner);
                owner
            }
            (None, Some(owner)) => {
                owners.insert(start, owner);
                owner
            }
            (None, None) => {
                let id = sets.make_set();
                chains.push(Some(Vec::new()));
                owners.insert(start, id);
                owners.insert(end, id);
                debug!(chain = id, "starting chain");
                id
            }
        };

        if let Some(chain) = chains[target].as_mut() {
            chain.push(fragment.path);
        }
    }

    Ok(chains.into_iter().flatten().map(GroupedPath::new).collect())
}

/// Closed paths pass through untouched, followed by the assembled chains.
pub fn assemble_cuts(
    closed: Vec<CutPath>,
    fragments: Vec<Fragment>,
    options: &AssembleOptions,
) -> Result<Vec<Cut>> {
    let chains = assemble_chains(fragments, options)?;
    Ok(closed
        .into_iter()
        .map(Cut::Closed)
        .chain(chains.into_iter().map(Cut::Chain))
        .collect())
}

/// Split raw paths into fragments and assemble them into cuts.
pub fn assemble(paths: Vec<CutPath>, options: &AssembleOptions) -> Result<Vec<Cut>> {
    let (closed, fragments) = endpoints(paths);
    debug!(
        closed = closed.len(),
        fragments = fragments.len(),
        "assembling cuts"
    );
    assemble_cuts(closed, fragments, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PartsError;
    use crate::svg::StyleAttributes;
    use kurbo::{Line, PathSeg};

    fn line_path(a: (f64, f64), b: (f64, f64)) -> CutPath {
        CutPath::new(
            vec![PathSeg::Line(Line::new(a, b))],
            StyleAttributes::default(),
        )
        .unwrap()
    }

    fn frag(a: (f64, f64), b: (f64, f64)) -> Fragment {
        Fragment::new(line_path(a, b))
    }

    /// Every ordering of `items`, by Heap's algorithm
    fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
        fn heap<T: Clone>(k: usize, items: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
            if k <= 1 {
                out.push(items.clone());
                return;
            }
            for i in 0..k {
                heap(k - 1, items, out);
                if k % 2 == 0 {
                    items.swap(i, k - 1);
                } else {
                    items.swap(0, k - 1);
                }
            }
        }
        let mut items = items.to_vec();
        let mut out = Vec::new();
        let k = items.len();
        heap(k, &mut items, &mut out);
        out
    }

    fn sorted_starts(group: &GroupedPath) -> Vec<(i64, i64)> {
        let mut starts: Vec<(i64, i64)> = group
            .members()
            .iter()
            .map(|p| (p.start().x as i64, p.start().y as i64))
            .collect();
        starts.sort();
        starts
    }

    const A: (f64, f64) = (0.0, 0.0);
    const B: (f64, f64) = (10.0, 0.0);
    const C: (f64, f64) = (10.0, 10.0);
    const D: (f64, f64) = (0.0, 10.0);

    #[test]
    fn test_square_from_shuffled_fragments() {
        let fragments = vec![frag(A, B), frag(C, D), frag(D, A), frag(B, C)];
        let chains = assemble_chains(fragments, &AssembleOptions::default()).unwrap();
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].len(), 4);
    }

    #[test]
    fn test_merge_order_follows_discovery() {
        // C->D starts chain 1, D->A folds chain 0 into it
        let fragments = vec![frag(A, B), frag(C, D), frag(D, A), frag(B, C)];
        let chains = assemble_chains(fragments, &AssembleOptions::default()).unwrap();
        let starts: Vec<Point> = chains[0].members().iter().map(CutPath::start).collect();
        let expected: Vec<Point> = [C, A, D, B].into_iter().map(Point::from).collect();
        assert_eq!(starts, expected);
    }

    #[test]
    fn test_square_every_order() {
        let fragments = vec![frag(A, B), frag(B, C), frag(C, D), frag(D, A)];
        for order in permutations(&fragments) {
            let chains = assemble_chains(order, &AssembleOptions::default()).unwrap();
            assert_eq!(chains.len(), 1);
            assert_eq!(
                sorted_starts(&chains[0]),
                vec![(0, 0), (0, 10), (10, 0), (10, 10)]
            );
        }
    }

    #[test]
    fn test_bridged_chains_every_order() {
        // Chain one: P0-P1-P2, chain two: Q0-Q1-Q2, bridged by P2-Q0
        let fragments = vec![
            frag((0.0, 0.0), (1.0, 0.0)),
            frag((1.0, 0.0), (2.0, 0.0)),
            frag((5.0, 0.0), (6.0, 0.0)),
            frag((6.0, 0.0), (7.0, 0.0)),
            frag((2.0, 0.0), (5.0, 0.0)),
        ];
        for order in permutations(&fragments) {
            let chains = assemble_chains(order, &AssembleOptions::default()).unwrap();
            assert_eq!(chains.len(), 1, "all fragments form one chain");
            assert_eq!(
                sorted_starts(&chains[0]),
                vec![(0, 0), (1, 0), (2, 0), (5, 0), (6, 0)]
            );
        }
    }

    #[test]
    fn test_separate_chains_stay_separate() {
        let fragments = vec![
            frag((0.0, 0.0), (1.0, 0.0)),
            frag((50.0, 50.0), (51.0, 50.0)),
            frag((1.0, 0.0), (1.0, 1.0)),
        ];
        let chains = assemble_chains(fragments, &AssembleOptions::default()).unwrap();
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].len(), 2);
        assert_eq!(chains[1].len(), 1);
    }

    #[test]
    fn test_rounding_tolerates_jitter() {
        let fragments = vec![frag((0.0, 0.0), (10.2, 0.0)), frag((9.8, 0.1), (10.0, 10.0))];
        let chains = assemble_chains(fragments, &AssembleOptions::default()).unwrap();
        assert_eq!(chains.len(), 1);

        let strict = AssembleOptions { precision: 1 };
        let fragments = vec![frag((0.0, 0.0), (10.2, 0.0)), frag((9.8, 0.1), (10.0, 10.0))];
        assert_eq!(assemble_chains(fragments, &strict).unwrap().len(), 2);
    }

    #[test]
    fn test_precision_out_of_range_is_rejected() {
        // Far-apart fragments that an overflowing grid would snap together
        let far_apart = || vec![frag((1.0, 1.0), (2.0, 2.0)), frag((50.0, 50.0), (60.0, 70.0))];
        let finest = AssembleOptions { precision: 9 };
        assert_eq!(assemble_chains(far_apart(), &finest).unwrap().len(), 2);
        let coarsest = AssembleOptions { precision: -6 };
        assert_eq!(assemble_chains(far_apart(), &coarsest).unwrap().len(), 1);

        for precision in [10, 400, -7, -400] {
            let result = assemble_chains(far_apart(), &AssembleOptions { precision });
            assert!(matches!(
                result,
                Err(PartsError::InvalidPrecision { precision: p, .. }) if p == precision
            ));
        }
    }

    #[test]
    fn test_ties_round_to_even() {
        assert_eq!(GridPoint::snap(Point::new(0.5, 1.5), 0), GridPoint { x: 0, y: 2 });
        assert_eq!(GridPoint::snap(Point::new(-2.5, 2.5), 0), GridPoint { x: -2, y: 2 });
        assert_eq!(GridPoint::snap(Point::new(123.0, 0.0), -1), GridPoint { x: 12, y: 0 });
    }

    #[test]
    fn test_endpoints_sorts_paths() {
        let square = CutPath::new(
            vec![
                PathSeg::Line(Line::new(A, B)),
                PathSeg::Line(Line::new(B, C)),
                PathSeg::Line(Line::new(C, A)),
            ],
            StyleAttributes::default(),
        )
        .unwrap();
        let open = CutPath::new(
            vec![PathSeg::Line(Line::new(A, B)), PathSeg::Line(Line::new(B, C))],
            StyleAttributes::default(),
        )
        .unwrap();
        let broken = CutPath::new(
            vec![PathSeg::Line(Line::new(A, B)), PathSeg::Line(Line::new(C, D))],
            StyleAttributes::default(),
        )
        .unwrap();

        let (closed, fragments) = endpoints(vec![square, open, broken]);
        assert_eq!(closed.len(), 1);
        // One for the continuous path, two for the broken one
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0].start, Point::from(A));
        assert_eq!(fragments[0].end, Point::from(C));
        assert_eq!(fragments[2].start, Point::from(C));
    }

    #[test]
    fn test_assemble_closed_first() {
        let closed = CutPath::new(
            vec![
                PathSeg::Line(Line::new(A, B)),
                PathSeg::Line(Line::new(B, C)),
                PathSeg::Line(Line::new(C, A)),
            ],
            StyleAttributes::default(),
        )
        .unwrap();
        let cuts = assemble(
            vec![line_path((20.0, 0.0), (30.0, 0.0)), closed.clone()],
            &AssembleOptions::default(),
        )
        .unwrap();
        assert_eq!(cuts.len(), 2);
        assert_eq!(cuts[0], Cut::Closed(closed));
        assert!(matches!(&cuts[1], Cut::Chain(g) if g.len() == 1));
    }

    #[test]
    fn test_empty_input() {
        assert!(assemble(Vec::new(), &AssembleOptions::default()).unwrap().is_empty());
    }
}
