//! The loop honeycomb around the critical values.
//!
//! Given the roots of the discriminant, this module builds a planar
//! graph of piecewise-linear loops, one per root, all based at a
//! common basepoint: each root's Voronoi cell (clipped to a bounding
//! box) is its loop, and the cells are stitched together along a
//! spanning tree of the cell-adjacency graph, the handles running
//! along shared cell edges. All vertices are exact Gaussian
//! rationals; no root ever lies on an edge.

use plexus_integers::Rational;
use plexus_rings::gaussian::GaussianRational;
use plexus_rings::traits::Ring;
use rustc_hash::FxHashMap;

use crate::primitives::{cross, crossing, cycorder, detects_left_crossing, mediatrix, neighbours};
use crate::GeometryError;

/// The combinatorial output of the loop constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopGraph {
    /// Deduplicated, sorted loop vertices.
    pub points: Vec<GaussianRational>,
    /// Segments as ascending pairs of point indices.
    pub segments: Vec<(usize, usize)>,
    /// One loop per root: signed 1-based segment indices; a negative
    /// index traverses the segment in reverse.
    pub loops: Vec<Vec<i64>>,
    /// The common start and end of every loop, as a point index.
    pub basepoint: usize,
    /// The root encircled by each loop, in loop order.
    pub centres: Vec<GaussianRational>,
}

/// A Voronoi cell polygon: counter-clockwise vertices with one
/// witness per edge (`None` marks a bounding-box edge; otherwise the
/// site on the far side of the edge).
#[derive(Clone, Debug)]
struct Cell {
    vertices: Vec<GaussianRational>,
    witnesses: Vec<Option<GaussianRational>>,
}

impl Cell {
    fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Index of the first edge carried by the given witness.
    fn edge_with_witness(&self, w: &GaussianRational) -> Option<usize> {
        self.witnesses
            .iter()
            .position(|x| x.as_ref() == Some(w))
    }

    /// Splits edge `k` at `p` (a point of that edge), unless `p`
    /// already is one of its endpoints.
    fn split_edge(&mut self, k: usize, p: &GaussianRational) {
        let next = (k + 1) % self.len();
        if &self.vertices[k] == p || &self.vertices[next] == p {
            return;
        }
        let w = self.witnesses[k].clone();
        self.vertices.insert(k + 1, p.clone());
        self.witnesses.insert(k + 1, w);
    }

    /// Vertex position of `p`.
    fn position(&self, p: &GaussianRational) -> Option<usize> {
        self.vertices.iter().position(|v| v == p)
    }

    /// The counter-clockwise arc from vertex `from` to vertex `to`,
    /// inclusive of both.
    fn arc(&self, from: &GaussianRational, to: &GaussianRational) -> Vec<GaussianRational> {
        let n = self.len();
        let i = self.position(from).expect("arc start is a cell vertex");
        let j = self.position(to).expect("arc end is a cell vertex");
        let mut out = Vec::new();
        let mut k = i;
        loop {
            out.push(self.vertices[k].clone());
            if k == j {
                break;
            }
            k = (k + 1) % n;
        }
        out
    }

    /// The full counter-clockwise cycle from `from` back to itself
    /// (first and last entries are both `from`).
    fn cycle(&self, from: &GaussianRational) -> Vec<GaussianRational> {
        let n = self.len();
        let i = self.position(from).expect("cycle start is a cell vertex");
        let mut out = Vec::with_capacity(n + 1);
        for k in 0..=n {
            out.push(self.vertices[(i + k) % n].clone());
        }
        out
    }
}

/// Builds the loop graph around the given pairwise distinct roots.
///
/// # Errors
///
/// [`GeometryError::DuplicateRoots`] when two roots coincide;
/// [`GeometryError::MissingSharedEdge`] if cell adjacency breaks down
/// (which exact arithmetic rules out for distinct roots).
pub fn build_loops(roots: &[GaussianRational]) -> Result<LoopGraph, GeometryError> {
    assert!(!roots.is_empty(), "at least one root is required");

    for (i, a) in roots.iter().enumerate() {
        if roots[i + 1..].contains(a) {
            return Err(GeometryError::DuplicateRoots);
        }
    }

    let sorted = sort_by_centroid_distance(roots);
    let cells = build_cells(&sorted);
    let index_of: FxHashMap<GaussianRational, usize> = sorted
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, r)| (r, i))
        .collect();

    // Cell adjacency ("lovers"): i and j are adjacent when an edge of
    // either cell is witnessed by the other site.
    let n = sorted.len();
    let mut adjacency = vec![Vec::new(); n];
    for (i, cell) in cells.iter().enumerate() {
        for w in cell.witnesses.iter().flatten() {
            let j = index_of[w];
            if !adjacency[i].contains(&j) {
                adjacency[i].push(j);
            }
            if !adjacency[j].contains(&i) {
                adjacency[j].push(i);
            }
        }
    }

    let parent = spanning_tree(&adjacency)?;
    let mut cells = cells;

    // Connector between each tree child and its parent: the midpoint
    // of the shared cell edge, inserted as a vertex on both sides.
    let mut connector: Vec<Option<GaussianRational>> = vec![None; n];
    for i in 1..n {
        let p = parent[i];
        let edge = cells[i]
            .edge_with_witness(&sorted[p])
            .ok_or(GeometryError::MissingSharedEdge)?;
        let a = cells[i].vertices[edge].clone();
        let b = cells[i].vertices[(edge + 1) % cells[i].len()].clone();
        let half = Rational::from_i64(1, 2);
        let mid = (a + b).scale(&half);

        cells[i].split_edge(edge, &mid);
        let back = cells[p]
            .edge_with_witness(&sorted[i])
            .ok_or(GeometryError::MissingSharedEdge)?;
        // The shared edge is the same exact segment seen from both
        // cells, so the midpoint lies on it on the parent side too.
        cells[p].split_edge(back, &mid);
        connector[i] = Some(mid);
    }

    let basepoint_vertex = cells[0].vertices[0].clone();
    let entry: Vec<GaussianRational> = (0..n)
        .map(|i| {
            if i == 0 {
                basepoint_vertex.clone()
            } else {
                connector[i].clone().expect("non-root nodes have connectors")
            }
        })
        .collect();

    // Raw loops: handle · cell cycle · reversed handle.
    let mut raw_loops = Vec::with_capacity(n);
    for i in 0..n {
        let path = tree_path(&parent, i);

        let mut handle = vec![basepoint_vertex.clone()];
        for t in 0..path.len() - 1 {
            let here = path[t];
            let arc = cells[here].arc(&entry[here], &entry[path[t + 1]]);
            handle.extend_from_slice(&arc[1..]);
        }

        let mut walk = handle.clone();
        let cycle = cells[i].cycle(&entry[i]);
        walk.extend_from_slice(&cycle[1..]);
        let mut back = handle;
        back.reverse();
        walk.extend_from_slice(&back[1..]);

        raw_loops.push(walk);
    }

    Ok(convert_loops(&raw_loops, &basepoint_vertex, sorted))
}

/// Sorts roots by increasing distance to their centroid, breaking
/// ties lexicographically.
fn sort_by_centroid_distance(roots: &[GaussianRational]) -> Vec<GaussianRational> {
    let count = Rational::from(i64::try_from(roots.len()).expect("root count fits in i64"));
    let sum = roots
        .iter()
        .fold(GaussianRational::zero(), |acc, r| acc + r.clone());
    let centroid = sum.scale(&count.recip());

    let mut sorted = roots.to_vec();
    sorted.sort_by(|a, b| {
        a.dist_sq(&centroid)
            .cmp(&b.dist_sq(&centroid))
            .then_with(|| a.re().cmp(b.re()))
            .then_with(|| a.im().cmp(b.im()))
    });
    sorted
}

/// Builds every root's Voronoi cell, clipped to a common bounding
/// box, by iterated half-plane clipping against candidate witnesses
/// (Gabriel neighbours first, then the rest by distance).
fn build_cells(sorted: &[GaussianRational]) -> Vec<Cell> {
    let (lo_re, hi_re) = min_max(sorted.iter().map(GaussianRational::re));
    let (lo_im, hi_im) = min_max(sorted.iter().map(GaussianRational::im));

    // A generous margin keeps the cells fat around boundary roots.
    let one = Rational::one();
    let width = &hi_re - &lo_re;
    let height = &hi_im - &lo_im;
    let margin = if width > height { width } else { height };
    let margin = if margin > one { margin } else { one };
    let lo_re = &lo_re - &margin;
    let hi_re = &hi_re + &margin;
    let lo_im = &lo_im - &margin;
    let hi_im = &hi_im + &margin;

    let corner = |re: &Rational, im: &Rational| GaussianRational::new(re.clone(), im.clone());
    let box_cell = Cell {
        vertices: vec![
            corner(&lo_re, &lo_im),
            corner(&hi_re, &lo_im),
            corner(&hi_re, &hi_im),
            corner(&lo_re, &hi_im),
        ],
        witnesses: vec![None, None, None, None],
    };

    sorted
        .iter()
        .map(|site| {
            let mut cell = box_cell.clone();

            // Gabriel neighbours first (they carve the final cell
            // fastest), then the remaining sites in cyclic order.
            let mut candidates = neighbours(sorted, site);
            let rest: Vec<GaussianRational> = sorted
                .iter()
                .filter(|r| *r != site && !candidates.contains(r))
                .cloned()
                .collect();
            candidates.extend(cycorder(&rest, site));

            for witness in &candidates {
                let marks =
                    detects_left_crossing(&cell.vertices, &cell.witnesses, site, witness);
                if marks.iter().any(|&m| m) {
                    cell = clip_cell(&cell, site, witness);
                }
            }
            cell
        })
        .collect()
}

fn min_max<'a>(values: impl Iterator<Item = &'a Rational>) -> (Rational, Rational) {
    let mut lo: Option<Rational> = None;
    let mut hi: Option<Rational> = None;
    for v in values {
        if lo.as_ref().map_or(true, |l| v < l) {
            lo = Some(v.clone());
        }
        if hi.as_ref().map_or(true, |h| v > h) {
            hi = Some(v.clone());
        }
    }
    (lo.expect("non-empty input"), hi.expect("non-empty input"))
}

/// Clips a convex cell by the half-plane of points at least as close
/// to `site` as to `witness` (Sutherland–Hodgman, exact arithmetic).
/// New edges along the mediatrix are witnessed by `witness`.
fn clip_cell(cell: &Cell, site: &GaussianRational, witness: &GaussianRational) -> Cell {
    let n = cell.len();
    let inside = |v: &GaussianRational| v.dist_sq(site) <= v.dist_sq(witness);

    // Two points spanning the perpendicular bisector line.
    let (med_a, med_b) = mediatrix(site, witness);

    let mut vertices = Vec::with_capacity(n + 2);
    let mut witnesses = Vec::with_capacity(n + 2);

    for k in 0..n {
        let a = &cell.vertices[k];
        let b = &cell.vertices[(k + 1) % n];
        let w = &cell.witnesses[k];
        let a_in = inside(a);
        let b_in = inside(b);

        if a_in {
            vertices.push(a.clone());
            if b_in {
                witnesses.push(w.clone());
            } else {
                // Exit point: the rest of this edge is cut off.
                let x = crossing(a, b, &med_a, &med_b)
                    .expect("a crossed edge meets the mediatrix");
                witnesses.push(w.clone());
                if x != *a {
                    vertices.push(x);
                    witnesses.push(Some(witness.clone()));
                } else {
                    // The edge leaves exactly at `a`; the outgoing
                    // edge runs along the mediatrix.
                    *witnesses.last_mut().expect("just pushed") = Some(witness.clone());
                }
            }
        } else if b_in {
            // Entry point: the edge re-enters the half-plane.
            let x = crossing(a, b, &med_a, &med_b)
                .expect("a crossed edge meets the mediatrix");
            if x != *b {
                vertices.push(x);
                witnesses.push(w.clone());
            }
        }
    }

    // Collapse duplicate consecutive vertices that exact ties can
    // produce; the surviving edge is the outgoing one, so it keeps
    // the later witness.
    let mut cleaned = Cell {
        vertices: Vec::with_capacity(vertices.len()),
        witnesses: Vec::with_capacity(witnesses.len()),
    };
    for (v, w) in vertices.into_iter().zip(witnesses) {
        if cleaned.vertices.last() == Some(&v) {
            *cleaned.witnesses.last_mut().expect("non-empty with a last vertex") = w;
            continue;
        }
        cleaned.vertices.push(v);
        cleaned.witnesses.push(w);
    }
    while cleaned.vertices.len() > 1 && cleaned.vertices.first() == cleaned.vertices.last() {
        cleaned.vertices.pop();
        cleaned.witnesses.pop();
    }

    cleaned
}

/// Breadth-first spanning tree over the adjacency lists, rooted at 0.
fn spanning_tree(adjacency: &[Vec<usize>]) -> Result<Vec<usize>, GeometryError> {
    let n = adjacency.len();
    let mut parent = vec![usize::MAX; n];
    parent[0] = 0;
    let mut queue = std::collections::VecDeque::from([0usize]);

    while let Some(i) = queue.pop_front() {
        for &j in &adjacency[i] {
            if parent[j] == usize::MAX {
                parent[j] = i;
                queue.push_back(j);
            }
        }
    }

    if parent.iter().any(|&p| p == usize::MAX) {
        return Err(GeometryError::MissingSharedEdge);
    }
    Ok(parent)
}

/// The node sequence from the tree root to `i`.
fn tree_path(parent: &[usize], i: usize) -> Vec<usize> {
    let mut path = vec![i];
    let mut cur = i;
    while parent[cur] != cur {
        cur = parent[cur];
        path.push(cur);
    }
    path.reverse();
    path
}

/// Deduplicates and sorts the loop vertices, encodes segments as
/// ascending index pairs and loops as signed segment sequences, and
/// shrinks away trivial segments and back-tracks.
fn convert_loops(
    raw_loops: &[Vec<GaussianRational>],
    basepoint: &GaussianRational,
    centres: Vec<GaussianRational>,
) -> LoopGraph {
    // Gather, deduplicate and sort the points.
    let mut points: Vec<GaussianRational> = Vec::new();
    let mut seen: FxHashMap<GaussianRational, ()> = FxHashMap::default();
    for l in raw_loops {
        for p in l {
            if seen.insert(p.clone(), ()).is_none() {
                points.push(p.clone());
            }
        }
    }
    points.sort_by(|a, b| a.re().cmp(b.re()).then_with(|| a.im().cmp(b.im())));
    let index: FxHashMap<GaussianRational, usize> = points
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, p)| (p, i))
        .collect();

    let mut segments: Vec<(usize, usize)> = Vec::new();
    let mut segment_index: FxHashMap<(usize, usize), usize> = FxHashMap::default();

    let mut loops = Vec::with_capacity(raw_loops.len());
    for l in raw_loops {
        let mut encoded: Vec<i64> = Vec::with_capacity(l.len());
        for pair in l.windows(2) {
            let a = index[&pair[0]];
            let b = index[&pair[1]];
            if a == b {
                continue;
            }
            let key = (a.min(b), a.max(b));
            let s = *segment_index.entry(key).or_insert_with(|| {
                segments.push(key);
                segments.len() - 1
            });
            let signed = i64::try_from(s + 1).expect("segment count fits in i64");
            encoded.push(if a < b { signed } else { -signed });
        }
        loops.push(shrink(&encoded));
    }

    LoopGraph {
        basepoint: index[basepoint],
        points,
        segments,
        loops,
        centres,
    }
}

/// Removes adjacent back-tracks `s, −s` from a signed segment
/// sequence. One stack pass reaches the fixpoint, so the operation
/// is idempotent.
#[must_use]
pub fn shrink(seq: &[i64]) -> Vec<i64> {
    let mut out: Vec<i64> = Vec::with_capacity(seq.len());
    for &s in seq {
        if out.last() == Some(&-s) {
            out.pop();
        } else {
            out.push(s);
        }
    }
    out
}

/// The winding number of a closed vertex path around `z`, by signed
/// horizontal ray crossings. `z` must not lie on the path.
#[must_use]
pub fn winding_number(path: &[GaussianRational], z: &GaussianRational) -> i64 {
    let mut w = 0i64;
    for pair in path.windows(2) {
        let a = &pair[0];
        let b = &pair[1];
        let d = b - a;
        let rel = &(z.clone() - a.clone());
        if a.im() <= z.im() && b.im() > z.im() && cross(&d, rel).signum() > 0 {
            w += 1;
        }
        if b.im() <= z.im() && a.im() > z.im() && cross(&d, rel).signum() < 0 {
            w -= 1;
        }
    }
    w
}
