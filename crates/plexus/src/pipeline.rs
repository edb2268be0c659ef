//! The Van Kampen pipeline.
//!
//! `prepare_curve` carries the curve through discriminant, root
//! separation, loop layout and fibre computation; `segment_braid`
//! computes one segment's monodromy; `finish_from` composes the
//! braids along the loops and quotients to the presentation. The
//! convenience driver `fundamental_group` chains the three.

use plexus_braid::{dbvk_quotient, hurwitz_action, vk_quotient, BraidWord, FreeWord, Presentation};
use plexus_geometry::{build_loops, LoopGraph};
use plexus_monodromy::{follow_segment_approx, follow_segment_certified};
use plexus_poly::algorithms::squarefree::squarefree_part;
use plexus_poly::{BiPoly, YPoly};
use plexus_rings::gaussian::GaussianRational;
use plexus_rings::traits::Ring;
use plexus_roots::separate_roots;
use tracing::info;

use crate::curve::Curve;
use crate::{Config, Error};

/// Heights tried for the trivialising line of a non-proper
/// projection, in order.
const LINE_HEIGHTS: [i64; 5] = [2, 4, 8, 16, 32];

/// Everything the monodromy stage needs, computed once.
#[derive(Clone, Debug)]
pub struct Prepared {
    /// The normalised input curve.
    pub curve: Curve,
    /// The polynomial actually followed: the curve itself, or the
    /// curve times the trivialising line `x − h`.
    pub working: BiPoly,
    /// Number of strands (`deg_x` of the working polynomial).
    pub strands: usize,
    /// Height of the trivialising line, when one was added.
    pub line: Option<GaussianRational>,
    /// The reduced discriminant: vertical part times leading
    /// coefficient times `Res_x(P, ∂P/∂x)`, squarefree.
    pub discy: YPoly,
    /// Separated roots of `discy` (the critical values).
    pub roots: Vec<GaussianRational>,
    /// Loop layout; `None` when there are no critical values.
    pub graph: Option<LoopGraph>,
    /// Fibre at every loop vertex, sorted lexicographically.
    pub zeros: Vec<Vec<GaussianRational>>,
}

/// The final record of a pipeline run.
#[derive(Clone, Debug)]
pub struct FundamentalGroupResult {
    /// The polynomial the monodromy was computed for.
    pub curve: BiPoly,
    /// The reduced discriminant.
    pub discy: YPoly,
    /// The critical values.
    pub roots: Vec<GaussianRational>,
    /// Loop vertices.
    pub points: Vec<GaussianRational>,
    /// Segments as point-index pairs.
    pub segments: Vec<(usize, usize)>,
    /// Loops as signed segment sequences.
    pub loops: Vec<Vec<i64>>,
    /// Basepoint index into `points`.
    pub basepoint: usize,
    /// Fibres at the loop vertices.
    pub zeros: Vec<Vec<GaussianRational>>,
    /// One braid per segment.
    pub monodromy: Vec<BraidWord>,
    /// One braid per loop.
    pub braids: Vec<BraidWord>,
    /// The simplified presentation of the fundamental group.
    pub presentation: Presentation,
}

/// Runs the geometric stage of the pipeline.
///
/// # Errors
///
/// Root separation, loop construction and fibre errors;
/// [`Error::TrivialisingLineExhausted`] when no tried height works
/// for a non-proper projection.
pub fn prepare_curve(curve: &Curve, config: &Config) -> Result<Prepared, Error> {
    if curve.fibre_degree() == 0 {
        // Purely horizontal components: no strands to follow.
        return Ok(Prepared {
            curve: curve.clone(),
            working: curve.poly().clone(),
            strands: 0,
            line: None,
            discy: curve.vertical().clone(),
            roots: Vec::new(),
            graph: None,
            zeros: Vec::new(),
        });
    }

    if curve.is_monic() {
        return prepare_working(curve, curve.poly().clone(), None, config);
    }

    // Non-proper projection: multiply in a line x = h and retry with
    // larger heights while the layout degenerates.
    let mut last = Error::TrivialisingLineExhausted;
    for h in LINE_HEIGHTS {
        let height = GaussianRational::from(h);
        let working = curve.poly().mul_x_minus(&height);
        match prepare_working(curve, working, Some(height), config) {
            Ok(prep) => return Ok(prep),
            Err(e) => last = e,
        }
    }
    Err(last)
}

fn prepare_working(
    curve: &Curve,
    working: BiPoly,
    line: Option<GaussianRational>,
    config: &Config,
) -> Result<Prepared, Error> {
    let strands = working.degree_x();

    // Critical values: the discriminant proper, the vertical part,
    // and the leading coefficient (degree drops are critical too).
    let disc = working.discriminant_x();
    let crit = disc
        .mul(curve.vertical())
        .mul(working.leading_coeff_x());
    if crit.is_zero() {
        return Err(Error::Parse(
            "the working polynomial is not squarefree".to_string(),
        ));
    }
    let discy = squarefree_part(&crit);

    if discy.degree() == 0 {
        return Ok(Prepared {
            curve: curve.clone(),
            working,
            strands,
            line,
            discy,
            roots: Vec::new(),
            graph: None,
            zeros: Vec::new(),
        });
    }

    let roots = separate_roots(&discy, 100, config.newton_limit)?;
    let graph = build_loops(&roots)?;

    let mut zeros = Vec::with_capacity(graph.points.len());
    for p in &graph.points {
        let fibre_poly = working.eval_y(p);
        if fibre_poly.degree() != strands {
            return Err(Error::DegenerateFibre);
        }
        let mut fibre = separate_roots(&fibre_poly, 100, config.newton_limit)?;
        if fibre.len() != strands {
            return Err(Error::DegenerateFibre);
        }
        fibre.sort_by(|a, b| a.re().cmp(b.re()).then_with(|| a.im().cmp(b.im())));
        zeros.push(fibre);
    }

    Ok(Prepared {
        curve: curve.clone(),
        working,
        strands,
        line,
        discy,
        roots: graph.centres.clone(),
        graph: Some(graph),
        zeros,
    })
}

/// Computes the monodromy braid of one segment.
///
/// # Errors
///
/// Separation, fit and singularity errors of the chosen follower.
///
/// # Panics
///
/// Panics if `index` is out of range or no loops were prepared.
pub fn segment_braid(prep: &Prepared, index: usize, config: &Config) -> Result<BraidWord, Error> {
    let graph = prep.graph.as_ref().expect("segments exist only with loops");
    let (ai, bi) = graph.segments[index];

    if config.verbosity >= 1 {
        info!(segment = index, "computing segment monodromy");
    }

    let braid = if config.monodromy_approx {
        follow_segment_approx(
            &prep.working,
            &graph.points[ai],
            &graph.points[bi],
            &prep.zeros[ai],
            &prep.zeros[bi],
            config.adaptivity_factor,
            config.newton_limit,
        )?
    } else {
        follow_segment_certified(
            &prep.working,
            &graph.points[ai],
            &graph.points[bi],
            &prep.zeros[ai],
            &prep.zeros[bi],
        )?
    };

    Ok(braid)
}

/// Composes the per-segment braids along the loops and quotients to
/// the final presentation.
///
/// # Errors
///
/// [`Error::MissingSegments`] is raised by the persistence layer;
/// here the braid list must already be complete.
pub fn finish_from(
    prep: &Prepared,
    monodromy: Vec<BraidWord>,
    config: &Config,
) -> Result<FundamentalGroupResult, Error> {
    let Some(graph) = prep.graph.as_ref() else {
        // No critical values: a free group.
        let rank = if prep.strands == 0 {
            prep.discy.degree()
        } else {
            prep.strands
        };
        return Ok(FundamentalGroupResult {
            curve: prep.working.clone(),
            discy: prep.discy.clone(),
            roots: Vec::new(),
            points: Vec::new(),
            segments: Vec::new(),
            loops: Vec::new(),
            basepoint: 0,
            zeros: Vec::new(),
            monodromy: Vec::new(),
            braids: Vec::new(),
            presentation: Presentation::free(rank),
        });
    };

    assert_eq!(
        monodromy.len(),
        graph.segments.len(),
        "one braid per segment is required"
    );

    // Compose along each loop, inverting reversed segments.
    let mut braids = Vec::with_capacity(graph.loops.len());
    for l in &graph.loops {
        let mut braid = BraidWord::identity(prep.strands.max(1));
        for &s in l {
            let idx = usize::try_from(s.unsigned_abs()).expect("segment index fits in usize") - 1;
            let piece = if s > 0 {
                monodromy[idx].clone()
            } else {
                monodromy[idx].inverse()
            };
            braid = braid.compose(&piece);
        }
        if config.shrink_braid {
            braid = braid.shrink();
        }
        braids.push(braid);
    }

    let presentation = match &prep.line {
        Some(h) => {
            let line_strand = nearest_index(&prep.zeros[graph.basepoint], h);
            dbvk_quotient(&braids, prep.strands, line_strand)
        }
        None => {
            let vertical_loop: Vec<bool> = graph
                .centres
                .iter()
                .map(|c| Ring::is_zero(&prep.curve.vertical().eval(c)))
                .collect();
            if vertical_loop.iter().any(|&v| v) {
                mixed_quotient(&braids, prep.strands, &vertical_loop)
            } else {
                vk_quotient(&braids, prep.strands)
            }
        }
    };

    Ok(FundamentalGroupResult {
        curve: prep.working.clone(),
        discy: prep.discy.clone(),
        roots: prep.roots.clone(),
        points: graph.points.clone(),
        segments: graph.segments.clone(),
        loops: graph.loops.clone(),
        basepoint: graph.basepoint,
        zeros: prep.zeros.clone(),
        monodromy,
        braids,
        presentation: presentation.simplified(),
    })
}

/// The full pipeline for a textual curve.
///
/// # Errors
///
/// Any stage error: parsing, separation, layout, monodromy.
pub fn fundamental_group(input: &str, config: &Config) -> Result<FundamentalGroupResult, Error> {
    let curve = Curve::parse(input)?;
    let prep = prepare_curve(&curve, config)?;

    let count = prep.graph.as_ref().map_or(0, |g| g.segments.len());
    let mut monodromy = Vec::with_capacity(count);
    for i in 0..count {
        monodromy.push(segment_braid(&prep, i, config)?);
    }

    finish_from(&prep, monodromy, config)
}

/// The Van Kampen quotient when some loops encircle horizontal
/// components of the curve: the meridian of a whole-fibre component
/// survives as a free generator `g_i` that conjugates the fibre
/// relations, while ordinary loops impose the plain relations.
fn mixed_quotient(braids: &[BraidWord], strands: usize, vertical_loop: &[bool]) -> Presentation {
    let basis: Vec<FreeWord> = (1..=strands)
        .map(|i| FreeWord::generator(i32::try_from(i).expect("index fits in i32")))
        .collect();

    let mut extra = 0usize;
    let mut relators = Vec::new();
    for (i, braid) in braids.iter().enumerate() {
        let image = hurwitz_action(braid, &basis);
        if vertical_loop[i] {
            extra += 1;
            let gi = FreeWord::generator(
                i32::try_from(strands + extra).expect("index fits in i32"),
            );
            for (j, fj_image) in image.iter().enumerate() {
                let relator = fj_image
                    .concat(&gi)
                    .concat(&basis[j].inverse())
                    .concat(&gi.inverse());
                if !relator.is_identity() {
                    relators.push(relator);
                }
            }
        } else {
            for (j, fj_image) in image.iter().enumerate() {
                let relator = fj_image.concat(&basis[j].inverse());
                if !relator.is_identity() {
                    relators.push(relator);
                }
            }
        }
    }

    // Renumber so the auxiliary generators are contiguous after the
    // meridians (they already are by construction).
    Presentation::new(strands + extra, relators)
}

fn nearest_index(fibre: &[GaussianRational], target: &GaussianRational) -> usize {
    let mut best = 0;
    let mut best_d = fibre[0].dist_sq(target);
    for (i, z) in fibre.iter().enumerate().skip(1) {
        let d = z.dist_sq(target);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> Config {
        Config::default()
    }

    #[test]
    fn test_no_critical_values_gives_free_group() {
        // Two parallel lines x = ±1: no critical values at all.
        let r = fundamental_group("x^2 - 1", &quiet()).unwrap();
        assert!(r.loops.is_empty());
        let ab = r.presentation.abelian_invariants();
        assert_eq!(ab.rank, 2);
        assert!(ab.torsion.is_empty());
    }

    #[test]
    fn test_single_line_is_z() {
        let r = fundamental_group("x - y", &quiet()).unwrap();
        let ab = r.presentation.abelian_invariants();
        assert_eq!(ab.rank, 1);
        assert!(ab.torsion.is_empty());
    }

    #[test]
    fn test_horizontal_line_is_z() {
        // The curve y = 0 is a whole fibre; the complement is
        // ℂ* × ℂ.
        let r = fundamental_group("y", &quiet()).unwrap();
        let ab = r.presentation.abelian_invariants();
        assert_eq!(ab.rank, 1);
    }

    #[test]
    fn test_crossing_pair_of_lines() {
        // x·y = 0: one fibre line and one section through it.
        let r = fundamental_group("x*y", &quiet()).unwrap();
        let ab = r.presentation.abelian_invariants();
        assert_eq!(ab.rank, 2);
        assert!(ab.torsion.is_empty());
    }

    #[test]
    fn test_parabola_is_z() {
        // A smooth conic with one branch point: ⟨a, b | a = b⟩ = ℤ.
        let r = fundamental_group("x^2 - y", &quiet()).unwrap();
        assert_eq!(r.loops.len(), 1);
        let ab = r.presentation.abelian_invariants();
        assert_eq!(ab.rank, 1);
        assert!(ab.torsion.is_empty());
    }
}
