//! The prepare / segments / finish persistence split.
//!
//! `prepare` snapshots everything the monodromy stage needs into
//! `<name>.prep`; independent processes may then compute disjoint
//! ranges with `segments`, each braid landing in `<name>.seg.<i>`;
//! `finish` gathers the braids (reporting exactly which are missing)
//! and runs the quotient. Numbers are serialised as exact
//! numerator/denominator strings, so snapshots are lossless and
//! portable.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::Range;
use std::path::PathBuf;

use plexus_braid::BraidWord;
use plexus_geometry::LoopGraph;
use plexus_integers::Rational;
use plexus_poly::{BiPoly, DensePoly, YPoly};
use plexus_rings::gaussian::GaussianRational;

use crate::curve::Curve;
use crate::pipeline::{finish_from, prepare_curve, segment_braid, FundamentalGroupResult, Prepared};
use crate::{Config, Error};

/// Exact complex number as numerator/denominator strings.
type Complex = (String, String);

#[derive(Serialize, Deserialize)]
struct PrepFile {
    curve_poly: Vec<Vec<Complex>>,
    curve_vertical: Vec<Complex>,
    working: Vec<Vec<Complex>>,
    strands: usize,
    line: Option<Complex>,
    discy: Vec<Complex>,
    roots: Vec<Complex>,
    points: Vec<Complex>,
    segments: Vec<(usize, usize)>,
    loops: Vec<Vec<i64>>,
    basepoint: usize,
    centres: Vec<Complex>,
    zeros: Vec<Vec<Complex>>,
}

#[derive(Serialize, Deserialize)]
struct SegFile {
    index: usize,
    strands: usize,
    gens: Vec<i32>,
    exponent_sum: i64,
}

/// Runs the geometric stage and snapshots it to `<name>.prep`.
///
/// # Errors
///
/// Pipeline errors of [`prepare_curve`] plus I/O and encoding
/// failures.
pub fn prepare(curve: &Curve, name: &str, config: &Config) -> Result<Prepared, Error> {
    let prep = prepare_curve(curve, config)?;
    let file = encode_prep(&prep);
    fs::write(prep_path(name), serde_json::to_vec_pretty(&file)?)?;
    Ok(prep)
}

/// Computes the braids of the segments in `range` (clamped to the
/// prepared segment count) and writes one `<name>.seg.<i>` file per
/// segment. Segments of the range are processed in parallel.
///
/// # Errors
///
/// I/O and pipeline errors; the first failing segment aborts the
/// batch.
pub fn segments(name: &str, range: Range<usize>, config: &Config) -> Result<(), Error> {
    let prep = load_prep(name)?;
    let count = prep.graph.as_ref().map_or(0, |g| g.segments.len());
    let indices: Vec<usize> = range.filter(|&i| i < count).collect();

    indices
        .par_iter()
        .map(|&i| {
            let braid = segment_braid(&prep, i, config)?;
            let file = SegFile {
                index: i,
                strands: braid.strands(),
                gens: braid.gens().to_vec(),
                exponent_sum: braid.exponent_sum(),
            };
            fs::write(seg_path(name, i), serde_json::to_vec(&file)?)?;
            Ok(())
        })
        .collect::<Result<Vec<()>, Error>>()?;

    Ok(())
}

/// Gathers the per-segment braids of a prepared run and produces the
/// final record.
///
/// # Errors
///
/// [`Error::MissingSegments`] listing every segment without a braid
/// file; [`Error::Corrupt`] when a stored braid fails its checksum.
pub fn finish(name: &str, config: &Config) -> Result<FundamentalGroupResult, Error> {
    let prep = load_prep(name)?;
    let count = prep.graph.as_ref().map_or(0, |g| g.segments.len());

    let mut monodromy = Vec::with_capacity(count);
    let mut missing = Vec::new();
    for i in 0..count {
        match fs::read(seg_path(name, i)) {
            Ok(bytes) => {
                let file: SegFile = serde_json::from_slice(&bytes)?;
                let braid = BraidWord::from_gens(file.strands, file.gens);
                if braid.exponent_sum() != file.exponent_sum {
                    return Err(Error::Corrupt(i));
                }
                monodromy.push(braid);
            }
            Err(_) => missing.push(i),
        }
    }

    if !missing.is_empty() {
        return Err(Error::MissingSegments(missing));
    }

    finish_from(&prep, monodromy, config)
}

fn prep_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{name}.prep"))
}

fn seg_path(name: &str, index: usize) -> PathBuf {
    PathBuf::from(format!("{name}.seg.{index}"))
}

fn encode_complex(z: &GaussianRational) -> Complex {
    (z.re().to_string(), z.im().to_string())
}

fn decode_complex(c: &Complex) -> Result<GaussianRational, Error> {
    let re: Rational = c
        .0
        .parse()
        .map_err(|_| Error::Parse(format!("bad rational '{}'", c.0)))?;
    let im: Rational = c
        .1
        .parse()
        .map_err(|_| Error::Parse(format!("bad rational '{}'", c.1)))?;
    Ok(GaussianRational::new(re, im))
}

fn encode_ypoly(p: &YPoly) -> Vec<Complex> {
    p.coeffs().iter().map(encode_complex).collect()
}

fn decode_ypoly(cs: &[Complex]) -> Result<YPoly, Error> {
    let coeffs = cs.iter().map(decode_complex).collect::<Result<_, _>>()?;
    Ok(DensePoly::new(coeffs))
}

fn encode_bipoly(p: &BiPoly) -> Vec<Vec<Complex>> {
    p.x_coefficients().iter().map(encode_ypoly).collect()
}

fn decode_bipoly(cs: &[Vec<Complex>]) -> Result<BiPoly, Error> {
    let coeffs = cs
        .iter()
        .map(|c| decode_ypoly(c))
        .collect::<Result<_, _>>()?;
    Ok(BiPoly::new(coeffs))
}

fn encode_points(ps: &[GaussianRational]) -> Vec<Complex> {
    ps.iter().map(encode_complex).collect()
}

fn decode_points(cs: &[Complex]) -> Result<Vec<GaussianRational>, Error> {
    cs.iter().map(decode_complex).collect()
}

fn encode_prep(prep: &Prepared) -> PrepFile {
    let (points, segments, loops, basepoint, centres) = match prep.graph.as_ref() {
        Some(g) => (
            encode_points(&g.points),
            g.segments.clone(),
            g.loops.clone(),
            g.basepoint,
            encode_points(&g.centres),
        ),
        None => (Vec::new(), Vec::new(), Vec::new(), 0, Vec::new()),
    };

    PrepFile {
        curve_poly: encode_bipoly(prep.curve.poly()),
        curve_vertical: encode_ypoly(prep.curve.vertical()),
        working: encode_bipoly(&prep.working),
        strands: prep.strands,
        line: prep.line.as_ref().map(encode_complex),
        discy: encode_ypoly(&prep.discy),
        roots: encode_points(&prep.roots),
        points,
        segments,
        loops,
        basepoint,
        centres,
        zeros: prep.zeros.iter().map(|z| encode_points(z)).collect(),
    }
}

fn load_prep(name: &str) -> Result<Prepared, Error> {
    let bytes = fs::read(prep_path(name))?;
    let file: PrepFile = serde_json::from_slice(&bytes)?;

    let graph = if file.points.is_empty() {
        None
    } else {
        Some(LoopGraph {
            points: decode_points(&file.points)?,
            segments: file.segments,
            loops: file.loops,
            basepoint: file.basepoint,
            centres: decode_points(&file.centres)?,
        })
    };

    Ok(Prepared {
        curve: Curve::from_parts(
            decode_bipoly(&file.curve_poly)?,
            decode_ypoly(&file.curve_vertical)?,
        ),
        working: decode_bipoly(&file.working)?,
        strands: file.strands,
        line: file.line.as_ref().map(decode_complex).transpose()?,
        discy: decode_ypoly(&file.discy)?,
        roots: decode_points(&file.roots)?,
        graph,
        zeros: file
            .zeros
            .iter()
            .map(|z| decode_points(z))
            .collect::<Result<_, _>>()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> String {
        let dir = std::env::temp_dir().join("plexus-persist-tests");
        fs::create_dir_all(&dir).unwrap();
        dir.join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_prepare_segments_finish_roundtrip() {
        let name = scratch("parabola");
        let config = Config::default();
        let curve = Curve::parse("x^2 - y").unwrap();

        let prep = prepare(&curve, &name, &config).unwrap();
        let count = prep.graph.as_ref().unwrap().segments.len();
        assert!(count > 0);

        // Two half-ranges, as parallel workers would run them.
        segments(&name, 0..count / 2, &config).unwrap();
        segments(&name, count / 2..count, &config).unwrap();

        let result = finish(&name, &config).unwrap();
        let ab = result.presentation.abelian_invariants();
        assert_eq!(ab.rank, 1);
    }

    #[test]
    fn test_finish_reports_missing_segments() {
        let name = scratch("missing");
        let config = Config::default();
        let curve = Curve::parse("x^2 - y").unwrap();

        let prep = prepare(&curve, &name, &config).unwrap();
        let count = prep.graph.as_ref().unwrap().segments.len();
        // Remove stale files from earlier runs, compute none.
        for i in 0..count {
            let _ = fs::remove_file(seg_path(&name, i));
        }

        match finish(&name, &config) {
            Err(Error::MissingSegments(m)) => assert_eq!(m.len(), count),
            other => panic!("expected missing segments, got {other:?}"),
        }
    }

    #[test]
    fn test_prep_file_roundtrip_is_exact() {
        let name = scratch("roundtrip");
        let config = Config::default();
        let curve = Curve::parse("x^2 - y^3").unwrap();

        let prep = prepare(&curve, &name, &config).unwrap();
        let reloaded = load_prep(&name).unwrap();

        assert_eq!(reloaded.strands, prep.strands);
        assert_eq!(reloaded.discy, prep.discy);
        assert_eq!(reloaded.roots, prep.roots);
        assert_eq!(reloaded.zeros, prep.zeros);
        assert_eq!(reloaded.graph.as_ref().map(|g| g.basepoint),
                   prep.graph.as_ref().map(|g| g.basepoint));
    }
}
