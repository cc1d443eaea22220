use glam::DVec2;

use super::line::{FeatureLine, WeightParams};
use super::pair::FeatureLinePair;
use crate::error::MorphError;

/// The two positions an output pixel is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpedPoint {
    /// Sample position in the source image. May lie outside the raster.
    pub source: DVec2,
    /// Sample position in the destination image. May lie outside the raster.
    pub dest: DVec2,
}

#[derive(Debug, Clone, Copy)]
struct FieldLine {
    source: FeatureLine,
    current: FeatureLine,
    dest: FeatureLine,
}

/// Weighted sum of candidate points in one image space.
#[derive(Debug, Clone, Copy, Default)]
struct WeightedSum {
    point: DVec2,
    weight: f64,
}

impl WeightedSum {
    fn add(self, point: DVec2, weight: f64) -> Self {
        Self {
            point: self.point + point * weight,
            weight: self.weight + weight,
        }
    }

    fn mean(self) -> DVec2 {
        self.point / self.weight
    }
}

/// Inverse mapping field of a set of line pairs at one blend ratio.
///
/// The in-between lines depend only on the ratio, so they are built once here
/// and shared by every pixel of the frame.
#[derive(Debug, Clone)]
pub struct MorphField {
    lines: Vec<FieldLine>,
    weight: WeightParams,
}

impl MorphField {
    /// Build the field for `pairs` at blend ratio `alpha`.
    ///
    /// # Errors
    ///
    /// * [`MorphError::EmptyLinePairs`] if `pairs` is empty.
    /// * [`MorphError::InvalidWeightParams`] if `weight` is not usable.
    /// * [`MorphError::WeightOverflow`] if the summed line weights could
    ///   overflow `f64`, e.g. for extremely long lines.
    /// * Any error of [`FeatureLinePair::interpolate`].
    pub fn new(
        pairs: &[FeatureLinePair],
        alpha: f64,
        weight: &WeightParams,
    ) -> Result<Self, MorphError> {
        if pairs.is_empty() {
            return Err(MorphError::EmptyLinePairs);
        }
        weight.validate()?;

        let lines = pairs
            .iter()
            .map(|pair| -> Result<FieldLine, MorphError> {
                Ok(FieldLine {
                    source: pair.source,
                    current: pair.interpolate(alpha)?,
                    dest: pair.aligned_dest(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // bound each space's weight sum so the weighted means stay finite
        lines
            .iter()
            .flat_map(|line| [line.source, line.dest])
            .try_fold(0.0, |total, line| {
                let total = total + weight.max_weight(line.length());
                if total.is_finite() {
                    Ok(total)
                } else {
                    Err(MorphError::WeightOverflow(line.length()))
                }
            })?;

        Ok(Self {
            lines,
            weight: *weight,
        })
    }

    /// Number of line pairs driving the field.
    pub fn num_pairs(&self) -> usize {
        self.lines.len()
    }

    /// Map an output pixel to its source and destination sample positions.
    ///
    /// Each pair expresses `p` in the local coordinates of its in-between
    /// line, rebuilds that position against the source and destination lines
    /// and weights the candidates by the respective line's influence there.
    pub fn warp_point(&self, p: DVec2) -> WarpedPoint {
        let (source, dest) = self.lines.iter().fold(
            (WeightedSum::default(), WeightedSum::default()),
            |(source_sum, dest_sum), line| {
                let (u, v) = line.current.local_coords(p);

                let p_source = line.source.point_from_local(u, v);
                let p_dest = line.dest.point_from_local(u, v);

                (
                    source_sum.add(p_source, line.source.weight(p_source, &self.weight)),
                    dest_sum.add(p_dest, line.dest.weight(p_dest, &self.weight)),
                )
            },
        );

        WarpedPoint {
            source: source.mean(),
            dest: dest.mean(),
        }
    }
}

/// Map one output pixel through the line pairs at blend ratio `alpha`.
///
/// Convenience wrapper around [`MorphField`]; prefer building the field once
/// when mapping many pixels.
///
/// # Example
///
/// ```
/// use glam::DVec2;
/// use linemorph_imgproc::morph::{warp_point, FeatureLinePair, WeightParams};
///
/// let pair = FeatureLinePair::from_endpoints(
///     (DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0)),
///     (DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0)),
/// ).unwrap();
///
/// let warped = warp_point(DVec2::new(1.0, 2.0), &[pair], 0.5, &WeightParams::default()).unwrap();
/// assert!((warped.source - DVec2::new(1.0, 2.0)).length() < 1e-9);
/// assert!((warped.dest - DVec2::new(1.0, 2.0)).length() < 1e-9);
/// ```
pub fn warp_point(
    p: DVec2,
    pairs: &[FeatureLinePair],
    alpha: f64,
    weight: &WeightParams,
) -> Result<WarpedPoint, MorphError> {
    Ok(MorphField::new(pairs, alpha, weight)?.warp_point(p))
}
