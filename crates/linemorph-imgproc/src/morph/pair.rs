use std::f64::consts::PI;

use glam::DVec2;

use super::line::{wrap_angle, FeatureLine};
use crate::error::MorphError;

/// A feature line in the source image and its counterpart in the destination image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureLinePair {
    /// Line in the source image.
    pub source: FeatureLine,
    /// Same feature in the destination image.
    pub dest: FeatureLine,
}

impl FeatureLinePair {
    /// Create a new pair from two already validated lines.
    pub fn new(source: FeatureLine, dest: FeatureLine) -> Self {
        Self { source, dest }
    }

    /// Create a pair directly from the endpoints of both lines.
    ///
    /// # Errors
    ///
    /// Fails when either line has zero length.
    pub fn from_endpoints(
        source: (DVec2, DVec2),
        dest: (DVec2, DVec2),
    ) -> Result<Self, MorphError> {
        Ok(Self {
            source: FeatureLine::from_endpoints(source.0, source.1)?,
            dest: FeatureLine::from_endpoints(dest.0, dest.1)?,
        })
    }

    /// The destination line oriented for blending against the source.
    ///
    /// A destination pointing exactly opposite the source is reversed, so the
    /// blend keeps one direction instead of turning through the perpendicular.
    /// Reversing does not change which pixels the line maps.
    pub fn aligned_dest(&self) -> FeatureLine {
        if angle_delta(self.source.angle(), self.dest.angle()) == PI {
            self.dest.reversed()
        } else {
            self.dest
        }
    }

    /// The in-between line at blend ratio `alpha`.
    ///
    /// Midpoint, length and angle are blended linearly; 0 gives the source
    /// line and 1 the [aligned](Self::aligned_dest) destination line. The
    /// angle turns the shorter way around. Ratios outside [0, 1] extrapolate.
    ///
    /// # Errors
    ///
    /// Fails when extrapolation drives the blended length to zero or below.
    ///
    /// # Example
    ///
    /// ```
    /// use glam::DVec2;
    /// use linemorph_imgproc::morph::FeatureLinePair;
    ///
    /// let pair = FeatureLinePair::from_endpoints(
    ///     (DVec2::new(0.0, 0.0), DVec2::new(2.0, 0.0)),
    ///     (DVec2::new(0.0, 2.0), DVec2::new(6.0, 2.0)),
    /// ).unwrap();
    ///
    /// let line = pair.interpolate(0.5).unwrap();
    /// assert_eq!(line.midpoint(), DVec2::new(2.0, 1.0));
    /// assert_eq!(line.length(), 4.0);
    /// ```
    pub fn interpolate(&self, alpha: f64) -> Result<FeatureLine, MorphError> {
        let source = self.source;
        let dest = self.aligned_dest();

        let m = (1.0 - alpha) * source.midpoint() + alpha * dest.midpoint();
        let length = (1.0 - alpha) * source.length() + alpha * dest.length();
        let angle = source.angle() + alpha * angle_delta(source.angle(), dest.angle());

        FeatureLine::from_midpoint_length_angle(m, length, angle)
    }
}

/// Signed turn from angle `from` to angle `to`, in `(-pi, pi]`.
fn angle_delta(from: f64, to: f64) -> f64 {
    wrap_angle(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-9;

    fn assert_line_eq(a: &FeatureLine, b: &FeatureLine) {
        assert_abs_diff_eq!(a.start().x, b.start().x, epsilon = EPSILON);
        assert_abs_diff_eq!(a.start().y, b.start().y, epsilon = EPSILON);
        assert_abs_diff_eq!(a.end().x, b.end().x, epsilon = EPSILON);
        assert_abs_diff_eq!(a.end().y, b.end().y, epsilon = EPSILON);
        assert_abs_diff_eq!(a.length(), b.length(), epsilon = EPSILON);
        assert_abs_diff_eq!(a.angle(), b.angle(), epsilon = EPSILON);
    }

    fn pairs() -> Result<Vec<FeatureLinePair>, MorphError> {
        Ok(vec![
            FeatureLinePair::from_endpoints(
                (DVec2::new(0.0, 0.0), DVec2::new(3.0, 3.0)),
                (DVec2::new(1.0, 0.0), DVec2::new(1.0, 6.0)),
            )?,
            FeatureLinePair::from_endpoints(
                (DVec2::new(10.0, 10.0), DVec2::new(2.0, 9.0)),
                (DVec2::new(-5.0, 4.0), DVec2::new(-9.0, 1.0)),
            )?,
            FeatureLinePair::from_endpoints(
                (DVec2::new(40.0, 12.0), DVec2::new(41.0, 80.0)),
                (DVec2::new(30.0, 10.0), DVec2::new(38.5, 70.0)),
            )?,
            // right to left, angles on both sides of +-pi
            FeatureLinePair::from_endpoints(
                (DVec2::new(8.0, 5.0), DVec2::new(1.0, 5.3)),
                (DVec2::new(8.0, 5.0), DVec2::new(1.0, 4.7)),
            )?,
        ])
    }

    #[test]
    fn interpolate_endpoints_identity() -> Result<(), MorphError> {
        for pair in pairs()? {
            assert_eq!(pair.aligned_dest(), pair.dest);
            assert_line_eq(&pair.interpolate(0.0)?, &pair.source);
            assert_line_eq(&pair.interpolate(1.0)?, &pair.dest);
        }
        Ok(())
    }

    #[test]
    fn interpolate_across_pi_turns_short_way() -> Result<(), MorphError> {
        let pair = pairs()?[3];
        assert!(pair.source.angle() > 3.0 && pair.dest.angle() < -3.0);

        let line = pair.interpolate(0.5)?;
        assert_abs_diff_eq!(line.angle().abs(), PI, epsilon = EPSILON);
        // still pointing right to left, level at the shared midpoint height
        assert_abs_diff_eq!(line.start().x - line.end().x, line.length(), epsilon = EPSILON);
        assert_abs_diff_eq!(line.midpoint().y, 5.0, epsilon = EPSILON);
        assert_abs_diff_eq!(line.start().y, line.end().y, epsilon = EPSILON);
        Ok(())
    }

    #[test]
    fn interpolate_halfway() -> Result<(), MorphError> {
        let pair = FeatureLinePair::from_endpoints(
            (DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0)),
            (DVec2::new(0.0, 0.0), DVec2::new(0.0, 8.0)),
        )?;
        let line = pair.interpolate(0.5)?;
        assert_abs_diff_eq!(line.midpoint().x, 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(line.midpoint().y, 2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(line.length(), 6.0, epsilon = EPSILON);
        assert_abs_diff_eq!(line.angle(), PI / 4.0, epsilon = EPSILON);
        Ok(())
    }

    #[test]
    fn interpolate_opposite_lines_keep_orientation() -> Result<(), MorphError> {
        // same midpoint and length, direction flipped by pi
        let pair = FeatureLinePair::from_endpoints(
            (DVec2::new(0.0, 0.0), DVec2::new(2.0, 0.0)),
            (DVec2::new(2.0, 0.0), DVec2::new(0.0, 0.0)),
        )?;
        assert_eq!(pair.dest.angle(), PI);

        let aligned = pair.aligned_dest();
        assert_eq!(aligned.start(), pair.dest.end());
        assert_eq!(aligned.end(), pair.dest.start());

        assert_line_eq(&pair.interpolate(0.0)?, &pair.source);
        assert_line_eq(&pair.interpolate(1.0)?, &aligned);

        let line = pair.interpolate(0.5)?;
        assert_eq!(line.angle(), 0.0);
        assert_abs_diff_eq!(line.midpoint().x, 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(line.length(), 2.0, epsilon = EPSILON);
        Ok(())
    }

    #[test]
    fn angle_delta_shorter_path() {
        assert_eq!(angle_delta(0.5, -0.5), -1.0);
        assert_eq!(angle_delta(0.0, PI), PI);
        assert_eq!(angle_delta(PI, 0.0), PI);

        // crossing +-pi turns through pi, not through zero
        let delta = angle_delta(3.0, -3.0);
        assert_abs_diff_eq!(delta, 2.0 * PI - 6.0, epsilon = EPSILON);
        let halfway = 3.0 + 0.5 * delta;
        assert_abs_diff_eq!(halfway.cos(), -1.0, epsilon = EPSILON);

        let delta = angle_delta(-3.0, 3.0);
        assert_abs_diff_eq!(delta, 6.0 - 2.0 * PI, epsilon = EPSILON);
        assert_abs_diff_eq!((-3.0 + 0.5 * delta).cos(), -1.0, epsilon = EPSILON);
    }

    #[test]
    fn interpolate_extrapolation_collapsing_length() -> Result<(), MorphError> {
        let pair = FeatureLinePair::from_endpoints(
            (DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)),
            (DVec2::new(0.0, 0.0), DVec2::new(3.0, 0.0)),
        )?;
        // blended length is 1 + 2 * alpha
        assert_eq!(
            pair.interpolate(-0.5),
            Err(MorphError::InvalidLineLength(0.0))
        );
        assert!(pair.interpolate(1.5).is_ok());
        Ok(())
    }
}
