use std::f64::consts::{PI, TAU};

use glam::DVec2;

use crate::error::MorphError;

/// Parameters of the line influence function.
///
/// The weight of a line at a point is `(length^p / (a + distance))^b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightParams {
    /// Offset added to the distance. Must be > 0 so weights stay finite on the line itself.
    pub a: f64,
    /// How fast the influence falls off with distance. Must be >= 0.
    pub b: f64,
    /// How much longer lines dominate shorter ones.
    pub p: f64,
}

impl Default for WeightParams {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 2.0,
            p: 2.0,
        }
    }
}

impl WeightParams {
    /// Check that the parameters produce finite, positive weights.
    ///
    /// `a` must be > 0 and `b` must be >= 0, so a weight never exceeds
    /// [`Self::max_weight`].
    pub fn validate(&self) -> Result<(), MorphError> {
        let finite = self.a.is_finite() && self.b.is_finite() && self.p.is_finite();
        if !finite || self.a <= 0.0 || self.b < 0.0 {
            return Err(MorphError::InvalidWeightParams {
                a: self.a,
                b: self.b,
                p: self.p,
            });
        }
        Ok(())
    }

    /// Upper bound of the weight of a line of `length`, reached on the line itself.
    ///
    /// Infinite when `length^p` or the weight overflows `f64`.
    pub fn max_weight(&self, length: f64) -> f64 {
        (length.powf(self.p) / self.a).powf(self.b)
    }
}

/// A directed feature line segment from `P` to `Q`.
///
/// The derived midpoint, length and angle are computed once at construction.
/// A line always has a strictly positive length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureLine {
    p: DVec2,
    q: DVec2,
    m: DVec2,
    length: f64,
    angle: f64,
}

impl FeatureLine {
    /// Create a feature line from its start and end points.
    ///
    /// # Errors
    ///
    /// Fails when the endpoints coincide or are not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use glam::DVec2;
    /// use linemorph_imgproc::morph::FeatureLine;
    ///
    /// let line = FeatureLine::from_endpoints(DVec2::new(0.0, 0.0), DVec2::new(3.0, 4.0)).unwrap();
    /// assert_eq!(line.length(), 5.0);
    /// assert_eq!(line.midpoint(), DVec2::new(1.5, 2.0));
    /// ```
    pub fn from_endpoints(p: DVec2, q: DVec2) -> Result<Self, MorphError> {
        if !p.is_finite() || !q.is_finite() {
            return Err(MorphError::NonFiniteGeometry);
        }

        let diff = q - p;
        let length = diff.length();
        if length <= 0.0 || !length.is_finite() {
            return Err(MorphError::ZeroLengthLine { p, q });
        }

        Ok(Self {
            p,
            q,
            m: (p + q) / 2.0,
            length,
            angle: diff.y.atan2(diff.x),
        })
    }

    /// Rebuild a feature line from its midpoint, length and angle.
    ///
    /// The endpoints are placed `length / 2` away from `m` along `angle`.
    /// The stored angle is wrapped into `(-pi, pi]`.
    ///
    /// # Errors
    ///
    /// Fails when `length` is not strictly positive or any input is not finite.
    pub fn from_midpoint_length_angle(
        m: DVec2,
        length: f64,
        angle: f64,
    ) -> Result<Self, MorphError> {
        if !m.is_finite() || !angle.is_finite() {
            return Err(MorphError::NonFiniteGeometry);
        }
        if length <= 0.0 || !length.is_finite() {
            return Err(MorphError::InvalidLineLength(length));
        }

        let delta = DVec2::new(angle.cos(), angle.sin()) * (length / 2.0);

        Ok(Self {
            p: m - delta,
            q: m + delta,
            m,
            length,
            angle: wrap_angle(angle),
        })
    }

    /// The same segment traversed from `Q` to `P`.
    pub fn reversed(&self) -> Self {
        let diff = self.p - self.q;
        Self {
            p: self.q,
            q: self.p,
            m: self.m,
            length: self.length,
            angle: diff.y.atan2(diff.x),
        }
    }

    /// Start point.
    pub fn start(&self) -> DVec2 {
        self.p
    }

    /// End point.
    pub fn end(&self) -> DVec2 {
        self.q
    }

    /// Midpoint.
    pub fn midpoint(&self) -> DVec2 {
        self.m
    }

    /// Length of the segment, always > 0.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Direction of `Q - P` in radians, in `(-pi, pi]`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// `Q - P` rotated by -90 degrees, not normalized.
    ///
    /// This fixes the sign convention of [`Self::local_v`].
    pub fn perpendicular(&self) -> DVec2 {
        let diff = self.q - self.p;
        DVec2::new(diff.y, -diff.x)
    }

    /// Position of `x` along the line: 0 at `P`, 1 at `Q`.
    pub fn local_u(&self, x: DVec2) -> f64 {
        (x - self.p).dot(self.q - self.p) / (self.length * self.length)
    }

    /// Signed distance of `x` from the line axis, in pixels.
    pub fn local_v(&self, x: DVec2) -> f64 {
        (x - self.p).dot(self.perpendicular()) / self.length
    }

    /// Both local coordinates `(u, v)` of `x`.
    pub fn local_coords(&self, x: DVec2) -> (f64, f64) {
        (self.local_u(x), self.local_v(x))
    }

    /// Inverse of [`Self::local_coords`].
    pub fn point_from_local(&self, u: f64, v: f64) -> DVec2 {
        self.p + u * (self.q - self.p) + v * self.perpendicular() / self.length
    }

    /// Influence of this line at `x`.
    ///
    /// The distance is measured to the nearest endpoint when `x` projects
    /// outside the segment and perpendicular to the axis otherwise. The result
    /// is strictly positive for any finite `x` with valid parameters and never
    /// above [`WeightParams::max_weight`].
    pub fn weight(&self, x: DVec2, params: &WeightParams) -> f64 {
        let u = self.local_u(x);
        let dist = if u > 1.0 {
            x.distance(self.q)
        } else if u < 0.0 {
            x.distance(self.p)
        } else {
            self.local_v(x).abs()
        };

        // far away points would otherwise underflow to a zero weight
        (self.length.powf(params.p) / (params.a + dist))
            .powf(params.b)
            .max(f64::MIN_POSITIVE)
    }
}

/// Wrap an angle into `(-pi, pi]`.
pub(crate) fn wrap_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    PI - (PI - angle).rem_euclid(TAU)
}
