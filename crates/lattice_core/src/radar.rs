//! Polygon geometry for radar charts: concentric grid rings, axis rays,
//! and value-series polygons around a common center.

use thiserror::Error;

use crate::geometry::Point;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RadarError {
    #[error("a radar needs at least 3 axes, got {0}")]
    TooFewAxes(usize),
    #[error("series has {got} values but the radar has {expected} axes")]
    SeriesLengthMismatch { expected: usize, got: usize },
}

/// Fixed layout for a radar chart: axis count, center, outer radius,
/// and the value range series are normalized against.
///
/// Axis 0 points straight up; axes proceed clockwise at equal angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarGeometry {
    axes: usize,
    center: Point,
    radius: f32,
    min_value: f32,
    max_value: f32,
}

impl RadarGeometry {
    pub fn new(axes: usize, center: Point, radius: f32) -> Result<RadarGeometry, RadarError> {
        if axes < 3 {
            return Err(RadarError::TooFewAxes(axes));
        }

        Ok(RadarGeometry {
            axes,
            center,
            radius,
            min_value: 0.,
            max_value: 1.,
        })
    }

    /// Changes the value range series are normalized against. A
    /// degenerate range falls back to the unit range.
    pub fn with_value_range(mut self, min_value: f32, max_value: f32) -> Self {
        if max_value - min_value > f32::EPSILON {
            self.min_value = min_value;
            self.max_value = max_value;
        }
        self
    }

    pub fn axes(&self) -> usize {
        self.axes
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Angle of an axis in radians; 0 is up, increasing clockwise.
    fn angle(&self, axis: usize) -> f32 {
        axis as f32 / self.axes as f32 * std::f32::consts::TAU
    }

    /// The point at fraction `t` (clamped to [0, 1]) along an axis ray.
    pub fn point_for(&self, axis: usize, t: f32) -> Point {
        debug_assert!(axis < self.axes);

        let t = if t.is_finite() { t.clamp(0., 1.) } else { 0. };
        let angle = self.angle(axis);
        let reach = self.radius * t;

        Point::new(
            self.center.x + reach * angle.sin(),
            self.center.y - reach * angle.cos(),
        )
    }

    /// Vertices of a concentric grid polygon at fraction `t` of the
    /// radius, one per axis.
    pub fn ring(&self, t: f32) -> Vec<Point> {
        (0..self.axes).map(|axis| self.point_for(axis, t)).collect()
    }

    /// The outer endpoint of an axis ray, for grid spokes.
    pub fn axis_end(&self, axis: usize) -> Point {
        self.point_for(axis, 1.)
    }

    /// Anchor point for an axis caption, pushed `offset` pixels past
    /// the rim along the ray.
    pub fn label_anchor(&self, axis: usize, offset: f32) -> Point {
        debug_assert!(axis < self.axes);

        let angle = self.angle(axis);
        let reach = self.radius + offset;

        Point::new(
            self.center.x + reach * angle.sin(),
            self.center.y - reach * angle.cos(),
        )
    }

    /// Normalizes one value into a [0, 1] fraction of the radius.
    /// Non-finite values collapse to the range floor.
    pub fn normalize(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return 0.;
        }
        ((value - self.min_value) / (self.max_value - self.min_value)).clamp(0., 1.)
    }

    /// Polygon vertices for a value series, one vertex per axis.
    pub fn series_polygon(&self, values: &[f32]) -> Result<Vec<Point>, RadarError> {
        if values.len() != self.axes {
            return Err(RadarError::SeriesLengthMismatch {
                expected: self.axes,
                got: values.len(),
            });
        }

        Ok(values
            .iter()
            .enumerate()
            .map(|(axis, &value)| self.point_for(axis, self.normalize(value)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    fn unit_radar(axes: usize) -> RadarGeometry {
        RadarGeometry::new(axes, Point::new(0., 0.), 100.).unwrap()
    }

    #[test]
    fn rejects_degenerate_axis_counts() {
        for axes in 0..3 {
            assert_eq!(
                RadarGeometry::new(axes, Point::new(0., 0.), 10.),
                Err(RadarError::TooFewAxes(axes))
            );
        }
        assert!(RadarGeometry::new(3, Point::new(0., 0.), 10.).is_ok());
    }

    #[test]
    fn four_axes_land_on_the_compass_points() {
        let radar = unit_radar(4);

        assert!(close(radar.point_for(0, 1.), Point::new(0., -100.)));
        assert!(close(radar.point_for(1, 1.), Point::new(100., 0.)));
        assert!(close(radar.point_for(2, 1.), Point::new(0., 100.)));
        assert!(close(radar.point_for(3, 1.), Point::new(-100., 0.)));
    }

    #[test]
    fn zero_fraction_collapses_to_the_center() {
        let radar = unit_radar(5);
        for axis in 0..5 {
            assert!(close(radar.point_for(axis, 0.), Point::new(0., 0.)));
        }
    }

    #[test]
    fn fractions_are_clamped() {
        let radar = unit_radar(3);
        assert!(close(radar.point_for(0, 7.5), Point::new(0., -100.)));
        assert!(close(radar.point_for(0, -2.), Point::new(0., 0.)));
    }

    #[test]
    fn non_finite_values_collapse_to_the_floor() {
        let radar = unit_radar(3);
        assert_eq!(radar.normalize(f32::NAN), 0.);
        assert_eq!(radar.normalize(f32::INFINITY), 1.);
        assert_eq!(radar.normalize(f32::NEG_INFINITY), 0.);
        assert!(close(radar.point_for(0, f32::NAN), radar.center()));
    }

    #[test]
    fn custom_value_range_normalizes_linearly() {
        let radar = unit_radar(3).with_value_range(10., 20.);
        assert_eq!(radar.normalize(10.), 0.);
        assert_eq!(radar.normalize(15.), 0.5);
        assert_eq!(radar.normalize(20.), 1.);
        assert_eq!(radar.normalize(35.), 1.);
    }

    #[test]
    fn degenerate_value_range_is_ignored() {
        let radar = unit_radar(3).with_value_range(5., 5.);
        assert_eq!(radar.normalize(0.5), 0.5);
    }

    #[test]
    fn ring_vertices_sit_at_equal_distance() {
        let radar = unit_radar(7);
        let ring = radar.ring(0.6);

        assert_eq!(ring.len(), 7);
        for vertex in ring {
            let distance = (vertex.x.powi(2) + vertex.y.powi(2)).sqrt();
            assert!((distance - 60.).abs() < 1e-2);
        }
    }

    #[test]
    fn series_polygon_validates_length() {
        let radar = unit_radar(4);

        assert_eq!(
            radar.series_polygon(&[1., 2., 3.]),
            Err(RadarError::SeriesLengthMismatch {
                expected: 4,
                got: 3
            })
        );

        let polygon = radar.series_polygon(&[1., 0.5, 0., 0.25]).unwrap();
        assert_eq!(polygon.len(), 4);
        assert!(close(polygon[0], Point::new(0., -100.)));
        assert!(close(polygon[1], Point::new(50., 0.)));
        assert!(close(polygon[2], Point::new(0., 0.)));
    }

    #[test]
    fn label_anchors_extend_past_the_rim() {
        let radar = unit_radar(4);
        assert!(close(radar.label_anchor(0, 12.), Point::new(0., -112.)));
        assert!(close(radar.label_anchor(1, 12.), Point::new(112., 0.)));
    }
}
