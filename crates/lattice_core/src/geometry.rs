//! Shared geometry types emitted by the QR and radar pipelines.

/// A point in render space, in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in render space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2., self.y + self.height / 2.)
    }

    /// Shrinks the rectangle by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            (self.width - amount * 2.).max(0.),
            (self.height - amount * 2.).max(0.),
        )
    }
}

/// A single path drawing command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    Close,
}

/// Magic number for approximating a quarter circle with one cubic bezier.
const CIRCLE_K: f32 = 0.552_284_75;

/// An ordered list of path commands describing one or more closed
/// subpaths. Renderers walk [`PathData::commands`] and feed each command
/// into their own path builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn move_to(&mut self, to: Point) {
        self.commands.push(PathCommand::MoveTo(to));
    }

    pub fn line_to(&mut self, to: Point) {
        self.commands.push(PathCommand::LineTo(to));
    }

    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Appends a closed rectangle subpath.
    pub fn push_rect(&mut self, rect: Rect) {
        self.move_to(Point::new(rect.x, rect.y));
        self.line_to(Point::new(rect.x + rect.width, rect.y));
        self.line_to(Point::new(rect.x + rect.width, rect.y + rect.height));
        self.line_to(Point::new(rect.x, rect.y + rect.height));
        self.close();
    }

    /// Appends a closed rectangle with per-corner radii, clockwise from
    /// the top-left. Radii are clamped to half the shorter side.
    pub fn push_rounded_rect(&mut self, rect: Rect, radii: [f32; 4]) {
        let max_radius = rect.width.min(rect.height) / 2.;
        let [tl, tr, br, bl] = radii.map(|r| r.clamp(0., max_radius));

        let left = rect.x;
        let top = rect.y;
        let right = rect.x + rect.width;
        let bottom = rect.y + rect.height;

        self.move_to(Point::new(left + tl, top));
        self.line_to(Point::new(right - tr, top));
        if tr > 0. {
            self.cubic_to(
                Point::new(right - tr + tr * CIRCLE_K, top),
                Point::new(right, top + tr - tr * CIRCLE_K),
                Point::new(right, top + tr),
            );
        }
        self.line_to(Point::new(right, bottom - br));
        if br > 0. {
            self.cubic_to(
                Point::new(right, bottom - br + br * CIRCLE_K),
                Point::new(right - br + br * CIRCLE_K, bottom),
                Point::new(right - br, bottom),
            );
        }
        self.line_to(Point::new(left + bl, bottom));
        if bl > 0. {
            self.cubic_to(
                Point::new(left + bl - bl * CIRCLE_K, bottom),
                Point::new(left, bottom - bl + bl * CIRCLE_K),
                Point::new(left, bottom - bl),
            );
        }
        self.line_to(Point::new(left, top + tl));
        if tl > 0. {
            self.cubic_to(
                Point::new(left, top + tl - tl * CIRCLE_K),
                Point::new(left + tl - tl * CIRCLE_K, top),
                Point::new(left + tl, top),
            );
        }
        self.close();
    }

    /// Appends a rounded rectangle wound counter-clockwise. Used as the
    /// inner subpath of a ring so nonzero-winding fills leave the hole
    /// empty. Radii order matches [`push_rounded_rect`](Self::push_rounded_rect).
    pub fn push_rounded_rect_rev(&mut self, rect: Rect, radii: [f32; 4]) {
        let max_radius = rect.width.min(rect.height) / 2.;
        let [tl, tr, br, bl] = radii.map(|r| r.clamp(0., max_radius));

        let left = rect.x;
        let top = rect.y;
        let right = rect.x + rect.width;
        let bottom = rect.y + rect.height;

        self.move_to(Point::new(left + tl, top));
        if tl > 0. {
            self.cubic_to(
                Point::new(left + tl - tl * CIRCLE_K, top),
                Point::new(left, top + tl - tl * CIRCLE_K),
                Point::new(left, top + tl),
            );
        }
        self.line_to(Point::new(left, bottom - bl));
        if bl > 0. {
            self.cubic_to(
                Point::new(left, bottom - bl + bl * CIRCLE_K),
                Point::new(left + bl - bl * CIRCLE_K, bottom),
                Point::new(left + bl, bottom),
            );
        }
        self.line_to(Point::new(right - br, bottom));
        if br > 0. {
            self.cubic_to(
                Point::new(right - br + br * CIRCLE_K, bottom),
                Point::new(right, bottom - br + br * CIRCLE_K),
                Point::new(right, bottom - br),
            );
        }
        self.line_to(Point::new(right, top + tr));
        if tr > 0. {
            self.cubic_to(
                Point::new(right, top + tr - tr * CIRCLE_K),
                Point::new(right - tr + tr * CIRCLE_K, top),
                Point::new(right - tr, top),
            );
        }
        self.close();
    }

    /// Appends a closed circle subpath built from four cubic segments.
    pub fn push_circle(&mut self, center: Point, radius: f32) {
        let k = radius * CIRCLE_K;

        self.move_to(Point::new(center.x, center.y - radius));
        self.cubic_to(
            Point::new(center.x + k, center.y - radius),
            Point::new(center.x + radius, center.y - k),
            Point::new(center.x + radius, center.y),
        );
        self.cubic_to(
            Point::new(center.x + radius, center.y + k),
            Point::new(center.x + k, center.y + radius),
            Point::new(center.x, center.y + radius),
        );
        self.cubic_to(
            Point::new(center.x - k, center.y + radius),
            Point::new(center.x - radius, center.y + k),
            Point::new(center.x - radius, center.y),
        );
        self.cubic_to(
            Point::new(center.x - radius, center.y - k),
            Point::new(center.x - k, center.y - radius),
            Point::new(center.x, center.y - radius),
        );
        self.close();
    }

    /// Appends a closed polygon through the given vertices.
    pub fn push_polygon(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        self.move_to(*first);
        for point in rest {
            self.line_to(*point);
        }
        self.close();
    }

    pub fn extend(&mut self, other: &PathData) {
        self.commands.extend_from_slice(other.commands());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_inset_shrinks_every_side() {
        let rect = Rect::new(10., 20., 30., 40.).inset(5.);
        assert_eq!(rect, Rect::new(15., 25., 20., 30.));
    }

    #[test]
    fn rect_inset_never_goes_negative() {
        let rect = Rect::new(0., 0., 4., 4.).inset(10.);
        assert_eq!(rect.width, 0.);
        assert_eq!(rect.height, 0.);
    }

    #[test]
    fn rounded_rect_with_zero_radii_is_a_rectangle() {
        let mut rounded = PathData::new();
        rounded.push_rounded_rect(Rect::new(0., 0., 10., 10.), [0.; 4]);

        assert!(
            rounded
                .commands()
                .iter()
                .all(|cmd| !matches!(cmd, PathCommand::CubicTo { .. })),
            "zero radii should not emit curves"
        );
    }

    #[test]
    fn circle_starts_and_ends_at_the_top() {
        let mut path = PathData::new();
        path.push_circle(Point::new(5., 5.), 2.);

        let PathCommand::MoveTo(start) = path.commands()[0] else {
            panic!("circle should start with MoveTo");
        };
        assert_eq!(start, Point::new(5., 3.));

        let PathCommand::CubicTo { to, .. } = path.commands()[path.commands().len() - 2] else {
            panic!("circle should end with a curve back to the start");
        };
        assert_eq!(to, start);
    }

    #[test]
    fn polygon_closes_back_to_first_vertex() {
        let mut path = PathData::new();
        path.push_polygon(&[
            Point::new(0., 0.),
            Point::new(4., 0.),
            Point::new(2., 3.),
        ]);

        assert_eq!(path.commands().len(), 4);
        assert_eq!(path.commands()[3], PathCommand::Close);
    }

    #[test]
    fn empty_polygon_emits_nothing() {
        let mut path = PathData::new();
        path.push_polygon(&[]);
        assert!(path.is_empty());
    }
}
