//! Render-space geometry for styled QR symbols: module rectangles, eye
//! frames and balls, and path generation for the dot styles.

use crate::geometry::{PathData, Point, Rect};

use super::{EyePosition, QrMatrix};

/// How data modules are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModuleShape {
    #[default]
    Square,
    /// Squares whose exposed corners are rounded; contiguous runs fuse
    /// into pill shapes.
    Rounded,
    /// Inset circles.
    Dot,
}

/// How the three finder eyes are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EyeShape {
    #[default]
    Square,
    Rounded,
}

/// Maps matrix cells to render-space rectangles, including the quiet
/// zone margin.
#[derive(Clone, Copy, Debug)]
pub struct ModuleGrid {
    matrix_side: usize,
    module: f32,
    origin: f32,
}

/// Minimum quiet zone, in modules, recommended by the symbology.
pub const QUIET_ZONE: usize = 4;

impl ModuleGrid {
    /// Lays a matrix of `matrix_side` modules plus `quiet_zone` margin
    /// modules on each side into a square of `side_px` logical pixels.
    pub fn new(matrix_side: usize, side_px: f32, quiet_zone: usize) -> Self {
        let total_modules = matrix_side + quiet_zone * 2;
        let module = side_px / total_modules as f32;

        Self {
            matrix_side,
            module,
            origin: quiet_zone as f32 * module,
        }
    }

    /// Edge length of one module in pixels.
    pub fn module_size(&self) -> f32 {
        self.module
    }

    pub fn rect(&self, x: usize, y: usize) -> Rect {
        debug_assert!(x < self.matrix_side && y < self.matrix_side);
        Rect::new(
            self.origin + x as f32 * self.module,
            self.origin + y as f32 * self.module,
            self.module,
            self.module,
        )
    }

    /// The 7×7 area of an eye in render space.
    pub fn eye_rect(&self, position: EyePosition) -> Rect {
        let (left, top) = match position {
            EyePosition::TopLeft => (0, 0),
            EyePosition::TopRight => (self.matrix_side - 7, 0),
            EyePosition::BottomLeft => (0, self.matrix_side - 7),
        };

        Rect::new(
            self.origin + left as f32 * self.module,
            self.origin + top as f32 * self.module,
            self.module * 7.,
            self.module * 7.,
        )
    }
}

/// Corner radii for one module given its dark orthogonal neighbors in
/// (above, right, below, left) order. A corner is rounded only when
/// both adjacent sides are exposed, so runs of modules fuse seamlessly.
fn corner_radii_for(neighbors: [bool; 4], radius: f32) -> [f32; 4] {
    let [above, right, below, left] = neighbors;
    [
        if above || left { 0. } else { radius },
        if above || right { 0. } else { radius },
        if below || right { 0. } else { radius },
        if below || left { 0. } else { radius },
    ]
}

/// Builds one path covering every dark data-area module (everything
/// except the three eyes) in the requested shape.
pub fn data_module_path(matrix: &QrMatrix, grid: &ModuleGrid, shape: ModuleShape) -> PathData {
    let side = matrix.side();
    let drawn = |x: isize, y: isize| -> bool {
        if x < 0 || y < 0 || x >= side as isize || y >= side as isize {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        matrix.is_dark(x, y) && matrix.eye_at(x, y).is_none() && !in_eye_area(matrix, x, y)
    };

    let mut path = PathData::new();

    for y in 0..side {
        for x in 0..side {
            if !drawn(x as isize, y as isize) {
                continue;
            }

            let rect = grid.rect(x, y);
            match shape {
                ModuleShape::Square => path.push_rect(rect),
                ModuleShape::Rounded => {
                    let (x, y) = (x as isize, y as isize);
                    let neighbors = [
                        drawn(x, y - 1),
                        drawn(x + 1, y),
                        drawn(x, y + 1),
                        drawn(x - 1, y),
                    ];
                    path.push_rounded_rect(
                        rect,
                        corner_radii_for(neighbors, grid.module_size() / 2.),
                    );
                }
                ModuleShape::Dot => {
                    path.push_circle(rect.center(), grid.module_size() * 0.4);
                }
            }
        }
    }

    path
}

/// Paths for the three finder eyes, frames and balls kept separate so
/// renderers can color them independently.
#[derive(Clone, Debug, Default)]
pub struct EyePaths {
    pub frame: PathData,
    pub ball: PathData,
}

pub fn eye_paths(matrix: &QrMatrix, grid: &ModuleGrid, shape: EyeShape) -> EyePaths {
    debug_assert!(matrix.side() >= 7);

    let module = grid.module_size();
    let mut paths = EyePaths::default();

    for position in EyePosition::ALL {
        let outer = grid.eye_rect(position);
        let inner = outer.inset(module);
        let ball = outer.inset(module * 2.);

        match shape {
            EyeShape::Square => {
                paths.frame.push_rect(outer);
                paths.frame.push_rounded_rect_rev(inner, [0.; 4]);
                paths.ball.push_rect(ball);
            }
            EyeShape::Rounded => {
                paths.frame.push_rounded_rect(outer, [module * 2.5; 4]);
                paths
                    .frame
                    .push_rounded_rect_rev(inner, [module * 1.5; 4]);
                paths.ball.push_rounded_rect(ball, [module * 1.5; 4]);
            }
        }
    }

    paths
}

/// Whether a module lies anywhere inside an eye's 7×7 area, including
/// its light ring.
fn in_eye_area(matrix: &QrMatrix, x: usize, y: usize) -> bool {
    let side = matrix.side();
    (x < 7 && y < 7) || (x >= side - 7 && y < 7) || (x < 7 && y >= side - 7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathCommand;
    use crate::qr::{EcLevel, QrMatrix};

    fn sample() -> QrMatrix {
        QrMatrix::encode(b"STYLE SAMPLE", EcLevel::Medium).unwrap()
    }

    #[test]
    fn grid_fills_the_requested_square() {
        let grid = ModuleGrid::new(21, 290., QUIET_ZONE);

        // 21 + 8 quiet modules across 290px → 10px modules.
        assert!((grid.module_size() - 10.).abs() < 1e-4);

        let first = grid.rect(0, 0);
        assert!((first.x - 40.).abs() < 1e-4);
        assert!((first.y - 40.).abs() < 1e-4);

        let last = grid.rect(20, 20);
        assert!((last.x + last.width - 250.).abs() < 1e-3);
    }

    #[test]
    fn zero_quiet_zone_starts_at_the_edge() {
        let grid = ModuleGrid::new(21, 210., 0);
        assert_eq!(grid.rect(0, 0).x, 0.);
        assert!((grid.module_size() - 10.).abs() < 1e-4);
    }

    #[test]
    fn eye_rects_sit_in_the_corners() {
        let qr = sample();
        let grid = ModuleGrid::new(qr.side(), 290., QUIET_ZONE);

        let top_left = grid.eye_rect(EyePosition::TopLeft);
        let first = grid.rect(0, 0);
        assert_eq!((top_left.x, top_left.y), (first.x, first.y));
        assert!((top_left.width - grid.module_size() * 7.).abs() < 1e-4);

        let top_right = grid.eye_rect(EyePosition::TopRight);
        assert!((top_right.x - grid.rect(qr.side() - 7, 0).x).abs() < 1e-4);
    }

    #[test]
    fn corner_rounding_requires_two_exposed_sides() {
        let r = 5.;
        // Isolated module: all four corners round.
        assert_eq!(corner_radii_for([false; 4], r), [r; 4]);
        // Neighbor above: both top corners stay square.
        assert_eq!(
            corner_radii_for([true, false, false, false], r),
            [0., 0., r, r]
        );
        // Horizontal run interior: nothing rounds.
        assert_eq!(
            corner_radii_for([false, true, false, true], r),
            [0.; 4]
        );
    }

    #[test]
    fn dot_path_is_one_circle_per_dark_module() {
        let qr = sample();
        let grid = ModuleGrid::new(qr.side(), 290., QUIET_ZONE);

        let mut dark_outside_eyes = 0;
        for y in 0..qr.side() {
            for x in 0..qr.side() {
                if qr.is_dark(x, y) && !in_eye_area(&qr, x, y) {
                    dark_outside_eyes += 1;
                }
            }
        }

        let path = data_module_path(&qr, &grid, ModuleShape::Dot);
        // MoveTo + four cubics + Close per circle.
        assert_eq!(path.commands().len(), dark_outside_eyes * 6);
    }

    #[test]
    fn data_path_never_enters_the_eye_areas() {
        let qr = sample();
        let grid = ModuleGrid::new(qr.side(), 290., QUIET_ZONE);
        let eye = grid.eye_rect(EyePosition::TopLeft);

        let path = data_module_path(&qr, &grid, ModuleShape::Square);
        for command in path.commands() {
            if let PathCommand::MoveTo(point) = command {
                let inside = point.x < eye.x + eye.width - 1e-3
                    && point.y < eye.y + eye.height - 1e-3;
                assert!(!inside, "module at {point:?} overlaps the top-left eye");
            }
        }
    }

    #[test]
    fn eye_paths_cover_three_frames_and_balls() {
        let qr = sample();
        let grid = ModuleGrid::new(qr.side(), 290., QUIET_ZONE);

        let square = eye_paths(&qr, &grid, EyeShape::Square);
        // Each square frame is an outer and an inner rectangle.
        let moves = square
            .frame
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count();
        assert_eq!(moves, 6);

        let rounded = eye_paths(&qr, &grid, EyeShape::Rounded);
        assert!(
            rounded
                .ball
                .commands()
                .iter()
                .any(|c| matches!(c, PathCommand::CubicTo { .. })),
            "rounded balls should contain curves"
        );
    }
}
