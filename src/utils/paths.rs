use gpui::{Path, PathBuilder, Pixels, point, px};
use lattice_core::{PathCommand, PathData};

/// Converts core path data into a gpui fill path, translated by
/// `origin`. Returns `None` for empty or degenerate paths.
pub fn build_fill_path(data: &PathData, origin: gpui::Point<Pixels>) -> Option<Path<Pixels>> {
    if data.is_empty() {
        return None;
    }

    let translate =
        |p: lattice_core::Point| point(origin.x + px(p.x), origin.y + px(p.y));

    let mut builder = PathBuilder::fill();

    for command in data.commands() {
        match *command {
            PathCommand::MoveTo(to) => builder.move_to(translate(to)),
            PathCommand::LineTo(to) => builder.line_to(translate(to)),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                builder.cubic_bezier_to(translate(to), translate(ctrl1), translate(ctrl2))
            }
            PathCommand::Close => builder.close(),
        }
    }

    builder.build().ok()
}
