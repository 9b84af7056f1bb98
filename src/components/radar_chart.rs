use gpui::{
    App, Bounds, Element, ElementId, FontWeight, GlobalElementId, Hsla, InspectorElementId,
    InteractiveElement, IntoElement, LayoutId, ParentElement, Pixels, RenderOnce, SharedString,
    Style, Styled, Window, div, px, relative,
};
use lattice_core::{PathData, RadarGeometry};
use smallvec::SmallVec;

use crate::{
    primitives::min_w0_wrapper,
    theme::ThemeExt,
    utils::{RgbaExt, build_fill_path},
};

/// How many concentric grid rings the chart draws.
const GRID_RINGS: usize = 4;

/// Stroke weight of polygon outlines and grid lines, in pixels.
const STROKE_WEIGHT: f32 = 1.5;

/// One plotted series: a label and one value per axis.
#[derive(Clone, Debug)]
pub struct RadarSeries {
    pub label: SharedString,
    pub values: Vec<f32>,
}

impl RadarSeries {
    pub fn new(label: impl Into<SharedString>, values: Vec<f32>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// A radar (spider) chart: axes radiating from a center, concentric
/// grid rings, and one translucent polygon per series. Series values
/// are normalized against the value range and clamped, so malformed
/// data can never escape the rim.
///
/// Series whose length does not match the axis count are skipped with
/// a log warning rather than distorting the chart.
#[derive(IntoElement)]
pub struct RadarChart {
    id: ElementId,
    axes: Vec<SharedString>,
    series: SmallVec<[RadarSeries; 2]>,
    size: Pixels,
    min_value: f32,
    max_value: f32,
    show_labels: bool,
}

impl RadarChart {
    pub fn new(id: impl Into<ElementId>, axes: Vec<SharedString>) -> Self {
        Self {
            id: id.into(),
            axes,
            series: SmallVec::new(),
            size: px(240.),
            min_value: 0.,
            max_value: 1.,
            show_labels: true,
        }
    }

    pub fn series(mut self, series: RadarSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn size(mut self, size: impl Into<Pixels>) -> Self {
        self.size = size.into();
        self
    }

    /// The value range series are normalized against.
    pub fn value_range(mut self, min_value: f32, max_value: f32) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    pub fn hide_labels(mut self) -> Self {
        self.show_labels = false;
        self
    }

    fn geometry(&self, side: f32) -> Option<RadarGeometry> {
        // Leave rim space for labels.
        let margin = if self.show_labels { side * 0.16 } else { 8. };
        let radius = (side / 2. - margin).max(0.);

        RadarGeometry::new(
            self.axes.len(),
            lattice_core::Point::new(side / 2., side / 2.),
            radius,
        )
        .ok()
        .map(|geometry| geometry.with_value_range(self.min_value, self.max_value))
    }
}

impl RenderOnce for RadarChart {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let caption_size = cx.get_theme().layout.text.default_font.sizes.caption;
        let caption_weight = cx.get_theme().layout.text.default_font.weights.caption;
        let side = self.size;

        let labels: Vec<(SharedString, lattice_core::Point)> = self
            .geometry(side.to_f64() as f32)
            .filter(|_| self.show_labels)
            .map(|geometry| {
                self.axes
                    .iter()
                    .enumerate()
                    .map(|(axis, label)| {
                        (label.clone(), geometry.label_anchor(axis, side.to_f64() as f32 * 0.05))
                    })
                    .collect()
            })
            .unwrap_or_default();

        div()
            .id(self.id.clone())
            .w(side)
            .h(side)
            .min_w(side)
            .min_h(side)
            .child(RadarPlotElement { chart: self })
            .children(labels.into_iter().map(|(label, anchor)| {
                // Centered on the anchor; the fixed width keeps short
                // labels from drifting as they change.
                let label_width = px(72.);

                div()
                    .absolute()
                    .left(px(anchor.x) - label_width / 2.)
                    .top(px(anchor.y) - px(8.))
                    .w(label_width)
                    .flex()
                    .justify_center()
                    .child(
                        min_w0_wrapper()
                            .text_size(caption_size)
                            .font_weight(FontWeight(caption_weight))
                            .text_ellipsis()
                            .child(label),
                    )
            }))
    }
}

struct RadarPlotElement {
    chart: RadarChart,
}

struct RadarPrepaintState {
    grid: PathData,
    polygons: Vec<(PathData, Hsla)>,
}

impl IntoElement for RadarPlotElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for RadarPlotElement {
    type RequestLayoutState = ();
    type PrepaintState = RadarPrepaintState;

    fn id(&self) -> Option<ElementId> {
        Some(self.chart.id.clone())
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let mut style = Style::default();
        style.size.width = relative(1.).into();
        style.size.height = relative(1.).into();

        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        _window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let theme_colors = &cx.get_theme().variants.active(cx).colors;
        let accents = [
            theme_colors.accent.primary,
            theme_colors.accent.constructive,
            theme_colors.accent.warning,
            theme_colors.accent.destructive,
        ];

        let side = bounds.size.width.min(bounds.size.height).to_f64() as f32;
        let Some(geometry) = self.chart.geometry(side) else {
            log::warn!("radar chart needs at least 3 axes");
            return RadarPrepaintState {
                grid: PathData::new(),
                polygons: Vec::new(),
            };
        };

        let mut grid = PathData::new();
        for ring in 1..=GRID_RINGS {
            let fraction = ring as f32 / GRID_RINGS as f32;
            stroke_polygon(&mut grid, &geometry.ring(fraction), STROKE_WEIGHT);
        }
        for axis in 0..geometry.axes() {
            stroke_segment(
                &mut grid,
                geometry.center(),
                geometry.axis_end(axis),
                STROKE_WEIGHT,
            );
        }

        let mut polygons = Vec::new();
        for (index, series) in self.chart.series.iter().enumerate() {
            let vertices = match geometry.series_polygon(&series.values) {
                Ok(vertices) => vertices,
                Err(error) => {
                    log::warn!("skipping radar series {:?}: {error}", series.label);
                    continue;
                }
            };

            let accent = accents[index % accents.len()];
            let mut fill = PathData::new();
            fill.push_polygon(&vertices);

            let mut outline = PathData::new();
            stroke_polygon(&mut outline, &vertices, STROKE_WEIGHT);

            polygons.push((fill, accent.alpha(0.18).into()));
            polygons.push((outline, accent.into()));
        }

        RadarPrepaintState {
            grid,
            polygons,
        }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let theme_colors = &cx.get_theme().variants.active(cx).colors;
        let grid_color: Hsla = theme_colors.text.secondary.alpha(0.25).into();

        if let Some(path) = build_fill_path(&prepaint.grid, bounds.origin) {
            window.paint_path(path, grid_color);
        }

        for (data, color) in prepaint.polygons.drain(..) {
            if let Some(path) = build_fill_path(&data, bounds.origin) {
                window.paint_path(path, color);
            }
        }
    }
}

/// Appends thin quads tracing a closed polygon outline. Fill paths are
/// the only primitive the renderer needs, so strokes are emitted as
/// slender quads per edge.
fn stroke_polygon(path: &mut PathData, vertices: &[lattice_core::Point], weight: f32) {
    for index in 0..vertices.len() {
        let from = vertices[index];
        let to = vertices[(index + 1) % vertices.len()];
        stroke_segment(path, from, to, weight);
    }
}

fn stroke_segment(
    path: &mut PathData,
    from: lattice_core::Point,
    to: lattice_core::Point,
    weight: f32,
) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f32::EPSILON {
        return;
    }

    // Unit normal, scaled to half the stroke weight.
    let nx = -dy / length * weight / 2.;
    let ny = dx / length * weight / 2.;

    path.push_polygon(&[
        lattice_core::Point::new(from.x + nx, from.y + ny),
        lattice_core::Point::new(to.x + nx, to.y + ny),
        lattice_core::Point::new(to.x - nx, to.y - ny),
        lattice_core::Point::new(from.x - nx, from.y - ny),
    ]);
}
