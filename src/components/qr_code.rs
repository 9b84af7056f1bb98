use gpui::{
    App, Bounds, Element, ElementId, GlobalElementId, Hsla, InspectorElementId, IntoElement,
    LayoutId, Pixels, SharedString, Style, Window, fill, px,
};
use lattice_core::{
    EcLevel, EyeShape, ModuleGrid, ModuleShape, QUIET_ZONE, QrError, QrMatrix, data_module_path,
    eye_paths,
};

use crate::{theme::ThemeExt, utils::build_fill_path};

/// A styled QR code rendering the encoded payload with configurable
/// module and eye shapes. Colors default to the active theme variant
/// (dark modules use the primary text color over the primary
/// background).
///
/// Encoding failures (payload too long) render as an empty square of
/// the requested size rather than panicking; callers that need to
/// react should pre-validate with [`QrMatrix::encode`].
pub struct QrCode {
    id: ElementId,
    data: SharedString,
    ec_level: EcLevel,
    module_shape: ModuleShape,
    eye_shape: EyeShape,
    quiet_zone: usize,
    side: Pixels,
    foreground: Option<Hsla>,
    background: Option<Hsla>,
}

impl QrCode {
    pub fn new(id: impl Into<ElementId>, data: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
            ec_level: EcLevel::default(),
            module_shape: ModuleShape::default(),
            eye_shape: EyeShape::default(),
            quiet_zone: QUIET_ZONE,
            side: px(160.),
            foreground: None,
            background: None,
        }
    }

    pub fn ec_level(mut self, ec_level: EcLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    pub fn module_shape(mut self, shape: ModuleShape) -> Self {
        self.module_shape = shape;
        self
    }

    pub fn eye_shape(mut self, shape: EyeShape) -> Self {
        self.eye_shape = shape;
        self
    }

    /// Margin around the symbol, in modules. Values below the
    /// recommended minimum hurt scannability but are accepted.
    pub fn quiet_zone(mut self, modules: usize) -> Self {
        self.quiet_zone = modules;
        self
    }

    /// Edge length of the rendered square.
    pub fn size(mut self, side: impl Into<Pixels>) -> Self {
        self.side = side.into();
        self
    }

    pub fn foreground(mut self, color: impl Into<Hsla>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    pub fn background(mut self, color: impl Into<Hsla>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Encodes the payload exactly as the element will.
    pub fn encode(&self) -> Result<QrMatrix, QrError> {
        QrMatrix::encode(self.data.as_bytes(), self.ec_level)
    }
}

impl IntoElement for QrCode {
    type Element = QrCodeElement;

    fn into_element(self) -> Self::Element {
        QrCodeElement { code: self }
    }
}

pub struct QrCodeElement {
    code: QrCode,
}

pub struct QrPrepaintState {
    matrix: Option<QrMatrix>,
    foreground: Hsla,
    background: Hsla,
}

impl IntoElement for QrCodeElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for QrCodeElement {
    type RequestLayoutState = ();
    type PrepaintState = QrPrepaintState;

    fn id(&self) -> Option<ElementId> {
        Some(self.code.id.clone())
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
        style.size.width = self.code.side.into();
        style.size.height = self.code.side.into();

        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        _window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let theme_colors = &cx.get_theme().variants.active(cx).colors;
        let foreground = self
            .code
            .foreground
            .unwrap_or_else(|| theme_colors.text.primary.into());
        let background = self
            .code
            .background
            .unwrap_or_else(|| theme_colors.background.primary.into());

        let matrix = match QrMatrix::encode(self.code.data.as_bytes(), self.code.ec_level) {
            Ok(matrix) => Some(matrix),
            Err(error) => {
                log::warn!("QR payload rejected: {error}");
                None
            }
        };

        QrPrepaintState {
            matrix,
            foreground,
            background,
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
        _cx: &mut App,
    ) {
        window.paint_quad(fill(bounds, prepaint.background));

        let Some(matrix) = prepaint.matrix.take() else {
            return;
        };

        let side_px = self.code.side.to_f64() as f32;
        let grid = ModuleGrid::new(matrix.side(), side_px, self.code.quiet_zone);

        let modules = data_module_path(&matrix, &grid, self.code.module_shape);
        if let Some(path) = build_fill_path(&modules, bounds.origin) {
            window.paint_path(path, prepaint.foreground);
        }

        let eyes = eye_paths(&matrix, &grid, self.code.eye_shape);
        if let Some(path) = build_fill_path(&eyes.frame, bounds.origin) {
            window.paint_path(path, prepaint.foreground);
        }
        if let Some(path) = build_fill_path(&eyes.ball, bounds.origin) {
            window.paint_path(path, prepaint.foreground);
        }
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::{AppContext, ParentElement, Styled, TestAppContext, VisualTestContext, div};

    #[gpui::test]
    fn builder_state(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let qr = QrCode::new("qr", "https://example.com")
                .ec_level(EcLevel::High)
                .module_shape(ModuleShape::Dot)
                .eye_shape(EyeShape::Rounded)
                .quiet_zone(2)
                .size(px(240.));

            assert_eq!(qr.ec_level, EcLevel::High);
            assert_eq!(qr.module_shape, ModuleShape::Dot);
            assert_eq!(qr.eye_shape, EyeShape::Rounded);
            assert_eq!(qr.quiet_zone, 2);
            assert_eq!(qr.side, px(240.));
        });
    }

    #[gpui::test]
    fn encode_matches_the_element_pipeline(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let qr = QrCode::new("qr", "HELLO WORLD");
            let matrix = qr.encode().unwrap();
            assert_eq!(matrix.side(), 21);
        });
    }

    #[gpui::test]
    fn oversized_payloads_fail_encoding_without_panicking(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let huge = "x".repeat(3000);
            let qr = QrCode::new("qr", huge);
            assert!(matches!(qr.encode(), Err(QrError::DataTooLong { .. })));
        });
    }

    #[gpui::test]
    fn renders_in_a_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| QrCodeTestView)
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct QrCodeTestView;

    impl gpui::Render for QrCodeTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                QrCode::new("test-qr", "https://example.com/profile")
                    .module_shape(ModuleShape::Rounded)
                    .eye_shape(EyeShape::Rounded),
            )
        }
    }
}
