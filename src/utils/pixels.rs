use gpui::{AbsoluteLength, DefiniteLength, Pixels, Window, px};

pub trait PixelsExt {
    /// The top and bottom padding needed for an element containing one
    /// line of text to reach this pixel height.
    fn padding_needed_for_height(
        &self,
        window: &Window,
        text_size: AbsoluteLength,
        line_height: DefiniteLength,
    ) -> Pixels;
}

impl PixelsExt for Pixels {
    fn padding_needed_for_height(
        &self,
        window: &Window,
        text_size: AbsoluteLength,
        line_height: DefiniteLength,
    ) -> Pixels {
        let text_size = match text_size {
            AbsoluteLength::Pixels(size) => size,
            AbsoluteLength::Rems(size) => size.to_pixels(window.rem_size()),
        }
        .to_f64() as f32;

        let line_height = match line_height {
            DefiniteLength::Absolute(height) => height.to_pixels(window.rem_size()).to_f64() as f32,
            DefiniteLength::Fraction(fraction) => text_size * fraction,
        };

        px(((self.to_f64() as f32 - line_height) / 2.).max(0.))
    }
}
