use gpui::Rgba;

/// Creates an RGBA color from a hex value and alpha component.
pub fn rgb_a(hex: u32, a: f32) -> Rgba {
    let [_, r, g, b] = hex.to_be_bytes().map(|byte| (byte as f32) / 255.0);
    Rgba { r, g, b, a }
}

/// Extension trait for deriving component colors from theme colors.
pub trait RgbaExt {
    /// Returns the color with the alpha replaced.
    fn alpha(self, alpha: f32) -> Self;

    /// Returns the color with the alpha scaled by `factor`.
    fn fade(self, factor: f32) -> Self;
}

impl RgbaExt for Rgba {
    fn alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    fn fade(mut self, factor: f32) -> Self {
        self.a *= factor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_a_splits_channels() {
        let color = rgb_a(0xFF8000, 0.5);
        assert_eq!(color.r, 1.);
        assert!((color.g - 128. / 255.).abs() < 1e-6);
        assert_eq!(color.b, 0.);
        assert_eq!(color.a, 0.5);
    }

    #[test]
    fn alpha_replaces_and_fade_scales() {
        let color = rgb_a(0x112233, 0.8);
        assert_eq!(color.alpha(0.25).a, 0.25);
        assert!((color.fade(0.5).a - 0.4).abs() < 1e-6);
    }
}
