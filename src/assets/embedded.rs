use std::borrow::Cow;

use gpui::{Result, SharedString};
use rust_embed::RustEmbed;

use crate::assets::AssetProvider;

/// Icons bundled with the crate.
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "icons/**/*.svg"]
#[exclude = "*.DS_Store"]
pub struct LatticeAssets;

impl AssetProvider for LatticeAssets {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        <Self as RustEmbed>::get(path).map(|file| file.data)
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        Ok(LatticeAssets::iter()
            .filter_map(|candidate| candidate.starts_with(path).then(|| candidate.into()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IconKind;

    #[test]
    fn every_icon_kind_resolves_to_an_embedded_file() {
        for kind in [
            IconKind::Checkmark,
            IconKind::ChevronDown,
            IconKind::Close,
            IconKind::Info,
            IconKind::CircleCheck,
            IconKind::Warning,
            IconKind::Error,
        ] {
            let path = kind.path();
            assert!(
                LatticeAssets.get(path.as_ref()).is_some(),
                "missing embedded asset for {path}"
            );
        }
    }

    #[test]
    fn listing_filters_by_prefix() {
        let icons = LatticeAssets.list("icons/").unwrap();
        assert!(!icons.is_empty());
        assert!(icons.iter().all(|path| path.starts_with("icons/")));

        assert!(LatticeAssets.list("fonts/").unwrap().is_empty());
    }
}
