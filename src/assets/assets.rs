use std::borrow::Cow;

use anyhow::anyhow;
use gpui::{AssetSource, Result, SharedString};
use smallvec::SmallVec;

/// An ordered chain of asset providers implementing gpui's
/// [`AssetSource`]; the first provider that knows a path wins, so apps
/// can layer their own assets in front of the built-in icon set.
pub struct Assets<const N: usize> {
    providers: SmallVec<[Box<dyn AssetProvider>; N]>,
}

impl<const N: usize> Assets<N> {
    pub fn new(providers: [Box<dyn AssetProvider>; N]) -> Assets<N> {
        Self {
            providers: SmallVec::from(providers),
        }
    }
}

/// Builds an [`Assets`] chain from provider values.
#[macro_export]
macro_rules! assets {
    ( $( $provider:expr ),* $(,)? ) => {
        $crate::Assets::new([
            $( Box::new($provider) ),*
        ])
    };
}

impl<const N: usize> AssetSource for Assets<N> {
    fn load(&self, path: &str) -> Result<Option<Cow<'static, [u8]>>> {
        if path.is_empty() {
            return Ok(None);
        }

        for provider in &self.providers {
            let asset = provider.get(path);
            if asset.is_some() {
                return Ok(asset);
            }
        }

        log::warn!("no asset provider knows \"{path}\"");
        Err(anyhow!("could not find asset at path \"{path}\""))
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        Ok(self
            .providers
            .iter()
            .flat_map(|provider| provider.list(path).into_iter())
            .flatten()
            .collect())
    }
}

/// One source of assets within an [`Assets`] chain.
pub trait AssetProvider: Send + Sync {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>>;
    fn list(&self, path: &str) -> Result<Vec<SharedString>>;
}
