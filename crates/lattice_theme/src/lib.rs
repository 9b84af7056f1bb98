//! Design tokens for the lattice component library.
//!
//! A [`Theme`] is a JSON document of layout scales, typography, and one
//! or more color variants (dark and light modes). It lives in the GPUI
//! global store; components read it through [`ThemeExt`].

mod deserializers;

mod schema;
pub use schema::*;

mod ext;
pub use ext::*;
