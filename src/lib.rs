pub mod components;

pub mod extensions;

pub mod primitives;

pub mod theme;

pub mod views;

mod utils;
pub use utils::{ElementIdExt, PositionalParentElement};

mod assets;
pub use assets::*;

mod init;
pub use init::*;
