//! Theme access for components: re-exports the token schema from
//! `lattice_theme` plus the kind enums that resolve token names to
//! concrete values.

pub use lattice_theme::*;

mod kinds;
pub use kinds::*;
