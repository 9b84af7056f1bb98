mod colors;
pub use colors::*;

mod element;
pub use element::*;

mod element_id;
pub use element_id::*;

mod paths;
pub use paths::*;

mod pixels;
pub use pixels::*;

mod transitions;
pub use transitions::*;
