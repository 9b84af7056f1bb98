//! Renderer-agnostic core for the lattice design system.
//!
//! Everything here is pure data-in, data-out: QR symbol encoding with
//! styleable module geometry, and radar-chart polygon math. Renderers
//! (the GPUI components in `gpui_lattice`, or anything else) translate
//! the emitted [`geometry::PathData`] into their own path primitives.

pub mod geometry;
pub mod qr;
pub mod radar;

pub use geometry::{PathCommand, PathData, Point, Rect};
pub use qr::{
    EcLevel, Eye, EyePart, EyePaths, EyePosition, EyeShape, Module, ModuleGrid, ModuleShape,
    QUIET_ZONE, QrError, QrMatrix, Version, data_module_path, eye_paths,
};
pub use radar::{RadarError, RadarGeometry};
