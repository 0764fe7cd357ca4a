//! Render QR module matrices as SVG drawings with an optional logo overlay.

pub use qrsvg_core;
pub use qrsvg_render;

pub use qrsvg_core::{Ecl, Mode, Module, ModuleMatrix, Segment, Version};
pub use qrsvg_render::{Drawing, Props, QrSvg, SurfaceHandle};
