//! Turn a QR module matrix and a set of display parameters into an SVG drawing.
//!
//! ```
//! use qrsvg_render::{Props, QrSvg};
//!
//! let mut qr = QrSvg::new();
//! let drawing = qr.render(&Props::new("https://example.com").with_size(250.0)).unwrap();
//! assert!(drawing.to_svg().starts_with("<svg"));
//! ```

pub mod bytes;
mod color;
mod component;
pub mod config;
mod draw;
mod encode;
pub mod logo;
pub mod memo;
pub mod percent;
mod props;
pub mod raster;
pub mod report;
mod svg;

pub use color::Color;
pub use component::QrSvg;
pub use config::{ConfigError, RenderConfig};
pub use draw::{Drawing, Element, Rect};
pub use encode::{EncodeOptions, EncodingError, MatrixEncoder, Payload, QrcodeEncoder};
pub use logo::{Length, LogoSpec};
pub use props::{ErrorHandler, Props, Size, SurfaceHandle};
pub use report::{RenderError, SizeError};
pub use svg::SvgWriter;

pub use qrsvg_core::{Ecl, Mode, ModuleMatrix, Segment, Version};
