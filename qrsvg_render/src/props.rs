use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use qrsvg_core::{Ecl, Version};

use crate::draw::Drawing;
use crate::encode::Payload;
use crate::logo::LogoSpec;
use crate::Color;

/// Requested side length of the drawing, as supplied by the caller.
///
/// The size is coerced to an integer the lenient way: numbers are truncated, strings contribute their leading
/// integer (`"120px"` is 120). Anything else is not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Size {
    Px(f64),
    Text(String),
}

impl Size {
    /// Coerce the size to an integer. Values beyond the range of `i64` saturate.
    /// # Example
    /// ```
    /// use qrsvg_render::Size;
    /// assert_eq!(Size::from(12.9).coerce(), Some(12));
    /// assert_eq!(Size::from("120px").coerce(), Some(120));
    /// assert_eq!(Size::from("big").coerce(), None);
    /// assert_eq!(Size::from(f64::NAN).coerce(), None);
    /// ```
    pub fn coerce(&self) -> Option<i64> {
        match self {
            Self::Px(px) if px.is_finite() => Some(px.trunc() as i64),
            Self::Px(_) => None,
            Self::Text(text) => {
                let text = text.trim_start();
                let digits_start = usize::from(text.starts_with(&['+', '-'][..]));
                let digits = text[digits_start..]
                    .bytes()
                    .take_while(u8::is_ascii_digit)
                    .count();
                if digits == 0 {
                    return None;
                }
                // Float casts saturate, so an overlong digit string still yields a size.
                text[..digits_start + digits]
                    .parse::<f64>()
                    .ok()
                    .map(|value| value as i64)
            }
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::Px(128.0)
    }
}

impl From<f64> for Size {
    fn from(value: f64) -> Self {
        Self::Px(value)
    }
}

impl From<u32> for Size {
    fn from(value: u32) -> Self {
        Self::Px(value.into())
    }
}

impl From<&str> for Size {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{}", px),
            Self::Text(text) => write!(f, "{:?}", text),
        }
    }
}

/// Callback receiving the message of every failure detected while rendering.
///
/// Handlers are compared by identity: two clones of the same handler are equal, two handlers built from identical
/// closures are not.
#[derive(Clone)]
pub struct ErrorHandler(Rc<dyn Fn(&str)>);

impl ErrorHandler {
    pub fn new<F: Fn(&str) + 'static>(handler: F) -> Self {
        Self(Rc::new(handler))
    }

    /// Call the handler with `message`.
    pub fn call(&self, message: &str) {
        (self.0)(message)
    }

    /// Whether `self` and `other` are the same handler.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ErrorHandler({:p})", Rc::as_ptr(&self.0))
    }
}

/// Caller-owned handle to the drawing surface. After each render it holds the drawing that was produced, or nothing
/// if the render produced nothing.
#[derive(Clone, Default)]
pub struct SurfaceHandle(Rc<RefCell<Option<Drawing>>>);

impl SurfaceHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the current drawing.
    pub fn current(&self) -> Option<Drawing> {
        self.0.borrow().clone()
    }

    /// Export the current drawing as SVG text.
    pub fn to_svg(&self) -> Option<String> {
        self.0.borrow().as_ref().map(Drawing::to_svg)
    }

    /// Whether `self` and `other` refer to the same surface.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn publish(&self, drawing: Option<Drawing>) {
        *self.0.borrow_mut() = drawing;
    }
}

impl std::fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SurfaceHandle").field(&self.0.borrow().is_some()).finish()
    }
}

/// Display parameters of a QR drawing.
#[derive(Debug, Clone)]
pub struct Props {
    /// Data to encode.
    pub value: Payload,
    /// Side length of the drawing.
    pub size: Size,
    pub bg_color: Color,
    pub fg_color: Color,
    /// Error correction level, encoder default if unset.
    pub ecl: Option<Ecl>,
    /// Symbol version, encoder default if unset.
    pub version: Option<Version>,
    pub logo: Option<Rc<LogoSpec>>,
    /// Where failures are reported. Failures are logged when unset.
    pub on_error: Option<ErrorHandler>,
    /// Surface receiving the rendered drawing.
    pub surface: Option<SurfaceHandle>,
}

impl Props {
    /// Construct parameters for `value` with every other field at its default: 128 wide, black on transparent.
    pub fn new<T: Into<Payload>>(value: T) -> Self {
        Self {
            value: value.into(),
            size: Size::default(),
            bg_color: Color::transparent(),
            fg_color: Color::black(),
            ecl: None,
            version: None,
            logo: None,
            on_error: None,
            surface: None,
        }
    }

    pub fn with_size<S: Into<Size>>(mut self, size: S) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_bg_color<C: Into<Color>>(mut self, color: C) -> Self {
        self.bg_color = color.into();
        self
    }

    pub fn with_fg_color<C: Into<Color>>(mut self, color: C) -> Self {
        self.fg_color = color.into();
        self
    }

    pub fn with_ecl(mut self, ecl: Ecl) -> Self {
        self.ecl = Some(ecl);
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_logo(mut self, logo: LogoSpec) -> Self {
        self.logo = Some(Rc::new(logo));
        self
    }

    pub fn with_on_error(mut self, handler: ErrorHandler) -> Self {
        self.on_error = Some(handler);
        self
    }

    pub fn with_surface(mut self, surface: SurfaceHandle) -> Self {
        self.surface = Some(surface);
        self
    }
}
