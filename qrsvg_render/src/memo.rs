//! Equality checks deciding whether a render pass can be skipped.
//!
//! The comparison is shallow on purpose: fields are compared as values or, for the error handler and the logo,
//! by identity first. The two logo flags are the exception, compared by whether they are set, so that an absent
//! flag and a `false` flag count as the same.

use std::rc::Rc;

use qrsvg_core::{Ecl, Version};

use crate::encode::{EncodeOptions, Payload};
use crate::logo::LogoSpec;
use crate::props::{ErrorHandler, Props};

/// Whether rendering `next` would produce the same drawing as rendering `prev`.
///
/// The surface handle is not part of the comparison.
pub fn props_equal(prev: &Props, next: &Props) -> bool {
    prev.value == next.value
        && prev.ecl == next.ecl
        && prev.fg_color.same_as(&next.fg_color)
        && prev.bg_color.same_as(&next.bg_color)
        && handler_equal(prev.on_error.as_ref(), next.on_error.as_ref())
        && prev.size == next.size
        && prev.version == next.version
        && logo_equal(prev.logo.as_ref(), next.logo.as_ref())
}

fn handler_equal(prev: Option<&ErrorHandler>, next: Option<&ErrorHandler>) -> bool {
    match (prev, next) {
        (None, None) => true,
        (Some(prev), Some(next)) => prev.ptr_eq(next),
        _ => false,
    }
}

/// Whether two logo specs describe the same overlay.
/// # Example
/// ```
/// use std::rc::Rc;
/// use qrsvg_render::memo::logo_equal;
/// use qrsvg_render::LogoSpec;
///
/// let unset = Rc::new(LogoSpec::new("logo.png"));
/// let cleared = Rc::new(LogoSpec { centerized: Some(false), ..LogoSpec::new("logo.png") });
/// assert!(logo_equal(Some(&unset), Some(&cleared)));
/// assert!(!logo_equal(Some(&unset), None));
/// ```
pub fn logo_equal(prev: Option<&Rc<LogoSpec>>, next: Option<&Rc<LogoSpec>>) -> bool {
    match (prev, next) {
        (None, None) => true,
        (Some(prev), Some(next)) if Rc::ptr_eq(prev, next) => true,
        (Some(prev), Some(next)) => {
            prev.is_background() == next.is_background()
                && prev.is_centerized() == next.is_centerized()
                && prev.height == next.height
                && prev.href == next.href
                && prev.opacity == next.opacity
                && prev.preserve_aspect_ratio == next.preserve_aspect_ratio
                && prev.width == next.width
                && prev.x == next.x
                && prev.y == next.y
        }
        _ => false,
    }
}

/// The inputs the module matrix depends on. The matrix is encoded again only when the key changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixKey {
    pub value: Payload,
    pub ecl: Option<Ecl>,
    pub version: Option<Version>,
}

impl MatrixKey {
    pub fn of(props: &Props) -> Self {
        Self {
            value: props.value.clone(),
            ecl: props.ecl,
            version: props.version,
        }
    }

    /// Whether the matrix encoded for `self` is still valid for `props`.
    pub fn matches(&self, props: &Props) -> bool {
        self.value == props.value && self.ecl == props.ecl && self.version == props.version
    }

    pub fn options(&self) -> EncodeOptions {
        EncodeOptions {
            ecl: self.ecl,
            version: self.version,
        }
    }
}
