//! Placement of a decorative image over (or under) the modules.

use serde::{Deserialize, Serialize};

use qrsvg_core::qrstandard::FINDER_REGION_WIDTH;

use crate::percent::parse_percent;

/// Ratio of the drawing size used for a centered logo side that is missing or unusable.
const DEFAULT_CENTERED_RATIO: f64 = 0.2;

/// A logo dimension: either absolute or a string such as `"20%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Length {
    Px(f64),
    Text(String),
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Self::Px(value)
    }
}

impl From<&str> for Length {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{}", px),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Description of the logo supplied by the caller.
///
/// Only `href` is required when deserializing; every other field may be left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogoSpec {
    /// Image source.
    pub href: String,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub opacity: Option<f64>,
    pub preserve_aspect_ratio: Option<String>,
    /// Draw the logo under the modules instead of over them.
    pub as_background: Option<bool>,
    /// Center the logo, resolving its width and height against the drawing size.
    pub centerized: Option<bool>,
}

impl LogoSpec {
    pub fn new<T: Into<String>>(href: T) -> Self {
        Self {
            href: href.into(),
            ..Default::default()
        }
    }

    /// Whether the logo goes under the modules. Unset counts as no.
    pub fn is_background(&self) -> bool {
        self.as_background.unwrap_or(false)
    }

    /// Whether the logo is centered. Unset counts as no.
    pub fn is_centerized(&self) -> bool {
        self.centerized.unwrap_or(false)
    }
}

/// The image element that ends up in the draw list. Unset fields are left to the drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoOverlay {
    pub href: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub opacity: Option<f64>,
    pub preserve_aspect_ratio: Option<String>,
}

/// Where the logo sits in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Right above the background, under the modules.
    Back,
    /// Above every module.
    Front,
}

/// How the logo position was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Centered on the drawing.
    Centered,
    /// Position supplied by the caller and left untouched.
    Caller,
    /// Shifted right of the top-left finder pattern.
    FinderOffset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedLogo {
    pub overlay: LogoOverlay,
    pub layer: Layer,
    pub placement: Placement,
}

/// Resolve the overlay of `spec` for a drawing of side `size` whose modules are `pixel_size` wide.
///
/// `pixel_size` is `None` when there is no module matrix; a logo relying on the finder offset then keeps its
/// position unset.
pub fn compose(spec: &LogoSpec, size: f64, pixel_size: Option<f64>) -> ComposedLogo {
    let mut overlay = LogoOverlay {
        href: spec.href.clone(),
        x: spec.x,
        y: spec.y,
        width: spec.width.clone(),
        height: spec.height.clone(),
        opacity: spec.opacity,
        preserve_aspect_ratio: spec.preserve_aspect_ratio.clone(),
    };
    let placement = if spec.is_centerized() {
        let width = resolve_centered(spec.width.as_ref(), size);
        let height = resolve_centered(spec.height.as_ref(), size);
        overlay.width = Some(Length::Px(width));
        overlay.height = Some(Length::Px(height));
        overlay.x = Some((size - width) / 2.0);
        overlay.y = Some((size - height) / 2.0);
        Placement::Centered
    } else if spec.x.is_some() || spec.y.is_some() {
        Placement::Caller
    } else {
        overlay.x = pixel_size.map(|pixel| FINDER_REGION_WIDTH as f64 * pixel);
        Placement::FinderOffset
    };
    let layer = if spec.is_background() {
        Layer::Back
    } else {
        Layer::Front
    };
    ComposedLogo {
        overlay,
        layer,
        placement,
    }
}

/// Resolve one side of a centered logo against the drawing `size`.
/// # Example
/// ```
/// use qrsvg_render::logo::{resolve_centered, Length};
/// assert_eq!(resolve_centered(Some(&Length::from("50%")), 200.0), 100.0);
/// assert_eq!(resolve_centered(Some(&Length::from(0.0)), 200.0), 40.0);
/// assert_eq!(resolve_centered(None, 200.0), 40.0);
/// ```
pub fn resolve_centered(length: Option<&Length>, size: f64) -> f64 {
    let resolved = match length {
        Some(Length::Px(px)) => Some(*px),
        Some(Length::Text(text)) => parse_percent(text).map(|ratio| ratio * size),
        None => None,
    };
    match resolved {
        Some(side) if side > 0.0 => side,
        _ => DEFAULT_CENTERED_RATIO * size,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_centered_percentages() {
        let spec = LogoSpec {
            width: Some("50%".into()),
            height: Some("25%".into()),
            centerized: Some(true),
            ..LogoSpec::new("logo.png")
        };
        let logo = compose(&spec, 200.0, Some(8.0));
        assert_eq!(logo.placement, Placement::Centered);
        assert_eq!(logo.overlay.width, Some(Length::Px(100.0)));
        assert_eq!(logo.overlay.height, Some(Length::Px(50.0)));
        assert_eq!(logo.overlay.x, Some(50.0));
        assert_eq!(logo.overlay.y, Some(75.0));
    }

    #[test]
    fn test_centered_sides_resolve_independently() {
        let wide = LogoSpec {
            width: Some("50%".into()),
            height: Some(30.0.into()),
            centerized: Some(true),
            ..LogoSpec::new("a")
        };
        let tall = LogoSpec {
            width: Some(30.0.into()),
            height: Some("50%".into()),
            centerized: Some(true),
            ..LogoSpec::new("a")
        };
        let wide = compose(&wide, 120.0, None).overlay;
        let tall = compose(&tall, 120.0, None).overlay;
        assert_eq!(wide.width, tall.height);
        assert_eq!(wide.height, tall.width);
        assert_eq!(wide.width, Some(Length::Px(60.0)));
    }

    #[test]
    fn test_centered_fallback_sizes() {
        let spec = LogoSpec {
            width: Some("none".into()),
            height: Some((-5.0).into()),
            centerized: Some(true),
            ..LogoSpec::new("a")
        };
        let logo = compose(&spec, 100.0, Some(4.0)).overlay;
        assert_eq!(logo.width, Some(Length::Px(20.0)));
        assert_eq!(logo.height, Some(Length::Px(20.0)));
        assert_eq!(logo.x, Some(40.0));
        assert_eq!(logo.y, Some(40.0));
    }

    #[test]
    fn test_centered_wins_over_caller_position() {
        let spec = LogoSpec {
            x: Some(3.0),
            centerized: Some(true),
            ..LogoSpec::new("a")
        };
        let logo = compose(&spec, 100.0, Some(4.0));
        assert_eq!(logo.placement, Placement::Centered);
        assert_eq!(logo.overlay.x, Some(40.0));
    }

    #[test]
    fn test_finder_offset() {
        let spec = LogoSpec {
            width: Some("20%".into()),
            ..LogoSpec::new("a")
        };
        let logo = compose(&spec, 210.0, Some(10.0));
        assert_eq!(logo.placement, Placement::FinderOffset);
        assert_eq!(logo.overlay.x, Some(80.0));
        assert_eq!(logo.overlay.y, None);
        // Dimensions are handed to the backend unresolved.
        assert_eq!(logo.overlay.width, Some(Length::Text("20%".into())));
    }

    #[test]
    fn test_finder_offset_without_matrix() {
        let logo = compose(&LogoSpec::new("a"), 100.0, None);
        assert_eq!(logo.overlay.x, None);
        assert_eq!(logo.overlay.y, None);
    }

    #[test]
    fn test_caller_position_untouched() {
        let spec = LogoSpec {
            y: Some(12.0),
            ..LogoSpec::new("a")
        };
        let logo = compose(&spec, 100.0, Some(4.0));
        assert_eq!(logo.placement, Placement::Caller);
        assert_eq!(logo.overlay.x, None);
        assert_eq!(logo.overlay.y, Some(12.0));
    }

    #[test]
    fn test_layers() {
        let front = compose(&LogoSpec::new("a"), 10.0, None);
        assert_eq!(front.layer, Layer::Front);
        let spec = LogoSpec {
            as_background: Some(true),
            ..LogoSpec::new("a")
        };
        assert_eq!(compose(&spec, 10.0, None).layer, Layer::Back);
    }
}
