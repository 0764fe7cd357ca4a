use crate::logo::LogoOverlay;
use crate::svg::SvgWriter;
use crate::Color;

/// Filled axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
}

/// One entry of a draw list.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect(Rect),
    Logo(LogoOverlay),
}

/// Square drawing made of an ordered draw list. Later elements are drawn on top of earlier ones.
///
/// Drawings built by the renderer always start with the background rectangle, followed by the logo when it is a
/// background logo, then one rectangle per dark module, then the logo when it is a foreground logo.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    size: f64,
    elements: Vec<Element>,
}

impl Drawing {
    /// Construct a drawing of side `size` from its draw list.
    pub fn new(size: f64, elements: Vec<Element>) -> Self {
        Self { size, elements }
    }

    /// Side length of the drawing.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// The draw list, bottom to top.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The first element, if it is a rectangle.
    pub fn background(&self) -> Option<&Rect> {
        match self.elements.first() {
            Some(Element::Rect(rect)) => Some(rect),
            _ => None,
        }
    }

    /// Every rectangle but the background.
    pub fn modules(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.elements.iter().skip(1).filter_map(|element| match element {
            Element::Rect(rect) => Some(rect),
            Element::Logo(_) => None,
        })
    }

    /// The logo and its position in the draw list.
    pub fn logo(&self) -> Option<(usize, &LogoOverlay)> {
        self.elements
            .iter()
            .enumerate()
            .find_map(|(index, element)| match element {
                Element::Logo(logo) => Some((index, logo)),
                Element::Rect(_) => None,
            })
    }

    /// Render the drawing as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        SvgWriter::new().to_string(self)
    }
}
