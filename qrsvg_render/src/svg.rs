use std::fmt;
use std::io::Write;

use itertools::Itertools;

use crate::draw::{Drawing, Element, Rect};
use crate::logo::LogoOverlay;

/// Writer turning a [Drawing] into an SVG document.
pub struct SvgWriter {
    xml_declaration: bool,
    newlines: bool,
}

impl SvgWriter {
    /// Construct a new [SvgWriter] that writes one element per line and no XML declaration.
    pub fn new() -> Self {
        Self {
            xml_declaration: false,
            newlines: true,
        }
    }

    /// Prepend the `<?xml ...?>` declaration, for standalone `.svg` files.
    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    /// Write the whole document on a single line.
    pub fn compact(mut self) -> Self {
        self.newlines = false;
        self
    }

    /// Render the `drawing` into `output`.
    pub fn render<W: Write>(&self, output: &mut W, drawing: &Drawing) -> std::io::Result<()> {
        write!(output, "{}", Document { writer: self, drawing })
    }

    /// Render the `drawing` into a string.
    /// # Example
    /// ```
    /// use qrsvg_render::{Drawing, SvgWriter};
    /// let svg = SvgWriter::new().compact().to_string(&Drawing::new(4.0, Vec::new()));
    /// assert_eq!(svg, r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4" viewBox="0 0 4 4"></svg>"#);
    /// ```
    pub fn to_string(&self, drawing: &Drawing) -> String {
        Document { writer: self, drawing }.to_string()
    }
}

impl Default for SvgWriter {
    fn default() -> Self {
        Self::new()
    }
}

struct Document<'a> {
    writer: &'a SvgWriter,
    drawing: &'a Drawing,
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let newline = if self.writer.newlines { "\n" } else { "" };
        if self.writer.xml_declaration {
            write!(f, r#"<?xml version="1.0" encoding="UTF-8"?>{}"#, newline)?;
        }
        let size = self.drawing.size();
        write!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}">{1}"#,
            size, newline
        )?;
        for element in self.drawing.elements() {
            match element {
                Element::Rect(rect) => write_rect(f, rect)?,
                Element::Logo(logo) => write_image(f, logo)?,
            }
            write!(f, "{}", newline)?;
        }
        write!(f, "</svg>{}", newline)
    }
}

fn write_rect(f: &mut fmt::Formatter<'_>, rect: &Rect) -> fmt::Result {
    write_element(
        f,
        "rect",
        &[
            ("x", Some(rect.x.to_string())),
            ("y", Some(rect.y.to_string())),
            ("width", Some(rect.width.to_string())),
            ("height", Some(rect.height.to_string())),
            ("fill", Some(rect.fill.to_string())),
        ],
    )
}

fn write_image(f: &mut fmt::Formatter<'_>, logo: &LogoOverlay) -> fmt::Result {
    write_element(
        f,
        "image",
        &[
            ("href", Some(logo.href.clone())),
            ("x", logo.x.map(|x| x.to_string())),
            ("y", logo.y.map(|y| y.to_string())),
            ("width", logo.width.as_ref().map(ToString::to_string)),
            ("height", logo.height.as_ref().map(ToString::to_string)),
            ("opacity", logo.opacity.map(|opacity| opacity.to_string())),
            ("preserveAspectRatio", logo.preserve_aspect_ratio.clone()),
        ],
    )
}

/// Write a self-closing element, skipping unset attributes.
fn write_element(f: &mut fmt::Formatter<'_>, name: &str, attributes: &[(&str, Option<String>)]) -> fmt::Result {
    let attributes = attributes
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
        .format_with(" ", |(key, value), g| g(&format_args!(r#"{}="{}""#, key, escape(value))));
    write!(f, "<{} {}/>", name, attributes)
}

/// Escape `value` for use inside a double-quoted attribute.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::logo::Length;
    use crate::Color;

    fn drawing() -> Drawing {
        Drawing::new(
            30.0,
            vec![
                Element::Rect(Rect {
                    x: 0.0,
                    y: 0.0,
                    width: 30.0,
                    height: 30.0,
                    fill: Color::from("white"),
                }),
                Element::Rect(Rect {
                    x: 10.0,
                    y: 0.0,
                    width: 10.0,
                    height: 10.0,
                    fill: Color::from("black"),
                }),
                Element::Logo(LogoOverlay {
                    href: "a.png?w=1&h=2".into(),
                    x: Some(80.0),
                    y: None,
                    width: Some(Length::from("20%")),
                    height: None,
                    opacity: Some(0.5),
                    preserve_aspect_ratio: None,
                }),
            ],
        )
    }

    #[test]
    fn test_document() {
        let svg = SvgWriter::new().with_xml_declaration(true).to_string(&drawing());
        assert_eq!(
            svg,
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"30\" height=\"30\" viewBox=\"0 0 30 30\">\n",
                "<rect x=\"0\" y=\"0\" width=\"30\" height=\"30\" fill=\"white\"/>\n",
                "<rect x=\"10\" y=\"0\" width=\"10\" height=\"10\" fill=\"black\"/>\n",
                "<image href=\"a.png?w=1&amp;h=2\" x=\"80\" width=\"20%\" opacity=\"0.5\"/>\n",
                "</svg>\n",
            )
        );
    }

    #[test]
    fn test_render_to_writer_matches_string() {
        let writer = SvgWriter::new();
        let mut output = Vec::new();
        writer.render(&mut output, &drawing()).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), writer.to_string(&drawing()));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<"a" & 'b'>"#), "&lt;&quot;a&quot; &amp; 'b'&gt;");
    }
}
