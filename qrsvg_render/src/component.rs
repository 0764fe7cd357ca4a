use qrsvg_core::ModuleMatrix;

use crate::bytes::utf16_units_to_bytes;
use crate::draw::{Drawing, Element};
use crate::encode::{EncodingError, MatrixEncoder, Payload, QrcodeEncoder};
use crate::logo::{self, Layer};
use crate::memo::{props_equal, MatrixKey};
use crate::props::Props;
use crate::raster;
use crate::report::{check_size, Reporter};

/// A QR drawing that is kept up to date with its display parameters.
///
/// Each call to [QrSvg::render] is one render pass. A pass is skipped when the parameters are equal to the previous
/// ones, and the module matrix is only encoded again when the value, the error correction level or the version
/// change.
pub struct QrSvg<E = QrcodeEncoder> {
    encoder: E,
    legacy_bytes: bool,
    matrix: Option<(MatrixKey, Result<ModuleMatrix, EncodingError>)>,
    last: Option<(Props, Option<Drawing>)>,
}

impl QrSvg<QrcodeEncoder> {
    /// Construct a new [QrSvg] encoding with the `qrcode` crate.
    pub fn new() -> Self {
        Self::with_encoder(QrcodeEncoder::new())
    }
}

impl Default for QrSvg<QrcodeEncoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: MatrixEncoder> QrSvg<E> {
    /// Construct a new [QrSvg] that obtains its module matrices from `encoder`.
    pub fn with_encoder(encoder: E) -> Self {
        Self {
            encoder,
            legacy_bytes: false,
            matrix: None,
            last: None,
        }
    }

    /// Pack text values into bytes (one UTF-8 style sequence per UTF-16 unit) before handing them to the encoder,
    /// for encoders that only accept byte-oriented input.
    pub fn with_legacy_bytes(mut self, enabled: bool) -> Self {
        if self.legacy_bytes != enabled {
            self.matrix = None;
            self.last = None;
        }
        self.legacy_bytes = enabled;
        self
    }

    /// Get the module matrix of the last pass, if encoding succeeded.
    pub fn matrix(&self) -> Option<&ModuleMatrix> {
        self.matrix.as_ref().and_then(|(_, matrix)| matrix.as_ref().ok())
    }

    /// Render `props`.
    ///
    /// Returns `None` when nothing can be drawn at all. Every failure is reported through `props.on_error` (or
    /// logged) and the best possible drawing is still returned: without modules when encoding failed, at the
    /// requested size when it is too small for the matrix.
    pub fn render(&mut self, props: &Props) -> Option<Drawing> {
        if let Some((prev, drawing)) = &self.last {
            let same_surface = match (&prev.surface, &props.surface) {
                (None, None) => true,
                (Some(prev), Some(next)) => prev.ptr_eq(next),
                _ => false,
            };
            if same_surface && props_equal(prev, props) {
                log::debug!("props unchanged, skipping render pass");
                return drawing.clone();
            }
        }
        let drawing = self.render_pass(props);
        if let Some(surface) = &props.surface {
            surface.publish(drawing.clone());
        }
        self.last = Some((props.clone(), drawing.clone()));
        drawing
    }

    fn render_pass(&mut self, props: &Props) -> Option<Drawing> {
        let mut reporter = Reporter::new(props.on_error.as_ref());

        self.update_matrix(props);
        // A failed encoding stays cached, so every pass that draws without modules tells the current handler why.
        if let Some((_, Err(err))) = &self.matrix {
            reporter.report(err.clone());
        }
        let matrix = self.matrix();
        let dimension = matrix.map(ModuleMatrix::size);

        let (size, draw_modules) = match check_size(&props.size, dimension) {
            Ok(size) => (size as f64, true),
            Err(err) => {
                let degraded = err.degraded_size();
                reporter.report(err);
                match degraded {
                    Some(size) => {
                        log::warn!("rendering a degraded QR code at size {}", size);
                        (size as f64, false)
                    }
                    None => return None,
                }
            }
        };
        let pixel_size = dimension.and_then(|dimension| raster::pixel_size(size, dimension));

        let mut elements = vec![Element::Rect(raster::background(size, &props.bg_color))];
        let logo = props
            .logo
            .as_deref()
            .map(|spec| logo::compose(spec, size, pixel_size));
        let (back_logo, front_logo) = match logo {
            Some(logo) if logo.layer == Layer::Back => (Some(logo.overlay), None),
            Some(logo) => (None, Some(logo.overlay)),
            None => (None, None),
        };
        elements.extend(back_logo.map(Element::Logo));
        if let (Some(matrix), true) = (matrix, draw_modules) {
            elements.extend(
                raster::rasterize(matrix, size, &props.fg_color)
                    .into_iter()
                    .map(Element::Rect),
            );
        }
        elements.extend(front_logo.map(Element::Logo));

        log::debug!(
            "rendered {} elements at size {} with {} failure(s)",
            elements.len(),
            size,
            reporter.reported()
        );
        Some(Drawing::new(size, elements))
    }

    /// Encode the matrix again if its inputs changed.
    fn update_matrix(&mut self, props: &Props) {
        if let Some((key, _)) = &self.matrix {
            if key.matches(props) {
                return;
            }
        }
        let key = MatrixKey::of(props);
        log::debug!("encoding module matrix with {:?}", key.options());
        let encoded = match (&props.value, self.legacy_bytes) {
            (Payload::Text(text), true) => {
                let payload = Payload::Bytes(utf16_units_to_bytes(text));
                self.encoder.encode(&payload, key.options())
            }
            (payload, _) => self.encoder.encode(payload, key.options()),
        };
        self.matrix = Some((key, encoded));
    }
}
