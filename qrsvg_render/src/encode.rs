use qrcode::bits::Bits;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

use qrsvg_core::{Ecl, Mode, Module, ModuleMatrix, Segment, Version};

/// Data handed to a [MatrixEncoder].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Text, passed to the encoder untouched. The encoder decides how to store it.
    Text(String),
    /// Raw bytes, stored as they are.
    Bytes(Vec<u8>),
    /// Pre-structured input: segments whose [Mode] has already been decided by the caller.
    Segments(Vec<Segment>),
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<Segment>> for Payload {
    fn from(value: Vec<Segment>) -> Self {
        Self::Segments(value)
    }
}

/// Optional encoder parameters. Unset fields fall back to the encoder's own defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub ecl: Option<Ecl>,
    pub version: Option<Version>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("cannot encode byte 0x{0:x} using mode {1:?}")]
    CannotEncodeWithMode(u8, Mode),
    #[error(
        "cannot encode the data with {} and ECL {}: data too long",
        .version.map_or_else(|| "any version".to_string(), |v| format!("version {}", v)),
        .ecl
    )]
    DataTooLong { version: Option<Version>, ecl: Ecl },
    #[error("version {0} is not supported by the encoder")]
    InvalidVersion(Version),
    #[error("the data contains characters unsupported by the encoder")]
    UnsupportedCharacterSet,
    #[error("the encoder failed: {0}")]
    Encoder(String),
}

/// Source of module matrices. This is the seam between the renderer and the QR symbol encoding algorithm.
pub trait MatrixEncoder {
    /// Encode `payload` into a module matrix.
    fn encode(&self, payload: &Payload, options: EncodeOptions) -> Result<ModuleMatrix, EncodingError>;
}

impl<F> MatrixEncoder for F
where
    F: Fn(&Payload, EncodeOptions) -> Result<ModuleMatrix, EncodingError>,
{
    fn encode(&self, payload: &Payload, options: EncodeOptions) -> Result<ModuleMatrix, EncodingError> {
        self(payload, options)
    }
}

/// Level used when the options do not specify one.
const DEFAULT_ECL: Ecl = Ecl::M;

/// [MatrixEncoder] backed by the `qrcode` crate.
#[derive(Debug, Clone)]
pub struct QrcodeEncoder;

impl QrcodeEncoder {
    /// Construct a new encoder that uses [Ecl::M] unless told otherwise and picks the smallest fitting version.
    pub fn new() -> Self {
        Self
    }

    fn encode_data(&self, data: &[u8], version: Option<Version>, ecl: Ecl) -> Result<QrCode, EncodingError> {
        let code = match version {
            Some(version) => QrCode::with_version(data, to_qr_version(version), to_ec_level(ecl)),
            None => QrCode::with_error_correction_level(data, to_ec_level(ecl)),
        };
        code.map_err(|err| map_error(err, version, ecl))
    }

    fn encode_segments(
        &self,
        segments: &[Segment],
        version: Option<Version>,
        ecl: Ecl,
    ) -> Result<QrCode, EncodingError> {
        // The underlying encoder trusts its input, so make sure each segment fits its mode before pushing it.
        for segment in segments {
            if let Some(byte) = segment.first_invalid_byte() {
                return Err(EncodingError::CannotEncodeWithMode(byte, segment.mode));
            }
        }
        let mut candidate = version.unwrap_or(Version::V01);
        loop {
            match segments_to_bits(segments, candidate, ecl) {
                Ok(bits) => {
                    return QrCode::with_bits(bits, to_ec_level(ecl))
                        .map_err(|err| map_error(err, version, ecl))
                }
                // Without an explicit version, grow the symbol until the data fits.
                Err(QrError::DataTooLong) if version.is_none() => match candidate.incr() {
                    Some(next) => candidate = next,
                    None => return Err(EncodingError::DataTooLong { version, ecl }),
                },
                Err(err) => return Err(map_error(err, version, ecl)),
            }
        }
    }
}

impl Default for QrcodeEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixEncoder for QrcodeEncoder {
    fn encode(&self, payload: &Payload, options: EncodeOptions) -> Result<ModuleMatrix, EncodingError> {
        let ecl = options.ecl.unwrap_or(DEFAULT_ECL);
        let code = match payload {
            Payload::Text(text) => self.encode_data(text.as_bytes(), options.version, ecl)?,
            Payload::Bytes(bytes) => self.encode_data(bytes, options.version, ecl)?,
            Payload::Segments(segments) => self.encode_segments(segments, options.version, ecl)?,
        };
        let width = code.width();
        let modules = code.to_colors().into_iter().map(|color| match color {
            qrcode::Color::Dark => Module::Dark,
            qrcode::Color::Light => Module::Light,
        });
        ModuleMatrix::from_modules(width, modules)
            .ok_or_else(|| EncodingError::Encoder(format!("the encoder produced a non square {}-wide matrix", width)))
    }
}

fn segments_to_bits(segments: &[Segment], version: Version, ecl: Ecl) -> Result<Bits, QrError> {
    let mut bits = Bits::new(to_qr_version(version));
    for segment in segments {
        match segment.mode {
            Mode::Num => bits.push_numeric_data(&segment.data)?,
            Mode::Alnum => bits.push_alphanumeric_data(&segment.data)?,
            Mode::Bytes => bits.push_byte_data(&segment.data)?,
            Mode::Kanji => bits.push_kanji_data(&segment.data)?,
        }
    }
    bits.push_terminator(to_ec_level(ecl))?;
    Ok(bits)
}

fn to_ec_level(ecl: Ecl) -> EcLevel {
    match ecl {
        Ecl::L => EcLevel::L,
        Ecl::M => EcLevel::M,
        Ecl::Q => EcLevel::Q,
        Ecl::H => EcLevel::H,
    }
}

fn to_qr_version(version: Version) -> qrcode::Version {
    qrcode::Version::Normal(version.number().into())
}

fn map_error(err: QrError, version: Option<Version>, ecl: Ecl) -> EncodingError {
    match err {
        QrError::DataTooLong => EncodingError::DataTooLong { version, ecl },
        QrError::InvalidVersion => match version {
            Some(version) => EncodingError::InvalidVersion(version),
            None => EncodingError::Encoder(err.to_string()),
        },
        QrError::UnsupportedCharacterSet | QrError::InvalidCharacter => EncodingError::UnsupportedCharacterSet,
        other => EncodingError::Encoder(other.to_string()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_text_uses_smallest_version() {
        let matrix = QrcodeEncoder::new().encode(&"hello".into(), EncodeOptions::default()).unwrap();
        assert_eq!(matrix.size(), Version::V01.matrix_size());
    }

    #[test]
    fn test_explicit_version_sets_matrix_size() {
        let options = EncodeOptions {
            ecl: Some(Ecl::L),
            version: Some(Version::V05),
        };
        let matrix = QrcodeEncoder::new().encode(&"hello".into(), options).unwrap();
        assert_eq!(matrix.size(), 37);
    }

    #[test]
    fn test_finder_pattern_is_dark() {
        let matrix = QrcodeEncoder::new().encode(&"hello".into(), EncodeOptions::default()).unwrap();
        for k in 0..7 {
            assert_eq!(matrix.get(0, k), Some(Module::Dark));
            assert_eq!(matrix.get(k, 0), Some(Module::Dark));
        }
        assert_eq!(matrix.get(1, 1), Some(Module::Light));
    }

    #[test]
    fn test_data_too_long_for_version() {
        let options = EncodeOptions {
            ecl: Some(Ecl::H),
            version: Some(Version::V01),
        };
        let err = QrcodeEncoder::new()
            .encode(&"this text is far too long for a version one symbol".into(), options)
            .unwrap_err();
        assert_eq!(
            err,
            EncodingError::DataTooLong {
                version: Some(Version::V01),
                ecl: Ecl::H
            }
        );
        assert_eq!(
            err.to_string(),
            "cannot encode the data with version V1 and ECL H: data too long"
        );
    }

    #[test]
    fn test_data_too_long_for_any_version() {
        let payload = Payload::Bytes(vec![b'x'; 4000]);
        let err = QrcodeEncoder::new().encode(&payload, EncodeOptions::default()).unwrap_err();
        assert!(matches!(err, EncodingError::DataTooLong { version: None, .. }));
    }

    #[test]
    fn test_segments_pick_a_fitting_version() {
        let payload = Payload::Segments(vec![
            Segment::new(Mode::Alnum, "HELLO "),
            Segment::new(Mode::Num, "0123456789".repeat(6)),
        ]);
        let matrix = QrcodeEncoder::new().encode(&payload, EncodeOptions::default()).unwrap();
        assert!(matrix.size() > Version::V01.matrix_size());
    }

    #[test]
    fn test_segments_too_long_for_any_version() {
        let payload = Payload::Segments(vec![Segment::new(Mode::Bytes, vec![b'x'; 4000])]);
        let err = QrcodeEncoder::new().encode(&payload, EncodeOptions::default()).unwrap_err();
        assert_eq!(err, EncodingError::DataTooLong { version: None, ecl: Ecl::M });
    }

    #[test]
    fn test_invalid_segment_is_rejected() {
        let payload = Payload::Segments(vec![Segment::new(Mode::Num, "12a")]);
        let err = QrcodeEncoder::new().encode(&payload, EncodeOptions::default()).unwrap_err();
        assert_eq!(err, EncodingError::CannotEncodeWithMode(b'a', Mode::Num));
    }

    #[test]
    fn test_closures_are_encoders() {
        let encoder = |_: &Payload, _: EncodeOptions| Ok::<_, EncodingError>(ModuleMatrix::filled(2, Module::Dark));
        let matrix = encoder.encode(&"x".into(), EncodeOptions::default()).unwrap();
        assert_eq!(matrix.dark_count(), 4);
    }
}
