use serde::{Deserialize, Serialize};

/// Encoding mode of a data segment.
///
/// The first three modes are ordered from the most to the least compact: a byte that fits a mode also fits every
/// later one. [Mode::Kanji] stands apart and only accepts Shift JIS double-byte characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Encoding for digits 0-9.
    Num,
    /// Encoding for digits 0-9, capital characters A-Z and ` $%*+-./:`.
    Alnum,
    /// Encoding for arbitrary text or byte string.
    Bytes,
    /// Encoding for Shift JIS double-byte characters.
    Kanji,
}

impl Mode {
    /// Return the [Mode] that is the most generic between `self` and `other`.
    /// # Example
    /// ```
    /// use qrsvg_core::Mode;
    /// assert_eq!(Mode::Alnum.most_generic(Mode::Bytes), Mode::Bytes);
    /// assert_eq!(Mode::Alnum.most_generic(Mode::Num), Mode::Alnum);
    /// ```
    pub fn most_generic(self, other: Self) -> Self {
        std::cmp::max(self, other)
    }

    /// Determine whether data whose ideal mode is `self` can be stored using `other`.
    /// # Example
    /// ```
    /// use qrsvg_core::Mode;
    /// assert!(Mode::Alnum.fits(Mode::Bytes));
    /// assert!(Mode::Num.fits(Mode::Num));
    /// assert!(!Mode::Bytes.fits(Mode::Num));
    /// assert!(!Mode::Bytes.fits(Mode::Kanji));
    /// ```
    pub fn fits(self, other: Self) -> bool {
        match (self, other) {
            (_, Mode::Kanji) | (Mode::Kanji, _) => self == other,
            _ => self <= other,
        }
    }
}

impl From<u8> for Mode {
    fn from(value: u8) -> Self {
        match value {
            0x30..=0x39 => Mode::Num,
            0x20 | 0x24 | 0x25 | 0x2a | 0x2b | 0x2d..=0x2f | 0x3a | 0x41..=0x5a => Mode::Alnum,
            _ => Mode::Bytes,
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "num" | "numeric" => Ok(Mode::Num),
            "alnum" | "alphanumeric" => Ok(Mode::Alnum),
            "bytes" | "byte" => Ok(Mode::Bytes),
            "kanji" => Ok(Mode::Kanji),
            invalid => Err(format!("invalid segment mode '{}'", invalid)),
        }
    }
}

/// Contiguous segment of data with a [Mode], handed to the encoder as pre-structured input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub mode: Mode,
    pub data: Vec<u8>,
}

impl Segment {
    /// Construct a new [Segment] with the given `mode` and `data`.
    pub fn new<T: Into<Vec<u8>>>(mode: Mode, data: T) -> Self {
        Self {
            mode,
            data: data.into(),
        }
    }

    /// Construct a [Segment] using the most compact mode able to hold all of `data`.
    /// # Example
    /// ```
    /// use qrsvg_core::{Mode, Segment};
    /// assert_eq!(Segment::auto("0123").mode, Mode::Num);
    /// assert_eq!(Segment::auto("HELLO 42").mode, Mode::Alnum);
    /// assert_eq!(Segment::auto("hello").mode, Mode::Bytes);
    /// ```
    pub fn auto<T: Into<Vec<u8>>>(data: T) -> Self {
        let data = data.into();
        let mode = data
            .iter()
            .map(|&byte| Mode::from(byte))
            .reduce(Mode::most_generic)
            .unwrap_or(Mode::Num);
        Self { mode, data }
    }

    /// Find the first byte of the segment that cannot be stored using its mode.
    ///
    /// Kanji segments are checked pairwise against the Shift JIS ranges `0x8140..=0x9FFC` and `0xE040..=0xEBBF`, and
    /// an odd trailing byte is reported as invalid.
    pub fn first_invalid_byte(&self) -> Option<u8> {
        if self.mode == Mode::Kanji {
            let mut pairs = self.data.chunks_exact(2);
            let invalid = pairs.by_ref().find_map(|pair| {
                let code = u16::from_be_bytes([pair[0], pair[1]]);
                match code {
                    0x8140..=0x9ffc | 0xe040..=0xebbf => None,
                    _ => Some(pair[0]),
                }
            });
            return invalid.or_else(|| pairs.remainder().first().copied());
        }
        self.data
            .iter()
            .copied()
            .find(|&byte| !Mode::from(byte).fits(self.mode))
    }
}
