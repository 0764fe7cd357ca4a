//! Validation of the requested size and reporting of render failures.
//!
//! Failures never leave the render path as panics or errors: each one is turned into a message and handed to the
//! caller's [ErrorHandler], or logged when there is none.

use crate::encode::EncodingError;
use crate::props::{ErrorHandler, Size};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SizeError {
    #[error("`size` is not a valid number: {0}")]
    NotANumber(String),
    #[error("`size` must be positive, got {0}")]
    NotPositive(i64),
    #[error("`size` is too small: {size} is less than the {dimension} modules of the symbol")]
    TooSmall { size: i64, dimension: usize },
}

impl SizeError {
    /// The size to use for a degraded drawing, or `None` when nothing can be drawn at all.
    pub fn degraded_size(&self) -> Option<i64> {
        match self {
            Self::NotANumber(_) => None,
            Self::NotPositive(size) => Some(*size),
            Self::TooSmall { size, .. } => Some(*size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Size(#[from] SizeError),
}

/// Coerce `size` and check it against the matrix `dimension`, if there is a matrix.
/// # Example
/// ```
/// use qrsvg_render::report::{check_size, SizeError};
/// use qrsvg_render::Size;
/// assert_eq!(check_size(&Size::from(30.0), Some(3)), Ok(30));
/// assert_eq!(
///     check_size(&Size::from(20.0), Some(21)),
///     Err(SizeError::TooSmall { size: 20, dimension: 21 })
/// );
/// ```
pub fn check_size(size: &Size, dimension: Option<usize>) -> Result<i64, SizeError> {
    let coerced = size
        .coerce()
        .ok_or_else(|| SizeError::NotANumber(size.to_string()))?;
    match dimension {
        _ if coerced <= 0 => Err(SizeError::NotPositive(coerced)),
        Some(dimension) if coerced < dimension as i64 => Err(SizeError::TooSmall {
            size: coerced,
            dimension,
        }),
        _ => Ok(coerced),
    }
}

/// Funnel for the failures of one render pass.
pub struct Reporter<'a> {
    handler: Option<&'a ErrorHandler>,
    reported: usize,
}

impl<'a> Reporter<'a> {
    /// Construct a reporter sending messages to `handler`, or to the log if there is none.
    pub fn new(handler: Option<&'a ErrorHandler>) -> Self {
        Self {
            handler,
            reported: 0,
        }
    }

    /// Report `error`.
    pub fn report<E: Into<RenderError>>(&mut self, error: E) {
        let message = error.into().to_string();
        self.reported += 1;
        match self.handler {
            Some(handler) => handler.call(&message),
            None => log_error(&message),
        }
    }

    /// Number of failures reported so far.
    pub fn reported(&self) -> usize {
        self.reported
    }
}

/// Error handler used when the caller does not supply one.
pub fn log_error(message: &str) {
    log::error!("cannot render QR code: {}", message);
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;

    use qrsvg_core::{Ecl, Version};

    use super::*;

    #[test]
    fn test_check_size_outcomes() {
        assert_eq!(check_size(&Size::from("25"), Some(25)), Ok(25));
        assert_eq!(
            check_size(&Size::from("abc"), Some(21)),
            Err(SizeError::NotANumber("\"abc\"".into()))
        );
        assert_eq!(check_size(&Size::from(0.0), None), Err(SizeError::NotPositive(0)));
        assert_eq!(check_size(&Size::from(-4.0), Some(0)), Err(SizeError::NotPositive(-4)));
        assert_eq!(check_size(&Size::from(8.0), None), Ok(8));
    }

    #[test]
    fn test_degraded_size() {
        assert_eq!(SizeError::NotANumber("x".into()).degraded_size(), None);
        assert_eq!(
            SizeError::TooSmall { size: 5, dimension: 21 }.degraded_size(),
            Some(5)
        );
    }

    #[test]
    fn test_reporter_forwards_messages() {
        let messages = Rc::new(RefCell::new(Vec::new()));
        let sink = messages.clone();
        let handler = ErrorHandler::new(move |message| sink.borrow_mut().push(message.to_string()));
        let mut reporter = Reporter::new(Some(&handler));
        reporter.report(SizeError::TooSmall { size: 5, dimension: 21 });
        reporter.report(EncodingError::DataTooLong {
            version: Some(Version::V02),
            ecl: Ecl::Q,
        });
        assert_eq!(reporter.reported(), 2);
        assert_eq!(
            *messages.borrow(),
            vec![
                "`size` is too small: 5 is less than the 21 modules of the symbol".to_string(),
                "cannot encode the data with version V2 and ECL Q: data too long".to_string(),
            ]
        );
    }

    #[test]
    fn test_reporter_without_handler_logs() {
        let mut reporter = Reporter::new(None);
        reporter.report(SizeError::NotPositive(0));
        assert_eq!(reporter.reported(), 1);
    }
}
