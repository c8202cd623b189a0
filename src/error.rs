use enough::StopReason;

/// Errors from BMP probing and decoding.
///
/// No variant allocates; messages are static.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    /// Not a BMP, or a BMP whose header or offsets point outside the input.
    #[error("invalid image: {0}")]
    InvalidImage(&'static str),

    #[error("not enough space in output buffer: need {needed} bytes, got {actual}")]
    NotEnoughSpace { needed: usize, actual: usize },

    /// A well-formed BMP using planes, bit depth, or compression this decoder
    /// does not handle.
    #[error("unsupported BMP variant: {0}")]
    NotSupported(&'static str),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {what} {value} exceeds limit {limit}")]
    LimitExceeded {
        what: &'static str,
        value: u64,
        limit: u64,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
