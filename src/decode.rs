use enough::{Stop, Unstoppable};

use crate::bmp::{self, DecodeSettings, Permissiveness};
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::{AlphaHandling, PixelLayout};

/// Result of a successful decode. The pixels live in the caller's buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOutput {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
}

impl DecodeOutput {
    /// Number of bytes written to the front of the output buffer.
    pub fn bytes_written(&self) -> usize {
        self.width as usize * self.height as usize * self.layout.bytes_per_pixel()
    }
}

/// Decode a BMP into `out` as top-down RGBA8, with default options.
///
/// `out` must hold at least [`crate::required_output_size`] bytes; only that
/// many are written.
pub fn decode(data: &[u8], out: &mut [u8]) -> Result<DecodeOutput, BmpError> {
    DecodeRequest::new(data).decode_into(out, Unstoppable)
}

/// Configurable BMP decode.
///
/// ```
/// use ezbmp::{DecodeRequest, Limits, PixelLayout, Unstoppable};
///
/// # fn run(data: &[u8]) -> Result<(), ezbmp::BmpError> {
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let request = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_layout(PixelLayout::Bgra8);
/// let mut out = vec![0u8; request.output_size()];
/// let decoded = request.decode_into(&mut out, Unstoppable)?;
/// println!("{}x{}", decoded.width, decoded.height);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    settings: DecodeSettings,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            settings: DecodeSettings::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Output byte order. Defaults to [`PixelLayout::Rgba8`].
    pub fn with_layout(mut self, layout: PixelLayout) -> Self {
        self.settings.layout = layout;
        self
    }

    /// Alpha handling for uncompressed 32-bit images. Defaults to
    /// [`AlphaHandling::ForceOpaque`].
    pub fn with_alpha(mut self, alpha: AlphaHandling) -> Self {
        self.settings.alpha = alpha;
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.settings.permissiveness = permissiveness;
        self
    }

    /// Bytes the output buffer needs, or 0 if the input is not a BMP.
    pub fn output_size(&self) -> usize {
        bmp::required_output_size(self.data)
    }

    /// Decode into the front of `out`, returning the resolved dimensions.
    ///
    /// Every error except [`BmpError::Cancelled`] is reported before anything
    /// is written. Cancellation can stop the decode after some rows.
    pub fn decode_into(&self, out: &mut [u8], stop: impl Stop) -> Result<DecodeOutput, BmpError> {
        bmp::decode_into(self.data, out, &self.settings, self.limits, &stop)
    }

    /// Decode into typed RGBA pixels. The configured layout is ignored.
    #[cfg(feature = "rgb")]
    pub fn decode_into_rgba(
        &self,
        out: &mut [rgb::RGBA8],
        stop: impl Stop,
    ) -> Result<DecodeOutput, BmpError> {
        use rgb::ComponentBytes as _;

        let settings = DecodeSettings {
            layout: PixelLayout::Rgba8,
            ..self.settings
        };
        bmp::decode_into(self.data, out.as_bytes_mut(), &settings, self.limits, &stop)
    }
}
