use crate::error::BmpError;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Limits are checked against the
/// absolute image dimensions before any pixel is written.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BmpError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(BmpError::LimitExceeded {
                    what: "width",
                    value: u64::from(width),
                    limit: max_w,
                });
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(BmpError::LimitExceeded {
                    what: "height",
                    value: u64::from(height),
                    limit: max_h,
                });
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(BmpError::LimitExceeded {
                    what: "pixel count",
                    value: pixels,
                    limit: max_px,
                });
            }
        }
        Ok(())
    }
}
