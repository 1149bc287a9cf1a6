use crate::error::{Error, Result};

/// 8-bit raster buffer.
///
/// Samples are stored interleaved, row-major and contiguous. Three-channel
/// rasters use blue-green-red order (BGRBGR...); single-channel rasters hold
/// luma only. Every step receives and returns a buffer that satisfies
/// [`Raster::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    /// 1 (grayscale) or 3 (BGR).
    pub channels: u32,
    /// Flat sample data: [B, G, R, B, G, R, ...] or [Y, Y, ...].
    pub data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, channels: u32) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0; width as usize * height as usize * channels as usize],
        }
    }

    pub fn from_data(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        let raster = Self {
            width,
            height,
            channels,
            data,
        };
        raster.validate()?;
        Ok(raster)
    }

    /// A raster where every pixel equals `pixel`; the channel count is
    /// taken from its length.
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Result<Self> {
        let count = width as usize * height as usize;
        Self::from_data(width, height, pixel.len() as u32, pixel.repeat(count))
    }

    /// Check the layout invariant: supported channel count, non-zero area,
    /// and a buffer of exactly `width * height * channels` samples.
    pub fn validate(&self) -> Result<()> {
        if self.channels != 1 && self.channels != 3 {
            return Err(Error::malformed(format!(
                "expected 1 or 3 channels, got {}",
                self.channels
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::malformed(format!(
                "raster has zero area ({}x{})",
                self.width, self.height
            )));
        }
        let expected = self.sample_count();
        if self.data.len() != expected {
            return Err(Error::malformed(format!(
                "expected {expected} samples for {}x{}x{}, got {}",
                self.width,
                self.height,
                self.channels,
                self.data.len()
            )));
        }
        Ok(())
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn sample_count(&self) -> usize {
        self.pixel_count() * self.channels as usize
    }

    /// Samples per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels as usize;
        let idx = y as usize * self.stride() + x as usize * c;
        &self.data[idx..idx + c]
    }

    /// Copy one channel out into its own contiguous plane.
    pub fn plane(&self, channel: usize) -> Vec<u8> {
        self.data
            .iter()
            .skip(channel)
            .step_by(self.channels as usize)
            .copied()
            .collect()
    }

    /// Interleave equally sized planes back into a raster.
    pub fn from_planes(width: u32, height: u32, planes: &[Vec<u8>]) -> Result<Self> {
        let count = width as usize * height as usize;
        if let Some(bad) = planes.iter().find(|p| p.len() != count) {
            return Err(Error::malformed(format!(
                "plane has {} samples, expected {count}",
                bad.len()
            )));
        }
        let mut data = Vec::with_capacity(count * planes.len());
        for i in 0..count {
            data.extend(planes.iter().map(|p| p[i]));
        }
        Self::from_data(width, height, planes.len() as u32, data)
    }
}
