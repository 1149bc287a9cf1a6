use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::pipeline::module::ProcessingModule;
use crate::pipeline::params::{ParamKind, ParamSchema, ParamValue, ResolvedParams};
use crate::raster::Raster;

const PARAMETERS: &[ParamSchema] = &[ParamSchema {
    name: "kernel_size",
    kind: ParamKind::Int,
    description: "Size of the blur kernel (even sizes are rounded up to the next odd size)",
    default: ParamValue::Int(5),
    min: Some(ParamValue::Int(3)),
    max: Some(ParamValue::Int(31)),
}];

/// Mean filter over a square window, computed from a summed-area table.
///
/// Each channel is padded by `kernel_size / 2` with edge replication and
/// turned into an integral image once, after which every window sum is four
/// table lookups. Cost is O(width * height) per channel regardless of the
/// kernel size.
#[derive(Clone, Copy, Debug)]
pub struct BoxBlur {
    /// Blur channels on the rayon pool instead of one after another.
    pub parallel: bool,
}

impl Default for BoxBlur {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl BoxBlur {
    pub fn sequential() -> Self {
        Self { parallel: false }
    }

    /// Blur `input` with a `kernel_size` window. Even sizes are bumped to the
    /// next odd size so the window has a center pixel.
    pub fn apply(&self, input: &Raster, kernel_size: u32) -> Result<Raster> {
        input.validate()?;
        let kernel = odd_kernel(kernel_size);
        let (width, height) = (input.width as usize, input.height as usize);
        debug!(kernel, width, height, channels = input.channels, "box blur");

        let blur_channel = |c: usize| blur_plane(&input.plane(c), width, height, kernel);
        let planes: Vec<Vec<u8>> = if self.parallel && input.channels > 1 {
            (0..input.channels as usize)
                .into_par_iter()
                .map(blur_channel)
                .collect()
        } else {
            (0..input.channels as usize).map(blur_channel).collect()
        };

        Raster::from_planes(input.width, input.height, &planes)
    }
}

impl ProcessingModule for BoxBlur {
    fn name(&self) -> &'static str {
        "box_blur"
    }

    fn human_name(&self) -> &'static str {
        "Box Blur"
    }

    fn description(&self) -> &'static str {
        "Apply a box blur filter to the image"
    }

    fn parameters(&self) -> &'static [ParamSchema] {
        PARAMETERS
    }

    fn process(&self, input: Raster, params: &ResolvedParams) -> Result<Raster> {
        let kernel_size = params.int("kernel_size")?.clamp(1, u32::MAX as i64) as u32;
        self.apply(&input, kernel_size)
    }
}

fn odd_kernel(kernel_size: u32) -> usize {
    let k = kernel_size as usize;
    if k % 2 == 0 { k + 1 } else { k }
}

/// Build the summed-area table of the edge-padded plane.
///
/// The table has one extra leading row and column of zeros, so entry
/// `(y, x)` holds the sum of all padded samples above and left of it.
fn integral_table(plane: &[u8], width: usize, height: usize, pad: usize) -> Vec<u64> {
    let padded_w = width + 2 * pad;
    let padded_h = height + 2 * pad;
    let table_w = padded_w + 1;
    let mut table = vec![0u64; (padded_h + 1) * table_w];

    for py in 0..padded_h {
        let sy = py.saturating_sub(pad).min(height - 1);
        let src_row = &plane[sy * width..(sy + 1) * width];
        let mut row_sum = 0u64;
        for px in 0..padded_w {
            let sx = px.saturating_sub(pad).min(width - 1);
            row_sum += u64::from(src_row[sx]);
            table[(py + 1) * table_w + px + 1] = table[py * table_w + px + 1] + row_sum;
        }
    }
    table
}

fn blur_plane(plane: &[u8], width: usize, height: usize, kernel: usize) -> Vec<u8> {
    let pad = kernel / 2;
    let table = integral_table(plane, width, height, pad);
    let table_w = width + 2 * pad + 1;
    let area = (kernel * kernel) as u64;

    let mut out = Vec::with_capacity(width * height);
    for y1 in 0..height {
        let y2 = y1 + kernel;
        for x1 in 0..width {
            let x2 = x1 + kernel;
            let sum = (table[y2 * table_w + x2] + table[y1 * table_w + x1])
                - (table[y1 * table_w + x2] + table[y2 * table_w + x1]);
            out.push(((sum + area / 2) / area).min(255) as u8);
        }
    }
    out
}
