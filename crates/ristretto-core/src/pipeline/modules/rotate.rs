use tracing::debug;

use crate::error::Result;
use crate::pipeline::module::ProcessingModule;
use crate::pipeline::params::{ParamKind, ParamSchema, ParamValue, ResolvedParams};
use crate::raster::Raster;

const PARAMETERS: &[ParamSchema] = &[ParamSchema {
    name: "angle",
    kind: ParamKind::Int,
    description: "Rotation angle in degrees, clockwise (snapped to 0, 90, 180 or 270)",
    default: ParamValue::Int(0),
    min: None,
    max: None,
}];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuarterTurn {
    None,
    Clockwise,
    Half,
    CounterClockwise,
}

impl QuarterTurn {
    /// Normalise an angle modulo 360 and snap it to the nearest quarter turn
    /// (halves round to the even quarter, so 45 becomes 0 and 225 becomes 180).
    pub fn from_degrees(angle: i64) -> Self {
        let normalized = angle.rem_euclid(360);
        let quarters = (normalized as f64 / 90.0).round_ties_even() as i64;
        let snapped = (quarters * 90).rem_euclid(360);
        match snapped {
            90 => Self::Clockwise,
            180 => Self::Half,
            270 => Self::CounterClockwise,
            _ => Self::None,
        }
    }
}

/// Rotation in 90 degree steps. Angles that aren't a multiple of 90 are
/// snapped rather than rejected.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rotate;

impl Rotate {
    pub fn apply(&self, input: Raster, angle: i64) -> Result<Raster> {
        let turn = QuarterTurn::from_degrees(angle);
        if angle.rem_euclid(90) != 0 {
            debug!(angle, ?turn, "snapping rotation to quarter turn");
        }
        match turn {
            QuarterTurn::None => Ok(input),
            turn => rotate(&input, turn),
        }
    }
}

fn rotate(input: &Raster, turn: QuarterTurn) -> Result<Raster> {
    let (w, h) = (input.width, input.height);
    let (dst_w, dst_h) = match turn {
        QuarterTurn::Clockwise | QuarterTurn::CounterClockwise => (h, w),
        _ => (w, h),
    };

    let mut data = Vec::with_capacity(input.data.len());
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let (sx, sy) = match turn {
                QuarterTurn::Clockwise => (dy, h - 1 - dx),
                QuarterTurn::Half => (w - 1 - dx, h - 1 - dy),
                QuarterTurn::CounterClockwise => (w - 1 - dy, dx),
                QuarterTurn::None => (dx, dy),
            };
            data.extend_from_slice(input.pixel(sx, sy));
        }
    }
    Raster::from_data(dst_w, dst_h, input.channels, data)
}

impl ProcessingModule for Rotate {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn human_name(&self) -> &'static str {
        "Rotate"
    }

    fn description(&self) -> &'static str {
        "Rotate the image in 90-degree increments"
    }

    fn parameters(&self) -> &'static [ParamSchema] {
        PARAMETERS
    }

    fn process(&self, input: Raster, params: &ResolvedParams) -> Result<Raster> {
        self.apply(input, params.int("angle")?)
    }
}
