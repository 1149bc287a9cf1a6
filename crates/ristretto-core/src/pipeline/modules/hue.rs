use crate::color::{HUE_RANGE, bgr_to_hsv, hsv_to_bgr};
use crate::error::Result;
use crate::pipeline::module::ProcessingModule;
use crate::pipeline::params::{ParamKind, ParamSchema, ParamValue, ResolvedParams};
use crate::raster::Raster;

const PARAMETERS: &[ParamSchema] = &[ParamSchema {
    name: "shift",
    kind: ParamKind::Int,
    description: "Hue shift in degrees (-180 to 180)",
    default: ParamValue::Int(0),
    min: Some(ParamValue::Int(-180)),
    max: Some(ParamValue::Int(180)),
}];

#[derive(Clone, Copy, Debug, Default)]
pub struct Hue;

impl Hue {
    /// Rotate hue by `shift` degrees. The hue channel counts half-degrees,
    /// so the shift is halved and wrapped modulo 180. Single-channel rasters
    /// pass through unchanged.
    pub fn apply(&self, mut input: Raster, shift: i64) -> Raster {
        if shift == 0 || input.channels != 3 {
            return input;
        }

        let offset = shift as f32 / 2.0;
        for pixel in input.data.chunks_exact_mut(3) {
            let mut hsv = bgr_to_hsv(pixel[0], pixel[1], pixel[2]);
            hsv.h = (hsv.h + offset).rem_euclid(HUE_RANGE);
            pixel.copy_from_slice(&hsv_to_bgr(hsv));
        }
        input
    }
}

impl ProcessingModule for Hue {
    fn name(&self) -> &'static str {
        "hue"
    }

    fn human_name(&self) -> &'static str {
        "Hue"
    }

    fn description(&self) -> &'static str {
        "Shift the hue (color) of the image"
    }

    fn parameters(&self) -> &'static [ParamSchema] {
        PARAMETERS
    }

    fn process(&self, input: Raster, params: &ResolvedParams) -> Result<Raster> {
        let shift = params.int("shift")?;
        Ok(self.apply(input, shift))
    }
}
