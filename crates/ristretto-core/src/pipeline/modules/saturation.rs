use crate::color::{bgr_to_hsv, hsv_to_bgr};
use crate::error::Result;
use crate::pipeline::module::ProcessingModule;
use crate::pipeline::params::{ParamKind, ParamSchema, ParamValue, ResolvedParams};
use crate::raster::Raster;

const PARAMETERS: &[ParamSchema] = &[ParamSchema {
    name: "factor",
    kind: ParamKind::Float,
    description: "Saturation factor (0.0 = grayscale, 1.0 = original, 2.0 = double saturation)",
    default: ParamValue::Float(1.0),
    min: Some(ParamValue::Float(0.0)),
    max: Some(ParamValue::Float(3.0)),
}];

#[derive(Clone, Copy, Debug, Default)]
pub struct Saturation;

impl Saturation {
    /// Scale HSV saturation by `factor`. Single-channel rasters carry no
    /// chroma and pass through unchanged.
    pub fn apply(&self, mut input: Raster, factor: f32) -> Raster {
        if factor == 1.0 || input.channels != 3 {
            return input;
        }

        for pixel in input.data.chunks_exact_mut(3) {
            let mut hsv = bgr_to_hsv(pixel[0], pixel[1], pixel[2]);
            hsv.s = (hsv.s * factor).min(255.0);
            pixel.copy_from_slice(&hsv_to_bgr(hsv));
        }
        input
    }
}

impl ProcessingModule for Saturation {
    fn name(&self) -> &'static str {
        "saturation"
    }

    fn human_name(&self) -> &'static str {
        "Saturation"
    }

    fn description(&self) -> &'static str {
        "Adjust the color saturation of the image"
    }

    fn parameters(&self) -> &'static [ParamSchema] {
        PARAMETERS
    }

    fn process(&self, input: Raster, params: &ResolvedParams) -> Result<Raster> {
        let factor = params.float("factor")? as f32;
        Ok(self.apply(input, factor))
    }
}
