use std::sync::Arc;

use crate::error::Result;
use crate::pipeline::module::ProcessingModule;
use crate::pipeline::modules::BoxBlur;
use crate::pipeline::params::{ParamKind, ParamSchema, ParamValue, ResolvedParams};
use crate::raster::Raster;

const PARAMETERS: &[ParamSchema] = &[
    ParamSchema {
        name: "strength",
        kind: ParamKind::Float,
        description: "Sharpening strength",
        default: ParamValue::Float(1.0),
        min: Some(ParamValue::Float(0.0)),
        max: Some(ParamValue::Float(5.0)),
    },
    ParamSchema {
        name: "blur_size",
        kind: ParamKind::Int,
        description: "Size of blur kernel for unsharp mask",
        default: ParamValue::Int(5),
        min: Some(ParamValue::Int(3)),
        max: Some(ParamValue::Int(21)),
    },
];

/// `out = image + strength * (image - box_blur(image))`.
///
/// Shares the registry's [`BoxBlur`] rather than owning a copy.
#[derive(Clone, Debug)]
pub struct UnsharpMask {
    blur: Arc<BoxBlur>,
}

impl UnsharpMask {
    pub fn new(blur: Arc<BoxBlur>) -> Self {
        Self { blur }
    }

    pub fn blur(&self) -> &Arc<BoxBlur> {
        &self.blur
    }

    pub fn apply(&self, mut input: Raster, strength: f32, blur_size: u32) -> Result<Raster> {
        if strength == 0.0 {
            return Ok(input);
        }

        let blurred = self.blur.apply(&input, blur_size)?;
        for (v, &b) in input.data.iter_mut().zip(&blurred.data) {
            let orig = *v as f32;
            let diff = orig - b as f32;
            *v = (orig + strength * diff).round().clamp(0.0, 255.0) as u8;
        }
        Ok(input)
    }
}

impl ProcessingModule for UnsharpMask {
    fn name(&self) -> &'static str {
        "unsharp_mask"
    }

    fn human_name(&self) -> &'static str {
        "Unsharp Mask"
    }

    fn description(&self) -> &'static str {
        "Sharpen the image using unsharp mask technique"
    }

    fn parameters(&self) -> &'static [ParamSchema] {
        PARAMETERS
    }

    fn process(&self, input: Raster, params: &ResolvedParams) -> Result<Raster> {
        let strength = params.float("strength")? as f32;
        let blur_size = params.int("blur_size")?.clamp(1, u32::MAX as i64) as u32;
        self.apply(input, strength, blur_size)
    }
}
