use crate::error::Result;
use crate::pipeline::module::ProcessingModule;
use crate::pipeline::params::{ParamKind, ParamSchema, ParamValue, ResolvedParams};
use crate::raster::Raster;

const PARAMETERS: &[ParamSchema] = &[ParamSchema {
    name: "factor",
    kind: ParamKind::Float,
    description: "Brightness factor (0.0 = black, 1.0 = original, 2.0 = twice as bright)",
    default: ParamValue::Float(1.0),
    min: Some(ParamValue::Float(0.0)),
    max: Some(ParamValue::Float(3.0)),
}];

#[derive(Clone, Copy, Debug, Default)]
pub struct Brightness;

impl Brightness {
    pub fn apply(&self, mut input: Raster, factor: f32) -> Raster {
        if factor == 1.0 {
            return input;
        }
        for v in &mut input.data {
            *v = (*v as f32 * factor).round().clamp(0.0, 255.0) as u8;
        }
        input
    }
}

impl ProcessingModule for Brightness {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn human_name(&self) -> &'static str {
        "Brightness"
    }

    fn description(&self) -> &'static str {
        "Adjust the brightness of the image"
    }

    fn parameters(&self) -> &'static [ParamSchema] {
        PARAMETERS
    }

    fn process(&self, input: Raster, params: &ResolvedParams) -> Result<Raster> {
        let factor = params.float("factor")? as f32;
        Ok(self.apply(input, factor))
    }
}
