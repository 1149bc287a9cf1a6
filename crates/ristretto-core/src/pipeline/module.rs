use std::sync::Arc;

use crate::error::Result;
use crate::pipeline::modules::{BoxBlur, Brightness, Crop, Hue, Rotate, Saturation, UnsharpMask};
use crate::pipeline::params::{ParamSchema, ResolvedParams};
use crate::raster::Raster;

/// A single step in the processing pipeline.
pub trait ProcessingModule: Send + Sync {
    /// Symbolic name used in pipeline documents.
    fn name(&self) -> &'static str;
    fn human_name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn parameters(&self) -> &'static [ParamSchema];
    /// Transform `input`. The buffer is owned by the pipeline's working copy,
    /// so steps are free to modify it in place.
    fn process(&self, input: Raster, params: &ResolvedParams) -> Result<Raster>;
}

/// The closed set of steps the registry can hold.
#[derive(Clone, Debug)]
pub enum Step {
    Brightness(Brightness),
    Saturation(Saturation),
    Hue(Hue),
    BoxBlur(Arc<BoxBlur>),
    UnsharpMask(UnsharpMask),
    Crop(Crop),
    Rotate(Rotate),
}

impl Step {
    fn module(&self) -> &dyn ProcessingModule {
        match self {
            Self::Brightness(m) => m,
            Self::Saturation(m) => m,
            Self::Hue(m) => m,
            Self::BoxBlur(m) => m.as_ref(),
            Self::UnsharpMask(m) => m,
            Self::Crop(m) => m,
            Self::Rotate(m) => m,
        }
    }
}

impl ProcessingModule for Step {
    fn name(&self) -> &'static str {
        self.module().name()
    }

    fn human_name(&self) -> &'static str {
        self.module().human_name()
    }

    fn description(&self) -> &'static str {
        self.module().description()
    }

    fn parameters(&self) -> &'static [ParamSchema] {
        self.module().parameters()
    }

    fn process(&self, input: Raster, params: &ResolvedParams) -> Result<Raster> {
        self.module().process(input, params)
    }
}
