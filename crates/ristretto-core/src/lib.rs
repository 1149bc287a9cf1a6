//! Image step pipelines over 8-bit BGR rasters.
//!
//! A [`Pipeline`] threads a [`Raster`] through an ordered list of
//! [`Invocation`]s, each naming a step held by the [`Registry`] (brightness,
//! saturation, hue, box blur, unsharp mask, crop, rotate) together with its
//! parameters.

pub mod codec;
pub mod color;
pub mod error;
pub mod pipeline;
pub mod raster;

pub use error::{Error, Result};
pub use pipeline::Pipeline;
pub use pipeline::invocation::{Invocation, parse_pipeline};
pub use pipeline::module::{ProcessingModule, Step};
pub use pipeline::params::{ParamKind, ParamSchema, ParamValue, ResolvedParams};
pub use pipeline::registry::{Registry, StepInfo};
pub use raster::Raster;
