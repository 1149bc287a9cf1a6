use crate::error::{Error, Result};
use crate::pipeline::module::ProcessingModule;
use crate::pipeline::params::{ParamKind, ParamSchema, ParamValue, ResolvedParams};
use crate::raster::Raster;

const PARAMETERS: &[ParamSchema] = &[
    ParamSchema {
        name: "x",
        kind: ParamKind::Int,
        description: "X coordinate of top-left corner",
        default: ParamValue::Int(0),
        min: None,
        max: None,
    },
    ParamSchema {
        name: "y",
        kind: ParamKind::Int,
        description: "Y coordinate of top-left corner",
        default: ParamValue::Int(0),
        min: None,
        max: None,
    },
    ParamSchema {
        name: "width",
        kind: ParamKind::Int,
        description: "Width of crop region",
        default: ParamValue::Int(100),
        min: Some(ParamValue::Int(1)),
        max: None,
    },
    ParamSchema {
        name: "height",
        kind: ParamKind::Int,
        description: "Height of crop region",
        default: ParamValue::Int(100),
        min: Some(ParamValue::Int(1)),
        max: None,
    },
];

#[derive(Clone, Copy, Debug, Default)]
pub struct Crop;

impl Crop {
    /// Copy out the requested rectangle.
    ///
    /// The origin is clamped onto the image (an origin past the border
    /// collapses to the nearest edge pixel) and the far corner is clipped to
    /// the image bounds. A rectangle that ends up with no area is an error.
    pub fn apply(&self, input: &Raster, x: i64, y: i64, width: i64, height: i64) -> Result<Raster> {
        input.validate()?;
        let (img_w, img_h) = (i64::from(input.width), i64::from(input.height));
        let x0 = x.clamp(0, img_w - 1);
        let y0 = y.clamp(0, img_h - 1);
        let x1 = x0.saturating_add(width).min(img_w);
        let y1 = y0.saturating_add(height).min(img_h);

        if x1 <= x0 || y1 <= y0 {
            return Err(Error::EmptyRegion {
                step: self.name().to_string(),
                width: (x1 - x0).max(0) as u32,
                height: (y1 - y0).max(0) as u32,
            });
        }

        let (dst_w, dst_h) = ((x1 - x0) as u32, (y1 - y0) as u32);
        let c = input.channels as usize;
        let stride = input.stride();
        let mut data = Vec::with_capacity(dst_w as usize * dst_h as usize * c);
        for row in y0 as usize..y1 as usize {
            let row_start = row * stride + x0 as usize * c;
            let row_end = row_start + dst_w as usize * c;
            data.extend_from_slice(&input.data[row_start..row_end]);
        }

        Raster::from_data(dst_w, dst_h, input.channels, data)
    }
}

impl ProcessingModule for Crop {
    fn name(&self) -> &'static str {
        "crop"
    }

    fn human_name(&self) -> &'static str {
        "Crop"
    }

    fn description(&self) -> &'static str {
        "Crop the image to a specified region"
    }

    fn parameters(&self) -> &'static [ParamSchema] {
        PARAMETERS
    }

    fn process(&self, input: Raster, params: &ResolvedParams) -> Result<Raster> {
        self.apply(
            &input,
            params.int("x")?,
            params.int("y")?,
            params.int("width")?,
            params.int("height")?,
        )
    }
}
