pub mod invocation;
pub mod module;
pub mod modules;
pub mod params;
pub mod registry;

use std::path::Path;

use tracing::{debug, info};

use crate::codec;
use crate::error::Result;
use crate::raster::Raster;
use invocation::Invocation;
use module::{ProcessingModule, Step};
use params::ResolvedParams;
use registry::Registry;

/// Runs an ordered list of step invocations over a raster.
///
/// ```text
/// input -> step 1 -> step 2 -> ... -> step N -> output
/// ```
///
/// Every invocation is resolved against the registry and its parameters are
/// validated before any pixel work starts, so a bad entry anywhere aborts
/// the whole run without a partial result. The caller's raster is copied
/// once into a working buffer; each step consumes the buffer and hands back
/// its replacement.
#[derive(Clone, Copy, Debug)]
pub struct Pipeline<'r> {
    registry: &'r Registry,
}

impl<'r> Pipeline<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Resolve every invocation to a step and validated parameters.
    pub fn plan(&self, invocations: &[Invocation]) -> Result<Vec<(&'r Step, ResolvedParams)>> {
        invocations
            .iter()
            .map(|inv| {
                let step = self.registry.resolve(&inv.step)?;
                let params = params::resolve(step.name(), step.parameters(), &inv.params)?;
                Ok((step, params))
            })
            .collect()
    }

    /// Run the pipeline. `image` is left untouched.
    pub fn process(&self, image: &Raster, invocations: &[Invocation]) -> Result<Raster> {
        image.validate()?;
        let plan = self.plan(invocations)?;

        let mut current = image.clone();
        for (step, params) in &plan {
            debug!(step = step.name(), ?params, "processing");
            current = step.process(current, params)?;
            current.validate()?;
        }
        Ok(current)
    }

    /// Decode `input`, run the pipeline, and encode the result to `output`
    /// when one is given.
    pub fn process_file(
        &self,
        input: &Path,
        invocations: &[Invocation],
        output: Option<&Path>,
    ) -> Result<Raster> {
        let t0 = std::time::Instant::now();
        let image = codec::load_raster(input)?;
        let result = self.process(&image, invocations)?;
        info!(
            elapsed_ms = t0.elapsed().as_millis(),
            steps = invocations.len(),
            width = result.width,
            height = result.height,
            "pipeline finished"
        );
        if let Some(path) = output {
            codec::save_raster(&result, path)?;
        }
        Ok(result)
    }
}

impl Default for Pipeline<'static> {
    fn default() -> Self {
        Self::new(Registry::global())
    }
}
