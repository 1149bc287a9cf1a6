use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::pipeline::module::{ProcessingModule, Step};
use crate::pipeline::modules::{BoxBlur, Brightness, Crop, Hue, Rotate, Saturation, UnsharpMask};
use crate::pipeline::params::ParamSchema;

static STANDARD: LazyLock<Registry> = LazyLock::new(Registry::standard);

/// Introspection record for one registered step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepInfo {
    #[serde(skip)]
    pub symbolic_name: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [ParamSchema],
}

/// Step definitions keyed by symbolic name.
///
/// Built once, then shared read-only. Registration order is kept for
/// introspection; re-registering a name replaces the definition in place.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    order: Vec<&'static str>,
    steps: HashMap<&'static str, Step>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry holding the standard steps.
    pub fn global() -> &'static Registry {
        &STANDARD
    }

    /// brightness, saturation, hue, box_blur, unsharp_mask, crop, rotate.
    pub fn standard() -> Self {
        let blur = Arc::new(BoxBlur::default());
        let mut registry = Self::new();
        registry.register(Step::Brightness(Brightness));
        registry.register(Step::Saturation(Saturation));
        registry.register(Step::Hue(Hue));
        registry.register(Step::BoxBlur(Arc::clone(&blur)));
        registry.register(Step::UnsharpMask(UnsharpMask::new(blur)));
        registry.register(Step::Crop(Crop));
        registry.register(Step::Rotate(Rotate));
        registry
    }

    /// Add a step. A step with the same name is replaced (last write wins).
    pub fn register(&mut self, step: Step) {
        let name = step.name();
        if self.steps.insert(name, step).is_none() {
            self.order.push(name);
        }
    }

    pub fn resolve(&self, name: &str) -> Result<&Step> {
        self.steps.get(name).ok_or_else(|| Error::unknown_step(name))
    }

    pub fn names(&self) -> &[&'static str] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Describe every step in registration order. No image data involved.
    pub fn describe_all(&self) -> Vec<StepInfo> {
        self.order
            .iter()
            .filter_map(|name| self.steps.get(name))
            .map(|step| StepInfo {
                symbolic_name: step.name(),
                name: step.human_name(),
                description: step.description(),
                parameters: step.parameters(),
            })
            .collect()
    }

    /// Introspection as a JSON object keyed by symbolic name.
    pub fn describe_json(&self) -> serde_json::Result<serde_json::Value> {
        let mut map = serde_json::Map::new();
        for info in self.describe_all() {
            let value = serde_json::to_value(&info)?;
            map.insert(info.symbolic_name.to_string(), value);
        }
        Ok(serde_json::Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_order() {
        let registry = Registry::standard();
        assert_eq!(
            registry.names(),
            &[
                "brightness",
                "saturation",
                "hue",
                "box_blur",
                "unsharp_mask",
                "crop",
                "rotate",
            ]
        );
    }

    #[test]
    fn resolve_unknown_fails() {
        let err = Registry::standard().resolve("sepia").unwrap_err();
        assert!(matches!(err, Error::UnknownStep { ref name } if name == "sepia"));
    }

    #[test]
    fn resolve_known_step() {
        let registry = Registry::standard();
        let step = registry.resolve("box_blur").unwrap();
        assert_eq!(step.name(), "box_blur");
        assert_eq!(step.human_name(), "Box Blur");
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = Registry::new();
        registry.register(Step::BoxBlur(Arc::new(BoxBlur::default())));
        registry.register(Step::Crop(Crop));
        registry.register(Step::BoxBlur(Arc::new(BoxBlur::sequential())));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), &["box_blur", "crop"]);
        match registry.resolve("box_blur").unwrap() {
            Step::BoxBlur(blur) => assert!(!blur.parallel),
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn unsharp_mask_shares_registry_blur() {
        let registry = Registry::standard();
        let (Step::BoxBlur(blur), Step::UnsharpMask(mask)) = (
            registry.resolve("box_blur").unwrap(),
            registry.resolve("unsharp_mask").unwrap(),
        ) else {
            panic!("unexpected step variants");
        };
        assert!(Arc::ptr_eq(blur, mask.blur()));
    }

    #[test]
    fn describe_all_lists_parameters() {
        let infos = Registry::standard().describe_all();
        assert_eq!(infos.len(), 7);
        let crop = infos.iter().find(|i| i.symbolic_name == "crop").unwrap();
        let names: Vec<_> = crop.parameters.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["x", "y", "width", "height"]);
    }

    #[test]
    fn describe_json_shape() {
        let json = Registry::standard().describe_json().unwrap();
        let blur = &json["box_blur"];
        assert_eq!(blur["name"], "Box Blur");
        assert_eq!(blur["description"], "Apply a box blur filter to the image");
        let param = &blur["parameters"][0];
        assert_eq!(param["name"], "kernel_size");
        assert_eq!(param["type"], "int");
        assert_eq!(param["default"], 5);
        assert_eq!(param["min_value"], 3);
        assert_eq!(param["max_value"], 31);

        let rotate = &json["rotate"]["parameters"][0];
        assert!(rotate.get("min_value").is_none());
        assert!(rotate.get("max_value").is_none());

        let brightness = &json["brightness"]["parameters"][0];
        assert_eq!(brightness["type"], "float");
        assert_eq!(brightness["default"], 1.0);
    }

    #[test]
    fn describe_json_keeps_every_registered_step() {
        let registry = Registry::standard();
        let json = registry.describe_json().unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), registry.len());
        for name in registry.names() {
            assert!(keys.contains(name), "missing {name}");
        }
    }

    #[test]
    fn global_is_built_once() {
        assert!(std::ptr::eq(Registry::global(), Registry::global()));
        assert_eq!(Registry::global().len(), 7);
    }
}
