use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Int,
    Float,
}

/// A resolved parameter value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
}

impl ParamValue {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

/// Declaration of one step parameter. Attached to the step, not to an
/// invocation; serialises into the shape introspection callers consume.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ParamSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub description: &'static str,
    pub default: ParamValue,
    #[serde(rename = "min_value", skip_serializing_if = "Option::is_none")]
    pub min: Option<ParamValue>,
    #[serde(rename = "max_value", skip_serializing_if = "Option::is_none")]
    pub max: Option<ParamValue>,
}

/// Parameters after defaults, coercion and bounds checks.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedParams {
    step: String,
    values: BTreeMap<&'static str, ParamValue>,
}

impl ResolvedParams {
    pub fn new(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &'static str, value: ParamValue) -> Self {
        self.values.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied()
    }

    pub fn float(&self, name: &str) -> Result<f64> {
        self.require(name).map(ParamValue::as_f64)
    }

    pub fn int(&self, name: &str) -> Result<i64> {
        match self.require(name)? {
            ParamValue::Int(v) => Ok(v),
            ParamValue::Float(v) => Err(Error::invalid_parameter(
                &self.step,
                name,
                format!("expected an integer, got {v}"),
            )),
        }
    }

    fn require(&self, name: &str) -> Result<ParamValue> {
        self.get(name)
            .ok_or_else(|| Error::invalid_parameter(&self.step, name, "missing value"))
    }
}

/// Resolve caller-supplied values against a step's schema.
///
/// Missing parameters take their default. Unknown names, non-numeric values,
/// fractional values for integer parameters and anything outside the declared
/// bounds are rejected.
pub fn resolve(
    step: &str,
    schema: &[ParamSchema],
    supplied: &Map<String, Value>,
) -> Result<ResolvedParams> {
    if let Some(unknown) = supplied
        .keys()
        .find(|key| !schema.iter().any(|p| p.name == key.as_str()))
    {
        return Err(Error::invalid_parameter(step, unknown, "unknown parameter"));
    }

    let mut resolved = ResolvedParams::new(step);
    for param in schema {
        let value = match supplied.get(param.name) {
            Some(raw) => coerce(step, param, raw)?,
            None => param.default,
        };
        check_bounds(step, param, value)?;
        resolved.values.insert(param.name, value);
    }
    Ok(resolved)
}

fn coerce(step: &str, param: &ParamSchema, raw: &Value) -> Result<ParamValue> {
    let Value::Number(n) = raw else {
        return Err(Error::invalid_parameter(
            step,
            param.name,
            format!("expected a number, got {raw}"),
        ));
    };

    match param.kind {
        ParamKind::Float => n.as_f64().map(ParamValue::Float).ok_or_else(|| {
            Error::invalid_parameter(step, param.name, format!("not representable: {n}"))
        }),
        ParamKind::Int => {
            if let Some(v) = n.as_i64() {
                return Ok(ParamValue::Int(v));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    Ok(ParamValue::Int(f as i64))
                }
                _ => Err(Error::invalid_parameter(
                    step,
                    param.name,
                    format!("expected an integer, got {n}"),
                )),
            }
        }
    }
}

fn check_bounds(step: &str, param: &ParamSchema, value: ParamValue) -> Result<()> {
    let v = value.as_f64();
    if let Some(min) = param.min.map(ParamValue::as_f64).filter(|min| v < *min) {
        return Err(Error::invalid_parameter(
            step,
            param.name,
            format!("must be >= {min}, got {v}"),
        ));
    }
    if let Some(max) = param.max.map(ParamValue::as_f64).filter(|max| v > *max) {
        return Err(Error::invalid_parameter(
            step,
            param.name,
            format!("must be <= {max}, got {v}"),
        ));
    }
    Ok(())
}
