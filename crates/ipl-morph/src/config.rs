//! Stage configuration
//!
//! The host application keeps stage settings in a key/value property store.
//! [`MorphologyConfig::from_properties`] reads that store through the
//! [`PropertySource`] trait; [`PropertyMap`] is the in-memory store used by
//! tests and by hosts that keep settings as JSON.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::binary::{BorderPolicy, MorphParams};
use crate::operation::MorphOp;
use crate::{MorphError, MorphResult, Sel};

/// Property key of the kernel weights (row-major, `> 0` is active).
pub const KEY_KERNEL: &str = "kernel";
/// Property key of the iteration count.
pub const KEY_ITERATIONS: &str = "iterations";
/// Property key of the operation (host index or name).
pub const KEY_OPERATION: &str = "operation";
/// Property key of the border policy name.
pub const KEY_BORDER: &str = "border";

/// Slider range the host offers for iterations. Advisory only.
pub const ITERATIONS_HINT: RangeInclusive<u32> = 1..=16;

/// Read access to a host property store.
pub trait PropertySource {
    /// Whether `key` is present at all, whatever its type.
    fn contains(&self, key: &str) -> bool;

    /// Integer value of `key`.
    fn int(&self, key: &str) -> Option<i64>;

    /// Integer-list value of `key`.
    fn int_vec(&self, key: &str) -> Option<Vec<i64>>;

    /// Text value of `key`.
    fn text(&self, key: &str) -> Option<String>;
}

/// A single property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Int(i64),
    IntList(Vec<i64>),
    Text(String),
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<Vec<i64>> for PropertyValue {
    fn from(v: Vec<i64>) -> Self {
        PropertyValue::IntList(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_string())
    }
}

/// In-memory property store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap {
    values: BTreeMap<String, PropertyValue>,
}

impl PropertyMap {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<PropertyValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Builder form of [`PropertyMap::set`].
    pub fn with(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Raw value of `key`.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for PropertyMap {
    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn int(&self, key: &str) -> Option<i64> {
        match self.values.get(key)? {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    fn int_vec(&self, key: &str) -> Option<Vec<i64>> {
        match self.values.get(key)? {
            PropertyValue::IntList(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn text(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            PropertyValue::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> MorphError {
    MorphError::InvalidProperty {
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Settings of one morphology stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyConfig {
    /// Row-major kernel weights; values `> 0` are active.
    pub kernel: Vec<i32>,
    /// Number of iterations (at least 1)
    pub iterations: u32,
    /// Operation to run
    pub operation: MorphOp,
    /// Border handling
    pub border: BorderPolicy,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        MorphologyConfig {
            kernel: Sel::default().to_weights(),
            iterations: 1,
            operation: MorphOp::default(),
            border: BorderPolicy::default(),
        }
    }
}

impl MorphologyConfig {
    /// Read a configuration from a host property store.
    ///
    /// Missing keys keep their defaults. A key that is present but has the
    /// wrong type or an unusable value is an error.
    pub fn from_properties<P: PropertySource + ?Sized>(props: &P) -> MorphResult<Self> {
        let mut config = MorphologyConfig::default();

        if let Some(weights) = props.int_vec(KEY_KERNEL) {
            config.kernel = weights
                .into_iter()
                .map(|w| {
                    i32::try_from(w).map_err(|_| invalid(KEY_KERNEL, format!("weight {w} out of range")))
                })
                .collect::<MorphResult<_>>()?;
            Sel::from_weights(&config.kernel).map_err(|e| invalid(KEY_KERNEL, e.to_string()))?;
        } else if props.contains(KEY_KERNEL) {
            return Err(invalid(KEY_KERNEL, "expected a list of integers"));
        } else {
            debug!(key = KEY_KERNEL, "property missing, using default");
        }

        if let Some(n) = props.int(KEY_ITERATIONS) {
            config.iterations = u32::try_from(n)
                .ok()
                .filter(|&n| n >= 1)
                .ok_or_else(|| invalid(KEY_ITERATIONS, format!("{n} is not a positive count")))?;
        } else if props.contains(KEY_ITERATIONS) {
            return Err(invalid(KEY_ITERATIONS, "expected an integer"));
        } else {
            debug!(key = KEY_ITERATIONS, "property missing, using default");
        }

        if let Some(index) = props.int(KEY_OPERATION) {
            config.operation =
                MorphOp::from_index(index).map_err(|e| invalid(KEY_OPERATION, e.to_string()))?;
        } else if let Some(name) = props.text(KEY_OPERATION) {
            config.operation = name
                .parse::<MorphOp>()
                .map_err(|e: MorphError| invalid(KEY_OPERATION, e.to_string()))?;
        } else if props.contains(KEY_OPERATION) {
            return Err(invalid(KEY_OPERATION, "expected an index or a name"));
        } else {
            debug!(key = KEY_OPERATION, "property missing, using default");
        }

        if let Some(name) = props.text(KEY_BORDER) {
            config.border = name
                .parse::<BorderPolicy>()
                .map_err(|e: MorphError| invalid(KEY_BORDER, e.to_string()))?;
        } else if props.contains(KEY_BORDER) {
            return Err(invalid(KEY_BORDER, "expected a policy name"));
        }

        Ok(config)
    }

    /// Check the kernel shape and iteration count.
    pub fn validate(&self) -> MorphResult<()> {
        self.sel()?;
        if self.iterations == 0 {
            return Err(MorphError::InvalidParameters(
                "iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Kernel as a boolean mask.
    pub fn mask(&self) -> Vec<bool> {
        self.kernel.iter().map(|&w| w > 0).collect()
    }

    /// Kernel as a structuring element.
    pub fn sel(&self) -> MorphResult<Sel> {
        Sel::from_weights(&self.kernel)
    }

    /// Iterations and border policy as operator parameters.
    pub fn params(&self) -> MorphParams {
        MorphParams::new(self.iterations).with_border(self.border)
    }

    /// Write this configuration back to a property map.
    pub fn to_properties(&self) -> PropertyMap {
        PropertyMap::new()
            .with(
                KEY_KERNEL,
                self.kernel.iter().map(|&w| i64::from(w)).collect::<Vec<_>>(),
            )
            .with(KEY_ITERATIONS, i64::from(self.iterations))
            .with(KEY_OPERATION, self.operation.index())
            .with(KEY_BORDER, self.border.to_string().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MorphologyConfig::default();
        assert_eq!(config.kernel, vec![0, 0, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(config.iterations, 1);
        assert_eq!(config.operation, MorphOp::Dilate);
        assert_eq!(config.border, BorderPolicy::Aligned);
        assert!(config.validate().is_ok());
        assert!(ITERATIONS_HINT.contains(&config.iterations));
    }

    #[test]
    fn test_from_empty_properties() {
        let config = MorphologyConfig::from_properties(&PropertyMap::new()).unwrap();
        assert_eq!(config, MorphologyConfig::default());
    }

    #[test]
    fn test_from_properties() {
        let props = PropertyMap::new()
            .with(KEY_KERNEL, vec![0i64, 1, 0, 1, 1, 1, 0, 1, 0])
            .with(KEY_ITERATIONS, 3i64)
            .with(KEY_OPERATION, 2i64)
            .with(KEY_BORDER, "packed");
        let config = MorphologyConfig::from_properties(&props).unwrap();
        assert_eq!(config.operation, MorphOp::Open);
        assert_eq!(config.iterations, 3);
        assert_eq!(config.border, BorderPolicy::Packed);
        assert_eq!(config.sel().unwrap(), Sel::create_cross(3).unwrap());
        assert_eq!(config.params(), MorphParams::new(3).with_border(BorderPolicy::Packed));
    }

    #[test]
    fn test_operation_by_name() {
        let props = PropertyMap::new().with(KEY_OPERATION, "Closing");
        let config = MorphologyConfig::from_properties(&props).unwrap();
        assert_eq!(config.operation, MorphOp::Close);
    }

    #[test]
    fn test_invalid_properties() {
        let cases = [
            PropertyMap::new().with(KEY_KERNEL, vec![1i64; 10]),
            PropertyMap::new().with(KEY_KERNEL, vec![1i64; 4]),
            PropertyMap::new().with(KEY_KERNEL, "3x3"),
            PropertyMap::new().with(KEY_KERNEL, vec![1i64, 1, 1, 1, i64::MAX, 1, 1, 1, 1]),
            PropertyMap::new().with(KEY_ITERATIONS, 0i64),
            PropertyMap::new().with(KEY_ITERATIONS, -2i64),
            PropertyMap::new().with(KEY_ITERATIONS, "many"),
            PropertyMap::new().with(KEY_OPERATION, 4i64),
            PropertyMap::new().with(KEY_OPERATION, "thin"),
            PropertyMap::new().with(KEY_OPERATION, vec![1i64]),
            PropertyMap::new().with(KEY_BORDER, "wrap"),
            PropertyMap::new().with(KEY_BORDER, 1i64),
        ];
        for props in &cases {
            let err = MorphologyConfig::from_properties(props).unwrap_err();
            assert!(
                matches!(err, MorphError::InvalidProperty { .. }),
                "{props:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_validate() {
        let mut config = MorphologyConfig::default();
        config.iterations = 0;
        assert!(matches!(config.validate(), Err(MorphError::InvalidParameters(_))));

        let mut config = MorphologyConfig::default();
        config.kernel = vec![1; 8];
        assert!(matches!(config.validate(), Err(MorphError::InvalidKernel(_))));
    }

    #[test]
    fn test_property_map_json() {
        let json = r#"{"kernel":[1,1,1,1,1,1,1,1,1],"iterations":2,"operation":"erode"}"#;
        let props: PropertyMap = serde_json::from_str(json).unwrap();
        assert_eq!(props.len(), 3);
        assert_eq!(props.int(KEY_ITERATIONS), Some(2));
        assert_eq!(props.text(KEY_OPERATION).as_deref(), Some("erode"));
        assert_eq!(props.int(KEY_OPERATION), None);

        let config = MorphologyConfig::from_properties(&props).unwrap();
        assert_eq!(config.operation, MorphOp::Erode);
        assert_eq!(config.sel().unwrap().active_count(), 9);
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: MorphologyConfig = serde_json::from_str(r#"{"operation":"close"}"#).unwrap();
        assert_eq!(config.operation, MorphOp::Close);
        assert_eq!(config.iterations, 1);
        assert_eq!(config.kernel, Sel::default().to_weights());

        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains(r#""border":"aligned""#));
    }

    #[test]
    fn test_to_properties() {
        let mut config = MorphologyConfig::default();
        config.operation = MorphOp::Erode;
        config.iterations = 4;
        let props = config.to_properties();
        assert_eq!(props.int(KEY_OPERATION), Some(1));
        assert_eq!(MorphologyConfig::from_properties(&props).unwrap(), config);
    }
}
