//! Feature Vector - the ordered value container behind every record
//!
//! Carries the layout version and hash alongside the values so a vector can
//! never be scored against a model trained on a different layout.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};

/// Versioned feature vector. Values are in `FEATURE_LAYOUT` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in layout order
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// New zeroed vector with the current layout.
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    pub fn set(&mut self, index: usize, value: f32) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Set a feature by name. Returns false for an unknown name.
    pub fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        if let Some(index) = super::layout::feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// Validate compatibility with the current layout.
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for feature extractors. Each source writes its own slots.
pub trait FeatureExtractor {
    fn extract(&self, vector: &mut FeatureVector);
}

/// A complete, schema-conformant record for one URL.
///
/// Serializes as a JSON object whose keys are `url` followed by the feature
/// names in schema order. All feature values are integral, so they are
/// emitted as integers (the same shape the training exports use).
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    /// Normalized URL the features were derived from
    pub url: String,
    pub vector: FeatureVector,
}

impl FeatureRecord {
    pub fn new(url: String, vector: FeatureVector) -> Self {
        Self { url, vector }
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.vector.get_by_name(name)
    }

    /// Feature values zipped with their names, in schema order.
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        FEATURE_LAYOUT
            .iter()
            .zip(self.vector.values.iter())
            .map(|(name, value)| (*name, *value))
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT + 1))?;
        map.serialize_entry("url", &self.url)?;
        for (name, value) in self.named_values() {
            map.serialize_entry(name, &(value as i64))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_new() {
        let vector = FeatureVector::new();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert_eq!(vector.values.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_set_get_by_name() {
        let mut vector = FeatureVector::new();
        assert!(vector.set_by_name("url_length", 42.0));
        assert_eq!(vector.get_by_name("url_length"), Some(42.0));

        assert!(!vector.set_by_name("nonexistent", 0.0));
        assert_eq!(vector.get_by_name("nonexistent"), None);
    }

    #[test]
    fn test_vector_validation() {
        let vector = FeatureVector::new();
        assert!(vector.is_compatible());

        let stale = FeatureVector {
            version: FEATURE_VERSION + 1,
            ..FeatureVector::new()
        };
        assert!(stale.validate().is_err());
    }

    #[test]
    fn test_record_serializes_in_schema_order() {
        let mut vector = FeatureVector::new();
        vector.set_by_name("url_length", 17.0);
        let record = FeatureRecord::new("http://bit.ly/xyz".into(), vector);

        let json = serde_json::to_string(&record).unwrap();

        // url leads, then every feature key in declared order
        let mut last = json.find("\"url\"").unwrap();
        for name in FEATURE_LAYOUT {
            let pos = json
                .find(&format!("\"{}\"", name))
                .unwrap_or_else(|| panic!("missing key {}", name));
            assert!(pos > last, "{} out of order", name);
            last = pos;
        }

        // integral rendering
        assert!(json.contains("\"url_length\":17"));
    }

    #[test]
    fn test_named_values_count() {
        let record = FeatureRecord::new("http://example.com".into(), FeatureVector::new());
        assert_eq!(record.named_values().count(), FEATURE_COUNT);
    }
}
