//! Label to segment-name registry.

use std::collections::BTreeMap;
use std::path::Path;

use volume_types::{BACKGROUND, Label};

use crate::error::{RegistryError, RegistryResult};

/// Names for segment labels.
///
/// Lookups of unknown labels return `None`; the pipeline skips those
/// segments. [`BACKGROUND`] never has a name.
///
/// # Example
///
/// ```
/// use segment_pipeline::SegmentRegistry;
///
/// let registry = SegmentRegistry::default();
/// assert_eq!(registry.lookup(5), Some("liver"));
/// assert_eq!(registry.lookup(42), None);
///
/// let custom = SegmentRegistry::from_json_str(r#"{"1": "aorta", "7": "heart"}"#)?;
/// assert_eq!(custom.lookup(7), Some("heart"));
/// # Ok::<(), segment_pipeline::RegistryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRegistry {
    names: BTreeMap<Label, String>,
}

impl SegmentRegistry {
    /// An empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: BTreeMap::new(),
        }
    }

    /// Name `label`, returning the previous name if there was one.
    ///
    /// Naming [`BACKGROUND`] has no effect on lookups.
    pub fn insert(&mut self, label: Label, name: impl Into<String>) -> Option<String> {
        self.names.insert(label, name.into())
    }

    /// Name of `label`, if registered.
    #[must_use]
    pub fn lookup(&self, label: Label) -> Option<&str> {
        if label == BACKGROUND {
            return None;
        }
        self.names.get(&label).map(String::as_str)
    }

    /// Number of registered labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no label is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registered labels and names in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, &str)> {
        self.names.iter().map(|(&label, name)| (label, name.as_str()))
    }

    /// Parse a JSON object mapping decimal labels to names.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Parse`] if the text is not a JSON object of strings
    /// - [`RegistryError::InvalidLabel`] for a key that is not a `u32`
    /// - [`RegistryError::BackgroundLabel`] for key `"0"`
    /// - [`RegistryError::InvalidName`] for an empty name or one that is not a
    ///   plain file name
    /// - [`RegistryError::DuplicateName`] if two labels share a name
    pub fn from_json_str(json: &str) -> RegistryResult<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        let mut owners: BTreeMap<String, Label> = BTreeMap::new();
        for (key, name) in raw {
            let label: Label = key
                .trim()
                .parse()
                .map_err(|_| RegistryError::InvalidLabel { key: key.clone() })?;
            if label == BACKGROUND {
                return Err(RegistryError::BackgroundLabel);
            }
            if !is_plain_file_stem(&name) {
                return Err(RegistryError::InvalidName { label, name });
            }
            if let Some(&other) = owners.get(&name) {
                let mut labels = [other, label];
                labels.sort_unstable();
                return Err(RegistryError::DuplicateName { name, labels });
            }
            owners.insert(name.clone(), label);
            registry.insert(label, name);
        }
        Ok(registry)
    }

    /// Read a registry from a JSON file. See [`SegmentRegistry::from_json_str`].
    ///
    /// # Errors
    ///
    /// [`RegistryError::Read`] if the file cannot be read, otherwise as
    /// [`SegmentRegistry::from_json_str`].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> RegistryResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

impl Default for SegmentRegistry {
    /// Abdominal organ labels: spleen, kidneys, gallbladder and liver.
    fn default() -> Self {
        [
            (1, "spleen"),
            (2, "kidney_right"),
            (3, "kidney_left"),
            (4, "gallbladder"),
            (5, "liver"),
        ]
        .into_iter()
        .map(|(label, name)| (label, name.to_string()))
        .collect()
    }
}

impl FromIterator<(Label, String)> for SegmentRegistry {
    fn from_iter<I: IntoIterator<Item = (Label, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

fn is_plain_file_stem(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let registry = SegmentRegistry::default();
        let entries: Vec<_> = registry.iter().collect();

        assert_eq!(
            entries,
            vec![
                (1, "spleen"),
                (2, "kidney_right"),
                (3, "kidney_left"),
                (4, "gallbladder"),
                (5, "liver"),
            ]
        );
        assert_eq!(registry.lookup(0), None);
        assert_eq!(registry.lookup(6), None);
    }

    #[test]
    fn insert_replaces() {
        let mut registry = SegmentRegistry::new();
        assert!(registry.is_empty());

        assert_eq!(registry.insert(3, "a"), None);
        assert_eq!(registry.insert(3, "b"), Some("a".to_string()));
        assert_eq!(registry.lookup(3), Some("b"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn background_never_named() {
        let registry: SegmentRegistry = [(0, "air".to_string())].into_iter().collect();
        assert_eq!(registry.lookup(0), None);
    }

    #[test]
    fn json_document() {
        let registry =
            SegmentRegistry::from_json_str(r#"{ "10": "aorta", " 2 ": "heart" }"#).expect("valid");

        assert_eq!(registry.lookup(10), Some("aorta"));
        assert_eq!(registry.lookup(2), Some("heart"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn json_rejections() {
        assert!(matches!(
            SegmentRegistry::from_json_str(r#"{"one": "spleen"}"#),
            Err(RegistryError::InvalidLabel { .. })
        ));
        assert!(matches!(
            SegmentRegistry::from_json_str(r#"{"-1": "spleen"}"#),
            Err(RegistryError::InvalidLabel { .. })
        ));
        assert!(matches!(
            SegmentRegistry::from_json_str(r#"{"0": "background"}"#),
            Err(RegistryError::BackgroundLabel)
        ));
        assert!(matches!(
            SegmentRegistry::from_json_str(r#"{"1": "  "}"#),
            Err(RegistryError::InvalidName { label: 1, .. })
        ));
        assert!(matches!(
            SegmentRegistry::from_json_str(r#"{"1": "../liver"}"#),
            Err(RegistryError::InvalidName { .. })
        ));
        assert!(matches!(
            SegmentRegistry::from_json_str("[1, 2]"),
            Err(RegistryError::Parse(_))
        ));
    }

    #[test]
    fn json_duplicate_names() {
        let err = SegmentRegistry::from_json_str(r#"{"2": "kidney", "1": "kidney"}"#)
            .unwrap_err();
        match err {
            RegistryError::DuplicateName { name, labels } => {
                assert_eq!(name, "kidney");
                assert_eq!(labels, [1, 2]);
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = SegmentRegistry::from_json_str(r#"{"1": "a", "10": "b", "3": "a"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), r#"name "a" is used by labels 1 and 3"#);
    }

    #[test]
    fn missing_file() {
        let err = SegmentRegistry::from_json_file("/nonexistent/registry.json").unwrap_err();
        assert!(matches!(err, RegistryError::Read { .. }));
    }
}
