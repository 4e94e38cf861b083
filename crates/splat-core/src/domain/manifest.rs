//! Dependency manifest model and merge rules.
//!
//! A manifest is a JSON object whose top-level key order is preserved. Only
//! the dependency sections are ever rewritten; every other field of the
//! destination document stays exactly where it was.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// Sections merged between template and destination, in write order.
pub const DEPENDENCY_SECTIONS: [&str; 2] = ["dependencies", "devDependencies"];

/// Package name to version specifier, sorted by package name.
pub type DependencyMap = BTreeMap<String, String>;

/// Which side wins when both manifests pin the same package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePrecedence {
    /// Template versions overwrite destination versions.
    #[default]
    Template,
    /// Versions already in the destination are kept.
    Destination,
}

impl fmt::Display for MergePrecedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => write!(f, "template"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// A parsed dependency manifest.
///
/// Invariant: `document` is always a `Value::Object`.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    document: Value,
}

impl Manifest {
    /// Parse manifest text. Anything but a top-level JSON object is rejected.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let document: Value =
            serde_json::from_str(text).map_err(|e| DomainError::InvalidManifest {
                reason: e.to_string(),
            })?;

        if !document.is_object() {
            return Err(DomainError::ManifestNotObject);
        }

        Ok(Self { document })
    }

    fn fields(&self) -> &Map<String, Value> {
        match &self.document {
            Value::Object(map) => map,
            _ => unreachable!("manifest document is always an object"),
        }
    }

    fn fields_mut(&mut self) -> &mut Map<String, Value> {
        match &mut self.document {
            Value::Object(map) => map,
            _ => unreachable!("manifest document is always an object"),
        }
    }

    /// Read one dependency section. A missing or `null` section is empty.
    pub fn section(&self, name: &str) -> Result<DependencyMap, DomainError> {
        let entries = match self.fields().get(name) {
            None | Some(Value::Null) => return Ok(DependencyMap::new()),
            Some(Value::Object(entries)) => entries,
            Some(_) => {
                return Err(DomainError::InvalidSection {
                    section: name.to_string(),
                });
            }
        };

        entries
            .iter()
            .map(|(package, version)| match version {
                Value::String(v) => Ok((package.clone(), v.clone())),
                _ => Err(DomainError::InvalidVersion {
                    section: name.to_string(),
                    package: package.clone(),
                }),
            })
            .collect()
    }

    /// Top-level field names in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields().keys().map(String::as_str)
    }

    /// Merge `template` into this (destination) manifest.
    ///
    /// Each dependency section becomes the sorted union of both sides, with
    /// `precedence` deciding collisions. Sections already present keep their
    /// position; an absent section is appended only when the union is
    /// non-empty, so an empty merge never introduces new keys.
    pub fn merge(
        &self,
        template: &Manifest,
        precedence: MergePrecedence,
    ) -> Result<Manifest, DomainError> {
        let mut merged = self.clone();

        for name in DEPENDENCY_SECTIONS {
            let union = merge_sections(self.section(name)?, template.section(name)?, precedence);

            if !self.fields().contains_key(name) && union.is_empty() {
                continue;
            }

            let value = Value::Object(
                union
                    .into_iter()
                    .map(|(package, version)| (package, Value::String(version)))
                    .collect(),
            );
            merged.fields_mut().insert(name.to_string(), value);
        }

        Ok(merged)
    }

    /// Two-space indented JSON, keys in document order.
    pub fn to_pretty_string(&self) -> String {
        format!("{:#}", self.document)
    }
}

fn merge_sections(
    destination: DependencyMap,
    template: DependencyMap,
    precedence: MergePrecedence,
) -> DependencyMap {
    let (mut base, overlay) = match precedence {
        MergePrecedence::Template => (destination, template),
        MergePrecedence::Destination => (template, destination),
    };
    base.extend(overlay);
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(text: &str) -> Manifest {
        Manifest::parse(text).unwrap()
    }

    #[test]
    fn parse_rejects_non_objects() {
        assert_eq!(Manifest::parse("[1, 2]"), Err(DomainError::ManifestNotObject));
        assert!(matches!(
            Manifest::parse("{ nope"),
            Err(DomainError::InvalidManifest { .. })
        ));
    }

    #[test]
    fn missing_and_null_sections_are_empty() {
        let m = manifest(r#"{"name":"foo","devDependencies":null}"#);
        assert!(m.section("dependencies").unwrap().is_empty());
        assert!(m.section("devDependencies").unwrap().is_empty());
    }

    #[test]
    fn non_string_versions_are_rejected() {
        let m = manifest(r#"{"dependencies":{"a":1}}"#);
        assert_eq!(
            m.section("dependencies"),
            Err(DomainError::InvalidVersion {
                section: "dependencies".into(),
                package: "a".into(),
            })
        );
    }

    #[test]
    fn merge_unions_and_sorts_keys() {
        let dst = manifest(r#"{"dependencies":{"zeta":"1.0.0","alpha":"1.0.0"}}"#);
        let tpl = manifest(r#"{"dependencies":{"mid":"2.0.0"}}"#);

        let merged = dst.merge(&tpl, MergePrecedence::Template).unwrap();
        let keys: Vec<_> = merged.section("dependencies").unwrap().into_keys().collect();
        assert_eq!(keys, ["alpha", "mid", "zeta"]);
        assert!(
            merged
                .to_pretty_string()
                .find("alpha")
                .unwrap()
                < merged.to_pretty_string().find("zeta").unwrap()
        );
    }

    #[test]
    fn template_precedence_overwrites_destination_versions() {
        let dst = manifest(r#"{"dependencies":{"a":"1.0.0"}}"#);
        let tpl = manifest(r#"{"dependencies":{"a":"2.0.0"}}"#);

        let merged = dst.merge(&tpl, MergePrecedence::Template).unwrap();
        assert_eq!(merged.section("dependencies").unwrap()["a"], "2.0.0");
    }

    #[test]
    fn destination_precedence_keeps_destination_versions() {
        let dst = manifest(r#"{"dependencies":{"a":"1.0.0"}}"#);
        let tpl = manifest(r#"{"dependencies":{"a":"2.0.0","b":"3.0.0"}}"#);

        let merged = dst.merge(&tpl, MergePrecedence::Destination).unwrap();
        let deps = merged.section("dependencies").unwrap();
        assert_eq!(deps["a"], "1.0.0");
        assert_eq!(deps["b"], "3.0.0");
    }

    #[test]
    fn merge_keeps_other_fields_in_place() {
        let dst = manifest(r#"{"dependencies":{"a":"1.0.0"},"name":"foo","scripts":{"t":"x"}}"#);
        let tpl = manifest(r#"{"dependencies":{"b":"2.0.0"},"name":"template"}"#);

        let merged = dst.merge(&tpl, MergePrecedence::Template).unwrap();
        let keys: Vec<_> = merged.keys().collect();
        assert_eq!(keys, ["dependencies", "name", "scripts"]);
        assert!(merged.to_pretty_string().contains(r#""name": "foo""#));
    }

    #[test]
    fn empty_merge_adds_no_sections() {
        let dst = manifest(r#"{"dependencies":{"a":"1.0.0"}}"#);
        let tpl = manifest("{}");

        let merged = dst.merge(&tpl, MergePrecedence::Template).unwrap();
        assert_eq!(merged.to_pretty_string(), dst.to_pretty_string());
    }

    #[test]
    fn absent_section_is_appended_when_template_has_entries() {
        let dst = manifest(r#"{"name":"foo"}"#);
        let tpl = manifest(r#"{"devDependencies":{"jest":"^29.0.0"}}"#);

        let merged = dst.merge(&tpl, MergePrecedence::Template).unwrap();
        let keys: Vec<_> = merged.keys().collect();
        assert_eq!(keys, ["name", "devDependencies"]);
    }

    #[test]
    fn pretty_output_uses_two_space_indent() {
        let m = manifest(r#"{"name":"foo"}"#);
        assert_eq!(m.to_pretty_string(), "{\n  \"name\": \"foo\"\n}");
    }
}
