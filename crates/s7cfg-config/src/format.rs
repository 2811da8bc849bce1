// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Textual encodings of configuration documents.
//!
//! The encoding is chosen from the file extension. Each [`ConfigFormat`]
//! owns a parse/serialize pair, so callers that read a file in one format
//! always write it back in the same format.
//!
//! | Extension          | Format |
//! |--------------------|--------|
//! | `.json`            | JSON   |
//! | `.yaml`, `.yml`    | YAML   |
//! | anything else      | YAML   |

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};

/// A supported document encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConfigFormat {
    /// Pretty-printed JSON with a trailing newline.
    Json,
    /// Block-style YAML.
    #[default]
    Yaml,
}

const EXTENSIONS: [(&str, ConfigFormat); 3] = [
    ("json", ConfigFormat::Json),
    ("yaml", ConfigFormat::Yaml),
    ("yml", ConfigFormat::Yaml),
];

impl ConfigFormat {
    /// Detects the format of a file from its extension (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use s7cfg_config::format::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::from_path("options.JSON"), ConfigFormat::Json);
    /// assert_eq!(ConfigFormat::from_path("config.yml"), ConfigFormat::Yaml);
    /// assert_eq!(ConfigFormat::from_path("config"), ConfigFormat::Yaml);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let Some(extension) = path.as_ref().extension().and_then(|e| e.to_str()) else {
            return Self::default();
        };

        EXTENSIONS
            .iter()
            .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
            .map(|(_, format)| *format)
            .unwrap_or_default()
    }

    /// Returns the format name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
        }
    }

    /// Parses document text.
    ///
    /// Blank content yields `Ok(None)`.
    pub fn parse(&self, content: &str) -> ConfigResult<Option<Value>> {
        if content.trim().is_empty() {
            return Ok(None);
        }

        let parsed = match self {
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::parse(self.name(), e.to_string()))
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ConfigError::parse(self.name(), e.to_string()))
            }
        }?;

        Ok(Some(parsed))
    }

    /// Serializes a document.
    pub fn serialize(&self, document: &Value) -> ConfigResult<String> {
        match self {
            ConfigFormat::Json => serde_json::to_string_pretty(document)
                .map(|mut text| {
                    text.push('\n');
                    text
                })
                .map_err(|e| ConfigError::serialization(e.to_string())),
            ConfigFormat::Yaml => {
                serde_yaml::to_string(document).map_err(|e| ConfigError::serialization(e.to_string()))
            }
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detection() {
        assert_eq!(ConfigFormat::from_path("/data/options.json"), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path("config.YAML"), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("config.toml"), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(""), ConfigFormat::Yaml);
    }

    #[test]
    fn test_blank_content() {
        assert_eq!(ConfigFormat::Yaml.parse("  \n").unwrap(), None);
        assert_eq!(ConfigFormat::Json.parse("").unwrap(), None);
    }

    #[test]
    fn test_parse_yaml() {
        let parsed = ConfigFormat::Yaml
            .parse("plc:\n  host: 10.0.0.1\n  port: 102\nentities: []\n")
            .unwrap()
            .unwrap();
        assert_eq!(parsed, json!({"plc": {"host": "10.0.0.1", "port": 102}, "entities": []}));
    }

    #[test]
    fn test_parse_errors() {
        let error = ConfigFormat::Json.parse("{\"plc\": ").unwrap_err();
        assert!(error.is_invalid_document());
        assert!(ConfigFormat::Yaml.parse("plc: [unclosed").is_err());
    }

    #[test]
    fn test_json_serialization_is_pretty() {
        let text = ConfigFormat::Json.serialize(&json!({"a": [1]})).unwrap();
        assert_eq!(text, "{\n  \"a\": [\n    1\n  ]\n}\n");
    }

    #[test]
    fn test_yaml_serialization_keeps_order() {
        let text = ConfigFormat::Yaml
            .serialize(&json!({"zeta": 1, "alpha": "b"}))
            .unwrap();
        assert_eq!(text, "zeta: 1\nalpha: b\n");
    }
}
