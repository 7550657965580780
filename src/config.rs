//! TOML configuration: output format selection, enum emission mode, and
//! per-type output overrides.
//!
//! ```toml
//! format = "cpp"
//!
//! [cpp]
//! enum = "withArray"
//!
//! [datatype.number]
//! out = "std::int64_t"
//! header = "#include <cstdint>"
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("format '{0}' is not supported; only 'cpp' and 'proto' formats are supported")]
    UnsupportedFormat(String),
}

/// Which backend produces the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Cpp,
    Proto,
}

/// C++ enum emission mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumMode {
    /// Plain `enum class`.
    #[default]
    Standard,
    /// `enum class` plus a `constexpr const char*` display-string table.
    WithArray,
}

/// Replacement text and include line for one overridden type name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatatypeOverride {
    #[serde(default)]
    pub out: String,
    #[serde(default)]
    pub header: String,
}

/// Validated configuration. `Default` gives the no-config behavior: C++
/// output, plain enums, no overrides.
#[derive(Debug, Default)]
pub struct Config {
    pub format: OutputFormat,
    pub enum_mode: EnumMode,
    pub datatypes: IndexMap<String, DatatypeOverride>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    format: Option<String>,
    cpp: Option<RawCppSection>,
    #[serde(default)]
    datatype: IndexMap<String, DatatypeOverride>,
}

#[derive(Debug, Deserialize)]
struct RawCppSection {
    #[serde(rename = "enum")]
    enum_mode: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;

        let format = match raw.format.as_deref() {
            None | Some("cpp") => OutputFormat::Cpp,
            Some("proto") => OutputFormat::Proto,
            Some(other) => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        // Unrecognized enum modes fall back to the default.
        let enum_mode = match raw.cpp.and_then(|c| c.enum_mode).as_deref() {
            Some("withArray") => EnumMode::WithArray,
            _ => EnumMode::Standard,
        };

        Ok(Config {
            format,
            enum_mode,
            datatypes: raw.datatype,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.format, OutputFormat::Cpp);
        assert_eq!(config.enum_mode, EnumMode::Standard);
        assert!(config.datatypes.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r##"
            format = "proto"

            [cpp]
            enum = "withArray"

            [datatype.number]
            out = "std::int64_t"
            header = "#include <cstdint>"
            "##,
        )
        .unwrap();

        assert_eq!(config.format, OutputFormat::Proto);
        assert_eq!(config.enum_mode, EnumMode::WithArray);
        let dt = &config.datatypes["number"];
        assert_eq!(dt.out, "std::int64_t");
        assert_eq!(dt.header, "#include <cstdint>");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = Config::from_toml(r#"format = "java""#).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(f) if f == "java"));
    }

    #[test]
    fn test_unknown_enum_mode_falls_back() {
        let config = Config::from_toml("[cpp]\nenum = \"bitmask\"").unwrap();
        assert_eq!(config.enum_mode, EnumMode::Standard);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml("format = ["),
            Err(ConfigError::Parse(_))
        ));
    }
}
