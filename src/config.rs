use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::transpiler::export::{DEFAULT_FILE_NAME, DEFAULT_FUNCTION_NAME, DEFAULT_PACKAGE};
use crate::transpiler::parser::ParseLimits;
use crate::transpiler::validator::Thresholds;
use crate::transpiler::ConvertOptions;

pub const CONFIG_FILE: &str = "xml2compose.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize)]
pub struct ConversionConfig {
    #[serde(default = "default_function_name")]
    pub function_name: String,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
    #[serde(default = "default_nesting_depth_threshold")]
    pub nesting_depth_threshold: usize,
    #[serde(default = "default_children_threshold")]
    pub children_threshold: usize,
    /// Keep every suggestion when unset
    pub max_suggestions: Option<usize>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            function_name: default_function_name(),
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
            nesting_depth_threshold: default_nesting_depth_threshold(),
            children_threshold: default_children_threshold(),
            max_suggestions: None,
        }
    }
}

fn default_function_name() -> String {
    DEFAULT_FUNCTION_NAME.to_string()
}

fn default_max_depth() -> usize {
    ParseLimits::default().max_depth
}

fn default_max_nodes() -> usize {
    ParseLimits::default().max_nodes
}

fn default_nesting_depth_threshold() -> usize {
    Thresholds::default().nesting_depth
}

fn default_children_threshold() -> usize {
    Thresholds::default().children
}

#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_package")]
    pub package: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            package: default_package(),
            file_name: default_file_name(),
        }
    }
}

fn default_package() -> String {
    DEFAULT_PACKAGE.to_string()
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Config {
    /// Conversion options for the library
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            function_name: self.conversion.function_name.clone(),
            limits: ParseLimits {
                max_depth: self.conversion.max_depth,
                max_nodes: self.conversion.max_nodes,
            },
            thresholds: Thresholds {
                nesting_depth: self.conversion.nesting_depth_threshold,
                children: self.conversion.children_threshold,
            },
            max_suggestions: self.conversion.max_suggestions,
        }
    }
}

/// Load and parse an xml2compose.toml configuration file
pub fn load_config(path: &str) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("could not find `{}`", path)
            } else {
                anyhow::anyhow!("failed to read `{}`: {}", path, e)
            }
        })?;

    parse_config(&content).map_err(|e| anyhow::anyhow!("failed to parse `{}`: {}", path, e))
}

/// Parse and validate configuration text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;

    validate_package_name(&config.export.package)?;
    validate_function_name(&config.conversion.function_name)?;
    if config.conversion.max_depth == 0 || config.conversion.max_nodes == 0 {
        anyhow::bail!("max_depth and max_nodes must be greater than zero");
    }

    Ok(config)
}

/// Use `--config` when given, else `xml2compose.toml` in the current
/// directory if it exists, else defaults
pub fn load_or_default(explicit: Option<&str>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None if Path::new(CONFIG_FILE).exists() => load_config(CONFIG_FILE),
        None => Ok(Config::default()),
    }
}

/// Validate Android package name format
pub fn validate_package_name(package: &str) -> Result<()> {
    // Must have at least two parts (e.g., com.example)
    let parts: Vec<&str> = package.split('.').collect();
    if parts.len() < 2 {
        anyhow::bail!(
            "Invalid Android package name '{}'. Must have at least two parts (e.g., 'com.example')",
            package
        );
    }

    for (i, part) in parts.iter().enumerate() {
        let Some(first_char) = part.chars().next() else {
            anyhow::bail!(
                "Invalid Android package name '{}'. Part {} is empty",
                package,
                i + 1
            );
        };

        if !first_char.is_ascii_lowercase() {
            anyhow::bail!(
                "Invalid Android package name '{}'. Part '{}' must start with a lowercase letter",
                package,
                part
            );
        }

        for ch in part.chars() {
            if !ch.is_ascii_lowercase() && !ch.is_ascii_digit() && ch != '_' {
                anyhow::bail!(
                    "Invalid Android package name '{}'. Part '{}' contains invalid character '{}'",
                    package,
                    part,
                    ch
                );
            }
        }
    }

    Ok(())
}

/// The generated function name must be a plain Kotlin identifier
pub fn validate_function_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        anyhow::bail!("Invalid function name '{}'. Use letters, digits and underscores", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_package_name_valid() {
        assert!(validate_package_name("com.example.app").is_ok());
        assert!(validate_package_name("com.example.my_app").is_ok());
        assert!(validate_package_name("com.example.app123").is_ok());
    }

    #[test]
    fn test_validate_package_name_invalid() {
        // Too few parts
        assert!(validate_package_name("com").is_err());

        // Starts with uppercase
        assert!(validate_package_name("Com.example.app").is_err());
        assert!(validate_package_name("com.Example.app").is_err());

        // Contains invalid characters
        assert!(validate_package_name("com.example.my-app").is_err());
        assert!(validate_package_name("com.example.my app").is_err());

        // Empty part
        assert!(validate_package_name("com..app").is_err());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.conversion.function_name, "ComposableScreen");
        assert_eq!(config.conversion.max_depth, 500);
        assert_eq!(config.conversion.max_nodes, 10_000);
        assert_eq!(config.export.package, "com.example.app.ui");
        assert_eq!(config.export.file_name, "ComposableScreen.kt");
        assert_eq!(config.to_options(), ConvertOptions::default());
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config(
            r#"
[conversion]
function_name = "LoginScreen"
max_suggestions = 3
children_threshold = 10

[export]
package = "org.acme.ui"
"#,
        )
        .unwrap();
        let options = config.to_options();
        assert_eq!(options.function_name, "LoginScreen");
        assert_eq!(options.max_suggestions, Some(3));
        assert_eq!(options.thresholds.children, 10);
        assert_eq!(options.thresholds.nesting_depth, 10);
        assert_eq!(config.export.package, "org.acme.ui");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse_config("[export]\npackage = \"App\"").is_err());
        assert!(parse_config("[conversion]\nfunction_name = \"2fast\"").is_err());
        assert!(parse_config("[conversion]\nmax_depth = 0").is_err());
        assert!(parse_config("[conversion]\nunknown = [").is_err());
    }
}
