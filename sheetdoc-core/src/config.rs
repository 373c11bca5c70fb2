//! Configuration system for report generation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Formula Report";
pub const DEFAULT_FORMULA_LABEL: &str = "**Formula**";

/// Main report configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub sheets: HashMap<String, SheetConfig>,
}

impl ReportConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ReportConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Check if a sheet is excluded from the report
    pub fn is_sheet_skipped(&self, sheet_name: &str) -> bool {
        self.sheets.get(sheet_name).is_some_and(|s| s.skip)
    }

    /// The CSV field delimiter as a single byte
    pub fn delimiter_byte(&self) -> Result<u8> {
        let delimiter = &self.global.delimiter;
        // A one-byte UTF-8 string is always ASCII
        let &[byte] = delimiter.as_bytes() else {
            anyhow::bail!(
                "Configuration error: delimiter must be a single ASCII character, got '{}'",
                delimiter
            );
        };
        if matches!(byte, b'"' | b'\n' | b'\r') {
            anyhow::bail!(
                "Configuration error: delimiter cannot be a quote or line break"
            );
        }
        Ok(byte)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        if self.global.title.contains('\n') {
            anyhow::bail!("Configuration error: title must be a single line");
        }
        Ok(())
    }

    /// Sheet names configured here that the workbook does not contain
    pub fn unknown_sheets<'a>(&'a self, sheet_names: &[&str]) -> Vec<&'a str> {
        let known: HashSet<&str> = sheet_names.iter().copied().collect();
        let mut unknown: Vec<&str> = self
            .sheets
            .keys()
            .map(String::as_str)
            .filter(|name| !known.contains(name))
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Title line of the Markdown report
    #[serde(default = "default_title")]
    pub title: String,
    /// Label line printed above each formula block
    #[serde(default = "default_formula_label")]
    pub formula_label: String,
    /// CSV field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            formula_label: default_formula_label(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_formula_label() -> String {
    DEFAULT_FORMULA_LABEL.to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

/// Sheet-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Leave this sheet out of the report
    #[serde(default)]
    pub skip: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.global.title, "Formula Report");
        assert_eq!(config.global.formula_label, "**Formula**");
        assert_eq!(config.delimiter_byte().unwrap(), b',');
        assert!(config.validate().is_ok());
        assert!(!config.is_sheet_skipped("Sheet1"));
    }

    #[test]
    fn test_from_toml() {
        let config = ReportConfig::from_toml(
            r#"
            [global]
            title = "Relatório de Fórmulas"
            delimiter = ";"

            [sheets.Scratch]
            skip = true
            "#,
        )
        .unwrap();

        assert_eq!(config.global.title, "Relatório de Fórmulas");
        assert_eq!(config.global.formula_label, "**Formula**");
        assert_eq!(config.delimiter_byte().unwrap(), b';');
        assert!(config.is_sheet_skipped("Scratch"));
        assert!(!config.is_sheet_skipped("Sales"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ReportConfig::from_toml("").unwrap();
        assert_eq!(config.global.title, DEFAULT_TITLE);
        assert!(config.sheets.is_empty());
    }

    #[test]
    fn test_validation() {
        let mut config = ReportConfig::default();

        config.global.delimiter = ";;".to_string();
        assert!(config.validate().is_err());

        config.global.delimiter = "\"".to_string();
        assert!(config.validate().is_err());

        config.global.delimiter = "é".to_string();
        assert!(config.validate().is_err());
        assert!(config.delimiter_byte().is_err());

        config.global.delimiter = "\t".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.delimiter_byte().unwrap(), b'\t');

        config.global.title = "two\nlines".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_sheets() {
        let mut config = ReportConfig::default();
        config.sheets.insert("Sales".to_string(), SheetConfig::default());
        config.sheets.insert("Gone".to_string(), SheetConfig { skip: true });

        assert_eq!(config.unknown_sheets(&["Sales", "Costs"]), vec!["Gone"]);
    }
}
