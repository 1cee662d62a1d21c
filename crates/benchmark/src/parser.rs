//! Shipment file parser.
//!
//! A dataset file holds one shipment per line, each carton written as
//! `HxWxL` and separated by whitespace. Blank lines and lines starting with
//! `#` are skipped.

use crate::dataset::{Dataset, Shipment};
use std::fs;
use std::path::Path;
use thiserror::Error;
use u_shipping_core::Package;

/// Errors that can occur when parsing datasets.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Line {line}: {source}")]
    InvalidPackage {
        line: usize,
        #[source]
        source: u_shipping_core::Error,
    },
}

/// Parser for shipment datasets.
#[derive(Debug, Default)]
pub struct DatasetParser;

impl DatasetParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a dataset from a file, named after the file stem.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Dataset, ParseError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        self.parse_str(&name, &content)
    }

    /// Parses a dataset from its text.
    pub fn parse_str(&self, name: &str, content: &str) -> Result<Dataset, ParseError> {
        let mut shipments = Vec::new();
        for (index, raw) in content.lines().enumerate() {
            let line = index + 1;
            let raw = raw.trim();
            if raw.is_empty() || raw.starts_with('#') {
                continue;
            }
            let packages = self
                .parse_tokens(raw.split_whitespace())
                .map_err(|source| ParseError::InvalidPackage { line, source })?;
            shipments.push(Shipment { line, packages });
        }

        Ok(Dataset {
            name: name.to_string(),
            shipments,
        })
    }

    /// Parses `HxWxL` tokens into packages.
    pub fn parse_tokens<'a>(
        &self,
        tokens: impl IntoIterator<Item = &'a str>,
    ) -> u_shipping_core::Result<Vec<Package>> {
        tokens.into_iter().map(Package::parse).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let content = "\
# reference shipment
135x200x250 170x380x390 485x280x590

254x171x368 201x172x349
";
        let parser = DatasetParser::new();
        let dataset = parser.parse_str("test", content).unwrap();

        assert_eq!(dataset.name, "test");
        assert_eq!(dataset.shipments.len(), 2);
        assert_eq!(dataset.shipments[0].line, 2);
        assert_eq!(dataset.shipments[0].packages.len(), 3);
        assert_eq!(dataset.shipments[1].line, 4);
        assert_eq!(dataset.shipments[0].packages[0], Package::parse("250x200x135").unwrap());
        assert_eq!(dataset.package_count(), 5);
    }

    #[test]
    fn test_invalid_token_reports_line() {
        let parser = DatasetParser::new();
        let err = parser
            .parse_str("test", "100x100x100\n100x100\n")
            .unwrap_err();

        match err {
            ParseError::InvalidPackage { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected InvalidPackage, got {other}"),
        }
    }

    #[test]
    fn test_parse_tokens() {
        let parser = DatasetParser::new();
        let packages = parser.parse_tokens(["600x400x400", "10x20x30"]).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[1].height(), 30);
    }
}
