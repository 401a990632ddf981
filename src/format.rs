//! Output format selector

use crate::error::ConvertError;
use std::fmt;
use std::str::FromStr;

/// Format to convert *to*. The input is always the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    /// XLSX → CSV
    Csv,
    /// CSV → XLSX
    Xlsx,
}

impl TargetFormat {
    /// Upper-case name used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            TargetFormat::Csv => "CSV",
            TargetFormat::Xlsx => "XLSX",
        }
    }
}

impl FromStr for TargetFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(TargetFormat::Csv),
            "xlsx" => Ok(TargetFormat::Xlsx),
            _ => Err(ConvertError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetFormat::Csv => write!(f, "csv"),
            TargetFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_values() {
        assert_eq!("csv".parse::<TargetFormat>().unwrap(), TargetFormat::Csv);
        assert_eq!("xlsx".parse::<TargetFormat>().unwrap(), TargetFormat::Xlsx);
        assert_eq!("XLSX".parse::<TargetFormat>().unwrap(), TargetFormat::Xlsx);
    }

    #[test]
    fn test_parse_unsupported() {
        match "json".parse::<TargetFormat>() {
            Err(ConvertError::UnsupportedFormat(value)) => assert_eq!(value, "json"),
            other => panic!("Expected UnsupportedFormat, got {:?}", other),
        }
        assert!("".parse::<TargetFormat>().is_err());
    }

    #[test]
    fn test_label_and_display() {
        assert_eq!(TargetFormat::Csv.label(), "CSV");
        assert_eq!(TargetFormat::Xlsx.to_string(), "xlsx");
    }
}
