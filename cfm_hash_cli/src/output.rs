//! Output formatting for digests and algorithm listings

use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Digests of one input
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DigestReport {
    pub file: String,
    pub size: u64,
    pub hashes: BTreeMap<String, String>,
}

/// Sizes of one algorithm as reported through the ABI
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AlgorithmRow {
    pub name: String,
    pub output_size: u32,
    pub block_size: u32,
}

/// Render digest reports. Multiple inputs are prefixed with their name.
pub fn format_digests(reports: &[DigestReport], format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json = if let [single] = reports {
                serde_json::to_string_pretty(single)?
            } else {
                serde_json::to_string_pretty(reports)?
            };
            Ok(format!("{json}\n"))
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for report in reports {
                for (algorithm, hash) in &report.hashes {
                    let (algorithm, hash) = if color {
                        (algorithm.yellow().to_string(), hash.cyan().to_string())
                    } else {
                        (algorithm.clone(), hash.clone())
                    };
                    if reports.len() > 1 {
                        output.push_str(&format!("{}: {algorithm}: {hash}\n", report.file));
                    } else {
                        output.push_str(&format!("{algorithm}: {hash}\n"));
                    }
                }
            }
            Ok(output)
        }
    }
}

/// Render the algorithm table
pub fn format_algorithms(rows: &[AlgorithmRow], format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(rows)?)),
        OutputFormat::Text => {
            let width = rows.iter().map(|row| row.name.len()).max().unwrap_or(0).max(9);
            let header = format!("{:<width$}  {:>6}  {:>5}", "ALGORITHM", "OUTPUT", "BLOCK");
            let mut output = if color {
                header.bold().to_string()
            } else {
                header
            };
            output.push('\n');
            for row in rows {
                output.push_str(&format!(
                    "{:<width$}  {:>6}  {:>5}\n",
                    row.name, row.output_size, row.block_size
                ));
            }
            Ok(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(file: &str, pairs: &[(&str, &str)]) -> DigestReport {
        DigestReport {
            file: file.to_string(),
            size: 4,
            hashes: pairs
                .iter()
                .map(|(a, h)| (a.to_string(), h.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_single_input_text() {
        let reports = [report("a.txt", &[("MD5", "098f6bcd4621d373cade4e832627b4f6")])];
        let text = format_digests(&reports, OutputFormat::Text, false).unwrap();
        assert_eq!(text, "MD5: 098f6bcd4621d373cade4e832627b4f6\n");
    }

    #[test]
    fn test_multiple_inputs_are_prefixed() {
        let reports = [
            report("a", &[("CRC32", "00000000")]),
            report("b", &[("CRC32", "ffffffff")]),
        ];
        let text = format_digests(&reports, OutputFormat::Text, false).unwrap();
        assert_eq!(text, "a: CRC32: 00000000\nb: CRC32: ffffffff\n");
    }

    #[test]
    fn test_json_single_is_object_multiple_is_array() {
        let one = [report("a", &[("MD5", "00")])];
        let json: serde_json::Value =
            serde_json::from_str(&format_digests(&one, OutputFormat::Json, false).unwrap())
                .unwrap();
        assert_eq!(json["hashes"]["MD5"], "00");
        assert_eq!(json["size"], 4);

        let two = [report("a", &[]), report("b", &[])];
        let json: serde_json::Value =
            serde_json::from_str(&format_digests(&two, OutputFormat::Json, false).unwrap())
                .unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_algorithm_table() {
        let rows = [AlgorithmRow {
            name: "SHA-256".to_string(),
            output_size: 32,
            block_size: 64,
        }];
        let text = format_algorithms(&rows, OutputFormat::Text, false).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("ALGORITHM"));
        assert!(lines[1].starts_with("SHA-256"));
        assert!(lines[1].ends_with("64"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_string("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_string("csv").is_err());
    }
}
