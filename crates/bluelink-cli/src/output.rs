//! Output formatting for the bluelink CLI (table, json)

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

impl From<OutputFormat> for &str {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
}

impl OutputContext {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print an info message to stderr, keeping stdout clean for JSON
    pub fn info(&self, msg: &str) {
        if self.format == OutputFormat::Table {
            eprintln!("{}", msg.dimmed());
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print data in the configured format
    pub fn print<T: Tabled + Serialize>(&self, data: &[T]) {
        match self.format {
            OutputFormat::Table => {
                if data.is_empty() {
                    println!("No data");
                } else {
                    let table = Table::new(data).to_string();
                    println!("{}", table);
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
                );
            }
        }
    }

    /// Print key-value pairs
    pub fn print_kv(&self, pairs: &[(&str, String)]) {
        match self.format {
            OutputFormat::Table => {
                for (key, value) in pairs {
                    println!("{}: {}", key.bold(), value);
                }
            }
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
    }
}

// =============================================================================
// Display types for various commands
// =============================================================================

/// Vehicle display for vehicles command
#[derive(Debug, Tabled, Serialize)]
pub struct VehicleRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "VIN")]
    pub vin: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    pub vehicle_type: String,
    #[tabled(rename = "Brand")]
    pub brand: String,
}

/// Status display for status command
#[derive(Debug, Tabled, Serialize)]
pub struct StatusRow {
    #[tabled(rename = "Vehicle")]
    pub vehicle: String,
    #[tabled(rename = "SoC %")]
    pub soc: i32,
    #[tabled(rename = "Range")]
    pub range: i32,
    #[tabled(rename = "Max Range")]
    pub max_range: i32,
    #[tabled(rename = "Charging")]
    pub charging: bool,
    #[tabled(rename = "Plugged In")]
    pub plugged_in: bool,
    #[tabled(rename = "Locked")]
    pub locked: bool,
    #[tabled(rename = "Target AC")]
    pub target_soc_ac: i32,
    #[tabled(rename = "Target DC")]
    pub target_soc_dc: i32,
    #[tabled(rename = "Updated")]
    pub updated_at: String,
}
