//! Output formatting: table, JSON, YAML.
//!
//! Device listings use `tabled`; structured formats go through serde.
//! Secrets never reach any of these paths -- `Device`'s Serialize impl
//! redacts the password, and the table has no password column.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use jrest_api::{Device, Outcome};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Device listing ───────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Port")]
    port: u16,
    #[tabled(rename = "User")]
    username: String,
    #[tabled(rename = "SSL")]
    ssl: bool,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            name: d.name.clone(),
            host: d.host.to_string(),
            port: d.port,
            username: d.username.clone(),
            ssl: d.ssl,
        }
    }
}

/// Render the device inventory in the chosen format.
pub fn render_devices(format: &OutputFormat, devices: &[Device]) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<DeviceRow> = devices.iter().map(DeviceRow::from).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => render_json(devices, false),
        OutputFormat::JsonCompact => render_json(devices, true),
        OutputFormat::Yaml => render_yaml(devices),
    }
}

// ── Outcome rendering ────────────────────────────────────────────────

/// Render a device interaction outcome: a status line plus the
/// normalized result as structured text.
pub fn render_outcome(format: &OutputFormat, outcome: &Outcome, color: bool) -> String {
    let status_line = match (outcome, color) {
        (Outcome::Success { .. }, true) => format!("{}", "✔ success".green().bold()),
        (Outcome::Success { .. }, false) => "✔ success".to_owned(),
        (Outcome::Fail { .. }, true) => format!("{}", "✘ fail".red().bold()),
        (Outcome::Fail { .. }, false) => "✘ fail".to_owned(),
        (Outcome::Error { .. }, true) => format!("{}", "✘ error".red().bold()),
        (Outcome::Error { .. }, false) => "✘ error".to_owned(),
    };

    let body = match format {
        OutputFormat::JsonCompact => render_json(outcome, true),
        OutputFormat::Yaml => render_yaml(outcome),
        // The outcome has no tabular shape; the table default renders
        // pretty JSON, matching the interactive expectation.
        OutputFormat::Table | OutputFormat::Json => render_json(outcome, false),
    };

    format!("{status_line}\n\n{body}")
}

/// Print rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.unwrap_or_else(|e| format!("serialization failed: {e}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("serialization failed: {e}"))
}
