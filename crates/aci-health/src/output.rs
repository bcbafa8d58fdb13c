//! Output formatting: fixed text report, tables, JSON, YAML.
//!
//! `text` reproduces the classic health check layout line for line. Table
//! uses `tabled`, structured formats serialize the whole `Report` via serde.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use aci_core::{Fault, Node, NodeStatus, Report, Severity};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Fault descriptions in the text report are cut to this many characters.
pub const DESCRIPTION_WIDTH: usize = 70;

const RULE_WIDTH: usize = 50;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

fn paint_severity(severity: Severity, text: &str, color: bool) -> String {
    if !color {
        return text.to_owned();
    }
    match severity {
        Severity::Critical => text.red().bold().to_string(),
        Severity::Major => text.yellow().bold().to_string(),
        Severity::Minor => text.yellow().to_string(),
        Severity::Warning => text.cyan().to_string(),
    }
}

fn paint_status(status: &NodeStatus, color: bool) -> String {
    let text = status.to_string();
    if !color {
        return text;
    }
    match status {
        NodeStatus::Ok => text.green().to_string(),
        NodeStatus::Down => text.red().bold().to_string(),
        NodeStatus::Degraded(_) | NodeStatus::Unknown => text.yellow().to_string(),
    }
}

// ── Render dispatcher ────────────────────────────────────────────────

/// Render a report in the chosen format.
pub fn render_report(
    report: &Report,
    format: OutputFormat,
    color: bool,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Text => render_text(report, color),
        OutputFormat::Table => render_tables(report),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::JsonCompact => serde_json::to_string(report)?,
        OutputFormat::Yaml => serde_yaml::to_string(report)?,
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Text report ──────────────────────────────────────────────────────

/// The fixed-layout report: header, severity counts, critical/major
/// details, node status.
pub fn render_text(report: &Report, color: bool) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    let mut lines = vec![
        heavy.clone(),
        "ACI Health Check Report".to_owned(),
        heavy,
        String::new(),
        format!("Total Faults: {}", report.total),
    ];
    for severity in Severity::DESCENDING {
        lines.push(format!(
            "  - {}: {}",
            severity.label(),
            report.count(severity)
        ));
    }

    if !report.critical_major.is_empty() {
        lines.push(String::new());
        lines.push("[Critical & Major Faults]".to_owned());
        lines.push(light.clone());
        for fault in &report.critical_major {
            let tag = format!("[{}]", fault.severity.tag());
            lines.push(format!(
                "{} {}",
                paint_severity(fault.severity, &tag, color),
                fault.short_description(DESCRIPTION_WIDTH)
            ));
        }
    }

    // The node header stays even for an empty fabric.
    lines.push(String::new());
    lines.push("[Node Status]".to_owned());
    lines.push(light);
    for node in &report.nodes {
        lines.push(format!(
            "{:15} | {:10} | {}",
            node.name,
            node.role,
            paint_status(&node.status, color)
        ));
    }

    lines.join("\n")
}

// ── Table report ─────────────────────────────────────────────────────

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Severity")]
    severity: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct FaultRow {
    #[tabled(rename = "Severity")]
    severity: &'static str,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Fault> for FaultRow {
    fn from(f: &Fault) -> Self {
        Self {
            severity: f.severity.tag(),
            code: f.code.clone().unwrap_or_default(),
            node: f.node_id().map(|id| id.to_string()).unwrap_or_default(),
            created: f
                .created
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            description: f.short_description(DESCRIPTION_WIDTH).to_owned(),
        }
    }
}

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Version")]
    version: String,
}

impl From<&Node> for NodeRow {
    fn from(n: &Node) -> Self {
        Self {
            id: n.id.clone(),
            name: n.name.clone(),
            role: n.role.to_string(),
            status: n.status.to_string(),
            model: n.model.clone().unwrap_or_default(),
            version: n.version.clone().unwrap_or_default(),
        }
    }
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_tables(report: &Report) -> String {
    let mut counts: Vec<CountRow> = Severity::DESCENDING
        .iter()
        .map(|&severity| CountRow {
            severity: severity.label(),
            count: report.count(severity),
        })
        .collect();
    counts.push(CountRow {
        severity: "Total",
        count: report.total,
    });

    let mut sections = vec![render_table(&counts)];

    if !report.critical_major.is_empty() {
        let rows: Vec<FaultRow> = report.critical_major.iter().map(FaultRow::from).collect();
        sections.push(render_table(&rows));
    }
    if !report.nodes.is_empty() {
        let rows: Vec<NodeRow> = report.nodes.iter().map(NodeRow::from).collect();
        sections.push(render_table(&rows));
    }

    sections.join("\n\n")
}
