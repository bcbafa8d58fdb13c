//! `check`: log in, collect, render, log out, apply the `--fail-on` gate.

use tracing::debug;

use aci_core::{HealthCheck, Report, Severity};

use crate::cli::{CheckArgs, FailOn, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: CheckArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let settings = config::resolve(global, &cfg)?;
    let format = config::output_format(global, &cfg);
    let color = output::should_color(config::color_mode(global, &cfg));
    let profile = settings.profile_name;

    let check = HealthCheck::new(settings.fabric)?;
    check
        .login()
        .await
        .map_err(|e| CliError::from(e).for_profile(&profile))?;

    if format == OutputFormat::Text {
        output::print_output("Login Success\n", global.quiet);
    }

    let result = check.collect().await;
    check.logout().await;
    let report = result?;

    let rendered = output::render_report(&report, format, color)?;
    output::print_output(&rendered, global.quiet);

    match args.fail_on {
        Some(threshold) => enforce_threshold(&report, threshold),
        None => Ok(()),
    }
}

fn severity(threshold: FailOn) -> Severity {
    match threshold {
        FailOn::Critical => Severity::Critical,
        FailOn::Major => Severity::Major,
        FailOn::Minor => Severity::Minor,
        FailOn::Warning => Severity::Warning,
    }
}

/// Runs after the report is printed, so a failing gate still shows it.
fn enforce_threshold(report: &Report, threshold: FailOn) -> Result<(), CliError> {
    let severity = severity(threshold);
    let count = report.at_or_above(severity);
    debug!(%severity, count, "fail-on gate");

    if count == 0 {
        Ok(())
    } else {
        Err(CliError::ThresholdExceeded {
            severity: severity.to_string(),
            count,
        })
    }
}
