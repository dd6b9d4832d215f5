//! Reporters that render check outcomes to stdout

use std::io::Write;

use application::ports::{AirQualityReport, ReportPort, RunOutcome};
use tracing::warn;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable block
    Text,
    /// One JSON object per outcome
    Json,
}

/// Writes each outcome to stdout in the selected format
#[derive(Debug, Clone, Copy)]
pub struct StdoutReporter {
    format: OutputFormat,
}

impl StdoutReporter {
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render an outcome without writing it
    pub fn render(&self, outcome: &RunOutcome) -> String {
        match self.format {
            OutputFormat::Text => render_text(outcome),
            OutputFormat::Json => serde_json::to_string(outcome).unwrap_or_else(|e| {
                warn!(error = %e, "Failed to serialize outcome");
                serde_json::json!({ "status": "failed", "message": outcome.message() }).to_string()
            }),
        }
    }
}

impl ReportPort for StdoutReporter {
    fn report(&self, outcome: &RunOutcome) {
        let rendered = self.render(outcome);
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{rendered}").and_then(|()| stdout.flush()) {
            warn!(error = %e, "Failed to write outcome");
        }
    }
}

fn render_text(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Ready(report) => render_report(report),
        RunOutcome::Failed { message, .. } => format!("✗ {message}"),
    }
}

fn render_report(report: &AirQualityReport) -> String {
    let mut lines = Vec::new();
    if !report.location_title.is_empty() {
        lines.push(report.location_title.clone());
    }
    if !report.location_subtitle.is_empty() {
        lines.push(report.location_subtitle.clone());
    }
    if report.address.is_none() {
        lines.push(format!(
            "{:.4}, {:.4}",
            report.location.latitude(),
            report.location.longitude()
        ));
    }
    lines.push(format!(
        "AQI (US) {}  {} {}",
        report.count,
        report.tier.emoji(),
        report.tier_label
    ));
    if let Some(pollutant) = report.reading.main_pollutant() {
        lines.push(format!("Main pollutant: {pollutant}"));
    }
    lines.push(format!("Checked at {}", report.checked_at));
    lines.extend(report.notices.iter().map(|notice| format!("! {notice}")));
    lines.push(report.message.clone());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use application::ports::FailureReason;
    use chrono::DateTime;
    use domain::value_objects::{Address, AirQualityReading, GeoLocation, SeverityTier};

    use super::*;

    fn report(address: Option<Address>, notices: Vec<String>) -> RunOutcome {
        let reading = AirQualityReading::new(
            42,
            DateTime::parse_from_rfc3339("2023-01-01T00:00:00Z").unwrap(),
        )
        .with_main_pollutant("p2");
        RunOutcome::Ready(AirQualityReport {
            location_title: address.as_ref().map(Address::title).unwrap_or_default(),
            location_subtitle: address.as_ref().map(Address::subtitle).unwrap_or_default(),
            count: 42,
            checked_at: "2023-01-01 09:00".to_string(),
            tier: SeverityTier::Good,
            tier_label: "Good".to_string(),
            background: "bg_good".to_string(),
            reading,
            location: GeoLocation::seoul(),
            address,
            notices,
            message: "Air quality updated.".to_string(),
        })
    }

    fn seoul_address() -> Address {
        Address::new(
            Some("Sejong-daero".into()),
            Some("South Korea".into()),
            Some("Seoul".into()),
        )
    }

    #[test]
    fn text_ready_shows_address_and_tier() {
        let text = StdoutReporter::new(OutputFormat::Text).render(&report(Some(seoul_address()), vec![]));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Sejong-daero");
        assert_eq!(lines[1], "South Korea Seoul");
        assert!(text.contains("AQI (US) 42"));
        assert!(text.contains("Good"));
        assert!(text.contains("Checked at 2023-01-01 09:00"));
        assert!(text.ends_with("Air quality updated."));
    }

    #[test]
    fn text_without_address_shows_coordinates_and_notice() {
        let text = StdoutReporter::new(OutputFormat::Text).render(&report(
            None,
            vec!["No address was found for this location.".into()],
        ));
        assert!(text.starts_with("37.5665, 126.9780"));
        assert!(text.contains("! No address was found for this location."));
    }

    #[test]
    fn text_failure_shows_message() {
        let text = StdoutReporter::new(OutputFormat::Text)
            .render(&RunOutcome::failed(FailureReason::FetchFailed));
        assert_eq!(text, "✗ Air quality update failed.");
    }

    #[test]
    fn json_is_single_line() {
        let json = StdoutReporter::new(OutputFormat::Json).render(&report(Some(seoul_address()), vec![]));
        assert!(!json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "ready");
        assert_eq!(value["count"], 42);
    }

    #[test]
    fn json_failure_carries_reason() {
        let json = StdoutReporter::new(OutputFormat::Json)
            .render(&RunOutcome::failed(FailureReason::NoFix));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(
            value["message"],
            "Could not read your location. Press refresh to try again."
        );
    }
}
