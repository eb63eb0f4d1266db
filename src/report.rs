//! Report assembly and terminal output.

use colored::Colorize;
use serde::Serialize;

use crate::openrouter::FailureKind;
use crate::prompt::AnalysisMode;

/// Display label for the model line of the report.
pub fn model_label(model_id: &str) -> String {
    match model_id {
        "mistralai/mistral-7b-instruct:free" | "mistralai/mistral-7b-instruct" => {
            "Mistral 7B Instruct".to_string()
        }
        other => other.to_string(),
    }
}

/// A finished analysis, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub mode_label: String,
    pub model_label: String,
    pub body: String,
}

impl Report {
    pub fn new(mode: AnalysisMode, model_id: &str, body: String) -> Self {
        Self {
            mode_label: mode.label().to_string(),
            model_label: model_label(model_id),
            body,
        }
    }

    /// Plain-text rendering: fixed header, mode, model, then the body
    /// verbatim.
    pub fn render_text(&self) -> String {
        format!(
            "{}\n{}\n\nMode:  {}\nModel: {}\n{}\n\n{}",
            "=".repeat(60),
            "ANALYSIS REPORT",
            self.mode_label,
            self.model_label,
            "-".repeat(60),
            self.body
        )
    }
}

/// Compose the user-facing message for a failure.
pub fn failure_message(kind: FailureKind, message: &str) -> String {
    if message.is_empty() {
        return kind.to_string();
    }
    match kind {
        FailureKind::ServerError(code) => format!("API error (HTTP {code}): {message}"),
        _ => message.to_string(),
    }
}

/// Print the report with colored accents. The body is passed through
/// verbatim apart from wrapping and code-fence tinting.
pub fn print_report(report: &Report) {
    let width = textwrap::termwidth().min(100);

    println!();
    println!("{}", "=".repeat(width.min(60)).cyan());
    println!("{}", "ANALYSIS REPORT".cyan().bold());
    println!("{}", "=".repeat(width.min(60)).cyan());
    println!();
    println!(
        "{} {}",
        "Mode:".magenta().bold(),
        report.mode_label.bright_white()
    );
    println!(
        "{} {}",
        "Model:".magenta().bold(),
        report.model_label.bright_white()
    );
    println!("{}", "-".repeat(width.min(60)).dimmed());
    println!();

    print_body(&report.body, width);
    println!();
}

/// Print a classified failure and return to the caller.
pub fn print_failure(kind: FailureKind, message: &str) {
    let width = textwrap::termwidth().min(100);

    eprintln!();
    eprintln!("{} {}", "✗".red().bold(), kind.to_string().red().bold());
    for line in textwrap::wrap(&failure_message(kind, message), width) {
        eprintln!("  {line}");
    }
    eprintln!();
}

/// Body renderer: code fences tinted cyan, prose wrapped to the terminal.
fn print_body(body: &str, width: usize) {
    let mut in_code_block = false;

    for line in body.lines() {
        if line.trim_start().starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }

        if in_code_block {
            println!("  {}", line.cyan());
        } else if line.trim().is_empty() {
            println!();
        } else {
            for wrapped in textwrap::wrap(line, width) {
                println!("{wrapped}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_text_orders_mode_model_body() {
        let report = Report {
            mode_label: "Bugs only".to_string(),
            model_label: "Mistral 7B Instruct".to_string(),
            body: "looks fine".to_string(),
        };

        let text = report.render_text();
        let mode_at = text.find("Bugs only").unwrap();
        let model_at = text.find("Mistral 7B Instruct").unwrap();
        let body_at = text.find("looks fine").unwrap();

        assert!(text.contains("ANALYSIS REPORT"));
        assert!(mode_at < model_at);
        assert!(model_at < body_at);
    }

    #[test]
    fn test_report_body_passes_through_verbatim() {
        let body = "1. `foo` shadows a builtin\n\n```\nfixed = foo()\n```";
        let report = Report::new(AnalysisMode::FullAudit, "some/model", body.to_string());

        assert_eq!(report.body, body);
        assert!(report.render_text().ends_with(body));
    }

    #[test]
    fn test_report_from_mode_and_model() {
        let report = Report::new(
            AnalysisMode::BugsOnly,
            "mistralai/mistral-7b-instruct:free",
            "ok".to_string(),
        );

        assert_eq!(report.mode_label, "Bugs only");
        assert_eq!(report.model_label, "Mistral 7B Instruct");
    }

    #[test]
    fn test_model_label_unknown_model_uses_id() {
        assert_eq!(model_label("acme/model-x"), "acme/model-x");
    }

    #[test]
    fn test_failure_message_server_error_includes_code() {
        let message = failure_message(FailureKind::ServerError(502), "bad gateway");
        assert!(message.contains("502"));
        assert!(message.contains("bad gateway"));
    }

    #[test]
    fn test_failure_message_passthrough_for_classified_kinds() {
        let message = failure_message(FailureKind::Unauthorized, "The API key was rejected.");
        assert_eq!(message, "The API key was rejected.");
    }

    #[test]
    fn test_failure_message_never_empty() {
        for kind in [
            FailureKind::Unauthorized,
            FailureKind::NotFound,
            FailureKind::InsufficientFunds,
            FailureKind::Timeout,
            FailureKind::ConnectionError,
            FailureKind::ServerError(500),
            FailureKind::Unknown,
        ] {
            assert!(!failure_message(kind, "").is_empty());
            assert!(!failure_message(kind, "context").is_empty());
        }
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = Report {
            mode_label: "Full audit".to_string(),
            model_label: "Mistral 7B Instruct".to_string(),
            body: "report body".to_string(),
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"mode_label\":\"Full audit\""));
        assert!(json.contains("\"body\":\"report body\""));
    }
}
