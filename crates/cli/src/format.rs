//! Output formatting: human-readable or JSON.

use crate::run::{DemoReport, StressReport};
use singlet::Error;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

pub fn format_demo(report: &DemoReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(report),
        OutputMode::Human => {
            let mut out = String::new();
            for n in &report.eager_numbers {
                out.push_str(&format!("eager sequence: {}\n", n));
            }
            for n in &report.lazy_numbers {
                out.push_str(&format!("lazy sequence: {}\n", n));
            }
            out.push_str(&format!(
                "eager audit log: {} records -> {}\n",
                report.records_per_log,
                report.eager_log.display()
            ));
            out.push_str(&format!(
                "lazy audit log: {} records -> {}",
                report.records_per_log,
                report.lazy_log.display()
            ));
            out
        }
    }
}

pub fn format_stress(report: &StressReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(report),
        OutputMode::Human => {
            let mut out = format!(
                "{} threads x {} calls per singleton\n",
                report.threads, report.calls_per_thread
            );
            for seq in &report.sequences {
                out.push_str(&format!(
                    "{:>5} sequence: {} values {}..={} {}\n",
                    seq.strategy,
                    seq.values,
                    seq.first,
                    seq.last,
                    verdict(seq.passed())
                ));
            }
            for log in &report.audit_logs {
                out.push_str(&format!(
                    "{:>5} audit log: {}/{} lines, {} malformed ({}) {}\n",
                    log.strategy,
                    log.new_lines,
                    log.expected_lines,
                    log.malformed,
                    log.path.display(),
                    verdict(log.passed())
                ));
            }
            out.push_str(verdict(report.passed()));
            out
        }
    }
}

pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({
            "code": err.code(),
            "message": err.to_string(),
            "retryable": err.is_retryable(),
        })
        .to_string(),
        OutputMode::Human => format!("(error) {}", err),
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "OK"
    } else {
        "FAILED"
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}
