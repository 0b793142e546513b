// Console rendering of run progress

use crate::event::RunMsg;
use crate::pipeline_worker::RunReport;

/// Status line(s) for one message, or `None` if it prints nothing.
///
/// With `tagged` set, per-sheet lines are prefixed with the sheet filename so
/// interleaved output from parallel runs stays readable.
pub fn render(msg: &RunMsg, tagged: bool) -> Option<String> {
    let line = match msg {
        RunMsg::CatalogStarted { .. } => return None,
        RunMsg::SheetStarted { filename } => return Some(format!("Processing {}...", filename)),
        RunMsg::SheetGeometry {
            sheet_size,
            frame_size,
            ..
        } => format!(
            "  Sheet size: {}x{}\n  Frame size: {}x{}",
            sheet_size.0, sheet_size.1, frame_size.0, frame_size.1
        ),
        RunMsg::WidthMismatch {
            expected, actual, ..
        } => format!("  ! Expected width {}, got {}", expected, actual),
        RunMsg::SheetSaved { frames, .. } => format!("  ✓ Saved {} frames", frames),
        RunMsg::DownloadFailed { error, .. } => format!("  ✗ Failed to download ({})", error),
        RunMsg::SheetFailed { error, .. } => format!("  ✗ Error: {}", error),
        RunMsg::RunCompleted { .. } => return Some("\nAll done!".to_string()),
    };

    match msg.filename() {
        Some(filename) if tagged => Some(
            line.lines()
                .map(|l| format!("[{}]{}", filename, l))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        _ => Some(line),
    }
}

/// Aggregated failure report printed in strict mode.
pub fn failure_summary(report: &RunReport) -> Option<String> {
    if report.failed() == 0 {
        return None;
    }

    let mut out = format!(
        "{} of {} sheets failed:",
        report.failed(),
        report.outcomes.len()
    );
    for outcome in report.failures() {
        out.push_str(&format!(
            "\n  {} ({} frames written): {}",
            outcome.filename,
            outcome.frames_saved,
            outcome.error.as_deref().unwrap_or("unknown error")
        ));
    }
    Some(out)
}
