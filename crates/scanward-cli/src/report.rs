use scanward_client::ScanReport;

/// Renders a completed scan for stdout: the verdict line, then an
/// enumerated detection list when there is anything to show.
pub fn render(report: &ScanReport) -> String {
    let mut out = format!("result: {}\n", report.verdict);
    if !report.detections.is_empty() {
        out.push_str("detections:\n");
        for (index, detection) in report.detections.iter().enumerate() {
            out.push_str(&format!(
                "  {}. category: {} name: {}\n",
                index + 1,
                detection.category,
                detection.name
            ));
        }
    }
    out
}
