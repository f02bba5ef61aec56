use std::io::Write;

use crate::diff::ModelDiffReport;

pub fn serialize_report(report: &ModelDiffReport) -> serde_json::Result<String> {
    serde_json::to_string(report)
}

pub fn write_report_json<W: Write>(w: &mut W, report: &ModelDiffReport) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *w, report)
}
