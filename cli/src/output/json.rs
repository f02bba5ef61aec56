use anyhow::Result;
use model_diff::{ModelDiffReport, write_report_json};
use std::io::Write;

pub fn write_json_report<W: Write>(w: &mut W, report: &ModelDiffReport) -> Result<()> {
    write_report_json(&mut *w, report)?;
    writeln!(w)?;
    Ok(())
}
