use anyhow::Result;
use model_diff::{ModelDiffReport, TableChange};
use std::io::Write;

pub fn write_text_report<W: Write>(w: &mut W, report: &ModelDiffReport) -> Result<()> {
    if report.is_empty() {
        writeln!(w, "No differences found.")?;
        return Ok(());
    }

    for line in report.lines() {
        writeln!(w, "{}", line)?;
    }
    Ok(())
}

/// One-line count of what changed, used by `--quiet`.
pub fn write_summary<W: Write>(w: &mut W, report: &ModelDiffReport) -> Result<()> {
    if report.is_empty() {
        writeln!(w, "No differences found.")?;
        return Ok(());
    }

    let counts = count_changes(report);
    write!(
        w,
        "Tables: {} added, {} removed, {} modified; ",
        counts.tables_added,
        counts.tables_removed,
        counts.tables_modified
    )?;
    writeln!(
        w,
        "Relationships: {} added, {} deleted, {} changed",
        counts.relationships_added,
        counts.relationships_deleted,
        counts.relationships_changed
    )?;
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ChangeCounts {
    tables_added: usize,
    tables_removed: usize,
    tables_modified: usize,
    relationships_added: usize,
    relationships_deleted: usize,
    relationships_changed: usize,
}

fn count_changes(report: &ModelDiffReport) -> ChangeCounts {
    let mut counts = ChangeCounts::default();
    for section in &report.tables {
        match section.change {
            TableChange::Added => counts.tables_added += 1,
            TableChange::Removed => counts.tables_removed += 1,
            TableChange::Modified(_) => counts.tables_modified += 1,
        }
    }
    if let Some(rels) = &report.relationships {
        counts.relationships_added = rels.added.len();
        counts.relationships_deleted = rels.deleted.len();
        counts.relationships_changed = rels.changed.len();
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_diff::{TableDiff, TableSection};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).expect("render");
        String::from_utf8(buf).expect("utf-8")
    }

    #[test]
    fn empty_report_says_no_differences() {
        let report = ModelDiffReport::default();
        let text = render(|w| write_text_report(w, &report));
        assert_eq!(text, "No differences found.\n");
        let summary = render(|w| write_summary(w, &report));
        assert_eq!(summary, "No differences found.\n");
    }

    #[test]
    fn summary_counts_table_sections() {
        let report = ModelDiffReport {
            tables: vec![
                TableSection {
                    name: "A".into(),
                    change: TableChange::Removed,
                },
                TableSection {
                    name: "B".into(),
                    change: TableChange::Added,
                },
                TableSection {
                    name: "C".into(),
                    change: TableChange::Added,
                },
                TableSection {
                    name: "D".into(),
                    change: TableChange::Modified(TableDiff::default()),
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            render(|w| write_summary(w, &report)),
            "Tables: 2 added, 1 removed, 1 modified; Relationships: 0 added, 0 deleted, 0 changed\n"
        );
    }
}
