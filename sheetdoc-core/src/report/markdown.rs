//! Markdown rendering of a grouped formula report

use super::GroupedReport;

/// Render the report as a Markdown document.
///
/// Every block ends with a newline and blocks are separated by one blank
/// line, so the output is stable byte for byte.
pub fn render(report: &GroupedReport, title: &str, formula_label: &str) -> String {
    let mut blocks = vec![format!("# {}\n", title)];

    for (sheet, records) in report.iter() {
        blocks.push(format!("## {}\n", sheet));
        for (idx, record) in records.iter().enumerate() {
            blocks.push(format!(
                "### {}. {} ({})\n",
                idx + 1,
                record.column,
                record.address
            ));
            blocks.push(format!("{}\n", formula_label));
            blocks.push(format!("```excel\n{}\n```\n", record.formula));
            blocks.push("---\n".to_string());
        }
    }

    blocks.join("\n")
}
