//! Fixed-width row rendering.
//!
//! Each query kind has a fixed column layout. All fields are left
//! justified: 20 characters wide for Bars, Companies and Countries, 15 for
//! Regions. Column formatters follow the value class: free text through
//! [`str_output`], ratings through [`digits_output`], cocoa fractions
//! through [`percent_output`], counts printed as plain integers.

use crate::command::QueryKind;
use crate::output::format::{digits_output, percent_output, str_output};
use crate::query::exec::{AggValue, BarRow, GroupRow, ResultRow};
use crate::query::plan::QueryPlan;

/// Field width for Bars, Companies and Countries layouts.
pub const WIDE_FIELD_WIDTH: usize = 20;

/// Field width for the Regions layout.
pub const REGIONS_FIELD_WIDTH: usize = 15;

/// Render the aggregate value with the formatter matching its metric.
fn agg_cell(value: &AggValue) -> String {
    match value {
        AggValue::Rating(v) => digits_output(*v),
        AggValue::Cocoa(v) => percent_output(*v),
        AggValue::Count(n) => n.to_string(),
    }
}

/// Pad one cell to the layout width, left justified.
fn field(cell: &str, width: usize) -> String {
    format!("{:<width$}", cell, width = width)
}

fn bar_line(row: &BarRow) -> String {
    let cells = [
        str_output(&row.specific_bean_bar_name),
        str_output(&row.company),
        str_output(&row.company_location),
        digits_output(row.rating),
        percent_output(row.cocoa_percent),
        str_output(&row.broad_bean_origin),
    ];
    cells
        .iter()
        .map(|cell| field(cell, WIDE_FIELD_WIDTH))
        .collect()
}

fn group_line(row: &GroupRow, width: usize) -> String {
    let mut line = field(&str_output(&row.label), width);
    line.push_str(&field(&agg_cell(&row.value), width));
    line
}

/// Render executor output into printable lines, one per result row.
///
/// The plan picks the layout; the rows themselves are untouched, so
/// callers keep the raw values for programmatic use.
pub fn render_rows(plan: &QueryPlan, rows: &[ResultRow]) -> Vec<String> {
    let width = match plan.kind {
        QueryKind::Regions => REGIONS_FIELD_WIDTH,
        _ => WIDE_FIELD_WIDTH,
    };

    rows.iter()
        .map(|row| match row {
            ResultRow::Bar(bar) => bar_line(bar),
            ResultRow::Group(group) => group_line(group, width),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{parse_command, QueryKind};
    use crate::query::plan::QueryPlan;

    fn plan_for(command: &str) -> QueryPlan {
        QueryPlan::from_request(&parse_command(command)).unwrap()
    }

    fn sample_bar_row() -> ResultRow {
        ResultRow::Bar(BarRow {
            specific_bean_bar_name: "Madagascar, Sambirano".to_string(),
            company: "Soma".to_string(),
            company_location: "Canada".to_string(),
            rating: 4.0,
            cocoa_percent: 0.70,
            broad_bean_origin: "Madagascar".to_string(),
        })
    }

    #[test]
    fn test_bar_line_layout() {
        let plan = plan_for("bars");
        let lines = render_rows(&plan, &[sample_bar_row()]);

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        // Six fields, 20 wide each
        assert_eq!(line.chars().count(), 6 * WIDE_FIELD_WIDTH);
        // Long bar name truncated to 12 + "..."
        assert!(line.starts_with("Madagascar, ..."));
        assert!(line.contains("4.0"));
        assert!(line.contains("70%"));
    }

    #[test]
    fn test_group_line_rating_formatter() {
        let plan = plan_for("companies ratings top=5");
        let row = ResultRow::Group(GroupRow {
            label: "Soma".to_string(),
            value: AggValue::Rating(3.75),
        });
        let lines = render_rows(&plan, &[row]);

        assert_eq!(lines[0].chars().count(), 2 * WIDE_FIELD_WIDTH);
        assert!(lines[0].starts_with(&format!("{:<20}", "Soma")));
        // One digit after the decimal point
        assert!(lines[0].contains("3.8"));
    }

    #[test]
    fn test_group_line_cocoa_formatter() {
        let plan = plan_for("countries cocoa top=5");
        let row = ResultRow::Group(GroupRow {
            label: "Canada".to_string(),
            value: AggValue::Cocoa(0.70),
        });
        let lines = render_rows(&plan, &[row]);
        assert!(lines[0].contains("70%"));
    }

    #[test]
    fn test_group_line_count_formatter() {
        let plan = plan_for("companies bars_sold top=5");
        let row = ResultRow::Group(GroupRow {
            label: "Soma".to_string(),
            value: AggValue::Count(17),
        });
        let lines = render_rows(&plan, &[row]);
        assert!(lines[0].contains("17"));
    }

    #[test]
    fn test_regions_narrow_layout() {
        let plan = plan_for("regions top=5");
        assert_eq!(plan.kind, QueryKind::Regions);
        let row = ResultRow::Group(GroupRow {
            label: "Americas".to_string(),
            value: AggValue::Rating(3.2),
        });
        let lines = render_rows(&plan, &[row]);

        assert_eq!(lines[0].chars().count(), 2 * REGIONS_FIELD_WIDTH);
        assert!(lines[0].starts_with(&format!("{:<15}", "Americas")));
    }

    #[test]
    fn test_truncated_label_in_group_line() {
        let plan = plan_for("companies top=5");
        let row = ResultRow::Group(GroupRow {
            label: "Scharffen Berger".to_string(),
            value: AggValue::Rating(3.5),
        });
        let lines = render_rows(&plan, &[row]);
        assert!(lines[0].starts_with("Scharffen Be..."));
    }
}
