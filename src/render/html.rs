//! HTML report rendering
//!
//! A pure, stateless fold over fully-computed ledgers and merge rows into a
//! self-contained HTML fragment with inline styles (mail clients strip
//! stylesheets). Nothing here mutates its inputs.

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::ledger::{Ledger, MergedRow};
use crate::models::{Entity, EntityKey, Money, PeriodId, TagFilter};

use super::style::{
    currency_cell, delta_cell, row_open, BLANK_CELL, HEADER_ROW, SUBHEADER_ROW,
};

const TABLE_OPEN: &str = "<table border='1' style='border-collapse:collapse; \
                          font-family:Arial, sans-serif; font-size:12px;'>";

/// One entity's slice of the category breakdown, ready to render
#[derive(Debug, Clone)]
pub struct BreakdownSection {
    /// The entity the rows belong to
    pub entity: Entity,
    /// Merge rows keyed by sub-category (lexicographic order)
    pub rows: BTreeMap<String, MergedRow>,
}

/// Column order for the summary table: the featured keys, with "Others"
/// appended when the configuration did not place it explicitly.
fn display_columns(featured: &[EntityKey]) -> Vec<EntityKey> {
    let mut columns = featured.to_vec();
    if !columns.contains(&EntityKey::Others) {
        columns.push(EntityKey::Others);
    }
    columns
}

/// The second-row sub-label under a column header
fn key_sub_label(key: &EntityKey) -> String {
    match key {
        EntityKey::Real(id) => id.to_string(),
        EntityKey::Total => "All".to_string(),
        EntityKey::Others => "Others".to_string(),
    }
}

/// Render the entity-level summary table: one row per period, a cost and a
/// delta column per displayed key.
pub fn render_summary_table(ledger: &Ledger, settings: &Settings) -> String {
    let columns = display_columns(&settings.featured);
    let mut html = String::from(TABLE_OPEN);

    // Header row 1: display names spanning the cost/delta column pairs.
    html.push_str(HEADER_ROW);
    html.push_str(BLANK_CELL);
    for key in &columns {
        html.push_str(&format!(
            "<td colspan='2' style='text-align:center;'><b>{}</b></td>",
            settings.display_name(key)
        ));
    }
    html.push_str("</tr>\n");

    // Header row 2: raw identifiers and the delta marker.
    html.push_str(SUBHEADER_ROW);
    html.push_str(&format!(
        "<td style='text-align:center; width:80px;'><b>{}</b></td>",
        settings.granularity.row_label()
    ));
    for key in &columns {
        html.push_str(&format!(
            "<td style='text-align:center; width:95px;'>{}</td>\
             <td style='text-align:center;'>&Delta;%</td>",
            key_sub_label(key)
        ));
    }
    html.push_str("</tr>\n");

    // Data rows, one per period in ascending order.
    for (i_row, period) in ledger.periods().enumerate() {
        html.push_str(row_open(i_row));
        html.push_str(&format!(
            "<td style='text-align:center;'>{}</td>",
            period
        ));

        for key in &columns {
            let cell = ledger.cell(period, key);
            let cost = cell.map(|c| c.cost).unwrap_or_else(Money::zero);
            let delta = cell.and_then(|c| c.percent_delta);
            html.push_str(&currency_cell(cost));
            html.push_str(&delta_cell(delta));
        }

        html.push_str("</tr>\n");
    }

    html.push_str("</table>");
    html
}

/// Render the per-entity category breakdown as one table of stacked sections.
///
/// A section with no rows (not enough periods to compare) still gets its
/// headers so the reader can see the entity was covered.
pub fn render_breakdown_table(sections: &[BreakdownSection]) -> String {
    let mut html = String::from(TABLE_OPEN);

    for section in sections {
        html.push_str(&format!(
            "{}<td colspan='5' style='text-align:center; font-weight:bold;'>{} ({})</td></tr>\n",
            HEADER_ROW, section.entity.name, section.entity.id
        ));

        html.push_str(SUBHEADER_ROW);
        html.push_str(
            "<td style='text-align:center; font-weight:bold;'>Service</td>\
             <td style='text-align:center; font-weight:bold;'>Cost</td>\
             <td style='text-align:center;'>&Delta;%</td>\
             <td style='text-align:center;'>Tagged &Delta;%</td>\
             <td style='text-align:center;'>Tagged &Delta;$</td>",
        );
        html.push_str("</tr>\n");

        let mut i_row = 0;
        for (sub_category, row) in &section.rows {
            if is_all_zero(row) {
                continue;
            }

            html.push_str(row_open(i_row));
            html.push_str(&format!(
                "<td style='text-align:left;'>{}</td>",
                sub_category
            ));
            html.push_str(&currency_cell(row.overall_current));
            html.push_str(&delta_cell(row.overall_delta_pct));
            html.push_str(&delta_cell(row.filtered_delta_pct));
            html.push_str(&currency_cell(row.filtered_delta_abs));
            html.push_str("</tr>\n");
            i_row += 1;
        }
    }

    html.push_str("</table>");
    html
}

/// A row whose every metric is zero or undefined carries no information.
fn is_all_zero(row: &MergedRow) -> bool {
    row.overall_current.is_zero()
        && row.filtered_delta_abs.is_zero()
        && row.overall_delta_pct.is_none()
        && row.filtered_delta_pct.is_none()
}

/// Assemble the full report document: summary table, optional breakdown
/// table, and the reporting-window caption.
pub fn render_document(
    summary: &Ledger,
    breakdown: Option<(&TagFilter, &[BreakdownSection])>,
    window: (PeriodId, PeriodId),
    settings: &Settings,
) -> String {
    let mut html = String::from("<h2>Periodic Cost Report - Summary</h2>");
    html.push_str(&render_summary_table(summary, settings));
    html.push_str("<br>\n");

    if let Some((tag, sections)) = breakdown {
        html.push_str(&format!(
            "<br><h2>Per-Service Breakdown - Tagged {}={}</h2>",
            tag.key, tag.value
        ));
        html.push_str(&render_breakdown_table(sections));
        html.push_str("<br>\n");
    }

    html.push_str(&format!(
        "<div style='font-size:12px; font-style:italic;'>Reporting Window: {} to {}</div>\n",
        window.0, window.1
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{annotate_percent_deltas, build_entity_ledger, project_for_display};
    use crate::models::{EntityCost, EntityId, PeriodIndex};

    fn pid(s: &str) -> PeriodId {
        s.parse().unwrap()
    }

    fn settings() -> Settings {
        Settings {
            entities: vec![Entity::new("111", "Dev"), Entity::new("222", "Prod")],
            featured: vec![EntityKey::real("111"), EntityKey::Total],
            ..Settings::default()
        }
    }

    fn summary_ledger() -> Ledger {
        let index = PeriodIndex::new(vec![pid("2024-01-01"), pid("2024-02-01")]);
        let records = vec![
            EntityCost {
                entity: EntityId::new("111"),
                period: pid("2024-01-01"),
                amount: Money::from_cents(100_00),
            },
            EntityCost {
                entity: EntityId::new("111"),
                period: pid("2024-02-01"),
                amount: Money::from_cents(150_00),
            },
            EntityCost {
                entity: EntityId::new("222"),
                period: pid("2024-02-01"),
                amount: Money::from_cents(40_00),
            },
        ];
        let mut ledger = project_for_display(
            &build_entity_ledger(&index, &records),
            &settings().featured,
        );
        annotate_percent_deltas(&mut ledger);
        ledger
    }

    #[test]
    fn test_summary_headers_use_display_names_and_fixed_labels() {
        let html = render_summary_table(&summary_ledger(), &settings());
        assert!(html.contains("<b>Dev</b>"));
        assert!(html.contains("<b>Total</b>"));
        assert!(html.contains("<b>Others</b>"));
        assert!(html.contains(">All<"));
        assert!(html.contains("colspan='2'"));
        assert!(html.contains(">Month<"));
    }

    #[test]
    fn test_summary_rows_and_striping() {
        let html = render_summary_table(&summary_ledger(), &settings());
        assert!(html.contains("2024-01-01"));
        assert!(html.contains("2024-02-01"));
        assert!(html.contains("background-color:WhiteSmoke"));
        // 50% growth lands in the Red band.
        assert!(html.contains("50.00%"));
        assert!(html.contains("color:Red"));
    }

    #[test]
    fn test_summary_first_period_deltas_blank() {
        let html = render_summary_table(&summary_ledger(), &settings());
        let first_row = html
            .lines()
            .find(|l| l.contains("2024-01-01"))
            .unwrap();
        assert!(first_row.contains(BLANK_CELL));
        assert!(!first_row.contains('%'));
    }

    #[test]
    fn test_breakdown_empty_section_renders_headers_only() {
        let sections = vec![BreakdownSection {
            entity: Entity::new("111", "Dev"),
            rows: BTreeMap::new(),
        }];
        let html = render_breakdown_table(&sections);
        assert!(html.contains("Dev (111)"));
        assert!(html.contains(">Service<"));
        assert!(!html.contains("WhiteSmoke"));
    }

    #[test]
    fn test_breakdown_suppresses_all_zero_rows() {
        let mut rows = BTreeMap::new();
        rows.insert(
            "Dead".to_string(),
            MergedRow {
                overall_current: Money::zero(),
                overall_delta_pct: None,
                filtered_delta_pct: None,
                filtered_delta_abs: Money::zero(),
            },
        );
        rows.insert(
            "Live".to_string(),
            MergedRow {
                overall_current: Money::from_cents(120_00),
                overall_delta_pct: Some(0.2),
                filtered_delta_pct: Some(0.0),
                filtered_delta_abs: Money::zero(),
            },
        );
        let sections = vec![BreakdownSection {
            entity: Entity::new("111", "Dev"),
            rows,
        }];

        let html = render_breakdown_table(&sections);
        assert!(!html.contains("Dead"));
        assert!(html.contains("Live"));
        assert!(html.contains("$120.00"));
        assert!(html.contains("20.00%"));
    }

    #[test]
    fn test_document_includes_caption_and_breakdown_heading() {
        let tag = TagFilter::new("project", "Traverse");
        let sections: Vec<BreakdownSection> = Vec::new();
        let html = render_document(
            &summary_ledger(),
            Some((&tag, sections.as_slice())),
            (pid("2024-01-01"), pid("2024-02-01")),
            &settings(),
        );
        assert!(html.contains("Reporting Window: 2024-01-01 to 2024-02-01"));
        assert!(html.contains("project=Traverse"));
        assert!(html.contains("Periodic Cost Report - Summary"));
    }

    #[test]
    fn test_document_without_breakdown() {
        let html = render_document(
            &summary_ledger(),
            None,
            (pid("2024-01-01"), pid("2024-02-01")),
            &settings(),
        );
        assert!(!html.contains("Breakdown"));
    }
}
