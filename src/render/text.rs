//! Plain-text rendering
//!
//! The mail fallback body for clients that refuse HTML, and a terminal
//! rendering of the summary ledger for the `preview` command.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::config::Settings;
use crate::ledger::Ledger;
use crate::models::{EntityKey, Money, PeriodId};

use super::style::format_percent;

/// The non-HTML mail body: states that an HTML report was generated.
pub fn render_text_fallback(window: (PeriodId, PeriodId)) -> String {
    format!(
        "A cost report was generated for the reporting window {} to {}.\r\n\
         An HTML-capable mail client is required to view it.\r\n",
        window.0, window.1
    )
}

/// Render the projected summary ledger as a terminal table.
pub fn render_summary_text(ledger: &Ledger, settings: &Settings) -> String {
    let mut columns: Vec<EntityKey> = settings.featured.clone();
    if !columns.contains(&EntityKey::Others) {
        columns.push(EntityKey::Others);
    }

    let mut builder = Builder::default();

    let mut header: Vec<String> = vec![settings.granularity.row_label().to_string()];
    for key in &columns {
        header.push(settings.display_name(key));
        header.push("Δ%".to_string());
    }
    builder.push_record(header);

    for period in ledger.periods() {
        let mut row: Vec<String> = vec![period.to_string()];
        for key in &columns {
            let cell = ledger.cell(period, key);
            let cost = cell.map(|c| c.cost).unwrap_or_else(Money::zero);
            row.push(cost.format_currency());
            row.push(
                cell.and_then(|c| c.percent_delta)
                    .map(format_percent)
                    .unwrap_or_default(),
            );
        }
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{annotate_percent_deltas, build_entity_ledger, project_for_display};
    use crate::models::{Entity, EntityCost, EntityId, PeriodIndex};

    fn pid(s: &str) -> PeriodId {
        s.parse().unwrap()
    }

    #[test]
    fn test_text_fallback_names_the_window() {
        let text = render_text_fallback((pid("2024-01-01"), pid("2024-05-01")));
        assert!(text.contains("2024-01-01 to 2024-05-01"));
        assert!(text.contains("HTML"));
    }

    #[test]
    fn test_summary_text_contains_costs_and_deltas() {
        let settings = Settings {
            entities: vec![Entity::new("111", "Dev")],
            featured: vec![EntityKey::real("111"), EntityKey::Total],
            ..Settings::default()
        };
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
        ];
        let mut ledger =
            project_for_display(&build_entity_ledger(&index, &records), &settings.featured);
        annotate_percent_deltas(&mut ledger);

        let text = render_summary_text(&ledger, &settings);
        assert!(text.contains("Dev"));
        assert!(text.contains("$150.00"));
        assert!(text.contains("50.00%"));
        assert!(text.contains("Others"));
    }
}
