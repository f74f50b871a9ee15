//! Report run orchestration
//!
//! One run: query the cost service, build and project the entity ledger,
//! annotate deltas, merge the category views, render the document, and hand
//! it to the mailer. Every stage fully consumes its predecessor's output;
//! all structures are built fresh per run.

use tracing::info;

use crate::config::Settings;
use crate::error::{CostwatchError, CostwatchResult};
use crate::ledger::{
    annotate_percent_deltas, build_category_ledger, build_entity_ledger, merge_entity_views,
    project_for_display, Ledger,
};
use crate::mail::{ReportEmail, ReportMailer};
use crate::models::{EntityCost, EntityId, Money, PeriodId, PeriodIndex};
use crate::query::CostQuery;
use crate::render::{render_document, render_text_fallback, BreakdownSection};

/// A fully-computed report, ready to render
#[derive(Debug, Clone)]
pub struct CostReport {
    /// Projected entity ledger with delta annotations
    pub summary: Ledger,
    /// Per-entity category breakdown, in catalog order; empty when no tag
    /// filter is configured
    pub sections: Vec<BreakdownSection>,
    /// First and last period covered by the summary ledger
    pub window: (PeriodId, PeriodId),
}

/// Build the report for one window from upstream query results.
pub fn build_report(
    settings: &Settings,
    window: &PeriodIndex,
    query: &dyn CostQuery,
) -> CostwatchResult<CostReport> {
    settings.validate()?;

    let entity_ids: Vec<EntityId> = settings.entities.iter().map(|e| e.id.clone()).collect();

    let records = query.entity_period_totals(window, &entity_ids)?;
    let records = drop_zero_total_entities(records);
    info!(records = records.len(), "entity period totals received");

    let ledger = build_entity_ledger(window, &records);
    let mut summary = project_for_display(&ledger, &settings.featured);
    annotate_percent_deltas(&mut summary);

    let (Some(first), Some(last)) = (summary.first_period(), summary.last_period()) else {
        return Err(CostwatchError::Config(
            "reporting window is empty; nothing to report".into(),
        ));
    };

    let mut sections = Vec::new();
    if let Some(tag) = &settings.tag_filter {
        let overall_records = query.category_period_totals(window, &entity_ids, None)?;
        let filtered_records = query.category_period_totals(window, &entity_ids, Some(tag))?;
        info!(
            overall = overall_records.len(),
            filtered = filtered_records.len(),
            tag = %format!("{}={}", tag.key, tag.value),
            "category period totals received"
        );

        let overall = build_category_ledger(&entity_ids, &overall_records);
        let filtered = build_category_ledger(&entity_ids, &filtered_records);

        for entity in &settings.entities {
            let rows = merge_entity_views(&overall, &filtered, &entity.id);
            sections.push(BreakdownSection {
                entity: entity.clone(),
                rows,
            });
        }
    }

    Ok(CostReport {
        summary,
        sections,
        window: (first, last),
    })
}

/// The upstream caller contract expects zero-cost entities to be filtered
/// before ledger building; an entity with records but a zero window total is
/// dropped here, not treated as an error.
fn drop_zero_total_entities(records: Vec<EntityCost>) -> Vec<EntityCost> {
    use std::collections::BTreeMap;

    let mut totals: BTreeMap<EntityId, Money> = BTreeMap::new();
    for record in &records {
        *totals
            .entry(record.entity.clone())
            .or_insert_with(Money::zero) += record.amount;
    }

    for (entity, total) in &totals {
        if total.is_zero() {
            info!(entity = %entity, "entity has zero cost over the window; excluding");
        }
    }

    records
        .into_iter()
        .filter(|r| !totals.get(&r.entity).copied().unwrap_or_default().is_zero())
        .collect()
}

/// Render a built report into the mail envelope configured in settings.
pub fn render_email(report: &CostReport, settings: &Settings) -> ReportEmail {
    let breakdown = settings
        .tag_filter
        .as_ref()
        .map(|tag| (tag, report.sections.as_slice()));

    ReportEmail {
        subject: settings.mail.subject.clone(),
        sender: settings.mail.sender.clone(),
        recipients: settings.mail.recipients.clone(),
        html_body: render_document(&report.summary, breakdown, report.window, settings),
        text_body: render_text_fallback(report.window),
    }
}

/// Run a full report: build, render, deliver.
pub fn run_report(
    settings: &Settings,
    window: &PeriodIndex,
    query: &dyn CostQuery,
    mailer: &dyn ReportMailer,
) -> CostwatchResult<()> {
    let report = build_report(settings, window, query)?;
    let email = render_email(&report, settings);
    mailer.deliver(&email)?;
    info!(
        window_start = %report.window.0,
        window_end = %report.window.1,
        "report run complete"
    );
    Ok(())
}
