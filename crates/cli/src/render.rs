//! Text rendering for the CLI views.

use pantry_core::{FoodItem, FreshnessState, ItemStatus};
use pantry_expiry::{ExpiryClassification, ExpiryClassifier};
use pantry_insights::{
    insights, percent, rank, AggregateSummary, Alert, AlertCounts, DonationCandidate, InvalidItemError,
    LogSummary,
};
use std::fmt::{self, Write};

/// Rendered view text.
pub type Rendered = Result<String, fmt::Error>;

/// Non-fatal banner for skipped records.
pub fn issues(issues: &[InvalidItemError]) -> Rendered {
    let mut out = String::new();
    if issues.is_empty() {
        return Ok(out);
    }
    writeln!(out, "! {} record(s) skipped:", issues.len())?;
    for issue in issues {
        match &issue.id {
            Some(id) => {
                writeln!(out, "    #{} (id {}): {}", issue.index, id, issue.error)?;
            }
            None => {
                writeln!(out, "    #{}: {}", issue.index, issue.error)?;
            }
        }
    }
    Ok(out)
}

pub fn dashboard(summary: &AggregateSummary) -> Rendered {
    let mut out = String::new();
    writeln!(out, "Pantry Dashboard")?;
    writeln!(out, "  Total items: {}", summary.total)?;
    for status in ItemStatus::ALL {
        writeln!(out, "  {:<10} {}", status.title(), summary.status(status))?;
    }
    writeln!(out, "Available by freshness")?;
    writeln!(out, "  Fresh       {}", summary.freshness(FreshnessState::Fresh))?;
    writeln!(out, "  Near expiry {}", summary.freshness(FreshnessState::NearExpiry))?;
    writeln!(out, "  Expired     {}", summary.freshness(FreshnessState::Expired))?;

    let near = summary.freshness(FreshnessState::NearExpiry);
    let expired = summary.freshness(FreshnessState::Expired);
    if near > 0 || expired > 0 {
        writeln!(
            out,
            "You have {} item(s) expiring soon and {} expired item(s).",
            near, expired
        )?;
    }
    Ok(out)
}

pub fn alerts(alerts: &[Alert]) -> Rendered {
    let mut out = String::new();
    let counts = AlertCounts::from_alerts(alerts);
    writeln!(
        out,
        "Expiry alerts ({} total, {} expired, {} near expiry)",
        counts.total, counts.expired, counts.near_expiry
    )?;
    if alerts.is_empty() {
        writeln!(out, "  All good! No items need attention.")?;
    }
    for alert in alerts {
        writeln!(
            out,
            "  [{}] {} ({}) - {} | expires {}",
            alert.classification.urgency,
            alert.item.name,
            alert.item.category,
            alert.classification.label(),
            alert.item.expiry_date,
        )?;
    }
    Ok(out)
}

pub fn donations(candidates: &[DonationCandidate], window_days: i64) -> Rendered {
    let mut out = String::new();
    writeln!(
        out,
        "Donation candidates - items expiring within {} days ({})",
        window_days,
        candidates.len()
    )?;
    for c in candidates {
        writeln!(
            out,
            "  {} | {} {} {} | {} | expires {}",
            c.item.id,
            c.item.name,
            c.item.quantity,
            c.item.unit,
            c.classification.short_label(),
            c.item.expiry_date,
        )?;
    }
    Ok(out)
}

pub fn analytics(summary: &AggregateSummary, logs: Option<&LogSummary>) -> Rendered {
    let mut out = String::new();
    writeln!(out, "Waste Analytics")?;
    writeln!(out, "  Total items: {}", summary.total)?;
    writeln!(out, "  Available:   {}", summary.status(ItemStatus::Available))?;
    writeln!(
        out,
        "  Used:        {} ({}% of total)",
        summary.status(ItemStatus::Used),
        percent(summary.rates.usage_rate)
    )?;
    writeln!(
        out,
        "  Donated:     {} ({}% of total)",
        summary.status(ItemStatus::Donated),
        percent(summary.rates.donation_rate)
    )?;
    writeln!(
        out,
        "  Wasted:      {} ({}% of total)",
        summary.status(ItemStatus::Wasted),
        percent(summary.rates.waste_rate)
    )?;

    for (title, tally) in [
        ("Waste by category", &summary.waste_by_category),
        ("Waste by reason", &summary.waste_by_reason),
    ] {
        let ranked = rank(tally);
        if ranked.is_empty() {
            continue;
        }
        writeln!(out, "{}", title)?;
        for entry in ranked {
            let bar = "#".repeat((entry.share_of_max * 20.0).round() as usize);
            writeln!(out, "  {:<16} {:>4}  {}", entry.key, entry.count, bar)?;
        }
    }

    let advice = insights(summary);
    if !advice.is_empty() {
        writeln!(out, "Insights & Recommendations")?;
        for insight in advice {
            writeln!(out, "  [{}] {}: {}", insight.tone().as_str(), insight.title(), insight.message())?;
        }
    }

    if let Some(logs) = logs {
        writeln!(out, "Food log ({})", logs.period)?;
        for (action, totals) in &logs.by_action {
            writeln!(
                out,
                "  {:<8} {:>4} entries, {} total quantity",
                action, totals.count, totals.total_quantity
            )?;
        }
        writeln!(
            out,
            "  {} entries, {} total quantity processed",
            logs.total_logged_items, logs.total_quantity_processed
        )?;
    }
    Ok(out)
}

pub fn inventory(items: &[&FoodItem], classifier: &ExpiryClassifier, today: chrono::NaiveDate) -> Rendered {
    let mut out = String::new();
    writeln!(out, "Inventory ({})", items.len())?;
    if items.is_empty() {
        writeln!(out, "  No items found. Try adjusting your search or filters.")?;
    }
    for item in items {
        let c = classifier.classify_item(item, today);
        writeln!(
            out,
            "  {} | {} | {} | {} {} | {} | {}",
            item.id,
            item.name,
            item.category,
            item.quantity,
            item.unit,
            c.short_label(),
            item.status.title(),
        )?;
    }
    Ok(out)
}

pub fn classification(date: chrono::NaiveDate, c: &ExpiryClassification) -> Rendered {
    Ok(format!(
        "{}: {} day(s) left, {} ({})\n",
        date,
        c.days_left,
        c.state,
        c.label()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pantry_core::FoodRecord;
    use pantry_insights::InventoryAggregator;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 14).unwrap()
    }

    fn records() -> Vec<FoodRecord> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Milk", "category": "Dairy", "expiry_date": "2025-01-14"},
            {"id": 2, "name": "Cheese", "category": "Dairy", "expiry_date": "2025-01-01",
             "status": "WASTED", "reason_of_waste": "Spoiled"},
            {"id": 3, "name": "Bad", "expiry_date": "nope"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_dashboard_warns_about_expiring_items() {
        let report = InventoryAggregator::default().aggregate(&records(), today());
        let text = dashboard(&report.summary).unwrap();
        assert!(text.contains("Total items: 2"));
        assert!(text.contains("1 item(s) expiring soon and 0 expired"));
    }

    #[test]
    fn test_alerts_render_labels() {
        let report = InventoryAggregator::default().aggregate(&records(), today());
        let text = alerts(&report.alerts).unwrap();
        assert!(text.contains("[expires-today] Milk (Dairy) - Expires Today"));
    }

    #[test]
    fn test_issue_banner() {
        let report = InventoryAggregator::default().aggregate(&records(), today());
        let text = issues(&report.issues).unwrap();
        assert!(text.starts_with("! 1 record(s) skipped"));
        assert!(text.contains("(id 3)"));
        assert!(issues(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_analytics_percentages() {
        let report = InventoryAggregator::default().aggregate(&records(), today());
        let text = analytics(&report.summary, None).unwrap();
        assert!(text.contains("Wasted:      1 (50% of total)"));
        assert!(text.contains("Spoiled"));
        assert!(text.contains("[danger] High Waste Rate: Your waste rate is 50%."));
        assert!(text.contains("[warning] Items Need Attention"));
    }

    #[test]
    fn test_empty_analytics_suggests_getting_started() {
        let report = InventoryAggregator::default().aggregate(&[], today());
        let text = analytics(&report.summary, None).unwrap();
        assert!(text.contains("[info] Getting Started"));
        assert!(!text.contains("Great Job"));
    }
}
