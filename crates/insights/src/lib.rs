//! Inventory insights (Layer 2)
//!
//! Status and freshness tallies, alert and donation lists, inventory
//! filtering, food-log analytics and recommendations.

#![warn(missing_docs)]

pub mod aggregator;
pub mod alerts;
pub mod donation;
pub mod filter;
pub mod insight;
pub mod logs;
pub mod ranking;

pub use aggregator::{
    percent, ratio, AggregateReport, AggregateSummary, InvalidItemError, InventoryAggregator,
    Normalized, Rates,
};
pub use alerts::{Alert, AlertCounts};
pub use donation::DonationCandidate;
pub use filter::{status_counts, InventoryFilter};
pub use insight::{insights, Insight, Tone};
pub use logs::{log_summary, normalize_logs, ActionTotals, AnalyticsPeriod, LogSummary};
pub use ranking::{rank, RankedEntry};
