//! Expiry classification (Layer 1)
//!
//! Days-until-expiry, freshness buckets, urgency tiers and labels.

#![warn(missing_docs)]

pub mod classifier;
pub mod policy;
pub mod reconcile;
pub mod urgency;

pub use classifier::{today, ExpiryClassification, ExpiryClassifier};
pub use policy::{ExpiryPolicy, PolicyError};
pub use reconcile::{CacheCheck, Reconciled};
pub use urgency::Urgency;
