//! Status & Alert Engine.
//!
//! Pure functions over inventory rows. The stored `status` column stays the
//! single source of truth for lifecycle state; everything here is a read-time
//! overlay computed against a caller-supplied `now` and alert window.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

use crate::entities::inventory_item::{ItemStatus, Model};

/// True when the item has a maintenance date due within the lookahead window
/// (or already past) and the item is not retired.
pub fn is_maintenance_alert(item: &Model, now: DateTime<Utc>, window: Duration) -> bool {
    if item.status == ItemStatus::Retired {
        return false;
    }
    match item.maintenance_due {
        Some(due) => due <= (now + window).date_naive(),
        None => false,
    }
}

/// True when the maintenance date has passed outright.
pub fn is_overdue(item: &Model, now: DateTime<Utc>) -> bool {
    match item.maintenance_due {
        Some(due) => due < now.date_naive(),
        None => false,
    }
}

/// Count of items per status. Every status value is present in the map even
/// when its count is zero, so dashboard rendering never has missing keys.
pub fn status_counts(items: &[Model]) -> BTreeMap<ItemStatus, u64> {
    let mut counts: BTreeMap<ItemStatus, u64> = ItemStatus::iter().map(|s| (s, 0)).collect();
    for item in items {
        *counts.entry(item.status).or_default() += 1;
    }
    counts
}

/// Items currently in an alert state, earliest due date first, ties broken by
/// id ascending.
pub fn maintenance_alerts(items: &[Model], now: DateTime<Utc>, window: Duration) -> Vec<Model> {
    let mut alerting: Vec<Model> = items
        .iter()
        .filter(|item| is_maintenance_alert(item, now, window))
        .cloned()
        .collect();
    alerting.sort_by(|a, b| {
        a.maintenance_due
            .cmp(&b.maintenance_due)
            .then(a.id.cmp(&b.id))
    });
    alerting
}
