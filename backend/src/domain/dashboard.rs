//! Derived statistics for the dashboard and reports screens.
//!
//! Calendar comparisons (same day, same month) use the local date in the
//! time zone of `now`; the weekly window is measured in elapsed
//! milliseconds.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use shared::{DashboardStats, FinancialReport};
use tracing::debug;

use crate::storage::StoreData;

/// Flat monthly fee assumed per member when estimating pending collections
pub const EXPECTED_MONTHLY_FEE: f64 = 2500.0;

pub const WEEK_WINDOW_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub fn compute_dashboard_stats<Tz: TimeZone>(data: &StoreData, now: &DateTime<Tz>) -> DashboardStats {
    let today_collection = sum_amounts(
        data.collections.iter().map(|c| (c.date, c.amount)),
        |date| is_same_day(date, now),
    );
    let week_collection = sum_amounts(
        data.collections.iter().map(|c| (c.date, c.amount)),
        |date| is_within_days(date, now, WEEK_WINDOW_DAYS),
    );
    let month_collection = sum_amounts(
        data.collections.iter().map(|c| (c.date, c.amount)),
        |date| is_same_month(date, now),
    );
    let month_expenses = sum_amounts(
        data.expenses.iter().map(|e| (e.date, e.amount)),
        |date| is_same_month(date, now),
    );

    let member_count = data.members.len();
    let pending_collection = (member_count as f64 * EXPECTED_MONTHLY_FEE - month_collection).max(0.0);

    let today_expiry = data
        .members
        .iter()
        .filter(|m| is_same_day(m.membership_expires_on, now))
        .count();

    let stats = DashboardStats {
        active_memberships: member_count,
        active_members: member_count,
        today_expiry,
        today_collection,
        week_collection,
        pending_collection,
        month_collection,
        month_expenses,
    };

    debug!("Computed dashboard stats: {:?}", stats);
    stats
}

/// All-time totals across every stored collection and expense
pub fn compute_financial_report(data: &StoreData) -> FinancialReport {
    let total_collections: f64 = data.collections.iter().map(|c| c.amount).sum();
    let total_expenses: f64 = data.expenses.iter().map(|e| e.amount).sum();

    FinancialReport {
        total_members: data.members.len(),
        total_collections,
        total_expenses,
        net_profit: total_collections - total_expenses,
    }
}

fn sum_amounts(
    records: impl Iterator<Item = (DateTime<Utc>, f64)>,
    include: impl Fn(DateTime<Utc>) -> bool,
) -> f64 {
    records
        .filter(|(date, _)| include(*date))
        .map(|(_, amount)| amount)
        .sum()
}

pub fn is_same_day<Tz: TimeZone>(date: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    let local = date.with_timezone(&now.timezone());
    local.year() == now.year() && local.month() == now.month() && local.day() == now.day()
}

pub fn is_same_month<Tz: TimeZone>(date: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    let local = date.with_timezone(&now.timezone());
    local.year() == now.year() && local.month() == now.month()
}

/// `0 <= now - date <= days`, both ends inclusive
pub fn is_within_days<Tz: TimeZone>(date: DateTime<Utc>, now: &DateTime<Tz>, days: i64) -> bool {
    let diff = now.timestamp_millis() - date.timestamp_millis();
    diff >= 0 && diff <= days * MILLIS_PER_DAY
}
