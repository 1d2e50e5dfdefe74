use crate::entities::EventCategory;
use crate::entities::booking::SaleRecord;
use crate::entities::event::Event;
use crate::utils::calendar::trailing_days;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use time::Date;

/// Number of calendar days covered by the sales chart, today included.
pub const STATS_WINDOW_DAYS: u16 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizerStats {
    /// Confirmed revenue per UTC day, oldest first, one entry per day.
    pub sales_volume: Vec<(Date, Decimal)>,
    /// Tickets sold per category, over categories the organizer has events in.
    pub category_distribution: Vec<(EventCategory, i64)>,
}

/// Build the dashboard numbers from an organizer's events and the confirmed
/// sales in the window ending at `today`.
///
/// Sales outside the window are ignored, so callers may over-fetch.
pub fn aggregate_organizer_stats(today: Date, events: &[Event], sales: &[SaleRecord]) -> OrganizerStats {
    let mut daily: BTreeMap<Date, Decimal> = trailing_days(today, STATS_WINDOW_DAYS)
        .into_iter()
        .map(|day| (day, Decimal::ZERO))
        .collect();
    for sale in sales {
        let day = sale.created_at.to_offset(time::UtcOffset::UTC).date();
        if let Some(amount) = daily.get_mut(&day) {
            *amount += sale.total_amount;
        }
    }

    let mut categories: BTreeMap<EventCategory, i64> = BTreeMap::new();
    for event in events {
        *categories.entry(event.category).or_default() += i64::from(event.sold_tickets);
    }

    OrganizerStats {
        sales_volume: daily.into_iter().collect(),
        category_distribution: categories.into_iter().collect(),
    }
}
