// Risk ordering shared by the maintenance and expiration boards.
//
// Records sort by their worst item status, then by how many critical items
// they carry. The expiration board also breaks remaining ties by holder
// name; the maintenance board keeps input order instead.
use crate::types::{
    AlertItem, ExpirationItem, MaintenanceAlert, Status, StatusCounts, UnitExpiration,
};
use crate::util::contains_ci;
use std::cmp::Ordering;

/// Rank given to a record with no items, below every real status.
const EMPTY_RANK: u8 = 3;

/// A board record: an identifier plus a list of status-bearing items.
pub trait RiskRecord {
    type Item;

    fn identifier(&self) -> &str;
    fn items(&self) -> &[Self::Item];
    fn item_status(item: &Self::Item) -> Status;

    fn worst_rank(&self) -> u8 {
        self.items()
            .iter()
            .map(|i| Self::item_status(i).rank())
            .min()
            .unwrap_or(EMPTY_RANK)
    }

    fn count(&self, status: Status) -> usize {
        self.items()
            .iter()
            .filter(|i| Self::item_status(i) == status)
            .count()
    }

    fn status_counts(&self) -> StatusCounts {
        let mut acc = StatusCounts::default();
        for item in self.items() {
            match Self::item_status(item) {
                Status::Critical => acc.critical += 1,
                Status::Warning => acc.warning += 1,
                Status::Ok => acc.ok += 1,
            }
        }
        acc
    }

    fn has_status(&self, status: Status) -> bool {
        self.items().iter().any(|i| Self::item_status(i) == status)
    }

    /// Anything that is not ok.
    fn needs_attention(&self) -> bool {
        self.items().iter().any(|i| Self::item_status(i) != Status::Ok)
    }
}

impl RiskRecord for MaintenanceAlert {
    type Item = AlertItem;

    fn identifier(&self) -> &str {
        &self.unit
    }
    fn items(&self) -> &[AlertItem] {
        &self.items
    }
    fn item_status(item: &AlertItem) -> Status {
        item.status
    }
}

impl RiskRecord for UnitExpiration {
    type Item = ExpirationItem;

    fn identifier(&self) -> &str {
        &self.unit
    }
    fn items(&self) -> &[ExpirationItem] {
        &self.expirations
    }
    fn item_status(item: &ExpirationItem) -> Status {
        item.status
    }
}

/// Last-resort ordering once status and critical count tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Keep the order records arrived in.
    InputOrder,
    /// Ascending by identifier.
    Identifier,
}

pub fn compare_risk<R: RiskRecord>(a: &R, b: &R, tie_break: TieBreak) -> Ordering {
    a.worst_rank()
        .cmp(&b.worst_rank())
        .then_with(|| b.count(Status::Critical).cmp(&a.count(Status::Critical)))
        .then_with(|| match tie_break {
            TieBreak::InputOrder => Ordering::Equal,
            TieBreak::Identifier => a.identifier().cmp(b.identifier()),
        })
}

/// Stable sort, riskiest first.
pub fn rank<R: RiskRecord>(records: &mut [R], tie_break: TieBreak) {
    records.sort_by(|a, b| compare_risk(a, b, tie_break));
}

pub fn rank_alerts(alerts: &mut [MaintenanceAlert]) {
    rank(alerts, TieBreak::InputOrder);
}

pub fn rank_expirations(records: &mut [UnitExpiration]) {
    rank(records, TieBreak::Identifier);
}

/// Board filter on top of the identifier search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    /// At least one critical item.
    Urgent,
    /// At least one warning item.
    Upcoming,
}

impl StatusFilter {
    pub fn accepts<R: RiskRecord>(self, record: &R) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Urgent => record.has_status(Status::Critical),
            StatusFilter::Upcoming => record.has_status(Status::Warning),
        }
    }
}

/// Search, filter, then rank. Returns a fresh vector; the input is untouched.
pub fn board<R: RiskRecord + Clone>(
    records: &[R],
    search: &str,
    filter: StatusFilter,
    tie_break: TieBreak,
) -> Vec<R> {
    let mut out: Vec<R> = records
        .iter()
        .filter(|r| contains_ci(r.identifier(), search))
        .filter(|r| filter.accepts(*r))
        .cloned()
        .collect();
    rank(&mut out, tie_break);
    out
}
