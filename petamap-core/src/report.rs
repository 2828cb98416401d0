//! Community report types: sighting and sold-out notices from the feed.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Asia::Tokyo;
use serde::{Deserialize, Serialize};

/// Age assigned to a report with no resolvable date. Always outside the
/// 7-day relevance window, so dateless reports are inert in scoring.
pub const UNKNOWN_AGE_DAYS: i64 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    #[serde(rename = "seen")]
    Seen,
    #[serde(rename = "bought")]
    Bought,
    #[serde(rename = "soldout")]
    SoldOut,
}

/// One user-submitted sighting or sold-out notice.
///
/// Reports are immutable once produced; the scorer only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Character / sticker series the report is about.
    pub subject: String,
    pub status: ReportStatus,
    /// Neighborhood label, possibly masked to an approximate area.
    pub neighborhood: String,
    pub shop_name: Option<String>,
    /// Report date, `YYYY-MM-DD` or `YYYY/MM/DD`.
    pub reported_on: Option<String>,
    /// Exact report time, when the platform recorded one. Consulted only
    /// when `reported_on` is absent or malformed.
    pub reported_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn new(
        subject: impl Into<String>,
        status: ReportStatus,
        neighborhood: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            status,
            neighborhood: neighborhood.into(),
            shop_name: None,
            reported_on: None,
            reported_at: None,
        }
    }

    pub fn with_shop(mut self, shop: impl Into<String>) -> Self {
        self.shop_name = Some(shop.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.reported_on = Some(date.into());
        self
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.reported_at = Some(at);
        self
    }

    /// Whole days between the report date and `now` on the JST calendar,
    /// floored at 0. A report with no resolvable date returns
    /// [`UNKNOWN_AGE_DAYS`].
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        let date = self
            .reported_on
            .as_deref()
            .and_then(parse_report_date)
            .or_else(|| self.reported_at.map(|at| at.with_timezone(&Tokyo).date_naive()));
        let Some(date) = date else {
            return UNKNOWN_AGE_DAYS;
        };
        let today = now.with_timezone(&Tokyo).date_naive();
        (today - date).num_days().max(0)
    }
}

fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .ok()
}
