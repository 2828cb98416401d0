//! Discovery probability: how likely a planned route is to turn up new
//! stickers, estimated from recent community reports.
//!
//! Additive heuristic with a factor trail for display. Deterministic for a
//! given `now`; callers inject the clock instead of the engine reading it.

use chrono::{DateTime, Datelike, Utc, Weekday};
use chrono_tz::Asia::Tokyo;
use serde::Serialize;

use crate::matching::{either_contains, matches_any};
use crate::report::{Report, ReportStatus};
use crate::stop::Stop;

pub const MIN_PROBABILITY: u32 = 10;
pub const MAX_PROBABILITY: u32 = 95;

const BASE_SCORE: i32 = 30;

/// Reports older than this never count toward the score.
const RELEVANCE_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbabilityLevel {
    #[serde(rename = "hot")]
    Hot,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "low")]
    Low,
}

impl ProbabilityLevel {
    fn classify(probability: u32) -> Self {
        if probability >= 80 {
            ProbabilityLevel::Hot
        } else if probability >= 60 {
            ProbabilityLevel::High
        } else if probability >= 40 {
            ProbabilityLevel::Medium
        } else {
            ProbabilityLevel::Low
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ProbabilityLevel::Hot => "🔥",
            ProbabilityLevel::High => "✨",
            ProbabilityLevel::Medium => "👀",
            ProbabilityLevel::Low => "🍀",
        }
    }
}

/// One additive or subtractive contribution, kept as an explanation trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityFactor {
    pub name: &'static str,
    pub value: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityResult {
    /// Clamped to `[MIN_PROBABILITY, MAX_PROBABILITY]`.
    pub probability: u32,
    pub level: ProbabilityLevel,
    pub emoji: &'static str,
    pub factors: Vec<ProbabilityFactor>,
}

/// Score a planned route against the community report feed.
///
/// Pure: inputs are read-only and the only time source is `now`. Never
/// panics; reports missing fields simply drop out of the factors that need
/// those fields.
pub fn discovery_probability(
    stops: &[Stop],
    reports: &[Report],
    favorite_subjects: &[String],
    target_neighborhoods: &[String],
    now: DateTime<Utc>,
) -> ProbabilityResult {
    let mut score = BASE_SCORE;
    let mut factors = vec![ProbabilityFactor {
        name: "baseline",
        value: BASE_SCORE,
        description: "ベーススコア".into(),
    }];

    // Reports for the target area inside the relevance window, with ages
    // computed once.
    let relevant: Vec<(&Report, i64)> = reports
        .iter()
        .map(|r| (r, r.age_days(now)))
        .filter(|(r, age)| {
            *age <= RELEVANCE_WINDOW_DAYS && matches_any(&r.neighborhood, target_neighborhoods)
        })
        .collect();

    let very_recent = relevant
        .iter()
        .filter(|(r, age)| r.status == ReportStatus::Seen && *age <= 2)
        .count();
    if very_recent > 0 {
        let bonus = 25 + (very_recent as i32 * 5).min(15);
        score += bonus;
        factors.push(ProbabilityFactor {
            name: "very_recent_sighting",
            value: bonus,
            description: format!("2日以内の目撃 {very_recent}件"),
        });
    } else {
        let weekly = relevant
            .iter()
            .filter(|(r, age)| r.status == ReportStatus::Seen && *age > 2 && *age <= 7)
            .count();
        if weekly > 0 {
            score += 15;
            factors.push(ProbabilityFactor {
                name: "weekly_sighting",
                value: 15,
                description: format!("1週間以内の目撃 {weekly}件"),
            });
        }
    }

    let soldout = relevant
        .iter()
        .filter(|(r, age)| r.status == ReportStatus::SoldOut && *age <= 3)
        .count();
    if soldout > 0 {
        let penalty = (soldout as i32 * 5).min(15);
        score -= penalty;
        factors.push(ProbabilityFactor {
            name: "soldout_reports",
            value: -penalty,
            description: format!("売り切れ報告 {soldout}件"),
        });
    }

    if !favorite_subjects.is_empty() {
        let favorite_hits: Vec<&str> = relevant
            .iter()
            .filter(|(r, _)| {
                r.status == ReportStatus::Seen && matches_any(&r.subject, favorite_subjects)
            })
            .map(|(r, _)| r.subject.as_str())
            .collect();
        if let Some(first) = favorite_hits.first() {
            let bonus = 10 + (favorite_hits.len() as i32 * 5).min(10);
            score += bonus;
            factors.push(ProbabilityFactor {
                name: "favorite_sighting",
                value: bonus,
                description: format!("推し「{first}」の目撃あり"),
            });
        }
    }

    let stop_bonus = (stops.len() as i32 * 3).min(15);
    if stop_bonus > 0 {
        score += stop_bonus;
        factors.push(ProbabilityFactor {
            name: "stop_count_bonus",
            value: stop_bonus,
            description: format!("立ち寄り{}件", stops.len()),
        });
    }

    let weekday = now.with_timezone(&Tokyo).weekday();
    if matches!(weekday, Weekday::Mon | Weekday::Tue | Weekday::Wed) {
        score += 5;
        factors.push(ProbabilityFactor {
            name: "weekday_bonus",
            value: 5,
            description: "週前半の入荷タイミング".into(),
        });
    }

    // Only the first matching report is age-checked here, unlike the counts
    // above. That asymmetry is inherited behavior; keep it.
    let shop_hit = relevant.iter().find(|(r, _)| {
        r.status == ReportStatus::Seen
            && r.shop_name
                .as_deref()
                .is_some_and(|shop| stops.iter().any(|s| either_contains(&s.name, shop)))
    });
    if let Some((r, age)) = shop_hit {
        if *age <= 3 {
            let shop = r.shop_name.as_deref().unwrap_or_default();
            score += 10;
            factors.push(ProbabilityFactor {
                name: "shop_match",
                value: 10,
                description: format!("「{shop}」での目撃報告"),
            });
        }
    }

    let probability = score.clamp(MIN_PROBABILITY as i32, MAX_PROBABILITY as i32) as u32;
    let level = ProbabilityLevel::classify(probability);
    ProbabilityResult {
        probability,
        level,
        emoji: level.emoji(),
        factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // 2026-02-19 is a Thursday; noon UTC is 21:00 JST, still Thursday.
    fn thursday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 19, 12, 0, 0).unwrap()
    }

    // 2026-02-16 is a Monday; 03:00 UTC is 12:00 JST Monday.
    fn monday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 16, 3, 0, 0).unwrap()
    }

    fn seen(neighborhood: &str, date: &str) -> Report {
        Report::new("シナモロール", ReportStatus::Seen, neighborhood).with_date(date)
    }

    fn targets(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_empty_inputs_yield_baseline() {
        let result = discovery_probability(&[], &[], &[], &[], thursday());
        assert_eq!(result.probability, 30);
        assert_eq!(result.level, ProbabilityLevel::Low);
        assert_eq!(result.factors.len(), 1);
        assert_eq!(result.factors[0].name, "baseline");
    }

    #[test]
    fn test_weekday_bonus_on_monday() {
        let result = discovery_probability(&[], &[], &[], &[], monday());
        assert_eq!(result.probability, 35);
        assert!(result.factors.iter().any(|f| f.name == "weekday_bonus"));
    }

    #[test]
    fn test_very_recent_sighting_bonus() {
        let reports = vec![seen("渋谷", "2026-02-19")];
        let result =
            discovery_probability(&[], &reports, &[], &targets(&["渋谷"]), thursday());
        // 30 + (25 + 5)
        assert_eq!(result.probability, 60);
        assert_eq!(result.level, ProbabilityLevel::High);
        assert_eq!(result.emoji, "✨");
    }

    #[test]
    fn test_very_recent_bonus_caps_at_40() {
        let reports: Vec<Report> = (0..6).map(|_| seen("渋谷", "2026-02-19")).collect();
        let result =
            discovery_probability(&[], &reports, &[], &targets(&["渋谷"]), thursday());
        // 30 + (25 + min(30, 15))
        assert_eq!(result.probability, 70);
    }

    #[test]
    fn test_weekly_sighting_only_when_no_recent_one() {
        let reports = vec![seen("渋谷", "2026-02-14")]; // 5 days old
        let result =
            discovery_probability(&[], &reports, &[], &targets(&["渋谷"]), thursday());
        assert_eq!(result.probability, 45);
        assert!(result.factors.iter().any(|f| f.name == "weekly_sighting"));

        // A fresh sighting suppresses the weekly factor.
        let both = vec![seen("渋谷", "2026-02-14"), seen("渋谷", "2026-02-19")];
        let result = discovery_probability(&[], &both, &[], &targets(&["渋谷"]), thursday());
        assert!(!result.factors.iter().any(|f| f.name == "weekly_sighting"));
        assert!(result
            .factors
            .iter()
            .any(|f| f.name == "very_recent_sighting"));
    }

    #[test]
    fn test_soldout_penalty() {
        let reports = vec![
            seen("渋谷", "2026-02-19"),
            Report::new("シナモロール", ReportStatus::SoldOut, "渋谷")
                .with_date("2026-02-18"),
        ];
        let result =
            discovery_probability(&[], &reports, &[], &targets(&["渋谷"]), thursday());
        // 30 + 30 - 5
        assert_eq!(result.probability, 55);
        let penalty = result
            .factors
            .iter()
            .find(|f| f.name == "soldout_reports")
            .unwrap();
        assert_eq!(penalty.value, -5);
    }

    #[test]
    fn test_favorite_sighting_cites_subject() {
        let reports = vec![seen("渋谷", "2026-02-19")];
        let favorites = targets(&["シナモロール"]);
        let result =
            discovery_probability(&[], &reports, &favorites, &targets(&["渋谷"]), thursday());
        // 30 + 30 + (10 + 5)
        assert_eq!(result.probability, 75);
        let factor = result
            .factors
            .iter()
            .find(|f| f.name == "favorite_sighting")
            .unwrap();
        assert!(factor.description.contains("シナモロール"));
    }

    #[test]
    fn test_stop_count_bonus_caps_at_15() {
        let stops: Vec<Stop> = (0..10).map(|i| Stop::new(format!("店{i}"))).collect();
        let result = discovery_probability(&stops, &[], &[], &[], thursday());
        assert_eq!(result.probability, 45);
    }

    #[test]
    fn test_shop_match_checks_only_first_hit() {
        let stops = vec![Stop::new("渋谷×ロフト")];
        // First matching report is too old for the shop bonus; a later one
        // is fresh. Only the first is consulted.
        let reports = vec![
            seen("渋谷", "2026-02-13").with_shop("ロフト"),
            seen("渋谷", "2026-02-19").with_shop("ロフト"),
        ];
        let result =
            discovery_probability(&stops, &reports, &[], &targets(&["渋谷"]), thursday());
        assert!(!result.factors.iter().any(|f| f.name == "shop_match"));

        // With the fresh report first, the bonus fires and cites the shop.
        let reports = vec![
            seen("渋谷", "2026-02-19").with_shop("ロフト"),
            seen("渋谷", "2026-02-13").with_shop("ロフト"),
        ];
        let result =
            discovery_probability(&stops, &reports, &[], &targets(&["渋谷"]), thursday());
        let factor = result
            .factors
            .iter()
            .find(|f| f.name == "shop_match")
            .unwrap();
        assert!(factor.description.contains("ロフト"));
    }

    #[test]
    fn test_neighborhood_relevance_filter() {
        // Out-of-area and stale reports contribute nothing.
        let reports = vec![
            seen("池袋", "2026-02-19"),
            seen("渋谷", "2026-02-01"),
            Report::new("クロミ", ReportStatus::Seen, "渋谷"), // dateless
        ];
        let result =
            discovery_probability(&[], &reports, &[], &targets(&["渋谷"]), thursday());
        assert_eq!(result.probability, 30);
    }

    #[test]
    fn test_clamped_to_upper_bound() {
        let stops = vec![
            Stop::new("渋谷×ロフト"),
            Stop::new("原宿×キデイランド"),
            Stop::new("新宿×世界堂"),
            Stop::new("新宿×東急ハンズ"),
            Stop::new("表参道ヒルズ"),
        ];
        let reports = vec![
            seen("渋谷", "2026-02-16").with_shop("ロフト"),
            seen("渋谷", "2026-02-16"),
            seen("渋谷", "2026-02-16"),
            seen("原宿", "2026-02-16"),
        ];
        let favorites = targets(&["シナモロール"]);
        let result = discovery_probability(
            &stops,
            &reports,
            &favorites,
            &targets(&["渋谷", "原宿"]),
            monday(),
        );
        // Raw: 30 + 40 + 20 + 15 + 5 + 10 = 120, clamped.
        assert_eq!(result.probability, MAX_PROBABILITY);
        assert_eq!(result.level, ProbabilityLevel::Hot);
        assert_eq!(result.emoji, "🔥");
    }

    #[test]
    fn test_extra_recent_report_never_lowers_score() {
        let stops = vec![Stop::new("渋谷×ロフト")];
        let favorites = targets(&["クロミ"]);
        let area = targets(&["渋谷"]);
        let base_reports = vec![
            seen("渋谷", "2026-02-15"),
            Report::new("クロミ", ReportStatus::SoldOut, "渋谷").with_date("2026-02-18"),
        ];
        let without = discovery_probability(&stops, &base_reports, &favorites, &area, thursday());

        let mut with_extra = base_reports.clone();
        with_extra.push(seen("渋谷", "2026-02-19"));
        let with = discovery_probability(&stops, &with_extra, &favorites, &area, thursday());

        assert!(with.probability >= without.probability);
    }
}
