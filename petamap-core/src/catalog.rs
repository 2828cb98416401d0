//! Static place and station catalogs.
//!
//! Catalogs are built once at startup (from the shipped Tokyo data or from
//! JSON overrides) and passed around by reference, so tests can substitute
//! small fixtures.

use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::matching::either_contains;

/// Fallback when a station pair is missing from the table.
pub const DEFAULT_TRANSIT_MINUTES: u32 = 20;

/// Walk estimate between two shops in the same neighborhood but listed
/// under different stations.
pub const NEIGHBORHOOD_WALK_MINUTES: u32 = 5;

/// One shop the route planner knows how to place on a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceEntry {
    pub name: String,
    pub short_name: String,
    pub neighborhood: String,
    /// Nearest station.
    pub station: String,
    /// Minutes on foot from `station`.
    pub walk_minutes: u32,
    /// Ready-made map search query for this shop.
    pub map_query: String,
    pub category: String,
}

/// Ordered shop catalog. Order matters: it is the tie-break for substring
/// lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceCatalog {
    entries: Vec<PlaceEntry>,
}

impl PlaceCatalog {
    pub fn new(entries: Vec<PlaceEntry>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a JSON array of entries.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<PlaceEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[PlaceEntry] {
        &self.entries
    }

    /// Resolve a stop name: exact name match first, then case-sensitive
    /// substring in either direction against the full and short names.
    /// First match in catalog order wins.
    pub fn lookup(&self, name: &str) -> Option<&PlaceEntry> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if let Some(entry) = self.entries.iter().find(|e| e.name == name) {
            return Some(entry);
        }
        self.entries.iter().find(|e| {
            either_contains(name, &e.name) || either_contains(name, &e.short_name)
        })
    }

    /// The shipped Tokyo shop catalog.
    pub fn builtin() -> Self {
        fn entry(
            name: &str,
            short_name: &str,
            neighborhood: &str,
            station: &str,
            walk_minutes: u32,
            map_query: &str,
            category: &str,
        ) -> PlaceEntry {
            PlaceEntry {
                name: name.into(),
                short_name: short_name.into(),
                neighborhood: neighborhood.into(),
                station: station.into(),
                walk_minutes,
                map_query: map_query.into(),
                category: category.into(),
            }
        }

        Self::new(vec![
            entry(
                "渋谷ロフト",
                "ロフト",
                "渋谷",
                "渋谷",
                5,
                "渋谷ロフト 東京都渋谷区",
                "雑貨",
            ),
            entry(
                "東急ハンズ新宿店",
                "東急ハンズ",
                "新宿",
                "新宿",
                7,
                "東急ハンズ新宿店 東京都新宿区",
                "雑貨",
            ),
            entry(
                "世界堂新宿本店",
                "世界堂",
                "新宿",
                "新宿",
                3,
                "世界堂新宿本店 東京都新宿区",
                "文具",
            ),
            entry(
                "キデイランド原宿店",
                "キデイランド",
                "原宿",
                "原宿",
                5,
                "キデイランド原宿店 東京都渋谷区神宮前",
                "キャラクター雑貨",
            ),
            entry(
                "表参道ヒルズ",
                "表参道ヒルズ",
                "表参道",
                "表参道",
                2,
                "表参道ヒルズ 東京都渋谷区神宮前",
                "商業施設",
            ),
            entry(
                "ヴィレッジヴァンガード下北沢店",
                "ヴィレッジヴァンガード",
                "下北沢",
                "下北沢",
                4,
                "ヴィレッジヴァンガード下北沢店 東京都世田谷区",
                "雑貨",
            ),
            entry(
                "中野ブロードウェイ",
                "ブロードウェイ",
                "中野",
                "中野",
                5,
                "中野ブロードウェイ 東京都中野区",
                "商業施設",
            ),
            entry(
                "サンリオワールドGINZA",
                "サンリオワールド",
                "銀座",
                "銀座",
                2,
                "サンリオワールドGINZA 東京都中央区銀座",
                "キャラクター雑貨",
            ),
            entry(
                "伊東屋銀座本店",
                "伊東屋",
                "銀座",
                "銀座",
                3,
                "伊東屋銀座本店 東京都中央区銀座",
                "文具",
            ),
            entry(
                "池袋パルコ",
                "パルコ",
                "池袋",
                "池袋",
                1,
                "池袋パルコ 東京都豊島区",
                "商業施設",
            ),
        ])
    }
}

/// Inter-station in-transit minutes, keyed by `"A-B"` pair strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationTable {
    pairs: HashMap<String, u32>,
}

impl StationTable {
    pub fn new(pairs: HashMap<String, u32>) -> Self {
        Self { pairs }
    }

    /// Load a table from a JSON object of `"A-B": minutes` pairs.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let pairs: HashMap<String, u32> = serde_json::from_str(json)?;
        Ok(Self::new(pairs))
    }

    /// In-transit minutes between two stations. Same station is 0. The
    /// table is consulted in both key orders; unknown pairs fall back to
    /// [`DEFAULT_TRANSIT_MINUTES`] with a warning.
    pub fn travel_minutes(&self, from: &str, to: &str) -> u32 {
        if from == to {
            return 0;
        }
        if let Some(&minutes) = self.pairs.get(&format!("{from}-{to}")) {
            return minutes;
        }
        if let Some(&minutes) = self.pairs.get(&format!("{to}-{from}")) {
            return minutes;
        }
        log::warn!("no travel time for {from}-{to}, assuming {DEFAULT_TRANSIT_MINUTES} min");
        DEFAULT_TRANSIT_MINUTES
    }

    /// The shipped Tokyo station table.
    pub fn builtin() -> Self {
        let data: [(&str, &str, u32); 13] = [
            ("新宿", "渋谷", 7),
            ("新宿", "原宿", 5),
            ("渋谷", "原宿", 2),
            ("渋谷", "表参道", 2),
            ("原宿", "表参道", 2),
            ("新宿", "池袋", 9),
            ("渋谷", "池袋", 16),
            ("原宿", "池袋", 7),
            ("新宿", "中野", 5),
            ("新宿", "下北沢", 9),
            ("渋谷", "下北沢", 7),
            ("新宿", "銀座", 16),
            ("渋谷", "銀座", 16),
        ];
        let pairs = data
            .iter()
            .map(|(a, b, minutes)| (format!("{a}-{b}"), *minutes))
            .collect();
        Self::new(pairs)
    }
}

/// Adjacent-neighborhood pairs close enough that crossing between them
/// never requires a train.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalkablePairs {
    pairs: Vec<(String, String)>,
}

impl WalkablePairs {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Symmetric membership test.
    pub fn is_walkable(&self, a: &str, b: &str) -> bool {
        self.pairs
            .iter()
            .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            ("渋谷".into(), "原宿".into()),
            ("原宿".into(), "表参道".into()),
        ])
    }
}
