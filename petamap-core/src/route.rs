//! Route formatting: map deep links, transit decisions, display summaries,
//! and the total-travel-time estimate.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::catalog::{NEIGHBORHOOD_WALK_MINUTES, PlaceCatalog, StationTable, WalkablePairs};
use crate::stop::{Stop, TravelMode, strip_separators};

/// Stability limit for the external URL format: 1 destination + 7 waypoints.
pub const MAX_URL_STOPS: usize = 8;

/// Shown when a route has no stops at all.
pub const EMPTY_ROUTE_MESSAGE: &str = "ルートなし";

/// Resolve a stop name to a map search string. Catalog hits return the
/// pre-built query; misses fall back to the literal name with separators
/// spaced out and a country suffix.
pub fn normalize_stop_name(name: &str, catalog: &PlaceCatalog) -> String {
    if let Some(entry) = catalog.lookup(name) {
        return entry.map_query.clone();
    }
    format!("{}, Japan", strip_separators(name))
}

/// Whether the route needs a train.
///
/// An explicit `train` hint on any stop decides immediately. Otherwise
/// consecutive resolvable pairs are checked: crossing neighborhoods
/// requires transit unless the pair is listed as walkable. Unresolvable
/// stops never force transit.
pub fn needs_transit(stops: &[Stop], catalog: &PlaceCatalog, walkable: &WalkablePairs) -> bool {
    if stops.iter().any(|s| s.travel_mode == Some(TravelMode::Train)) {
        return true;
    }
    stops.windows(2).any(|pair| {
        let (Some(a), Some(b)) = (catalog.lookup(&pair[0].name), catalog.lookup(&pair[1].name))
        else {
            return false;
        };
        a.neighborhood != b.neighborhood && !walkable.is_walkable(&a.neighborhood, &b.neighborhood)
    })
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

/// Build a Google Maps directions deep link for the route, or an empty
/// string when there are no stops.
pub fn build_maps_url(stops: &[Stop], catalog: &PlaceCatalog, walkable: &WalkablePairs) -> String {
    let capped = &stops[..stops.len().min(MAX_URL_STOPS)];
    let names: Vec<String> = capped
        .iter()
        .map(|s| normalize_stop_name(&s.name, catalog))
        .collect();
    let Some((destination, waypoints)) = names.split_last() else {
        return String::new();
    };

    let mode = if needs_transit(stops, catalog, walkable) {
        "transit"
    } else {
        "walking"
    };

    let mut url = format!(
        "https://www.google.com/maps/dir/?api=1&destination={}&travelmode={mode}",
        encode(destination)
    );
    if !waypoints.is_empty() {
        let joined: Vec<String> = waypoints.iter().map(|w| encode(w)).collect();
        url.push_str("&waypoints=");
        url.push_str(&joined.join("%7C"));
    }
    url
}

/// Condensed display summary: short names joined by arrows, truncated to
/// `max_count` with an overflow suffix.
pub fn build_route_summary(stops: &[Stop], max_count: usize) -> String {
    if stops.is_empty() {
        return EMPTY_ROUTE_MESSAGE.to_string();
    }
    let names: Vec<&str> = stops.iter().map(|s| s.short_name()).collect();
    if names.len() <= max_count {
        names.join(" → ")
    } else {
        format!(
            "{} 他{}件",
            names[..max_count].join(" → "),
            names.len() - max_count
        )
    }
}

/// Estimated minutes for the whole route: station-to-station transit plus
/// each resolved stop's walk from its station. Stops the catalog cannot
/// resolve are skipped.
pub fn estimate_route_minutes(
    stops: &[Stop],
    catalog: &PlaceCatalog,
    stations: &StationTable,
) -> u32 {
    let resolved: Vec<_> = stops
        .iter()
        .filter_map(|s| catalog.lookup(&s.name))
        .collect();

    let mut total: u32 = resolved.iter().map(|e| e.walk_minutes).sum();
    for pair in resolved.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        total += if a.station == b.station {
            0
        } else if a.neighborhood == b.neighborhood {
            NEIGHBORHOOD_WALK_MINUTES
        } else {
            stations.travel_minutes(&a.station, &b.station)
        };
    }
    total
}
