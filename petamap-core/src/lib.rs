//! petamap-core: scoring and route formatting for the petamap sticker-hunt
//! planner.
//!
//! Two pure utilities: a discovery-probability scorer over community
//! sighting reports, and a geo/route formatter that turns a stop list into
//! a Google Maps deep link plus a condensed summary. Both read injected
//! static catalogs and an injected clock; neither does I/O.

pub mod catalog;
pub mod matching;
pub mod probability;
pub mod report;
pub mod route;
pub mod stop;

pub use catalog::{
    DEFAULT_TRANSIT_MINUTES, NEIGHBORHOOD_WALK_MINUTES, PlaceCatalog, PlaceEntry, StationTable,
    WalkablePairs,
};
pub use probability::{
    MAX_PROBABILITY, MIN_PROBABILITY, ProbabilityFactor, ProbabilityLevel, ProbabilityResult,
    discovery_probability,
};
pub use report::{Report, ReportStatus, UNKNOWN_AGE_DAYS};
pub use route::{
    EMPTY_ROUTE_MESSAGE, MAX_URL_STOPS, build_maps_url, build_route_summary,
    estimate_route_minutes, needs_transit, normalize_stop_name,
};
pub use stop::{Stop, TravelMode};
