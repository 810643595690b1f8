//! Consumer map links for an itinerary.

use crate::place::{Itinerary, Place};
use crate::traits::Located;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1";
const SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1";

/// Percent-encoded `|`, the waypoint separator.
const WAYPOINT_SEPARATOR: &str = "%7C";

/// `lat,lng` exactly as received; no rounding.
fn coordinate((lat, lng): (f64, f64)) -> String {
    format!("{lat},{lng}")
}

/// Driving directions through every place in visiting order.
///
/// Origin is the first place, destination the last, and everything strictly
/// in between becomes a waypoint. Returns `None` for an empty itinerary.
pub fn route_url(itinerary: &Itinerary) -> Option<String> {
    let origin = itinerary.first()?;
    let destination = itinerary.last()?;
    let places = itinerary.places();

    let waypoints = if places.len() > 2 {
        places[1..places.len() - 1]
            .iter()
            .map(|place| coordinate(place.location()))
            .collect::<Vec<_>>()
            .join(WAYPOINT_SEPARATOR)
    } else {
        String::new()
    };

    Some(format!(
        "{DIRECTIONS_BASE}&origin={}&destination={}&waypoints={}&travelmode=driving",
        coordinate(origin.location()),
        coordinate(destination.location()),
        waypoints
    ))
}

/// Map search link for a single place.
pub fn place_search_url(place: &Place) -> String {
    format!("{SEARCH_BASE}&query={}", coordinate(place.location()))
}
