//! Places, itineraries and destinations.
//!
//! A [`Place`] is parsed straight from the generation service's JSON. The
//! model is loose about types (coordinates sometimes arrive as strings,
//! sequence numbers as `"3"`), so the deserializers here coerce those into
//! proper numbers and reject anything that is not numeric.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::renumber;
use crate::haversine::haversine_km;
use crate::traits::Located;

/// Whether a place is a highlight or a filler stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "must-visit", alias = "Must to visit", alias = "must_visit")]
    MustVisit,
    #[serde(rename = "optional", alias = "Good to visit", alias = "good-to-visit")]
    Optional,
}

impl Category {
    /// Human-readable label used in the guide and the terminal summary.
    pub fn label(&self) -> &'static str {
        match self {
            Category::MustVisit => "Must visit",
            Category::Optional => "Optional",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// 1-based position in the visiting order. Meaningless until the
    /// itinerary builder has run.
    #[serde(default, alias = "no", deserialize_with = "lenient_sequence")]
    pub sequence_number: u32,
    #[serde(alias = "type")]
    pub category: Category,
    pub name: String,
    #[serde(alias = "lat", deserialize_with = "coerce_coordinate")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon", deserialize_with = "coerce_coordinate")]
    pub longitude: f64,
    #[serde(default, alias = "desc", deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, alias = "price", deserialize_with = "lenient_text")]
    pub price_hint: String,
    #[serde(default, alias = "reserve", deserialize_with = "lenient_text")]
    pub reservation_hint: String,
}

impl Place {
    /// Creates an unnumbered place with empty annotations.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            sequence_number: 0,
            category,
            name: name.into(),
            latitude,
            longitude,
            description: String::new(),
            price_hint: String::new(),
            reservation_hint: String::new(),
        }
    }

    /// Sets the free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the admission fee hint.
    pub fn with_price_hint(mut self, price: impl Into<String>) -> Self {
        self.price_hint = price.into();
        self
    }

    /// Sets whether a reservation is needed.
    pub fn with_reservation_hint(mut self, reservation: impl Into<String>) -> Self {
        self.reservation_hint = reservation.into();
        self
    }
}

impl Located for Place {
    fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// The `{"locations": [...]}` envelope the generation service is asked for.
#[derive(Debug, Deserialize)]
pub struct LocationsPayload {
    pub locations: Vec<Place>,
}

/// Parses a generation response into unordered candidate places.
pub fn parse_locations(json: &str) -> Result<Vec<Place>, serde_json::Error> {
    let payload: LocationsPayload = serde_json::from_str(json)?;
    Ok(payload.locations)
}

/// An ordered visiting sequence.
///
/// Sequence numbers always equal `1..=N` in list order; the only way to
/// build one is [`Itinerary::from_visiting_order`], which renumbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Itinerary {
    places: Vec<Place>,
}

impl Itinerary {
    /// Takes places already in visiting order and renumbers them from 1.
    pub fn from_visiting_order(mut places: Vec<Place>) -> Self {
        renumber(&mut places);
        Self { places }
    }

    /// Places in visiting order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Iterates in visiting order.
    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Returns true when there are no stops.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Starting point of the route.
    pub fn first(&self) -> Option<&Place> {
        self.places.first()
    }

    /// Final stop of the route.
    pub fn last(&self) -> Option<&Place> {
        self.places.last()
    }

    /// Straight-line length of each leg, in kilometres.
    pub fn leg_distances_km(&self) -> Vec<f64> {
        self.places
            .windows(2)
            .map(|pair| haversine_km(pair[0].location(), pair[1].location()))
            .collect()
    }

    /// Straight-line length of the whole route, in kilometres.
    pub fn total_distance_km(&self) -> f64 {
        self.leg_distances_km().iter().sum()
    }
}

impl<'a> IntoIterator for &'a Itinerary {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.iter()
    }
}

/// Countries the planner offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Country {
    Spain,
    Portugal,
}

impl Country {
    /// English country name, also used as a directory name.
    pub fn name(&self) -> &'static str {
        match self {
            Country::Spain => "Spain",
            Country::Portugal => "Portugal",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A country + city pair. Keys reference material and output file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    pub country: Country,
    pub city: String,
}

impl Destination {
    /// Creates a destination; surrounding whitespace in the city is dropped.
    pub fn new(country: Country, city: impl Into<String>) -> Self {
        Self {
            country,
            city: city.into().trim().to_string(),
        }
    }

    /// City name safe to use as a single path component.
    pub fn city_component(&self) -> String {
        let cleaned: String = self
            .city
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '\0' => '_',
                other => other,
            })
            .collect();
        match cleaned.trim_matches('.') {
            "" => "city".to_string(),
            trimmed => trimmed.to_string(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

fn coerce_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("coordinate {number} is not representable")))?,
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("coordinate {text:?} is not a number")))?,
        other => return Err(de::Error::custom(format!("coordinate {other} is not a number"))),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(de::Error::custom("coordinate must be finite"))
    }
}

fn lenient_sequence<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(number.unwrap_or(0))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}
