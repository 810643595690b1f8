//! Real landmark coordinates for realistic fixtures.
//!
//! Coordinates sourced from OpenStreetMap.

use tour_guide::place::{Category, Place};

/// A named landmark with coordinates.
#[derive(Debug, Clone)]
pub struct Landmark {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub category: Category,
}

impl Landmark {
    pub const fn must(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng, category: Category::MustVisit }
    }

    pub const fn optional(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng, category: Category::Optional }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn place(&self) -> Place {
        Place::new(self.name, self.category, self.lat, self.lng)
    }
}

// ============================================================================
// Madrid
// ============================================================================

pub const MADRID: &[Landmark] = &[
    Landmark::must("Palacio Real", 40.417955, -3.714312),
    Landmark::must("Museo del Prado", 40.413780, -3.692127),
    Landmark::must("Plaza Mayor", 40.415511, -3.707401),
    Landmark::must("Puerta del Sol", 40.416775, -3.703790),
    Landmark::must("Museo Reina Sofia", 40.408029, -3.694444),
    Landmark::optional("Parque del Retiro", 40.415260, -3.684416),
    Landmark::optional("Templo de Debod", 40.424038, -3.717765),
    Landmark::optional("Mercado de San Miguel", 40.415443, -3.708943),
    Landmark::optional("Estadio Santiago Bernabeu", 40.453054, -3.688344),
    Landmark::optional("Gran Via", 40.420300, -3.705770),
];

// ============================================================================
// Lisbon
// ============================================================================

pub const LISBON: &[Landmark] = &[
    Landmark::must("Torre de Belem", 38.691584, -9.215977),
    Landmark::must("Mosteiro dos Jeronimos", 38.697816, -9.206733),
    Landmark::must("Castelo de S. Jorge", 38.713909, -9.133476),
    Landmark::optional("Praca do Comercio", 38.707751, -9.136592),
    Landmark::optional("LX Factory", 38.703289, -9.178600),
];

/// Landmarks as unordered candidate places.
pub fn places(landmarks: &[Landmark]) -> Vec<Place> {
    landmarks.iter().map(Landmark::place).collect()
}

/// The `{"locations": [...]}` JSON a well-behaved model would return, using
/// the short field names and string coordinates some models emit.
pub fn locations_json(landmarks: &[Landmark]) -> String {
    let entries: Vec<serde_json::Value> = landmarks
        .iter()
        .enumerate()
        .map(|(i, l)| {
            serde_json::json!({
                "no": (i + 1).to_string(),
                "type": match l.category {
                    Category::MustVisit => "Must to visit",
                    Category::Optional => "Good to visit",
                },
                "name": l.name,
                "lat": format!("{:.6}", l.lat),
                "lng": l.lng,
                "desc": format!("About {}", l.name),
                "price": "Free",
                "reserve": "No",
            })
        })
        .collect();
    serde_json::json!({ "locations": entries }).to_string()
}
