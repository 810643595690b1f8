//! Interactive route map (Leaflet HTML).
//!
//! Markers are red for must-visit places and blue for optional ones, joined
//! by a green line in visiting order. The map element id carries the
//! itinerary size so a viewer re-creates it whenever the plan changes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::place::{Category, Itinerary};
use crate::polyline::Polyline;
use crate::route_url::place_search_url;

pub const MAP_FILE_NAME: &str = "route_map.html";

const INITIAL_ZOOM: u8 = 13;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{title}}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #{{map_id}} { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="{{map_id}}"></div>
<script>
const places = {{{places_json}}};
const path = {{{path_json}}};
const map = L.map("{{map_id}}").setView([places[0].lat, places[0].lng], {{zoom}});
L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);
L.control.scale().addTo(map);
for (const place of places) {
  const popup = document.createElement("div");
  const title = document.createElement("b");
  title.textContent = place.label;
  const link = document.createElement("a");
  link.href = place.link;
  link.target = "_blank";
  link.textContent = "Open in Google Maps";
  popup.append(title, document.createElement("br"), link);
  L.circleMarker([place.lat, place.lng], {
    radius: 9, color: place.color, fillColor: place.color, fillOpacity: 0.8
  }).bindPopup(popup).addTo(map);
}
L.polyline(path, { color: "green", weight: 2.5 }).addTo(map);
{{#if bounds}}map.fitBounds({{{bounds}}}, { padding: [24, 24] });{{/if}}
</script>
</body>
</html>
"#;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("cannot draw a map for an empty itinerary")]
    EmptyItinerary,
    #[error("map template failed: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("map data could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Serialize)]
struct MarkerData<'a> {
    label: String,
    lat: f64,
    lng: f64,
    color: &'static str,
    category: &'static str,
    name: &'a str,
    link: String,
}

#[derive(Debug, Serialize)]
struct MapData {
    title: String,
    map_id: String,
    zoom: u8,
    places_json: String,
    path_json: String,
    bounds: Option<String>,
}

fn marker_color(category: Category) -> &'static str {
    match category {
        Category::MustVisit => "red",
        Category::Optional => "blue",
    }
}

/// Element id for the map, keyed by itinerary size.
pub fn map_element_id(itinerary: &Itinerary) -> String {
    format!("map_{}", itinerary.len())
}

/// JSON that is safe to drop inside a `<script>` block.
fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Renders the route map page.
pub fn render_route_map(itinerary: &Itinerary, title: &str) -> Result<String, MapError> {
    if itinerary.is_empty() {
        return Err(MapError::EmptyItinerary);
    }

    let markers: Vec<MarkerData<'_>> = itinerary
        .iter()
        .map(|place| MarkerData {
            label: format!("{}. {}", place.sequence_number, place.name),
            lat: place.latitude,
            lng: place.longitude,
            color: marker_color(place.category),
            category: place.category.label(),
            name: &place.name,
            link: place_search_url(place),
        })
        .collect();

    let polyline = Polyline::through(itinerary);
    let bounds = match polyline.bounds() {
        Some(bounds) if itinerary.len() > 1 => Some(script_json(&[
            [bounds.south_west.0, bounds.south_west.1],
            [bounds.north_east.0, bounds.north_east.1],
        ])?),
        _ => None,
    };

    let data = MapData {
        title: title.to_string(),
        map_id: map_element_id(itinerary),
        zoom: INITIAL_ZOOM,
        places_json: script_json(&markers)?,
        path_json: script_json(&polyline.points())?,
        bounds,
    };

    let hbs = Handlebars::new();
    Ok(hbs.render_template(TEMPLATE, &data)?)
}

/// Renders the map into `dir/route_map.html`.
pub fn write_route_map(
    itinerary: &Itinerary,
    title: &str,
    dir: &Path,
) -> Result<PathBuf, MapError> {
    let html = render_route_map(itinerary, title)?;
    let path = dir.join(MAP_FILE_NAME);
    fs::create_dir_all(dir)
        .and_then(|_| fs::write(&path, html))
        .map_err(|source| MapError::Io {
            path: path.clone(),
            source,
        })?;
    info!(path = %path.display(), "wrote route map");
    Ok(path)
}
