//! tour-guide: AI-assisted city itineraries
//!
//! Asks a generative model for places to visit, orders them into a route,
//! and renders the result as a map and a printable guide.

pub mod traits;
pub mod place;
pub mod builder;
pub mod haversine;
pub mod polyline;
pub mod gemini;
pub mod reference;
pub mod prompt;
pub mod orchestrator;
pub mod route_url;
pub mod report;
pub mod map;
pub mod session;
pub mod cli;
