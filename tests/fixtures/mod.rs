//! Test fixtures for tour-guide.
//!
//! Provides realistic test data including:
//! - Real Madrid and Lisbon landmarks (coordinates from OpenStreetMap)
//! - A scripted generation service and a fixed reference source
//! - A real TTF font for rendering the guide

#![allow(dead_code)]

pub mod assets;
pub mod landmarks;
pub mod services;

pub use assets::*;
pub use landmarks::*;
pub use services::*;
