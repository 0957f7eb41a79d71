//! Metro station locator.
//!
//! Finds the WMATA rail station nearest an address, fetches its live
//! arrival predictions, and encodes them for a small LED matrix display.

pub mod cache;
pub mod config;
pub mod directory;
pub mod display;
pub mod domain;
pub mod geocode;
pub mod locator;
pub mod logging;
pub mod web;
pub mod wmata;
