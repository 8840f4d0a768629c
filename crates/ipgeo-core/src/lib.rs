//! Core ipgeo library (identity client, geolocation client, log store, config).

pub mod auth;
pub mod config;
pub mod geo;
pub mod logging;
pub mod services;
pub mod shared;
pub mod store;
