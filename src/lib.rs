//! Profile onboarding: a four-step profile wizard and the HTTP API it submits to.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod wizard;
