//! Shared infrastructure for PizzaOffer services: tracing setup, env-based
//! configuration and database connection helpers.

pub mod config;
pub mod db;
pub mod tracing;
