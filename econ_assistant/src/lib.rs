//! Natural-language query pipeline over economic time series.
//!
//! The flow is: [`classify`] turns free text into a structured
//! [`models::QueryDetails`], [`resolve`] picks a concrete series id for each
//! (indicator, location) pair, [`retrieval`] fetches and assembles typed
//! series, [`analytics`] computes normalization and growth statistics, and
//! [`orchestrate`] sequences the whole thing into one response per query.

pub mod analytics;
pub mod chart;
pub mod classify;
pub mod config;
pub mod extract;
pub mod lexicon;
pub mod models;
pub mod orchestrate;
pub mod resolve;
pub mod retrieval;
