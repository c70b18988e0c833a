//! Typed access to FRED-style economic time series.
//!
//! The crate exposes a vendor-neutral data model ([`models::series`]), the
//! [`providers::SeriesSource`] collaborator trait consumed by downstream
//! query pipelines, and a concrete FRED REST implementation
//! ([`providers::fred_rest::FredProvider`]).

pub mod models;
pub mod providers;
