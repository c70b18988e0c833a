//! FRED REST implementation of [`SeriesSource`](crate::providers::SeriesSource).

mod params;
mod provider;
mod response;

pub use provider::FredProvider;
