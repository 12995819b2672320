//! # FindThem Client
//!
//! HTTP access to the FindThem case backend.
//!
//! [`HttpCaseApi`] implements [`findthem_core::CaseApi`] with `reqwest`:
//! - `GET /search?q=&region=` for case listings
//! - `POST /report-missing` as multipart form data
//! - `POST /volunteer-signup` and `POST /report-sighting` as JSON
//!
//! Configuration comes from `FINDTHEM_*` environment variables via
//! [`ClientConfig::from_env`].

pub mod config;
pub mod http;

pub use config::{ClientConfig, ClientError, ClientResult, DetailLookup};
pub use http::HttpCaseApi;
