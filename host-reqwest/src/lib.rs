//! # Reqwest HTTP Adapter
//!
//! Native implementation of the [`host_traits::HttpClient`] trait backed by
//! `reqwest`: connection pooling, TLS, and per-request timeout enforcement.
//! Requests are single attempts; the sync engine owns retry policy (and
//! deliberately has none).

pub mod http;

pub use http::ReqwestHttpClient;
