//! HTTP client utilities for the Loco API.

pub mod client;
pub mod request;
pub mod response;

pub use client::{HttpClient, HttpConfig, HttpError, build_client};
pub use request::{RequestBuilder, headers};
pub use response::{parse_json, read_bytes, ResponseError};
