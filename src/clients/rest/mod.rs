//! REST API client.
//!
//! [`RestClient`] sits on top of the [`HttpClient`](crate::clients::HttpClient)
//! and exposes the operations resource adapters are built from:
//!
//! - `fetch_all`: every page of a collection, through the pagination driver
//! - `fetch_page`: one page, no retries
//! - `fetch_one`: one object, enveloped (v3) or bare (v2)
//! - `mutate` / `mutate_bytes`: POST or PUT with a JSON payload
//! - `delete`: DELETE, any 2xx is success
//!
//! Paths are relative to the store's base URI and start with `/`, e.g.
//! `/v3/catalog/products`.

mod client;

pub use client::RestClient;
