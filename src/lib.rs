//! # eventbrite-rq
//!
//! A small client for one-shot calls against the Eventbrite REST API, built on top
//! of `reqwest`. A request is assembled with the chainable [`api::Rq`] builder (or the
//! [`api::execute`] shortcut), sent once, and always comes back as an [`api::Rs`]:
//! either the decoded JSON payload with its status, or a status and an error message.
//! Nothing is retried and no error escapes the call itself.
//!
//! ```no_run
//! use eventbrite_rq::prelude::*;
//!
//! async fn run() -> Result<()> {
//!     let rs = Rq::from_static("https://www.eventbriteapi.com/v3")?
//!         .uri("/users/me/")
//!         .method("GET")?
//!         .bearer(std::env::var("EVENTBRITE_API_KEY")?)
//!         .apply()
//!         .await;
//!     process_response(&rs);
//!     Ok(())
//! }
//! ```
//!
//! ## Notes
//! - Without explicit headers every request carries `Content-Type` and `Accept` set to
//!   `application/json`. Headers given by the caller replace that pair.
//! - A bearer credential always wins over a caller supplied `Authorization` header and is
//!   masked in logs, as are headers added with `add_secret_header`.
//! - Request URL and headers are emitted as `debug` tracing events.

pub mod api;
pub mod config;
pub mod error;
pub mod eventbrite;
pub mod logging;
pub mod prelude;
pub mod printer;
pub mod transport;

pub type Result<T> = anyhow::Result<T>;
