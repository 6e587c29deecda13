#![deny(missing_docs)]
//! Search a venue API for a list of locations and check in to the venues
//! found, under a fixed request rate and a ceiling on total check-ins.
//!
//! A producer reads one location per line and enqueues a prepared search for
//! each. A single [Worker] consumes the queue in order: it waits for a tick of
//! the shared [RateLimiter], performs the search, and then waits for another
//! tick before every check-in. Searches and check-ins share the same ticker,
//! so the combined rate never exceeds the configured one.
//!
//! ## Example
//!
//! ```no_run
//! use venue_checkin::{Client, Endpoints, RateLimiter, Worker, DEFAULT_BASE, DEFAULT_TIMEOUT};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoints = Endpoints::new(DEFAULT_BASE, "token")?;
//!     let client = Client::new(endpoints, DEFAULT_TIMEOUT)?;
//!
//!     let mut worker = Worker::new(client.clone(), RateLimiter::per_hour(475), 90);
//!
//!     let input = venue_checkin::open_input("geos/xaa.txt").await?;
//!     let summary = venue_checkin::run(input, &client, &mut worker).await?;
//!     println!("{:?}", summary);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod limiter;
pub mod model;
mod pipeline;
mod queue;
mod worker;

pub use self::client::{
    Client, Endpoints, DEFAULT_BASE, DEFAULT_LIMIT, DEFAULT_TIMEOUT, DEFAULT_VERSION,
};
pub use self::config::Config;
pub use self::error::{CheckinError, Error};
pub use self::limiter::{Builder, RateLimiter, Throttle};
pub use self::pipeline::run;
pub use self::queue::{channel, enqueue, open_input, Receiver, SearchRequest, Sender};
pub use self::worker::{Stop, Summary, Worker};
