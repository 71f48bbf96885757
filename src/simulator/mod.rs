//! Live event feed simulation.
//!
//! ```text
//! DashboardView ── owns ──> FeedStream (tokio interval task)
//!      │                         │ tick()
//!      │                         v
//!      └── reads snapshots ── FeedSimulator ── EventGenerator<R: Rng>
//!                                 └── EventLog (bounded, newest first)
//! ```

pub mod clock;
pub mod feed;
pub mod generator;
pub mod stream;
pub mod view;

pub use clock::{Clock, SystemClock};
pub use feed::FeedSimulator;
pub use generator::EventGenerator;
pub use stream::FeedStream;
pub use view::{DashboardView, FeedSettings};
