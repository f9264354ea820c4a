pub mod extract;
pub mod normalize;
pub mod filter;
pub mod controller;

pub use extract::{get_nested, Step};
pub use normalize::{normalize, NormalizedAttributes};
pub use filter::{FilterConfig, FilterEngine, FilterUpdate, MinuteWindow, StopBuckets, TransitAirportPolicy};
pub use controller::{ResultsController, ResultsState};
