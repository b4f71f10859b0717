//! Trip CLI - command line trip planning against the live services.
//!
//! Binaries:
//! - plan_trip: generate (and optionally narrate) a route, printed as JSON

pub mod plan;
pub mod settings;

pub use plan::{plan_trip, EncodedRoute, TripPlan};
pub use settings::Settings;
