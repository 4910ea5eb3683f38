//! Provider resolution and command dispatch.
//!
//! A request (target, verb, optional provider, dry-run) is resolved against
//! the host into a route, the route's translator turns it into a
//! [`plan::CommandPlan`], and the plan is either printed or handed to a
//! [`runner::CommandRunner`].

pub mod catalog;
pub mod error;
pub mod listing;
pub mod orchestrator;
pub mod plan;
pub mod provider;
pub mod route;
pub mod runner;
pub mod verb;

pub use error::DispatchError;
pub use orchestrator::{DispatchOutcome, Dispatcher};
pub use route::DispatchRequest;
