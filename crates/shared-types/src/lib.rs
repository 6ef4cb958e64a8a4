//! # Shared Types Crate
//!
//! Types shared by every wallet-core crate.
//!
//! ## Contents
//!
//! - **Time**: [`Timestamp`] (milliseconds since the Unix epoch) and the
//!   injectable [`Clock`] capability.
//! - **Identity**: strongly typed identifiers for users, gatekeepers and sessions.
//! - **Errors**: [`RepositoryError`], the opaque failure every persistence
//!   collaborator reports.
//!
//! ## Design Principles
//!
//! - **No ambient time**: domain logic receives `now` explicitly; only the
//!   outermost layer asks a [`Clock`].
//! - **No ambient state**: nothing in this crate is global.

pub mod errors;
pub mod ids;
pub mod time;

pub use errors::RepositoryError;
pub use ids::{GatekeeperId, SessionId, UserId};
pub use time::{Clock, ManualClock, SystemClock, Timestamp};
