//! Cafe Core Library
//!
//! Domain types, the error taxonomy and the storage port for the cafe API.
//! Nothing in here knows about HTTP or SQL.

pub mod cafe;
pub mod error;
pub mod ports;

pub use cafe::{Cafe, NewCafe};
pub use error::{CafeError, Result};
pub use ports::CafeStore;
