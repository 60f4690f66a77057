//! Domain logic for the Vitrine content API.
//!
//! Everything here is free of I/O so it can be shared by the repository
//! layer, the HTTP handlers, and unit tests alike.

pub mod about;
pub mod audit;
pub mod error;
pub mod ordering;
pub mod roles;
pub mod search;
pub mod slug;
pub mod status;
pub mod types;
