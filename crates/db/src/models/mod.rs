//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod about;
pub mod audit;
pub mod contact;
pub mod faq;
pub mod gallery;
pub mod newsletter;
pub mod package;
pub mod project;
pub mod review;
pub mod role;
pub mod seo;
pub mod service;
pub mod session;
pub mod setting;
pub mod stat;
pub mod user;
