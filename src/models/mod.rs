//! Database models and DTOs for all domain entities.

pub mod environment;
pub mod member;
pub mod pagination;
pub mod post;
pub mod puppy;
pub mod user;
