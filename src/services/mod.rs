//! Business logic services.

pub mod auth;
pub mod environment;
pub mod member;
pub mod post;
pub mod puppy;
pub mod stats;
pub mod upload;
