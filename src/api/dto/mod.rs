//! Data Transfer Objects for API requests and responses.
//!
//! Responses are serialized with Serde; request input is validated with
//! `validator`.

pub mod health;
pub mod sentiment;
