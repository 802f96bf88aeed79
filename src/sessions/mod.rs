//! Game sessions: the round controller and its HTTP surface.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod requests;
pub mod responses;
pub mod services;
pub mod session;
