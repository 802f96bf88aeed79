pub mod app_context;
pub mod catalog;
pub mod cli;
pub mod geo;
pub mod geocoding;
pub mod health;
pub mod http;
pub mod logging;
pub mod ndjson;
pub mod sessions;
pub mod storage;
