//! # esgret lib
//!
//! Tests whether ESG scores of index constituents are associated with their
//! subsequent stock returns: load an ESG table and a price table, derive the
//! return over a fixed window, join on the identifier, summarize the returns
//! and run a Pearson correlation test.

use std::env;

pub mod analysis;
pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod gui;
pub mod utils;

pub static VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn init() {
    let _ = env_logger::Builder::new()
        .parse_filters(env::var("LOG").as_deref().unwrap_or("off"))
        .try_init();
}
