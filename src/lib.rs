pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod fields;
pub mod openapi;
pub mod pagination;
pub mod routes;
pub mod state;
pub mod static_assets;
pub mod stats;
pub mod store;
pub mod time;

#[cfg(test)]
pub mod test_support;
