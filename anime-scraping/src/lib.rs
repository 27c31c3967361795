pub mod api;
pub mod batch;
pub mod config;
pub mod parser;
pub mod schema;
pub mod tree;
