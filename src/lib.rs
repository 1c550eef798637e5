pub mod batch;
pub mod cache;
pub mod config;
pub mod data_models;
pub mod finder;
pub mod parser;
pub mod scorer;
pub mod search;
