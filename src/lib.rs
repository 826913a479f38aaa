pub mod cart;
pub mod catalog;
pub mod config;
pub mod deals;
pub mod engine;
pub mod error;
pub mod format;
pub mod notify;
pub mod storage;
pub mod storefront;
pub mod utils;
