//! Simple to use cli for keeping track of the hours you work. Work is logged per day and category,
//! and summarized per week and per category. Logs are either kept in a local file or in a remote
//! work-log api.
//!

pub mod aggregator;
pub mod backend;
pub mod cli;
pub mod export;
pub mod remote;
pub mod storage;
pub mod utils;
