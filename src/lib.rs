pub mod backend;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod invoker;
pub mod ledger;
pub mod logging;
pub mod scanner;
pub mod session_entry;
