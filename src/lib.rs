//! PayCheck CLI
//!
//! レシート精算バックエンドを端末から扱うクライアント

pub mod cli;
pub mod config;
pub mod error;
pub mod client;
pub mod scanner;
pub mod assign;
pub mod settle;
pub mod prompt;
pub mod export;
