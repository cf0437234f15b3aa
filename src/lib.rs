//! A single countdown timer whose remaining time is handed off to a separate
//! widget surface through a shared key-value slot.

pub mod config;
pub mod domain;
pub mod host;
pub mod repository;
pub mod storage;
pub mod utils;
