#[macro_use]
extern crate log;

pub mod bot;
pub mod db;
pub mod env;
pub mod error;
pub mod messenger;
pub mod models;
pub mod order;
pub mod storage;
