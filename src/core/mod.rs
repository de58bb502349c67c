pub mod calculator;
pub mod calendar;
pub mod config;
pub mod log;
pub mod record;
pub mod registry;
