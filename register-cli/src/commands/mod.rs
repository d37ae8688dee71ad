pub mod calendar;
pub mod config;
pub mod records;
pub mod report;
pub mod statistics;
