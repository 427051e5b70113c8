pub mod batch;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod converter;
pub mod envelope;
pub mod job;
pub mod pipeline;
pub mod report;
pub mod scan;
pub mod util;
