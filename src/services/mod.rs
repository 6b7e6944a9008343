//! Business logic services

pub mod calculator;
pub mod ingest;
pub mod rescue_plan;
