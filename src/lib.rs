pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod router;
pub mod telemetry;

#[cfg(test)]
mod tests;
