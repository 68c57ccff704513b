//! Sales store, pipeline stages and shared configuration for the `tally`
//! command-line tool and the dashboard server.

pub mod charts;
pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod observability;
pub mod pipeline;

#[cfg(test)]
mod test;
