pub mod bot;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod credentials;
pub mod error;
pub mod gate;
pub mod logging;
pub mod twitter;
