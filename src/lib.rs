pub mod config;
pub mod datamodel;
pub mod error;
pub mod logging;
pub mod repository;
pub mod server;

#[cfg(test)]
mod client;

#[cfg(test)]
mod tests;
