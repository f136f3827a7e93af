//! Turbo download interception.
//!
//! Admits browser downloads by file extension and hands them to the Turbo
//! companion downloader over loopback HTTP, reconciling the browser's own copy.

pub mod config;
pub mod logging;

pub mod admission;
pub mod bridge;
pub mod companion;
pub mod control;
pub mod coordinator;
pub mod menu;
pub mod session;

#[cfg(test)]
mod testing;
