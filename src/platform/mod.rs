// platform-switch - platform/mod.rs
//
// Platform abstraction layer: host OS detection, config directories,
// file reading and writing.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
pub mod os;
