// platform-switch - core/mod.rs
//
// Core logic layer: discovery, line classification, rewriting.
// Must NOT depend on: platform or app.

pub mod classify;
pub mod discovery;
pub mod model;
pub mod rewrite;
