//! Shared world for the Mongo Studio BDD suite.
//!
//! Every scenario gets its own server on a random port, backed by a fresh
//! temporary models directory.

pub mod world;

pub use world::StudioWorld;
