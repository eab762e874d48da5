//! Route handlers. Each returns a response or a [`StudioError`](crate::error::StudioError)
//! that the router turns into the JSON error shape.

pub mod collections;
pub mod models;
pub mod schemas;
