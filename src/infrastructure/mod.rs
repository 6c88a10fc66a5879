//! Adapters to the outside world.

pub mod http;
