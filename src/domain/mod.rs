//! Payment types, request validation and the port to the decision service.

pub mod payment;
pub mod ports;
pub mod request;
