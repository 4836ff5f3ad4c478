//! Request and response data transfer objects.

pub mod action;
pub mod request;
pub mod response;
