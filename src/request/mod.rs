//! The request payload and notification builders

pub mod notification;
pub mod payload;
