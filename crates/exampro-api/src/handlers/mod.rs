//! HTTP request handlers organised by domain.

pub mod admin;
pub mod health;
pub mod notification;
