//! # exampro-entity
//!
//! Domain entity models for ExamPro. Closed enumerations (notification
//! type, read status, audit action, role) are sum types validated at the
//! construction boundary, so invalid values never reach a store.

pub mod audit;
pub mod notification;
pub mod user;
