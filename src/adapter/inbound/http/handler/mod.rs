//! Route handlers, one module per area of the API.

pub mod account;
pub mod admin;
pub mod ai;
pub mod career;
pub mod course;
pub mod dashboard;
pub mod enrollment;
pub mod notification;
pub mod profile;
pub mod system;
