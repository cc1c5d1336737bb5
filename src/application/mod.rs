//! Application services (use cases).
//!
//! Each service owns the authorization and orchestration for one area of
//! the platform and talks to the outside world only through ports.

pub mod admin;
pub mod auth;
pub mod career;
pub mod catalog;
pub mod dashboard;
pub mod enrollment;
pub mod notification;
pub mod profile;
pub mod quiz;
pub mod recommendation;
pub mod research;
pub mod seed;
pub mod tutor;

#[cfg(test)]
mod test_support;
