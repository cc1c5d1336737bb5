//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration, component factories and the composition
//! root that wires them together.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`factory`] - Component factory functions

pub mod bootstrap;
pub mod config;
pub mod factory;
