//! # IO Module
//!
//! Interface layer that exposes the domain services to the presentation
//! layer over HTTP. Handlers translate between JSON DTOs and domain calls
//! and map domain errors to status codes; no business rules live here.

pub mod rest;

pub use rest::*;
