//! Data models for the support management API.
//!
//! This module contains type definitions for services, problem
//! classifications, support tickets, communications, name availability
//! checks and the shared ARM response envelopes.

mod availability;
mod common;
mod communication;
mod service;
mod ticket;

pub use availability::*;
pub use common::*;
pub use communication::*;
pub use service::*;
pub use ticket::*;
