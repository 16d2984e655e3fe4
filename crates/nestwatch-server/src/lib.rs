//! # nestwatch-server
//!
//! HTTP server library for the nestwatch child location-monitoring service.
//!
//! This library provides the API handlers and state management for nestwatch.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod api;
pub mod logging;
pub mod state;
