//! hierflat: flattens topic hierarchies into fixed-depth CSV rows.
//!
//! Layers:
//! - `domain`: hierarchy entities, flattening, CSV rendering, boundary validation
//! - `application`: document location and the export service
//! - `infrastructure`: filesystem boundary and service wiring
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
