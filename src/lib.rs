//! Spiral Grid Core Library
//!
//! This crate provides grid/coordinate utilities for Bevy games that address
//! an unbounded 2D square grid with a single non-negative "spiral id" per cell:
//! - Spiral id system (closed-form cell <-> id conversion, ring arithmetic)
//! - World-space helpers (point -> id, id -> cell center / 2D / 3D bounds)
//! - Spiral-order cell iteration
//! - Grid settings resource + plugin for engine integration
//! - Structured logging setup

pub mod logging;
pub mod settings;
pub mod spiral;
pub mod world;
