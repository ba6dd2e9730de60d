//! tubeprep - normalize downloaded videos for media library import
//!
//! This library crate exposes the scan and conversion pipeline for the
//! binary and for integration testing.

pub mod config;
pub mod conversion;
pub mod scanner;
