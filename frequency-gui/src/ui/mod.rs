//! # UI Module
//!
//! This module contains all UI components for the frequency readout application.

pub mod readout;
