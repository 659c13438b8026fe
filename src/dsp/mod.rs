//! # DSP (Digital Signal Processing) Primitives
//!
//! This module contains the core building blocks for our lowpass effect:
//!
//! - **`filter`**: a second-order Butterworth lowpass filter (a biquad),
//!   designed via the bilinear transform with frequency pre-warping.
//!   This is the entire effect — everything else is plumbing around it.
//!
//! - **`signal`**: sine generation and settled-magnitude measurement,
//!   used by the tests and the `filter_demo` binary to characterize the
//!   filter's frequency response.

pub mod filter;
pub mod signal;
