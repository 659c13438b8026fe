//! # Test Signals
//!
//! Small helpers for generating known signals and measuring what a filter
//! does to them. There are many ways to characterize a filter (FFT
//! analysis, pole-zero plots), but the simplest one needs no extra
//! machinery: drive it with a pure sine, wait for the transient to settle,
//! and read off the peak of the output. That settled peak *is* the
//! magnitude response at that frequency.
//!
//! These helpers are shared by the unit tests and the `filter_demo`
//! binary.

use std::f32::consts::PI;

use super::filter::BiquadFilter;

/// Sample `t` of a unit-amplitude sine at `freq` Hz, sampled at
/// `sample_rate` Hz.
pub fn sine_sample(t: usize, freq: f32, sample_rate: f32) -> f32 {
    (t as f32 / sample_rate * 2.0 * PI * freq).sin()
}

/// Measure the filter's settled output magnitude for a unit sine at
/// `freq` Hz.
///
/// Runs the sine through the filter for `seconds` of signal time and
/// records the largest absolute output over the *second half* only —
/// the first half is warm-up, so the filter's startup transient doesn't
/// contaminate the measurement.
///
/// The filter is driven in place; its history reflects the sweep
/// afterward. Pass a fresh filter if you need a clean measurement.
pub fn settled_peak_magnitude(filter: &mut BiquadFilter, freq: f32, seconds: f32) -> f32 {
    let sample_rate = filter.sample_rate();
    let total_samples = (seconds * sample_rate) as usize;
    let settle_samples = total_samples / 2;

    let mut magnitude = 0.0_f32;
    for t in 0..total_samples {
        let output = filter.process(sine_sample(t, freq, sample_rate));
        if t >= settle_samples {
            magnitude = magnitude.max(output.abs());
        }
    }

    magnitude
}
