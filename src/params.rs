//! # Plugin Parameters
//!
//! Parameters are the knobs and sliders the user sees in the DAW. Each
//! parameter has:
//!
//! - A **unique string ID** (`#[id = "..."]`) that the host uses to
//!   save and recall presets. Once published, never change these IDs
//!   or existing presets will break.
//! - A **human-readable name** shown in the DAW's UI.
//! - A **range** (min, max, and optional skew).
//! - A **default value**.
//! - Optional **smoothing** to prevent audible clicks when values change.
//!
//! ## Parameter Smoothing
//!
//! When a user moves a knob, the parameter value jumps instantly. But in
//! audio, instant value changes create discontinuities that sound like
//! clicks or "zipper noise." Smoothing gradually ramps the value from
//! old to new over a short time window (e.g., 20ms), eliminating these
//! artifacts. The `SmoothingStyle::Linear(ms)` option ramps linearly
//! over the given duration.
//!
//! For this plugin, smoothing leans on a property of the filter itself:
//! `BiquadFilter::reconfigure` keeps the filter's history across a
//! coefficient change, so each intermediate cutoff value the smoother
//! produces glides seamlessly into the next — no reset, no click.

use nih_plug::prelude::*;

/// All user-facing parameters for the Loveless Lowpass plugin.
///
/// The `#[derive(Params)]` macro automatically generates the code that
/// registers these parameters with the host DAW, handles serialization
/// for presets, and manages parameter smoothing.
#[derive(Params)]
pub struct PluginParams {
    /// **Cutoff** — the filter's −3 dB point.
    ///
    /// Frequencies below the cutoff pass essentially untouched (the
    /// Butterworth passband is maximally flat); frequencies above it are
    /// attenuated at 12 dB per octave.
    ///
    /// - 200 Hz = only bass survives (muffled, "next room" sound)
    /// - 2000 Hz = telephone-like midrange focus
    /// - 8000 Hz = gentle top-end rolloff
    /// - 20000 Hz = essentially no filtering (all frequencies pass)
    ///
    /// The skewed range gives more knob resolution to lower frequencies,
    /// where the sonic differences are more dramatic.
    ///
    /// The 20 kHz ceiling also keeps the cutoff safely below the Nyquist
    /// frequency (sample_rate / 2) at any common sample rate — the
    /// coefficient math goes unstable at and beyond Nyquist, and the
    /// filter itself doesn't guard against it.
    #[id = "cutoff"]
    pub cutoff: FloatParam,

    /// **Mix** — the balance between dry (original) and wet (filtered) signal.
    ///
    /// - 0% = fully dry (the filter is effectively bypassed)
    /// - 50% = equal blend (a subtle "tilt" toward the lows)
    /// - 100% = fully wet (you hear only the filtered signal)
    ///
    /// Defaults to 100%: unlike a delay or reverb, a filter used as an
    /// insert is normally heard fully wet, with the dry blend reserved
    /// for parallel-processing tricks.
    #[id = "mix"]
    pub mix: FloatParam,
}

impl Default for PluginParams {
    fn default() -> Self {
        Self {
            cutoff: FloatParam::new(
                "Cutoff",
                1000.0, // Default: 1 kHz — an obviously audible starting point
                FloatRange::Skewed {
                    min: 20.0,
                    max: 20000.0,
                    // Stronger skew (-2.0) for frequency because human
                    // frequency perception is roughly logarithmic.
                    // The difference between 20 Hz and 40 Hz is huge;
                    // the difference between 19800 Hz and 20000 Hz is
                    // imperceptible. This skew matches perception.
                    factor: FloatRange::skew_factor(-2.0),
                },
            )
            .with_unit(" Hz")
            // Smooth cutoff changes over 50ms. Each smoothed step
            // re-derives the filter coefficients, and the filter carries
            // its history across the change, so sweeps sound continuous.
            .with_smoother(SmoothingStyle::Linear(50.0))
            .with_step_size(1.0), // Whole Hz steps are fine

            mix: FloatParam::new(
                "Mix",
                1.0, // Default: 100% — fully wet
                FloatRange::Linear { min: 0.0, max: 1.0 },
            )
            .with_unit("%")
            .with_smoother(SmoothingStyle::Linear(20.0))
            // Display as percentage: 0.40 → "40.0%"
            .with_value_to_string(formatters::v2s_f32_percentage(1))
            .with_string_to_value(formatters::s2v_f32_percentage()),
        }
    }
}
