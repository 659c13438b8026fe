//! # Second-Order Butterworth Lowpass Filter (Biquad)
//!
//! A biquad is a two-pole, two-zero recursive filter — the workhorse of
//! digital audio EQ. Compared to the one-pole filter's gentle 6 dB/octave
//! slope, a second-order Butterworth rolls off at 12 dB/octave with a
//! *maximally flat* passband: no ripple below the cutoff, then the
//! steepest rolloff achievable without ripple.
//!
//! ## The Difference Equation
//!
//! ```text
//! y[n] = b0·x[n] + b1·x[n-1] + b2·x[n-2] − a0·y[n-1] − a1·y[n-2]
//! ```
//!
//! Where:
//! - `x[n]` is the current input sample, `x[n-1]`/`x[n-2]` the two before it
//! - `y[n-1]`/`y[n-2]` are the two most recent *output* samples
//! - `b0, b1, b2` are the feedforward (numerator) coefficients
//! - `a0, a1` are the feedback (denominator) coefficients; the leading
//!   denominator term is normalized to 1 and never stored
//!
//! This is "direct form 1": the equation is evaluated exactly as written,
//! from explicit past inputs and outputs. See
//! <https://en.wikipedia.org/wiki/Digital_biquad_filter>.
//!
//! ## From Analog Prototype to Digital Coefficients
//!
//! The coefficients come from a second-order analog Butterworth prototype
//! pushed through the *bilinear transform*, the standard mapping from the
//! continuous s-plane to the discrete z-plane. The transform squeezes the
//! entire infinite analog frequency axis into the finite digital one
//! (0..Nyquist), which warps frequencies — a filter designed for 1 kHz
//! would land somewhere below 1 kHz after the transform.
//!
//! The fix is *pre-warping*: instead of handing the transform the cutoff
//! we want, we hand it the frequency that will warp *onto* the cutoff we
//! want:
//!
//! ```text
//! W = tan(cutoff · 2π · T / 2)        where T = 1 / sample_rate
//! ```
//!
//! With pre-warping the digital filter's −3 dB point lands exactly on the
//! requested cutoff, even close to Nyquist where the warping is severe.
//! The derivation (coefficients with pre-warping baked in) follows the
//! excellent walkthrough at <https://thewolfsound.com/bilinear-transform/>.
//!
//! The √2 that appears in the formulas is the Butterworth signature: the
//! prototype's two complex-conjugate poles sit at 45° in the s-plane, and
//! the polynomial through them is `s² + √2·s + 1`.

use std::f32::consts::PI;

/// A second-order (12 dB/octave) Butterworth lowpass filter.
///
/// The filter owns its configuration (cutoff and sample rate), the five
/// normalized coefficients derived from it, and two samples of history
/// for each of the input and output streams. Everything is plain scalar
/// state — no allocation, ever — so `process()` is safe to call on the
/// audio thread.
///
/// One instance filters exactly one channel. It is deliberately *not*
/// thread-safe: give each channel (or thread) its own instance rather
/// than sharing one behind a lock.
///
/// # Range of validity
///
/// The math assumes `0 < cutoff_hz < sample_rate / 2` (the Nyquist
/// limit). This is *not* checked: a zero sample rate divides by zero,
/// and a cutoff at or past Nyquist drives `tan()` into its singularity
/// at π/2, producing huge or non-finite coefficients and an unstable
/// filter. Keeping the parameters in range is the caller's job — the
/// plugin does it through its parameter range.
pub struct BiquadFilter {
    /// The desired −3 dB point in Hz.
    cutoff_hz: f32,

    /// The sample rate in Hz (e.g., 44100.0).
    sample_rate: f32,

    /// Feedback (denominator) coefficients. `a[0]` multiplies the most
    /// recent output, `a[1]` the one before it. The leading denominator
    /// coefficient is normalized to 1 and omitted.
    a: [f32; 2],

    /// Feedforward (numerator) coefficients for the current input and
    /// the two previous inputs. For a Butterworth lowpass, `b[0] == b[2]`
    /// always — the numerator is symmetric.
    b: [f32; 3],

    /// The two most recent input samples, most recent first.
    prev_inputs: [f32; 2],

    /// The two most recent output samples, most recent first. Feeding
    /// outputs back in is what makes this an IIR filter.
    prev_outputs: [f32; 2],
}

impl BiquadFilter {
    /// Create a filter for the given cutoff and sample rate.
    ///
    /// Coefficients are derived immediately; history starts at silence,
    /// so a fresh filter fed zeros produces exactly zeros.
    pub fn new(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            cutoff_hz,
            sample_rate,
            a: [0.0; 2],
            b: [0.0; 3],
            prev_inputs: [0.0; 2],
            prev_outputs: [0.0; 2],
        };
        filter.derive_coefficients();
        filter
    }

    /// Change the cutoff and/or sample rate of a running filter.
    ///
    /// All five coefficients are re-derived, but the history buffers are
    /// *kept*. That is deliberate: the filter's state carries across the
    /// change, so sweeping the cutoff mid-stream glides smoothly instead
    /// of restarting from silence (a hard reset would put a click in the
    /// output every time a smoothed parameter ticked).
    pub fn reconfigure(&mut self, cutoff_hz: f32, sample_rate: f32) {
        self.cutoff_hz = cutoff_hz;
        self.sample_rate = sample_rate;
        self.derive_coefficients();
    }

    /// Process one sample through the filter.
    ///
    /// Evaluates the difference equation against the *current* history,
    /// then shifts both history pairs: position 0 moves to position 1
    /// (dropping the old position 1), and the new input/output take
    /// position 0. The order matters — the shift must happen only after
    /// the output has been computed from the pre-shift values.
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b[0] * input
            + self.b[1] * self.prev_inputs[0]
            + self.b[2] * self.prev_inputs[1]
            - self.a[0] * self.prev_outputs[0]
            - self.a[1] * self.prev_outputs[1];

        self.prev_inputs = [input, self.prev_inputs[0]];
        self.prev_outputs = [output, self.prev_outputs[0]];

        output
    }

    /// The currently configured cutoff frequency in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// The currently configured sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Zero the history buffers without touching the configuration.
    ///
    /// Called when playback stops so the tail of the last session doesn't
    /// ring into the next one. Contrast with [`Self::reconfigure`], which
    /// changes coefficients but *keeps* history.
    pub fn reset(&mut self) {
        self.prev_inputs = [0.0; 2];
        self.prev_outputs = [0.0; 2];
    }

    /// Derive the five normalized coefficients from the configuration.
    ///
    /// # The Math
    ///
    /// ```text
    /// T  = 1 / sample_rate                 (sampling period)
    /// W  = tan(cutoff · 2π · T / 2)        (pre-warped analog cutoff)
    /// N  = 1 + W·√2 + W²                   (normalization factor)
    ///
    /// a0 = 2(W² − 1) / N                   b0 = W² / N
    /// a1 = (W² − W·√2 + 1) / N             b1 = 2W² / N
    ///                                      b2 = W² / N
    /// ```
    ///
    /// Dividing everything by `N` up front normalizes the leading
    /// denominator coefficient to 1, so `process()` never has to — the
    /// normalization cost is paid once per configuration change instead
    /// of once per sample.
    fn derive_coefficients(&mut self) {
        let t = 1.0 / self.sample_rate;
        let w = (self.cutoff_hz * 2.0 * PI * t / 2.0).tan();
        let sqrt2 = 2.0_f32.sqrt();
        let w2 = w * w;

        let norm = 1.0 + w * sqrt2 + w2;

        self.a = [2.0 * (w2 - 1.0) / norm, (w2 - w * sqrt2 + 1.0) / norm];
        self.b = [w2 / norm, 2.0 * w2 / norm, w2 / norm];
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::signal::{settled_peak_magnitude, sine_sample};

    /// With zero history and zero input, every term of the difference
    /// equation vanishes, so the output must be *exactly* zero — not
    /// merely small. Any nonzero value here would mean the filter is
    /// inventing energy from nothing.
    #[test]
    fn test_zero_input_produces_exactly_zero_output() {
        let mut filter = BiquadFilter::new(1000.0, 44100.0);

        for _ in 0..50 {
            assert_eq!(
                filter.process(0.0),
                0.0,
                "Silence in must be silence out, bit-exactly"
            );
        }
    }

    /// Structural property of the Butterworth lowpass numerator: the
    /// first and last feedforward coefficients are the same value
    /// (both are W²/N). This holds for every valid configuration.
    #[test]
    fn test_numerator_is_symmetric() {
        for (cutoff, sample_rate) in [
            (15.0, 500.0),
            (100.0, 44100.0),
            (1000.0, 44100.0),
            (8000.0, 48000.0),
            (20000.0, 96000.0),
        ] {
            let filter = BiquadFilter::new(cutoff, sample_rate);
            assert_eq!(
                filter.b[0], filter.b[2],
                "b0 and b2 should be identical for cutoff {cutoff} at {sample_rate} Hz"
            );
        }
    }

    /// DC (0 Hz) is the lowest frequency there is; a lowpass must let it
    /// through at unity gain. Feed a constant and the output should
    /// settle on that constant.
    #[test]
    fn test_unity_gain_at_dc() {
        let mut filter = BiquadFilter::new(1000.0, 44100.0);

        let mut output = 0.0;
        for _ in 0..10_000 {
            output = filter.process(0.75);
        }

        assert!(
            (output - 0.75).abs() < 1e-4,
            "DC input of 0.75 should settle to 0.75, got {output}"
        );
    }

    /// The defining Butterworth property: at the cutoff frequency the
    /// magnitude response is exactly −3 dB, i.e. 1/√2 ≈ 0.707 of the
    /// input amplitude. Pre-warping is what makes this land on the
    /// *requested* cutoff rather than somewhere below it.
    #[test]
    fn test_minus_3_db_at_cutoff() {
        let mut filter = BiquadFilter::new(15.0, 500.0);

        let magnitude = settled_peak_magnitude(&mut filter, 15.0, 2.0);

        let expected = 1.0 / 2.0_f32.sqrt();
        assert!(
            (magnitude - expected).abs() < 0.02,
            "Magnitude at cutoff should be ~{expected}, got {magnitude}"
        );
    }

    /// Above the cutoff, magnitude must fall monotonically — each
    /// doubling of the test frequency should come out quieter than the
    /// one before.
    #[test]
    fn test_attenuation_increases_above_cutoff() {
        let cutoff = 15.0;
        let sample_rate = 500.0;

        let mut previous = f32::MAX;
        for octave in 0..=4 {
            let test_freq = cutoff * 2.0_f32.powi(octave);
            let mut filter = BiquadFilter::new(cutoff, sample_rate);
            let magnitude = settled_peak_magnitude(&mut filter, test_freq, 2.0);

            assert!(
                magnitude < previous,
                "Magnitude at {test_freq} Hz ({magnitude}) should be below \
                 the previous octave's ({previous})"
            );
            previous = magnitude;
        }
    }

    /// A unit impulse excites every frequency at once; a stable filter's
    /// response to it must ring down toward silence, never grow.
    #[test]
    fn test_impulse_response_decays() {
        let mut filter = BiquadFilter::new(1000.0, 44100.0);

        let mut peak = filter.process(1.0).abs();
        let mut tail = 0.0_f32;
        for i in 0..200 {
            let output = filter.process(0.0).abs();
            peak = peak.max(output);
            if i >= 180 {
                tail = tail.max(output);
            }
        }

        assert!(
            peak < 1.0,
            "Impulse response should never exceed the impulse itself, peaked at {peak}"
        );
        assert!(
            tail < peak * 1e-3,
            "Impulse response should have decayed by sample 200, tail {tail} vs peak {peak}"
        );
    }

    /// The 15 Hz / 500 Hz impulse scenario in detail. The first output is
    /// tiny (b0 is small for a low cutoff), the response then *rises* for
    /// a few samples before decaying — the classic ring of a two-pole
    /// filter, not a monotonic slide — and nothing ever comes close to
    /// the 10.0 impulse amplitude.
    #[test]
    fn test_impulse_scenario_15_hz_at_500_hz() {
        let mut filter = BiquadFilter::new(15.0, 500.0);

        let mut outputs = vec![filter.process(10.0)];
        for _ in 0..19 {
            outputs.push(filter.process(0.0));
        }

        assert!(
            outputs[0] < 10.0,
            "Gain normalization should make the first output ({}) far \
             smaller than the impulse",
            outputs[0]
        );

        // The response rings up before it decays: the peak is not the
        // first sample.
        let peak = outputs.iter().fold(0.0_f32, |acc, o| acc.max(o.abs()));
        assert!(
            peak > outputs[0],
            "Response should rise after the first sample, peak {peak} vs first {}",
            outputs[0]
        );
        assert!(
            peak < 10.0,
            "No output should approach the impulse amplitude, peaked at {peak}"
        );

        // Run the tail out further: the ringing must keep shrinking.
        let mut late = 0.0_f32;
        for _ in 0..200 {
            late = late.max(filter.process(0.0).abs());
        }
        assert!(
            late < peak * 1e-2,
            "Ringing should be nearly gone 200 samples later, got {late}"
        );
    }

    /// `reconfigure()` keeps the history buffers on purpose, so a
    /// reconfigured filter and a freshly constructed one with the same
    /// settings give *different* answers whenever the history is nonzero.
    /// (If this test starts failing, someone added a hidden history reset
    /// to `reconfigure` and broke click-free cutoff sweeps.)
    #[test]
    fn test_reconfigure_preserves_history() {
        let mut fresh = BiquadFilter::new(30.0, 500.0);

        let mut reconfigured = BiquadFilter::new(15.0, 500.0);
        for t in 0..100 {
            reconfigured.process(sine_sample(t, 5.0, 500.0));
        }
        reconfigured.reconfigure(30.0, 500.0);

        assert_eq!(reconfigured.cutoff_hz(), 30.0);
        assert_eq!(reconfigured.sample_rate(), 500.0);

        let probe = 0.5;
        assert_ne!(
            reconfigured.process(probe),
            fresh.process(probe),
            "Carried-over history should make the first post-reconfigure \
             output differ from a fresh filter's"
        );
    }

    /// After `reset()`, the filter behaves exactly like a newly
    /// constructed one: same configuration, silent history.
    #[test]
    fn test_reset_matches_fresh_filter() {
        let mut used = BiquadFilter::new(1000.0, 44100.0);
        for t in 0..100 {
            used.process(sine_sample(t, 440.0, 44100.0));
        }
        used.reset();

        let mut fresh = BiquadFilter::new(1000.0, 44100.0);
        for t in 0..50 {
            let input = sine_sample(t, 440.0, 44100.0);
            assert_eq!(
                used.process(input),
                fresh.process(input),
                "A reset filter should track a fresh one bit-exactly"
            );
        }
    }

    /// Accessors are plain reads of whatever was configured last.
    #[test]
    fn test_accessors_reflect_configuration() {
        let mut filter = BiquadFilter::new(15.0, 500.0);
        assert_eq!(filter.cutoff_hz(), 15.0);
        assert_eq!(filter.sample_rate(), 500.0);

        filter.reconfigure(45.0, 48000.0);
        assert_eq!(filter.cutoff_hz(), 45.0);
        assert_eq!(filter.sample_rate(), 48000.0);
    }
}
