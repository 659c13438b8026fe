//! # Filter Demo — Offline Characterization Harness
//!
//! Exercises the Butterworth lowpass without a DAW. There are many ways
//! to check a filter's correctness (DFT analysis with an FFT, visual
//! comparison of waveforms in a plotting tool), but the checks here need
//! nothing beyond the standard library:
//!
//! 1. Run two superimposed sinusoids (a 5 Hz "signal" plus a small
//!    200 Hz "noise" component) through the filter and dump both the
//!    input and output streams to CSV files for visual inspection in
//!    a spreadsheet or plotting tool.
//! 2. Sweep test tones at ratios of the cutoff frequency, for a few
//!    successively higher cutoffs, and print the settled peak magnitude
//!    of each — a rough printed picture of the magnitude response.
//! 3. Feed a single impulse and print the response so its decay can be
//!    eyeballed.
//!
//! Run with: `cargo run --bin filter_demo`

use std::fs::File;
use std::io::{BufWriter, Write};

use loveless_lowpass_v1::dsp::filter::BiquadFilter;
use loveless_lowpass_v1::dsp::signal::{settled_peak_magnitude, sine_sample};

const SAMPLE_RATE: f32 = 500.0;
const CUTOFF_HZ: f32 = 15.0;

fn main() -> std::io::Result<()> {
    let mut filter = BiquadFilter::new(CUTOFF_HZ, SAMPLE_RATE);

    write_csv_comparison(&mut filter)?;
    print_magnitude_sweeps(&mut filter);
    print_impulse_response(&mut filter);

    Ok(())
}

/// Test 1: two superimposed sinusoids, dumped to `input.csv` and
/// `output.csv`.
///
/// The input emulates a clean low-frequency signal contaminated with
/// high-frequency noise: a full-amplitude 5 Hz sine plus a 200 Hz sine
/// at a tenth the amplitude. Plot the two files side by side and the
/// 200 Hz fuzz should be visibly gone from the output while the 5 Hz
/// shape survives.
fn write_csv_comparison(filter: &mut BiquadFilter) -> std::io::Result<()> {
    let signal_freq = 5.0;
    let noise_freq = 200.0;

    let sample_rate = filter.sample_rate();

    let mut input_file = BufWriter::new(File::create("input.csv")?);
    let mut output_file = BufWriter::new(File::create("output.csv")?);

    // Run for two seconds of signal time.
    for t in 0..(sample_rate * 2.0) as usize {
        let input =
            sine_sample(t, signal_freq, sample_rate) + 0.1 * sine_sample(t, noise_freq, sample_rate);

        write!(input_file, "{input},")?;
        write!(output_file, "{},", filter.process(input))?;
    }

    input_file.flush()?;
    output_file.flush()?;

    Ok(())
}

/// Test 2: settled peak magnitude for tones at ratios of the cutoff.
///
/// For each of three successively higher cutoffs (×1, then ×2, then ×3
/// of the previous — 15, 30, 90 Hz), drive the filter with sines from
/// an eighth of the cutoff up to eight times it and print the settled
/// peak magnitude of each. Expect ~1.0 well below the cutoff, ~0.707 at
/// the cutoff, and a steep falloff above it.
///
/// Note that for the last cutoff, the ×8 test tone (720 Hz) is beyond
/// half the 500 Hz sample rate — that tone aliases on the way in, so
/// its printed magnitude describes the aliased frequency, not 720 Hz.
fn print_magnitude_sweeps(filter: &mut BiquadFilter) {
    for i in 1..=3 {
        filter.reconfigure(filter.cutoff_hz() * i as f32, filter.sample_rate());
        println!("Testing filter with cutoff freq {}", filter.cutoff_hz());

        for octave in -3..=3 {
            // Test with different ratios of the cutoff frequency.
            let test_freq = filter.cutoff_hz() * 2.0_f32.powi(octave);
            let magnitude = settled_peak_magnitude(filter, test_freq, 2.0);

            println!("Magnitude for sine freq {test_freq}Hz: {magnitude}");
        }
        println!();
    }
}

/// Test 3: print the impulse response so the decay is visible.
///
/// A 10.0 impulse followed by silence. The printed sequence should rise
/// for a few samples (the two-pole ring), then shrink toward zero.
fn print_impulse_response(filter: &mut BiquadFilter) {
    println!("Testing impulse response");

    let mut impulse = vec![0.0; 20];
    impulse[0] = 10.0;

    for input in impulse {
        print!("{}, ", filter.process(input));
    }
    println!();
}
