//! # Loveless Lowpass — An AU/VST3/CLAP Butterworth Filter Plugin
//!
//! A second-order Butterworth lowpass filter plugin built with
//! [nih-plug](https://github.com/robbert-vdh/nih-plug) for learning DSP
//! fundamentals. Outputs Audio Unit (AUv2), VST3, and CLAP formats from a
//! single codebase. The filter is implemented from scratch — coefficient
//! derivation via the bilinear transform with frequency pre-warping, and
//! a direct form 1 difference equation — with thorough comments
//! explaining the "why" behind each line of DSP code.
//!
//! ## Signal Flow
//!
//! ```text
//! Input ──┬──────────────────────────────────── × (1 - mix) ───┐
//!         │                                                    │
//!         │   ┌──────────────────────────────┐                 │
//!         └──►│   Biquad Butterworth LPF     │── × mix ──────►(+)──► Output
//!             │                              │
//!             │  y[n] = b0·x[n]   + b1·x[n-1]│
//!             │       + b2·x[n-2] − a0·y[n-1]│
//!             │                  − a1·y[n-2] │
//!             └──────────────────────────────┘
//! ```
//!
//! The interesting work all lives in [`dsp::filter`]; this file is the
//! plumbing that connects it to a host DAW. The `filter_demo` binary
//! drives the same filter offline (CSV dumps, magnitude sweeps, impulse
//! response) for inspection without a DAW.

pub mod dsp;
mod params;

use std::num::NonZeroU32;
use std::sync::Arc;

use dsp::filter::BiquadFilter;
use nih_plug::prelude::*;
use params::PluginParams;

/// The main plugin struct.
///
/// This holds all the audio-rate state that persists between calls to
/// `process()`. The DAW calls `process()` hundreds of times per second,
/// each time passing a small buffer of audio samples (typically 64-1024
/// samples). Our state must survive between these calls.
///
/// ## Why separate state from parameters?
///
/// Parameters (`PluginParams`) are shared with the host via `Arc` and can
/// be read from any thread (the audio thread, the UI thread, the host's
/// automation thread). Plugin state (the filters) is owned exclusively
/// by the audio thread and only accessed in `process()`. This separation
/// makes the design thread-safe without locks — which matters doubly
/// here, because `BiquadFilter` itself is single-threaded by design.
struct LovelessLowpass {
    /// Shared reference to the plugin parameters. The `Arc` (Atomic
    /// Reference Counted pointer) allows both the plugin and the host
    /// to hold references to the same parameter data without copying.
    params: Arc<PluginParams>,

    /// The current sample rate in Hz (e.g., 44100.0 or 48000.0).
    /// Set during `initialize()` and handed to the filters whenever
    /// their cutoff is reconfigured.
    sample_rate: f32,

    /// One lowpass filter per audio channel.
    ///
    /// For stereo audio, this will contain 2 independent filters. Each
    /// channel is processed separately so that stereo imaging is
    /// preserved — the filters share coefficients in value but never in
    /// state, so one channel's history can't color the other.
    filters: Vec<BiquadFilter>,
}

impl Default for LovelessLowpass {
    fn default() -> Self {
        Self {
            params: Arc::new(PluginParams::default()),
            // 44100 Hz is a placeholder. The real sample rate is set in
            // initialize() when the host tells us the actual configuration.
            sample_rate: 44100.0,
            // Empty vec — populated in initialize() when we know the
            // channel count and sample rate.
            filters: Vec::new(),
        }
    }
}

impl Plugin for LovelessLowpass {
    const NAME: &'static str = "Loveless Lowpass";
    const VENDOR: &'static str = "Loveless Audio";
    const URL: &'static str = "";
    const EMAIL: &'static str = "steve.loveless@gmail.com";
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    // Supported audio channel layouts. The host will pick the first
    // layout that matches the track configuration.
    //
    // We support stereo (2 in → 2 out) and mono (1 in → 1 out).
    // Most DAW tracks are stereo, so we list it first.
    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[
        // Stereo layout
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(2),
            main_output_channels: NonZeroU32::new(2),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
        // Mono fallback
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(1),
            main_output_channels: NonZeroU32::new(1),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
    ];

    // We don't use MIDI, so disable it to keep things simple.
    const MIDI_INPUT: MidiConfig = MidiConfig::None;

    // Process parameter changes at sample-accurate timing. This means
    // when the host sends an automation point at sample 37 of a buffer,
    // the parameter actually changes at sample 37 (not at the start
    // of the buffer). More accurate, but we're already doing per-sample
    // smoothing so this just ensures consistency.
    const SAMPLE_ACCURATE_AUTOMATION: bool = true;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    /// Called when the plugin is first loaded, or when the audio
    /// configuration changes (e.g., sample rate change, channel count
    /// change). This is where we build the per-channel filters.
    ///
    /// # Why build here instead of in `default()`?
    ///
    /// The filter coefficients depend on the sample rate, and the number
    /// of filters depends on the channel count. Both are only known when
    /// the host calls `initialize()`.
    ///
    /// # Return value
    ///
    /// Return `true` if initialization succeeded. Returning `false`
    /// tells the host the plugin can't work with this configuration
    /// (e.g., unsupported channel count), and the host won't load it.
    fn initialize(
        &mut self,
        audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        self.sample_rate = buffer_config.sample_rate;

        // Determine the number of audio channels from the layout.
        let num_channels = audio_io_layout
            .main_input_channels
            .map(|c| c.get() as usize)
            .unwrap_or(2);

        // Create fresh filters for each channel at the current cutoff.
        // We replace any existing ones to handle sample rate changes —
        // a filter's coefficients are only valid for the sample rate
        // they were derived at.
        let cutoff = self.params.cutoff.value();
        self.filters = (0..num_channels)
            .map(|_| BiquadFilter::new(cutoff, self.sample_rate))
            .collect();

        true // Initialization succeeded
    }

    /// Called when playback stops or the plugin is bypassed.
    ///
    /// We clear the filter histories so that the tail of the last
    /// playback doesn't ring into the next one. Without this, pressing
    /// "play" after "stop" could start with a small transient left over
    /// from whatever audio was last processed.
    fn reset(&mut self) {
        for f in &mut self.filters {
            f.reset();
        }
    }

    /// The core audio processing function.
    ///
    /// The host calls this function repeatedly, passing small buffers
    /// of audio samples. A typical buffer might be 256 samples long at
    /// 44100 Hz, meaning this function is called ~172 times per second.
    ///
    /// # The Algorithm
    ///
    /// For each sample, across all channels:
    ///
    /// 1. **Retune** the filter to the current smoothed cutoff value
    /// 2. **Filter** the input sample through the biquad
    /// 3. **Mix** dry and wet signals for the output
    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        // Iterate over the buffer one sample at a time, across all channels.
        //
        // `iter_samples()` yields a `ChannelSamples` for each time step.
        // Within each time step, we process all channels. This is the
        // "per-sample, per-channel" pattern — the clearest (though not
        // the fastest) way to implement audio processing.
        for mut channel_samples in buffer.iter_samples() {
            // ─── Read smoothed parameter values for this sample ───
            //
            // `.smoothed.next()` returns the parameter's current value
            // after applying the smoother. If the user just moved the
            // cutoff knob from 1000 Hz to 5000 Hz, the smoother ramps
            // through the values in between over the smoothing duration
            // (50ms) instead of jumping, so the filter sweeps instead
            // of stepping.
            let cutoff = self.params.cutoff.smoothed.next();
            let mix = self.params.mix.smoothed.next();

            // Process each audio channel independently.
            for (channel_idx, sample) in channel_samples.iter_mut().enumerate() {
                // Get this channel's filter. The `let-else` pattern
                // skips channels we don't have state for (shouldn't
                // happen after initialize()).
                let Some(filter) = self.filters.get_mut(channel_idx) else {
                    continue;
                };

                // Retune the filter for this sample. We do this
                // per-sample (not per-buffer) because the cutoff might
                // be smoothing toward a new value, and we want the
                // filter to track that smoothly. `reconfigure` keeps
                // the filter's history across the coefficient change,
                // which is exactly what makes the sweep click-free.
                filter.reconfigure(cutoff, self.sample_rate);

                // Filter the sample, then crossfade dry and wet:
                //
                //   output = dry * (1 - mix) + wet * mix
                //
                //   mix = 0.0 → output = input (filter inaudible)
                //   mix = 1.0 → output = filtered only
                let input_sample = *sample;
                let filtered = filter.process(input_sample);
                *sample = input_sample * (1.0 - mix) + filtered * mix;
            }
        }

        // A biquad's ring-out is a handful of samples — far shorter than
        // any host buffer — so there's no meaningful tail to declare.
        ProcessStatus::Normal
    }
}

// ─────────────────────────────────────────────────────────────────────
// Plugin format trait implementations
// ─────────────────────────────────────────────────────────────────────
//
// These traits tell nih-plug how to package the plugin for different
// plugin formats. We support both CLAP and VST3.

impl ClapPlugin for LovelessLowpass {
    // A reverse-domain-notation ID, unique to this plugin.
    const CLAP_ID: &'static str = "com.loveless-audio.loveless-lowpass-v1";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("A second-order Butterworth lowpass filter, built for learning DSP");
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Stereo,
        ClapFeature::Filter,
    ];
}

impl Vst3Plugin for LovelessLowpass {
    // A 16-byte class ID that must be globally unique across all VST3
    // plugins ever made. For a production plugin, use a proper UUID.
    // For our learning project, this ASCII-based ID is sufficient.
    //
    // The `*b"..."` syntax creates a `[u8; 16]` from a 16-character
    // ASCII string literal. Each character becomes one byte.
    const VST3_CLASS_ID: [u8; 16] = *b"LvlssLowpass_v01";

    // Tell the host this is a filter effect so it appears in the
    // correct category in the plugin browser.
    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Filter];
}

// ─────────────────────────────────────────────────────────────────────
// Export macros
// ─────────────────────────────────────────────────────────────────────
//
// These macros generate the C-compatible entry points that the host
// DAW uses to discover and load the plugin. Without these, the compiled
// .dylib would have no externally visible symbols and the host wouldn't
// know it's a plugin.
//
// nih_export_clap! exports the `clap_entry` symbol for CLAP hosts.
// nih_export_vst3! exports `GetPluginFactory` for VST3 hosts.
// clap_wrapper re-exports the CLAP entry point as AUv2 and VST3 via
// the clap-wrapper crate, so Logic Pro (Audio Units only) can load it.

nih_export_clap!(LovelessLowpass);
nih_export_vst3!(LovelessLowpass);

// Wrap our CLAP plugin into AUv2 format for Logic Pro.
// This generates a `GetPluginFactoryAUV2` entry point that macOS uses
// to discover the plugin as an Audio Unit component.
clap_wrapper::export_auv2!();
