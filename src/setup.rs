//! Host-side DSP setup: the parameters a host announces before audio starts,
//! and the checks that make `perform`'s buffer assumptions hold.

use crate::invariant_ppt::{assert_invariant, ARITY_MATCH, BLOCK_SHAPE, SETUP_VALID};
use crate::node::AudioCallback;
use crate::Sample;
use thiserror::Error;
use tracing::debug;

/// Errors raised while preparing or rendering audio outside the RT path.
#[derive(Debug, Error)]
pub enum DspError {
    /// Sample rate was zero, negative, or not finite.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f64),
    /// Maximum block size was zero.
    #[error("maximum frames per block must be non-zero")]
    ZeroMaxFrames,
    /// Host input channel count differs from the callback's.
    #[error("input channel mismatch: callback expects {expected}, host provides {actual}")]
    InputCountMismatch {
        /// Channels the callback reads.
        expected: usize,
        /// Channels the host announced.
        actual: usize,
    },
    /// Host output channel count differs from the callback's.
    #[error("output channel mismatch: callback expects {expected}, host provides {actual}")]
    OutputCountMismatch {
        /// Channels the callback writes.
        expected: usize,
        /// Channels the host announced.
        actual: usize,
    },
    /// Fewer channel buffers were supplied than announced.
    #[error("missing channel buffers: expected {expected}, got {actual}")]
    MissingChannels {
        /// Buffers required.
        expected: usize,
        /// Buffers supplied.
        actual: usize,
    },
    /// A block was larger than the announced maximum.
    #[error("block of {frames} frames exceeds maximum of {max}")]
    FrameCountExceedsMax {
        /// Frames requested.
        frames: usize,
        /// Announced maximum.
        max: usize,
    },
    /// A channel buffer was shorter than the block.
    #[error("channel {channel} holds {len} samples, block needs {frames}")]
    BufferTooShort {
        /// Offending channel (inputs first, then outputs).
        channel: usize,
        /// Buffer length.
        len: usize,
        /// Frames requested.
        frames: usize,
    },
    /// Input channels had differing lengths.
    #[error("input channels have differing lengths")]
    RaggedInput,
    /// No channels were given where at least one is needed.
    #[error("no channels to write")]
    EmptyChannels,
    /// More channels than the WAV format can hold.
    #[error("{0} channels exceed the WAV channel limit")]
    TooManyChannels(usize),
    /// WAV encoding failed.
    #[error("wav export failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Parameters a host announces when audio is switched on.
#[derive(Debug, Clone, PartialEq)]
pub struct DspSetup {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Largest block the host will pass to `perform`.
    pub max_frames: usize,
    /// Input channel buffers the host will supply.
    pub input_channels: usize,
    /// Output channel buffers the host will supply.
    pub output_channels: usize,
}

impl DspSetup {
    /// Mono in, mono out.
    pub fn new(sample_rate: f64, max_frames: usize) -> Self {
        Self {
            sample_rate,
            max_frames,
            input_channels: 1,
            output_channels: 1,
        }
    }

    /// Setup whose channel counts are taken from `callback`.
    pub fn for_callback(sample_rate: f64, max_frames: usize, callback: &dyn AudioCallback) -> Self {
        Self::new(sample_rate, max_frames)
            .with_channels(callback.input_count(), callback.output_count())
    }

    /// Override the channel counts.
    pub fn with_channels(mut self, inputs: usize, outputs: usize) -> Self {
        self.input_channels = inputs;
        self.output_channels = outputs;
        self
    }

    /// Check the setup against the callback that will be driven with it.
    pub fn validate(&self, callback: &dyn AudioCallback) -> Result<(), DspError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(DspError::InvalidSampleRate(self.sample_rate));
        }
        if self.max_frames == 0 {
            return Err(DspError::ZeroMaxFrames);
        }
        assert_invariant(SETUP_VALID, true, "Setup parameters accepted", Some("validate"));

        if callback.input_count() != self.input_channels {
            return Err(DspError::InputCountMismatch {
                expected: callback.input_count(),
                actual: self.input_channels,
            });
        }
        if callback.output_count() != self.output_channels {
            return Err(DspError::OutputCountMismatch {
                expected: callback.output_count(),
                actual: self.output_channels,
            });
        }
        assert_invariant(ARITY_MATCH, true, "Callback arity matches host", Some("validate"));

        debug!(
            sample_rate = self.sample_rate,
            max_frames = self.max_frames,
            inputs = self.input_channels,
            outputs = self.output_channels,
            "dsp setup validated"
        );
        Ok(())
    }

    /// Check that one block's buffers satisfy what `perform` assumes.
    pub fn validate_block(
        &self,
        inputs: &[&[Sample]],
        outputs: &[&mut [Sample]],
        frames: usize,
    ) -> Result<(), DspError> {
        if frames > self.max_frames {
            return Err(DspError::FrameCountExceedsMax {
                frames,
                max: self.max_frames,
            });
        }
        if inputs.len() < self.input_channels {
            return Err(DspError::MissingChannels {
                expected: self.input_channels,
                actual: inputs.len(),
            });
        }
        if outputs.len() < self.output_channels {
            return Err(DspError::MissingChannels {
                expected: self.output_channels,
                actual: outputs.len(),
            });
        }
        let lens = inputs[..self.input_channels]
            .iter()
            .map(|c| c.len())
            .chain(outputs[..self.output_channels].iter().map(|c| c.len()));
        for (channel, len) in lens.enumerate() {
            if len < frames {
                return Err(DspError::BufferTooShort {
                    channel,
                    len,
                    frames,
                });
            }
        }
        assert_invariant(BLOCK_SHAPE, true, "Block buffers cover the callback", Some("validate_block"));
        Ok(())
    }
}
