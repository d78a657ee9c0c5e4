//! Offline rendering: drive a callback over whole signals and export the result.

use crate::invariant_ppt::{assert_invariant, OFFLINE_RENDER_COMPLETE, WAV_EXPORTED};
use crate::node::AudioCallback;
use crate::setup::{DspError, DspSetup};
use crate::Sample;
use std::path::Path;
use tracing::{debug, info};

/// Render `frames` frames of `inputs` through `callback` in blocks of at most
/// `setup.max_frames`; the final block may be partial.
///
/// Returns one buffer of exactly `frames` samples per output channel.
pub fn render_offline(
    callback: &mut dyn AudioCallback,
    setup: &DspSetup,
    inputs: &[Vec<Sample>],
    frames: usize,
) -> Result<Vec<Vec<Sample>>, DspError> {
    setup.validate(callback)?;
    if inputs.len() < setup.input_channels {
        return Err(DspError::MissingChannels {
            expected: setup.input_channels,
            actual: inputs.len(),
        });
    }
    let inputs = &inputs[..setup.input_channels];
    for (channel, input) in inputs.iter().enumerate() {
        if input.len() < frames {
            return Err(DspError::BufferTooShort {
                channel,
                len: input.len(),
                frames,
            });
        }
    }

    let mut output = vec![vec![0.0; frames]; setup.output_channels];
    let mut offset = 0;
    let mut blocks = 0usize;
    while offset < frames {
        let end = (offset + setup.max_frames).min(frames);
        let block_len = end - offset;
        let in_block: Vec<&[Sample]> = inputs.iter().map(|c| &c[offset..end]).collect();
        let mut out_block: Vec<&mut [Sample]> =
            output.iter_mut().map(|c| &mut c[offset..end]).collect();
        setup.validate_block(&in_block, &out_block, block_len)?;
        callback.perform(&in_block, &mut out_block, block_len);
        offset = end;
        blocks += 1;
    }

    assert_invariant(
        OFFLINE_RENDER_COMPLETE,
        output.iter().all(|c| c.len() == frames),
        "Every output channel holds the requested frames",
        Some("render_offline"),
    );
    debug!(frames, blocks, channels = output.len(), "offline render finished");
    Ok(output)
}

/// Write channel-major samples as an interleaved 32-bit float WAV file.
pub fn write_wav(
    path: impl AsRef<Path>,
    channels: &[Vec<Sample>],
    sample_rate: u32,
) -> Result<(), DspError> {
    let first = channels.first().ok_or(DspError::EmptyChannels)?;
    let frames = first.len();
    if channels.iter().any(|c| c.len() != frames) {
        return Err(DspError::RaggedInput);
    }
    let channel_count =
        u16::try_from(channels.len()).map_err(|_| DspError::TooManyChannels(channels.len()))?;

    let spec = hound::WavSpec {
        channels: channel_count,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let path = path.as_ref();
    let mut writer = hound::WavWriter::create(path, spec)?;
    for frame in 0..frames {
        for channel in channels {
            writer.write_sample(channel[frame] as f32)?;
        }
    }
    writer.finalize()?;

    assert_invariant(WAV_EXPORTED, true, "WAV file finalized", Some("write_wav"));
    info!(path = %path.display(), frames, channels = channels.len(), "wrote wav");
    Ok(())
}
