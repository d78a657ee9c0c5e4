//! Output scatter: writes one frame of compute results into channel-major output buffers.

#![forbid(unsafe_code)]

use crate::arity::Ports;
use crate::{Sample, Samples};

/// A per-frame result that knows how to land in the output buffers of layout `P`.
///
/// The result shape is tied to the layout: a bare [`Sample`] scatters only into
/// single-output layouts and `Samples<O>` only into `O`-output layouts.
pub trait Scatter<P> {
    /// Write this frame's value(s) to `outputs[c][frame]`, ascending `c`.
    fn scatter(self, outputs: &mut [&mut [Sample]], frame: usize);
}

impl<const I: usize> Scatter<Ports<I, 1>> for Sample {
    #[inline]
    fn scatter(self, outputs: &mut [&mut [Sample]], frame: usize) {
        outputs[0][frame] = self;
    }
}

impl<const I: usize, const O: usize> Scatter<Ports<I, O>> for Samples<O> {
    #[inline]
    fn scatter(self, outputs: &mut [&mut [Sample]], frame: usize) {
        for (channel, value) in outputs.iter_mut().zip(self) {
            channel[frame] = value;
        }
    }
}
