//! Per-frame sample bundles and argument expansion.
//!
//! A [`SampleBundle<K>`] holds one sample per input channel for a single frame.
//! [`Expand`] turns a bundle into a positional call `f(op, s0, s1, ..., sK-1)`
//! by destructuring the array; there is no loop and nothing is boxed.

#![forbid(unsafe_code)]

use crate::Sample;

/// Fixed-length ordered samples for one frame, slot `c` holding input channel `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleBundle<const K: usize>([Sample; K]);

impl<const K: usize> SampleBundle<K> {
    /// A bundle with every slot at `0.0`.
    #[inline]
    pub const fn new() -> Self {
        Self([0.0; K])
    }

    /// Wrap an existing array.
    #[inline]
    pub const fn from_array(samples: [Sample; K]) -> Self {
        Self(samples)
    }

    /// Number of slots (always `K`).
    #[inline]
    pub const fn len(&self) -> usize {
        K
    }

    /// True for the zero-input bundle.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        K == 0
    }

    /// Store `value` in slot `index`.
    #[inline]
    pub fn set(&mut self, index: usize, value: Sample) {
        self.0[index] = value;
    }

    /// Read slot `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Sample {
        self.0[index]
    }

    /// Borrow the underlying samples.
    #[inline]
    pub const fn as_array(&self) -> &[Sample; K] {
        &self.0
    }

    /// Unwrap into the underlying samples.
    #[inline]
    pub const fn into_array(self) -> [Sample; K] {
        self.0
    }
}

impl<const K: usize> Default for SampleBundle<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a bundle from channel-major input buffers at one frame index.
pub trait Gather: Sized {
    /// Read frame `frame` of each input channel, in ascending channel order.
    fn gather(inputs: &[&[Sample]], frame: usize) -> Self;
}

impl<const K: usize> Gather for SampleBundle<K> {
    #[inline]
    fn gather(inputs: &[&[Sample]], frame: usize) -> Self {
        let mut bundle = Self::new();
        for (slot, channel) in inputs.iter().take(K).enumerate() {
            bundle.set(slot, channel[frame]);
        }
        bundle
    }
}

/// Calls a K-ary compute function with the slots of a `SampleBundle<K>` as
/// separate positional arguments.
///
/// Implemented for every `F: FnMut(&mut Op, Sample, ..., Sample) -> R` with
/// `0..=8` sample parameters.
pub trait Expand<Op, B> {
    /// Whatever the compute function returns.
    type Output;

    /// Invoke `self(op, bundle[0], ..., bundle[K-1])`.
    fn expand(&mut self, op: &mut Op, bundle: B) -> Self::Output;
}

macro_rules! expand {
    (@sample $arg:ident) => {
        Sample
    };
    ($($k:literal: ($($arg:ident),*);)*) => {
        $(
            impl<Op, F, R> Expand<Op, SampleBundle<$k>> for F
            where
                F: FnMut(&mut Op, $(expand!(@sample $arg)),*) -> R,
            {
                type Output = R;

                #[inline(always)]
                fn expand(&mut self, op: &mut Op, bundle: SampleBundle<$k>) -> R {
                    let SampleBundle([$($arg),*]) = bundle;
                    (*self)(op, $($arg),*)
                }
            }
        )*
    };
}

expand! {
    0: ();
    1: (s0);
    2: (s0, s1);
    3: (s0, s1, s2);
    4: (s0, s1, s2, s3);
    5: (s0, s1, s2, s3, s4);
    6: (s0, s1, s2, s3, s4, s5);
    7: (s0, s1, s2, s3, s4, s5, s6);
    8: (s0, s1, s2, s3, s4, s5, s6, s7);
}
