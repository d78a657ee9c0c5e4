//! Channel-arity descriptors: compile-time (inputs, outputs) pairs for compute units.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use crate::bundle::{Gather, SampleBundle};
use crate::rt::{Frames, Mono};

/// Type-level channel layout of a compute unit: `I` input channels, `O` output channels.
///
/// `Ports` carries no data; it only exists so a compute unit can name its arity
/// in [`SampleOperator::Ports`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ports<const I: usize, const O: usize>;

/// Compile-time channel counts plus the per-frame machinery they select.
///
/// Implemented for every supported `Ports<I, O>` (inputs `0..=8`, outputs `0..=8`).
/// `Ports<1, 1>` routes to the [`Mono`] fast path; every other layout routes to
/// [`Frames`].
pub trait Arity {
    /// Number of input channels.
    const INPUT_COUNT: usize;
    /// Number of output channels.
    const OUTPUT_COUNT: usize;
    /// Per-frame sample bundle sized to `INPUT_COUNT`.
    type Bundle: Gather;
    /// Dispatch path chosen for this layout.
    type Path;

    /// Number of input channels.
    fn input_count() -> usize {
        Self::INPUT_COUNT
    }

    /// Number of output channels.
    fn output_count() -> usize {
        Self::OUTPUT_COUNT
    }
}

/// A per-sample compute unit with a fixed channel layout.
///
/// The compute function handed to [`Performer::new`](crate::rt::Performer::new)
/// takes one [`Sample`](crate::Sample) per input channel and returns a bare
/// `Sample` for a single output or [`Samples<O>`](crate::Samples) otherwise;
/// a zero-output unit (a meter or analyzer) returns `[]`.
/// Any other shape fails to build:
///
/// ```compile_fail
/// use sampleop::{Performer, Ports, Sample, SampleOperator};
///
/// struct Sum;
/// impl SampleOperator for Sum {
///     type Ports = Ports<2, 1>;
/// }
/// impl Sum {
///     // Declares two inputs but takes one.
///     fn calculate(&mut self, a: Sample) -> Sample {
///         a
///     }
/// }
///
/// let _ = Performer::new(Sum, Sum::calculate);
/// ```
///
/// ```compile_fail
/// use sampleop::{Performer, Ports, Sample, SampleOperator};
///
/// struct Split;
/// impl SampleOperator for Split {
///     type Ports = Ports<1, 2>;
/// }
/// impl Split {
///     // Declares two outputs but returns a bare sample.
///     fn calculate(&mut self, x: Sample) -> Sample {
///         x
///     }
/// }
///
/// let _ = Performer::new(Split, Split::calculate);
/// ```
pub trait SampleOperator {
    /// The unit's channel layout, e.g. `Ports<2, 1>`.
    type Ports: Arity;

    /// Number of input channels.
    const INPUT_COUNT: usize = <Self::Ports as Arity>::INPUT_COUNT;
    /// Number of output channels.
    const OUTPUT_COUNT: usize = <Self::Ports as Arity>::OUTPUT_COUNT;
}

macro_rules! ports {
    ($path:ident: $($inputs:literal => [$($outputs:literal),*]);* $(;)?) => {
        $( ports!(@row $path, $inputs, [$($outputs),*]); )*
    };
    (@row $path:ident, $inputs:literal, [$($outputs:literal),*]) => {
        $(
            impl Arity for Ports<$inputs, $outputs> {
                const INPUT_COUNT: usize = $inputs;
                const OUTPUT_COUNT: usize = $outputs;
                type Bundle = SampleBundle<$inputs>;
                type Path = $path;
            }
        )*
    };
}

ports!(Mono: 1 => [1]);

ports!(Frames:
    0 => [0, 1, 2, 3, 4, 5, 6, 7, 8];
    1 => [0, 2, 3, 4, 5, 6, 7, 8];
    2 => [0, 1, 2, 3, 4, 5, 6, 7, 8];
    3 => [0, 1, 2, 3, 4, 5, 6, 7, 8];
    4 => [0, 1, 2, 3, 4, 5, 6, 7, 8];
    5 => [0, 1, 2, 3, 4, 5, 6, 7, 8];
    6 => [0, 1, 2, 3, 4, 5, 6, 7, 8];
    7 => [0, 1, 2, 3, 4, 5, 6, 7, 8];
    8 => [0, 1, 2, 3, 4, 5, 6, 7, 8];
);
