//! RT module: per-frame dispatch of block callbacks onto per-sample compute functions.

// IMPORTANT: Do not call assert_invariant, tracing, or anything that allocates in this module.

use crate::arity::{Arity, SampleOperator};
use crate::bundle::{Expand, Gather};
use crate::scatter::Scatter;
use crate::Sample;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Dispatch path for `Ports<1, 1>`: one bare sample in, one bare sample out.
#[derive(Debug)]
pub enum Mono {}

/// Dispatch path for every other layout: gather a bundle, expand, scatter.
#[derive(Debug)]
pub enum Frames {}

/// How a dispatch path drives one block through a compute function.
pub trait Dispatch<Op, F> {
    /// Process `frames` frames of `inputs` into `outputs`.
    fn perform(
        op: &mut Op,
        calculate: &mut F,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        frames: usize,
    );
}

impl<Op, F> Dispatch<Op, F> for Mono
where
    F: FnMut(&mut Op, Sample) -> Sample,
{
    #[inline]
    fn perform(
        op: &mut Op,
        calculate: &mut F,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        frames: usize,
    ) {
        let (Some(input), Some(output)) = (inputs.first(), outputs.first_mut()) else {
            return;
        };
        for (out, &sample) in output[..frames].iter_mut().zip(&input[..frames]) {
            *out = calculate(op, sample);
        }
    }
}

impl<Op, F> Dispatch<Op, F> for Frames
where
    Op: SampleOperator,
    F: Expand<Op, <Op::Ports as Arity>::Bundle>,
    <F as Expand<Op, <Op::Ports as Arity>::Bundle>>::Output: Scatter<Op::Ports>,
{
    #[inline]
    fn perform(
        op: &mut Op,
        calculate: &mut F,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        frames: usize,
    ) {
        for frame in 0..frames {
            let bundle = <<Op::Ports as Arity>::Bundle as Gather>::gather(inputs, frame);
            calculate.expand(op, bundle).scatter(outputs, frame);
        }
    }
}

/// Adapts a host block callback to a per-sample compute function.
///
/// `Op` is the compute unit (and its state); `F` is its compute function, usually a
/// method path such as `Gain::calculate`. The dispatch path is fixed by
/// `Op::Ports` when the type is built, so `perform` carries no branching on arity.
///
/// ```
/// use sampleop::{Performer, Ports, Sample, SampleOperator};
///
/// struct Sum;
/// impl SampleOperator for Sum {
///     type Ports = Ports<2, 1>;
/// }
/// impl Sum {
///     fn calculate(&mut self, a: Sample, b: Sample) -> Sample {
///         a + b
///     }
/// }
///
/// let mut performer = Performer::new(Sum, Sum::calculate);
/// let (left, right) = ([1.0, 2.0, 3.0], [10.0, 20.0, 30.0]);
/// let mut out = [0.0; 3];
/// performer.perform(&[&left, &right], &mut [&mut out], 3);
/// assert_eq!(out, [11.0, 22.0, 33.0]);
/// ```
pub struct Performer<Op, F> {
    op: Op,
    calculate: F,
}

impl<Op, F> Performer<Op, F>
where
    Op: SampleOperator,
    <Op::Ports as Arity>::Path: Dispatch<Op, F>,
{
    /// Number of input channel buffers `perform` reads.
    pub const INPUT_COUNT: usize = <Op::Ports as Arity>::INPUT_COUNT;
    /// Number of output channel buffers `perform` writes.
    pub const OUTPUT_COUNT: usize = <Op::Ports as Arity>::OUTPUT_COUNT;

    /// Bind a compute unit to its compute function.
    pub fn new(op: Op, calculate: F) -> Self {
        Self { op, calculate }
    }

    /// Run one block.
    ///
    /// `inputs` must hold at least `INPUT_COUNT` channels and `outputs` at least
    /// `OUTPUT_COUNT`, each with at least `frames` samples. Frames are processed in
    /// ascending order; only `outputs[c][..frames]` is written.
    #[inline]
    pub fn perform(&mut self, inputs: &[&[Sample]], outputs: &mut [&mut [Sample]], frames: usize) {
        <<Op::Ports as Arity>::Path as Dispatch<Op, F>>::perform(
            &mut self.op,
            &mut self.calculate,
            inputs,
            outputs,
            frames,
        );
    }

    /// Run one block with panic containment.
    ///
    /// If the compute function panics, every output channel is silenced for the
    /// block. Returns `false` in that case.
    pub fn perform_safe(
        &mut self,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        frames: usize,
    ) -> bool {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.perform(inputs, outputs, frames);
        }));
        if result.is_err() {
            // Fail closed: silence output
            for channel in outputs.iter_mut() {
                let end = frames.min(channel.len());
                channel[..end].fill(0.0);
            }
            return false;
        }
        true
    }
}

impl<Op, F> Performer<Op, F> {
    /// Borrow the compute unit.
    pub fn operator(&self) -> &Op {
        &self.op
    }

    /// Mutably borrow the compute unit, e.g. to change a parameter between blocks.
    pub fn operator_mut(&mut self) -> &mut Op {
        &mut self.op
    }

    /// Release the compute unit.
    pub fn into_operator(self) -> Op {
        self.op
    }
}

impl<Op: fmt::Debug, F> fmt::Debug for Performer<Op, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Performer")
            .field("op", &self.op)
            .finish_non_exhaustive()
    }
}
