//! Object-safe callback interface so a host can hold heterogeneous performers.

#![forbid(unsafe_code)]

use crate::arity::{Arity, SampleOperator};
use crate::rt::{Dispatch, Performer};
use crate::Sample;

/// Object-safe audio callback, the shape a host scheduler stores and invokes.
pub trait AudioCallback: Send {
    /// Input channel buffers the callback reads.
    fn input_count(&self) -> usize;
    /// Output channel buffers the callback writes.
    fn output_count(&self) -> usize;
    /// Process one block; see [`Performer::perform`].
    fn perform(&mut self, inputs: &[&[Sample]], outputs: &mut [&mut [Sample]], frames: usize);
    /// Process one block, silencing outputs if the compute function panics.
    fn perform_safe(
        &mut self,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        frames: usize,
    ) -> bool;
}

impl<Op, F> AudioCallback for Performer<Op, F>
where
    Op: SampleOperator + Send,
    F: Send,
    <Op::Ports as Arity>::Path: Dispatch<Op, F>,
{
    fn input_count(&self) -> usize {
        <Op::Ports as Arity>::INPUT_COUNT
    }

    fn output_count(&self) -> usize {
        <Op::Ports as Arity>::OUTPUT_COUNT
    }

    fn perform(&mut self, inputs: &[&[Sample]], outputs: &mut [&mut [Sample]], frames: usize) {
        Performer::perform(self, inputs, outputs, frames);
    }

    fn perform_safe(
        &mut self,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        frames: usize,
    ) -> bool {
        Performer::perform_safe(self, inputs, outputs, frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arity::Ports;
    use crate::Samples;

    struct Gain {
        gain: Sample,
    }
    impl SampleOperator for Gain {
        type Ports = Ports<1, 1>;
    }
    impl Gain {
        fn calculate(&mut self, x: Sample) -> Sample {
            x * self.gain
        }
    }

    struct Pan;
    impl SampleOperator for Pan {
        type Ports = Ports<2, 2>;
    }
    impl Pan {
        fn calculate(&mut self, x: Sample, position: Sample) -> Samples<2> {
            [x * (1.0 - position), x * position]
        }
    }

    #[test]
    fn boxed_callbacks_report_their_layout() {
        let callbacks: Vec<Box<dyn AudioCallback>> = vec![
            Box::new(Performer::new(Gain { gain: 0.5 }, Gain::calculate)),
            Box::new(Performer::new(Pan, Pan::calculate)),
        ];
        let layouts: Vec<(usize, usize)> = callbacks
            .iter()
            .map(|c| (c.input_count(), c.output_count()))
            .collect();
        assert_eq!(layouts, vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn boxed_callback_performs() {
        let mut callback: Box<dyn AudioCallback> = Box::new(Performer::new(Pan, Pan::calculate));
        let x = [1.0, 2.0];
        let position = [0.25, 0.5];
        let (mut left, mut right) = ([0.0; 2], [0.0; 2]);
        callback.perform(&[&x, &position], &mut [&mut left, &mut right], 2);
        assert_eq!(left, [0.75, 1.0]);
        assert_eq!(right, [0.25, 1.0]);
    }
}
