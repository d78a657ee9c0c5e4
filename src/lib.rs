//! # sampleop
//!
//! Adapts block-oriented, multichannel audio callbacks to per-sample compute
//! functions with a compile-time channel layout.
//!
//! A host hands over `N` input channel buffers, `M` output channel buffers and a
//! frame count. A compute unit is most naturally written as "one sample per input
//! in, one sample per output out". [`Performer`] bridges the two without
//! allocating, locking, or branching on arity at run time:
//!
//! - `Ports<1, 1>` units take the [`Mono`](rt::Mono) path: read, call, write.
//! - Every other layout takes the [`Frames`](rt::Frames) path: gather a
//!   [`SampleBundle`], expand it into positional arguments, scatter the result.
//!
//! ```
//! use sampleop::{Performer, Ports, Sample, SampleOperator, Samples};
//!
//! struct Pan;
//!
//! impl SampleOperator for Pan {
//!     type Ports = Ports<2, 2>;
//! }
//!
//! impl Pan {
//!     fn calculate(&mut self, x: Sample, position: Sample) -> Samples<2> {
//!         [x * (1.0 - position), x * position]
//!     }
//! }
//!
//! let mut pan = Performer::new(Pan, Pan::calculate);
//! let (x, position) = ([1.0, 1.0], [0.0, 0.25]);
//! let (mut left, mut right) = ([0.0; 2], [0.0; 2]);
//! pan.perform(&[&x, &position], &mut [&mut left, &mut right], 2);
//! assert_eq!(left, [1.0, 0.75]);
//! assert_eq!(right, [0.0, 0.25]);
//! ```
//!
//! Setup validation, offline rendering and WAV export live in [`setup`] and
//! [`render`]; they run outside the audio thread.

pub mod arity;
pub mod bundle;
#[doc(hidden)]
pub mod invariant_ppt;
pub mod node;
pub mod render;
pub mod rt;
pub mod scatter;
pub mod setup;

/// One audio sample.
pub type Sample = f64;

/// A fixed group of samples, one per output channel.
pub type Samples<const N: usize> = [Sample; N];

pub use arity::{Arity, Ports, SampleOperator};
pub use bundle::{Expand, Gather, SampleBundle};
pub use node::AudioCallback;
pub use render::{render_offline, write_wav};
pub use rt::{Dispatch, Performer};
pub use scatter::Scatter;
pub use setup::{DspError, DspSetup};
