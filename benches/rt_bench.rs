use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sampleop::{Performer, Ports, Sample, SampleOperator, Samples};

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

/// Same arithmetic as `Gain` but routed through the generic path.
struct WideGain {
    gain: Sample,
}
impl SampleOperator for WideGain {
    type Ports = Ports<1, 2>;
}
impl WideGain {
    fn calculate(&mut self, x: Sample) -> Samples<2> {
        let y = x * self.gain;
        [y, y]
    }
}

struct Quad;
impl SampleOperator for Quad {
    type Ports = Ports<4, 4>;
}
impl Quad {
    fn calculate(&mut self, a: Sample, b: Sample, c: Sample, d: Sample) -> Samples<4> {
        [a + b, b + c, c + d, d + a]
    }
}

fn bench_mono(c: &mut Criterion) {
    let input = vec![0.25; 1024];
    let mut out = vec![0.0; 1024];
    let mut performer = Performer::new(Gain { gain: 0.5 }, Gain::calculate);

    c.bench_function("perform_mono_1024", |b| {
        b.iter(|| {
            performer.perform(&[black_box(&input)], &mut [&mut out], 1024);
            black_box(&out);
        })
    });
}

fn bench_frames(c: &mut Criterion) {
    let input = vec![0.25; 1024];
    let (mut left, mut right) = (vec![0.0; 1024], vec![0.0; 1024]);
    let mut wide = Performer::new(WideGain { gain: 0.5 }, WideGain::calculate);

    c.bench_function("perform_frames_1x2_1024", |b| {
        b.iter(|| {
            wide.perform(&[black_box(&input)], &mut [&mut left, &mut right], 1024);
            black_box(&left);
        })
    });

    let inputs: Vec<Vec<Sample>> = (0..4).map(|c| vec![c as Sample; 1024]).collect();
    let mut outputs: Vec<Vec<Sample>> = vec![vec![0.0; 1024]; 4];
    let in_views: Vec<&[Sample]> = inputs.iter().map(|c| c.as_slice()).collect();
    let mut out_views: Vec<&mut [Sample]> = outputs.iter_mut().map(|c| c.as_mut_slice()).collect();
    let mut quad = Performer::new(Quad, Quad::calculate);

    c.bench_function("perform_frames_4x4_1024", |b| {
        b.iter(|| {
            quad.perform(black_box(&in_views), &mut out_views, 1024);
            black_box(&out_views);
        })
    });
}

criterion_group!(benches, bench_mono, bench_frames);
criterion_main!(benches);
