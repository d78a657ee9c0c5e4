use sampleop::{render_offline, write_wav, DspError, DspSetup, Performer, Ports, Sample, SampleOperator, Samples};

/// Phase-accumulating sine source with no inputs.
struct Sine {
    phase: Sample,
    increment: Sample,
}
impl SampleOperator for Sine {
    type Ports = Ports<0, 1>;
}
impl Sine {
    fn new(freq: Sample, sample_rate: Sample) -> Self {
        Self {
            phase: 0.0,
            increment: 2.0 * std::f64::consts::PI * freq / sample_rate,
        }
    }

    fn calculate(&mut self) -> Sample {
        let out = self.phase.sin();
        self.phase += self.increment;
        out
    }
}

struct Widen;
impl SampleOperator for Widen {
    type Ports = Ports<1, 2>;
}
impl Widen {
    fn calculate(&mut self, x: Sample) -> Samples<2> {
        [x * 0.5, x * -0.5]
    }
}

fn render_sine(frames: usize, max_frames: usize) -> Vec<Sample> {
    let mut sine = Performer::new(Sine::new(440.0, 44_100.0), Sine::calculate);
    let setup = DspSetup::new(44_100.0, max_frames).with_channels(0, 1);
    let mut out = render_offline(&mut sine, &setup, &[], frames).unwrap();
    out.remove(0)
}

#[test]
fn offline_render_determinism() {
    let output1 = render_sine(256, 64);
    let output2 = render_sine(256, 64);
    assert_eq!(output1, output2, "Offline renders should be identical");
}

#[test]
fn block_size_does_not_change_the_signal() {
    assert_eq!(render_sine(200, 64), render_sine(200, 7));
}

#[test]
fn offline_render_partial_block() {
    let frames = 65; // 64 + 1
    let output = render_sine(frames, 64);
    assert_eq!(output.len(), frames, "Output should have exactly requested frames");
    assert!(output[1] > 0.0);
    assert!(output.iter().any(|&x| x != 0.0), "Should produce non-zero output");
}

#[test]
fn render_rejects_mismatched_setup() {
    let mut widen = Performer::new(Widen, Widen::calculate);
    let setup = DspSetup::new(44_100.0, 64);
    let err = render_offline(&mut widen, &setup, &[vec![0.0; 8]], 8).unwrap_err();
    assert!(matches!(err, DspError::OutputCountMismatch { expected: 2, actual: 1 }));
}

#[test]
fn render_rejects_missing_input_channels() {
    let mut widen = Performer::new(Widen, Widen::calculate);
    let setup = DspSetup::for_callback(44_100.0, 64, &widen);
    let err = render_offline(&mut widen, &setup, &[], 8).unwrap_err();
    assert!(matches!(err, DspError::MissingChannels { expected: 1, actual: 0 }));
}

#[test]
fn wav_export_round_trip() {
    let mut widen = Performer::new(Widen, Widen::calculate);
    let setup = DspSetup::for_callback(48_000.0, 32, &widen);
    let input = vec![render_sine(100, 64)];
    let channels = render_offline(&mut widen, &setup, &input, 100).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widen.wav");
    write_wav(&path, &channels, 48_000).unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48_000);
    assert_eq!(spec.sample_format, hound::SampleFormat::Float);
    let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 200);
    for frame in 0..100 {
        assert_eq!(samples[2 * frame], channels[0][frame] as f32);
        assert_eq!(samples[2 * frame + 1], channels[1][frame] as f32);
    }
}
