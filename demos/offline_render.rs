use sampleop::{render_offline, write_wav, DspError, DspSetup, Performer, Ports, Sample, SampleOperator, Samples};

/// Sine source.
struct Osc {
    phase: Sample,
    increment: Sample,
}
impl SampleOperator for Osc {
    type Ports = Ports<0, 1>;
}
impl Osc {
    fn calculate(&mut self) -> Sample {
        let out = self.phase.sin();
        self.phase = (self.phase + self.increment) % std::f64::consts::TAU;
        out
    }
}

/// Equal-power pan driven by a second input.
struct Pan;
impl SampleOperator for Pan {
    type Ports = Ports<2, 2>;
}
impl Pan {
    fn calculate(&mut self, x: Sample, position: Sample) -> Samples<2> {
        let angle = position * std::f64::consts::FRAC_PI_2;
        [x * angle.cos(), x * angle.sin()]
    }
}

fn main() -> Result<(), DspError> {
    let sample_rate = 44_100.0;
    let frames = 44_100;

    let mut osc = Performer::new(
        Osc {
            phase: 0.0,
            increment: std::f64::consts::TAU * 440.0 / sample_rate,
        },
        Osc::calculate,
    );
    let setup = DspSetup::for_callback(sample_rate, 64, &osc);
    let tone = render_offline(&mut osc, &setup, &[], frames)?;

    let sweep: Vec<Sample> = (0..frames).map(|i| i as Sample / frames as Sample).collect();
    let mut pan = Performer::new(Pan, Pan::calculate);
    let setup = DspSetup::for_callback(sample_rate, 64, &pan);
    let stereo = render_offline(&mut pan, &setup, &[tone[0].clone(), sweep], frames)?;

    write_wav("pan_sweep.wav", &stereo, sample_rate as u32)?;
    println!("Offline render: wrote {} frames to pan_sweep.wav", frames);
    Ok(())
}
