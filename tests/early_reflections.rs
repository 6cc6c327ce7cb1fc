use rustfft::{num_complex::Complex, FftPlanner};
use velvet_reverb::{
    dsp::{
        attenuation::{loop_gain_for_rt60, AttenuationFilter},
        early::EarlyReflections,
        velvet::VelvetSequence,
    },
    graph::{GraphNode, RenderCtx},
    patch::ReverbPatch,
};

#[test]
fn reference_scenario_geometry() {
    let seq = VelvetSequence::generate(48_000.0, 30.0, 2000.0, 1);

    assert_eq!(seq.sequence_length(), 1440);
    assert_eq!(seq.grid_size(), 24);
    assert!(seq.len() <= 60);
    assert!(seq.pulses().iter().all(|p| p.position < 1440));

    let expected_decay = -3.0 * std::f64::consts::LN_10 / 1440.0;
    assert!((seq.decay_rate() - expected_decay).abs() < 1e-12);
}

#[test]
fn stage_output_is_deterministic_across_instances() {
    let input: Vec<f32> = (0..4096).map(|i| ((i * 31) % 97) as f32 / 97.0 - 0.5).collect();

    let render = || {
        let mut er = EarlyReflections::new();
        er.prepare(44_100.0, 256, 1234);
        let mut out = vec![0.0; input.len()];
        for (inp, o) in input.chunks(256).zip(out.chunks_mut(256)) {
            er.process(inp, o, 1.0);
        }
        out
    };

    assert_eq!(render(), render());
}

#[test]
fn white_noise_keeps_its_level() {
    // Energy-normalized sequence: uncorrelated input keeps roughly its RMS
    let mut rng = velvet_reverb::dsp::velvet::Lcg::new(99);
    let input: Vec<f32> = (0..48_000)
        .map(|_| (rng.next_word() >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0)
        .collect();

    let mut er = EarlyReflections::new();
    er.prepare(48_000.0, 512, 1);
    let mut output = vec![0.0; input.len()];
    for (inp, out) in input.chunks(512).zip(output.chunks_mut(512)) {
        er.process(inp, out, 1.0);
    }

    let rms = |x: &[f32]| (x.iter().map(|s| s * s).sum::<f32>() / x.len() as f32).sqrt();
    let ratio = rms(&output[2048..]) / rms(&input[2048..]);
    assert!((ratio - 1.0).abs() < 0.1, "rms ratio {}", ratio);
}

#[test]
fn impulse_response_spectrum_is_broadband() {
    // Velvet noise should not comb: no deep notches across the band
    let seq = VelvetSequence::generate(48_000.0, 30.0, 2000.0, 1);
    let n = 2048;
    let mut buffer: Vec<Complex<f32>> = seq
        .impulse_response()
        .iter()
        .map(|&x| Complex::new(x, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(n)
        .collect();

    FftPlanner::new().plan_fft_forward(n).process(&mut buffer);

    // Average power in 1/8-band slices should stay within a modest spread
    let half = &buffer[1..n / 2];
    let slice = half.len() / 8;
    let bands: Vec<f32> = half
        .chunks(slice)
        .take(8)
        .map(|c| c.iter().map(|z| z.norm_sqr()).sum::<f32>() / c.len() as f32)
        .collect();
    let max = bands.iter().cloned().fold(f32::MIN, f32::max);
    let min = bands.iter().cloned().fold(f32::MAX, f32::min);
    assert!(max / min < 4.0, "band powers {:?}", bands);
}

#[test]
fn single_line_loop_decays_per_band() {
    // One delay line with the shelf in its feedback path
    let sample_rate = 48_000.0;
    let delay = 1_500usize;
    let mut filter = AttenuationFilter::new();
    filter.set_decay(delay, 2.0, 0.5, 2_000.0, sample_rate);

    let run = |filter: &mut AttenuationFilter, excite: &dyn Fn(usize) -> f32| {
        filter.reset();
        let mut line = vec![0.0f32; delay];
        let mut pos = 0;
        let mut energy_late = 0.0;
        let total = delay * 20;
        for n in 0..total {
            let x = excite(n);
            let fed_back = filter.process(line[pos]);
            line[pos] = x + fed_back;
            pos = (pos + 1) % delay;
            if n >= total - delay {
                energy_late += fed_back * fed_back;
            }
        }
        energy_late
    };

    let low = run(&mut filter, &|n| if n < delay { 1.0 } else { 0.0 });
    let high = run(&mut filter, &|n| {
        if n < delay {
            if n % 2 == 0 { 1.0 } else { -1.0 }
        } else {
            0.0
        }
    });
    assert!(low > high * 10.0, "low {} high {}", low, high);

    // After 19 passes the DC content has lost 19 times the low loop gain
    let g = loop_gain_for_rt60(delay, 2.0, sample_rate);
    let expected = (delay as f32) * g.powi(38);
    assert!((low / expected - 1.0).abs() < 0.05, "low {} expected {}", low, expected);
}

#[test]
fn default_patch_builds_a_working_chain() {
    let mut chain = ReverbPatch::default().build(48_000.0, 512).unwrap();
    let ctx = RenderCtx::new(48_000.0);

    let mut block = vec![0.0f32; 512];
    block[0] = 1.0;
    let mut tail_energy = 0.0;
    for _ in 0..4 {
        chain.render_block(&mut block, &ctx);
        assert!(block.iter().all(|s| s.is_finite()));
        tail_energy += block.iter().map(|s| s * s).sum::<f32>();
        block.fill(0.0);
    }
    assert!(tail_energy > 0.01);
}
