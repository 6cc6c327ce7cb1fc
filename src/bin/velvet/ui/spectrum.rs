//! Spectrum analyzer widget
//!
//! FFT of the live output with log-spaced display bins.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Number of frequency bins to display
const SPECTRUM_BINS: usize = 48;

pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// Display frequency (Hz) and FFT bin index per point
    bins: Vec<(f64, usize)>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (frequency_hz, magnitude_db)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        let window: Vec<f32> = (0..buffer_len)
            .map(|i| {
                if buffer_len > 1 {
                    let denom = (buffer_len - 1) as f32;
                    0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        // Log-spaced, 20 Hz to min(Nyquist, 20 kHz)
        let max_freq = (sample_rate / 2.0).min(20_000.0).max(21.0) as f64;
        let min_freq = 20.0f64;
        let ratio = max_freq / min_freq;
        let half = (buffer_len / 2).max(1);

        let bins: Vec<(f64, usize)> = (0..SPECTRUM_BINS)
            .map(|i| {
                let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
                let freq = min_freq * ratio.powf(t);
                let index = (freq * buffer_len as f64 / sample_rate as f64).round() as usize;
                (freq, index.min(half - 1))
            })
            .collect();

        let spectrum = bins.iter().map(|&(f, _)| (f, -120.0)).collect();

        Self {
            window,
            bins,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute from a full analysis window; other lengths are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        for ((freq, db), &(bin_freq, index)) in self.spectrum.iter_mut().zip(&self.bins) {
            let power = self.scratch[index].norm_sqr().max(1e-12);
            *freq = bin_freq;
            *db = 10.0 * (power as f64).log10();
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

/// Render the spectrum analyzer widget
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let max_freq = spectrum.iter().map(|(f, _)| *f).fold(0.0, f64::max).max(1.0);
    let max_db = spectrum.iter().map(|(_, db)| *db).fold(-100.0, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Output Spectrum ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Hz")
                .bounds([0.0, max_freq])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-100.0, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
