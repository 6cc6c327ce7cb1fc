//! TUI module for velvet
//!
//! Shows the prepared impulse response, the shelf response and a live
//! spectrum of the output, and turns key presses into control messages.

mod plots;
mod spectrum;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;

use velvet_reverb::{
    dsp::attenuation::AttenuationFilter,
    graph::{early::EarlyParam, message::ControlMessage, shelf::ShelfParam},
    patch::ReverbPatch,
};

use plots::{render_impulse_response, render_shelf_response, render_status, AudioStats};
use spectrum::{render_spectrum, SpectrumAnalyzer};

/// Audio visualization buffer size
pub const VIS_BUFFER_SIZE: usize = 1024;

const GAIN_STEP: f32 = 0.1;
const MIX_STEP: f32 = 0.05;
const BAND_STEP: f32 = 0.02;
const CROSSOVER_RATIO: f32 = 1.25;

/// Local mirror of the parameters the audio thread is running with
#[derive(Clone, Copy, Debug)]
pub struct UiParams {
    pub gain: f32,
    pub mix: f32,
    pub gain_low: f32,
    pub gain_high: f32,
    pub crossover_hz: f32,
    pub seed: u32,
}

impl UiParams {
    pub fn from_patch(patch: &ReverbPatch) -> Self {
        Self {
            gain: patch.early.gain,
            mix: patch.early.mix,
            gain_low: patch.shelf.gain_low,
            gain_high: patch.shelf.gain_high,
            crossover_hz: patch.shelf.crossover_hz,
            seed: patch.early.seed,
        }
    }
}

/// UI application state
pub struct UiApp {
    audio_rx: Consumer<f32>,
    ctrl_tx: Producer<ControlMessage>,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    /// Prepared impulse response as chart points (ms, amplitude)
    impulse_response: Vec<(f64, f64)>,
    /// Copy of the shelf for drawing its response
    shelf_preview: AttenuationFilter,
    params: UiParams,
    sample_rate: f32,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<f32>,
        ctrl_tx: Producer<ControlMessage>,
        impulse_response: Vec<f32>,
        params: UiParams,
        sample_rate: f32,
    ) -> Self {
        let ms_per_sample = 1000.0 / sample_rate as f64;
        let impulse_response = impulse_response
            .iter()
            .enumerate()
            .map(|(i, &x)| (i as f64 * ms_per_sample, x as f64))
            .collect();

        let mut app = Self {
            audio_rx,
            ctrl_tx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            impulse_response,
            shelf_preview: AttenuationFilter::new(),
            params,
            sample_rate,
            should_quit: false,
        };
        app.update_preview();
        app
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            terminal.draw(|frame| self.render(frame))?;

            // Non-blocking, ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Keep the most recent window of output samples
    fn poll_audio(&mut self) {
        let mut received = 0;
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
            received += 1;
        }

        if received > 0 {
            if self.audio_buffer.len() > VIS_BUFFER_SIZE {
                let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
                self.audio_buffer.drain(0..excess);
            }
            self.spectrum.update(&self.audio_buffer);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let p = &mut self.params;
        let message = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Up => {
                p.gain = (p.gain + GAIN_STEP).min(4.0);
                Some(ControlMessage::Early(EarlyParam::Gain, p.gain))
            }
            KeyCode::Down => {
                p.gain = (p.gain - GAIN_STEP).max(0.0);
                Some(ControlMessage::Early(EarlyParam::Gain, p.gain))
            }
            KeyCode::Right => {
                p.mix = (p.mix + MIX_STEP).min(1.0);
                Some(ControlMessage::Early(EarlyParam::Mix, p.mix))
            }
            KeyCode::Left => {
                p.mix = (p.mix - MIX_STEP).max(0.0);
                Some(ControlMessage::Early(EarlyParam::Mix, p.mix))
            }
            KeyCode::Char('L') => {
                p.gain_low = (p.gain_low + BAND_STEP).min(1.0);
                Some(ControlMessage::Shelf(ShelfParam::GainLow, p.gain_low))
            }
            KeyCode::Char('l') => {
                p.gain_low = (p.gain_low - BAND_STEP).max(0.0);
                Some(ControlMessage::Shelf(ShelfParam::GainLow, p.gain_low))
            }
            KeyCode::Char('H') => {
                p.gain_high = (p.gain_high + BAND_STEP).min(1.0);
                Some(ControlMessage::Shelf(ShelfParam::GainHigh, p.gain_high))
            }
            KeyCode::Char('h') => {
                p.gain_high = (p.gain_high - BAND_STEP).max(0.0);
                Some(ControlMessage::Shelf(ShelfParam::GainHigh, p.gain_high))
            }
            KeyCode::Char(']') => {
                p.crossover_hz = (p.crossover_hz * CROSSOVER_RATIO).min(self.sample_rate * 0.49);
                Some(ControlMessage::Shelf(ShelfParam::Crossover, p.crossover_hz))
            }
            KeyCode::Char('[') => {
                p.crossover_hz = (p.crossover_hz / CROSSOVER_RATIO).max(20.0);
                Some(ControlMessage::Shelf(ShelfParam::Crossover, p.crossover_hz))
            }
            KeyCode::Char('r') | KeyCode::Char('R') => Some(ControlMessage::Reset),
            _ => None,
        };

        if let Some(message) = message {
            if self.ctrl_tx.push(message).is_err() {
                log::warn!("control queue full, dropped {:?}", message);
            }
            self.update_preview();
        }
    }

    fn update_preview(&mut self) {
        self.shelf_preview.set_coefficients(
            self.params.gain_low,
            self.params.gain_high,
            self.params.crossover_hz,
            self.sample_rate,
        );
    }

    fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45), // IR + shelf
                Constraint::Min(8),         // Spectrum
                Constraint::Length(3),      // Status
                Constraint::Length(1),      // Help
            ])
            .split(frame.area());

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[0]);

        render_impulse_response(frame, top[0], &self.impulse_response);
        render_shelf_response(frame, top[1], &self.shelf_preview, self.sample_rate);
        render_spectrum(frame, rows[1], self.spectrum.data());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(frame, rows[2], &self.params, &stats, self.sample_rate);

        let help = Paragraph::new(
            " [Q] Quit  [↑/↓] Gain  [←/→] Mix  [l/L] Low  [h/H] High  [[/]] Crossover  [R] Reset",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[3]);
    }
}
