//! Audition - device setup and the audio callback

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{PushError, RingBuffer};

use velvet_reverb::{
    dsp::velvet::Lcg,
    graph::{
        message::{drain_messages, ControlMessage},
        GraphNode, RenderCtx,
    },
    patch::ReverbPatch,
    MAX_BLOCK_SIZE,
};

use super::ui::{UiApp, UiParams, VIS_BUFFER_SIZE};

/// Capacity in analysis windows for the audio→UI ring
const AUDIO_RING_BLOCKS: usize = 16;
/// Length of each noise burst in the click excitation
const BURST_MS: f32 = 4.0;

/// Main application builder
pub struct Audition {
    patch: ReverbPatch,
    click_interval_s: f32,
}

impl Audition {
    pub fn new(patch: ReverbPatch) -> Self {
        Self {
            patch,
            click_interval_s: 1.0,
        }
    }

    /// Seconds between excitation bursts
    pub fn click_interval(mut self, seconds: f32) -> Self {
        self.click_interval_s = seconds.max(0.05);
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        log::info!("output: {} Hz, {} channels", sample_rate, channels);

        let mut chain = self
            .patch
            .build(sample_rate, MAX_BLOCK_SIZE)
            .wrap_err("invalid patch")?;
        let impulse_response = chain
            .source()
            .stage()
            .convolver()
            .sequence()
            .impulse_response();
        let params = UiParams::from_patch(&self.patch);

        // --- Cross-thread rings ---
        let (ctrl_tx, mut ctrl_rx) = RingBuffer::<ControlMessage>::new(64);
        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(VIS_BUFFER_SIZE * AUDIO_RING_BLOCKS);

        let mut clicks = ClickSource::new(sample_rate, self.click_interval_s, self.patch.early.seed);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let ctx = RenderCtx::new(sample_rate);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    drain_messages(&mut chain, &mut ctrl_rx);

                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames_to_render];

                        clicks.render(block);
                        chain.render_block(block, &ctx);

                        // Mono to all channels
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                        }

                        // Drop the remainder if the UI falls behind
                        for &s in block.iter() {
                            if let Err(PushError::Full(_)) = audio_tx.push(s) {
                                break;
                            }
                        }

                        frames_written += frames_to_render;
                    }
                },
                |err| log::error!("stream error: {}", err),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(audio_rx, ctrl_tx, impulse_response, params, sample_rate)
            .run(&mut terminal);
        ratatui::restore();

        result
    }
}

/// Periodic short noise bursts, so the reflections are easy to hear.
struct ClickSource {
    period: usize,
    burst_len: usize,
    counter: usize,
    rng: Lcg,
}

impl ClickSource {
    fn new(sample_rate: f32, interval_s: f32, seed: u32) -> Self {
        Self {
            period: ((interval_s * sample_rate) as usize).max(1),
            burst_len: ((BURST_MS * 0.001 * sample_rate) as usize).max(1),
            counter: 0,
            rng: Lcg::new(seed ^ 0x5eed_c11c),
        }
    }

    fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.counter < self.burst_len {
                let decay = 1.0 - self.counter as f32 / self.burst_len as f32;
                let noise = (self.rng.next_word() >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0;
                noise * decay * 0.5
            } else {
                0.0
            };

            self.counter += 1;
            if self.counter >= self.period {
                self.counter = 0;
            }
        }
    }
}
