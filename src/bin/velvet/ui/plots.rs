//! Static and status widgets: impulse response, shelf response, status bar

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use velvet_reverb::dsp::attenuation::AttenuationFilter;

use super::UiParams;

/// Points drawn for the shelf magnitude curve
const RESPONSE_POINTS: usize = 96;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the prepared velvet sequence (ms on x)
pub fn render_impulse_response(frame: &mut Frame, area: Rect, points: &[(f64, f64)]) {
    let max_ms = points.last().map(|&(t, _)| t).unwrap_or(1.0).max(1.0);
    let peak = points.iter().fold(0.0f64, |acc, &(_, y)| acc.max(y.abs())).max(1e-3);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Bar)
        .style(Style::default().fg(Color::Magenta))
        .data(points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(" Impulse Response ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("ms")
                .bounds([0.0, max_ms])
                .labels(vec!["0".to_string(), format!("{:.0}", max_ms)])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-peak, peak])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

/// Render the shelf magnitude response in dB, linear frequency axis
pub fn render_shelf_response(
    frame: &mut Frame,
    area: Rect,
    filter: &AttenuationFilter,
    sample_rate: f32,
) {
    let nyquist = sample_rate / 2.0;
    let data: Vec<(f64, f64)> = (0..RESPONSE_POINTS)
        .map(|i| {
            let freq = nyquist * i as f32 / (RESPONSE_POINTS - 1) as f32;
            let mag = filter.magnitude_at(freq, sample_rate).max(1e-6);
            (freq as f64, 20.0 * (mag as f64).log10())
        })
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Shelf ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Hz")
                .bounds([0.0, nyquist as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .title("dB")
                .bounds([-24.0, 0.5])
                .labels(vec!["-24", "-12", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

/// Render the parameter and level readout
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    params: &UiParams,
    stats: &AudioStats,
    sample_rate: f32,
) {
    let block = Block::default().title(" velvet ").borders(Borders::ALL);

    let line = Line::from(vec![
        Span::styled(
            format!(" {:.1}kHz  seed {}  ", sample_rate / 1000.0, params.seed),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("gain {:.2}  mix {:.2}  ", params.gain, params.mix),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!(
                "low {:.2}  high {:.2}  xover {:.0}Hz  ",
                params.gain_low, params.gain_high, params.crossover_hz
            ),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("peak {:.3}  rms {:.3}", stats.peak, stats.rms),
            Style::default().fg(Color::Green),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
