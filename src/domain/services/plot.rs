#[cfg(test)]
#[path = "plot_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::Axis;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Chart;
use ratatui::widgets::Dataset;
use ratatui::widgets::GraphType;
use ratatui::Frame;

use super::Sample;

const TICK_STEP: u32 = 10;
const MIN_X_EXTENT: u32 = 60;
const AXIS_MARGIN: f64 = -2.0;
const Y_MAX: f64 = 110.0;
const Y_TICKS: [u32; 5] = [0, 25, 50, 75, 100];

const MAX_X_TICKS: u64 = 20;
const MAX_X_TIME: f64 = 1e9;

/// Tick values from 0 up to the last multiple of ten reached by `last_time`,
/// with one more tick if the last sample falls between two. Long histories
/// widen the step to a multiple of ten so at most `MAX_X_TICKS` steps are
/// drawn.
pub fn x_ticks(last_time: f64) -> Vec<u32> {
    let last_time = last_time.max(0.0).min(MAX_X_TIME);
    let tens = (last_time / TICK_STEP as f64).ceil() as u64;
    let widen = ((tens + MAX_X_TICKS - 1) / MAX_X_TICKS).max(1);
    let step = (TICK_STEP as u64).saturating_mul(widen);
    let steps = (last_time / step as f64).ceil() as u64;

    return (0..=steps)
        .map(|i| return u32::try_from(i.saturating_mul(step)).unwrap_or(u32::MAX))
        .collect();
}

/// Axis layout for the moisture-over-time chart.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotWindow {
    pub x_ticks: Vec<u32>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl PlotWindow {
    pub fn from_samples(samples: &[Sample]) -> PlotWindow {
        let last_time = samples.last().map(|e| return e.time).unwrap_or(0.0);
        let mut ticks = x_ticks(last_time);
        let last_tick = *ticks.last().unwrap_or(&0);

        if last_tick < MIN_X_EXTENT {
            ticks = (0..=MIN_X_EXTENT / TICK_STEP)
                .map(|i| return i * TICK_STEP)
                .collect();
        }
        let x_max = *ticks.last().unwrap_or(&MIN_X_EXTENT) as f64;

        return PlotWindow {
            x_ticks: ticks,
            x_bounds: [AXIS_MARGIN, x_max],
            y_bounds: [AXIS_MARGIN, Y_MAX],
        };
    }

    pub fn points(samples: &[Sample]) -> Vec<(f64, f64)> {
        return samples
            .iter()
            .map(|e| return (e.time, e.percentage))
            .collect();
    }

    /// Two points spanning the x bounds at the threshold height.
    pub fn threshold_line(&self, threshold: u8) -> Vec<(f64, f64)> {
        let y = threshold as f64;
        return vec![(self.x_bounds[0], y), (self.x_bounds[1], y)];
    }

    pub fn x_labels(&self) -> Vec<String> {
        return self.x_ticks.iter().map(|e| return e.to_string()).collect();
    }

    pub fn y_labels(&self) -> Vec<String> {
        return Y_TICKS.iter().map(|e| return format!("{e}%")).collect();
    }

    pub fn render<B: Backend>(
        &self,
        frame: &mut Frame<B>,
        rect: Rect,
        samples: &[Sample],
        threshold: u8,
    ) {
        let points = PlotWindow::points(samples);
        let threshold_line = self.threshold_line(threshold);

        let datasets = vec![
            Dataset::default()
                .name("Threshold")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Gray))
                .data(&threshold_line),
            Dataset::default()
                .name("Data Points")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White))
                .data(&points),
        ];

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Soil moisture"),
            )
            .x_axis(
                Axis::default()
                    .title("Time [Minutes]")
                    .style(Style::default().fg(Color::White))
                    .bounds(self.x_bounds)
                    .labels(self.x_labels().into_iter().map(Span::from).collect()),
            )
            .y_axis(
                Axis::default()
                    .title("Moisture Percentage")
                    .style(Style::default().fg(Color::White))
                    .bounds(self.y_bounds)
                    .labels(self.y_labels().into_iter().map(Span::from).collect()),
            );

        frame.render_widget(chart, rect);
    }
}
