//! Horizontal log-odds bar charts rendered as SVG.
//!
//! Each bar is one labelled score. Bars whose score exceeds the significance
//! threshold in magnitude are coloured by sign, the rest are drawn in a neutral
//! grey. The x axis covers a fixed range and bars outside it are clipped.
//!
//! # Examples
//!
//! ```
//! use tutorodds_plot::{Bar, LogOddsBarChart, PlotConfig};
//!
//! let chart = LogOddsBarChart::new(vec![
//!     Bar::new("Ask Question to Guide Thinking", 2.4),
//!     Bar::new("Give Away Answer/Explanation", -1.7),
//! ])
//! .config(PlotConfig {
//!     title: "Z-scored log odds ratio".to_owned(),
//!     text_left: "Control".to_owned(),
//!     text_right: "Treatment".to_owned(),
//!     ..PlotConfig::default()
//! });
//!
//! let svg = chart.render().to_string();
//! assert!(svg.contains("Treatment"));
//! ```

use std::{io, path::Path};

use svg::{
    Document,
    node::element::{Group, Line, Rectangle, Text},
};

/// Single bar of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

impl Bar {
    pub fn new<S>(label: S, value: f64) -> Self
    where
        S: Into<String>,
    {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Colour class of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarClass {
    /// Negative score beyond the threshold.
    StrongNegative,
    /// Positive score beyond the threshold.
    StrongPositive,
    NotSignificant,
}

impl BarClass {
    /// Classifies a raw (signed) score.
    ///
    /// The magnitude must strictly exceed `threshold`.
    #[must_use]
    pub fn of(value: f64, threshold: f64) -> Self {
        if value < 0.0 && value.abs() > threshold {
            Self::StrongNegative
        } else if value > 0.0 && value.abs() > threshold {
            Self::StrongPositive
        } else {
            Self::NotSignificant
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub strong_negative: String,
    pub strong_positive: String,
    pub not_significant: String,
}

impl Default for Palette {
    fn default() -> Self {
        // Negative (control-leaning) bars are blue, positive bars red.
        Self {
            strong_negative: "#4682B4".to_owned(),
            strong_positive: "#FF6347".to_owned(),
            not_significant: "#D3D3D3".to_owned(),
        }
    }
}

impl Palette {
    #[must_use]
    pub fn color(&self, class: BarClass) -> &str {
        match class {
            BarClass::StrongNegative => &self.strong_negative,
            BarClass::StrongPositive => &self.strong_positive,
            BarClass::NotSignificant => &self.not_significant,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Axis title below the x axis.
    pub title: String,
    /// Annotation in the top-left corner (the negative side).
    pub text_left: String,
    /// Annotation in the top-right corner (the positive side).
    pub text_right: String,
    pub x_min: f64,
    pub x_max: f64,
    pub significance_threshold: f64,
    pub width: f64,
    pub height: f64,
    /// Horizontal space reserved for bar labels.
    pub label_width: f64,
    pub font_size: f64,
    pub palette: Palette,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: "Log odds ratio".to_owned(),
            text_left: String::new(),
            text_right: String::new(),
            x_min: -5.0,
            x_max: 5.0,
            significance_threshold: 1.0,
            width: 1000.0,
            height: 400.0,
            label_width: 300.0,
            font_size: 14.0,
            palette: Palette::default(),
        }
    }
}

const MARGIN_TOP: f64 = 36.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_BOTTOM: f64 = 56.0;
const BAR_FILL_RATIO: f64 = 0.8;

/// Plot area in SVG user units.
#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

#[derive(Debug, Clone)]
pub struct LogOddsBarChart {
    bars: Vec<Bar>,
    config: PlotConfig,
}

impl LogOddsBarChart {
    /// Bars are drawn top to bottom in the given order.
    #[must_use]
    pub fn new(bars: Vec<Bar>) -> Self {
        Self {
            bars,
            config: PlotConfig::default(),
        }
    }

    #[must_use]
    pub fn config(self, config: PlotConfig) -> Self {
        Self { config, ..self }
    }

    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Colour class of every bar, in drawing order.
    pub fn classes(&self) -> impl Iterator<Item = BarClass> + '_ {
        self.bars
            .iter()
            .map(|bar| BarClass::of(bar.value, self.config.significance_threshold))
    }

    fn frame(&self) -> Frame {
        let config = &self.config;
        Frame {
            left: config.label_width,
            right: (config.width - MARGIN_RIGHT).max(config.label_width + 1.0),
            top: MARGIN_TOP,
            bottom: (config.height - MARGIN_BOTTOM).max(MARGIN_TOP + 1.0),
        }
    }

    /// The x axis range, ordered and with a non-zero span.
    ///
    /// A non-finite bound falls back to the default range.
    fn axis_range(&self) -> (f64, f64) {
        let PlotConfig { x_min, x_max, .. } = self.config;
        if !x_min.is_finite() || !x_max.is_finite() {
            let default = PlotConfig::default();
            return (default.x_min, default.x_max);
        }
        let (lo, hi) = (x_min.min(x_max), x_min.max(x_max));
        if hi > lo { (lo, hi) } else { (lo - 1.0, hi + 1.0) }
    }

    /// Maps a score onto the x axis, clipping it to the axis range.
    fn x_position(&self, frame: Frame, value: f64) -> f64 {
        let (x_min, x_max) = self.axis_range();
        let clipped = value.clamp(x_min, x_max);
        frame.left + (clipped - x_min) / (x_max - x_min) * (frame.right - frame.left)
    }

    #[must_use]
    pub fn render(&self) -> Document {
        let config = &self.config;
        let frame = self.frame();

        let mut document = Document::new()
            .set("viewBox", format!("0 0 {} {}", config.width, config.height))
            .set("width", config.width)
            .set("height", config.height)
            .set("font-family", "sans-serif")
            .set("font-size", config.font_size)
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", "white"),
            );

        document = document.add(self.render_grid(frame));
        document = document.add(self.render_bars(frame));

        let center = f64::midpoint(frame.left, frame.right);
        document = document.add(
            Text::new(config.title.as_str())
                .set("x", center)
                .set("y", config.height - config.font_size * 0.6)
                .set("text-anchor", "middle"),
        );
        document = document
            .add(
                Text::new(config.text_left.as_str())
                    .set("x", frame.left)
                    .set("y", frame.top - config.font_size * 0.6)
                    .set("text-anchor", "start"),
            )
            .add(
                Text::new(config.text_right.as_str())
                    .set("x", frame.right)
                    .set("y", frame.top - config.font_size * 0.6)
                    .set("text-anchor", "end"),
            );
        document
    }

    #[expect(clippy::cast_possible_truncation)]
    fn render_grid(&self, frame: Frame) -> Group {
        let config = &self.config;
        let mut grid = Group::new().set("class", "grid");

        let (x_min, x_max) = self.axis_range();
        let first = x_min.ceil() as i64;
        let last = x_max.floor() as i64;
        for tick in first..=last {
            #[expect(clippy::cast_precision_loss)]
            let x = self.x_position(frame, tick as f64);
            let (stroke, width) = if tick == 0 {
                ("#808080", 1.0)
            } else {
                ("#E5E5E5", 0.8)
            };
            grid = grid
                .add(
                    Line::new()
                        .set("x1", x)
                        .set("y1", frame.top)
                        .set("x2", x)
                        .set("y2", frame.bottom)
                        .set("stroke", stroke)
                        .set("stroke-width", width),
                )
                .add(
                    Text::new(tick.to_string())
                        .set("x", x)
                        .set("y", frame.bottom + config.font_size * 1.2)
                        .set("text-anchor", "middle"),
                );
        }
        grid
    }

    #[expect(clippy::cast_precision_loss)]
    fn render_bars(&self, frame: Frame) -> Group {
        let config = &self.config;
        let mut group = Group::new().set("class", "bars");
        if self.bars.is_empty() {
            return group;
        }

        let band = (frame.bottom - frame.top) / self.bars.len() as f64;
        let zero = self.x_position(frame, 0.0);
        for ((i, bar), class) in self.bars.iter().enumerate().zip(self.classes()) {
            let end = self.x_position(frame, bar.value);
            let center = frame.top + band * (i as f64 + 0.5);
            let height = band * BAR_FILL_RATIO;
            group = group
                .add(
                    Rectangle::new()
                        .set("x", zero.min(end))
                        .set("y", center - height / 2.0)
                        .set("width", (end - zero).abs())
                        .set("height", height)
                        .set("fill", config.palette.color(class))
                        .set("stroke", "black")
                        .set("stroke-width", 0.5),
                )
                .add(
                    Text::new(bar.label.as_str())
                        .set("x", frame.left - 8.0)
                        .set("y", center)
                        .set("text-anchor", "end")
                        .set("dominant-baseline", "middle"),
                );
        }
        group
    }

    pub fn save<P>(&self, path: P) -> io::Result<()>
    where
        P: AsRef<Path>,
    {
        svg::save(path, &self.render())
    }
}
