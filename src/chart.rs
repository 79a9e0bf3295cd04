//! Grouped bar chart of a [`SessionReport`].
//!
//! [`render`] turns a report into a list of [`DrawCommand`]s; a [`Canvas`] executes them. The
//! command list always starts with [`DrawCommand::Clear`], so drawing a fresh render replaces
//! whatever the canvas showed before.

use serde::Deserialize;
use std::fmt::Write;

use crate::models::SESSION_COUNT;
use crate::report::SessionReport;

/// Bars per session group: total, present, participated.
const SERIES_COUNT: usize = 3;

const GRID_COLOR: &str = "#e0e0e0";
const AXIS_COLOR: &str = "#333333";
const LABEL_COLOR: &str = "#333333";
const LABEL_SIZE: f64 = 11.0;

/// Fixed geometry and colors of the chart surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub group_gap: u32,
    pub bar_gap: u32,
    pub gridlines: u32,
    pub total_color: String,
    pub present_color: String,
    pub participated_color: String,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 720,
            height: 360,
            padding: 40,
            group_gap: 24,
            bar_gap: 4,
            gridlines: 5,
            total_color: "#90a4ae".to_string(),
            present_color: "#43a047".to_string(),
            participated_color: "#1e88e5".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_svg(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipes the whole surface and sets its size.
    Clear { width: f64, height: f64 },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: String,
        stroke: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        anchor: Anchor,
        color: String,
        size: f64,
    },
}

/// A drawing surface.
pub trait Canvas {
    fn draw(&mut self, commands: &[DrawCommand]);
}

/// Computes the drawing commands for `report`.
///
/// All bars share one linear scale, the largest value in any series. An all-zero report is
/// scaled against 1.
pub fn render(report: &SessionReport, layout: &ChartLayout) -> Vec<DrawCommand> {
    let width = f64::from(layout.width);
    let height = f64::from(layout.height);
    let padding = f64::from(layout.padding);

    let left = padding;
    let right = (width - padding).max(left);
    let top = padding;
    let bottom = (height - padding).max(top);
    let plot_width = right - left;
    let plot_height = bottom - top;

    let groups = SESSION_COUNT as f64;
    let series_count = SERIES_COUNT as f64;
    // Gaps are capped at half of the space they divide; bars always fit inside the plot area.
    let group_gap = f64::from(layout.group_gap).min(plot_width / (2.0 * (groups + 1.0)));
    let group_width = (plot_width - group_gap * (groups + 1.0)) / groups;
    let bar_gap = f64::from(layout.bar_gap).min(group_width / (2.0 * (series_count - 1.0)));
    let bar_width = (group_width - bar_gap * (series_count - 1.0)) / series_count;

    let max = match report.max_value() {
        0 => 1,
        max => max,
    };
    let scale = plot_height / max as f64;

    let mut commands = vec![DrawCommand::Clear { width, height }];

    // Gridlines sit behind everything else.
    for i in 1..=layout.gridlines {
        let y = bottom - plot_height * f64::from(i) / f64::from(layout.gridlines);
        commands.push(DrawCommand::Line {
            x1: left,
            y1: y,
            x2: right,
            y2: y,
            color: GRID_COLOR.to_string(),
            stroke: 1.0,
        });
    }

    commands.push(DrawCommand::Line {
        x1: left,
        y1: top,
        x2: left,
        y2: bottom,
        color: AXIS_COLOR.to_string(),
        stroke: 1.5,
    });
    commands.push(DrawCommand::Line {
        x1: left,
        y1: bottom,
        x2: right,
        y2: bottom,
        color: AXIS_COLOR.to_string(),
        stroke: 1.5,
    });

    let series = [
        (&report.total, &layout.total_color),
        (&report.present, &layout.present_color),
        (&report.participated, &layout.participated_color),
    ];

    for session in 0..SESSION_COUNT {
        let group_x = left + group_gap + session as f64 * (group_width + group_gap);

        for (bar, (values, color)) in series.iter().enumerate() {
            let value = values[session];
            let bar_height = value as f64 * scale;
            let x = group_x + bar as f64 * (bar_width + bar_gap);
            let y = bottom - bar_height;

            commands.push(DrawCommand::Rect {
                x,
                y,
                width: bar_width,
                height: bar_height,
                fill: color.to_string(),
            });
            commands.push(label(x + bar_width / 2.0, y - 4.0, value.to_string(), Anchor::Middle));
        }

        commands.push(label(
            group_x + group_width / 2.0,
            bottom + 16.0,
            format!("S{}", session + 1),
            Anchor::Middle,
        ));
    }

    commands.push(label(left - 6.0, top + 4.0, max.to_string(), Anchor::End));

    commands
}

fn label(x: f64, y: f64, text: String, anchor: Anchor) -> DrawCommand {
    DrawCommand::Text {
        x,
        y,
        text,
        anchor,
        color: LABEL_COLOR.to_string(),
        size: LABEL_SIZE,
    }
}

/// A canvas that records what it is asked to draw as SVG markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything has been drawn since the last clear.
    pub fn is_blank(&self) -> bool {
        self.body.is_empty()
    }

    /// The complete SVG document for the current contents of the canvas.
    pub fn to_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }
}

impl Canvas for SvgCanvas {
    fn draw(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            // Writing into a `String` cannot fail.
            let _ = match command {
                DrawCommand::Clear { width, height } => {
                    self.width = *width;
                    self.height = *height;
                    self.body.clear();
                    Ok(())
                }
                DrawCommand::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                    stroke,
                } => writeln!(
                    self.body,
                    "  <line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" stroke=\"{}\" stroke-width=\"{stroke}\"/>",
                    esc(color)
                ),
                DrawCommand::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                } => writeln!(
                    self.body,
                    "  <rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{width:.1}\" height=\"{height:.1}\" fill=\"{}\"/>",
                    esc(fill)
                ),
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    anchor,
                    color,
                    size,
                } => writeln!(
                    self.body,
                    "  <text x=\"{x:.1}\" y=\"{y:.1}\" text-anchor=\"{}\" fill=\"{}\" font-size=\"{size}\">{}</text>",
                    anchor.as_svg(),
                    esc(color),
                    esc(text)
                ),
            };
        }
    }
}

fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(commands: &[DrawCommand]) -> Vec<(f64, f64, f64, f64)> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Rect {
                    x,
                    y,
                    width,
                    height,
                    ..
                } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn sample_report() -> SessionReport {
        SessionReport {
            total: [4; SESSION_COUNT],
            present: [4, 3, 2, 1, 0, 4],
            participated: [1, 1, 0, 2, 0, 3],
        }
    }

    #[test]
    fn empty_report_renders_without_dividing_by_zero() {
        let commands = render(&SessionReport::default(), &ChartLayout::default());
        let bars = bars(&commands);

        assert_eq!(bars.len(), SESSION_COUNT * SERIES_COUNT);
        for (x, y, width, height) in bars {
            assert!(x.is_finite() && y.is_finite() && width.is_finite());
            assert_eq!(height, 0.0);
        }
        // The substituted maximum is what gets labelled.
        assert_eq!(texts(&commands).last(), Some(&"1"));
    }

    #[test]
    fn starts_with_clear() {
        let layout = ChartLayout::default();
        let commands = render(&sample_report(), &layout);
        assert_eq!(
            commands[0],
            DrawCommand::Clear {
                width: 720.0,
                height: 360.0
            }
        );
    }

    #[test]
    fn bars_share_one_scale() {
        let layout = ChartLayout::default();
        let commands = render(&sample_report(), &layout);
        let bars = bars(&commands);
        let plot_height = f64::from(layout.height - 2 * layout.padding);

        // First group: total 4, present 4, participated 1 against a max of 4.
        assert_eq!(bars[0].3, plot_height);
        assert_eq!(bars[1].3, plot_height);
        assert_eq!(bars[2].3, plot_height / 4.0);
        // Second group's present bar (3) is three quarters of the first group's.
        assert_eq!(bars[4].3, plot_height * 0.75);
    }

    #[test]
    fn bars_sit_on_the_baseline_and_do_not_overlap() {
        let layout = ChartLayout::default();
        let commands = render(&sample_report(), &layout);
        let bottom = f64::from(layout.height - layout.padding);

        let bars = bars(&commands);
        for (_, y, _, height) in &bars {
            assert!((y + height - bottom).abs() < 1e-9);
        }
        for pair in bars.windows(2) {
            let (x, _, width, _) = pair[0];
            assert!(x + width < pair[1].0);
        }
        let (last_x, _, last_width, _) = bars[bars.len() - 1];
        assert!(last_x + last_width <= f64::from(layout.width - layout.padding));
    }

    #[test]
    fn narrow_layouts_keep_bars_inside_the_plot() {
        for width in [0, 60, 80, 100, 120, 200] {
            let layout = ChartLayout {
                width,
                ..ChartLayout::default()
            };
            let commands = render(&sample_report(), &layout);
            let bars = bars(&commands);
            let left = f64::from(layout.padding);
            let right = f64::from(width).max(2.0 * left) - left;

            assert_eq!(bars.len(), SESSION_COUNT * SERIES_COUNT);
            for (x, _, bar_width, _) in &bars {
                assert!(*bar_width >= 0.0, "width {width}");
                assert!(*x >= left - 1e-9, "width {width}: bar starts at {x}");
                assert!(x + bar_width <= right + 1e-9, "width {width}: bar ends at {}", x + bar_width);
            }
            for pair in bars.windows(2) {
                assert!(pair[0].0 + pair[0].2 <= pair[1].0 + 1e-9, "width {width}");
            }
        }
    }

    #[test]
    fn labels_sessions_values_and_scale() {
        let layout = ChartLayout {
            gridlines: 4,
            ..ChartLayout::default()
        };
        let commands = render(&sample_report(), &layout);
        let texts = texts(&commands);

        // One value label per bar, one session label per group, one scale label.
        assert_eq!(texts.len(), SESSION_COUNT * SERIES_COUNT + SESSION_COUNT + 1);
        assert!(texts.contains(&"S1"));
        assert!(texts.contains(&"S6"));
        assert_eq!(texts.last(), Some(&"4"));

        let lines = commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 4 + 2);
    }

    #[test]
    fn redrawing_replaces_previous_contents() {
        let layout = ChartLayout::default();
        let commands = render(&sample_report(), &layout);

        let mut canvas = SvgCanvas::new();
        assert!(canvas.is_blank());
        canvas.draw(&commands);
        let first = canvas.to_svg();

        canvas.draw(&render(&SessionReport::default(), &layout));
        canvas.draw(&commands);
        assert_eq!(canvas.to_svg(), first);
        assert_eq!(first.matches("<rect").count(), SESSION_COUNT * SERIES_COUNT);
    }

    #[test]
    fn svg_escapes_attribute_values() {
        let layout = ChartLayout {
            total_color: "\"><script>".to_string(),
            ..ChartLayout::default()
        };
        let mut canvas = SvgCanvas::new();
        canvas.draw(&render(&sample_report(), &layout));
        let svg = canvas.to_svg();
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&quot;&gt;&lt;script&gt;"));
    }
}
