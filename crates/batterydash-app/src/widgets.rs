//! Widgets for the BatteryDash screen.
//!
//! Each widget borrows a piece of dashboard state and draws it:
//! - [`PowerChart`] - rolling line chart of instantaneous power
//! - [`ComponentBreakdown`] - per-component share of consumption
//! - [`HourlyBars`] - energy per 3-hour bucket
//! - [`HealthGauge`] - health indicator driven by `--health-percent`
//! - [`FieldPanel`] - captioned text fields

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart as LineChart, Dataset, Gauge,
        GraphType, LegendPosition, Paragraph,
    },
    Frame,
};

use batterydash_core::chart::{Chart, Legend};
use batterydash_core::fields::{Field, HEALTH_INDICATOR, HEALTH_PERCENT_PROPERTY, MISSING};
use batterydash_core::surface::MemorySurface;

/// Parse a `#RRGGBB` colour; anything else falls back to gray
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return Color::Gray;
    }
    match u32::from_str_radix(digits, 16) {
        Ok(rgb) => Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        Err(_) => Color::Gray,
    }
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
}

// ── PowerChart ──────────────────────────────────────────────────────────────

/// Rolling power line chart
pub struct PowerChart<'a> {
    pub chart: &'a Chart,
}

impl<'a> PowerChart<'a> {
    pub fn new(chart: &'a Chart) -> Self {
        Self { chart }
    }

    /// Points as (x, y) pairs, x being the window position
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.chart
            .dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }

    /// Y axis range; starts at zero when the chart asks for it
    pub fn y_bounds(&self) -> [f64; 2] {
        let values = &self.chart.dataset.values;
        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let min = values.iter().copied().fold(f64::MAX, f64::min);
        if values.is_empty() {
            return [0.0, 1.0];
        }
        let lower = if self.chart.begin_at_zero { 0.0 } else { min };
        let upper = if max > lower { max * 1.2 } else { lower + 1.0 };
        [lower, upper]
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let points = self.points();
        let color = self
            .chart
            .dataset
            .color_at(0)
            .map(hex_color)
            .unwrap_or(Color::Cyan);

        let mut dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&points);
        if let Some(label) = &self.chart.dataset.label {
            dataset = dataset.name(label.clone());
        }

        let labels = &self.chart.labels;
        let x_labels: Vec<Span> = match (labels.first(), labels.last()) {
            (Some(first), Some(last)) => vec![Span::raw(first.clone()), Span::raw(last.clone())],
            _ => Vec::new(),
        };

        let [lower, upper] = self.y_bounds();
        let y_axis = Axis::default()
            .title(self.chart.y_axis_title.clone().unwrap_or_default())
            .bounds([lower, upper])
            .labels(vec![
                Span::raw(format!("{:.0}", lower)),
                Span::raw(format!("{:.0}", upper)),
            ]);
        let x_axis = Axis::default()
            .bounds([0.0, points.len().saturating_sub(1).max(1) as f64])
            .labels(x_labels);

        let legend = match self.chart.legend {
            Legend::Hidden => None,
            Legend::Right => Some(LegendPosition::Right),
        };

        let chart = LineChart::new(vec![dataset])
            .block(titled("POWER (kW)"))
            .x_axis(x_axis)
            .y_axis(y_axis)
            .legend_position(legend);
        f.render_widget(chart, area);
    }
}

// ── ComponentBreakdown ──────────────────────────────────────────────────────

/// Consumption split by component, one coloured row per category
pub struct ComponentBreakdown<'a> {
    pub chart: &'a Chart,
}

impl<'a> ComponentBreakdown<'a> {
    pub fn new(chart: &'a Chart) -> Self {
        Self { chart }
    }

    /// (label, value, share of total) per category
    pub fn rows(&self) -> Vec<(&'a str, f64, f64)> {
        let total: f64 = self.chart.dataset.values.iter().sum();
        self.chart
            .points()
            .map(|(label, value)| {
                let share = if total > 0.0 { value / total } else { 0.0 };
                (label, value, share)
            })
            .collect()
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        const BAR_WIDTH: usize = 20;

        let lines: Vec<Line> = self
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, (label, value, share))| {
                let color = self
                    .chart
                    .dataset
                    .color_at(i)
                    .map(hex_color)
                    .unwrap_or(Color::Gray);
                let filled = (share * BAR_WIDTH as f64).round() as usize;
                Line::from(vec![
                    Span::styled("█".repeat(filled.min(BAR_WIDTH)), Style::default().fg(color)),
                    Span::raw(" ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))),
                    Span::styled(format!(" {:<16}", label), Style::default().fg(color)),
                    Span::raw(format!("{:>7.2} ({:>4.1}%)", value, share * 100.0)),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(titled("COMPONENT USAGE"));
        f.render_widget(paragraph, area);
    }
}

// ── HourlyBars ──────────────────────────────────────────────────────────────

/// Energy per 3-hour bucket
pub struct HourlyBars<'a> {
    pub chart: &'a Chart,
}

impl<'a> HourlyBars<'a> {
    pub fn new(chart: &'a Chart) -> Self {
        Self { chart }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let color = self
            .chart
            .dataset
            .color_at(0)
            .map(hex_color)
            .unwrap_or(Color::Blue);

        // BarChart wants integers; scale to tenths so small buckets still show
        let bars: Vec<Bar> = self
            .chart
            .points()
            .map(|(label, value)| {
                Bar::default()
                    .value((value.max(0.0) * 10.0).round() as u64)
                    .text_value(format!("{:.1}", value))
                    .label(Line::from(label.to_string()))
            })
            .collect();

        let title = format!(
            "HOURLY ENERGY ({})",
            self.chart.y_axis_title.as_deref().unwrap_or("kWh")
        );
        let chart = BarChart::default()
            .block(titled(&title))
            .data(BarGroup::default().bars(&bars))
            .bar_width(5)
            .bar_gap(1)
            .bar_style(Style::default().fg(color))
            .value_style(Style::default().fg(Color::Black).bg(color));
        f.render_widget(chart, area);
    }
}

// ── HealthGauge ─────────────────────────────────────────────────────────────

/// Health indicator
pub struct HealthGauge<'a> {
    pub surface: &'a MemorySurface,
}

impl<'a> HealthGauge<'a> {
    pub fn new(surface: &'a MemorySurface) -> Self {
        Self { surface }
    }

    /// Fill ratio from the `--health-percent` property, clamped to [0, 1]
    pub fn ratio(&self) -> f64 {
        self.surface
            .style_property(HEALTH_INDICATOR, HEALTH_PERCENT_PROPERTY)
            .and_then(|v| v.trim_end_matches('%').parse::<f64>().ok())
            .map(|pct| (pct / 100.0).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }

    /// Green above 80%, yellow above 60%, red below
    fn color(&self) -> Color {
        let r = self.ratio();
        if r > 0.8 {
            Color::Green
        } else if r > 0.6 {
            Color::Yellow
        } else {
            Color::Red
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let label = self
            .surface
            .text(Field::Health.element_id())
            .unwrap_or(MISSING)
            .to_string();

        let gauge = Gauge::default()
            .block(titled("BATTERY HEALTH"))
            .gauge_style(Style::default().fg(self.color()))
            .ratio(self.ratio())
            .label(label);
        f.render_widget(gauge, area);
    }
}

// ── FieldPanel ──────────────────────────────────────────────────────────────

/// A titled list of fields read back from the surface
pub struct FieldPanel<'a> {
    pub title: &'a str,
    pub fields: &'a [Field],
    pub surface: &'a MemorySurface,
}

impl<'a> FieldPanel<'a> {
    pub fn new(title: &'a str, fields: &'a [Field], surface: &'a MemorySurface) -> Self {
        Self {
            title,
            fields,
            surface,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .fields
            .iter()
            .map(|field| {
                let value = self.surface.text(field.element_id()).unwrap_or(MISSING);
                Line::from(vec![
                    Span::styled(
                        format!("{:<20}", field.caption()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        value.to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(titled(self.title));
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batterydash_core::surface::Surface;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#4285F4"), Color::Rgb(0x42, 0x85, 0xF4));
        assert_eq!(hex_color("#fff"), Color::Gray);
        assert_eq!(hex_color("#zzzzzz"), Color::Gray);
    }

    #[test]
    fn test_power_chart_bounds_start_at_zero() {
        let chart = Chart::power();
        let widget = PowerChart::new(&chart);
        let [lower, upper] = widget.y_bounds();
        assert_eq!(lower, 0.0);
        assert_eq!(upper, 48.0);
        assert_eq!(widget.points().len(), 6);
    }

    #[test]
    fn test_component_shares() {
        let mut chart = Chart::component();
        chart.replace_values(vec![4.0, 3.0, 1.5, 1.0, 0.5]);
        let rows = ComponentBreakdown::new(&chart).rows();
        assert_eq!(rows[0].0, "Drive Motor");
        assert!((rows[0].2 - 0.4).abs() < 1e-9);
        assert!((rows[4].2 - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_component_all_zero() {
        let mut chart = Chart::component();
        chart.replace_values(vec![0.0; 5]);
        let rows = ComponentBreakdown::new(&chart).rows();
        assert!(rows.iter().all(|(_, _, share)| *share == 0.0));
    }

    #[test]
    fn test_health_gauge_ratio() {
        let mut surface = MemorySurface::new();
        assert_eq!(HealthGauge::new(&surface).ratio(), 0.0);

        surface.set_style_property(HEALTH_INDICATOR, HEALTH_PERCENT_PROPERTY, "91%".to_string());
        assert!((HealthGauge::new(&surface).ratio() - 0.91).abs() < 1e-9);

        surface.set_style_property(HEALTH_INDICATOR, HEALTH_PERCENT_PROPERTY, "130%".to_string());
        assert_eq!(HealthGauge::new(&surface).ratio(), 1.0);
    }

    #[test]
    fn test_power_chart_render() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        let chart = Chart::power();

        terminal
            .draw(|f| PowerChart::new(&chart).render(f, f.area()))
            .expect("failed to draw");
        assert!(buffer_text(&terminal).contains("POWER (kW)"));
    }

    #[test]
    fn test_hourly_render_shows_labels() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        let chart = Chart::hourly();

        terminal
            .draw(|f| HourlyBars::new(&chart).render(f, f.area()))
            .expect("failed to draw");
        let text = buffer_text(&terminal);
        assert!(text.contains("00:00"));
        assert!(text.contains("21:00"));
    }

    #[test]
    fn test_field_panel_render() {
        let backend = TestBackend::new(50, 6);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        let mut surface = MemorySurface::new();
        surface.set_text("soc", "65%".to_string());

        terminal
            .draw(|f| {
                FieldPanel::new("BATTERY", &[Field::StateOfCharge, Field::Load], &surface)
                    .render(f, f.area())
            })
            .expect("failed to draw");
        let text = buffer_text(&terminal);
        assert!(text.contains("State of Charge"));
        assert!(text.contains("65%"));
        assert!(text.contains("--"));
    }
}
