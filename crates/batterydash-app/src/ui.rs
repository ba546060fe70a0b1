//! Screen layout.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use batterydash_core::fields::{Field, MISSING};

use super::app::App;
use super::widgets::{ComponentBreakdown, FieldPanel, HealthGauge, HourlyBars, PowerChart};

const OVERVIEW_FIELDS: &[Field] = &[
    Field::RemainingDistance,
    Field::Temperature,
    Field::StateOfCharge,
];

const ENERGY_FIELDS: &[Field] = &[
    Field::TotalUsed,
    Field::DailyCost,
    Field::CurrentPower,
    Field::PeakPower,
];

const SENSOR_FIELDS: &[Field] = &[
    Field::Inclination,
    Field::Load,
    Field::Jerk,
    Field::CRate,
    Field::Voltage,
    Field::Current,
];

/// Draw the whole dashboard
pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, app, rows[0]);
    draw_readouts(f, app, rows[1]);
    draw_charts(f, app, rows[2]);
    draw_footer(f, rows[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let surface = app.dashboard.surface();
    let updated = surface
        .text(Field::UpdateTime.element_id())
        .unwrap_or(MISSING);

    let mut spans = vec![
        Span::styled(
            " Battery Health Dashboard ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("│ Last updated: {} ", updated)),
        Span::styled(
            format!("│ {} ", app.source),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(err) = app.dashboard.last_error() {
        spans.push(Span::styled(
            format!("│ {} ", err),
            Style::default().fg(Color::Red),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" build {} ", app.build_id)),
    );
    f.render_widget(header, area);
}

fn draw_readouts(f: &mut Frame, app: &App, area: Rect) {
    let surface = app.dashboard.surface();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let health_col = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(cols[0]);

    HealthGauge::new(surface).render(f, health_col[0]);
    FieldPanel::new("OVERVIEW", OVERVIEW_FIELDS, surface).render(f, health_col[1]);
    FieldPanel::new("ENERGY", ENERGY_FIELDS, surface).render(f, cols[1]);
    FieldPanel::new("SENSORS", SENSOR_FIELDS, surface).render(f, cols[2]);
    ComponentBreakdown::new(app.dashboard.component_chart()).render(f, cols[3]);
}

fn draw_charts(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    PowerChart::new(app.dashboard.power_chart()).render(f, cols[0]);
    HourlyBars::new(app.dashboard.hourly_chart()).render(f, cols[1]);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" q ", Style::default().fg(Color::Black).bg(Color::Gray)),
        Span::raw(" quit"),
    ]));
    f.render_widget(footer, area);
}
