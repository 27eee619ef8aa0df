use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Config;
use crate::dashboard::DashboardStats;
use crate::models::Schedule;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::list::truncate_line;
use crate::tui::widgets::schedule_list::status_indicator;

/// Read-only dashboard: one row of stat tiles over today's appointment
/// list. Everything shown here is derived from the stores.
pub fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    stats: &DashboardStats,
    todays: &[Schedule],
    config: &Config,
) {
    if area.width < 2 || area.height < 5 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    render_stat_tiles(f, rows[0], stats, config);
    render_todays_list(f, rows[1], todays, config);
}

fn render_stat_tiles(f: &mut Frame, area: Rect, stats: &DashboardStats, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);

    let tiles = [
        ("Appointments Today", stats.appointments_today.to_string()),
        ("Active Clients", stats.active_clients.to_string()),
        ("Hours Scheduled", format!("{:.1}", stats.hours_scheduled)),
        ("Revenue (booked)", format!("${:.0}", stats.projected_revenue)),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    for (i, (title, value)) in tiles.iter().enumerate() {
        let value_line = Line::from(Span::styled(
            value.clone(),
            Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
        ));
        let tile = Paragraph::new(vec![value_line])
            .block(Block::default().borders(Borders::ALL).title(*title))
            .style(Style::default().fg(fg_color))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(tile, columns[i]);
    }
}

fn render_todays_list(f: &mut Frame, area: Rect, todays: &[Schedule], config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let max_width = area.width.saturating_sub(4) as usize;

    let lines: Vec<Line> = if todays.is_empty() {
        vec![Line::from("No appointments scheduled for today.")]
    } else {
        todays
            .iter()
            .map(|schedule| {
                let line = format!(
                    "{} {}  {} - {}  [{}]",
                    status_indicator(schedule.status),
                    schedule.time,
                    schedule.client,
                    schedule.service,
                    schedule.status.as_str()
                );
                Line::from(truncate_line(line, max_width))
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Today's Appointments"))
        .style(Style::default().fg(fg_color));

    f.render_widget(paragraph, area);
}
