use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Config;
use crate::models::{Client, Reminder, Schedule, Service};
use crate::tui::widgets::color::parse_color;

fn labeled(label: &str, value: String, fg: ratatui::style::Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().fg(fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(fg)),
    ])
}

fn render_detail(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>, config: &Config) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(Style::default().fg(fg_color))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(paragraph, area);
}

pub fn render_schedule_view(f: &mut Frame, area: Rect, schedule: &Schedule, config: &Config) {
    let fg = parse_color(&config.get_active_theme().fg);
    let lines = vec![
        labeled("Client", schedule.client.clone(), fg),
        labeled("Service", schedule.service.clone(), fg),
        Line::from(""),
        labeled("Date", schedule.date.clone(), fg),
        labeled("Time", schedule.time.clone(), fg),
        labeled("Duration", format!("{} min", schedule.duration), fg),
        Line::from(""),
        labeled("Status", schedule.status.as_str().to_string(), fg),
    ];
    render_detail(f, area, "Appointment", lines, config);
}

pub fn render_client_view(f: &mut Frame, area: Rect, client: &Client, config: &Config) {
    let fg = parse_color(&config.get_active_theme().fg);
    let lines = vec![
        labeled("Name", client.name.clone(), fg),
        Line::from(""),
        labeled("Email", client.email.clone(), fg),
        labeled("Phone", client.phone.clone(), fg),
        Line::from(""),
        labeled("Total appointments", client.total_appointments.to_string(), fg),
    ];
    render_detail(f, area, "Client", lines, config);
}

pub fn render_service_view(f: &mut Frame, area: Rect, service: &Service, config: &Config) {
    let fg = parse_color(&config.get_active_theme().fg);
    let mut lines = vec![
        labeled("Name", service.name.clone(), fg),
        labeled("Category", service.category.clone(), fg),
        Line::from(""),
        labeled("Duration", format!("{} min", service.duration), fg),
        labeled("Price", format!("${}", service.price), fg),
    ];
    if !service.description.is_empty() {
        lines.push(Line::from(""));
        lines.push(labeled("Description", service.description.clone(), fg));
    }
    render_detail(f, area, "Service", lines, config);
}

pub fn render_reminder_view(f: &mut Frame, area: Rect, reminder: &Reminder, config: &Config) {
    let fg = parse_color(&config.get_active_theme().fg);
    let lines = vec![
        labeled("Client", reminder.client.clone(), fg),
        labeled("Service", reminder.service.clone(), fg),
        Line::from(""),
        labeled("Scheduled", format!("{} {}", reminder.scheduled_date, reminder.scheduled_time), fg),
        labeled("Status", reminder.status.as_str().to_string(), fg),
        Line::from(""),
        labeled("Message", reminder.message.clone(), fg),
    ];
    render_detail(f, area, "Reminder", lines, config);
}
