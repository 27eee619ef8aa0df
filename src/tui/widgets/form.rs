use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Config;
use crate::tui::app::{
    ClientField, ClientForm, ReminderField, ReminderForm, ScheduleField, ScheduleForm,
    ServiceField, ServiceForm,
};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::input::Input;

struct FieldStyles {
    active: Style,
    inactive: Style,
}

fn field_styles(config: &Config) -> FieldStyles {
    let active_theme = config.get_active_theme();
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };

    FieldStyles {
        active: Style::default().bg(highlight_bg).fg(highlight_fg),
        inactive: Style::default()
            .fg(parse_color(&active_theme.fg))
            .add_modifier(Modifier::DIM),
    }
}

/// Bordered form body split into one 3-line row per field. Returns the
/// field areas; the form itself draws the outer block and title.
fn form_field_areas(f: &mut Frame, area: Rect, title: &str, field_count: usize, config: &Config) -> Vec<Rect> {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .style(Style::default().fg(fg_color));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let constraints: Vec<Constraint> = (0..field_count).map(|_| Constraint::Length(3)).collect();
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner)
        .to_vec()
}

fn render_text_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    input: &Input,
    active: bool,
    styles: &FieldStyles,
) {
    if area.height == 0 {
        return;
    }
    let style = if active { styles.active } else { styles.inactive };

    let paragraph = Paragraph::new(Line::from(Span::styled(input.as_str().to_string(), style)))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(paragraph, area);

    if active {
        // Place the terminal cursor where the next character lands
        let max_col = area.width.saturating_sub(2) as usize;
        let x = area.x + 1 + input.cursor().min(max_col) as u16;
        let y = area.y + 1;
        f.set_cursor_position((x, y));
    }
}

fn render_picker_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    options: &[String],
    index: usize,
    active: bool,
    styles: &FieldStyles,
) {
    if area.height == 0 {
        return;
    }
    let style = if active { styles.active } else { styles.inactive };

    let text = match options.get(index) {
        Some(value) => {
            if options.len() > 1 {
                format!("◂ {} ▸", value)
            } else {
                value.clone()
            }
        }
        None => "(none available)".to_string(),
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(paragraph, area);
}

pub fn render_client_form(f: &mut Frame, area: Rect, form: &ClientForm, config: &Config) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let styles = field_styles(config);
    let title = if form.editing_id.is_some() {
        "Edit Client"
    } else {
        "New Client"
    };
    let fields = form_field_areas(f, area, title, 3, config);

    render_text_field(
        f,
        fields[0],
        "Full Name",
        &form.name,
        form.current_field == ClientField::Name,
        &styles,
    );
    render_text_field(
        f,
        fields[1],
        "Email",
        &form.email,
        form.current_field == ClientField::Email,
        &styles,
    );
    render_text_field(
        f,
        fields[2],
        "Phone",
        &form.phone,
        form.current_field == ClientField::Phone,
        &styles,
    );
}

pub fn render_service_form(f: &mut Frame, area: Rect, form: &ServiceForm, config: &Config) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let styles = field_styles(config);
    let title = if form.editing_id.is_some() {
        "Edit Service"
    } else {
        "New Service"
    };
    let fields = form_field_areas(f, area, title, 5, config);

    render_text_field(
        f,
        fields[0],
        "Service Name",
        &form.name,
        form.current_field == ServiceField::Name,
        &styles,
    );
    render_text_field(
        f,
        fields[1],
        "Category",
        &form.category,
        form.current_field == ServiceField::Category,
        &styles,
    );
    render_text_field(
        f,
        fields[2],
        "Duration (minutes)",
        &form.duration,
        form.current_field == ServiceField::Duration,
        &styles,
    );
    render_text_field(
        f,
        fields[3],
        "Price ($)",
        &form.price,
        form.current_field == ServiceField::Price,
        &styles,
    );
    render_text_field(
        f,
        fields[4],
        "Description",
        &form.description,
        form.current_field == ServiceField::Description,
        &styles,
    );
}

pub fn render_schedule_form(f: &mut Frame, area: Rect, form: &ScheduleForm, config: &Config) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let styles = field_styles(config);
    let title = if form.editing_id.is_some() {
        "Edit Appointment"
    } else {
        "New Appointment"
    };
    let fields = form_field_areas(f, area, title, 4, config);

    render_picker_field(
        f,
        fields[0],
        "Client",
        &form.client_options,
        form.client_index,
        form.current_field == ScheduleField::Client,
        &styles,
    );
    render_picker_field(
        f,
        fields[1],
        "Service",
        &form.service_options,
        form.service_index,
        form.current_field == ScheduleField::Service,
        &styles,
    );
    render_text_field(
        f,
        fields[2],
        "Date (YYYY-MM-DD)",
        &form.date,
        form.current_field == ScheduleField::Date,
        &styles,
    );
    render_text_field(
        f,
        fields[3],
        "Time (HH:MM)",
        &form.time,
        form.current_field == ScheduleField::Time,
        &styles,
    );
}

pub fn render_reminder_form(f: &mut Frame, area: Rect, form: &ReminderForm, config: &Config) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let styles = field_styles(config);
    let title = if form.editing_id.is_some() {
        "Edit Reminder"
    } else {
        "New Reminder"
    };
    let fields = form_field_areas(f, area, title, 4, config);

    render_text_field(
        f,
        fields[0],
        "Client",
        &form.client,
        form.current_field == ReminderField::Client,
        &styles,
    );
    render_picker_field(
        f,
        fields[1],
        "Service",
        &form.service_options,
        form.service_index,
        form.current_field == ReminderField::Service,
        &styles,
    );
    render_text_field(
        f,
        fields[2],
        "Time (HH:MM)",
        &form.time,
        form.current_field == ReminderField::Time,
        &styles,
    );
    render_text_field(
        f,
        fields[3],
        "Message",
        &form.message,
        form.current_field == ReminderField::Message,
        &styles,
    );
}
