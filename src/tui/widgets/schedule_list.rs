use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{ListItem, ListState};

use crate::Config;
use crate::models::{Schedule, ScheduleStatus};
use crate::tui::widgets::list::{list_text_width, render_list_with_scrollbar, truncate_line};

pub fn status_indicator(status: ScheduleStatus) -> &'static str {
    match status {
        ScheduleStatus::Pending => "○",
        ScheduleStatus::Confirmed => "●",
        ScheduleStatus::Completed => "✓",
        ScheduleStatus::Cancelled => "✗",
    }
}

pub fn render_schedule_list(
    f: &mut Frame,
    area: Rect,
    schedules: &[Schedule],
    total_count: usize,
    list_state: &mut ListState,
    config: &Config,
) {
    let max_width = list_text_width(area);

    let items: Vec<ListItem> = schedules
        .iter()
        .map(|schedule| {
            let line = format!(
                "{} {}  {} - {}",
                status_indicator(schedule.status),
                schedule.time,
                schedule.client,
                schedule.service
            );
            ListItem::new(truncate_line(line, max_width))
        })
        .collect();

    let title = format!("Appointments ({} of {})", schedules.len(), total_count);
    render_list_with_scrollbar(f, area, items, title, list_state, config);
}
