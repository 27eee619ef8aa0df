use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{ListItem, ListState};

use crate::Config;
use crate::models::{Reminder, ReminderStatus};
use crate::tui::widgets::list::{list_text_width, render_list_with_scrollbar, truncate_line};

pub fn render_reminder_list(
    f: &mut Frame,
    area: Rect,
    reminders: &[Reminder],
    total_count: usize,
    list_state: &mut ListState,
    config: &Config,
) {
    let max_width = list_text_width(area);

    let items: Vec<ListItem> = reminders
        .iter()
        .map(|reminder| {
            let indicator = match reminder.status {
                ReminderStatus::Pending => "○",
                ReminderStatus::Sent => "✓",
            };
            let line = format!(
                "{} {}  {} {}",
                indicator, reminder.client, reminder.scheduled_date, reminder.scheduled_time
            );
            ListItem::new(truncate_line(line, max_width))
        })
        .collect();

    let title = format!("Reminders ({} of {})", reminders.len(), total_count);
    render_list_with_scrollbar(f, area, items, title, list_state, config);
}
