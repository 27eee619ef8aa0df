use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{ListItem, ListState};

use crate::Config;
use crate::models::Service;
use crate::tui::widgets::list::{list_text_width, render_list_with_scrollbar, truncate_line};

pub fn render_service_list(
    f: &mut Frame,
    area: Rect,
    services: &[Service],
    total_count: usize,
    list_state: &mut ListState,
    config: &Config,
) {
    let max_width = list_text_width(area);

    let items: Vec<ListItem> = services
        .iter()
        .map(|service| {
            let line = format!(
                "{} [{}]  {}min  ${}",
                service.name, service.category, service.duration, service.price
            );
            ListItem::new(truncate_line(line, max_width))
        })
        .collect();

    let title = format!("Services ({} of {})", services.len(), total_count);
    render_list_with_scrollbar(f, area, items, title, list_state, config);
}
