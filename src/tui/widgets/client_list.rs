use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{ListItem, ListState};

use crate::Config;
use crate::models::Client;
use crate::tui::widgets::list::{list_text_width, render_list_with_scrollbar, truncate_line};

pub fn render_client_list(
    f: &mut Frame,
    area: Rect,
    clients: &[Client],
    total_count: usize,
    list_state: &mut ListState,
    config: &Config,
) {
    let max_width = list_text_width(area);

    let items: Vec<ListItem> = clients
        .iter()
        .map(|client| {
            let line = format!("{}  <{}>", client.name, client.email);
            ListItem::new(truncate_line(line, max_width))
        })
        .collect();

    let title = format!("Clients ({} of {})", clients.len(), total_count);
    render_list_with_scrollbar(f, area, items, title, list_state, config);
}
