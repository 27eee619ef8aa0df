use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, EntityForm, Mode, SidebarState, Tab};
use crate::tui::layout::Layout;
use crate::tui::widgets::{
    client_list::render_client_list,
    color::parse_color,
    confirm_delete::render_confirm_delete,
    dashboard::render_dashboard,
    filters_box::render_filters_box,
    form::{render_client_form, render_reminder_form, render_schedule_form, render_service_form},
    help::render_help,
    item_view::{
        render_client_view, render_reminder_view, render_schedule_view, render_service_view,
    },
    reminder_list::render_reminder_list,
    schedule_list::render_schedule_list,
    service_list::render_service_list,
    status_bar::render_status_bar,
    tabs::render_tabs,
};
use crate::utils::format_key_binding_for_display;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    // Outer border with the app name centered in the top edge
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("APPT")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    render_tabs(f, layout.tabs_area, app.ui.current_tab, &app.config);

    if app.ui.current_tab == Tab::Dashboard {
        // The dashboard is read-only and takes the whole content area
        let stats = app.dashboard_stats();
        let todays = app.todays_appointments();
        render_dashboard(f, layout.content_area, &stats, &todays, &app.config);
    } else {
        render_sidebar(f, app, layout);
        render_main(f, app, layout);
    }

    // Overlays after normal content
    if app.ui.mode == Mode::Help {
        render_help(f, f.area(), &app.config);
    }

    if let Some(target) = app.modals.delete_confirmation.clone() {
        render_confirm_delete(
            f,
            f.area(),
            &target,
            app.modals.delete_modal_selection,
            &app.config,
        );
    }

    let (filters_title, filters_summary) = filters_box_content(app);
    render_filters_box(f, layout.filters_area, &filters_title, &filters_summary, &app.config);

    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &key_hints,
        &app.config,
    );
}

fn render_sidebar(f: &mut Frame, app: &mut App, layout: &Layout) {
    if app.ui.sidebar_state != SidebarState::Expanded || layout.sidebar_area.width == 0 {
        return;
    }

    match app.ui.current_tab {
        Tab::Dashboard => {}
        Tab::Schedules => {
            let rows = app.visible_schedules();
            let total = app.schedules.len();
            render_schedule_list(
                f,
                layout.sidebar_area,
                &rows,
                total,
                &mut app.ui.list_state,
                &app.config,
            );
        }
        Tab::Clients => {
            let rows = app.visible_clients();
            let total = app.clients.len();
            render_client_list(
                f,
                layout.sidebar_area,
                &rows,
                total,
                &mut app.ui.list_state,
                &app.config,
            );
        }
        Tab::Services => {
            let rows = app.visible_services();
            let total = app.services.len();
            render_service_list(
                f,
                layout.sidebar_area,
                &rows,
                total,
                &mut app.ui.list_state,
                &app.config,
            );
        }
        Tab::Reminders => {
            let rows = app.visible_reminders();
            let total = app.reminders.len();
            render_reminder_list(
                f,
                layout.sidebar_area,
                &rows,
                total,
                &mut app.ui.list_state,
                &app.config,
            );
        }
    }
}

fn render_main(f: &mut Frame, app: &mut App, layout: &Layout) {
    match app.ui.mode {
        Mode::Form => {
            match app.form {
                Some(EntityForm::Client(ref form)) => {
                    render_client_form(f, layout.main_area, form, &app.config);
                }
                Some(EntityForm::Service(ref form)) => {
                    render_service_form(f, layout.main_area, form, &app.config);
                }
                Some(EntityForm::Schedule(ref form)) => {
                    render_schedule_form(f, layout.main_area, form, &app.config);
                }
                Some(EntityForm::Reminder(ref form)) => {
                    render_reminder_form(f, layout.main_area, form, &app.config);
                }
                None => {
                    render_empty_main(f, app, layout, "No form");
                }
            }
        }
        Mode::Search => {
            let active_theme = app.config.get_active_theme();
            let fg_color = parse_color(&active_theme.fg);
            let search_text = format!("Search: {}", app.search.query);
            let paragraph = Paragraph::new(search_text)
                .block(Block::default().borders(Borders::ALL).title("Search clients"))
                .style(Style::default().fg(fg_color));
            f.render_widget(paragraph, layout.main_area);
        }
        Mode::View | Mode::Help => {
            let rendered = match app.ui.current_tab {
                Tab::Dashboard => false,
                Tab::Schedules => match app.selected_schedule() {
                    Some(schedule) => {
                        render_schedule_view(f, layout.main_area, &schedule, &app.config);
                        true
                    }
                    None => false,
                },
                Tab::Clients => match app.selected_client() {
                    Some(client) => {
                        render_client_view(f, layout.main_area, &client, &app.config);
                        true
                    }
                    None => false,
                },
                Tab::Services => match app.selected_service() {
                    Some(service) => {
                        render_service_view(f, layout.main_area, &service, &app.config);
                        true
                    }
                    None => false,
                },
                Tab::Reminders => match app.selected_reminder() {
                    Some(reminder) => {
                        render_reminder_view(f, layout.main_area, &reminder, &app.config);
                        true
                    }
                    None => false,
                },
            };
            if !rendered {
                render_empty_main(f, app, layout, "Select an item to view details");
            }
        }
    }
}

fn render_empty_main(f: &mut Frame, app: &App, layout: &Layout, text: &str) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let paragraph = Paragraph::new(text.to_string())
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .style(Style::default().fg(fg_color));
    f.render_widget(paragraph, layout.main_area);
}

fn filters_box_content(app: &App) -> (String, String) {
    match app.ui.current_tab {
        Tab::Dashboard => (
            "Today".to_string(),
            crate::utils::current_date_string(),
        ),
        Tab::Schedules => {
            let counts = app.day_counts();
            (
                format!(
                    "Day  ({}/{} change, {} today)",
                    format_key_binding_for_display(&app.config.key_bindings.day_prev),
                    format_key_binding_for_display(&app.config.key_bindings.day_next),
                    format_key_binding_for_display(&app.config.key_bindings.today),
                ),
                format!(
                    "{}   Total {} • Confirmed {} • Pending {} • Completed {}",
                    app.schedule_date, counts.total, counts.confirmed, counts.pending, counts.completed
                ),
            )
        }
        Tab::Clients => {
            if app.ui.mode == Mode::Search {
                ("Search".to_string(), format!("Search: {}", app.search.query))
            } else {
                (
                    format!(
                        "Search  ({})",
                        format_key_binding_for_display(&app.config.key_bindings.search)
                    ),
                    format!("{} clients", app.clients.len()),
                )
            }
        }
        Tab::Services => ("Services".to_string(), format!("{} services", app.services.len())),
        Tab::Reminders => {
            let pending = app
                .reminders
                .records()
                .iter()
                .filter(|r| r.status == crate::models::ReminderStatus::Pending)
                .count();
            let sent = app.reminders.len() - pending;
            (
                "Reminders".to_string(),
                format!("Pending {} • Sent {} • Total {}", pending, sent, app.reminders.len()),
            )
        }
    }
}

fn get_key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Help => {
            vec![format!(
                "Esc or {}: Exit help",
                format_key_binding_for_display(&kb.help)
            )]
        }
        Mode::Search => {
            vec!["Esc: Exit search".to_string()]
        }
        Mode::Form => {
            vec![
                "Tab/Enter: Next field".to_string(),
                "Shift+Tab: Previous field".to_string(),
                "↑/↓: Pick option".to_string(),
                format!("{}: Save", format_key_binding_for_display(&kb.save)),
                "Esc: Cancel".to_string(),
            ]
        }
        Mode::View => {
            let mut hints = vec![format!("{}: Quit", format_key_binding_for_display(&kb.quit))];

            if app.ui.current_tab != Tab::Dashboard {
                hints.push(format!("{}: New", format_key_binding_for_display(&kb.new)));
                hints.push(format!("{}: Edit", format_key_binding_for_display(&kb.edit)));
                hints.push(format!("{}: Delete", format_key_binding_for_display(&kb.delete)));
            }

            match app.ui.current_tab {
                Tab::Schedules => {
                    hints.push(format!(
                        "{}: Change status",
                        format_key_binding_for_display(&kb.toggle_status)
                    ));
                    hints.push(format!(
                        "{}/{}: Day",
                        format_key_binding_for_display(&kb.day_prev),
                        format_key_binding_for_display(&kb.day_next)
                    ));
                }
                Tab::Clients => {
                    hints.push(format!("{}: Search", format_key_binding_for_display(&kb.search)));
                }
                Tab::Reminders => {
                    hints.push(format!(
                        "{}: Mark sent",
                        format_key_binding_for_display(&kb.toggle_status)
                    ));
                }
                _ => {}
            }

            hints.push(format!(
                "{}: Sidebar",
                format_key_binding_for_display(&kb.toggle_sidebar)
            ));
            hints.push(format!("{}: Help", format_key_binding_for_display(&kb.help)));

            hints
        }
    }
}
