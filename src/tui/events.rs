use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;

use crate::tui::app::{App, Mode, Tab};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::{ParsedKeyBinding, has_primary_modifier, parse_key_binding};

/// Guard that ensures terminal state is restored even on panic. If the
/// terminal is left in raw mode or the alternate screen, the user's shell
/// is unusable afterwards.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore terminal state on normal exit; the guard then does nothing
    /// on drop.
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Errors are ignored here, this is already a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the error
    // message lands in the normal terminal
    let (width, height) = terminal_size().map_err(TuiError::IoError)?;

    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;

    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();

        let terminal_size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, terminal_size.width, terminal_size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(
                terminal_rect,
                app.config.sidebar_width_percent,
                app.ui.sidebar_state == crate::tui::app::SidebarState::Collapsed,
            );
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(std::time::Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key_event) => {
                    // Only Press events; Release would double-process on Windows
                    if key_event.kind == KeyEventKind::Press {
                        if handle_key_event(&mut app, key_event)? {
                            break; // Quit requested
                        }
                    }
                }
                Event::Resize(_width, _height) => {
                    // Layout recalculates from terminal.size() on next draw
                }
                _ => {}
            }
        }
    }

    guard.restore()?;

    Ok(())
}

fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if app.modals.delete_confirmation.is_some() {
        return handle_delete_confirmation_modal(app, key_event);
    }

    match app.ui.mode {
        Mode::Form => handle_form_mode(app, key_event),
        Mode::Help => handle_help_mode(app, key_event),
        Mode::Search => handle_search_mode(app, key_event),
        Mode::View => handle_view_mode(app, key_event),
    }
}

fn handle_delete_confirmation_modal(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Up | KeyCode::Down => {
            // Two options, so either direction flips between them
            app.modals.delete_modal_selection = 1 - app.modals.delete_modal_selection;
        }
        KeyCode::Enter => {
            if app.modals.delete_modal_selection == 0 {
                app.confirm_delete();
            } else {
                app.cancel_delete();
            }
        }
        KeyCode::Esc => {
            app.cancel_delete();
        }
        _ => {}
    }
    Ok(false)
}

fn handle_form_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    // Save binding first so Ctrl+s is not swallowed by the text input
    if let Ok(binding) = parse_key_binding(&app.config.key_bindings.save) {
        if matches_key_event(key_event, &binding) {
            app.save_form();
            return Ok(false);
        }
    }

    match key_event.code {
        KeyCode::Esc => {
            app.exit_form_mode();
        }
        KeyCode::Tab | KeyCode::Enter => {
            app.navigate_form_field(true);
        }
        KeyCode::BackTab => {
            app.navigate_form_field(false);
        }
        KeyCode::Up => {
            if app.is_picker_field_active() {
                app.move_picker(false);
            } else {
                app.navigate_form_field(false);
            }
        }
        KeyCode::Down => {
            if app.is_picker_field_active() {
                app.move_picker(true);
            } else {
                app.navigate_form_field(true);
            }
        }
        KeyCode::Left => {
            if let Some(input) = app.current_form_input() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = app.current_form_input() {
                input.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(input) = app.current_form_input() {
                input.move_home();
            }
        }
        KeyCode::End => {
            if let Some(input) = app.current_form_input() {
                input.move_end();
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.current_form_input() {
                input.backspace();
            }
        }
        KeyCode::Delete => {
            if let Some(input) = app.current_form_input() {
                input.delete();
            }
        }
        KeyCode::Char(c) => {
            if !has_primary_modifier(key_event.modifiers) {
                if let Some(input) = app.current_form_input() {
                    input.insert_char(c);
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let help_binding = parse_key_binding(&app.config.key_bindings.help);
    let exits = key_event.code == KeyCode::Esc
        || help_binding
            .map(|b| matches_key_event(key_event, &b))
            .unwrap_or(false);
    if exits {
        app.exit_help_mode();
    }
    Ok(false)
}

fn handle_search_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.exit_search_mode();
        }
        KeyCode::Backspace => {
            app.remove_from_search();
        }
        KeyCode::Up => {
            app.move_selection_up();
        }
        KeyCode::Down => {
            app.move_selection_down();
        }
        KeyCode::Char(c) => {
            if !has_primary_modifier(key_event.modifiers) {
                app.add_to_search(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let kb = app.config.key_bindings.clone();
    let tab = app.ui.current_tab;

    if binding_matches(&kb.quit, key_event) {
        return Ok(true);
    }

    if binding_matches(&kb.help, key_event) {
        app.enter_help_mode();
        return Ok(false);
    }

    if binding_matches(&kb.toggle_sidebar, key_event) {
        app.toggle_sidebar();
        return Ok(false);
    }

    // Tab switching
    if binding_matches(&kb.tab_left, key_event) {
        app.switch_tab(tab.prev());
        return Ok(false);
    }
    if binding_matches(&kb.tab_right, key_event) {
        app.switch_tab(tab.next());
        return Ok(false);
    }
    let jumps = [
        (&kb.tab_1, Tab::Dashboard),
        (&kb.tab_2, Tab::Schedules),
        (&kb.tab_3, Tab::Clients),
        (&kb.tab_4, Tab::Services),
        (&kb.tab_5, Tab::Reminders),
    ];
    for (binding, target) in jumps {
        if binding_matches(binding, key_event) {
            app.switch_tab(target);
            return Ok(false);
        }
    }

    // List navigation
    if key_event.code == KeyCode::Up || binding_matches(&kb.list_up, key_event) {
        app.move_selection_up();
        return Ok(false);
    }
    if key_event.code == KeyCode::Down || binding_matches(&kb.list_down, key_event) {
        app.move_selection_down();
        return Ok(false);
    }

    // Row actions; the app methods surface a status message on the
    // dashboard, which has no rows
    if binding_matches(&kb.new, key_event) {
        app.enter_create_mode();
        return Ok(false);
    }
    if binding_matches(&kb.edit, key_event) || binding_matches(&kb.select, key_event) {
        app.enter_edit_mode();
        return Ok(false);
    }
    if binding_matches(&kb.delete, key_event) {
        app.request_delete();
        return Ok(false);
    }

    if tab == Tab::Clients && binding_matches(&kb.search, key_event) {
        app.enter_search_mode();
        return Ok(false);
    }

    if matches!(tab, Tab::Schedules | Tab::Reminders) && binding_matches(&kb.toggle_status, key_event)
    {
        app.toggle_status();
        return Ok(false);
    }

    if tab == Tab::Schedules {
        if binding_matches(&kb.day_prev, key_event) {
            app.day_prev();
            return Ok(false);
        }
        if binding_matches(&kb.day_next, key_event) {
            app.day_next();
            return Ok(false);
        }
        if binding_matches(&kb.today, key_event) {
            app.goto_today();
            return Ok(false);
        }
    }

    Ok(false)
}

fn binding_matches(binding_str: &str, key_event: KeyEvent) -> bool {
    parse_key_binding(binding_str)
        .map(|binding| matches_key_event(key_event, &binding))
        .unwrap_or(false)
}

fn matches_key_event(key_event: KeyEvent, binding: &ParsedKeyBinding) -> bool {
    if key_event.code != binding.key_code {
        return false;
    }
    if binding.requires_ctrl {
        has_primary_modifier(key_event.modifiers)
    } else {
        !has_primary_modifier(key_event.modifiers)
    }
}
