use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::dashboard::{self, DashboardStats, DayCounts};
use crate::models::{
    Client, ClientPatch, Reminder, ReminderPatch, ReminderStatus, Schedule, SchedulePatch,
    Service, ServicePatch,
};
use crate::storage::Storage;
use crate::store::{ClientStore, ReminderStore, ScheduleStore, ServiceStore, validate_required};
use crate::tui::error::TuiError;
use crate::tui::widgets::input::Input;
use crate::utils;

/// How long a status message stays visible before the key hints return.
const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(4);

/// The five navigable sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Schedules,
    Clients,
    Services,
    Reminders,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Schedules,
        Tab::Clients,
        Tab::Services,
        Tab::Reminders,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Schedules => "Schedules",
            Tab::Clients => "Clients",
            Tab::Services => "Services",
            Tab::Reminders => "Reminders",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// Singular noun for status and modal text.
    pub fn noun(self) -> &'static str {
        match self {
            Tab::Dashboard => "item",
            Tab::Schedules => "appointment",
            Tab::Clients => "client",
            Tab::Services => "service",
            Tab::Reminders => "reminder",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Expanded,
    Collapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Search,
    Form,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientField {
    Name,
    Email,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceField {
    Name,
    Category,
    Duration,
    Price,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleField {
    Client,
    Service,
    Date,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderField {
    Client,
    Service,
    Time,
    Message,
}

#[derive(Debug, Clone)]
pub struct ClientForm {
    pub current_field: ClientField,
    pub name: Input,
    pub email: Input,
    pub phone: Input,
    pub editing_id: Option<u64>,
}

impl ClientForm {
    fn new() -> Self {
        Self {
            current_field: ClientField::Name,
            name: Input::new(),
            email: Input::new(),
            phone: Input::new(),
            editing_id: None,
        }
    }

    fn for_edit(client: &Client) -> Self {
        Self {
            current_field: ClientField::Name,
            name: Input::with_value(&client.name),
            email: Input::with_value(&client.email),
            phone: Input::with_value(&client.phone),
            editing_id: Some(client.id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceForm {
    pub current_field: ServiceField,
    pub name: Input,
    pub category: Input,
    pub duration: Input,
    pub price: Input,
    pub description: Input,
    pub editing_id: Option<u64>,
}

impl ServiceForm {
    fn new() -> Self {
        Self {
            current_field: ServiceField::Name,
            name: Input::new(),
            category: Input::new(),
            duration: Input::new(),
            price: Input::new(),
            description: Input::new(),
            editing_id: None,
        }
    }

    fn for_edit(service: &Service) -> Self {
        Self {
            current_field: ServiceField::Name,
            name: Input::with_value(&service.name),
            category: Input::with_value(&service.category),
            duration: Input::with_value(service.duration.to_string()),
            price: Input::with_value(service.price.to_string()),
            description: Input::with_value(&service.description),
            editing_id: Some(service.id),
        }
    }
}

/// Client and service are pickers over a snapshot of the other collections,
/// taken when the form is opened. An empty snapshot means nothing can be
/// selected and validation fails on save.
#[derive(Debug, Clone)]
pub struct ScheduleForm {
    pub current_field: ScheduleField,
    pub client_options: Vec<String>,
    pub client_index: usize,
    pub service_options: Vec<String>,
    pub service_index: usize,
    pub date: Input,
    pub time: Input,
    pub editing_id: Option<u64>,
}

impl ScheduleForm {
    fn new(client_options: Vec<String>, service_options: Vec<String>, date: String) -> Self {
        Self {
            current_field: ScheduleField::Client,
            client_options,
            client_index: 0,
            service_options,
            service_index: 0,
            date: Input::with_value(date),
            time: Input::new(),
            editing_id: None,
        }
    }

    fn for_edit(
        schedule: &Schedule,
        mut client_options: Vec<String>,
        mut service_options: Vec<String>,
    ) -> Self {
        let client_index = position_or_insert(&mut client_options, &schedule.client);
        let service_index = position_or_insert(&mut service_options, &schedule.service);
        Self {
            current_field: ScheduleField::Client,
            client_options,
            client_index,
            service_options,
            service_index,
            date: Input::with_value(&schedule.date),
            time: Input::with_value(&schedule.time),
            editing_id: Some(schedule.id),
        }
    }

    pub fn selected_client(&self) -> Option<&str> {
        self.client_options.get(self.client_index).map(String::as_str)
    }

    pub fn selected_service(&self) -> Option<&str> {
        self.service_options.get(self.service_index).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct ReminderForm {
    pub current_field: ReminderField,
    pub client: Input,
    pub service_options: Vec<String>,
    pub service_index: usize,
    pub time: Input,
    pub message: Input,
    pub editing_id: Option<u64>,
}

impl ReminderForm {
    fn new(service_options: Vec<String>) -> Self {
        Self {
            current_field: ReminderField::Client,
            client: Input::new(),
            service_options,
            service_index: 0,
            time: Input::new(),
            message: Input::new(),
            editing_id: None,
        }
    }

    fn for_edit(reminder: &Reminder, mut service_options: Vec<String>) -> Self {
        let service_index = position_or_insert(&mut service_options, &reminder.service);
        Self {
            current_field: ReminderField::Client,
            client: Input::with_value(&reminder.client),
            service_options,
            service_index,
            time: Input::with_value(&reminder.scheduled_time),
            message: Input::with_value(&reminder.message),
            editing_id: Some(reminder.id),
        }
    }

    pub fn selected_service(&self) -> Option<&str> {
        self.service_options.get(self.service_index).map(String::as_str)
    }
}

/// Find a name in the options, inserting it at the front when absent so an
/// edit of a record with a dangling reference still shows its stored value.
fn position_or_insert(options: &mut Vec<String>, name: &str) -> usize {
    match options.iter().position(|o| o == name) {
        Some(index) => index,
        None => {
            options.insert(0, name.to_string());
            0
        }
    }
}

#[derive(Debug, Clone)]
pub enum EntityForm {
    Client(ClientForm),
    Service(ServiceForm),
    Schedule(ScheduleForm),
    Reminder(ReminderForm),
}

/// Record queued for deletion while the confirm modal is open.
#[derive(Debug, Clone)]
pub struct DeleteTarget {
    pub tab: Tab,
    pub id: u64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub current_tab: Tab,
    pub sidebar_state: SidebarState,
    pub mode: Mode,
    pub selected_index: usize,
    pub list_state: ListState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_tab: Tab::Dashboard,
            sidebar_state: SidebarState::Expanded,
            mode: Mode::View,
            selected_index: 0,
            list_state: ListState::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
}

#[derive(Debug, Clone, Default)]
pub struct ModalState {
    pub delete_confirmation: Option<DeleteTarget>,
    pub delete_modal_selection: usize,
}

pub struct App {
    pub config: Config,

    // One store per entity; the stores are the only write path to the data
    pub clients: ClientStore,
    pub services: ServiceStore,
    pub schedules: ScheduleStore,
    pub reminders: ReminderStore,

    pub ui: UiState,
    pub status: StatusState,
    pub search: SearchState,
    pub modals: ModalState,
    pub form: Option<EntityForm>,

    /// The day the schedules list is filtered to (YYYY-MM-DD).
    pub schedule_date: String,
}

impl App {
    pub fn new(config: Config, storage: Storage) -> Result<Self, TuiError> {
        let clients = ClientStore::load(storage.clone());
        let services = ServiceStore::load(storage.clone());
        let schedules = ScheduleStore::load(storage.clone());
        let reminders = ReminderStore::load(storage);

        let mut app = Self {
            config,
            clients,
            services,
            schedules,
            reminders,
            ui: UiState::default(),
            status: StatusState::default(),
            search: SearchState::default(),
            modals: ModalState::default(),
            form: None,
            schedule_date: utils::current_date_string(),
        };
        app.sync_list_state();
        Ok(app)
    }

    // --- visible rows -----------------------------------------------------

    /// Schedules for the selected day, in insertion order.
    pub fn visible_schedules(&self) -> Vec<Schedule> {
        self.schedules
            .filtered(|s| s.is_on(&self.schedule_date))
            .into_iter()
            .cloned()
            .collect()
    }

    /// Clients, narrowed by the search query while searching.
    pub fn visible_clients(&self) -> Vec<Client> {
        let searching = self.ui.mode == Mode::Search && !self.search.query.is_empty();
        self.clients
            .filtered(|c| !searching || c.matches_search(&self.search.query))
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn visible_services(&self) -> Vec<Service> {
        self.services.records().to_vec()
    }

    pub fn visible_reminders(&self) -> Vec<Reminder> {
        self.reminders.records().to_vec()
    }

    pub fn visible_count(&self) -> usize {
        match self.ui.current_tab {
            Tab::Dashboard => 0,
            Tab::Schedules => self.visible_schedules().len(),
            Tab::Clients => self.visible_clients().len(),
            Tab::Services => self.services.len(),
            Tab::Reminders => self.reminders.len(),
        }
    }

    pub fn selected_schedule(&self) -> Option<Schedule> {
        self.visible_schedules().into_iter().nth(self.ui.selected_index)
    }

    pub fn selected_client(&self) -> Option<Client> {
        self.visible_clients().into_iter().nth(self.ui.selected_index)
    }

    pub fn selected_service(&self) -> Option<Service> {
        self.visible_services().into_iter().nth(self.ui.selected_index)
    }

    pub fn selected_reminder(&self) -> Option<Reminder> {
        self.visible_reminders().into_iter().nth(self.ui.selected_index)
    }

    // --- dashboard --------------------------------------------------------

    pub fn dashboard_stats(&self) -> DashboardStats {
        dashboard::compute_stats(
            self.schedules.records(),
            self.clients.records(),
            self.services.records(),
            &utils::current_date_string(),
        )
    }

    pub fn todays_appointments(&self) -> Vec<Schedule> {
        dashboard::appointments_on(self.schedules.records(), &utils::current_date_string())
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn day_counts(&self) -> DayCounts {
        dashboard::day_counts(self.schedules.records(), &self.schedule_date)
    }

    // --- selection and navigation -----------------------------------------

    pub fn sync_list_state(&mut self) {
        self.ui.list_state.select(Some(self.ui.selected_index));
    }

    pub fn adjust_selected_index(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            self.ui.selected_index = 0;
        } else if self.ui.selected_index >= count {
            self.ui.selected_index = count - 1;
        }
        self.sync_list_state();
    }

    pub fn move_selection_up(&mut self) {
        if self.ui.selected_index > 0 {
            self.ui.selected_index -= 1;
            self.sync_list_state();
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.ui.selected_index + 1 < self.visible_count() {
            self.ui.selected_index += 1;
            self.sync_list_state();
        }
    }

    pub fn switch_tab(&mut self, new_tab: Tab) {
        if self.ui.current_tab == new_tab {
            return;
        }
        self.ui.current_tab = new_tab;
        self.ui.mode = Mode::View;
        self.ui.selected_index = 0;
        self.search.query.clear();
        self.form = None;
        self.sync_list_state();
    }

    pub fn toggle_sidebar(&mut self) {
        self.ui.sidebar_state = match self.ui.sidebar_state {
            SidebarState::Expanded => SidebarState::Collapsed,
            SidebarState::Collapsed => SidebarState::Expanded,
        };
    }

    // --- status messages --------------------------------------------------

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed() >= STATUS_MESSAGE_TIMEOUT {
                self.clear_status_message();
            }
        }
    }

    // --- search (clients) -------------------------------------------------

    pub fn enter_search_mode(&mut self) {
        self.ui.mode = Mode::Search;
        self.search.query.clear();
        self.ui.selected_index = 0;
        self.sync_list_state();
    }

    pub fn exit_search_mode(&mut self) {
        self.ui.mode = Mode::View;
        self.search.query.clear();
        self.adjust_selected_index();
    }

    pub fn add_to_search(&mut self, ch: char) {
        self.search.query.push(ch);
        self.ui.selected_index = 0;
        self.sync_list_state();
    }

    pub fn remove_from_search(&mut self) {
        self.search.query.pop();
        self.adjust_selected_index();
    }

    // --- schedule day selector --------------------------------------------

    pub fn day_prev(&mut self) {
        self.schedule_date = utils::shift_date(&self.schedule_date, -1);
        self.ui.selected_index = 0;
        self.sync_list_state();
    }

    pub fn day_next(&mut self) {
        self.schedule_date = utils::shift_date(&self.schedule_date, 1);
        self.ui.selected_index = 0;
        self.sync_list_state();
    }

    pub fn goto_today(&mut self) {
        self.schedule_date = utils::current_date_string();
        self.ui.selected_index = 0;
        self.sync_list_state();
    }

    // --- forms ------------------------------------------------------------

    fn client_name_snapshot(&self) -> Vec<String> {
        self.clients.records().iter().map(|c| c.name.clone()).collect()
    }

    fn service_name_snapshot(&self) -> Vec<String> {
        self.services.records().iter().map(|s| s.name.clone()).collect()
    }

    pub fn enter_create_mode(&mut self) {
        let form = match self.ui.current_tab {
            Tab::Dashboard => {
                self.set_status_message("Switch to a section to add items".to_string());
                return;
            }
            Tab::Schedules => EntityForm::Schedule(ScheduleForm::new(
                self.client_name_snapshot(),
                self.service_name_snapshot(),
                self.schedule_date.clone(),
            )),
            Tab::Clients => EntityForm::Client(ClientForm::new()),
            Tab::Services => EntityForm::Service(ServiceForm::new()),
            Tab::Reminders => EntityForm::Reminder(ReminderForm::new(self.service_name_snapshot())),
        };
        self.form = Some(form);
        self.ui.mode = Mode::Form;
    }

    pub fn enter_edit_mode(&mut self) {
        let form = match self.ui.current_tab {
            Tab::Dashboard => None,
            Tab::Schedules => self.selected_schedule().map(|s| {
                EntityForm::Schedule(ScheduleForm::for_edit(
                    &s,
                    self.client_name_snapshot(),
                    self.service_name_snapshot(),
                ))
            }),
            Tab::Clients => self.selected_client().map(|c| EntityForm::Client(ClientForm::for_edit(&c))),
            Tab::Services => self
                .selected_service()
                .map(|s| EntityForm::Service(ServiceForm::for_edit(&s))),
            Tab::Reminders => self
                .selected_reminder()
                .map(|r| EntityForm::Reminder(ReminderForm::for_edit(&r, self.service_name_snapshot()))),
        };

        if let Some(form) = form {
            self.form = Some(form);
            self.ui.mode = Mode::Form;
        } else {
            self.set_status_message("Nothing selected".to_string());
        }
    }

    pub fn exit_form_mode(&mut self) {
        self.form = None;
        self.ui.mode = Mode::View;
    }

    pub fn navigate_form_field(&mut self, forward: bool) {
        let Some(ref mut form) = self.form else { return };
        match form {
            EntityForm::Client(form) => {
                use ClientField::*;
                form.current_field = match (form.current_field, forward) {
                    (Name, true) => Email,
                    (Email, true) => Phone,
                    (Phone, true) => Name,
                    (Name, false) => Phone,
                    (Email, false) => Name,
                    (Phone, false) => Email,
                };
            }
            EntityForm::Service(form) => {
                use ServiceField::*;
                form.current_field = match (form.current_field, forward) {
                    (Name, true) => Category,
                    (Category, true) => Duration,
                    (Duration, true) => Price,
                    (Price, true) => Description,
                    (Description, true) => Name,
                    (Name, false) => Description,
                    (Category, false) => Name,
                    (Duration, false) => Category,
                    (Price, false) => Duration,
                    (Description, false) => Price,
                };
            }
            EntityForm::Schedule(form) => {
                use ScheduleField::*;
                form.current_field = match (form.current_field, forward) {
                    (Client, true) => Service,
                    (Service, true) => Date,
                    (Date, true) => Time,
                    (Time, true) => Client,
                    (Client, false) => Time,
                    (Service, false) => Client,
                    (Date, false) => Service,
                    (Time, false) => Date,
                };
            }
            EntityForm::Reminder(form) => {
                use ReminderField::*;
                form.current_field = match (form.current_field, forward) {
                    (Client, true) => Service,
                    (Service, true) => Time,
                    (Time, true) => Message,
                    (Message, true) => Client,
                    (Client, false) => Message,
                    (Service, false) => Client,
                    (Time, false) => Service,
                    (Message, false) => Time,
                };
            }
        }
    }

    /// The text input backing the active field, if the active field is a
    /// text field (picker fields have no input).
    pub fn current_form_input(&mut self) -> Option<&mut Input> {
        let form = self.form.as_mut()?;
        match form {
            EntityForm::Client(form) => Some(match form.current_field {
                ClientField::Name => &mut form.name,
                ClientField::Email => &mut form.email,
                ClientField::Phone => &mut form.phone,
            }),
            EntityForm::Service(form) => Some(match form.current_field {
                ServiceField::Name => &mut form.name,
                ServiceField::Category => &mut form.category,
                ServiceField::Duration => &mut form.duration,
                ServiceField::Price => &mut form.price,
                ServiceField::Description => &mut form.description,
            }),
            EntityForm::Schedule(form) => match form.current_field {
                ScheduleField::Date => Some(&mut form.date),
                ScheduleField::Time => Some(&mut form.time),
                ScheduleField::Client | ScheduleField::Service => None,
            },
            EntityForm::Reminder(form) => match form.current_field {
                ReminderField::Client => Some(&mut form.client),
                ReminderField::Time => Some(&mut form.time),
                ReminderField::Message => Some(&mut form.message),
                ReminderField::Service => None,
            },
        }
    }

    /// Whether the active form field is an option picker.
    pub fn is_picker_field_active(&self) -> bool {
        match self.form {
            Some(EntityForm::Schedule(ref form)) => matches!(
                form.current_field,
                ScheduleField::Client | ScheduleField::Service
            ),
            Some(EntityForm::Reminder(ref form)) => form.current_field == ReminderField::Service,
            _ => false,
        }
    }

    /// Step the active picker field up or down through its options.
    pub fn move_picker(&mut self, forward: bool) {
        let Some(ref mut form) = self.form else { return };
        match form {
            EntityForm::Schedule(form) => {
                let (index, len) = match form.current_field {
                    ScheduleField::Client => (&mut form.client_index, form.client_options.len()),
                    ScheduleField::Service => (&mut form.service_index, form.service_options.len()),
                    _ => return,
                };
                step_picker(index, len, forward);
            }
            EntityForm::Reminder(form) => {
                if form.current_field == ReminderField::Service {
                    step_picker(&mut form.service_index, form.service_options.len(), forward);
                }
            }
            _ => {}
        }
    }

    // --- saving -----------------------------------------------------------

    pub fn save_form(&mut self) {
        let Some(form) = self.form.clone() else { return };
        match form {
            EntityForm::Client(form) => self.save_client_form(form),
            EntityForm::Service(form) => self.save_service_form(form),
            EntityForm::Schedule(form) => self.save_schedule_form(form),
            EntityForm::Reminder(form) => self.save_reminder_form(form),
        }
    }

    fn save_client_form(&mut self, form: ClientForm) {
        let name = form.name.as_str().trim().to_string();
        let email = form.email.as_str().trim().to_string();
        let phone = form.phone.as_str().trim().to_string();

        if let Err(err) = validate_required(&[("Name", &name), ("Email", &email), ("Phone", &phone)])
        {
            self.set_status_message(format!("Validation error: {}", err));
            return;
        }

        if let Some(id) = form.editing_id {
            let patch = ClientPatch {
                name: Some(name),
                email: Some(email),
                phone: Some(phone),
            };
            match self.clients.update(id, patch) {
                Ok(true) => self.set_status_message("Client updated".to_string()),
                Ok(false) => self.set_status_message("Client not found".to_string()),
                Err(e) => {
                    self.set_status_message(format!("Failed to save client: {}", e));
                    return;
                }
            }
        } else {
            match self.clients.create(Client::new(name, email, phone)) {
                Ok(created) => {
                    self.select_client(created.id);
                    self.set_status_message("Client added".to_string());
                }
                Err(e) => {
                    self.set_status_message(format!("Failed to create client: {}", e));
                    return;
                }
            }
        }
        self.exit_form_mode();
    }

    fn save_service_form(&mut self, form: ServiceForm) {
        let name = form.name.as_str().trim().to_string();
        let category = form.category.as_str().trim().to_string();
        let duration_str = form.duration.as_str().trim().to_string();
        let price_str = form.price.as_str().trim().to_string();
        let description = form.description.as_str().trim().to_string();

        if let Err(err) = validate_required(&[
            ("Name", &name),
            ("Category", &category),
            ("Duration", &duration_str),
            ("Price", &price_str),
        ]) {
            self.set_status_message(format!("Validation error: {}", err));
            return;
        }

        let Ok(duration) = duration_str.parse::<u32>() else {
            self.set_status_message("Duration must be a whole number of minutes".to_string());
            return;
        };
        let Ok(price) = price_str.parse::<f64>() else {
            self.set_status_message("Price must be a number".to_string());
            return;
        };

        if let Some(id) = form.editing_id {
            let patch = ServicePatch {
                name: Some(name),
                category: Some(category),
                duration: Some(duration),
                price: Some(price),
                description: Some(description),
            };
            match self.services.update(id, patch) {
                Ok(true) => self.set_status_message("Service updated".to_string()),
                Ok(false) => self.set_status_message("Service not found".to_string()),
                Err(e) => {
                    self.set_status_message(format!("Failed to save service: {}", e));
                    return;
                }
            }
        } else {
            let mut service = Service::new(name, category, duration, price);
            service.description = description;
            match self.services.create(service) {
                Ok(created) => {
                    if let Some(index) = self.services.records().iter().position(|s| s.id == created.id) {
                        self.ui.selected_index = index;
                        self.sync_list_state();
                    }
                    self.set_status_message("Service added".to_string());
                }
                Err(e) => {
                    self.set_status_message(format!("Failed to create service: {}", e));
                    return;
                }
            }
        }
        self.exit_form_mode();
    }

    fn save_schedule_form(&mut self, form: ScheduleForm) {
        let client = form.selected_client().unwrap_or("").to_string();
        let service = form.selected_service().unwrap_or("").to_string();
        let date = form.date.as_str().trim().to_string();
        let time = form.time.as_str().trim().to_string();

        if let Err(err) = validate_required(&[
            ("Client", &client),
            ("Service", &service),
            ("Date", &date),
            ("Time", &time),
        ]) {
            self.set_status_message(format!("Validation error: {}", err));
            return;
        }
        if utils::parse_date(&date).is_err() {
            self.set_status_message("Date must be YYYY-MM-DD".to_string());
            return;
        }
        if utils::parse_time(&time).is_err() {
            self.set_status_message("Time must be HH:MM".to_string());
            return;
        }

        if let Some(id) = form.editing_id {
            // Booking fields only; status and duration survive the edit
            let patch = SchedulePatch {
                client: Some(client),
                service: Some(service),
                date: Some(date.clone()),
                time: Some(time),
                status: None,
            };
            match self.schedules.update(id, patch) {
                Ok(true) => {
                    self.schedule_date = date;
                    self.select_schedule(id);
                    self.set_status_message("Appointment updated".to_string());
                }
                Ok(false) => self.set_status_message("Appointment not found".to_string()),
                Err(e) => {
                    self.set_status_message(format!("Failed to save appointment: {}", e));
                    return;
                }
            }
        } else {
            match self.schedules.create(Schedule::new(client, service, date.clone(), time)) {
                Ok(created) => {
                    // Jump the day filter to the new appointment
                    self.schedule_date = date;
                    self.select_schedule(created.id);
                    self.set_status_message("Appointment created".to_string());
                }
                Err(e) => {
                    self.set_status_message(format!("Failed to create appointment: {}", e));
                    return;
                }
            }
        }
        self.exit_form_mode();
    }

    fn save_reminder_form(&mut self, form: ReminderForm) {
        let client = form.client.as_str().trim().to_string();
        let service = form.selected_service().unwrap_or("").to_string();
        let time = form.time.as_str().trim().to_string();
        let message = form.message.as_str().trim().to_string();

        if let Err(err) = validate_required(&[
            ("Client", &client),
            ("Service", &service),
            ("Time", &time),
            ("Message", &message),
        ]) {
            self.set_status_message(format!("Validation error: {}", err));
            return;
        }
        if utils::parse_time(&time).is_err() {
            self.set_status_message("Time must be HH:MM".to_string());
            return;
        }

        if let Some(id) = form.editing_id {
            let patch = ReminderPatch {
                client: Some(client),
                service: Some(service),
                scheduled_time: Some(time),
                message: Some(message),
                status: None,
            };
            match self.reminders.update(id, patch) {
                Ok(true) => self.set_status_message("Reminder updated".to_string()),
                Ok(false) => self.set_status_message("Reminder not found".to_string()),
                Err(e) => {
                    self.set_status_message(format!("Failed to save reminder: {}", e));
                    return;
                }
            }
        } else {
            match self
                .reminders
                .create(Reminder::new(client, service, time, message))
            {
                Ok(created) => {
                    if let Some(index) = self.reminders.records().iter().position(|r| r.id == created.id) {
                        self.ui.selected_index = index;
                        self.sync_list_state();
                    }
                    self.set_status_message("Reminder created".to_string());
                }
                Err(e) => {
                    self.set_status_message(format!("Failed to create reminder: {}", e));
                    return;
                }
            }
        }
        self.exit_form_mode();
    }

    fn select_schedule(&mut self, id: u64) {
        if let Some(index) = self.visible_schedules().iter().position(|s| s.id == id) {
            self.ui.selected_index = index;
        } else {
            self.adjust_selected_index();
        }
        self.sync_list_state();
    }

    fn select_client(&mut self, id: u64) {
        if let Some(index) = self.visible_clients().iter().position(|c| c.id == id) {
            self.ui.selected_index = index;
        } else {
            self.adjust_selected_index();
        }
        self.sync_list_state();
    }

    // --- row actions ------------------------------------------------------

    /// Status-change control: cycles an appointment's status, or marks a
    /// reminder as sent.
    pub fn toggle_status(&mut self) {
        match self.ui.current_tab {
            Tab::Schedules => {
                let Some(schedule) = self.selected_schedule() else { return };
                let next = schedule.status.next();
                let patch = SchedulePatch {
                    status: Some(next),
                    ..Default::default()
                };
                match self.schedules.update(schedule.id, patch) {
                    Ok(true) => self
                        .set_status_message(format!("Appointment status changed to {}", next.as_str())),
                    Ok(false) => {}
                    Err(e) => self.set_status_message(format!("Failed to update appointment: {}", e)),
                }
            }
            Tab::Reminders => {
                let Some(reminder) = self.selected_reminder() else { return };
                if reminder.status == ReminderStatus::Sent {
                    self.set_status_message("Reminder already sent".to_string());
                    return;
                }
                let patch = ReminderPatch {
                    status: Some(ReminderStatus::Sent),
                    ..Default::default()
                };
                match self.reminders.update(reminder.id, patch) {
                    Ok(true) => self.set_status_message("Reminder marked as sent".to_string()),
                    Ok(false) => {}
                    Err(e) => self.set_status_message(format!("Failed to update reminder: {}", e)),
                }
            }
            _ => {}
        }
    }

    /// Open the delete confirmation modal for the selected record.
    pub fn request_delete(&mut self) {
        let tab = self.ui.current_tab;
        let target = match tab {
            Tab::Dashboard => None,
            Tab::Schedules => self.selected_schedule().map(|s| DeleteTarget {
                tab,
                id: s.id,
                label: format!("{} - {} {}", s.client, s.date, s.time),
            }),
            Tab::Clients => self.selected_client().map(|c| DeleteTarget {
                tab,
                id: c.id,
                label: c.name,
            }),
            Tab::Services => self.selected_service().map(|s| DeleteTarget {
                tab,
                id: s.id,
                label: s.name,
            }),
            Tab::Reminders => self.selected_reminder().map(|r| DeleteTarget {
                tab,
                id: r.id,
                label: format!("{} - {}", r.client, r.scheduled_time),
            }),
        };

        match target {
            Some(target) => {
                self.modals.delete_confirmation = Some(target);
                self.modals.delete_modal_selection = 0;
            }
            None => self.set_status_message("Nothing selected".to_string()),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.modals.delete_confirmation = None;
        self.modals.delete_modal_selection = 0;
    }

    pub fn confirm_delete(&mut self) {
        let Some(target) = self.modals.delete_confirmation.take() else { return };
        self.modals.delete_modal_selection = 0;

        let result = match target.tab {
            Tab::Dashboard => Ok(false),
            Tab::Schedules => self.schedules.delete(target.id),
            Tab::Clients => self.clients.delete(target.id),
            Tab::Services => self.services.delete(target.id),
            Tab::Reminders => self.reminders.delete(target.id),
        };

        match result {
            Ok(true) => {
                let noun = target.tab.noun();
                let mut label = noun.to_string();
                if let Some(first) = label.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                self.set_status_message(format!("{} deleted", label));
            }
            Ok(false) => {}
            Err(e) => self.set_status_message(format!("Failed to delete {}: {}", target.tab.noun(), e)),
        }
        self.adjust_selected_index();
    }

    pub fn enter_help_mode(&mut self) {
        self.ui.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.ui.mode = Mode::View;
    }
}

fn step_picker(index: &mut usize, len: usize, forward: bool) {
    if len == 0 {
        return;
    }
    if forward {
        *index = (*index + 1) % len;
    } else {
        *index = (*index + len - 1) % len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_app(dir: &TempDir) -> App {
        let storage = Storage::new(dir.path()).unwrap();
        App::new(Config::default(), storage).unwrap()
    }

    fn type_into(input: &mut Input, text: &str) {
        for c in text.chars() {
            input.insert_char(c);
        }
    }

    #[test]
    fn create_client_through_the_form() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.switch_tab(Tab::Clients);
        let len_before = app.clients.len();

        app.enter_create_mode();
        let Some(EntityForm::Client(ref mut form)) = app.form else {
            panic!("expected client form");
        };
        type_into(&mut form.name, "Ana Ruiz");
        type_into(&mut form.email, "ana@x.com");
        type_into(&mut form.phone, "5551234");
        app.save_form();

        assert_eq!(app.clients.len(), len_before + 1);
        assert!(app.form.is_none());
        assert_eq!(app.ui.mode, Mode::View);

        let created = app.clients.records().last().unwrap();
        assert_eq!(created.name, "Ana Ruiz");
        assert_eq!(created.total_appointments, 0);
    }

    #[test]
    fn empty_client_name_is_rejected_without_mutation() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.switch_tab(Tab::Clients);
        let len_before = app.clients.len();

        app.enter_create_mode();
        let Some(EntityForm::Client(ref mut form)) = app.form else {
            panic!("expected client form");
        };
        type_into(&mut form.email, "ana@x.com");
        type_into(&mut form.phone, "5551234");
        app.save_form();

        assert_eq!(app.clients.len(), len_before);
        assert!(app.form.is_some(), "form stays open on validation failure");
        assert_eq!(
            app.status.message.as_deref(),
            Some("Validation error: Name is required")
        );
    }

    #[test]
    fn schedule_form_offers_snapshots_of_the_other_stores() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.switch_tab(Tab::Schedules);

        app.enter_create_mode();
        let Some(EntityForm::Schedule(ref form)) = app.form else {
            panic!("expected schedule form");
        };
        // Seed data: one client, one service
        assert_eq!(form.client_options, vec!["Richar Vasques".to_string()]);
        assert_eq!(form.service_options, vec!["Corte de pelo".to_string()]);
        assert_eq!(form.date.as_str(), app.schedule_date);
    }

    #[test]
    fn saving_a_schedule_jumps_the_day_filter_to_it() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.switch_tab(Tab::Schedules);

        app.enter_create_mode();
        {
            let Some(EntityForm::Schedule(ref mut form)) = app.form else {
                panic!("expected schedule form");
            };
            form.date.clear();
            type_into(&mut form.date, "2030-01-15");
            type_into(&mut form.time, "09:30");
        }
        app.save_form();

        assert_eq!(app.schedule_date, "2030-01-15");
        assert_eq!(app.visible_schedules().len(), 1);
        assert_eq!(app.selected_schedule().unwrap().time, "09:30");
    }

    #[test]
    fn schedule_with_bad_time_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.switch_tab(Tab::Schedules);

        app.enter_create_mode();
        {
            let Some(EntityForm::Schedule(ref mut form)) = app.form else {
                panic!("expected schedule form");
            };
            type_into(&mut form.time, "late morning");
        }
        app.save_form();

        assert!(app.schedules.is_empty());
        assert_eq!(app.status.message.as_deref(), Some("Time must be HH:MM"));
    }

    #[test]
    fn toggle_status_cycles_the_selected_appointment() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.schedules
            .create(Schedule::new(
                "Ana".into(),
                "Corte de pelo".into(),
                app.schedule_date.clone(),
                "10:00".into(),
            ))
            .unwrap();
        app.switch_tab(Tab::Schedules);

        app.toggle_status();
        assert_eq!(
            app.selected_schedule().unwrap().status,
            crate::models::ScheduleStatus::Confirmed
        );
    }

    #[test]
    fn mark_sent_flips_reminder_status_once() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.reminders
            .create(Reminder::new(
                "Ana".into(),
                "Corte de pelo".into(),
                "10:00".into(),
                "See you tomorrow".into(),
            ))
            .unwrap();
        app.switch_tab(Tab::Reminders);

        app.toggle_status();
        assert_eq!(app.selected_reminder().unwrap().status, ReminderStatus::Sent);

        app.toggle_status();
        assert_eq!(app.status.message.as_deref(), Some("Reminder already sent"));
    }

    #[test]
    fn delete_flow_removes_the_confirmed_target() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.switch_tab(Tab::Clients);
        let id = app.clients.records()[0].id;

        app.request_delete();
        assert!(app.modals.delete_confirmation.is_some());
        app.confirm_delete();

        assert!(app.clients.get(id).is_none());
        assert!(app.modals.delete_confirmation.is_none());
    }

    #[test]
    fn search_narrows_visible_clients_while_active() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.clients
            .create(Client::new("Ana Ruiz".into(), "ana@x.com".into(), "5551234".into()))
            .unwrap();
        app.switch_tab(Tab::Clients);

        app.enter_search_mode();
        for c in "ana".chars() {
            app.add_to_search(c);
        }
        assert_eq!(app.visible_clients().len(), 1);
        assert_eq!(app.visible_clients()[0].name, "Ana Ruiz");

        app.exit_search_mode();
        assert_eq!(app.visible_clients().len(), 2);
    }

    #[test]
    fn day_selector_moves_and_resets() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let today = utils::current_date_string();

        app.day_next();
        assert_eq!(app.schedule_date, utils::shift_date(&today, 1));
        app.day_prev();
        app.day_prev();
        assert_eq!(app.schedule_date, utils::shift_date(&today, -1));
        app.goto_today();
        assert_eq!(app.schedule_date, today);
    }
}
