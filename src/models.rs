use serde::{Deserialize, Serialize};

/// Status of a scheduled appointment. Serialized lowercase to match the
/// stored wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ScheduleStatus {
    pub const ALL: [ScheduleStatus; 4] = [
        ScheduleStatus::Pending,
        ScheduleStatus::Confirmed,
        ScheduleStatus::Completed,
        ScheduleStatus::Cancelled,
    ];

    /// Next status in the fixed cycle (wraps around).
    pub fn next(self) -> Self {
        match self {
            ScheduleStatus::Pending => ScheduleStatus::Confirmed,
            ScheduleStatus::Confirmed => ScheduleStatus::Completed,
            ScheduleStatus::Completed => ScheduleStatus::Cancelled,
            ScheduleStatus::Cancelled => ScheduleStatus::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "pending",
            ScheduleStatus::Confirmed => "confirmed",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Sent,
}

impl ReminderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReminderStatus::Pending => "pending",
            ReminderStatus::Sent => "sent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "totalAppointments", default)]
    pub total_appointments: u32,
}

impl Client {
    pub fn new(name: String, email: String, phone: String) -> Self {
        Self {
            id: 0,
            name,
            email,
            phone,
            total_appointments: 0,
        }
    }

    /// Case-insensitive substring match on name or email.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.email.to_lowercase().contains(&query)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: u64,
    pub name: String,
    pub category: String,
    /// Duration in minutes.
    pub duration: u32,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

impl Service {
    pub fn new(name: String, category: String, duration: u32, price: f64) -> Self {
        Self {
            id: 0,
            name,
            category,
            duration,
            price,
            description: String::new(),
        }
    }
}

/// Default appointment length in minutes. Not user-editable; every new
/// schedule is created with this duration.
pub const DEFAULT_SCHEDULE_DURATION: u32 = 60;

fn default_schedule_duration() -> u32 {
    DEFAULT_SCHEDULE_DURATION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: u64,
    /// Client name as entered, not a reference into the client collection.
    pub client: String,
    pub service: String,
    /// ISO 8601: YYYY-MM-DD
    pub date: String,
    /// HH:MM
    pub time: String,
    #[serde(default = "default_schedule_duration")]
    pub duration: u32,
    pub status: ScheduleStatus,
}

impl Schedule {
    pub fn new(client: String, service: String, date: String, time: String) -> Self {
        Self {
            id: 0,
            client,
            service,
            date,
            time,
            duration: DEFAULT_SCHEDULE_DURATION,
            status: ScheduleStatus::Pending,
        }
    }

    /// Exact date-string equality, the schedules-by-day filter.
    pub fn is_on(&self, date: &str) -> bool {
        self.date == date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: u64,
    pub client: String,
    pub message: String,
    pub service: String,
    pub status: ReminderStatus,
    /// Stamped with the current date at creation; the form has no date field.
    #[serde(rename = "scheduledDate")]
    pub scheduled_date: String,
    #[serde(rename = "scheduledTime")]
    pub scheduled_time: String,
}

impl Reminder {
    pub fn new(client: String, service: String, scheduled_time: String, message: String) -> Self {
        Self {
            id: 0,
            client,
            message,
            service,
            status: ReminderStatus::Pending,
            scheduled_date: crate::utils::current_date_string(),
            scheduled_time,
        }
    }
}

/// Partial update for a client. `None` fields are left untouched;
/// `total_appointments` is never patched through edits.
#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ClientPatch {
    pub fn apply(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(email) = self.email {
            client.email = email;
        }
        if let Some(phone) = self.phone {
            client.phone = phone;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub duration: Option<u32>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

impl ServicePatch {
    pub fn apply(self, service: &mut Service) {
        if let Some(name) = self.name {
            service.name = name;
        }
        if let Some(category) = self.category {
            service.category = category;
        }
        if let Some(duration) = self.duration {
            service.duration = duration;
        }
        if let Some(price) = self.price {
            service.price = price;
        }
        if let Some(description) = self.description {
            service.description = description;
        }
    }
}

/// Partial update for a schedule. Editing the booking fields leaves status
/// and duration alone; the status-change control patches status only.
#[derive(Debug, Clone, Default)]
pub struct SchedulePatch {
    pub client: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<ScheduleStatus>,
}

impl SchedulePatch {
    pub fn apply(self, schedule: &mut Schedule) {
        if let Some(client) = self.client {
            schedule.client = client;
        }
        if let Some(service) = self.service {
            schedule.service = service;
        }
        if let Some(date) = self.date {
            schedule.date = date;
        }
        if let Some(time) = self.time {
            schedule.time = time;
        }
        if let Some(status) = self.status {
            schedule.status = status;
        }
    }
}

/// Partial update for a reminder. `scheduled_date` is fixed at creation and
/// has no patch field.
#[derive(Debug, Clone, Default)]
pub struct ReminderPatch {
    pub client: Option<String>,
    pub service: Option<String>,
    pub scheduled_time: Option<String>,
    pub message: Option<String>,
    pub status: Option<ReminderStatus>,
}

impl ReminderPatch {
    pub fn apply(self, reminder: &mut Reminder) {
        if let Some(client) = self.client {
            reminder.client = client;
        }
        if let Some(service) = self.service {
            reminder.service = service;
        }
        if let Some(time) = self.scheduled_time {
            reminder.scheduled_time = time;
        }
        if let Some(message) = self.message {
            reminder.message = message;
        }
        if let Some(status) = self.status {
            reminder.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_status_cycle_wraps() {
        assert_eq!(ScheduleStatus::Pending.next(), ScheduleStatus::Confirmed);
        assert_eq!(ScheduleStatus::Confirmed.next(), ScheduleStatus::Completed);
        assert_eq!(ScheduleStatus::Completed.next(), ScheduleStatus::Cancelled);
        assert_eq!(ScheduleStatus::Cancelled.next(), ScheduleStatus::Pending);
    }

    #[test]
    fn statuses_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&ScheduleStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
        assert_eq!(
            serde_json::to_string(&ReminderStatus::Sent).unwrap(),
            "\"sent\""
        );
    }

    #[test]
    fn client_search_is_case_insensitive_on_name_and_email() {
        let client = Client::new(
            "Ana Ruiz".to_string(),
            "ana@x.com".to_string(),
            "5551234".to_string(),
        );
        assert!(client.matches_search("ana"));
        assert!(client.matches_search("RUIZ"));
        assert!(client.matches_search("@x.com"));
        assert!(!client.matches_search("5551234"));
    }

    #[test]
    fn client_patch_merges_only_supplied_fields() {
        let mut client = Client {
            id: 3,
            name: "Ana Ruiz".to_string(),
            email: "ana@x.com".to_string(),
            phone: "5551234".to_string(),
            total_appointments: 7,
        };
        ClientPatch {
            phone: Some("5559999".to_string()),
            ..Default::default()
        }
        .apply(&mut client);

        assert_eq!(client.id, 3);
        assert_eq!(client.name, "Ana Ruiz");
        assert_eq!(client.email, "ana@x.com");
        assert_eq!(client.phone, "5559999");
        assert_eq!(client.total_appointments, 7);
    }

    #[test]
    fn schedule_edit_patch_keeps_status_and_duration() {
        let mut schedule = Schedule::new(
            "Ana Ruiz".to_string(),
            "Corte de pelo".to_string(),
            "2025-03-10".to_string(),
            "14:00".to_string(),
        );
        schedule.status = ScheduleStatus::Confirmed;

        SchedulePatch {
            time: Some("15:30".to_string()),
            ..Default::default()
        }
        .apply(&mut schedule);

        assert_eq!(schedule.time, "15:30");
        assert_eq!(schedule.status, ScheduleStatus::Confirmed);
        assert_eq!(schedule.duration, DEFAULT_SCHEDULE_DURATION);
    }

    #[test]
    fn stored_wire_shape_round_trips() {
        let json = r#"{
            "id": 2,
            "client": "Richar Vasques",
            "message": "See you tomorrow",
            "service": "Corte de pelo",
            "status": "pending",
            "scheduledDate": "2025-03-10",
            "scheduledTime": "09:30"
        }"#;
        let reminder: Reminder = serde_json::from_str(json).unwrap();
        assert_eq!(reminder.scheduled_date, "2025-03-10");

        let back = serde_json::to_string(&reminder).unwrap();
        assert!(back.contains("\"scheduledDate\""));
        assert!(back.contains("\"scheduledTime\""));
    }
}
