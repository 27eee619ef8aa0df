use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::models::{Client, Reminder, Schedule, Service};
use crate::storage::StorageError;
use crate::store::{ClientStore, ReminderStore, ScheduleStore, ServiceStore, ValidationError, validate_required};
use crate::utils::{parse_date, parse_time};

#[derive(Parser)]
#[command(name = "appt")]
#[command(about = "Appointment book for a single business - schedules, clients, services, reminders")]
#[command(version)]
pub struct Cli {
    /// Use development mode (separate dev config and data directory)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Quickly add a client
    AddClient {
        /// Client name
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Phone number
        #[arg(long)]
        phone: String,
    },
    /// Quickly add a service
    AddService {
        /// Service name
        name: String,
        /// Service category
        #[arg(long)]
        category: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        /// Price
        #[arg(long)]
        price: f64,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
    /// Quickly add an appointment
    AddAppointment {
        /// Client name
        client: String,
        /// Service name
        #[arg(long)]
        service: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Time (HH:MM)
        #[arg(long)]
        time: String,
    },
    /// Quickly add a reminder (scheduled for today)
    AddReminder {
        /// Client name
        client: String,
        /// Service name
        #[arg(long)]
        service: String,
        /// Time (HH:MM)
        #[arg(long)]
        time: String,
        /// Reminder message
        #[arg(long)]
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
}

/// Handle the add-client command
pub fn handle_add_client(
    name: String,
    email: String,
    phone: String,
    clients: &mut ClientStore,
) -> Result<(), CliError> {
    validate_required(&[("Name", &name), ("Email", &email), ("Phone", &phone)])?;

    let client = clients.create(Client::new(name, email, phone))?;
    println!("Client created successfully (ID: {})", client.id);

    Ok(())
}

/// Handle the add-service command
pub fn handle_add_service(
    name: String,
    category: String,
    duration: u32,
    price: f64,
    description: Option<String>,
    services: &mut ServiceStore,
) -> Result<(), CliError> {
    validate_required(&[("Name", &name), ("Category", &category)])?;

    let mut service = Service::new(name, category, duration, price);
    if let Some(description) = description {
        service.description = description;
    }

    let service = services.create(service)?;
    println!("Service created successfully (ID: {})", service.id);

    Ok(())
}

/// Handle the add-appointment command
pub fn handle_add_appointment(
    client: String,
    service: String,
    date: String,
    time: String,
    schedules: &mut ScheduleStore,
) -> Result<(), CliError> {
    validate_required(&[("Client", &client), ("Service", &service)])?;
    parse_date(&date)
        .map_err(|e| CliError::DateParseError(format!("Invalid date '{}': {}", date, e)))?;
    parse_time(&time)
        .map_err(|e| CliError::TimeParseError(format!("Invalid time '{}': {}", time, e)))?;

    let schedule = schedules.create(Schedule::new(client, service, date, time))?;
    println!("Appointment created successfully (ID: {})", schedule.id);

    Ok(())
}

/// Handle the add-reminder command
pub fn handle_add_reminder(
    client: String,
    service: String,
    time: String,
    message: String,
    reminders: &mut ReminderStore,
) -> Result<(), CliError> {
    validate_required(&[("Client", &client), ("Service", &service), ("Message", &message)])?;
    parse_time(&time)
        .map_err(|e| CliError::TimeParseError(format!("Invalid time '{}': {}", time, e)))?;

    let reminder = reminders.create(Reminder::new(client, service, time, message))?;
    println!("Reminder created successfully (ID: {})", reminder.id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn add_appointment_rejects_bad_date() {
        let dir = TempDir::new().unwrap();
        let mut schedules = ScheduleStore::load(Storage::new(dir.path()).unwrap());

        let result = handle_add_appointment(
            "Ana Ruiz".into(),
            "Corte de pelo".into(),
            "10/03/2025".into(),
            "14:00".into(),
            &mut schedules,
        );

        assert!(matches!(result, Err(CliError::DateParseError(_))));
        assert!(schedules.is_empty());
    }

    #[test]
    fn add_client_rejects_empty_name() {
        let dir = TempDir::new().unwrap();
        let mut clients = ClientStore::load(Storage::new(dir.path()).unwrap());
        let len_before = clients.len();

        let result = handle_add_client("".into(), "ana@x.com".into(), "5551234".into(), &mut clients);

        assert!(matches!(result, Err(CliError::ValidationError(_))));
        assert_eq!(clients.len(), len_before);
    }
}
