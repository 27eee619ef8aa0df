use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use appt::cli::{Cli, Commands};
use appt::store::{ClientStore, ReminderStore, ScheduleStore, ServiceStore};
use appt::{Config, Profile, Storage};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config = Config::load_with_profile(profile)?;
    let storage = Storage::new(config.get_data_dir())?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            // The TUI owns the terminal, so log to a file in the data dir
            // instead of stderr
            let log_file = std::fs::File::create(storage.root().join("appt.log"))?;
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
                .with_writer(std::sync::Mutex::new(log_file))
                .with_ansi(false)
                .init();

            let app = appt::tui::App::new(config, storage)?;
            appt::tui::run_event_loop(app)?;
        }
        command => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
                .with_writer(std::io::stderr)
                .init();

            match command {
                Commands::Tui => unreachable!(),
                Commands::AddClient { name, email, phone } => {
                    let mut clients = ClientStore::load(storage);
                    appt::cli::handle_add_client(name, email, phone, &mut clients)?;
                }
                Commands::AddService {
                    name,
                    category,
                    duration,
                    price,
                    description,
                } => {
                    let mut services = ServiceStore::load(storage);
                    appt::cli::handle_add_service(
                        name,
                        category,
                        duration,
                        price,
                        description,
                        &mut services,
                    )?;
                }
                Commands::AddAppointment {
                    client,
                    service,
                    date,
                    time,
                } => {
                    let mut schedules = ScheduleStore::load(storage);
                    appt::cli::handle_add_appointment(client, service, date, time, &mut schedules)?;
                }
                Commands::AddReminder {
                    client,
                    service,
                    time,
                    message,
                } => {
                    let mut reminders = ReminderStore::load(storage);
                    appt::cli::handle_add_reminder(client, service, time, message, &mut reminders)?;
                }
            }
        }
    }

    Ok(())
}
