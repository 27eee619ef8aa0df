use crate::models::{Client, Schedule, ScheduleStatus, Service};

/// Summary tiles for the dashboard, computed from the live collections.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub appointments_today: usize,
    pub active_clients: usize,
    /// Sum of today's non-cancelled appointment durations, in hours.
    pub hours_scheduled: f64,
    /// Sum of the matched service price over today's non-cancelled
    /// appointments. Services are matched by name; unmatched names
    /// contribute nothing.
    pub projected_revenue: f64,
}

pub fn compute_stats(
    schedules: &[Schedule],
    clients: &[Client],
    services: &[Service],
    today: &str,
) -> DashboardStats {
    let todays: Vec<&Schedule> = schedules.iter().filter(|s| s.is_on(today)).collect();
    let active: Vec<&&Schedule> = todays
        .iter()
        .filter(|s| s.status != ScheduleStatus::Cancelled)
        .collect();

    let minutes: u32 = active.iter().map(|s| s.duration).sum();
    let revenue: f64 = active
        .iter()
        .filter_map(|s| services.iter().find(|svc| svc.name == s.service))
        .map(|svc| svc.price)
        .sum();

    DashboardStats {
        appointments_today: todays.len(),
        active_clients: clients.len(),
        hours_scheduled: f64::from(minutes) / 60.0,
        projected_revenue: revenue,
    }
}

/// Today's appointment list: schedules on the given date, ordered by time.
pub fn appointments_on<'a>(schedules: &'a [Schedule], date: &str) -> Vec<&'a Schedule> {
    let mut todays: Vec<&Schedule> = schedules.iter().filter(|s| s.is_on(date)).collect();
    todays.sort_by(|a, b| a.time.cmp(&b.time));
    todays
}

/// Per-day counts shown next to the schedules list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCounts {
    pub total: usize,
    pub confirmed: usize,
    pub pending: usize,
    pub completed: usize,
}

pub fn day_counts(schedules: &[Schedule], date: &str) -> DayCounts {
    let todays: Vec<&Schedule> = schedules.iter().filter(|s| s.is_on(date)).collect();
    DayCounts {
        total: todays.len(),
        confirmed: todays
            .iter()
            .filter(|s| s.status == ScheduleStatus::Confirmed)
            .count(),
        pending: todays
            .iter()
            .filter(|s| s.status == ScheduleStatus::Pending)
            .count(),
        completed: todays
            .iter()
            .filter(|s| s.status == ScheduleStatus::Completed)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(date: &str, time: &str, service: &str, status: ScheduleStatus) -> Schedule {
        let mut s = Schedule::new("Ana Ruiz".into(), service.into(), date.into(), time.into());
        s.status = status;
        s
    }

    fn fixtures() -> (Vec<Schedule>, Vec<Client>, Vec<Service>) {
        let schedules = vec![
            schedule("2025-03-10", "14:00", "Corte de pelo", ScheduleStatus::Pending),
            schedule("2025-03-10", "09:00", "Corte de pelo", ScheduleStatus::Confirmed),
            schedule("2025-03-10", "11:00", "Tinte", ScheduleStatus::Cancelled),
            schedule("2025-03-11", "10:00", "Corte de pelo", ScheduleStatus::Pending),
        ];
        let clients = vec![
            Client::new("Ana Ruiz".into(), "ana@x.com".into(), "5551234".into()),
            Client::new("Richar Vasques".into(), "richar@hotmail.com".into(), "3106667777".into()),
        ];
        let services = vec![Service::new("Corte de pelo".into(), "Corte".into(), 40, 22000.0)];
        (schedules, clients, services)
    }

    #[test]
    fn stats_only_count_the_given_day() {
        let (schedules, clients, services) = fixtures();
        let stats = compute_stats(&schedules, &clients, &services, "2025-03-10");

        assert_eq!(stats.appointments_today, 3);
        assert_eq!(stats.active_clients, 2);
    }

    #[test]
    fn cancelled_appointments_add_no_hours_or_revenue() {
        let (schedules, clients, services) = fixtures();
        let stats = compute_stats(&schedules, &clients, &services, "2025-03-10");

        // Two active 60-minute appointments; the cancelled one is excluded.
        assert!((stats.hours_scheduled - 2.0).abs() < f64::EPSILON);
        assert!((stats.projected_revenue - 44000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unmatched_service_names_contribute_no_revenue() {
        let (mut schedules, clients, services) = fixtures();
        schedules[2].status = ScheduleStatus::Pending; // "Tinte" has no service record

        let stats = compute_stats(&schedules, &clients, &services, "2025-03-10");
        assert!((stats.projected_revenue - 44000.0).abs() < f64::EPSILON);
        assert!((stats.hours_scheduled - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn appointments_on_filters_and_sorts_by_time() {
        let (schedules, _, _) = fixtures();
        let todays = appointments_on(&schedules, "2025-03-10");

        let times: Vec<&str> = todays.iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["09:00", "11:00", "14:00"]);
    }

    #[test]
    fn day_counts_split_by_status() {
        let (schedules, _, _) = fixtures();
        let counts = day_counts(&schedules, "2025-03-10");

        assert_eq!(counts.total, 3);
        assert_eq!(counts.confirmed, 1);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.completed, 0);
    }

    #[test]
    fn empty_collections_produce_zeroes() {
        let stats = compute_stats(&[], &[], &[], "2025-03-10");
        assert_eq!(stats.appointments_today, 0);
        assert_eq!(stats.active_clients, 0);
        assert_eq!(stats.hours_scheduled, 0.0);
        assert_eq!(stats.projected_revenue, 0.0);
    }
}
