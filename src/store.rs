use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    Client, ClientPatch, Reminder, ReminderPatch, Schedule, SchedulePatch, Service, ServicePatch,
};
use crate::storage::{Storage, StorageError};

/// A record type managed by an [`EntityStore`]: it knows its storage key, its
/// id, how to merge a partial update, and what the collection defaults to
/// when nothing (or nothing readable) is stored.
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Patch;

    const KEY: &'static str;

    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
    fn apply(&mut self, patch: Self::Patch);

    /// Fallback collection when the key is missing or unreadable.
    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

#[derive(Debug, Error)]
#[error("{0} is required")]
pub struct ValidationError(pub &'static str);

/// Reject the operation if any designated required field is empty.
/// The error names the first missing field.
pub fn validate_required(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    for (label, value) in fields {
        if value.trim().is_empty() {
            return Err(ValidationError(label));
        }
    }
    Ok(())
}

/// In-memory collection for one entity, mirrored to its storage key after
/// every mutation. The collection itself is never handed out mutably;
/// create/update/delete are the only write paths.
pub struct EntityStore<T: Record> {
    storage: Storage,
    records: Vec<T>,
}

pub type ClientStore = EntityStore<Client>;
pub type ServiceStore = EntityStore<Service>;
pub type ScheduleStore = EntityStore<Schedule>;
pub type ReminderStore = EntityStore<Reminder>;

impl<T: Record> EntityStore<T> {
    /// Load the collection from storage, falling back to the record's seed
    /// when the key is missing or unreadable.
    pub fn load(storage: Storage) -> Self {
        let records = storage.read(T::KEY).unwrap_or_else(T::seed);
        Self { storage, records }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Filtered view of the collection; pure and synchronous, no pagination.
    pub fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<&T> {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Next id: one greater than the current maximum, starting at 1 for an
    /// empty collection.
    fn next_id(&self) -> u64 {
        self.records.iter().map(T::id).max().unwrap_or(0) + 1
    }

    /// Assign an id, append and persist. Returns the stored record.
    /// Required-field validation happens before this is called.
    pub fn create(&mut self, mut record: T) -> Result<T, StorageError> {
        record.set_id(self.next_id());
        self.records.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Shallow-merge the patch over the record with the given id and persist.
    /// Returns `Ok(false)` (no write) when the id is absent.
    pub fn update(&mut self, id: u64, patch: T::Patch) -> Result<bool, StorageError> {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            return Ok(false);
        };
        record.apply(patch);
        self.persist()?;
        Ok(true)
    }

    /// Remove the record with the given id and persist. Returns `Ok(false)`
    /// (no write) when the id is absent.
    pub fn delete(&mut self, id: u64) -> Result<bool, StorageError> {
        let len_before = self.records.len();
        self.records.retain(|r| r.id() != id);
        if self.records.len() == len_before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.storage.write(T::KEY, &self.records)
    }
}

impl Record for Client {
    type Patch = ClientPatch;

    const KEY: &'static str = "clients";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply(&mut self, patch: ClientPatch) {
        patch.apply(self);
    }

    fn seed() -> Vec<Self> {
        vec![Client {
            id: 1,
            name: "Richar Vasques".to_string(),
            email: "richar@hotmail.com".to_string(),
            phone: "3106667777".to_string(),
            total_appointments: 15,
        }]
    }
}

impl Record for Service {
    type Patch = ServicePatch;

    const KEY: &'static str = "services";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply(&mut self, patch: ServicePatch) {
        patch.apply(self);
    }

    fn seed() -> Vec<Self> {
        vec![Service {
            id: 1,
            name: "Corte de pelo".to_string(),
            category: "Corte".to_string(),
            duration: 40,
            price: 22000.0,
            description: "Corte sencillo".to_string(),
        }]
    }
}

impl Record for Schedule {
    type Patch = SchedulePatch;

    const KEY: &'static str = "appointments_schedules";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply(&mut self, patch: SchedulePatch) {
        patch.apply(self);
    }
}

impl Record for Reminder {
    type Patch = ReminderPatch;

    const KEY: &'static str = "reminders";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply(&mut self, patch: ReminderPatch) {
        patch.apply(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleStatus;
    use tempfile::TempDir;

    fn client_store(dir: &TempDir) -> ClientStore {
        ClientStore::load(Storage::new(dir.path()).unwrap())
    }

    #[test]
    fn missing_key_loads_seed_for_clients_and_services() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        let clients = ClientStore::load(storage.clone());
        assert_eq!(clients.len(), 1);
        assert_eq!(clients.records()[0].name, "Richar Vasques");

        let services = ServiceStore::load(storage.clone());
        assert_eq!(services.len(), 1);
        assert_eq!(services.records()[0].id, 1);

        let schedules = ScheduleStore::load(storage.clone());
        assert!(schedules.is_empty());
        let reminders = ReminderStore::load(storage);
        assert!(reminders.is_empty());
    }

    #[test]
    fn malformed_data_loads_seed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("clients.json"), "[{\"id\": }").unwrap();

        let clients = client_store(&dir);
        assert_eq!(clients.len(), 1);
        assert_eq!(clients.records()[0].name, "Richar Vasques");
    }

    #[test]
    fn create_appends_with_id_above_every_prior_id() {
        let dir = TempDir::new().unwrap();
        let mut clients = client_store(&dir);
        let len_before = clients.len();
        let max_before = clients.records().iter().map(|c| c.id).max().unwrap();

        let created = clients
            .create(Client::new("Ana Ruiz".into(), "ana@x.com".into(), "5551234".into()))
            .unwrap();

        assert_eq!(clients.len(), len_before + 1);
        assert!(created.id > max_before);
        assert_eq!(created.total_appointments, 0);
    }

    #[test]
    fn create_on_empty_collection_starts_at_one() {
        let dir = TempDir::new().unwrap();
        let mut schedules = ScheduleStore::load(Storage::new(dir.path()).unwrap());

        let created = schedules
            .create(Schedule::new(
                "Ana Ruiz".into(),
                "Corte de pelo".into(),
                "2025-03-10".into(),
                "14:00".into(),
            ))
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.status, ScheduleStatus::Pending);
        assert_eq!(created.duration, 60);
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let dir = TempDir::new().unwrap();
        let mut clients = client_store(&dir);
        let before = clients.records()[0].clone();

        let changed = clients
            .update(
                before.id,
                ClientPatch {
                    email: Some("new@mail.com".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(changed);

        let after = clients.get(before.id).unwrap();
        assert_eq!(after.email, "new@mail.com");
        assert_eq!(after.name, before.name);
        assert_eq!(after.phone, before.phone);
        assert_eq!(after.total_appointments, before.total_appointments);
    }

    #[test]
    fn update_with_unknown_id_is_a_silent_noop() {
        let dir = TempDir::new().unwrap();
        let mut clients = client_store(&dir);
        let before: Vec<_> = clients.records().to_vec();

        let changed = clients
            .update(
                9999,
                ClientPatch {
                    name: Some("Nobody".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(!changed);
        assert_eq!(clients.records(), before.as_slice());
    }

    #[test]
    fn delete_removes_exactly_the_matching_record_in_order() {
        let dir = TempDir::new().unwrap();
        let mut clients = client_store(&dir);
        let a = clients
            .create(Client::new("Ana".into(), "ana@x.com".into(), "1".into()))
            .unwrap();
        let b = clients
            .create(Client::new("Bruno".into(), "bruno@x.com".into(), "2".into()))
            .unwrap();

        assert!(clients.delete(a.id).unwrap());
        assert!(clients.get(a.id).is_none());

        let ids: Vec<u64> = clients.records().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, b.id]);

        assert!(!clients.delete(a.id).unwrap());
    }

    #[test]
    fn mutations_round_trip_through_storage() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        let mut clients = ClientStore::load(storage.clone());
        clients
            .create(Client::new("Ana Ruiz".into(), "ana@x.com".into(), "5551234".into()))
            .unwrap();
        let snapshot: Vec<_> = clients.records().to_vec();

        let reloaded = ClientStore::load(storage);
        assert_eq!(reloaded.records(), snapshot.as_slice());
    }

    #[test]
    fn filtered_schedules_by_date_matches_exactly() {
        let dir = TempDir::new().unwrap();
        let mut schedules = ScheduleStore::load(Storage::new(dir.path()).unwrap());
        for (date, time) in [
            ("2025-03-10", "09:00"),
            ("2025-03-11", "10:00"),
            ("2025-03-10", "14:00"),
        ] {
            schedules
                .create(Schedule::new(
                    "Ana".into(),
                    "Corte de pelo".into(),
                    date.into(),
                    time.into(),
                ))
                .unwrap();
        }

        let day = schedules.filtered(|s| s.is_on("2025-03-10"));
        assert_eq!(day.len(), 2);
        assert!(day.iter().all(|s| s.date == "2025-03-10"));
    }

    #[test]
    fn filtered_clients_by_search_term() {
        let dir = TempDir::new().unwrap();
        let mut clients = client_store(&dir);
        clients
            .create(Client::new("Ana Ruiz".into(), "ana@x.com".into(), "5551234".into()))
            .unwrap();

        let hits = clients.filtered(|c| c.matches_search("RICHAR"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Richar Vasques");
    }

    #[test]
    fn validate_required_rejects_empty_fields() {
        assert!(validate_required(&[("Name", "Ana"), ("Email", "ana@x.com")]).is_ok());

        let err = validate_required(&[("Name", "  "), ("Email", "ana@x.com")]).unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }
}
