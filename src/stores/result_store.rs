use crate::models::result::ResultRecord;
use crate::models::subject::{Course, SubjectKey};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// In-memory store for result records, keyed like the attendance store:
/// one record per (studentId, subject, semester), with an id side index.
pub struct ResultStore {
    records: DashMap<SubjectKey, ResultRecord>,
    ids: DashMap<Uuid, SubjectKey>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            ids: DashMap::new(),
        }
    }

    /// Atomically insert or overwrite the record for `key`. The closure
    /// receives the existing record, if any, and returns the record to
    /// store; an update must keep the existing record's id.
    /// Returns the stored record and whether it was newly created.
    pub fn upsert<F>(&self, key: SubjectKey, build: F) -> (ResultRecord, bool)
    where
        F: FnOnce(Option<&ResultRecord>) -> ResultRecord,
    {
        match self.records.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                let updated = build(Some(occupied.get()));
                *occupied.get_mut() = updated.clone();
                (updated, false)
            }
            Entry::Vacant(vacant) => {
                let record = build(None);
                self.ids.insert(record.id, key);
                vacant.insert(record.clone());
                (record, true)
            }
        }
    }

    /// Insert a record as-is, replacing any record under the same key.
    /// Used by WAL replay.
    pub fn insert(&self, record: ResultRecord) {
        let key = record.key();
        let id = record.id;
        self.ids.insert(id, key.clone());
        if let Some(previous) = self.records.insert(key, record) {
            if previous.id != id {
                self.ids.remove(&previous.id);
            }
        }
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<ResultRecord> {
        let key = self.ids.get(&id)?.value().clone();
        self.records.get(&key).map(|entry| entry.value().clone())
    }

    /// Apply a mutation to the record with the given id.
    /// Returns the updated record if it existed.
    pub fn update_by_id<F>(&self, id: Uuid, apply: F) -> Option<ResultRecord>
    where
        F: FnOnce(&mut ResultRecord),
    {
        let key = self.ids.get(&id)?.value().clone();
        self.records.get_mut(&key).map(|mut entry| {
            apply(entry.value_mut());
            entry.value().clone()
        })
    }

    /// Remove a record by id
    /// Returns the removed record if it existed
    pub fn remove_by_id(&self, id: Uuid) -> Option<ResultRecord> {
        let (_, key) = self.ids.remove(&id)?;
        self.records.remove(&key).map(|(_, record)| record)
    }

    /// All records, sorted by (studentId, subject)
    pub fn list(&self) -> Vec<ResultRecord> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| {
            (a.student_id.as_str(), a.subject.as_str())
                .cmp(&(b.student_id.as_str(), b.subject.as_str()))
        });
        records
    }

    /// One student's records, sorted by subject
    pub fn by_student(&self, student_id: &str) -> Vec<ResultRecord> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .filter(|entry| entry.value().student_id == student_id)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| a.subject.cmp(&b.subject));
        records
    }

    /// Records for a course and year, sorted by (studentName, subject)
    pub fn by_course_year(&self, course: Course, year: u32) -> Vec<ResultRecord> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .filter(|entry| entry.value().course == course && entry.value().year == year)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| {
            (a.student_name.as_str(), a.subject.as_str())
                .cmp(&(b.student_name.as_str(), b.subject.as_str()))
        });
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}
