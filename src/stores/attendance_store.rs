use crate::models::attendance::AttendanceRecord;
use crate::models::subject::{Course, SubjectKey};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// In-memory store for attendance records.
///
/// Keyed by (studentId, subject, semester) so the one-record-per-key
/// invariant holds structurally: upsert goes through the map's entry API and
/// two concurrent creates for the same key cannot both insert. A secondary
/// index maps record ids to keys for the id-addressed routes.
pub struct AttendanceStore {
    records: DashMap<SubjectKey, AttendanceRecord>,
    ids: DashMap<Uuid, SubjectKey>,
}

impl AttendanceStore {
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
    pub fn upsert<F>(&self, key: SubjectKey, build: F) -> (AttendanceRecord, bool)
    where
        F: FnOnce(Option<&AttendanceRecord>) -> AttendanceRecord,
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
    /// Used by WAL replay, where the log line already carries the full record.
    pub fn insert(&self, record: AttendanceRecord) {
        let key = record.key();
        let id = record.id;
        self.ids.insert(id, key.clone());
        if let Some(previous) = self.records.insert(key, record) {
            if previous.id != id {
                self.ids.remove(&previous.id);
            }
        }
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<AttendanceRecord> {
        let key = self.ids.get(&id)?.value().clone();
        self.records.get(&key).map(|entry| entry.value().clone())
    }

    /// Apply a mutation to the record with the given id.
    /// Returns the updated record if it existed.
    pub fn update_by_id<F>(&self, id: Uuid, apply: F) -> Option<AttendanceRecord>
    where
        F: FnOnce(&mut AttendanceRecord),
    {
        let key = self.ids.get(&id)?.value().clone();
        self.records.get_mut(&key).map(|mut entry| {
            apply(entry.value_mut());
            entry.value().clone()
        })
    }

    /// Remove a record by id
    /// Returns the removed record if it existed
    pub fn remove_by_id(&self, id: Uuid) -> Option<AttendanceRecord> {
        let (_, key) = self.ids.remove(&id)?;
        self.records.remove(&key).map(|(_, record)| record)
    }

    /// All records, sorted by (studentId, subject)
    pub fn list(&self) -> Vec<AttendanceRecord> {
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
    pub fn by_student(&self, student_id: &str) -> Vec<AttendanceRecord> {
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
    pub fn by_course_year(&self, course: Course, year: u32) -> Vec<AttendanceRecord> {
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

impl Default for AttendanceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(student_id: &str, subject: &str, semester: u32) -> AttendanceRecord {
        AttendanceRecord::new(
            student_id.to_string(),
            "Asha Rao".to_string(),
            Course::Cse,
            3,
            semester,
            subject.to_string(),
            "CS301".to_string(),
            20,
            14,
            1000,
        )
    }

    #[test]
    fn test_upsert_creates_then_overwrites() {
        let store = AttendanceStore::new();
        let key = SubjectKey::new("CSE253101", "Networks", 5);

        let (first, created) = store.upsert(key.clone(), |existing| {
            assert!(existing.is_none());
            record("CSE253101", "Networks", 5)
        });
        assert!(created);

        // second call for the same key sees the existing record and keeps
        // exactly one stored copy (last write wins)
        let (second, created) = store.upsert(key, |existing| {
            let mut updated = existing.unwrap().clone();
            updated.attended_classes = 18;
            updated
        });
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.attended_classes, 18);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_by_id(first.id).unwrap().attended_classes, 18);
    }

    #[test]
    fn test_id_index_follows_removal() {
        let store = AttendanceStore::new();
        let rec = record("CSE253101", "Networks", 5);
        let id = rec.id;
        store.insert(rec);

        assert!(store.remove_by_id(id).is_some());
        assert!(store.get_by_id(id).is_none());
        assert!(store.remove_by_id(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_replaces_record_and_cleans_stale_id() {
        let store = AttendanceStore::new();
        let first = record("CSE253101", "Networks", 5);
        let first_id = first.id;
        store.insert(first);

        let replacement = record("CSE253101", "Networks", 5);
        let replacement_id = replacement.id;
        store.insert(replacement);

        assert_eq!(store.len(), 1);
        assert!(store.get_by_id(first_id).is_none());
        assert!(store.get_by_id(replacement_id).is_some());
    }

    #[test]
    fn test_by_student_sorted_by_subject() {
        let store = AttendanceStore::new();
        store.insert(record("CSE253101", "Networks", 5));
        store.insert(record("CSE253101", "Algorithms", 5));
        store.insert(record("IT253102", "Networks", 5));

        let subjects: Vec<_> = store
            .by_student("CSE253101")
            .into_iter()
            .map(|r| r.subject)
            .collect();
        assert_eq!(subjects, vec!["Algorithms", "Networks"]);
    }

    #[test]
    fn test_by_course_year_filters() {
        let store = AttendanceStore::new();
        let mut ce = record("CE253103", "Surveying", 5);
        ce.course = Course::Ce;
        store.insert(ce);
        store.insert(record("CSE253101", "Networks", 5));

        let records = store.by_course_year(Course::Ce, 3);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "Surveying");
        assert!(store.by_course_year(Course::Ce, 4).is_empty());
    }

    #[test]
    fn test_update_by_id() {
        let store = AttendanceStore::new();
        let rec = record("CSE253101", "Networks", 5);
        let id = rec.id;
        store.insert(rec);

        let updated = store
            .update_by_id(id, |r| {
                r.total_classes = 30;
                r.attended_classes = 21;
            })
            .unwrap();
        assert_eq!(updated.total_classes, 30);
        assert!(store.update_by_id(Uuid::new_v4(), |_| {}).is_none());
    }
}
