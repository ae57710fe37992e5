use crate::models::student::Student;
use dashmap::DashMap;
use uuid::Uuid;

/// In-memory store for roster students
pub struct StudentStore {
    students: DashMap<Uuid, Student>,
}

impl StudentStore {
    pub fn new() -> Self {
        Self {
            students: DashMap::new(),
        }
    }

    /// Add a student to the store
    /// If a student with the same id already exists, it will be replaced
    pub fn insert(&self, student: Student) {
        self.students.insert(student.id, student);
    }

    pub fn get(&self, id: Uuid) -> Option<Student> {
        self.students.get(&id).map(|entry| entry.value().clone())
    }

    /// Apply a mutation to the student with the given id.
    /// Returns the updated student if it existed.
    pub fn update<F>(&self, id: Uuid, apply: F) -> Option<Student>
    where
        F: FnOnce(&mut Student),
    {
        self.students.get_mut(&id).map(|mut entry| {
            apply(entry.value_mut());
            entry.value().clone()
        })
    }

    /// Remove a student by id
    /// Returns the removed student if it existed
    pub fn remove(&self, id: Uuid) -> Option<Student> {
        self.students.remove(&id).map(|(_, student)| student)
    }

    pub fn list(&self) -> Vec<Student> {
        let mut students: Vec<_> = self
            .students
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        students.sort_by(|a, b| (a.name.as_str(), a.email.as_str()).cmp(&(b.name.as_str(), b.email.as_str())));
        students
    }

    /// Check whether an email is already taken, optionally excluding one
    /// student (for updates).
    /// Note: This is a linear search and should be used sparingly
    pub fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> bool {
        self.students
            .iter()
            .any(|entry| entry.value().email == email && Some(entry.value().id) != exclude)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

impl Default for StudentStore {
    fn default() -> Self {
        Self::new()
    }
}
