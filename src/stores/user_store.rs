use crate::models::user::{Role, User};
use dashmap::DashMap;
use uuid::Uuid;

/// In-memory store for registered accounts
pub struct UserStore {
    users: DashMap<Uuid, User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Add a user to the store
    /// If a user with the same id already exists, it will be replaced
    pub fn insert(&self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).map(|entry| entry.value().clone())
    }

    /// Look a user up by email
    /// Note: This is a linear search and should be used sparingly
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone())
    }

    pub fn email_exists(&self, email: &str) -> bool {
        self.users.iter().any(|entry| entry.value().email == email)
    }

    pub fn student_id_exists(&self, student_id: &str) -> bool {
        self.users
            .iter()
            .any(|entry| entry.value().student_id == student_id)
    }

    /// Apply a mutation to the user with the given id.
    /// Returns the updated user if it existed.
    pub fn update<F>(&self, id: Uuid, apply: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        self.users.get_mut(&id).map(|mut entry| {
            apply(entry.value_mut());
            entry.value().clone()
        })
    }

    /// Every stored account
    pub fn list(&self) -> Vec<User> {
        self.users
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// All role=student accounts, sorted by name
    pub fn list_students(&self) -> Vec<User> {
        let mut students: Vec<_> = self
            .users
            .iter()
            .filter(|entry| entry.value().role == Role::Student)
            .map(|entry| entry.value().clone())
            .collect();
        students.sort_by(|a, b| a.name.cmp(&b.name));
        students
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subject::Course;

    fn user(name: &str, email: &str, student_id: &str, role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            student_id: student_id.to_string(),
            course: Course::Cse,
            year: 3,
            semester: 5,
            phone: None,
            address: None,
            role,
            created_at: 1000,
        }
    }

    #[test]
    fn test_find_by_email() {
        let store = UserStore::new();
        store.insert(user("Asha Rao", "asha@example.edu", "CSE253101", Role::Student));

        assert!(store.find_by_email("asha@example.edu").is_some());
        assert!(store.find_by_email("missing@example.edu").is_none());
    }

    #[test]
    fn test_uniqueness_probes() {
        let store = UserStore::new();
        store.insert(user("Asha Rao", "asha@example.edu", "CSE253101", Role::Student));

        assert!(store.email_exists("asha@example.edu"));
        assert!(!store.email_exists("other@example.edu"));
        assert!(store.student_id_exists("CSE253101"));
        assert!(!store.student_id_exists("CSE253999"));
    }

    #[test]
    fn test_list_students_filters_admins() {
        let store = UserStore::new();
        store.insert(user("Asha Rao", "asha@example.edu", "CSE253101", Role::Student));
        store.insert(user("Dean Office", "dean@example.edu", "ADM000", Role::Admin));

        let students = store.list_students();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "Asha Rao");
    }

    #[test]
    fn test_update_profile_fields() {
        let store = UserStore::new();
        let u = user("Asha Rao", "asha@example.edu", "CSE253101", Role::Student);
        let id = u.id;
        store.insert(u);

        let updated = store
            .update(id, |u| u.phone = Some("555-0101".to_string()))
            .unwrap();
        assert_eq!(updated.phone.as_deref(), Some("555-0101"));
    }
}
