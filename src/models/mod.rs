pub mod attendance;
pub mod result;
pub mod student;
pub mod subject;
pub mod user;
