//! SurrealDB repository implementations.

mod course;
mod student;
mod tenant;
mod user;

pub use course::SurrealCourseRepository;
pub use student::SurrealStudentRepository;
pub use tenant::SurrealTenantRepository;
pub use user::SurrealUserRepository;
