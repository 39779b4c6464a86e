//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod access_grant_repo;
pub mod access_request_repo;
pub mod batch_repo;
pub mod lecture_repo;
pub mod notification_repo;
pub mod role_repo;
pub mod session_repo;
pub mod timetable_repo;
pub mod user_repo;

pub use access_grant_repo::AccessGrantRepo;
pub use access_request_repo::AccessRequestRepo;
pub use batch_repo::BatchRepo;
pub use lecture_repo::LectureRepo;
pub use notification_repo::NotificationRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use timetable_repo::TimetableRepo;
pub use user_repo::UserRepo;
