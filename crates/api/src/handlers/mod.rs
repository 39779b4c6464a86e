pub mod access;
pub mod auth;
pub mod batch;
pub mod chat;
pub mod lecture;
pub mod notification;
pub mod timetable;
