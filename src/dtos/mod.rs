pub mod auth_dtos;
pub mod course_dtos;
