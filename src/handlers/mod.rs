pub mod admin;
pub mod auth;
pub mod auth_otp;
pub mod courses;
pub mod health;
pub mod instructor;
pub mod student;
