pub mod approval;
pub mod course;
pub mod enrollment;
pub mod grade;
pub mod otp;
pub mod reset_token;
pub mod syllabus;
pub mod user;
