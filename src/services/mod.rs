pub mod approval_service;
pub mod course_service;
pub mod enrollment_service;
pub mod grade_service;
pub mod notifier;
pub mod otp_service;
pub mod password;
pub mod reset_token_service;
pub mod syllabus_service;
pub mod token_service;
pub mod user_service;
