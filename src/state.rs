use std::sync::Arc;

use chrono::Duration;
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::services::approval_service::ApprovalRequestService;
use crate::services::course_service::CourseService;
use crate::services::enrollment_service::EnrollmentService;
use crate::services::grade_service::GradeService;
use crate::services::notifier::{LogNotifier, Notifier};
use crate::services::otp_service::OtpStore;
use crate::services::reset_token_service::ResetTokenService;
use crate::services::syllabus_service::SyllabusService;
use crate::services::token_service::TokenIssuer;
use crate::services::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub tokens: Arc<TokenIssuer>,
    pub otp_store: Arc<OtpStore>,
    pub notifier: Arc<dyn Notifier>,
    pub users: UserService,
    pub reset_tokens: ResetTokenService,
    pub courses: CourseService,
    pub approvals: ApprovalRequestService,
    pub enrollments: EnrollmentService,
    pub grades: GradeService,
    pub syllabi: SyllabusService,
}

impl AppState {
    pub fn new(db: SqlitePool, config: &AppConfig) -> Self {
        AppState {
            tokens: Arc::new(TokenIssuer::new(
                &config.jwt_secret,
                Duration::seconds(config.jwt_expiration_secs),
            )),
            otp_store: Arc::new(OtpStore::default()),
            notifier: Arc::new(LogNotifier),
            users: UserService::new(db.clone(), config.bcrypt_cost),
            reset_tokens: ResetTokenService::new(db.clone(), config.bcrypt_cost),
            courses: CourseService::new(db.clone()),
            approvals: ApprovalRequestService::new(db.clone()),
            enrollments: EnrollmentService::new(db.clone()),
            grades: GradeService::new(db.clone()),
            syllabi: SyllabusService::new(db.clone()),
            db,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}
