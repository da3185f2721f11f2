use sawari_core::repository::AuthGateway;
use sawari_core::user::{LoginOutcome, LoginRequest, RegisterRequest, Role};
use sawari_core::validate::{
    validate_login, validate_registration, LoginValues, RegistrationValues, ValidationReport,
};

use crate::notice::Notice;

/// Where a fresh session lands, by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    RideBoard,
    DriverBoard,
}

pub fn landing_for(role: Role) -> Landing {
    match role {
        Role::User => Landing::RideBoard,
        Role::Driver => Landing::DriverBoard,
    }
}

/// The login form. A successful submit yields the [`LoginOutcome`] the caller
/// turns into a session.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub values: LoginValues,
    pub report: ValidationReport,
    submitting: bool,
    pub notice: Option<Notice>,
    outcome: Option<LoginOutcome>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn outcome(&self) -> Option<&LoginOutcome> {
        self.outcome.as_ref()
    }

    pub async fn submit(&mut self, gateway: &dyn AuthGateway) {
        if self.submitting {
            return;
        }
        self.report = validate_login(&self.values);
        if !self.report.is_ok() {
            return;
        }

        let request = LoginRequest {
            email: self.values.email.trim().to_string(),
            password: self.values.password.clone(),
        };

        self.submitting = true;
        let result = gateway.login(&request).await;
        self.submitting = false;

        match result {
            Ok(outcome) => {
                self.notice = Some(Notice::success(outcome.message.clone()));
                self.outcome = Some(outcome);
            }
            Err(err) => {
                self.notice = Some(Notice::error(&err));
            }
        }
    }
}

/// The registration form; on success the user is sent back to log in.
#[derive(Debug, Default)]
pub struct RegisterForm {
    pub values: RegistrationValues,
    pub report: ValidationReport,
    submitting: bool,
    pub notice: Option<Notice>,
    registered: bool,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub async fn submit(&mut self, gateway: &dyn AuthGateway) {
        if self.submitting {
            return;
        }
        self.report = validate_registration(&self.values);
        if !self.report.is_ok() {
            return;
        }

        let request = RegisterRequest {
            name: self.values.name.trim().to_string(),
            email: self.values.email.trim().to_string(),
            phone: self.values.phone.trim().to_string(),
            password: self.values.password.clone(),
        };

        self.submitting = true;
        let result = gateway.register(&request).await;
        self.submitting = false;

        match result {
            Ok(message) => {
                self.notice = Some(Notice::success(message));
                self.registered = true;
            }
            Err(err) => {
                self.notice = Some(Notice::error(&err));
            }
        }
    }
}
