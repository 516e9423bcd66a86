use crate::domain::ports::PinAuthenticator;
use crate::utils::error::{DeskError, Result};
use crate::utils::validation::validate_pin_format;

pub const DEFAULT_EMAIL_TEMPLATE: &str = "Dear {customer_name},

Your appointment has been successfully scheduled!

Appointment Details:
- Service: {service}
- Date & Time: {appointment_date}
- Email: {customer_email}
- Phone: {phone}

Thank you for choosing our service!

Best regards,
Appointment Team";

pub const DEFAULT_REMINDER_TEMPLATE: &str = "Dear {customer_name},

This is a friendly reminder about your upcoming appointment.

Appointment Details:
- Service: {service}
- Date & Time: {appointment_date}
- Email: {customer_email}
- Phone: {phone}

We look forward to seeing you!

Best regards,
Appointment Team";

/// PIN held in memory, compared without early exit.
pub struct ConfiguredPin {
    pin: String,
}

impl ConfiguredPin {
    pub fn new(pin: impl Into<String>) -> Self {
        Self { pin: pin.into() }
    }
}

impl std::fmt::Debug for ConfiguredPin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ConfiguredPin(****)")
    }
}

impl PinAuthenticator for ConfiguredPin {
    fn verify(&self, candidate: &str) -> bool {
        let expected = self.pin.as_bytes();
        let given = candidate.as_bytes();
        let mut diff = expected.len() ^ given.len();
        for (i, byte) in expected.iter().enumerate() {
            let other = given.get(i).copied().unwrap_or(0);
            diff |= usize::from(byte ^ other);
        }
        diff == 0
    }

    fn replace(&mut self, new_pin: &str) {
        self.pin = new_pin.to_string();
    }
}

/// 範本設定；所有變更都要先通過 PIN 驗證
pub struct Settings {
    email_template: String,
    reminder_template: String,
    first_time_setup: bool,
    authenticator: Box<dyn PinAuthenticator>,
}

impl Settings {
    pub fn new(authenticator: Box<dyn PinAuthenticator>) -> Self {
        Self {
            email_template: DEFAULT_EMAIL_TEMPLATE.to_string(),
            reminder_template: DEFAULT_REMINDER_TEMPLATE.to_string(),
            first_time_setup: true,
            authenticator,
        }
    }

    pub fn with_templates(
        mut self,
        email_template: Option<String>,
        reminder_template: Option<String>,
    ) -> Self {
        if let Some(template) = email_template {
            self.email_template = template;
            self.first_time_setup = false;
        }
        if let Some(template) = reminder_template {
            self.reminder_template = template;
        }
        self
    }

    pub fn email_template(&self) -> String {
        self.email_template.clone()
    }

    pub fn reminder_template(&self) -> String {
        self.reminder_template.clone()
    }

    pub fn is_first_time_setup(&self) -> bool {
        self.first_time_setup
    }

    fn authorize(&self, pin: &str) -> Result<()> {
        if self.authenticator.verify(pin) {
            Ok(())
        } else {
            tracing::warn!("🔒 Settings change rejected: invalid PIN");
            Err(DeskError::Unauthorized {
                message: "invalid PIN".to_string(),
            })
        }
    }

    pub fn update_email_template(&mut self, pin: &str, template: impl Into<String>) -> Result<()> {
        self.authorize(pin)?;
        self.email_template = template.into();
        tracing::info!("✉️ Email template updated");
        Ok(())
    }

    pub fn update_reminder_template(
        &mut self,
        pin: &str,
        template: impl Into<String>,
    ) -> Result<()> {
        self.authorize(pin)?;
        self.reminder_template = template.into();
        tracing::info!("✉️ Reminder template updated");
        Ok(())
    }

    pub fn complete_first_time_setup(
        &mut self,
        pin: &str,
        template: impl Into<String>,
    ) -> Result<()> {
        self.update_email_template(pin, template)?;
        self.first_time_setup = false;
        Ok(())
    }

    pub fn change_pin(&mut self, current: &str, new_pin: &str) -> Result<()> {
        self.authorize(current)?;
        validate_pin_format(new_pin)?;
        self.authenticator.replace(new_pin);
        tracing::info!("🔑 PIN changed");
        Ok(())
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("email_template", &self.email_template)
            .field("reminder_template", &self.reminder_template)
            .field("first_time_setup", &self.first_time_setup)
            .finish_non_exhaustive()
    }
}
