use crate::domain::model::{BookingRequest, ValidatedBooking};
use crate::utils::error::{DeskError, Result};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DeskError::config(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DeskError::config(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(DeskError::config(
            field_name,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(DeskError::config(
            field_name,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_pin_format(pin: &str) -> Result<()> {
    if !(4..=8).contains(&pin.len()) || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(DeskError::validation("pin", "PIN must be 4 to 8 digits"));
    }
    Ok(())
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    if !EMAIL_RE.is_match(value) {
        return Err(DeskError::validation(
            field_name,
            format!("'{}' is not a valid email address", value),
        ));
    }
    Ok(())
}

/// 必填字串：去除前後空白後不可為空
pub fn require_non_empty(field_name: &str, value: &Option<String>) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(DeskError::validation(field_name, "is required")),
    }
}

/// 選填字串：空白視為未提供
pub fn optional_trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn parse_date(field_name: &str, value: &Option<String>) -> Result<NaiveDate> {
    let raw = require_non_empty(field_name, value)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
        DeskError::validation(field_name, format!("'{}' is not a YYYY-MM-DD date: {}", raw, e))
    })
}

pub fn parse_time(field_name: &str, value: &Option<String>) -> Result<NaiveTime> {
    let raw = require_non_empty(field_name, value)?;
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
        .map_err(|e| {
            DeskError::validation(field_name, format!("'{}' is not an HH:MM time: {}", raw, e))
        })
}

/// 在流程入口一次性驗證預約輸入；含端點的天數不得超過 `max_span_days`
pub fn validate_booking_request(
    request: &BookingRequest,
    max_span_days: u32,
) -> Result<ValidatedBooking> {
    let customer_name = require_non_empty("customer_name", &request.customer_name)?;
    let service = require_non_empty("service", &request.service)?;
    let id_number = require_non_empty("id_number", &request.id_number)?;

    let start_date = parse_date("start_date", &request.start_date)?;
    let end_date = parse_date("end_date", &request.end_date)?;
    if start_date > end_date {
        return Err(DeskError::validation(
            "end_date",
            format!("end date {} is before start date {}", end_date, start_date),
        ));
    }
    let span_days = (end_date - start_date).num_days() + 1;
    if span_days > i64::from(max_span_days) {
        return Err(DeskError::validation(
            "end_date",
            format!(
                "booking spans {} days, the limit is {}",
                span_days, max_span_days
            ),
        ));
    }
    let time = parse_time("time", &request.time)?;

    let email = optional_trimmed(&request.email);
    if let Some(email) = &email {
        validate_email("email", email)?;
    }

    Ok(ValidatedBooking {
        customer_name,
        service,
        start_date,
        end_date,
        time,
        profession: optional_trimmed(&request.profession),
        id_number,
        email,
        phone: optional_trimmed(&request.phone),
        notes: optional_trimmed(&request.notes),
    })
}
