use crate::error::ApiError;

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(ApiError::Validation("Email cannot be empty".to_string()));
    }

    if email.len() > 254 {
        return Err(ApiError::Validation("Email too long".to_string()));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(ApiError::Validation(
            "Email cannot contain whitespace".to_string(),
        ));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ApiError::Validation("Invalid email address".to_string())),
    }
}

/// One feedback item per unmet password rule; empty means the password
/// is acceptable.
pub fn password_feedback(password: &str) -> Vec<&'static str> {
    let mut feedback = Vec::new();

    if password.chars().count() < 12 {
        feedback.push("At least 12 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        feedback.push("At least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        feedback.push("At least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        feedback.push("At least one number");
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        feedback.push("At least one special character");
    }

    feedback
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    let feedback = password_feedback(password);
    if feedback.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Password does not meet requirements: {}",
            feedback.join(", ")
        )))
    }
}

pub fn validate_full_name(full_name: &str) -> Result<(), ApiError> {
    let trimmed = full_name.trim();
    if trimmed.chars().count() < 2 {
        return Err(ApiError::Validation(
            "Full name must be at least 2 characters".to_string(),
        ));
    }
    if trimmed.chars().count() > 100 {
        return Err(ApiError::Validation(
            "Full name must be at most 100 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ApiError> {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    if !allowed {
        return Err(ApiError::Validation(
            "Phone number contains invalid characters".to_string(),
        ));
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(ApiError::Validation(
            "Phone number must contain 7 to 15 digits".to_string(),
        ));
    }

    Ok(())
}
