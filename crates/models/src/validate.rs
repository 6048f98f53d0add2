use crate::errors::ModelError;

pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 100;

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ModelError::Validation("email is required".into()));
    }
    if email.len() > 100 {
        return Err(ModelError::Validation("email must not exceed 100 characters".into()));
    }
    // Format checking proper lives at the transport edge; the core only
    // refuses values that cannot possibly be addresses.
    let Some(at) = email.find('@') else {
        return Err(ModelError::Validation("invalid email format".into()));
    };
    if at == 0 || at == email.len() - 1 {
        return Err(ModelError::Validation("invalid email format".into()));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    if username.len() < 3 || username.len() > 50 {
        return Err(ModelError::Validation(
            "username must be between 3 and 50 characters".into(),
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(ModelError::Validation(
            "username can only contain letters, numbers, underscores and hyphens".into(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ModelError> {
    if password.len() < PASSWORD_MIN || password.len() > PASSWORD_MAX {
        return Err(ModelError::Validation(format!(
            "password must be between {} and {} characters",
            PASSWORD_MIN, PASSWORD_MAX
        )));
    }
    Ok(())
}

pub fn validate_full_name(full_name: &str) -> Result<(), ModelError> {
    if full_name.trim().is_empty() {
        return Err(ModelError::Validation("full name is required".into()));
    }
    if full_name.len() > 100 {
        return Err(ModelError::Validation(
            "full name must not exceed 100 characters".into(),
        ));
    }
    Ok(())
}
