use crate::models::{CreateMemberRequest, PhotoSubmission};

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_NAME_LENGTH: usize = 60;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Title exceeds maximum length of {MAX_TITLE_LENGTH}")]
    TitleTooLong,
    #[error("Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH}")]
    DescriptionTooLong,
    #[error("Photographer is required")]
    MissingPhotographer,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Missing fields: {0}")]
    MissingFields(String),
    #[error("Name exceeds maximum length of {MAX_NAME_LENGTH}")]
    NameTooLong,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
    #[error("Password exceeds maximum length of {MAX_PASSWORD_LENGTH}")]
    PasswordTooLong,
}

pub fn validate_submission(submission: &PhotoSubmission) -> Result<(), ValidationError> {
    if submission.title.trim().is_empty() { return Err(ValidationError::EmptyTitle); }
    if submission.title.chars().count() > MAX_TITLE_LENGTH { return Err(ValidationError::TitleTooLong); }
    if submission.description.chars().count() > MAX_DESCRIPTION_LENGTH { return Err(ValidationError::DescriptionTooLong); }
    if submission.photographer_id.as_str().is_empty() || submission.photographer.trim().is_empty() {
        return Err(ValidationError::MissingPhotographer);
    }
    Ok(())
}

pub fn validate_member_request(request: &CreateMemberRequest) -> Result<(), ValidationError> {
    let missing: Vec<_> = [
        ("name", request.name.trim()),
        ("email", request.email.trim()),
        ("password", request.password.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() { return Err(ValidationError::MissingFields(missing.join(", "))); }
    if request.name.chars().count() > MAX_NAME_LENGTH { return Err(ValidationError::NameTooLong); }
    if !is_plausible_email(request.email.trim()) { return Err(ValidationError::InvalidEmail); }
    if request.password.chars().count() < MIN_PASSWORD_LENGTH { return Err(ValidationError::PasswordTooShort); }
    if request.password.chars().count() > MAX_PASSWORD_LENGTH { return Err(ValidationError::PasswordTooLong); }
    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LENGTH || email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() > 1
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}
