pub mod analysis;
pub mod dashboard;
pub mod search;
pub mod video;

use crate::models::ErrorResponse;
use rocket::form::error::ErrorKind;
use rocket::form::Errors;
use rocket::http::Status;

/// Leaving a query parameter out selects its default; a value that does not
/// parse is rejected instead of being silently replaced.
pub fn optional_param<T>(
    name: &str,
    value: Result<T, Errors<'_>>,
) -> Result<Option<T>, ErrorResponse> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(errors) if errors.iter().all(|e| matches!(e.kind, ErrorKind::Missing)) => Ok(None),
        Err(errors) => {
            let reasons: Vec<String> = errors.iter().map(|e| e.kind.to_string()).collect();
            Err(ErrorResponse::new(
                Status::BadRequest,
                "Invalid parameter",
                format!("`{name}` is invalid: {}", reasons.join("; ")),
            ))
        }
    }
}
