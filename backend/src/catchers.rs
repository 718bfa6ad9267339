use rocket::{Request, catch, serde::json::Json};
use shared::ErrorResponse;

fn message(error: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse { error: error.into() })
}

#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorResponse> {
    message("Invalid request parameters.")
}

#[catch(401)]
pub fn unauthorized(_req: &Request) -> Json<ErrorResponse> {
    message("Sign in to continue.")
}

#[catch(404)]
pub fn not_found(req: &Request) -> Json<ErrorResponse> {
    match req.uri().path().segments().nth(1) {
        Some("photos") => message("No such photo."),
        Some("users") => message("No such member."),
        _ => message("The requested resource was not found."),
    }
}

#[catch(409)]
pub fn conflict(_req: &Request) -> Json<ErrorResponse> {
    message("The request conflicts with existing data.")
}

#[catch(422)]
pub fn unprocessable(_req: &Request) -> Json<ErrorResponse> {
    message("The request body could not be read.")
}

#[catch(429)]
pub fn too_many_requests(_req: &Request) -> Json<ErrorResponse> {
    message("Rate limit exceeded. Please wait before trying again.")
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorResponse> {
    message("An internal server error occurred.")
}
