use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// Who sent a request, as far as the server can tell without a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub request_id: Uuid,
    pub fingerprint: String,
    pub ip: String,
}

pub fn request_fingerprint(ip: &str, user_agent: Option<&str>) -> String {
    use base64::engine::general_purpose::URL_SAFE;
    use base64::Engine;
    use sha2::{Sha256, Digest};

    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    if let Some(ua) = user_agent {
        hasher.update(ua.as_bytes());
    }
    URL_SAFE.encode(hasher.finalize())
}

#[cfg(feature = "backend")]
mod backend_impl {
    use super::*;
    use rocket::request::{FromRequest, Outcome};
    use rocket::Request;

    #[rocket::async_trait]
    impl<'r> FromRequest<'r> for UserInfo {
        type Error = ();

        async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
            let headers = req.headers();
            let ip = headers.get_one("X-Real-IP")
                .map(str::to_string)
                .or_else(|| headers.get_one("X-Forwarded-For")
                    .and_then(|chain| chain.split(',').next())
                    .map(|ip| ip.trim().to_string()))
                .or_else(|| req.client_ip().map(|ip| ip.to_string()))
                .unwrap_or_else(|| "0.0.0.0".to_string());

            let fingerprint = request_fingerprint(&ip, headers.get_one("User-Agent"));

            Outcome::Success(UserInfo {
                request_id: Uuid::new_v4(),
                fingerprint,
                ip,
            })
        }
    }
}
