use axum::http::StatusCode;
use serde::Serialize;
use time::OffsetDateTime;

/// Uniform wrapper for every JSON response, success or failure.
/// Clients parse one shape regardless of outcome.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    pub timestamp: i64,
}

/// Pagination block, attached to list responses when paging is requested.
#[derive(Debug, Serialize)]
pub struct Meta {
    pub page: i64,
    pub quantity: i64,
    pub total_page: i64,
    pub total_data: i64,
}

fn response_code(status: StatusCode) -> String {
    if status.is_success() {
        "RES-000".to_string()
    } else {
        format!("RES-{}", status.as_u16())
    }
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T, message: &str) -> Self {
        Self {
            code: response_code(StatusCode::OK),
            message: message.to_string(),
            system_message: None,
            data: Some(data),
            meta: None,
            timestamp: OffsetDateTime::now_utc().unix_timestamp(),
        }
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl Envelope<()> {
    pub fn empty(message: &str) -> Self {
        Self {
            code: response_code(StatusCode::OK),
            message: message.to_string(),
            system_message: None,
            data: None,
            meta: None,
            timestamp: OffsetDateTime::now_utc().unix_timestamp(),
        }
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Self {
            code: response_code(status),
            message: message.to_string(),
            system_message: None,
            data: None,
            meta: None,
            timestamp: OffsetDateTime::now_utc().unix_timestamp(),
        }
    }

    pub fn with_system_message(mut self, system: &str) -> Self {
        self.system_message = Some(system.to_string());
        self
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = code.to_string();
        self
    }
}
