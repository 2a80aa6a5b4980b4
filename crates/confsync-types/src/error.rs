use axum::{http::StatusCode, response::IntoResponse};

pub type CsResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	AccessDenied,
	ValidationError(String),
	PersistenceError(String),
	NotificationError(String),
	ConfigError(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::AccessDenied => write!(f, "access denied"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::PersistenceError(msg) => write!(f, "persistence error: {}", msg),
			Error::NotificationError(msg) => write!(f, "notification error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		match self {
			Error::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
			Error::AccessDenied => (StatusCode::FORBIDDEN, "access denied").into_response(),
			Error::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
			_ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
		}
	}
}

// vim: ts=4
