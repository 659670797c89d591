use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::HabitNotFound(_) | AppError::LogNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
