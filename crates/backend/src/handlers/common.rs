use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use contracts::usecases::u502_ai_query::ErrorResponse;

/// Ошибка handler'а: статус и тело `{ "error": ... }`
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub type HandlerResult<T> = Result<Json<T>, HandlerError>;

pub fn bad_request(message: impl Into<String>) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

pub fn not_found(what: &str) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("{} not found", what))),
    )
}

/// Подробности только в лог, клиенту — общий текст
pub fn internal(context: &str, error: impl std::fmt::Display) -> HandlerError {
    tracing::error!("{}: {}", context, error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal()),
    )
}

/// Тело запроса. Битый JSON — 400, превышение лимита остаётся 413
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HandlerError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            let status = rejection.status();
            tracing::warn!("Rejected request body ({}): {}", status, rejection.body_text());
            if status == StatusCode::PAYLOAD_TOO_LARGE {
                Err((status, Json(ErrorResponse::new("Request body too large"))))
            } else {
                Err(bad_request(rejection.body_text()))
            }
        }
    }
}
