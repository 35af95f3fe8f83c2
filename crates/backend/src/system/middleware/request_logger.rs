use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

use crate::shared::format::format_count;

fn status_color(status: u16) -> &'static str {
    match status {
        200..=299 => "36",
        400..=499 => "33",
        _ => "31",
    }
}

/// Строка журнала запросов: время, длительность, размер ответа, статус, метод, путь
pub fn format_request_line(
    status: u16,
    millis: u128,
    size: Option<usize>,
    method: &str,
    path: &str,
) -> String {
    let size = size.map(format_count).unwrap_or_else(|| "error".to_string());
    format!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        status_color(status),
        Local::now().format("%H:%M:%S"),
        millis,
        size,
        status,
        method,
        path
    )
}

/// Middleware для логирования HTTP запросов
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    // Тело читается целиком, чтобы узнать реальный размер
    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            println!(
                "{}",
                format_request_line(
                    status,
                    start.elapsed().as_millis(),
                    Some(bytes.len()),
                    method.as_str(),
                    &path
                )
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(_) => {
            println!(
                "{}",
                format_request_line(status, start.elapsed().as_millis(), None, method.as_str(), &path)
            );
            Response::from_parts(parts, Body::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_line_contains_grouped_size() {
        let line = format_request_line(200, 12, Some(1234567), "GET", "/api/dashboard");
        assert!(line.contains("1.234.567"));
        assert!(line.contains("/api/dashboard"));
        assert!(line.starts_with("\x1b[36m"));
    }

    #[test]
    fn test_request_line_body_error() {
        let line = format_request_line(500, 3, None, "POST", "/api/ai-query");
        assert!(line.contains("error"));
        assert!(line.starts_with("\x1b[31m"));
    }
}
