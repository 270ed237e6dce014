//! Request logging middleware

use super::super::ServerConfig;
use axum::extract::State;
use axum::{
    body::Body,
    http::{header::HeaderMap, Request, Response, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use std::time::Instant;
use tracing::{error, info};

#[derive(PartialEq, PartialOrd, Clone, Debug, Default, clap::ValueEnum)]
pub enum RequestsLoggingLevel {
    None,
    #[default]
    Path,
    Headers,
    Body,
}

impl std::fmt::Display for RequestsLoggingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

const MAX_LOGGABLE_BODY_LENGTH: usize = 1024;

enum ContentLengthParseResult {
    Ok(usize),
    No(&'static str),
}

fn parse_content_length(headers: &HeaderMap) -> ContentLengthParseResult {
    let value = match headers.get("content-length") {
        Some(x) => x,
        None => return ContentLengthParseResult::No("Content-length not set."),
    };

    let str_value = match value.to_str() {
        Ok(x) => x,
        Err(_) => {
            return ContentLengthParseResult::No("Could not get Content-length string value.")
        }
    };

    match str_value.parse::<usize>() {
        Ok(x) => ContentLengthParseResult::Ok(x),
        Err(_) => ContentLengthParseResult::No("Could not parse Content-length numeric value."),
    }
}

fn log_headers(label: &str, headers: &HeaderMap) {
    info!("  {} Headers:", label);
    for (name, value) in headers.iter() {
        if name == "authorization" {
            info!("    {:?}: <redacted>", name);
        } else {
            info!("    {:?}: {:?}", name, value);
        }
    }
}

/// Logs a small body and hands back an equivalent one, since reading it
/// consumes the original.
async fn log_body(label: &str, headers: &HeaderMap, body: Body) -> Result<Body, StatusCode> {
    match parse_content_length(headers) {
        ContentLengthParseResult::No(reason) => {
            info!("  {} Body: {}", label, reason);
            Ok(body)
        }
        ContentLengthParseResult::Ok(size) if size < MAX_LOGGABLE_BODY_LENGTH => {
            let bytes = axum::body::to_bytes(body, size).await.map_err(|err| {
                error!("Failed to read {} body: {:?}", label, err);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
            info!("  {} Body:\n{}", label, String::from_utf8_lossy(&bytes));
            Ok(Body::from(bytes))
        }
        ContentLengthParseResult::Ok(size) => {
            info!(
                "  {} Body: Too big to log ({:#})",
                label,
                byte_unit::Byte::from(size)
            );
            Ok(body)
        }
    }
}

pub async fn log_requests(
    State(config): State<ServerConfig>,
    mut request: Request<Body>,
    next: Next,
) -> axum::response::Response {
    let level = config.requests_logging_level;
    let start = Instant::now();

    if level > RequestsLoggingLevel::None {
        info!(">>> {} {}", request.method(), request.uri());
    }

    if level >= RequestsLoggingLevel::Headers {
        log_headers("Req", request.headers());
    }

    if level >= RequestsLoggingLevel::Body {
        let (parts, body) = request.into_parts();
        let body = match log_body("Req", &parts.headers, body).await {
            Ok(body) => body,
            Err(status) => return status.into_response(),
        };
        request = Request::from_parts(parts, body);
    }

    let mut response = next.run(request).await;

    if level >= RequestsLoggingLevel::Headers {
        log_headers("Resp", response.headers());
    }

    if level >= RequestsLoggingLevel::Body {
        let (parts, body) = response.into_parts();
        let body = match log_body("Resp", &parts.headers, body).await {
            Ok(body) => body,
            Err(status) => return status.into_response(),
        };
        response = Response::from_parts(parts, body);
    }

    if level > RequestsLoggingLevel::None {
        info!(
            "<<< {} ({}ms)",
            response.status().as_u16(),
            start.elapsed().as_millis()
        );
    }

    response
}
