//! Server-rendered HTML for the web front-end.

use axum::http::StatusCode;
use domain::models::Exchange;

pub const TITLE: &str = "AI Medical Assistant";

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
textarea{width:100%;min-height:5rem}\
.answer{white-space:pre-wrap;background:#f4f6f8;padding:1rem;border-radius:4px}";

/// Escape arbitrary text for use inside an HTML element.
pub fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}

/// Full page: the question form, plus the last exchange when there is one.
pub fn render(exchange: Option<&Exchange>) -> String {
    let result = match exchange {
        Some(exchange) => format!(
            "<section>\n<h2>Question</h2>\n<p class=\"query\">{}</p>\n<h2>AI Response</h2>\n<div class=\"answer\">{}</div>\n</section>\n",
            escape(&exchange.query),
            escape(&exchange.answer)
        ),
        None => String::new(),
    };
    let previous = exchange.map(|e| escape(&e.query)).unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n<h1>{title}</h1>\n<form method=\"post\" action=\"/\">\n<label for=\"query\">Ask your medical question:</label>\n<textarea id=\"query\" name=\"query\" required>{previous}</textarea>\n<button type=\"submit\">Ask</button>\n</form>\n{result}</body>\n</html>\n",
        title = TITLE,
        style = STYLE,
        previous = previous,
        result = result
    )
}

/// Plain error page; no styling and no internal detail.
pub fn render_error(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><title>{code} {reason}</title></head>\n<body>\n<h1>{reason}</h1>\n<p>{message}</p>\n</body>\n</html>\n",
        code = status.as_u16(),
        reason = reason,
        message = escape(message)
    )
}
