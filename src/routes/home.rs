//! Status page handler.
//!
//! Builds the page markup for the requesting host, runs the page script's
//! ready sequence on it and renders the result through the layout template.

use axum::{extract::State, response::Html};
use axum_extra::extract::{rejection::HostRejection, Host};
use tracing::instrument;

use crate::error::AppError;
use crate::markup::status_page;
use crate::page::Page;
use crate::script::PageScript;
use crate::state::AppState;
use crate::templates::INDEX_TEMPLATE;

/// Hostname used when the request names no usable host
pub const FALLBACK_HOSTNAME: &str = "localhost";

/// Hostname part of a request host: port removed, lowercased.
pub fn hostname_from_host(host: &str) -> String {
    let host = host.trim();
    let hostname = if let Some(rest) = host.strip_prefix('[') {
        // IPv6 literal, e.g. [::1]:8080
        rest.split(']').next().unwrap_or_default()
    } else {
        host.split(':').next().unwrap_or_default()
    };
    if hostname.is_empty() {
        FALLBACK_HOSTNAME.to_string()
    } else {
        hostname.to_ascii_lowercase()
    }
}

/// Render the status page as the given host would see it after the ready sequence.
pub fn render_status_page(state: &AppState, hostname: &str) -> Result<String, AppError> {
    let document = status_page(hostname, state.config.page.environment_override.as_deref());
    let mut page = Page::new(document);
    PageScript::new(state.build.as_ref().clone()).prerender(&mut page);

    let document = &page.document;
    let mut context = tera::Context::new();
    context.insert("title", &state.config.page.title);
    context.insert("head", &document.inner_html(document.head()));
    context.insert("body", &document.outer_html(document.body()));

    Ok(state.tera.render(INDEX_TEMPLATE, &context)?)
}

#[instrument(name = "home::index", skip_all)]
pub async fn index(
    State(state): State<AppState>,
    host: Result<Host, HostRejection>,
) -> Result<Html<String>, AppError> {
    let hostname = match host {
        Ok(Host(host)) => hostname_from_host(&host),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Request names no host, using fallback");
            FALLBACK_HOSTNAME.to_string()
        }
    };
    tracing::debug!(hostname = %hostname, "Rendering status page");
    let html = render_status_page(&state, &hostname)?;
    Ok(Html(html))
}
