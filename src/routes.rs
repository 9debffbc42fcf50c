use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;
use tokio::fs;
use tracing::{error, info};

use crate::{
    error::AppError,
    state::AppState,
    submissions::{ContactPayload, NewsletterPayload},
};

pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactPayload>,
) -> Result<Response, AppError> {
    let submission = payload.into_submission()?;

    info!("New contact from {} <{}>", submission.name, submission.email);
    state.contacts.append(submission).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Your message has been received. We'll get back to you within 24 hours!",
    }))
    .into_response())
}

pub async fn newsletter_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewsletterPayload>,
) -> Result<Response, AppError> {
    let subscriber = payload.into_subscriber()?;
    let email = subscriber.email.clone();

    let inserted = state
        .subscribers
        .append_if_absent(subscriber, |existing| existing.email == email)
        .await?;

    let message = if inserted {
        info!("New subscriber: {email}");
        "You're in! Thanks for subscribing."
    } else {
        "You're already subscribed!"
    };

    Ok(Json(json!({ "success": true, "message": message })).into_response())
}

pub async fn index_page(State(state): State<Arc<AppState>>) -> Response {
    serve_page(&state, "index.html").await
}

pub async fn services_page(State(state): State<Arc<AppState>>) -> Response {
    serve_page(&state, "services.html").await
}

pub async fn contact_page(State(state): State<Arc<AppState>>) -> Response {
    serve_page(&state, "contact.html").await
}

pub async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    render_not_found(&state).await
}

async fn serve_page(state: &AppState, file: &str) -> Response {
    match fs::read_to_string(state.config.public_dir.join(file)).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Missing page {file}: {e}");
            render_not_found(state).await
        }
    }
}

async fn render_not_found(state: &AppState) -> Response {
    match fs::read_to_string(state.config.public_dir.join("404.html")).await {
        Ok(page) => (StatusCode::NOT_FOUND, Html(page)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
