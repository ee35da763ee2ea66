use crate::api::AppState;
use crate::api::middleware::JsonBody;
use crate::api::schemas::messages::{MessageResponse, SubmitMessageRequest, SubmitMessageResponse};
use crate::error::Result;
use axum::{
    Json,
    extract::{Path, State},
};

/// Stores a message for a recipient and returns its id.
///
/// # Errors
/// Returns `AppError::Validation` if recipient or content is missing or empty.
/// Returns `AppError::Storage` if the message cannot be stored.
pub async fn submit_message(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SubmitMessageRequest>,
) -> Result<Json<SubmitMessageResponse>> {
    let id = state.message_service.submit(request.recipient, request.sender, request.content, request.image).await?;

    Ok(Json(SubmitMessageResponse { id }))
}

/// Lists every message for a recipient, newest first.
///
/// # Errors
/// Returns `AppError::Storage` if the messages cannot be read.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(recipient): Path<String>,
) -> Result<Json<Vec<MessageResponse>>> {
    let messages = state.message_service.list_for_recipient(&recipient).await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
