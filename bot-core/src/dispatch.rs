//! Runs a single [`Handler`] through its before / handle / after phases.

use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::types::{Handler, HandlerResponse, Message};

/// Runs `before`, then `handle`, then `after` with the final response.
///
/// A `before` that returns false stops the message: the result is
/// [`HandlerResponse::Stop`] and neither `handle` nor `after` run.
#[instrument(skip(handler, message))]
pub async fn dispatch(handler: &dyn Handler, message: &Message) -> Result<HandlerResponse> {
    info!(
        user_id = message.user.id,
        chat_id = message.chat.id,
        message_id = %message.id,
        "step: dispatch started"
    );

    if !handler.before(message).await? {
        info!(user_id = message.user.id, "step: before returned false, message stopped");
        return Ok(HandlerResponse::Stop);
    }

    let response = handler.handle(message).await?;
    debug!(response = ?response, "Handler processed");

    handler.after(message, &response).await?;

    info!(
        user_id = message.user.id,
        chat_id = message.chat.id,
        message_id = %message.id,
        "step: dispatch finished"
    );
    Ok(response)
}
