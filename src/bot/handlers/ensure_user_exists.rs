use async_trait::async_trait;

use crate::bot::handler::{DispatchContext, Handler, HandlerStatus};
use crate::error::BotError;

/// Lazily creates the user row for any message that carries a sender.
pub struct EnsureUserExists;

#[async_trait]
impl Handler for EnsureUserExists {
  fn name(&self) -> &'static str {
    "ensure_user_exists"
  }

  fn can_handle(&self, ctx: &DispatchContext<'_>) -> bool {
    matches!(&ctx.update.message, Some(message) if message.from.is_some())
  }

  async fn handle(&self, ctx: &DispatchContext<'_>) -> Result<HandlerStatus, BotError> {
    let Some(telegram_id) = ctx.sender_id() else {
      return Ok(HandlerStatus::Continue);
    };
    ctx.storage.ensure_user_exists(telegram_id).await?;
    Ok(HandlerStatus::Continue)
  }
}
