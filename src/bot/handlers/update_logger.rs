use async_trait::async_trait;

use crate::bot::handler::{DispatchContext, Handler, HandlerStatus};
use crate::error::BotError;

/// Appends every raw update to the event log. Registered ahead of all
/// short-circuiting handlers so nothing can skip it.
pub struct UpdateLogger;

#[async_trait]
impl Handler for UpdateLogger {
  fn name(&self) -> &'static str {
    "update_logger"
  }

  fn can_handle(&self, _ctx: &DispatchContext<'_>) -> bool {
    true
  }

  async fn handle(&self, ctx: &DispatchContext<'_>) -> Result<HandlerStatus, BotError> {
    ctx.storage.persist_updates(std::slice::from_ref(ctx.update)).await?;
    Ok(HandlerStatus::Continue)
  }
}
