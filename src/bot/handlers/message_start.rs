use async_trait::async_trait;

use crate::bot::handler::{DispatchContext, Handler, HandlerStatus};
use crate::bot::keyboards::pizza_keyboard;
use crate::error::BotError;
use crate::messenger::{ReplyMarkup, SendOptions};
use crate::order::OrderState;

/// `/start` from any state: re-entrant reset back to the top of the workflow.
pub struct MessageStart;

#[async_trait]
impl Handler for MessageStart {
  fn name(&self) -> &'static str {
    "message_start"
  }

  fn can_handle(&self, ctx: &DispatchContext<'_>) -> bool {
    matches!(&ctx.update.message, Some(message) if message.text.as_deref() == Some("/start"))
  }

  async fn handle(&self, ctx: &DispatchContext<'_>) -> Result<HandlerStatus, BotError> {
    let Some(message) = &ctx.update.message else {
      return Ok(HandlerStatus::Continue);
    };
    let Some(telegram_id) = ctx.sender_id() else {
      return Ok(HandlerStatus::Continue);
    };
    let chat_id = message.chat.id;

    ctx.storage.clear_user_state_order(telegram_id).await?;
    ctx.storage.update_user_state(telegram_id, OrderState::WaitForPizzaName).await?;

    ctx
      .messenger
      .send_message(chat_id, "🍕 Welcome to Pizza shop!😋", SendOptions::markup(ReplyMarkup::RemoveKeyboard))
      .await?;
    ctx
      .messenger
      .send_message(chat_id, "Please, choose pizza name:", SendOptions::markup(pizza_keyboard()))
      .await?;

    Ok(HandlerStatus::Stop)
  }
}
