use async_trait::async_trait;

use crate::bot::handler::{DispatchContext, Handler, HandlerStatus};
use crate::bot::keyboards::pizza_keyboard;
use crate::error::BotError;
use crate::messenger::{ParseMode, SendOptions};
use crate::order::{OrderState, CALLBACK_APPROVE, CALLBACK_RESTART};

/// Final step: the summary keyboard was answered with approve or restart.
pub struct OrderApproval;

#[async_trait]
impl Handler for OrderApproval {
  fn name(&self) -> &'static str {
    "order_approve"
  }

  fn can_handle(&self, ctx: &DispatchContext<'_>) -> bool {
    ctx.state == Some(OrderState::WaitForOrderApprove)
      && matches!(ctx.callback_data(), Some(CALLBACK_APPROVE) | Some(CALLBACK_RESTART))
  }

  async fn handle(&self, ctx: &DispatchContext<'_>) -> Result<HandlerStatus, BotError> {
    let Some((query, prompt)) = ctx.callback_with_message() else {
      return Ok(HandlerStatus::Continue);
    };
    let telegram_id = query.from.id;
    let chat_id = prompt.chat.id;

    tokio::try_join!(
      ctx.messenger.answer_callback_query(&query.id),
      ctx.messenger.delete_message(chat_id, prompt.message_id),
    )?;

    match query.data.as_deref() {
      Some(CALLBACK_APPROVE) => {
        ctx.storage.update_user_state(telegram_id, OrderState::OrderFinished).await?;

        let confirmation = format!(
          r#"✅ **Order Confirmed!**
🍕 **Your Order:**
• Pizza: {}
• Size: {}
• Drink: {}

Thank you for your order! Your pizza will be ready soon.

Send /start to place another order."#,
          ctx.order.pizza_name.as_deref().unwrap_or("Unknown"),
          ctx.order.pizza_size.as_deref().unwrap_or("Unknown"),
          ctx.order.drink.as_deref().unwrap_or("Unknown"),
        );

        ctx
          .messenger
          .send_message(chat_id, &confirmation, SendOptions { reply_markup: None, parse_mode: Some(ParseMode::Markdown) })
          .await?;
      }
      Some(CALLBACK_RESTART) => {
        ctx.storage.clear_user_state_order(telegram_id).await?;
        ctx.storage.update_user_state(telegram_id, OrderState::WaitForPizzaName).await?;

        ctx
          .messenger
          .send_message(chat_id, "Please choose pizza type", SendOptions::markup(pizza_keyboard()))
          .await?;
      }
      _ => return Ok(HandlerStatus::Continue),
    }

    Ok(HandlerStatus::Stop)
  }
}
