use async_trait::async_trait;

use crate::bot::handler::{DispatchContext, Handler, HandlerStatus};
use crate::bot::keyboards::size_keyboard;
use crate::error::BotError;
use crate::messenger::SendOptions;
use crate::order::{pizza_display_name, Order, OrderState, PIZZA_PREFIX};

/// First workflow step: a pizza was picked off the inline menu.
pub struct PizzaSelection;

#[async_trait]
impl Handler for PizzaSelection {
  fn name(&self) -> &'static str {
    "pizza_selection"
  }

  fn can_handle(&self, ctx: &DispatchContext<'_>) -> bool {
    ctx.state == Some(OrderState::WaitForPizzaName)
      && ctx.callback_data().map_or(false, |data| data.starts_with(PIZZA_PREFIX))
  }

  async fn handle(&self, ctx: &DispatchContext<'_>) -> Result<HandlerStatus, BotError> {
    let Some((query, prompt)) = ctx.callback_with_message() else {
      return Ok(HandlerStatus::Continue);
    };
    let Some(data) = query.data.as_deref() else {
      return Ok(HandlerStatus::Continue);
    };
    let telegram_id = query.from.id;
    let chat_id = prompt.chat.id;

    // A fresh pick starts a fresh order.
    let order = Order { pizza_name: Some(pizza_display_name(data)), ..Default::default() };

    tokio::try_join!(
      ctx.storage.update_user_order(telegram_id, &order),
      ctx.storage.update_user_state(telegram_id, OrderState::WaitForPizzaSize),
      ctx.messenger.answer_callback_query(&query.id),
      ctx.messenger.delete_message(chat_id, prompt.message_id),
    )?;

    ctx
      .messenger
      .send_message(chat_id, "📐 Please, select pizza size:", SendOptions::markup(size_keyboard()))
      .await?;

    Ok(HandlerStatus::Stop)
  }
}
