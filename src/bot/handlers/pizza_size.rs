use async_trait::async_trait;

use crate::bot::handler::{DispatchContext, Handler, HandlerStatus};
use crate::bot::keyboards::drinks_keyboard;
use crate::error::BotError;
use crate::messenger::SendOptions;
use crate::order::{size_label, OrderState, SIZE_PREFIX};

pub struct PizzaSize;

#[async_trait]
impl Handler for PizzaSize {
  fn name(&self) -> &'static str {
    "pizza_size"
  }

  fn can_handle(&self, ctx: &DispatchContext<'_>) -> bool {
    ctx.state == Some(OrderState::WaitForPizzaSize)
      && ctx.callback_data().map_or(false, |data| data.starts_with(SIZE_PREFIX))
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

    let mut order = ctx.order.clone();
    order.pizza_size = size_label(data).map(str::to_owned);

    tokio::try_join!(
      ctx.storage.update_user_order(telegram_id, &order),
      ctx.storage.update_user_state(telegram_id, OrderState::WaitForDrinks),
      ctx.messenger.answer_callback_query(&query.id),
      ctx.messenger.delete_message(chat_id, prompt.message_id),
    )?;

    ctx
      .messenger
      .send_message(chat_id, "Please choose some drinks", SendOptions::markup(drinks_keyboard()))
      .await?;

    Ok(HandlerStatus::Stop)
  }
}
