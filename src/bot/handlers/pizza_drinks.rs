use async_trait::async_trait;

use crate::bot::handler::{DispatchContext, Handler, HandlerStatus};
use crate::bot::keyboards::check_order_keyboard;
use crate::error::BotError;
use crate::messenger::{ParseMode, SendOptions};
use crate::order::{drink_label, OrderState, DRINK_PREFIX};

pub struct PizzaDrinks;

#[async_trait]
impl Handler for PizzaDrinks {
  fn name(&self) -> &'static str {
    "pizza_drinks"
  }

  fn can_handle(&self, ctx: &DispatchContext<'_>) -> bool {
    ctx.state == Some(OrderState::WaitForDrinks)
      && ctx.callback_data().map_or(false, |data| data.starts_with(DRINK_PREFIX))
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
    order.drink = drink_label(data).map(str::to_owned);

    tokio::try_join!(
      ctx.storage.update_user_order(telegram_id, &order),
      ctx.storage.update_user_state(telegram_id, OrderState::WaitForOrderApprove),
      ctx.messenger.answer_callback_query(&query.id),
      ctx.messenger.delete_message(chat_id, prompt.message_id),
    )?;

    // Re-read what actually got persisted before showing the summary.
    let persisted = ctx.storage.get_user_order(telegram_id).await?;
    let persisted = match persisted {
      Some(order) if !order.is_empty() => order,
      _ => {
        tokio::try_join!(
          ctx
            .messenger
            .send_message(chat_id, "The basket is empty! Something went wrong!", SendOptions::default()),
          ctx.storage.update_user_state(telegram_id, OrderState::WaitForPizzaName),
        )?;
        return Ok(HandlerStatus::Continue);
      }
    };

    let summary = format!(
      r#"🍕 **Your Order Summary:**

**Pizza:** {}
**Size:** {}
**Drink:** {}

Is everything correct?"#,
      persisted.pizza_name.as_deref().unwrap_or("Unknown"),
      persisted.pizza_size.as_deref().unwrap_or("Unknown"),
      persisted.drink.as_deref().unwrap_or("Unknown"),
    );

    ctx
      .messenger
      .send_message(
        chat_id,
        &summary,
        SendOptions { reply_markup: Some(check_order_keyboard()), parse_mode: Some(ParseMode::Markdown) },
      )
      .await?;

    Ok(HandlerStatus::Stop)
  }
}
