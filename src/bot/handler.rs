use async_trait::async_trait;

use crate::error::BotError;
use crate::messenger::Messenger;
use crate::models::{CallbackMessage, CallbackQuery, Update};
use crate::order::{Order, OrderState};
use crate::storage::Storage;

/// Short-circuit signal: `Stop` ends the chain walk for this update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerStatus {
  Continue,
  Stop,
}

/// Everything a handler may look at for one update. State and order are the
/// values resolved by the dispatcher before the walk; mutations go through
/// the ports.
pub struct DispatchContext<'a> {
  pub update: &'a Update,
  pub state: Option<OrderState>,
  pub order: &'a Order,
  pub storage: &'a dyn Storage,
  pub messenger: &'a dyn Messenger,
}

impl<'a> DispatchContext<'a> {
  pub fn sender_id(&self) -> Option<i64> {
    self.update.sender_id()
  }

  pub fn callback_data(&self) -> Option<&str> {
    self.update.callback_data()
  }

  /// A callback query together with the message its keyboard hangs off.
  /// Handlers that ack/delete need both.
  pub fn callback_with_message(&self) -> Option<(&CallbackQuery, &CallbackMessage)> {
    let query = self.update.callback_query.as_ref()?;
    let message = query.message.as_ref()?;
    Some((query, message))
  }
}

#[async_trait]
pub trait Handler: Send + Sync {
  fn name(&self) -> &'static str;

  /// Pure predicate; must not mutate anything.
  fn can_handle(&self, ctx: &DispatchContext<'_>) -> bool;

  async fn handle(&self, ctx: &DispatchContext<'_>) -> Result<HandlerStatus, BotError>;
}
