use async_trait::async_trait;

use crate::error::BotError;
use crate::models::Update;
use crate::order::{Order, OrderState};

/// What the dispatcher reads before walking the chain. `state` is `None` for
/// a fresh user; `order_json` is the raw persisted payload, parsed strictly
/// by the dispatcher.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserRecord {
  pub state: Option<OrderState>,
  pub order_json: Option<String>,
}

#[async_trait]
pub trait Storage: Send + Sync {
  async fn recreate_database(&self) -> Result<(), BotError>;

  async fn ensure_user_exists(&self, telegram_id: i64) -> Result<(), BotError>;

  async fn get_user(&self, telegram_id: i64) -> Result<Option<UserRecord>, BotError>;

  async fn update_user_state(&self, telegram_id: i64, state: OrderState) -> Result<(), BotError>;

  async fn update_user_order(&self, telegram_id: i64, order: &Order) -> Result<(), BotError>;

  async fn clear_user_state_order(&self, telegram_id: i64) -> Result<(), BotError>;

  /// Lenient read: a missing user or an undecodable payload is `None`, which
  /// feeds the drinks handler's recovery branch.
  async fn get_user_order(&self, telegram_id: i64) -> Result<Option<Order>, BotError>;

  async fn persist_updates(&self, updates: &[Update]) -> Result<(), BotError>;
}
