use thiserror::Error;

use crate::order::UnknownState;

#[derive(Error, Debug)]
pub enum BotError {
  #[error("Telegram API: {0}")]
  Telegram(#[from] teloxide::RequestError),

  #[error("Database: {0}")]
  Mongo(#[from] mongodb::error::Error),

  #[error(transparent)]
  UnknownState(#[from] UnknownState),

  #[error("Malformed order payload: {0}")]
  MalformedOrder(#[source] serde_json::Error),

  #[error("Couldn't encode update payload: {0}")]
  EncodeUpdate(#[source] serde_json::Error),
}
