use async_trait::async_trait;

use crate::error::BotError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMode {
  Markdown,
  Html,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
  pub text: String,
  pub callback_data: String,
}

impl Button {
  pub fn new<T: Into<String>, D: Into<String>>(text: T, callback_data: D) -> Self {
    Self { text: text.into(), callback_data: callback_data.into() }
  }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReplyMarkup {
  Inline(Vec<Vec<Button>>),
  RemoveKeyboard,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SendOptions {
  pub reply_markup: Option<ReplyMarkup>,
  pub parse_mode: Option<ParseMode>,
}

impl SendOptions {
  pub fn markup(markup: ReplyMarkup) -> Self {
    Self { reply_markup: Some(markup), ..Default::default() }
  }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MessageRef {
  pub chat_id: i64,
  pub message_id: i32,
}

#[async_trait]
pub trait Messenger: Send + Sync {
  async fn send_message(&self, chat_id: i64, text: &str, options: SendOptions) -> Result<MessageRef, BotError>;

  async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), BotError>;

  async fn answer_callback_query(&self, callback_id: &str) -> Result<(), BotError>;
}
