use async_trait::async_trait;
use teloxide::{
  payloads::SendMessageSetters,
  requests::Requester,
  types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardRemove, MessageId, Update as TgUpdate, UpdateKind,
  },
  Bot,
};

use crate::error::BotError;
use crate::messenger::{MessageRef, Messenger, ParseMode, ReplyMarkup, SendOptions};
use crate::models::{CallbackMessage, CallbackQuery, Chat, Message, PhotoSize, Sender, Update};

/// Maps a transport update onto the core inbound model. Kinds the workflow
/// doesn't know about become an empty update: it still reaches the event
/// logger but resolves to no sender.
pub fn into_inbound(update: &TgUpdate) -> Update {
  let mut inbound = Update { update_id: update.id as i64, message: None, callback_query: None };

  match &update.kind {
    UpdateKind::Message(message) => {
      inbound.message = Some(Message {
        message_id: message.id.0,
        from: message.from().map(|user| Sender { id: user.id.0 as i64 }),
        chat: Chat { id: message.chat.id.0 },
        text: message.text().map(str::to_owned),
        photo: message
          .photo()
          .map(|sizes| sizes.iter().map(|size| PhotoSize { file_id: size.file.id.clone() }).collect()),
      });
    }
    UpdateKind::CallbackQuery(query) => {
      inbound.callback_query = Some(CallbackQuery {
        id: query.id.clone(),
        from: Sender { id: query.from.id.0 as i64 },
        message: query
          .message
          .as_ref()
          .map(|message| CallbackMessage { message_id: message.id.0, chat: Chat { id: message.chat.id.0 } }),
        data: query.data.clone(),
      });
    }
    _ => {}
  }

  inbound
}

pub struct TelegramMessenger {
  bot: Bot,
}

impl TelegramMessenger {
  pub fn new(bot: Bot) -> Self {
    Self { bot }
  }
}

#[async_trait]
impl Messenger for TelegramMessenger {
  async fn send_message(&self, chat_id: i64, text: &str, options: SendOptions) -> Result<MessageRef, BotError> {
    let mut request = self.bot.send_message(ChatId(chat_id), text);
    if let Some(mode) = options.parse_mode {
      request = request.parse_mode(mode.into());
    }
    if let Some(markup) = options.reply_markup {
      request = request.reply_markup(teloxide::types::ReplyMarkup::from(markup));
    }
    let sent = request.await?;
    Ok(MessageRef { chat_id, message_id: sent.id.0 })
  }

  async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), BotError> {
    self.bot.delete_message(ChatId(chat_id), MessageId(message_id)).await?;
    Ok(())
  }

  async fn answer_callback_query(&self, callback_id: &str) -> Result<(), BotError> {
    self.bot.answer_callback_query(callback_id.to_owned()).await?;
    Ok(())
  }
}

impl From<ReplyMarkup> for teloxide::types::ReplyMarkup {
  fn from(markup: ReplyMarkup) -> Self {
    match markup {
      ReplyMarkup::Inline(rows) => {
        let rows = rows
          .into_iter()
          .map(|row| row.into_iter().map(|b| InlineKeyboardButton::callback(b.text, b.callback_data)));
        Self::InlineKeyboard(InlineKeyboardMarkup::new(rows))
      }
      ReplyMarkup::RemoveKeyboard => Self::KeyboardRemove(KeyboardRemove::new()),
    }
  }
}

#[allow(deprecated)]
impl From<ParseMode> for teloxide::types::ParseMode {
  fn from(mode: ParseMode) -> Self {
    match mode {
      ParseMode::Markdown => Self::Markdown,
      ParseMode::Html => Self::Html,
    }
  }
}
