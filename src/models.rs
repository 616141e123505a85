use serde::{Deserialize, Serialize};

/// One inbound chat event. At most one of `message` / `callback_query` is
/// populated; an update carrying neither is legal and resolves to no sender.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Update {
  pub update_id: i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<Message>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub callback_query: Option<CallbackQuery>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
  pub message_id: i32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub from: Option<Sender>,
  pub chat: Chat,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub photo: Option<Vec<PhotoSize>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CallbackQuery {
  pub id: String,
  pub from: Sender,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<CallbackMessage>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data: Option<String>,
}

/// The message a callback query's keyboard was attached to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CallbackMessage {
  pub message_id: i32,
  pub chat: Chat,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Sender {
  pub id: i64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Chat {
  pub id: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PhotoSize {
  pub file_id: String,
}

impl Update {
  pub fn sender_id(&self) -> Option<i64> {
    match (&self.message, &self.callback_query) {
      (Some(msg), _) => msg.from.as_ref().map(|from| from.id),
      (_, Some(query)) => Some(query.from.id),
      _ => None,
    }
  }

  pub fn callback_data(&self) -> Option<&str> {
    self.callback_query.as_ref().and_then(|query| query.data.as_deref())
  }
}
