//! In-memory ports and fixtures shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use pizza_bot::error::BotError;
use pizza_bot::messenger::{MessageRef, Messenger, SendOptions};
use pizza_bot::models::{CallbackMessage, CallbackQuery, Chat, Message, Sender, Update};
use pizza_bot::order::{Order, OrderState};
use pizza_bot::storage::{Storage, UserRecord};

pub const UPDATE_ID: i64 = 123456789;

pub fn text_message(user_id: i64, chat_id: i64, text: &str) -> Update {
  Update {
    update_id: UPDATE_ID,
    message: Some(Message {
      message_id: 1,
      from: Some(Sender { id: user_id }),
      chat: Chat { id: chat_id },
      text: Some(text.to_string()),
      photo: None,
    }),
    callback_query: None,
  }
}

pub fn anonymous_message(chat_id: i64, text: &str) -> Update {
  Update {
    update_id: UPDATE_ID,
    message: Some(Message {
      message_id: 1,
      from: None,
      chat: Chat { id: chat_id },
      text: Some(text.to_string()),
      photo: None,
    }),
    callback_query: None,
  }
}

pub fn callback(user_id: i64, chat_id: i64, message_id: i32, data: &str) -> Update {
  Update {
    update_id: UPDATE_ID,
    message: None,
    callback_query: Some(CallbackQuery {
      id: "123".to_string(),
      from: Sender { id: user_id },
      message: Some(CallbackMessage { message_id, chat: Chat { id: chat_id } }),
      data: Some(data.to_string()),
    }),
  }
}

#[derive(Default, Clone)]
pub struct StoredUser {
  pub state: Option<String>,
  pub order_json: Option<String>,
}

/// Storage port over a hash map. Writes mirror the SQL semantics of the
/// production store: updates against a missing user are silent no-ops.
#[derive(Default)]
pub struct MemoryStorage {
  users: Mutex<HashMap<i64, StoredUser>>,
  events: Mutex<Vec<String>>,
  ensure_calls: AtomicUsize,
}

impl MemoryStorage {
  pub fn seed_user(&self, telegram_id: i64, state: Option<&str>, order_json: Option<&str>) {
    self.users.lock().unwrap().insert(
      telegram_id,
      StoredUser { state: state.map(str::to_owned), order_json: order_json.map(str::to_owned) },
    );
  }

  pub fn has_user(&self, telegram_id: i64) -> bool {
    self.users.lock().unwrap().contains_key(&telegram_id)
  }

  pub fn user_count(&self) -> usize {
    self.users.lock().unwrap().len()
  }

  pub fn state_of(&self, telegram_id: i64) -> Option<String> {
    self.users.lock().unwrap().get(&telegram_id).and_then(|user| user.state.clone())
  }

  pub fn order_json_of(&self, telegram_id: i64) -> Option<String> {
    self.users.lock().unwrap().get(&telegram_id).and_then(|user| user.order_json.clone())
  }

  pub fn events(&self) -> Vec<String> {
    self.events.lock().unwrap().clone()
  }

  pub fn ensure_calls(&self) -> usize {
    self.ensure_calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl Storage for MemoryStorage {
  async fn recreate_database(&self) -> Result<(), BotError> {
    self.users.lock().unwrap().clear();
    self.events.lock().unwrap().clear();
    Ok(())
  }

  async fn ensure_user_exists(&self, telegram_id: i64) -> Result<(), BotError> {
    self.ensure_calls.fetch_add(1, Ordering::SeqCst);
    self.users.lock().unwrap().entry(telegram_id).or_default();
    Ok(())
  }

  async fn get_user(&self, telegram_id: i64) -> Result<Option<UserRecord>, BotError> {
    let users = self.users.lock().unwrap();
    let user = match users.get(&telegram_id) {
      Some(user) => user,
      None => return Ok(None),
    };
    let state = user.state.as_deref().map(str::parse::<OrderState>).transpose()?;
    Ok(Some(UserRecord { state, order_json: user.order_json.clone() }))
  }

  async fn update_user_state(&self, telegram_id: i64, state: OrderState) -> Result<(), BotError> {
    if let Some(user) = self.users.lock().unwrap().get_mut(&telegram_id) {
      user.state = Some(state.as_str().to_string());
    }
    Ok(())
  }

  async fn update_user_order(&self, telegram_id: i64, order: &Order) -> Result<(), BotError> {
    let payload = order.to_payload().map_err(BotError::MalformedOrder)?;
    if let Some(user) = self.users.lock().unwrap().get_mut(&telegram_id) {
      user.order_json = Some(payload);
    }
    Ok(())
  }

  async fn clear_user_state_order(&self, telegram_id: i64) -> Result<(), BotError> {
    if let Some(user) = self.users.lock().unwrap().get_mut(&telegram_id) {
      user.state = None;
      user.order_json = None;
    }
    Ok(())
  }

  async fn get_user_order(&self, telegram_id: i64) -> Result<Option<Order>, BotError> {
    let order = self
      .users
      .lock()
      .unwrap()
      .get(&telegram_id)
      .and_then(|user| user.order_json.clone())
      .and_then(|raw| serde_json::from_str(&raw).ok());
    Ok(order)
  }

  async fn persist_updates(&self, updates: &[Update]) -> Result<(), BotError> {
    let mut events = self.events.lock().unwrap();
    for update in updates {
      events.push(serde_json::to_string(update).map_err(BotError::EncodeUpdate)?);
    }
    Ok(())
  }
}

#[derive(Clone, Debug)]
pub struct SentMessage {
  pub chat_id: i64,
  pub text: String,
  pub options: SendOptions,
}

/// Messenger port that records every outbound call.
#[derive(Default)]
pub struct RecordingMessenger {
  sent: Mutex<Vec<SentMessage>>,
  deleted: Mutex<Vec<(i64, i32)>>,
  answered: Mutex<Vec<String>>,
  next_message_id: AtomicUsize,
}

impl RecordingMessenger {
  pub fn sent(&self) -> Vec<SentMessage> {
    self.sent.lock().unwrap().clone()
  }

  pub fn deleted(&self) -> Vec<(i64, i32)> {
    self.deleted.lock().unwrap().clone()
  }

  pub fn answered(&self) -> Vec<String> {
    self.answered.lock().unwrap().clone()
  }
}

#[async_trait]
impl Messenger for RecordingMessenger {
  async fn send_message(&self, chat_id: i64, text: &str, options: SendOptions) -> Result<MessageRef, BotError> {
    self.sent.lock().unwrap().push(SentMessage { chat_id, text: text.to_string(), options });
    let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst) as i32 + 100;
    Ok(MessageRef { chat_id, message_id })
  }

  async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), BotError> {
    self.deleted.lock().unwrap().push((chat_id, message_id));
    Ok(())
  }

  async fn answer_callback_query(&self, callback_id: &str) -> Result<(), BotError> {
    self.answered.lock().unwrap().push(callback_id.to_string());
    Ok(())
  }
}
