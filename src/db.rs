use std::ops::Deref;

use async_trait::async_trait;
use mongodb::{
  bson::{doc, Bson, DateTime},
  options::{ClientOptions, IndexOptions},
  Collection, IndexModel,
};
use serde::{Deserialize, Serialize};

use crate::env;
use crate::error::BotError;
use crate::models::Update;
use crate::order::{Order, OrderState};
use crate::storage::{Storage, UserRecord};

pub type Mongo = mongodb::Client;
pub type MongoError = mongodb::error::Error;

#[derive(Serialize, Deserialize, Clone)]
struct UserDoc {
  telegram_id: i64,
  created_at: DateTime,
  state: Option<String>,
  order_json: Option<String>,
}

impl UserDoc {
  fn new(telegram_id: i64) -> Self {
    Self { telegram_id, created_at: DateTime::now(), state: None, order_json: None }
  }
}

#[derive(Serialize, Deserialize)]
struct EventDoc {
  payload: String,
  received_at: DateTime,
}

#[derive(Clone)]
pub struct MongoStorage {
  mongo: Mongo,
  users: Collection<UserDoc>,
  events: Collection<EventDoc>,
}

impl Deref for MongoStorage {
  type Target = Mongo;

  fn deref(&self) -> &Self::Target {
    &self.mongo
  }
}

impl MongoStorage {
  pub async fn init() -> Result<Self, MongoError> {
    let url = env::var(env::DB_URL).unwrap();
    info!("Connecting to database");
    let mut opts = ClientOptions::parse(url).await?;
    opts.app_name = Some("pizza-bot".into());
    opts.default_database = Some(env::var(env::DEFAULT_DB).unwrap());
    let mongo = Mongo::with_options(opts)?;
    let db = mongo.default_database().unwrap();
    let users = db.collection("users");
    let events = db.collection("telegram_events");
    Ok(Self { mongo, users, events })
  }

  async fn find_user(&self, telegram_id: i64) -> Result<Option<UserDoc>, MongoError> {
    self.users.find_one(doc! { "telegram_id": telegram_id }, None).await
  }
}

#[async_trait]
impl Storage for MongoStorage {
  async fn recreate_database(&self) -> Result<(), BotError> {
    warn!("Recreating database schema");
    self.users.drop(None).await?;
    self.events.drop(None).await?;
    let unique_id = IndexModel::builder()
      .keys(doc! { "telegram_id": 1 })
      .options(IndexOptions::builder().unique(true).build())
      .build();
    self.users.create_index(unique_id, None).await?;
    Ok(())
  }

  async fn ensure_user_exists(&self, telegram_id: i64) -> Result<(), BotError> {
    if self.find_user(telegram_id).await?.is_some() {
      return Ok(());
    }
    info!("New user with id {}", telegram_id);
    self.users.insert_one(UserDoc::new(telegram_id), None).await?;
    Ok(())
  }

  async fn get_user(&self, telegram_id: i64) -> Result<Option<UserRecord>, BotError> {
    let user = match self.find_user(telegram_id).await? {
      Some(user) => user,
      None => return Ok(None),
    };
    let state = user.state.as_deref().map(str::parse::<OrderState>).transpose()?;
    Ok(Some(UserRecord { state, order_json: user.order_json }))
  }

  async fn update_user_state(&self, telegram_id: i64, state: OrderState) -> Result<(), BotError> {
    self
      .users
      .update_one(doc! { "telegram_id": telegram_id }, doc! { "$set": { "state": state.as_str() } }, None)
      .await?;
    Ok(())
  }

  async fn update_user_order(&self, telegram_id: i64, order: &Order) -> Result<(), BotError> {
    let payload = order.to_payload().map_err(BotError::MalformedOrder)?;
    self
      .users
      .update_one(doc! { "telegram_id": telegram_id }, doc! { "$set": { "order_json": payload } }, None)
      .await?;
    Ok(())
  }

  async fn clear_user_state_order(&self, telegram_id: i64) -> Result<(), BotError> {
    self
      .users
      .update_one(
        doc! { "telegram_id": telegram_id },
        doc! { "$set": { "state": Bson::Null, "order_json": Bson::Null } },
        None,
      )
      .await?;
    Ok(())
  }

  async fn get_user_order(&self, telegram_id: i64) -> Result<Option<Order>, BotError> {
    let order = self
      .find_user(telegram_id)
      .await?
      .and_then(|user| user.order_json)
      .and_then(|raw| serde_json::from_str(&raw).ok());
    Ok(order)
  }

  async fn persist_updates(&self, updates: &[Update]) -> Result<(), BotError> {
    if updates.is_empty() {
      return Ok(());
    }
    let docs = updates
      .iter()
      .map(|update| {
        let payload = serde_json::to_string(update).map_err(BotError::EncodeUpdate)?;
        Ok(EventDoc { payload, received_at: DateTime::now() })
      })
      .collect::<Result<Vec<_>, BotError>>()?;
    self.events.insert_many(docs, None).await?;
    Ok(())
  }
}
