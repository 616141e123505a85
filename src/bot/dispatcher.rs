use std::sync::Arc;
use std::time::Instant;

use crate::error::BotError;
use crate::messenger::Messenger;
use crate::models::Update;
use crate::order::Order;
use crate::storage::Storage;

use super::handler::{DispatchContext, Handler, HandlerStatus};

/// Walks the registered handler chain for every inbound update. Handlers are
/// appended once at startup and iterated read-only afterwards.
pub struct Dispatcher {
  handlers: Vec<Box<dyn Handler>>,
  storage: Arc<dyn Storage>,
  messenger: Arc<dyn Messenger>,
}

impl Dispatcher {
  pub fn new(storage: Arc<dyn Storage>, messenger: Arc<dyn Messenger>) -> Self {
    Self { handlers: vec![], storage, messenger }
  }

  pub fn add_handler<H: Handler + 'static>(&mut self, handler: H) {
    self.handlers.push(Box::new(handler));
  }

  pub async fn dispatch(&self, update: &Update) -> Result<(), BotError> {
    let started = Instant::now();
    info!("[dispatch {}] started", update.update_id);
    match self.walk(update).await {
      Ok(()) => {
        info!("[dispatch {}] finished in {:.2}ms", update.update_id, elapsed_ms(started));
        Ok(())
      }
      Err(err) => {
        error!("[dispatch {}] failed in {:.2}ms: {}", update.update_id, elapsed_ms(started), err);
        Err(err)
      }
    }
  }

  async fn walk(&self, update: &Update) -> Result<(), BotError> {
    let sender = update.sender_id();

    // Read before ensuring existence: a first-contact user must be observed
    // with no state.
    let user = match sender {
      Some(id) => self.storage.get_user(id).await?,
      None => None,
    };
    let state = user.as_ref().and_then(|user| user.state);
    let order =
      Order::from_payload(user.as_ref().and_then(|user| user.order_json.as_deref())).map_err(BotError::MalformedOrder)?;

    if let Some(id) = sender {
      self.storage.ensure_user_exists(id).await?;
    }

    let ctx = DispatchContext { update, state, order: &order, storage: &*self.storage, messenger: &*self.messenger };

    for handler in &self.handlers {
      if !handler.can_handle(&ctx) {
        continue;
      }
      debug!("[dispatch {}] {} claimed the update", update.update_id, handler.name());
      if handler.handle(&ctx).await? == HandlerStatus::Stop {
        break;
      }
    }

    Ok(())
  }
}

fn elapsed_ms(started: Instant) -> f64 {
  started.elapsed().as_secs_f64() * 1000.0
}
