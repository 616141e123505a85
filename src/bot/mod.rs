use std::sync::Arc;

use teloxide::{
  dispatching::UpdateHandler,
  dptree as dp,
  macros::BotCommands,
  requests::Requester,
  types::Update as TgUpdate,
  utils::command::BotCommands as _,
  Bot,
};

use crate::db::MongoStorage;
use crate::error::BotError;
use crate::messenger::Messenger;
use crate::storage::Storage;

use self::dispatcher::Dispatcher;
use self::handlers::{EnsureUserExists, MessageStart, OrderApproval, PizzaDrinks, PizzaSelection, PizzaSize, UpdateLogger};
use self::telegram::TelegramMessenger;

pub mod dispatcher;
pub mod handler;
pub mod handlers;
pub mod keyboards;
pub mod telegram;

pub type BotResult = Result<(), BotError>;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "snake_case")]
pub enum Command {
  #[command(description = "Start a new pizza order")]
  Start,
}

pub async fn start(bot: Bot, storage: MongoStorage) {
  bot
    .set_my_commands(Command::bot_commands())
    .await
    .expect("Couldn't set bot commands");

  let me = bot.get_me().await.expect("Login error");

  bot.delete_webhook().await.expect("Couldn't delete webhook");
  info!("Logged in as {} [@{}]", me.full_name(), me.username());

  let messenger = TelegramMessenger::new(bot.clone());
  let engine = Arc::new(build_dispatcher(Arc::new(storage), Arc::new(messenger)));
  info!("Started");

  teloxide::dispatching::Dispatcher::builder(bot, dispatch_scheme())
    .dependencies(dp::deps![engine])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

/// The chain, in order. The raw-event logger goes first so no `Stop` can
/// skip it; the state-specific handlers follow the workflow order.
pub fn build_dispatcher(storage: Arc<dyn Storage>, messenger: Arc<dyn Messenger>) -> Dispatcher {
  let mut dispatcher = Dispatcher::new(storage, messenger);
  dispatcher.add_handler(UpdateLogger);
  dispatcher.add_handler(EnsureUserExists);
  dispatcher.add_handler(MessageStart);
  dispatcher.add_handler(PizzaSelection);
  dispatcher.add_handler(PizzaSize);
  dispatcher.add_handler(PizzaDrinks);
  dispatcher.add_handler(OrderApproval);
  dispatcher
}

fn dispatch_scheme() -> UpdateHandler<BotError> {
  dp::entry().endpoint(route_update)
}

async fn route_update(update: TgUpdate, engine: Arc<Dispatcher>) -> BotResult {
  let inbound = telegram::into_inbound(&update);
  engine.dispatch(&inbound).await
}
