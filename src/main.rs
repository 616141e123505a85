use teloxide::Bot;

use pizza_bot::storage::Storage;
use pizza_bot::{bot, db, env};

#[tokio::main]
async fn main() {
  init();
  let storage = db::MongoStorage::init().await.expect("Couldn't connect to database");
  if env::flag(env::RECREATE_DB) {
    storage.recreate_database().await.expect("Couldn't recreate database schema");
  }
  let bot = Bot::from_env();
  bot::start(bot, storage).await
}

fn init() {
  dotenvy::dotenv().ok();
  pretty_env_logger::init();
  env::check_env_vars();
}
