mod ensure_user_exists;
mod message_start;
mod order_approve;
mod pizza_drinks;
mod pizza_selection;
mod pizza_size;
mod update_logger;

pub use ensure_user_exists::EnsureUserExists;
pub use message_start::MessageStart;
pub use order_approve::OrderApproval;
pub use pizza_drinks::PizzaDrinks;
pub use pizza_selection::PizzaSelection;
pub use pizza_size::PizzaSize;
pub use update_logger::UpdateLogger;
