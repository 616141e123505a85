use crate::messenger::{Button, ReplyMarkup};
use crate::order::{CALLBACK_APPROVE, CALLBACK_RESTART, DRINKS, SIZES};

pub fn pizza_keyboard() -> ReplyMarkup {
  ReplyMarkup::Inline(vec![
    vec![Button::new("Margherita", "pizza_margherita"), Button::new("Pepperoni", "pizza_pepperoni")],
    vec![Button::new("Quattro Stagioni", "pizza_quattro_stagioni"), Button::new("Capricciosa", "pizza_capricciosa")],
    vec![Button::new("Diavola", "pizza_diavola"), Button::new("Prosciutto", "pizza_prosciutto")],
  ])
}

pub fn size_keyboard() -> ReplyMarkup {
  from_table(SIZES)
}

pub fn drinks_keyboard() -> ReplyMarkup {
  from_table(DRINKS)
}

pub fn check_order_keyboard() -> ReplyMarkup {
  ReplyMarkup::Inline(vec![vec![
    Button::new("✅ Ok", CALLBACK_APPROVE),
    Button::new("🔄 Start again", CALLBACK_RESTART),
  ]])
}

/// Two buttons per row; an odd trailing entry gets a row of its own.
fn from_table(table: &[(&str, &str)]) -> ReplyMarkup {
  let rows = table
    .chunks(2)
    .map(|chunk| chunk.iter().map(|(code, label)| Button::new(*label, *code)).collect())
    .collect();
  ReplyMarkup::Inline(rows)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn callback_codes(markup: ReplyMarkup) -> Vec<String> {
    match markup {
      ReplyMarkup::Inline(rows) => rows.into_iter().flatten().map(|b| b.callback_data).collect(),
      ReplyMarkup::RemoveKeyboard => vec![],
    }
  }

  #[test]
  fn pizza_keyboard_codes_match_the_callback_prefix() {
    let codes = callback_codes(pizza_keyboard());
    assert_eq!(codes.len(), 6);
    assert!(codes.iter().all(|code| code.starts_with("pizza_")));
  }

  #[test]
  fn drinks_keyboard_covers_the_whole_table() {
    assert_eq!(callback_codes(drinks_keyboard()).len(), DRINKS.len());
  }

  #[test]
  fn check_order_keyboard_offers_approve_and_restart() {
    assert_eq!(callback_codes(check_order_keyboard()), vec![CALLBACK_APPROVE, CALLBACK_RESTART]);
  }
}
