use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const PIZZA_PREFIX: &str = "pizza_";
pub const SIZE_PREFIX: &str = "size_";
pub const DRINK_PREFIX: &str = "drink_";
pub const CALLBACK_APPROVE: &str = "order_approve";
pub const CALLBACK_RESTART: &str = "order_restart";

/// Callback code → human-readable label. Unrecognized codes map to no value;
/// rendering falls back to "Unknown".
pub const SIZES: &[(&str, &str)] = &[
  ("size_small", "Small (25cm)"),
  ("size_medium", "Medium (30cm)"),
  ("size_large", "Large (35cm)"),
  ("size_xl", "Extra Large (40cm)"),
];

pub const DRINKS: &[(&str, &str)] = &[
  ("drink_coca_cola", "Coca-Cola"),
  ("drink_pepsi", "Pepsi"),
  ("drink_orange_juice", "Orange Juice"),
  ("drink_apple_juice", "Apple Juice"),
  ("drink_water", "Water"),
  ("drink_iced_tea", "Iced Tea"),
  ("drink_none", "No drinks"),
];

pub fn size_label(code: &str) -> Option<&'static str> {
  SIZES.iter().find(|(c, _)| *c == code).map(|(_, label)| *label)
}

pub fn drink_label(code: &str) -> Option<&'static str> {
  DRINKS.iter().find(|(c, _)| *c == code).map(|(_, label)| *label)
}

/// `pizza_quattro_stagioni` → `Quattro Stagioni`
pub fn pizza_display_name(data: &str) -> String {
  data
    .strip_prefix(PIZZA_PREFIX)
    .unwrap_or(data)
    .split('_')
    .filter(|word| !word.is_empty())
    .map(title_case)
    .collect::<Vec<_>>()
    .join(" ")
}

fn title_case(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
    None => String::new(),
  }
}

/// The partially-filled purchase record for one user. Round-trips through the
/// storage port as a JSON object string; NULL and empty payloads are the empty
/// order.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Order {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pizza_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pizza_size: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub drink: Option<String>,
}

impl Order {
  pub fn is_empty(&self) -> bool {
    self.pizza_name.is_none() && self.pizza_size.is_none() && self.drink.is_none()
  }

  pub fn to_payload(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }

  pub fn from_payload(payload: Option<&str>) -> Result<Self, serde_json::Error> {
    match payload {
      None => Ok(Self::default()),
      Some(raw) if raw.is_empty() => Ok(Self::default()),
      Some(raw) => serde_json::from_str(raw),
    }
  }
}

/// The user's position in the order workflow. Forward-only except `/start`
/// and the restart branch, which reset to `WaitForPizzaName`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderState {
  WaitForPizzaName,
  WaitForPizzaSize,
  WaitForDrinks,
  WaitForOrderApprove,
  OrderFinished,
}

#[derive(Error, Debug)]
#[error("Unknown order state `{0}`")]
pub struct UnknownState(String);

impl OrderState {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::WaitForPizzaName => "WAIT_FOR_PIZZA_NAME",
      Self::WaitForPizzaSize => "WAIT_FOR_PIZZA_SIZE",
      Self::WaitForDrinks => "WAIT_FOR_DRINKS",
      Self::WaitForOrderApprove => "WAIT_FOR_ORDER_APPROVE",
      Self::OrderFinished => "ORDER_FINISHED",
    }
  }
}

impl fmt::Display for OrderState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderState {
  type Err = UnknownState;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "WAIT_FOR_PIZZA_NAME" => Ok(Self::WaitForPizzaName),
      "WAIT_FOR_PIZZA_SIZE" => Ok(Self::WaitForPizzaSize),
      "WAIT_FOR_DRINKS" => Ok(Self::WaitForDrinks),
      "WAIT_FOR_ORDER_APPROVE" => Ok(Self::WaitForOrderApprove),
      "ORDER_FINISHED" => Ok(Self::OrderFinished),
      other => Err(UnknownState(other.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn order_round_trips_through_payload() {
    let order = Order {
      pizza_name: Some("Diavola".into()),
      pizza_size: Some("Large (35cm)".into()),
      drink: Some("Water".into()),
    };
    let payload = order.to_payload().unwrap();
    assert_eq!(Order::from_payload(Some(&payload)).unwrap(), order);
  }

  #[test]
  fn missing_and_empty_payloads_parse_to_empty_order() {
    assert!(Order::from_payload(None).unwrap().is_empty());
    assert!(Order::from_payload(Some("")).unwrap().is_empty());
    assert!(Order::from_payload(Some("{}")).unwrap().is_empty());
  }

  #[test]
  fn malformed_payload_is_an_error() {
    assert!(Order::from_payload(Some("not json")).is_err());
  }

  #[test]
  fn absent_fields_stay_out_of_the_payload() {
    let order = Order { pizza_name: Some("Margherita".into()), ..Default::default() };
    assert_eq!(order.to_payload().unwrap(), r#"{"pizza_name":"Margherita"}"#);
  }

  #[test]
  fn pizza_slug_normalization() {
    assert_eq!(pizza_display_name("pizza_margherita"), "Margherita");
    assert_eq!(pizza_display_name("pizza_quattro_stagioni"), "Quattro Stagioni");
    assert_eq!(pizza_display_name("pizza_"), "");
  }

  #[test]
  fn lookup_tables_reject_unknown_codes() {
    assert_eq!(size_label("size_large"), Some("Large (35cm)"));
    assert_eq!(size_label("size_giant"), None);
    assert_eq!(drink_label("drink_none"), Some("No drinks"));
    assert_eq!(drink_label("drink_unknown_code"), None);
  }

  #[test]
  fn state_string_codec_round_trips() {
    for state in [
      OrderState::WaitForPizzaName,
      OrderState::WaitForPizzaSize,
      OrderState::WaitForDrinks,
      OrderState::WaitForOrderApprove,
      OrderState::OrderFinished,
    ] {
      assert_eq!(state.as_str().parse::<OrderState>().unwrap(), state);
    }
    assert!("WAIT_FOR_TOPPINGS".parse::<OrderState>().is_err());
  }
}
