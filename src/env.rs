macro_rules! env_var {
  ($var_name: ident, $env_name: literal) => {
    pub const $var_name: &'static str = $env_name;
  };
  ($var_name: ident) => {
    pub const $var_name: &'static str = stringify!($var_name);
  };
}

env_var!(TELOXIDE_TOKEN);
env_var!(DB_URL, "DATABASE_CONNECTION_URL");
env_var!(DEFAULT_DB, "DEFAULT_DATABASE_NAME");
env_var!(RECREATE_DB);

const REQUIRED: &[&str] = &[TELOXIDE_TOKEN, DB_URL, DEFAULT_DB];

pub fn var(var: &'static str) -> Option<String> {
  dotenvy::var(var).ok()
}

pub fn flag(var: &'static str) -> bool {
  matches!(self::var(var).as_deref(), Some("1") | Some("true"))
}

pub fn check_env_vars() {
  info!("Validating .env vars");
  let missing = REQUIRED.iter().filter(|var| self::var(var).is_none()).collect::<Vec<_>>();
  if !missing.is_empty() {
    for var in &missing {
      error!("Var {} is not present", var);
    }
    panic!("Not all .env args are set");
  }
}
