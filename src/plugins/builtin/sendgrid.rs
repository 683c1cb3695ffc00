//! `/sendgrid [account]` - today's SendGrid statistics for an account
//!
//! Config document:
//!
//! ```yaml
//! login: default-user        # used when no account is named
//! password: default-secret
//! accountA:
//!   login: a-user
//!   password: a-secret
//! api-url: https://sendgrid.com/api/stats.get.json   # optional
//! ```

use serde_json::Value;
use crate::application::errors::CommandError;
use crate::application::messaging::BotContext;
use crate::domain::entities::{Message, Room};
use crate::plugins::trait_def::CommandHandler;

const COMMAND: &str = "/sendgrid";
const DEFAULT_API_URL: &str = "https://sendgrid.com/api/stats.get.json";

/// Keys in the config document that are not account names
const RESERVED_KEYS: [&str; 3] = ["login", "password", "api-url"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

pub struct SendGrid {
    client: reqwest::Client,
}

impl SendGrid {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for SendGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler for SendGrid {
    fn handle(
        &self,
        text: &str,
        _message: &Message,
        room: &Room,
        ctx: &BotContext,
        config: Option<&Value>,
    ) -> Result<(), CommandError> {
        let credentials = match resolve_credentials(config, requested_account(text)) {
            Ok(credentials) => credentials,
            Err(msg) => {
                ctx.speak_error(msg, room);
                return Ok(());
            }
        };

        let url = config
            .and_then(|c| c.get("api-url"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_API_URL)
            .to_string();
        let client = self.client.clone();
        let task_ctx = ctx.clone();
        let room = room.clone();

        let spawned = ctx.spawn(async move {
            match fetch_stats(&client, &url, &credentials).await {
                Ok(FetchOutcome::Stats(stats)) => task_ctx.paste_block(stats, &room),
                Ok(FetchOutcome::ApiError(msg)) => {
                    task_ctx.speak_error(format!("{} (sendgrid response)", msg), &room)
                }
                Err(e) => {
                    tracing::error!("sendgrid: {}", e);
                    task_ctx.speak_error("unable to read response from sendgrid.", &room);
                }
            }
        });

        if spawned {
            Ok(())
        } else {
            Err(CommandError::ExecutionFailed("no runtime to query sendgrid on".to_string()))
        }
    }
}

/// Account named after the command, if any
pub fn requested_account(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once(COMMAND)?;
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

/// Account names in config order, skipping the default credential keys
pub fn available_accounts(config: &Value) -> Vec<String> {
    config
        .as_object()
        .map(|map| {
            map.keys()
                .filter(|k| !RESERVED_KEYS.contains(&k.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Pick credentials for `account`, or the top-level pair when no account is named.
///
/// The error text is meant for the room.
pub fn resolve_credentials(config: Option<&Value>, account: Option<&str>) -> Result<Credentials, String> {
    let empty = Value::Object(serde_json::Map::new());
    let config = config.unwrap_or(&empty);
    let accounts = available_accounts(config);

    match account {
        Some(name) => {
            let entry = config
                .get(name)
                .filter(|_| !RESERVED_KEYS.contains(&name))
                .ok_or_else(|| {
                    let mut msg = "account not found in sendgrid config.".to_string();
                    if !accounts.is_empty() {
                        msg.push_str(&format!(" available accounts: {}", accounts.join(", ")));
                    }
                    msg
                })?;
            credentials_from(entry)
                .ok_or_else(|| format!("sendgrid account '{}' is missing a login or password.", name))
        }
        None => credentials_from(config).ok_or_else(|| {
            let mut msg = "sendgrid login and password not found.".to_string();
            if !accounts.is_empty() {
                msg.push_str(&format!(" try specifying one of these accounts: {}", accounts.join(", ")));
            }
            msg
        }),
    }
}

fn credentials_from(value: &Value) -> Option<Credentials> {
    let login = value.get("login")?.as_str()?;
    let password = value.get("password")?.as_str()?;
    Some(Credentials {
        login: login.to_string(),
        password: password.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Stats(String),
    ApiError(String),
}

async fn fetch_stats(client: &reqwest::Client, url: &str, credentials: &Credentials) -> Result<FetchOutcome, String> {
    let response = client
        .get(url)
        .query(&[("api_user", &credentials.login), ("api_key", &credentials.password)])
        .send()
        .await
        .map_err(|e| format!("request failed: {}", e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("failed to read body: {}", e))?;

    interpret_response(status.as_u16(), &body)
}

/// Turn a raw API response into what the room should see
pub fn interpret_response(status: u16, body: &str) -> Result<FetchOutcome, String> {
    let data: Value = serde_json::from_str(body)
        .map_err(|e| format!("unable to parse response from sendgrid: {}", e))?;

    if status == 200 {
        Ok(FetchOutcome::Stats(format_stats(&data)))
    } else {
        let msg = data
            .pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));
        Ok(FetchOutcome::ApiError(msg))
    }
}

/// One `key: value` line per field of the first stats entry
pub fn format_stats(data: &Value) -> String {
    let Some(entry) = data.get(0).and_then(Value::as_object) else {
        return String::new();
    };

    entry
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{}: {}\n", key, s),
            other => format!("{}: {}\n", key, other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> Value {
        json!({
            "accountA": {"login": "L", "password": "P"},
            "login": "Ltop",
            "password": "Ptop",
        })
    }

    #[test]
    fn test_named_account_wins_over_top_level() {
        let creds = resolve_credentials(Some(&config()), Some("accountA")).unwrap();
        assert_eq!(creds, Credentials { login: "L".into(), password: "P".into() });
    }

    #[test]
    fn test_top_level_used_without_account() {
        let creds = resolve_credentials(Some(&config()), None).unwrap();
        assert_eq!(creds.login, "Ltop");
        assert_eq!(creds.password, "Ptop");
    }

    #[test]
    fn test_unknown_account_lists_available() {
        let err = resolve_credentials(Some(&config()), Some("doesnotexist")).unwrap_err();
        assert_eq!(err, "account not found in sendgrid config. available accounts: accountA");
    }

    #[test]
    fn test_missing_top_level_suggests_accounts() {
        let config = json!({"accountA": {"login": "L", "password": "P"}});
        let err = resolve_credentials(Some(&config), None).unwrap_err();
        assert!(err.starts_with("sendgrid login and password not found."));
        assert!(err.ends_with("accountA"));
    }

    #[test]
    fn test_unconfigured_plugin() {
        let err = resolve_credentials(None, None).unwrap_err();
        assert_eq!(err, "sendgrid login and password not found.");
    }

    #[test]
    fn test_requested_account() {
        assert_eq!(requested_account("/sendgrid accountA"), Some("accountA"));
        assert_eq!(requested_account("/sendgrid"), None);
    }

    #[test]
    fn test_interpret_success_and_error() {
        let ok = interpret_response(200, r#"[{"date":"2024-01-01","delivered":12}]"#).unwrap();
        assert_eq!(ok, FetchOutcome::Stats("date: 2024-01-01\ndelivered: 12\n".to_string()));

        let err = interpret_response(401, r#"{"error":{"message":"bad key"}}"#).unwrap();
        assert_eq!(err, FetchOutcome::ApiError("bad key".to_string()));

        assert!(interpret_response(200, "<html>").is_err());
    }
}
