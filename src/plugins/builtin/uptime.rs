//! `/uptime` - how long the bot has been running

use chrono::{Duration, Utc};
use serde_json::Value;
use crate::application::errors::CommandError;
use crate::application::messaging::BotContext;
use crate::domain::entities::{Message, Room};
use crate::plugins::trait_def::CommandHandler;

pub struct Uptime;

impl CommandHandler for Uptime {
    fn handle(
        &self,
        _text: &str,
        _message: &Message,
        room: &Room,
        ctx: &BotContext,
        _config: Option<&Value>,
    ) -> Result<(), CommandError> {
        let elapsed = Utc::now().signed_duration_since(ctx.executed_on());
        ctx.speak(format!("uptime: {}", format_uptime(elapsed)), room);
        Ok(())
    }
}

/// Render a duration as "1 day, 2 hours, 3 minutes, 4 seconds", skipping zero units
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let units = [
        ("day", total / 86_400),
        ("hour", total % 86_400 / 3_600),
        ("minute", total % 3_600 / 60),
        ("second", total % 60),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(unit, n)| format!("{} {}{}", n, unit, if *n > 1 { "s" } else { "" }))
        .collect();

    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of_each_unit() {
        assert_eq!(
            format_uptime(Duration::milliseconds(90_061_000)),
            "1 day, 1 hour, 1 minute, 1 second"
        );
    }

    #[test]
    fn test_plurals_and_skipped_units() {
        assert_eq!(format_uptime(Duration::seconds(2 * 86_400 + 5)), "2 days, 5 seconds");
        assert_eq!(format_uptime(Duration::minutes(180)), "3 hours");
    }

    #[test]
    fn test_sub_second_uptime() {
        assert_eq!(format_uptime(Duration::milliseconds(400)), "0 seconds");
        assert_eq!(format_uptime(Duration::seconds(-5)), "0 seconds");
    }
}
