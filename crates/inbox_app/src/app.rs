use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use inbox_core::{codec, timefmt, NotificationInbox};
use tracing::info;

use crate::badge::LogBadgeSink;
use crate::prefs::FilePreferenceStore;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub(crate) prefs_path: PathBuf,
    pub(crate) badge_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("INBOX_PREFS_PATH") {
            config.prefs_path = PathBuf::from(path);
        }
        if let Ok(value) = std::env::var("INBOX_BADGE") {
            config.badge_enabled = !matches!(value.trim(), "0" | "off" | "false");
        }
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            prefs_path: home.join(".local/share/inbox/prefs.json"),
            badge_enabled: true,
        }
    }
}

pub fn run(config: AppConfig, args: Vec<String>) -> Result<()> {
    info!(prefs = %config.prefs_path.display(), "opening notification inbox");
    let inbox = open_inbox(&config)?;

    match args.first().map(String::as_str) {
        None | Some("list") => list(&inbox),
        Some("count") => {
            println!("{} notifications, {} unread", inbox.count(), inbox.unread_count());
            Ok(())
        }
        Some("add") => {
            let payload = read_payload(args.get(1))?;
            let before = inbox.count();
            inbox.add_payload(&payload);
            if inbox.count() == before {
                return Err(anyhow!("payload was not a decodable notification"));
            }
            println!("stored notification #{}", inbox.count() - 1);
            Ok(())
        }
        Some("read") => {
            let index = parse_index(args.get(1))?;
            inbox.mark_read(index)?;
            println!("{} unread", inbox.unread_count());
            Ok(())
        }
        Some("remove") => {
            let index = parse_index(args.get(1))?;
            let removed = inbox.remove(index)?;
            println!(
                "removed notification from {}",
                timefmt::format_wire(&removed.wire.event)
            );
            Ok(())
        }
        Some("example") => {
            println!("{}", codec::example_push_payload(Utc::now())?);
            Ok(())
        }
        Some(other) => Err(anyhow!(
            "unknown command `{other}` (expected list, count, add, read, remove or example)"
        )),
    }
}

pub(crate) fn open_inbox(config: &AppConfig) -> Result<NotificationInbox> {
    let mut builder = NotificationInbox::builder()
        .with_preference_store(Box::new(FilePreferenceStore::new(&config.prefs_path)));
    if config.badge_enabled {
        builder = builder.with_badge_sink(Box::new(LogBadgeSink));
    }
    builder.build()
}

fn list(inbox: &NotificationInbox) -> Result<()> {
    for (index, notification) in inbox.snapshot().iter().enumerate() {
        let marker = if notification.read { ' ' } else { '*' };
        let text = notification.wire.message.as_deref().unwrap_or("-");
        println!(
            "{marker} [{index}] {}  v{}  {text}",
            timefmt::format_wire(&notification.wire.event),
            notification.wire.version,
        );
    }
    println!("{} notifications, {} unread", inbox.count(), inbox.unread_count());
    Ok(())
}

fn read_payload(arg: Option<&String>) -> Result<String> {
    match arg.map(String::as_str) {
        Some("-") | None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading payload from stdin")?;
            Ok(buffer)
        }
        Some(json) => Ok(json.to_string()),
    }
}

fn parse_index(arg: Option<&String>) -> Result<usize> {
    let raw = arg.ok_or_else(|| anyhow!("a notification index is required"))?;
    raw.trim()
        .parse()
        .with_context(|| format!("`{raw}` is not a notification index"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_index_accepts_plain_numbers_only() {
        assert_eq!(parse_index(Some(&"3".to_string())).unwrap(), 3);
        assert!(parse_index(Some(&"three".to_string())).is_err());
        assert!(parse_index(None).is_err());
    }
}
