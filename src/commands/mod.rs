//! Plugin commands (/msg, /r, /global, /ignore, /fbc).
//!
//! Parsing only splits the line; argument checks happen in the
//! orchestrator, after it has decided the command is available.

use tracing::debug;

/// Labels of the private message command.
pub const WHISPER_LABELS: [&str; 5] = ["whisper", "w", "msg", "message", "tell"];

const REPLY_LABELS: [&str; 2] = ["reply", "r"];
const GLOBAL_LABELS: [&str; 2] = ["global", "g"];
const IGNORE_LABELS: [&str; 1] = ["ignore"];
const ADMIN_LABELS: [&str; 2] = ["freebungeechat", "fbc"];

/// A command line addressed to the plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginCommand {
    /// `/msg <player> <message>`
    Whisper { target: String, message: String },
    /// `/r <message>`
    Reply { message: String },
    /// `/g <message>`
    Global { message: String },
    /// `/ignore <player>`
    Ignore { target: String },
    /// `/fbc <action>`
    Admin { action: String },
}

impl PluginCommand {
    /// Usage line shown when the arguments are missing.
    pub fn usage(&self) -> &'static str {
        match self {
            Self::Whisper { .. } => "/msg <player> <message>",
            Self::Reply { .. } => "/r <message>",
            Self::Global { .. } => "/g <message>",
            Self::Ignore { .. } => "/ignore <player>",
            Self::Admin { .. } => "/freebungeechat reload",
        }
    }

    /// Whether all required arguments are present.
    pub fn has_arguments(&self) -> bool {
        match self {
            Self::Whisper { target, message } => !target.is_empty() && !message.is_empty(),
            Self::Reply { message } | Self::Global { message } => !message.is_empty(),
            Self::Ignore { target } => !target.is_empty(),
            Self::Admin { action } => action.eq_ignore_ascii_case("reload"),
        }
    }
}

/// Parse a command line such as `/msg Bob hello`.
///
/// Returns `None` for lines that are not plugin commands.
pub fn parse_command(line: &str) -> Option<PluginCommand> {
    let body = line.strip_prefix('/')?;
    let (label, args) = split_word(body);
    let label = label.to_ascii_lowercase();
    let is = |labels: &[&str]| labels.contains(&label.as_str());

    let command = if is(&WHISPER_LABELS) {
        let (target, message) = split_word(args);
        PluginCommand::Whisper {
            target: target.to_string(),
            message: message.to_string(),
        }
    } else if is(&REPLY_LABELS) {
        PluginCommand::Reply {
            message: args.to_string(),
        }
    } else if is(&GLOBAL_LABELS) {
        PluginCommand::Global {
            message: args.to_string(),
        }
    } else if is(&IGNORE_LABELS) {
        PluginCommand::Ignore {
            target: split_word(args).0.to_string(),
        }
    } else if is(&ADMIN_LABELS) {
        PluginCommand::Admin {
            action: split_word(args).0.to_string(),
        }
    } else {
        return None;
    };

    debug!("Parsed command {:?}", command);
    Some(command)
}

/// Whether a tab-completion cursor belongs to the private message command.
///
/// This is a plain prefix test on the raw cursor, so `/w` also claims
/// `/warp` and `/whisperx`.
pub fn completes_player_name(cursor: &str) -> bool {
    cursor
        .strip_prefix('/')
        .is_some_and(|body| WHISPER_LABELS.iter().any(|label| body.starts_with(label)))
}

/// Split off the first whitespace-delimited word; the rest is trimmed.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}
