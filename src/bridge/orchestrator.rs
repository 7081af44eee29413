//! The chat relay that ties the host proxy and the text pipeline together.
//!
//! Every inbound event goes through [`FreeBungeeChat`]: global chat is
//! filtered, transformed and fanned out to all eligible players, private
//! messages are routed point to point, and plugin commands are answered.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chat::{
    apply_rules, prepare_player_chat, wrap_variable, ChatPermissions, Substitution,
};
use crate::commands::{completes_player_name, parse_command, PluginCommand};
use crate::common::{
    Capability, ChatEvent, CommandEvent, PlayerHandle, ProxyEvent, TabCompleteEvent,
};
use crate::config::{ConfigStore, Settings};
use crate::host::{AttributeProvider, DeliverySink, PlayerRegistry};
use crate::markup::{self, Span};

use super::state::PlayerStateTracker;

/// Placeholder prefix for the receiving side of a private message.
pub const TARGET_PREFIX: &str = "target_";

/// The plugin instance.
pub struct FreeBungeeChat {
    config: Arc<ConfigStore>,
    state: PlayerStateTracker,
    registry: Arc<dyn PlayerRegistry>,
    attributes: Arc<dyn AttributeProvider>,
    sink: Arc<dyn DeliverySink>,
}

impl FreeBungeeChat {
    pub fn new(
        config: Arc<ConfigStore>,
        registry: Arc<dyn PlayerRegistry>,
        attributes: Arc<dyn AttributeProvider>,
        sink: Arc<dyn DeliverySink>,
    ) -> Self {
        Self {
            config,
            state: PlayerStateTracker::new(),
            registry,
            attributes,
            sink,
        }
    }

    /// The configuration snapshot new events are handled with.
    pub fn settings(&self) -> Arc<Settings> {
        self.config.snapshot()
    }

    pub fn state(&self) -> &PlayerStateTracker {
        &self.state
    }

    /// Route a host notification to its handler.
    pub fn dispatch(&self, event: &mut ProxyEvent) {
        match event {
            ProxyEvent::Chat(chat) => self.on_chat(chat),
            ProxyEvent::Command(command) => self.on_command(command),
            ProxyEvent::TabComplete(tab) => self.on_tab_complete(tab),
            ProxyEvent::Disconnect(player) => self.on_disconnect(player),
        }
    }

    /// Relay a chat line to every eligible player.
    ///
    /// The event is cancelled as soon as the plugin takes it over; events
    /// it leaves alone go on to the player's backend server.
    pub fn on_chat(&self, event: &mut ChatEvent) {
        if event.is_cancelled() || event.is_command() {
            return;
        }
        let settings = self.settings();
        if !settings.config.always_global_chat {
            debug!(player = %event.sender, "Global chat is off");
            return;
        }
        if settings.is_excluded(&event.sender) {
            debug!(player = %event.sender, "Sender is on an excluded server");
            return;
        }
        event.set_cancelled(true);
        self.broadcast(&settings, &event.sender, &event.message);
    }

    /// Handle a command line; marks the event handled if it was ours.
    pub fn on_command(&self, event: &mut CommandEvent) {
        if event.is_handled() {
            return;
        }
        if self.handle_command(&event.sender, &event.line) {
            event.set_handled(true);
        }
    }

    /// Execute a plugin command. Returns false if the line is not one.
    pub fn handle_command(&self, sender: &PlayerHandle, line: &str) -> bool {
        let Some(command) = parse_command(line) else {
            return false;
        };
        let settings = self.settings();

        // commands switched off in the config fall through to the server
        match command {
            PluginCommand::Global { .. } if settings.config.always_global_chat => return false,
            PluginCommand::Ignore { .. } if !settings.config.enable_ignore_command => {
                return false
            }
            _ => {}
        }

        if let PluginCommand::Admin { .. } = command {
            if !self.registry.has_capability(sender, Capability::Admin) {
                self.notify(&settings, sender, &settings.config.no_permission, None);
                return true;
            }
        }

        if !command.has_arguments() {
            self.send_usage(sender, command.usage());
            return true;
        }

        match command {
            PluginCommand::Whisper { target, message } => {
                self.whisper(&settings, sender, &target, &message)
            }
            PluginCommand::Reply { message } => self.reply(&settings, sender, &message),
            PluginCommand::Global { message } => {
                if settings.is_excluded(sender) {
                    debug!(player = %sender, "Global command from an excluded server");
                    return false;
                }
                self.broadcast(&settings, sender, &message);
            }
            PluginCommand::Ignore { target } => self.toggle_ignore(&settings, sender, &target),
            PluginCommand::Admin { .. } => self.reload(sender),
        }
        true
    }

    /// Offer player names when completing a private message command.
    ///
    /// The last space-separated word of the cursor is matched as a
    /// case-sensitive substring of each name and display name. Whatever the
    /// server suggested is dropped, even when nothing matches.
    pub fn on_tab_complete(&self, event: &mut TabCompleteEvent) {
        if !completes_player_name(&event.cursor) {
            return;
        }
        let partial = event.cursor.rsplit(' ').next().unwrap_or_default();

        let mut names: Vec<String> = self
            .registry
            .players()
            .into_iter()
            .filter(|p| p.name.contains(partial) || p.display_name.contains(partial))
            .map(|p| p.name)
            .collect();
        names.sort_by_key(|name| name.to_lowercase());
        event.suggestions = names;
    }

    /// Drop all state owned by a player that left the proxy.
    pub fn on_disconnect(&self, player: &PlayerHandle) {
        self.state.on_disconnect(&player.name);
        self.attributes.forget(player);
        debug!(player = %player, "Cleaned up player state");
    }

    /// Send a private message to the player named `target_name`.
    pub fn whisper(
        &self,
        settings: &Settings,
        sender: &PlayerHandle,
        target_name: &str,
        message: &str,
    ) {
        match self.registry.find(target_name) {
            Some(target) => self.private_message(settings, sender, &target, message),
            None => self.notify(
                settings,
                sender,
                &settings.config.unknown_target,
                Some(target_name),
            ),
        }
    }

    /// Answer the last whisper partner, or yourself if there is none.
    pub fn reply(&self, settings: &Settings, sender: &PlayerHandle, message: &str) {
        let target = self.state.resolve_reply_target(sender, self.registry.as_ref());
        self.private_message(settings, sender, &target, message);
    }

    /// Run a message through the pipeline and deliver it to all eligible
    /// players. Returns the number of successful deliveries.
    pub fn broadcast(&self, settings: &Settings, sender: &PlayerHandle, message: &str) -> usize {
        let spans = self.format_chat(settings, sender, message);
        info!(
            "[{}] {}: {}",
            sender.server.as_deref().unwrap_or("-"),
            sender.name,
            markup::to_plain(&spans)
        );

        let mut delivered = 0;
        for recipient in self.registry.players() {
            if self.state.is_ignoring(&recipient.name, &sender.name) {
                continue;
            }
            if settings.is_excluded(&recipient) {
                continue;
            }
            if self.deliver(&recipient, &spans) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Build the global chat line for `message` from `sender`.
    pub fn format_chat(
        &self,
        settings: &Settings,
        sender: &PlayerHandle,
        message: &str,
    ) -> Vec<Span> {
        markup::parse(&self.chat_line(settings, sender, message))
    }

    /// The chat template with every placeholder expanded, before parsing.
    pub fn chat_line(&self, settings: &Settings, sender: &PlayerHandle, message: &str) -> String {
        let text = self.prepare(settings, sender, message);
        let allow = settings.config.allow_bbcode_in_variables;
        Substitution::new(self.attributes.as_ref(), allow)
            .player("", sender)
            .token("player", wrap_variable(&sender.display_name, allow))
            .token("message", text)
            .apply(&settings.config.chat_format)
    }

    /// Apply the sender's permissions and the regex rules to typed text.
    pub fn prepare(&self, settings: &Settings, sender: &PlayerHandle, message: &str) -> String {
        let perms = ChatPermissions {
            color: self.registry.has_capability(sender, Capability::Color),
            bbcode: self.registry.has_capability(sender, Capability::BbCode),
        };
        let text = prepare_player_chat(message, perms);
        apply_rules(&text, &settings.rules)
    }

    /// Send a configured notice to `player`; `%target%` names `target`.
    pub fn notify(
        &self,
        settings: &Settings,
        player: &PlayerHandle,
        template: &str,
        target: Option<&str>,
    ) {
        let allow = settings.config.allow_bbcode_in_variables;
        let line = Substitution::new(self.attributes.as_ref(), allow)
            .player("", player)
            .token("player", wrap_variable(&player.display_name, allow))
            .token("target", wrap_variable(target.unwrap_or_default(), allow))
            .apply(template);
        self.deliver(player, &markup::parse(&line));
    }

    /// Reload the configuration on behalf of `sender`.
    pub fn reload(&self, sender: &PlayerHandle) {
        match self.config.reload() {
            Ok(settings) => {
                info!(player = %sender, "Configuration reloaded");
                self.notify(&settings, sender, &settings.config.reloaded, None);
            }
            Err(e) => {
                warn!(player = %sender, "Configuration reload failed: {}", e);
                let line = format!(
                    "[color=red]Reload failed: {}[/color]",
                    wrap_variable(&e.to_string(), false)
                );
                self.deliver(sender, &markup::parse(&line));
            }
        }
    }

    /// Flip whether `sender` ignores the player named `target_name`.
    pub fn toggle_ignore(&self, settings: &Settings, sender: &PlayerHandle, target_name: &str) {
        let Some(target) = self.registry.find(target_name) else {
            let template = &settings.config.unknown_target;
            self.notify(settings, sender, template, Some(target_name));
            return;
        };
        let template = if self.state.toggle_ignore(&sender.name, &target.name) {
            &settings.config.ignored
        } else {
            &settings.config.unignored
        };
        self.notify(settings, sender, template, Some(&target.display_name));
    }

    fn private_message(
        &self,
        settings: &Settings,
        sender: &PlayerHandle,
        target: &PlayerHandle,
        message: &str,
    ) {
        let text = self.prepare(settings, sender, message);
        self.state.record_whisper(&sender.name, &target.name);
        self.state.record_whisper(&target.name, &sender.name);
        // either side may have left while the message was prepared
        for player in [sender, target] {
            if self.registry.find(&player.name).is_none() {
                self.state.forget_reply_target(&player.name);
            }
        }

        let config = &settings.config;
        let sent = self.format_private(
            settings,
            &config.private_message_send_format,
            sender,
            target,
            &text,
        );
        let received = self.format_private(
            settings,
            &config.private_message_receive_format,
            sender,
            target,
            &text,
        );

        info!(
            "[whisper] {} -> {}: {}",
            sender.name,
            target.name,
            markup::to_plain(&received)
        );
        self.deliver(sender, &sent);
        if self.state.is_ignoring(&target.name, &sender.name) {
            debug!(player = %sender, recipient = %target, "Whisper target ignores sender");
            return;
        }
        self.deliver(target, &received);
    }

    fn format_private(
        &self,
        settings: &Settings,
        template: &str,
        sender: &PlayerHandle,
        target: &PlayerHandle,
        text: &str,
    ) -> Vec<Span> {
        let allow = settings.config.allow_bbcode_in_variables;
        let line = Substitution::new(self.attributes.as_ref(), allow)
            .player("", sender)
            .player(TARGET_PREFIX, target)
            .token("player", wrap_variable(&sender.display_name, allow))
            .token("target", wrap_variable(&target.display_name, allow))
            .token("message", text)
            .apply(template);
        markup::parse(&line)
    }

    fn send_usage(&self, player: &PlayerHandle, usage: &str) {
        let line = format!("[color=red]Usage: {}[/color]", wrap_variable(usage, false));
        self.deliver(player, &markup::parse(&line));
    }

    fn deliver(&self, player: &PlayerHandle, spans: &[Span]) -> bool {
        match self.sink.deliver(player, spans) {
            Ok(()) => true,
            Err(e) => {
                warn!(player = %player, "Failed to deliver message: {}", e);
                false
            }
        }
    }
}
