//! Per-player relay state: reply targets and ignore lists.
//!
//! Entries are keyed by player name and live until the owner disconnects.
//! Both maps are sharded `DashMap`s; every mutation happens under the
//! owning key's shard lock, so a reader never sees a half-updated set.

use std::collections::HashSet;

use dashmap::DashMap;
use tracing::debug;

use crate::common::PlayerHandle;
use crate::host::PlayerRegistry;

/// Reply targets and ignore lists for all connected players.
#[derive(Debug, Default)]
pub struct PlayerStateTracker {
    /// Player name -> name of the last whisper partner.
    reply_targets: DashMap<String, String>,
    /// Player name -> names that player ignores.
    ignore_lists: DashMap<String, HashSet<String>>,
}

impl PlayerStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `target` as the player `sender` replies to.
    pub fn record_whisper(&self, sender: &str, target: &str) {
        self.reply_targets
            .insert(sender.to_string(), target.to_string());
    }

    /// Drop the reply target of `player`, if one was recorded.
    pub fn forget_reply_target(&self, player: &str) {
        self.reply_targets.remove(player);
    }

    /// The recorded partner of `player`, if any.
    pub fn reply_target(&self, player: &str) -> Option<String> {
        self.reply_targets.get(player).map(|entry| entry.value().clone())
    }

    /// The connected player `player` replies to, or `player` itself.
    pub fn resolve_reply_target(
        &self,
        player: &PlayerHandle,
        registry: &dyn PlayerRegistry,
    ) -> PlayerHandle {
        // release the map guard before calling into the registry
        let Some(target) = self.reply_target(&player.name) else {
            return player.clone();
        };
        registry.find(&target).unwrap_or_else(|| {
            debug!(player = %player.name, reply_to = %target, "Reply target is offline");
            player.clone()
        })
    }

    /// Start ignoring `other`. Returns false if already ignored.
    pub fn ignore(&self, player: &str, other: &str) -> bool {
        self.ignore_lists
            .entry(player.to_string())
            .or_default()
            .insert(other.to_string())
    }

    /// Stop ignoring `other`. Returns false if it was not ignored.
    pub fn unignore(&self, player: &str, other: &str) -> bool {
        let Some(mut list) = self.ignore_lists.get_mut(player) else {
            return false;
        };
        let removed = list.remove(other);
        let now_empty = list.is_empty();
        drop(list);
        if now_empty {
            self.ignore_lists.remove_if(player, |_, list| list.is_empty());
        }
        removed
    }

    /// Flip whether `player` ignores `other`; returns the new state.
    pub fn toggle_ignore(&self, player: &str, other: &str) -> bool {
        let mut list = self.ignore_lists.entry(player.to_string()).or_default();
        if !list.remove(other) {
            list.insert(other.to_string());
            return true;
        }
        let now_empty = list.is_empty();
        drop(list);
        if now_empty {
            self.ignore_lists.remove_if(player, |_, list| list.is_empty());
        }
        false
    }

    /// Whether `player` ignores messages from `other`.
    pub fn is_ignoring(&self, player: &str, other: &str) -> bool {
        self.ignore_lists
            .get(player)
            .is_some_and(|list| list.contains(other))
    }

    /// Forget everything owned by `player`. Safe to call more than once.
    ///
    /// Other players' ignore lists keep the name; it simply never matches
    /// until someone with that name connects again.
    pub fn on_disconnect(&self, player: &str) {
        self.reply_targets.remove(player);
        self.ignore_lists.remove(player);
    }
}
