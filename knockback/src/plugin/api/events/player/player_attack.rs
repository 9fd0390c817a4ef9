use knockback_macros::{Event, cancellable};
use std::sync::Arc;
use uuid::Uuid;

use crate::player::Player;

use super::PlayerEvent;

/// An event that occurs when a player lands an attack, before knockback is applied.
///
/// The host computes `force` and `height` from its own physics and applies whatever values
/// the event carries once every handler ran.
#[cancellable]
#[derive(Event, Clone)]
pub struct PlayerAttackEvent {
    /// The attacking player.
    pub player: Arc<dyn Player>,

    /// The entity that was hit.
    pub victim: Uuid,

    /// Horizontal knockback the victim receives.
    pub force: f64,

    /// Vertical knockback the victim receives.
    pub height: f64,
}

impl PlayerAttackEvent {
    pub fn new(player: Arc<dyn Player>, victim: Uuid, force: f64, height: f64) -> Self {
        Self {
            player,
            victim,
            force,
            height,
            cancelled: false,
        }
    }
}

impl PlayerEvent for PlayerAttackEvent {
    fn get_player(&self) -> &Arc<dyn Player> {
        &self.player
    }
}
