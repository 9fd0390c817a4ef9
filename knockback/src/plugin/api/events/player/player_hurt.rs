use knockback_macros::Event;
use std::sync::Arc;
use std::time::Duration;

use crate::player::Player;

use super::PlayerEvent;

/// An event that occurs when a player takes a hit.
#[derive(Event, Clone)]
pub struct PlayerHurtEvent {
    /// The player who was hit.
    pub player: Arc<dyn Player>,

    /// How long the player cannot be hit again.
    pub attack_immunity: Duration,

    /// Whether the player was still immune from an earlier hit.
    pub immune: bool,
}

impl PlayerHurtEvent {
    pub fn new(player: Arc<dyn Player>, attack_immunity: Duration, immune: bool) -> Self {
        Self {
            player,
            attack_immunity,
            immune,
        }
    }
}

impl PlayerEvent for PlayerHurtEvent {
    fn get_player(&self) -> &Arc<dyn Player> {
        &self.player
    }
}
