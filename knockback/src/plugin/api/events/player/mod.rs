use std::sync::Arc;

use crate::player::Player;

pub mod player_attack;
pub mod player_hurt;

pub use player_attack::PlayerAttackEvent;
pub use player_hurt::PlayerHurtEvent;

/// A trait representing events related to players.
pub trait PlayerEvent: Send + Sync {
    /// Retrieves the player involved in the event.
    fn get_player(&self) -> &Arc<dyn Player>;
}
