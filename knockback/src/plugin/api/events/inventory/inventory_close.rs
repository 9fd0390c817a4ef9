use crate::player::Player;
use crate::plugin::player::PlayerEvent;
use knockback_macros::Event;
use std::sync::Arc;

/// An event that occurs when a player dismisses an open menu.
#[derive(Event, Clone)]
pub struct InventoryCloseEvent {
    /// The player who closed the menu.
    pub player: Arc<dyn Player>,
}

impl InventoryCloseEvent {
    pub fn new(player: Arc<dyn Player>) -> Self {
        Self { player }
    }
}

impl PlayerEvent for InventoryCloseEvent {
    fn get_player(&self) -> &Arc<dyn Player> {
        &self.player
    }
}
