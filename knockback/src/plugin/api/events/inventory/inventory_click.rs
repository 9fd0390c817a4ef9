use crate::item::{CHEST_SLOTS, ItemStack};
use crate::player::Player;
use crate::plugin::inventory::ClickType;
use crate::plugin::player::PlayerEvent;
use knockback_macros::{Event, cancellable};
use std::sync::Arc;

/// An event that occurs when a player clicks a slot of an open menu.
#[cancellable]
#[derive(Event, Clone)]
pub struct InventoryClickEvent {
    /// The player who performs the event.
    pub player: Arc<dyn Player>,

    /// The raw slot number.
    pub raw_slot: usize,

    /// The type of click that was performed.
    pub click: ClickType,

    /// The item in the clicked slot.
    pub current: Option<ItemStack>,
}

impl InventoryClickEvent {
    pub fn new(
        player: Arc<dyn Player>,
        raw_slot: usize,
        click: ClickType,
        current: Option<ItemStack>,
    ) -> Self {
        Self {
            player,
            raw_slot,
            click,
            current,
            cancelled: false,
        }
    }

    /// Whether the click landed in the menu itself rather than the player's own inventory.
    #[must_use]
    pub fn in_menu(&self) -> bool {
        self.raw_slot < CHEST_SLOTS
    }
}

impl PlayerEvent for InventoryClickEvent {
    fn get_player(&self) -> &Arc<dyn Player> {
        &self.player
    }
}
