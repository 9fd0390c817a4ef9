use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::item::{ChestMenu, ItemStack};
use crate::player::Player;

/// A player that remembers every menu sent to it.
pub struct RecordingPlayer {
    pub uuid: Uuid,
    menus: Mutex<Vec<ChestMenu>>,
}

impl Default for RecordingPlayer {
    fn default() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            menus: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingPlayer {
    pub fn renders(&self) -> usize {
        self.menus.lock().unwrap().len()
    }

    pub fn last_menu(&self) -> Option<ChestMenu> {
        self.menus.lock().unwrap().last().cloned()
    }

    pub fn stack_at(&self, slot: usize) -> Option<ItemStack> {
        self.last_menu()?.get(slot).cloned()
    }
}

#[async_trait]
impl Player for RecordingPlayer {
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn name(&self) -> &str {
        "recorder"
    }

    async fn send_menu(&self, menu: ChestMenu) {
        self.menus.lock().unwrap().push(menu);
    }
}
