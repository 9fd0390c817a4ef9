use async_trait::async_trait;
use uuid::Uuid;

use crate::item::ChestMenu;

/// A connected player as seen by the add-on. Implemented by the host server.
#[async_trait]
pub trait Player: Send + Sync {
    fn uuid(&self) -> Uuid;

    fn name(&self) -> &str;

    /// Shows `menu` to the player, replacing the contents of the menu they have open.
    async fn send_menu(&self, menu: ChestMenu);
}
