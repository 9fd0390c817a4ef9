use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering::Relaxed};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::item::ItemStack;
use crate::player::Player;
use crate::plugin::inventory::{InventoryClickEvent, InventoryCloseEvent};
use crate::plugin::player::PlayerEvent;
use crate::plugin::task::{TaskHandler, start_loop};
use crate::plugin::{Cancellable, EventHandler};
use crate::store::KnockbackStore;
use crate::tunable::Tunable;

pub mod render;

pub use render::render_menu;

/// One player's open knockback menu.
pub struct MenuSession {
    player: Arc<dyn Player>,
    store: Arc<KnockbackStore>,
    selected: AtomicUsize,
    close: CancellationToken,
}

impl MenuSession {
    #[must_use]
    pub fn new(player: Arc<dyn Player>, store: Arc<KnockbackStore>) -> Arc<Self> {
        Arc::new(Self {
            player,
            store,
            selected: AtomicUsize::new(Tunable::default().index()),
            close: CancellationToken::new(),
        })
    }

    #[must_use]
    pub fn selected(&self) -> Tunable {
        Tunable::from_index(self.selected.load(Relaxed))
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.close.is_cancelled()
    }

    /// Sends the first render and starts re-rendering every `refresh_interval` until closed.
    pub async fn open(self: &Arc<Self>, refresh_interval: Duration) -> JoinHandle<()> {
        self.resend().await;
        start_loop(refresh_interval, self.clone(), self.close.clone())
    }

    /// Handles a click on `stack`. Returns whether the click did anything.
    ///
    /// The sword cycles the selection, a stack carrying a step adjusts the selected setting
    /// and saves it. Anything else is ignored.
    pub async fn submit(&self, stack: &ItemStack) -> bool {
        if self.is_closed() {
            return false;
        }

        if stack.item.is_sword() {
            let next = self.selected().next();
            self.selected.store(next.index(), Relaxed);
            self.resend().await;
            return true;
        }

        let Some(step) = stack.change() else {
            return false;
        };
        self.store.adjust(self.selected().adjustment(step));
        self.resend().await;
        true
    }

    /// Stops the refresh loop. Further clicks are ignored.
    pub fn close(&self) {
        self.close.cancel();
    }

    async fn resend(&self) {
        let menu = render_menu(self.selected(), &self.store.settings());
        self.player.send_menu(menu).await;
    }
}

#[async_trait]
impl TaskHandler for MenuSession {
    async fn run(&self) {
        if !self.is_closed() {
            self.resend().await;
        }
    }
}

/// Tracks the open menu of every player and routes their clicks.
pub struct MenuManager {
    store: Arc<KnockbackStore>,
    sessions: DashMap<Uuid, Arc<MenuSession>>,
    refresh_interval: Duration,
}

impl MenuManager {
    pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

    #[must_use]
    pub fn new(store: Arc<KnockbackStore>, refresh_interval: Duration) -> Self {
        Self {
            store,
            sessions: DashMap::new(),
            refresh_interval,
        }
    }

    /// Opens a fresh menu for `player`, closing the one they already had.
    pub async fn open(&self, player: Arc<dyn Player>) -> Arc<MenuSession> {
        let uuid = player.uuid();
        log::debug!("Opening knockback menu for {}", player.name());

        let session = MenuSession::new(player, self.store.clone());
        if let Some(previous) = self.sessions.insert(uuid, session.clone()) {
            previous.close();
        }
        session.open(self.refresh_interval).await;
        session
    }

    #[must_use]
    pub fn session(&self, uuid: Uuid) -> Option<Arc<MenuSession>> {
        self.sessions.get(&uuid).map(|session| session.clone())
    }

    /// Closes the menu of `uuid`. Returns whether one was open.
    pub fn close(&self, uuid: Uuid) -> bool {
        match self.sessions.remove(&uuid) {
            Some((_, session)) => {
                session.close();
                log::debug!("Closed knockback menu of {uuid}");
                true
            }
            None => false,
        }
    }

    pub fn close_all(&self) {
        self.sessions.retain(|_, session| {
            session.close();
            false
        });
    }

    #[must_use]
    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl EventHandler<InventoryClickEvent> for MenuManager {
    async fn handle_blocking(&self, event: &mut InventoryClickEvent) {
        let Some(session) = self.session(event.get_player().uuid()) else {
            return;
        };
        // Menu items must never end up in the player's inventory.
        event.set_cancelled(true);
        if !event.in_menu() {
            return;
        }
        if let Some(stack) = &event.current {
            session.submit(stack).await;
        }
    }
}

#[async_trait]
impl EventHandler<InventoryCloseEvent> for MenuManager {
    async fn handle(&self, event: &InventoryCloseEvent) {
        self.close(event.get_player().uuid());
    }
}

#[cfg(test)]
mod test {
    use knockback_config::KnockbackSettings;
    use tokio::time::sleep;

    use super::*;
    use crate::item::Item;
    use crate::plugin::inventory::ClickType;
    use crate::test_util::RecordingPlayer;

    fn store() -> Arc<KnockbackStore> {
        Arc::new(KnockbackStore::in_memory(KnockbackSettings::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn sword_cycles_and_wraps() {
        let player = Arc::new(RecordingPlayer::default());
        let session = MenuSession::new(player.clone(), store());
        session.open(Duration::from_secs(1)).await;

        let sword = player.stack_at(render::STATUS_SLOT).unwrap();
        for expected in [Tunable::Height, Tunable::HitDelay, Tunable::Force] {
            assert!(session.submit(&sword).await);
            assert_eq!(session.selected(), expected);
        }
        assert_eq!(player.renders(), 4);
        session.close();
    }

    #[tokio::test(start_paused = true)]
    async fn panes_adjust_the_selected_setting() {
        let player = Arc::new(RecordingPlayer::default());
        let store = store();
        let session = MenuSession::new(player.clone(), store.clone());
        session.open(Duration::from_secs(1)).await;

        let plus = player.stack_at(15).unwrap();
        for _ in 0..3 {
            assert!(session.submit(&plus).await);
        }
        assert!((store.settings().force - 0.43).abs() < 1e-9);

        let sword = player.stack_at(render::STATUS_SLOT).unwrap();
        session.submit(&sword).await;
        session.submit(&sword).await;
        let minus = player.stack_at(10).unwrap();
        assert_eq!(minus.change(), Some(-25.0));
        session.submit(&minus).await;
        assert_eq!(store.settings().hit_delay, 475);
        assert_eq!(store.settings().height, 0.4);
        session.close();
    }

    #[tokio::test(start_paused = true)]
    async fn unexpected_items_are_ignored() {
        let player = Arc::new(RecordingPlayer::default());
        let store = store();
        let session = MenuSession::new(player.clone(), store.clone());
        session.open(Duration::from_secs(1)).await;

        let plain = ItemStack::new(1, Item::StainedGlassPane(crate::item::PaneColour::Red));
        assert!(!session.submit(&plain).await);
        assert_eq!(store.settings(), KnockbackSettings::default());
        assert_eq!(player.renders(), 1);
        session.close();
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_stops_after_close() {
        let player = Arc::new(RecordingPlayer::default());
        let session = MenuSession::new(player.clone(), store());
        let refresh = session.open(Duration::from_secs(1)).await;
        assert_eq!(player.renders(), 1);

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(player.renders(), 4);

        session.close();
        refresh.await.unwrap();
        let renders = player.renders();
        sleep(Duration::from_secs(5)).await;
        assert_eq!(player.renders(), renders);

        let sword = player.last_menu().unwrap().get(render::STATUS_SLOT).cloned().unwrap();
        assert!(!session.submit(&sword).await);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_picks_up_changes_from_elsewhere() {
        let player = Arc::new(RecordingPlayer::default());
        let store = store();
        let session = MenuSession::new(player.clone(), store.clone());
        session.open(Duration::from_secs(1)).await;

        store.adjust(crate::tunable::Adjustment::Force(0.1));
        sleep(Duration::from_millis(1100)).await;

        let status = player.stack_at(render::STATUS_SLOT).unwrap();
        assert!(status.lore[0].contains("0.5"));
        session.close();
    }

    #[tokio::test(start_paused = true)]
    async fn manager_routes_clicks_and_replaces_sessions() {
        let manager = MenuManager::new(store(), MenuManager::REFRESH_INTERVAL);
        let player = Arc::new(RecordingPlayer::default());

        let first = manager.open(player.clone()).await;
        let second = manager.open(player.clone()).await;
        assert!(first.is_closed());
        assert!(!second.is_closed());
        assert_eq!(manager.open_sessions(), 1);

        let mut click = InventoryClickEvent::new(
            player.clone(),
            render::STATUS_SLOT,
            ClickType::Left,
            player.stack_at(render::STATUS_SLOT),
        );
        manager.handle_blocking(&mut click).await;
        assert!(click.cancelled());
        assert_eq!(second.selected(), Tunable::Height);

        manager.handle(&InventoryCloseEvent::new(player.clone())).await;
        assert!(second.is_closed());
        assert_eq!(manager.open_sessions(), 0);
        assert!(!manager.close(player.uuid));
    }

    #[tokio::test(start_paused = true)]
    async fn clicks_in_the_player_inventory_are_not_submitted() {
        let manager = MenuManager::new(store(), MenuManager::REFRESH_INTERVAL);
        let player = Arc::new(RecordingPlayer::default());
        let session = manager.open(player.clone()).await;

        for slot in [crate::item::CHEST_SLOTS, 40] {
            let mut click = InventoryClickEvent::new(
                player.clone(),
                slot,
                ClickType::Left,
                Some(ItemStack::new(1, Item::GoldenSword)),
            );
            manager.handle_blocking(&mut click).await;
            assert!(click.cancelled());
        }
        assert_eq!(session.selected(), Tunable::Force);
        assert_eq!(player.renders(), 1);
        manager.close_all();
    }

    #[tokio::test]
    async fn clicks_without_a_menu_are_left_alone() {
        let manager = MenuManager::new(store(), MenuManager::REFRESH_INTERVAL);
        let player = Arc::new(RecordingPlayer::default());

        let mut click = InventoryClickEvent::new(player.clone(), 3, ClickType::Left, None);
        manager.handle_blocking(&mut click).await;
        assert!(!click.cancelled());
    }
}
