use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use command::{Allower, KnockbackCommand};
use hooks::{AttackKnockbackHandler, HurtImmunityHandler, ImmunityPolicy};
use knockback_config::ConfigError;
use menu::MenuManager;
use plugin::inventory::{InventoryClickEvent, InventoryCloseEvent};
use plugin::player::{PlayerAttackEvent, PlayerHurtEvent};
use plugin::{EventBus, EventPriority};
use store::{DEFAULT_SETTINGS_PATH, KnockbackStore};

pub mod command;
pub mod hooks;
pub mod item;
pub mod menu;
pub mod player;
pub mod plugin;
pub mod store;
pub mod tunable;

#[cfg(test)]
pub(crate) mod test_util;

/// How the plugin is set up by the host.
#[derive(Debug, Clone)]
pub struct PluginOptions {
    /// Where the settings are loaded from and saved to.
    pub settings_path: PathBuf,
    /// Whether the hit delay overrides victims that are already immune.
    pub immunity_policy: ImmunityPolicy,
    /// How often an open menu is re-rendered.
    pub refresh_interval: Duration,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            immunity_policy: ImmunityPolicy::default(),
            refresh_interval: MenuManager::REFRESH_INTERVAL,
        }
    }
}

/// Everything the knockback add-on hands to the host server.
pub struct KnockbackPlugin {
    store: Arc<KnockbackStore>,
    menus: Arc<MenuManager>,
    command: KnockbackCommand,
    immunity_policy: ImmunityPolicy,
}

impl KnockbackPlugin {
    /// Loads the settings file and builds the plugin. Any error other than a missing file is returned.
    pub fn load(options: PluginOptions) -> Result<Self, ConfigError> {
        let store = Arc::new(KnockbackStore::load(&options.settings_path)?);
        Ok(Self::with_store(store, &options))
    }

    #[must_use]
    pub fn with_store(store: Arc<KnockbackStore>, options: &PluginOptions) -> Self {
        let menus = Arc::new(MenuManager::new(store.clone(), options.refresh_interval));
        Self {
            command: KnockbackCommand::new(menus.clone()),
            store,
            menus,
            immunity_policy: options.immunity_policy,
        }
    }

    /// Replaces the default "any player" permission check of the `kb` command.
    #[must_use]
    pub fn with_allower(mut self, allower: impl Allower + 'static) -> Self {
        self.command = self.command.with_allower(allower);
        self
    }

    /// Hooks the knockback overrides and the menu into the host's events.
    pub fn register(&self, bus: &mut EventBus) {
        bus.register::<PlayerAttackEvent, _>(
            Arc::new(AttackKnockbackHandler::new(self.store.clone())),
            EventPriority::Lowest,
            true,
        );
        bus.register::<PlayerHurtEvent, _>(
            Arc::new(HurtImmunityHandler::new(
                self.store.clone(),
                self.immunity_policy,
            )),
            EventPriority::Lowest,
            true,
        );
        bus.register::<InventoryClickEvent, MenuManager>(
            self.menus.clone(),
            EventPriority::Normal,
            true,
        );
        bus.register::<InventoryCloseEvent, MenuManager>(
            self.menus.clone(),
            EventPriority::Normal,
            false,
        );
        log::info!(
            "Registered knockback hooks (hit delay policy: {:?})",
            self.immunity_policy
        );
    }

    #[must_use]
    pub fn store(&self) -> &Arc<KnockbackStore> {
        &self.store
    }

    #[must_use]
    pub fn menus(&self) -> &Arc<MenuManager> {
        &self.menus
    }

    #[must_use]
    pub fn command(&self) -> &KnockbackCommand {
        &self.command
    }
}
