use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use knockback_config::{
    ConfigError, KnockbackSettings, SettingsFormat, read_settings, write_settings,
};

use crate::tunable::Adjustment;

/// Where the settings live unless the host says otherwise.
pub const DEFAULT_SETTINGS_PATH: &str = "assets/knockback.json";

/// The live knockback settings, shared between the combat hooks and every open menu.
pub struct KnockbackStore {
    settings: RwLock<KnockbackSettings>,
    path: Option<PathBuf>,
}

impl KnockbackStore {
    /// Loads the settings at `path`, which is also where every later save goes.
    ///
    /// A missing file is created with the default values. A file that exists but cannot be
    /// read or decoded is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        SettingsFormat::from_path(path)?;
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let store = Self {
            settings: RwLock::new(KnockbackSettings::default()),
            path: Some(path.to_path_buf()),
        };

        match read_settings(path) {
            Ok(settings) => {
                *store.write() = settings;
                log::info!(
                    "Loaded knockback settings from {} (force {}, height {}, hit delay {}ms)",
                    path.display(),
                    settings.force,
                    settings.height,
                    settings.hit_delay
                );
            }
            Err(err) if err.is_not_found() => {
                log::info!(
                    "No knockback settings at {}, writing defaults",
                    path.display()
                );
                store.save();
            }
            Err(err) => return Err(err),
        }

        Ok(store)
    }

    /// A store that is never written to disk.
    #[must_use]
    pub fn in_memory(settings: KnockbackSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
            path: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn settings(&self) -> KnockbackSettings {
        *self.read()
    }

    /// Writes the current settings out. Failures are logged and otherwise ignored.
    pub fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let settings = self.settings();
        if let Err(err) = write_settings(path, &settings) {
            log::warn!(
                "Failed to save knockback settings to {}: {err}",
                path.display()
            );
        }
    }

    /// Adds `adjustment` to its setting and saves.
    pub fn adjust(&self, adjustment: Adjustment) {
        let settings = {
            let mut settings = self.write();
            adjustment.apply_to(&mut settings);
            *settings
        };
        log::debug!("Adjusted knockback settings by {adjustment:?}: {settings:?}");
        self.save();
    }

    pub fn apply_force(&self, force: &mut f64) {
        *force = self.read().force;
    }

    pub fn apply_height(&self, height: &mut f64) {
        *height = self.read().height;
    }

    /// Negative delays are applied as no delay at all.
    pub fn apply_hit_delay(&self, hit_delay: &mut Duration) {
        let millis = u64::try_from(self.read().hit_delay).unwrap_or(0);
        *hit_delay = Duration::from_millis(millis);
    }

    fn read(&self) -> RwLockReadGuard<'_, KnockbackSettings> {
        self.settings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, KnockbackSettings> {
        self.settings.write().unwrap_or_else(PoisonError::into_inner)
    }
}
