use std::sync::Arc;

use async_trait::async_trait;

use crate::plugin::EventHandler;
use crate::plugin::player::{PlayerAttackEvent, PlayerHurtEvent};
use crate::store::KnockbackStore;

/// Whether the hit delay override also applies to hits on players that are still immune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImmunityPolicy {
    /// Always overwrite the immunity the host computed.
    #[default]
    Always,
    /// Keep the host's immunity when the player was already immune.
    SkipImmune,
}

/// Replaces the computed knockback of every attack with the stored force and height.
pub struct AttackKnockbackHandler {
    store: Arc<KnockbackStore>,
}

impl AttackKnockbackHandler {
    #[must_use]
    pub fn new(store: Arc<KnockbackStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventHandler<PlayerAttackEvent> for AttackKnockbackHandler {
    async fn handle_blocking(&self, event: &mut PlayerAttackEvent) {
        self.store.apply_force(&mut event.force);
        self.store.apply_height(&mut event.height);
    }
}

/// Replaces the attack immunity of hurt players with the stored hit delay.
pub struct HurtImmunityHandler {
    store: Arc<KnockbackStore>,
    policy: ImmunityPolicy,
}

impl HurtImmunityHandler {
    #[must_use]
    pub fn new(store: Arc<KnockbackStore>, policy: ImmunityPolicy) -> Self {
        Self { store, policy }
    }
}

#[async_trait]
impl EventHandler<PlayerHurtEvent> for HurtImmunityHandler {
    async fn handle_blocking(&self, event: &mut PlayerHurtEvent) {
        if self.policy == ImmunityPolicy::SkipImmune && event.immune {
            return;
        }
        self.store.apply_hit_delay(&mut event.attack_immunity);
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use knockback_config::KnockbackSettings;
    use uuid::Uuid;

    use super::*;
    use crate::test_util::RecordingPlayer;

    fn store() -> Arc<KnockbackStore> {
        Arc::new(KnockbackStore::in_memory(KnockbackSettings {
            force: 0.6,
            height: 0.5,
            hit_delay: 300,
        }))
    }

    fn hurt(immune: bool) -> PlayerHurtEvent {
        PlayerHurtEvent::new(
            Arc::new(RecordingPlayer::default()),
            Duration::from_millis(250),
            immune,
        )
    }

    #[tokio::test]
    async fn attack_knockback_is_overwritten() {
        let handler = AttackKnockbackHandler::new(store());
        let mut event = PlayerAttackEvent::new(
            Arc::new(RecordingPlayer::default()),
            Uuid::new_v4(),
            1.2,
            0.9,
        );
        handler.handle_blocking(&mut event).await;
        assert_eq!(event.force, 0.6);
        assert_eq!(event.height, 0.5);
    }

    #[tokio::test]
    async fn always_policy_ignores_immunity() {
        let handler = HurtImmunityHandler::new(store(), ImmunityPolicy::Always);
        for immune in [false, true] {
            let mut event = hurt(immune);
            handler.handle_blocking(&mut event).await;
            assert_eq!(event.attack_immunity, Duration::from_millis(300));
        }
    }

    #[tokio::test]
    async fn skip_immune_policy_keeps_host_value() {
        let handler = HurtImmunityHandler::new(store(), ImmunityPolicy::SkipImmune);

        let mut immune = hurt(true);
        handler.handle_blocking(&mut immune).await;
        assert_eq!(immune.attack_immunity, Duration::from_millis(250));

        let mut fresh = hurt(false);
        handler.handle_blocking(&mut fresh).await;
        assert_eq!(fresh.attack_immunity, Duration::from_millis(300));
    }
}
