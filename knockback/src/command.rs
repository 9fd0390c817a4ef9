use std::sync::Arc;

use async_trait::async_trait;

use crate::menu::MenuManager;
use crate::player::Player;

/// Who ran a command.
#[derive(Clone)]
pub enum CommandSender {
    Console,
    Player(Arc<dyn Player>),
}

impl CommandSender {
    #[must_use]
    pub fn is_player(&self) -> bool {
        matches!(self, Self::Player(_))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Console => "Console",
            Self::Player(player) => player.name(),
        }
    }
}

/// Decides who may run a command.
pub trait Allower: Send + Sync {
    fn allow(&self, sender: &CommandSender) -> bool;
}

impl<F> Allower for F
where
    F: Fn(&CommandSender) -> bool + Send + Sync,
{
    fn allow(&self, sender: &CommandSender) -> bool {
        self(sender)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("You do not have permission to run this command")]
    PermissionDenied,
    #[error("Unexpected arguments: {0}")]
    InvalidArguments(String),
}

#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, sender: &CommandSender, args: &[&str]) -> Result<(), CommandError>;
}

const NAMES: [&str; 1] = ["kb"];

const DESCRIPTION: &str = "Opens the knockback settings menu.";

/// `/kb`: opens the knockback menu for the player running it.
pub struct KnockbackCommand {
    menus: Arc<MenuManager>,
    allower: Option<Arc<dyn Allower>>,
}

impl KnockbackCommand {
    #[must_use]
    pub fn new(menus: Arc<MenuManager>) -> Self {
        Self {
            menus,
            allower: None,
        }
    }

    #[must_use]
    pub fn with_allower(mut self, allower: impl Allower + 'static) -> Self {
        self.allower = Some(Arc::new(allower));
        self
    }

    #[must_use]
    pub fn names(&self) -> &'static [&'static str] {
        &NAMES
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        DESCRIPTION
    }

    /// Players may run the command unless a custom allower says otherwise.
    #[must_use]
    pub fn allow(&self, sender: &CommandSender) -> bool {
        match &self.allower {
            Some(allower) => allower.allow(sender),
            None => sender.is_player(),
        }
    }
}

#[async_trait]
impl CommandExecutor for KnockbackCommand {
    async fn execute(&self, sender: &CommandSender, args: &[&str]) -> Result<(), CommandError> {
        if !args.is_empty() {
            return Err(CommandError::InvalidArguments(args.join(" ")));
        }
        if !self.allow(sender) {
            log::info!("{} was denied the knockback menu", sender.name());
            return Err(CommandError::PermissionDenied);
        }

        // Only players can look at a menu.
        if let CommandSender::Player(player) = sender {
            self.menus.open(player.clone()).await;
        }
        Ok(())
    }
}
