use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use knockback::command::{CommandExecutor, CommandSender};
use knockback::item::{ChestMenu, ItemStack};
use knockback::player::Player;
use knockback::plugin::EventBus;
use knockback::plugin::inventory::{ClickType, InventoryClickEvent, InventoryCloseEvent};
use knockback::plugin::player::{PlayerAttackEvent, PlayerEvent, PlayerHurtEvent};
use knockback::{KnockbackPlugin, PluginOptions};
use knockback_util::text::to_ansi;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use uuid::Uuid;

fn init_logger() {
    use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .add_filter_allow_str("knockback")
        .build();

    if let Err(err) = TermLogger::init(
        LevelFilter::Info,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logger: {err}");
    }
}

/// The local console acting as a player, so the menu can be used without a server.
struct ConsolePlayer {
    uuid: Uuid,
    menu: Mutex<Option<ChestMenu>>,
}

impl ConsolePlayer {
    fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            menu: Mutex::new(None),
        }
    }

    async fn stack_at(&self, slot: usize) -> Option<ItemStack> {
        self.menu.lock().await.as_ref()?.get(slot).cloned()
    }
}

#[async_trait]
impl Player for ConsolePlayer {
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn name(&self) -> &str {
        "Console"
    }

    async fn send_menu(&self, menu: ChestMenu) {
        let mut current = self.menu.lock().await;
        // Refreshes resend unchanged menus every second.
        if current.as_ref() != Some(&menu) {
            print_menu(&menu);
        }
        *current = Some(menu);
    }
}

fn print_menu(menu: &ChestMenu) {
    println!("== {} ==", menu.title);
    for (slot, stack) in menu.stacks() {
        let name = stack
            .custom_name
            .clone()
            .unwrap_or_else(|| stack.item.to_string());
        println!("[{slot:>2}] {}x {}", stack.count, to_ansi(&name));
        for line in &stack.lore {
            println!("       {}", to_ansi(line));
        }
    }
}

#[tokio::main]
async fn main() {
    init_logger();

    let plugin = match KnockbackPlugin::load(PluginOptions::default()) {
        Ok(plugin) => plugin,
        Err(err) => {
            log::error!("Failed to load knockback settings: {err}");
            std::process::exit(1);
        }
    };
    let mut bus = EventBus::default();
    plugin.register(&mut bus);

    let player = Arc::new(ConsolePlayer::new());
    log::info!("Commands: kb, click <slot> [right], close, attack, hurt [immune], stop");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !handle_line(&plugin, &bus, &player, &line).await {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    log::error!("Failed to read console input: {err}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    plugin.menus().close_all();
    log::info!("Stopped");
}

/// Handles one console line. Returns `false` once the harness should stop.
async fn handle_line(
    plugin: &KnockbackPlugin,
    bus: &EventBus,
    player: &Arc<ConsolePlayer>,
    line: &str,
) -> bool {
    let args: Vec<&str> = line.split_whitespace().collect();
    let Some((name, args)) = args.split_first() else {
        return true;
    };

    match *name {
        "kb" => {
            let sender = CommandSender::Player(player.clone());
            if let Err(err) = plugin.command().execute(&sender, args).await {
                log::warn!("{err}");
            }
        }
        "click" => {
            let Some(slot) = args.first().and_then(|slot| slot.parse::<usize>().ok()) else {
                log::warn!("Usage: click <slot>");
                return true;
            };
            let click = if args.get(1) == Some(&"right") {
                ClickType::Right
            } else {
                ClickType::Left
            };
            let current = player.stack_at(slot).await;
            bus.fire(InventoryClickEvent::new(player.clone(), slot, click, current))
            .await;
        }
        "close" => {
            bus.fire(InventoryCloseEvent::new(player.clone())).await;
        }
        "attack" => {
            let event = bus
                .fire(PlayerAttackEvent::new(player.clone(), Uuid::new_v4(), 0.0, 0.0))
                .await;
            log::info!(
                "Attack knockback for {}: force {}, height {}",
                event.get_player().name(),
                event.force,
                event.height
            );
        }
        "hurt" => {
            let immune = args.contains(&"immune");
            let event = bus
                .fire(PlayerHurtEvent::new(player.clone(), Duration::ZERO, immune))
                .await;
            log::info!(
                "Attack immunity for {}: {}ms (already immune: {immune})",
                event.get_player().name(),
                event.attack_immunity.as_millis()
            );
        }
        "stop" => return false,
        unknown => log::warn!("Unknown command '{unknown}'"),
    }
    true
}
