use knockback_config::KnockbackSettings;
use knockback_util::text::{colourf, format_float};

use crate::item::{ChestMenu, Item, ItemStack, PaneColour};
use crate::tunable::Tunable;

pub const MENU_TITLE: &str = "KnockBack Settings";

/// Slot of the sword that shows every value and cycles the selection.
pub const STATUS_SLOT: usize = 13;

/// Adjustment slots and their stack sizes, in the order of [`Tunable::steps`].
const ADJUSTMENT_SLOTS: [(usize, u8, PaneColour); 6] = [
    (10, 25, PaneColour::Red),
    (11, 10, PaneColour::Red),
    (12, 1, PaneColour::Red),
    (14, 1, PaneColour::Green),
    (15, 10, PaneColour::Green),
    (16, 25, PaneColour::Green),
];

/// Decimals shown for force, height and step values before trimming.
const DISPLAY_PRECISION: usize = 4;

/// Game ticks per second.
const TICKS_PER_SECOND: f64 = 20.0;

#[must_use]
pub fn render_menu(selected: Tunable, settings: &KnockbackSettings) -> ChestMenu {
    let mut menu = ChestMenu::new(MENU_TITLE);
    let value = value_markup(selected, settings);

    for ((slot, count, colour), step) in ADJUSTMENT_SLOTS.into_iter().zip(selected.steps()) {
        let stack = ItemStack::new(count, Item::StainedGlassPane(colour));
        menu.set(slot, adjustment_stack(stack, selected, step, &value));
    }
    menu.set(STATUS_SLOT, status_stack(selected, settings));
    menu
}

fn adjustment_stack(stack: ItemStack, selected: Tunable, step: f64, value: &str) -> ItemStack {
    let symbol = if step < 0.0 {
        "<red>-</red>"
    } else {
        "<green>+</green>"
    };

    stack
        .with_change(step)
        .with_custom_name(colourf(&format!(
            "{symbol} {}",
            format_float(step.abs(), DISPLAY_PRECISION)
        )))
        .with_lore([
            colourf(&format!(
                "<grey>Selected: <yellow>{}</yellow></grey>",
                selected.name()
            )),
            colourf(&format!("<grey>Value: {value}</grey>")),
        ])
}

fn status_stack(selected: Tunable, settings: &KnockbackSettings) -> ItemStack {
    let mut lore: Vec<String> = Tunable::ALL
        .into_iter()
        .map(|tunable| {
            let colour = if tunable == selected { "green" } else { "grey" };
            colourf(&format!(
                "<{colour}>{}</{colour}> {}",
                tunable.name(),
                value_markup(tunable, settings)
            ))
        })
        .collect();
    lore.push(String::new());
    lore.push(colourf("<grey>Click to change selection</grey>"));

    ItemStack::new(1, Item::GoldenSword)
        .with_custom_name(colourf("<red>KnockBack Configuration</red>"))
        .with_lore(lore)
}

fn value_markup(tunable: Tunable, settings: &KnockbackSettings) -> String {
    match tunable {
        Tunable::Force => float_markup(settings.force),
        Tunable::Height => float_markup(settings.height),
        Tunable::HitDelay => delay_markup(settings.hit_delay),
    }
}

fn float_markup(value: f64) -> String {
    format!("<yellow>{}</yellow>", format_float(value, DISPLAY_PRECISION))
}

fn delay_markup(millis: i64) -> String {
    format!(
        "<yellow>{millis}ms</yellow> <grey>({:.2} ticks)</grey>",
        delay_ticks(millis)
    )
}

/// How many game ticks a delay spans. Display only.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn delay_ticks(millis: i64) -> f64 {
    millis as f64 / 1000.0 * TICKS_PER_SECOND
}
