use std::fmt;

/// Number of slots in a single chest menu.
pub const CHEST_SLOTS: usize = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneColour {
    Red,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    GoldenSword,
    StainedGlassPane(PaneColour),
}

impl Item {
    #[must_use]
    pub fn is_sword(&self) -> bool {
        matches!(self, Self::GoldenSword)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoldenSword => f.write_str("Golden Sword"),
            Self::StainedGlassPane(PaneColour::Red) => f.write_str("Red Stained Glass Pane"),
            Self::StainedGlassPane(PaneColour::Green) => f.write_str("Green Stained Glass Pane"),
        }
    }
}

/// A rendered menu item. `change` is the step a click on it applies.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub item: Item,
    pub count: u8,
    pub custom_name: Option<String>,
    pub lore: Vec<String>,
    change: Option<f64>,
}

impl ItemStack {
    #[must_use]
    pub fn new(count: u8, item: Item) -> Self {
        Self {
            item,
            count,
            custom_name: None,
            lore: Vec::new(),
            change: None,
        }
    }

    #[must_use]
    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_lore<I, S>(mut self, lore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lore = lore.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_change(mut self, change: f64) -> Self {
        self.change = Some(change);
        self
    }

    #[must_use]
    pub fn change(&self) -> Option<f64> {
        self.change
    }
}

/// A chest-like menu: a title and 27 slots.
#[derive(Debug, Clone, PartialEq)]
pub struct ChestMenu {
    pub title: String,
    slots: [Option<ItemStack>; CHEST_SLOTS],
}

impl ChestMenu {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Puts `stack` into `slot`. Slots outside the chest are ignored.
    pub fn set(&mut self, slot: usize, stack: ItemStack) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(stack);
        }
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Occupied slots with their index.
    pub fn stacks(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, stack)| stack.as_ref().map(|stack| (slot, stack)))
    }
}
