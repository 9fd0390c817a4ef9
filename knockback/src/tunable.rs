use knockback_config::KnockbackSettings;

/// One of the settings the menu can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tunable {
    #[default]
    Force,
    Height,
    HitDelay,
}

impl Tunable {
    pub const ALL: [Self; 3] = [Self::Force, Self::Height, Self::HitDelay];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Force => 0,
            Self::Height => 1,
            Self::HitDelay => 2,
        }
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// The selection after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Force => "Force",
            Self::Height => "Height",
            Self::HitDelay => "Hit Delay",
        }
    }

    /// The six deltas offered by the menu, largest decrease first.
    #[must_use]
    pub const fn steps(self) -> [f64; 6] {
        match self {
            Self::Force | Self::Height => [-0.025, -0.01, -0.001, 0.001, 0.01, 0.025],
            Self::HitDelay => [-25.0, -10.0, -1.0, 1.0, 10.0, 25.0],
        }
    }

    /// Types a clicked step for this setting. Hit delay steps are whole milliseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn adjustment(self, step: f64) -> Adjustment {
        match self {
            Self::Force => Adjustment::Force(step),
            Self::Height => Adjustment::Height(step),
            Self::HitDelay => Adjustment::HitDelay(step.round() as i64),
        }
    }
}

/// A change to a single setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    Force(f64),
    Height(f64),
    /// Milliseconds.
    HitDelay(i64),
}

impl Adjustment {
    pub fn apply_to(self, settings: &mut KnockbackSettings) {
        match self {
            Self::Force(delta) => settings.force += delta,
            Self::Height(delta) => settings.height += delta,
            Self::HitDelay(delta) => settings.hit_delay = settings.hit_delay.saturating_add(delta),
        }
    }
}
