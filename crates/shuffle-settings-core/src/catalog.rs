//! # Catalog
//!
//! Concrete identifier sets: the closed set of effects that may carry odds
//! overrides, and species that may carry a mega alias.

use crate::{Category, SettingsError, Variant};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// EFFECT
// =============================================================================

/// A skill effect whose activation odds can be configured per combo size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Effect {
    /// Plain damage with no special effect.
    None,
    PowerOfFour,
    PowerOfFive,
    HyperPunch,
    HyperBoost,
    Opportunist,
    DoubleNormal,
    Risktaker,
    LastDitchEffort,
    IceBreaker,
    BlockSmash,
    ShotOut,
    Stabilize,
    Eject,
    Freeze,
    SleepCharm,
    MindZap,
    Poison,
    Paralyze,
    Burn,
    MegaBoost,
    MegaBoostPlus,
}

impl Effect {
    /// Every effect, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::None,
        Self::PowerOfFour,
        Self::PowerOfFive,
        Self::HyperPunch,
        Self::HyperBoost,
        Self::Opportunist,
        Self::DoubleNormal,
        Self::Risktaker,
        Self::LastDitchEffort,
        Self::IceBreaker,
        Self::BlockSmash,
        Self::ShotOut,
        Self::Stabilize,
        Self::Eject,
        Self::Freeze,
        Self::SleepCharm,
        Self::MindZap,
        Self::Poison,
        Self::Paralyze,
        Self::Burn,
        Self::MegaBoost,
        Self::MegaBoostPlus,
    ];

    /// The canonical config name of this effect.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::PowerOfFour => "POWER_OF_4",
            Self::PowerOfFive => "POWER_OF_5",
            Self::HyperPunch => "HYPER_PUNCH",
            Self::HyperBoost => "HYPER_BOOST",
            Self::Opportunist => "OPPORTUNIST",
            Self::DoubleNormal => "DOUBLE_NORMAL",
            Self::Risktaker => "RISKTAKER",
            Self::LastDitchEffort => "LAST_DITCH_EFFORT",
            Self::IceBreaker => "ICE_BREAKER",
            Self::BlockSmash => "BLOCK_SMASH",
            Self::ShotOut => "SHOT_OUT",
            Self::Stabilize => "STABILIZE",
            Self::Eject => "EJECT",
            Self::Freeze => "FREEZE",
            Self::SleepCharm => "SLEEP_CHARM",
            Self::MindZap => "MIND_ZAP",
            Self::Poison => "POISON",
            Self::Paralyze => "PARALYZE",
            Self::Burn => "BURN",
            Self::MegaBoost => "MEGA_BOOST",
            Self::MegaBoostPlus => "MEGA_BOOST_PLUS",
        }
    }
}

impl Category for Effect {
    fn all() -> &'static [Self] {
        Self::ALL
    }

    fn name(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effect {
    type Err = SettingsError;

    /// Parse a canonical name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SettingsError::UnknownEffect(wanted.to_string()))
    }
}

// =============================================================================
// SPECIES
// =============================================================================

/// A species, optionally able to mega evolve under an alias.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Species {
    name: String,
    mega_name: Option<String>,
}

impl Species {
    /// A species without a mega form.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mega_name: None,
        }
    }

    /// A species with a mega form named `mega_name`.
    #[must_use]
    pub fn with_mega(name: impl Into<String>, mega_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mega_name: Some(mega_name.into()),
        }
    }

    /// The species name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The mega form name, if any.
    #[must_use]
    pub fn mega_name(&self) -> Option<&str> {
        self.mega_name.as_deref()
    }
}

impl Variant for Species {
    fn alias(&self) -> Option<&str> {
        self.mega_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn canonical_names_are_unique() {
        let names: BTreeSet<_> = Effect::all().iter().map(|e| e.name()).collect();
        assert_eq!(names.len(), Effect::ALL.len());
    }

    #[test]
    fn from_str_round_trips_names() {
        for effect in Effect::ALL {
            assert_eq!(effect.as_str().parse::<Effect>(), Ok(*effect));
        }
    }

    #[test]
    fn from_str_ignores_case() {
        assert_eq!("hyper_punch".parse::<Effect>(), Ok(Effect::HyperPunch));
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert_eq!(
            "TELEPORT".parse::<Effect>(),
            Err(SettingsError::UnknownEffect("TELEPORT".to_string()))
        );
    }

    #[test]
    fn species_alias_is_mega_name() {
        assert_eq!(Species::new("Eevee").alias(), None);
        assert_eq!(
            Species::with_mega("Gengar", "Mega Gengar").alias(),
            Some("Mega Gengar")
        );
    }
}
