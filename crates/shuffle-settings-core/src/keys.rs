//! # Derived Keys
//!
//! Config keys synthesized from a variant's alias. These keys are never
//! cached; every lookup goes straight to the store.

use crate::Variant;
use crate::primitives::{SPEEDUP_CAP_KEY_PREFIX, THRESHOLD_KEY_PREFIX};

/// Key holding the mega speedup cap for `alias`.
#[must_use]
pub fn speedup_cap_key(alias: &str) -> String {
    format!("{}{}", SPEEDUP_CAP_KEY_PREFIX, alias)
}

/// Key holding the mega threshold for `alias`.
#[must_use]
pub fn threshold_key(alias: &str) -> String {
    format!("{}{}", THRESHOLD_KEY_PREFIX, alias)
}

/// Speedup cap key for a variant, or `None` if it has no alias.
#[must_use]
pub fn variant_speedup_cap_key<V: Variant + ?Sized>(variant: &V) -> Option<String> {
    variant.alias().map(speedup_cap_key)
}

/// Threshold key for a variant, or `None` if it has no alias.
#[must_use]
pub fn variant_threshold_key<V: Variant + ?Sized>(variant: &V) -> Option<String> {
    variant.alias().map(threshold_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Species;

    #[test]
    fn keys_follow_templates() {
        assert_eq!(speedup_cap_key("Gengar"), "MEGA_SPEEDUPS_Gengar");
        assert_eq!(threshold_key("Gengar"), "MEGA_THRESHOLD_Gengar");
    }

    #[test]
    fn alias_is_used_verbatim() {
        assert_eq!(speedup_cap_key("Charizard X"), "MEGA_SPEEDUPS_Charizard X");
        assert_eq!(threshold_key(""), "MEGA_THRESHOLD_");
    }

    #[test]
    fn aliasless_variant_has_no_keys() {
        let pikachu = Species::new("Pikachu");
        assert_eq!(variant_speedup_cap_key(&pikachu), None);
        assert_eq!(variant_threshold_key(&pikachu), None);
    }

    #[test]
    fn variant_keys_use_mega_name() {
        let venusaur = Species::with_mega("Venusaur", "Mega Venusaur");
        assert_eq!(
            variant_speedup_cap_key(&venusaur).as_deref(),
            Some("MEGA_SPEEDUPS_Mega Venusaur")
        );
        assert_eq!(
            variant_threshold_key(&venusaur).as_deref(),
            Some("MEGA_THRESHOLD_Mega Venusaur")
        );
    }
}
