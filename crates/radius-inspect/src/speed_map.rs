//! Speed-tier lookup
//!
//! Maps the service profile names carried in accounting traffic (usually in
//! `Filter-Id`) to the provisioned speed, in kbit/s, as text.

use std::collections::HashMap;

/// Speed reported for profiles missing from the table
pub const DEFAULT_SPEED: &str = "128";

const BUILTIN_TIERS: &[(&str, &str)] = &[
    ("daa-128", "128"),
    ("daa-128-zero", "128"),
    ("daa-128-kachok", "128"),
    ("daa-512", "782"),
    ("daa-2048-game", "2148"),
    ("daa-1024", "1124"),
    ("daa-256", "286"),
    ("daa-128-12", "128"),
    ("daa-256-20", "286"),
    ("daa-512-30", "786"),
    ("daa-1024-40", "1124"),
    ("daa-2048-60", "2148"),
    ("daa-4096", "4196"),
    ("daa-6144", "6244"),
    ("daa-8192", "8292"),
    ("daa-10280", "10240"),
    ("daa-10240", "10240"),
    ("daa-512-game", "782"),
    ("daa-256-game", "286"),
    ("daa-1024-game", "1124"),
    ("daa-102400", "103240"),
    ("daa-3072", "3072"),
    ("daa-5120", "5120"),
    ("daa-20480", "20480"),
    ("daa-20000", "20480"),
    ("daa-30720", "30720"),
    ("daa-30000", "30720"),
    ("daa-40000", "40960"),
    ("daa-50000", "63240"),
    ("daa-36000", "36000"),
    ("daa-70000", "73240"),
];

#[derive(Debug, Clone)]
pub struct SpeedMap {
    tiers: HashMap<String, String>,
    default: String,
}

impl SpeedMap {
    /// Table of the known service profiles
    pub fn builtin() -> Self {
        SpeedMap {
            tiers: BUILTIN_TIERS
                .iter()
                .map(|(profile, speed)| (profile.to_string(), speed.to_string()))
                .collect(),
            default: DEFAULT_SPEED.to_string(),
        }
    }

    /// Add or replace tiers on top of the current table
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tiers
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Replace the speed reported for unknown profiles
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Speed for `profile`, or the default when it is not in the table
    pub fn get(&self, profile: &str) -> &str {
        self.tiers
            .get(profile)
            .filter(|speed| !speed.is_empty())
            .map(String::as_str)
            .unwrap_or(&self.default)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for SpeedMap {
    fn default() -> Self {
        SpeedMap::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_profiles() {
        let map = SpeedMap::builtin();
        assert_eq!(map.get("daa-512"), "782");
        assert_eq!(map.get("daa-2048-game"), "2148");
        assert_eq!(map.get("daa-102400"), "103240");
        assert_eq!(map.get("daa-50000"), "63240");
    }

    #[test]
    fn test_unknown_profile_falls_back() {
        let map = SpeedMap::builtin();
        assert_eq!(map.get("no-such-profile"), DEFAULT_SPEED);
        assert_eq!(map.get(""), "128");
    }

    #[test]
    fn test_overrides_and_default() {
        let map = SpeedMap::builtin()
            .with_overrides([("daa-512", "800"), ("fiber-1g", "1000000")])
            .with_default("64");

        assert_eq!(map.get("daa-512"), "800");
        assert_eq!(map.get("fiber-1g"), "1000000");
        assert_eq!(map.get("daa-4096"), "4196");
        assert_eq!(map.get("unknown"), "64");
        assert_eq!(map.len(), BUILTIN_TIERS.len() + 1);
    }

    #[test]
    fn test_empty_tier_uses_default() {
        let map = SpeedMap::builtin().with_overrides([("blank", "")]);
        assert_eq!(map.get("blank"), "128");
    }
}
