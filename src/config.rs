//! The two-level `(key, level?) -> value` configuration surface.
//!
//! Grounded on `original_source`'s `utils/config.py` (`ConfigOption`, a per-key metadata record)
//! and `layout.py`'s `defaults` table, which supplies the concrete default values carried here.
//! Keys are a closed enum rather than strings, which also means the "unknown key" failure mode
//! `layout.py`'s string-keyed lookup has to guard against can't happen here — the type system
//! already rules it out.

use crate::error::TreeError;
use crate::geometry::Perimeter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigKey {
    WindowMargin,
    WindowBorderSize,
    WindowPadding,
    /// Not in the distilled key table, but implied by the per-pane floor invariant; supplements
    /// the original's hardcoded `Pane.min_size` class attribute with a real config key.
    WindowMinSize,
    WindowNormalizeOnRemove,
    TabBarHeight,
    TabBarMargin,
    TabBarBorderSize,
    TabBarPadding,
    TabBarHideWhen,
    TabBarTabWidth,
    /// Supplemental key, present in the lineage this design is drawn from but not in the
    /// distilled key table.
    TabBarTabMinWidth,
    TabBarTabMargin,
    TabBarTabPadding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HideWhen {
    Never,
    Always,
    SingleTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TabWidth {
    Auto,
    Fixed(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigValue {
    Perimeter(Perimeter),
    Bool(bool),
    HideWhen(HideWhen),
    TabWidth(TabWidth),
}

impl ConfigValue {
    fn kind_name(&self) -> &'static str {
        match self {
            ConfigValue::Perimeter(_) => "perimeter",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::HideWhen(_) => "hide_when",
            ConfigValue::TabWidth(_) => "tab_width",
        }
    }

    pub fn as_perimeter(&self) -> Option<Perimeter> {
        match self {
            ConfigValue::Perimeter(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_hide_when(&self) -> Option<HideWhen> {
        match self {
            ConfigValue::HideWhen(h) => Some(*h),
            _ => None,
        }
    }

    pub fn as_tab_width(&self) -> Option<TabWidth> {
        match self {
            ConfigValue::TabWidth(w) => Some(*w),
            _ => None,
        }
    }
}

pub(crate) fn default_for(key: ConfigKey) -> ConfigValue {
    match key {
        ConfigKey::WindowMargin => ConfigValue::Perimeter(Perimeter::uniform(0)),
        ConfigKey::WindowBorderSize => ConfigValue::Perimeter(Perimeter::uniform(1)),
        ConfigKey::WindowPadding => ConfigValue::Perimeter(Perimeter::uniform(0)),
        ConfigKey::WindowMinSize => ConfigValue::Perimeter(Perimeter::uniform(20)),
        ConfigKey::WindowNormalizeOnRemove => ConfigValue::Bool(true),
        ConfigKey::TabBarHeight => ConfigValue::Perimeter(Perimeter::uniform(20)),
        ConfigKey::TabBarMargin => ConfigValue::Perimeter(Perimeter::uniform(0)),
        ConfigKey::TabBarBorderSize => ConfigValue::Perimeter(Perimeter::uniform(0)),
        ConfigKey::TabBarPadding => ConfigValue::Perimeter(Perimeter::uniform(0)),
        ConfigKey::TabBarHideWhen => ConfigValue::HideWhen(HideWhen::SingleTab),
        ConfigKey::TabBarTabWidth => ConfigValue::TabWidth(TabWidth::Auto),
        ConfigKey::TabBarTabMinWidth => ConfigValue::Perimeter(Perimeter::uniform(50)),
        ConfigKey::TabBarTabMargin => ConfigValue::Perimeter(Perimeter::uniform(0)),
        ConfigKey::TabBarTabPadding => ConfigValue::Perimeter(Perimeter::uniform(0)),
    }
}

/// `window.min_size` is read as a single scalar (the per-axis floor), not a four-sided
/// perimeter; it's stored as a `Perimeter` purely for reuse of the same value slot, and
/// `min_size()` below is the accessor that actually matters.
fn expects_perimeter(key: ConfigKey) -> bool {
    matches!(
        key,
        ConfigKey::WindowMargin
            | ConfigKey::WindowBorderSize
            | ConfigKey::WindowPadding
            | ConfigKey::WindowMinSize
            | ConfigKey::TabBarHeight
            | ConfigKey::TabBarMargin
            | ConfigKey::TabBarBorderSize
            | ConfigKey::TabBarPadding
            | ConfigKey::TabBarTabMinWidth
            | ConfigKey::TabBarTabMargin
            | ConfigKey::TabBarTabPadding
    )
}

/// The two-level configuration registry backing a [`Tree`](crate::tree::Tree).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    overrides: Vec<(ConfigKey, Option<i32>, ConfigValue)>,
}

impl Config {
    pub fn set(&mut self, key: ConfigKey, value: ConfigValue, level: Option<i32>) -> Result<(), TreeError> {
        let value_is_perimeter = value.as_perimeter().is_some();
        if value_is_perimeter != expects_perimeter(key) {
            return Err(TreeError::ConfigValueKindMismatch { key: value.kind_name() });
        }
        self.overrides.retain(|(k, l, _)| !(*k == key && *l == level));
        self.overrides.push((key, level, value));
        Ok(())
    }

    /// Looks up `key`, trying `(key, level)`, then `(key, None)`, then the built-in default.
    pub fn get(&self, key: ConfigKey, level: Option<i32>) -> ConfigValue {
        if let Some(level) = level {
            if let Some(value) = self.find(key, Some(level)) {
                return value;
            }
        }
        if let Some(value) = self.find(key, None) {
            return value;
        }
        default_for(key)
    }

    pub(crate) fn find(&self, key: ConfigKey, level: Option<i32>) -> Option<ConfigValue> {
        self.overrides
            .iter()
            .rev()
            .find(|(k, l, _)| *k == key && *l == level)
            .map(|(_, _, v)| *v)
    }

    /// The per-pane minimum size floor (invariant 8), read off `window.min_size` at `level`.
    pub fn min_size(&self, level: Option<i32>) -> i32 {
        self.get(ConfigKey::WindowMinSize, level).as_perimeter().unwrap_or_default().top
    }

    /// `tab_bar.height` at `level`, as a plain scalar (all four sides are equal for a bar height).
    pub fn tab_bar_height(&self, level: Option<i32>) -> i32 {
        self.get(ConfigKey::TabBarHeight, level).as_perimeter().unwrap_or_default().top
    }

    pub fn normalize_on_remove(&self, level: Option<i32>) -> bool {
        self.get(ConfigKey::WindowNormalizeOnRemove, level).as_bool().unwrap_or(true)
    }

    pub fn hide_when(&self, level: Option<i32>) -> HideWhen {
        self.get(ConfigKey::TabBarHideWhen, level).as_hide_when().unwrap_or(HideWhen::SingleTab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_through_level_then_unleveled_then_default() {
        let mut config = Config::default();
        assert_eq!(config.min_size(Some(2)), 20);

        config.set(ConfigKey::WindowMinSize, ConfigValue::Perimeter(Perimeter::uniform(5)), None).unwrap();
        assert_eq!(config.min_size(Some(2)), 5);
        assert_eq!(config.min_size(None), 5);

        config.set(ConfigKey::WindowMinSize, ConfigValue::Perimeter(Perimeter::uniform(10)), Some(2)).unwrap();
        assert_eq!(config.min_size(Some(2)), 10);
        assert_eq!(config.min_size(Some(3)), 5);
    }

    #[test]
    fn rejects_wrong_kind_of_value() {
        let mut config = Config::default();
        let err = config.set(ConfigKey::WindowMinSize, ConfigValue::Bool(true), None).unwrap_err();
        assert!(matches!(err, TreeError::ConfigValueKindMismatch { .. }));
    }

    #[test]
    fn later_set_at_same_key_and_level_overwrites() {
        let mut config = Config::default();
        config.set(ConfigKey::TabBarHideWhen, ConfigValue::HideWhen(HideWhen::Always), None).unwrap();
        config.set(ConfigKey::TabBarHideWhen, ConfigValue::HideWhen(HideWhen::Never), None).unwrap();
        assert_eq!(config.hide_when(None), HideWhen::Never);
    }
}
