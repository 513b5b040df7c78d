use crate::models::SettingValues;

/// Settings fetched by the panel, kept until a save or an explicit close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SettingsCache {
    #[default]
    Invalid,
    Fresh(SettingValues),
}

impl SettingsCache {
    pub fn is_fresh(&self) -> bool {
        matches!(self, SettingsCache::Fresh(_))
    }

    pub fn values(&self) -> Option<&SettingValues> {
        match self {
            SettingsCache::Fresh(values) => Some(values),
            SettingsCache::Invalid => None,
        }
    }

    pub fn fill(&mut self, values: SettingValues) {
        *self = SettingsCache::Fresh(values);
    }

    pub fn invalidate(&mut self) {
        *self = SettingsCache::Invalid;
    }
}
