use std::path::Path;

use settings_protocol::{
    Action, GlobalQueryHandler, Item, PluginMetadata, RankItem, TriggerQuery,
    TriggerQueryHandler, MAX_RANK_SCORE, PLUGIN_INTERFACE_VERSION,
};

use crate::catalog::{Catalog, SettingsPage};
use crate::config::PluginConfig;
use crate::error::{Result, SearchError};
use crate::matcher;

pub const PLUGIN_ID: &str = "gnome_settings";
pub const SYNOPSIS: &str = "<settings-page>";

/// Namespaces item ids inside the host's shared id space.
const ITEM_ID_PREFIX: &str = "settings:";
const ACTION_ID_PREFIX: &str = "open:";

pub fn plugin_metadata() -> PluginMetadata {
    PluginMetadata {
        iid: PLUGIN_INTERFACE_VERSION.to_string(),
        version: "1.0".to_string(),
        name: "Gnome Settings".to_string(),
        description: "Quick access to Gnome system settings pages".to_string(),
        license: "GPL V3.0".to_string(),
        url: "https://github.com/shahiljain/albert-python-plugin-gnome-settings".to_string(),
        authors: vec!["Shahil Jain".to_string()],
    }
}

/// Maps queries onto catalog pages and turns pages into host items.
///
/// Every query method is a pure function of the catalog and the query text.
#[derive(Debug, Clone)]
pub struct SettingsPlugin<'c> {
    catalog: &'c Catalog,
    icon_url: String,
    trigger: String,
    metadata: PluginMetadata,
}

impl<'c> SettingsPlugin<'c> {
    pub fn new(catalog: &'c Catalog, icon_path: &Path) -> Self {
        Self {
            catalog,
            icon_url: format!("file:{}", icon_path.display()),
            trigger: PluginConfig::default().trigger,
            metadata: plugin_metadata(),
        }
    }

    /// Build the plugin from configuration, resolving the icon against the
    /// directory the plugin is installed in.
    pub fn from_config(catalog: &'c Catalog, config: &PluginConfig, install_dir: &Path) -> Self {
        let mut plugin = Self::new(catalog, &config.resolve_icon_path(install_dir));
        plugin.trigger = config.trigger.clone();
        plugin
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn icon_url(&self) -> &str {
        &self.icon_url
    }

    /// Trigger in effect, which may differ from [`TriggerQueryHandler::default_trigger`]
    /// when configured.
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Permissive search: every page whose id, title or description contains
    /// the normalized query, in catalog order. An empty query lists everything.
    pub fn triggered_search(&self, query: &str) -> Vec<Item> {
        let needle = matcher::normalize(query);
        self.catalog
            .iter()
            .filter(|page| needle.is_empty() || page.contains(&needle))
            .map(|page| self.item_for(page))
            .collect()
    }

    /// Strict search: a single word equal to a page id, scored at the top of
    /// the host's scale. Anything else yields nothing.
    pub fn exact_global_search(&self, query: &str) -> Vec<RankItem> {
        let normalized = matcher::normalize(query);
        let Some(word) = matcher::single_word(&normalized) else {
            return Vec::new();
        };
        self.catalog
            .get(word)
            .map(|page| RankItem::new(self.item_for(page), MAX_RANK_SCORE))
            .into_iter()
            .collect()
    }

    pub fn build_item(&self, page_id: &str) -> Result<Item> {
        self.catalog
            .get(page_id)
            .map(|page| self.item_for(page))
            .ok_or_else(|| SearchError::UnknownPage(page_id.to_string()))
    }

    fn item_for(&self, page: &SettingsPage) -> Item {
        Item {
            id: format!("{ITEM_ID_PREFIX}{}", page.id()),
            text: page.title().to_string(),
            subtext: page.description().to_string(),
            icon_urls: vec![self.icon_url.clone()],
            actions: vec![Action::new(
                format!("{ACTION_ID_PREFIX}{}", page.id()),
                format!("Open {}", page.title()),
                page.command().to_vec(),
            )],
        }
    }
}

impl TriggerQueryHandler for SettingsPlugin<'_> {
    fn id(&self) -> &str {
        PLUGIN_ID
    }

    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn default_trigger(&self) -> &str {
        crate::config::DEFAULT_TRIGGER
    }

    fn synopsis(&self, _query: &str) -> &str {
        SYNOPSIS
    }

    fn handle_trigger_query(&self, query: &mut TriggerQuery) {
        let items = self.triggered_search(query.string());
        log::debug!(
            "trigger query {:?} matched {} page(s)",
            query.string(),
            items.len()
        );
        query.add(items);
    }
}

impl GlobalQueryHandler for SettingsPlugin<'_> {
    fn handle_global_query(&self, query: &str) -> Vec<RankItem> {
        let ranked = self.exact_global_search(query);
        log::debug!("global query {query:?} matched {} page(s)", ranked.len());
        ranked
    }
}
