//! # Settings Protocol
//!
//! The contract between a launcher host and the settings plugin.
//!
//! The host hands the plugin a [`TriggerQuery`] (or a bare string for global
//! queries) and receives [`Item`]s back. Each item carries one or more
//! [`Action`]s; invoking an action goes through a [`Launcher`], so the only
//! side effect in the whole plugin is explicit at the type level.
//!
//! ```text
//! host ──TriggerQuery──> TriggerQueryHandler ──add(items)──> host
//! host ──&str──────────> GlobalQueryHandler  ──Vec<RankItem>─> host
//! host ──Action::invoke(&dyn Launcher)──> OS process
//! ```

use serde::{Deserialize, Serialize};

pub mod launch;

pub use launch::{LaunchError, Launcher, ProcessLauncher, RecordingLauncher};

/// Plugin interface version understood by the host.
pub const PLUGIN_INTERFACE_VERSION: &str = "3.0";

/// Highest relevance a plugin can claim in a global query.
///
/// The scale itself is owned by the host's ranking aggregator.
pub const MAX_RANK_SCORE: u32 = 100;

/// Static description the host shows in its plugin list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PluginMetadata {
    pub iid: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub license: String,
    pub url: String,
    pub authors: Vec<String>,
}

/// An invokable action attached to an [`Item`].
///
/// The action is a plain value: it holds the argument vector to launch and
/// nothing else. See [`Action::invoke`] for the launch contract.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Action {
    pub id: String,
    pub text: String,
    /// Program followed by its arguments.
    pub command: Vec<String>,
}

impl Action {
    pub fn new(id: impl Into<String>, text: impl Into<String>, command: Vec<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            command,
        }
    }

    /// Launch the command as a detached process.
    ///
    /// Fire-and-forget: the caller never waits on the child and its exit
    /// status and output are never acted on. A failure to start the process is returned
    /// as-is; nothing is retried or reported on the caller's behalf.
    pub fn invoke(&self, launcher: &dyn Launcher) -> Result<(), LaunchError> {
        log::debug!("invoking action {}", self.id);
        launcher.launch(&self.command)
    }
}

/// A display record the host renders as one result row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Item {
    /// Stable id, unique across every plugin sharing the host's namespace.
    pub id: String,
    /// Primary text.
    pub text: String,
    /// Secondary text.
    pub subtext: String,
    pub icon_urls: Vec<String>,
    pub actions: Vec<Action>,
}

impl Item {
    /// The action the host runs when the user activates the row.
    pub fn default_action(&self) -> Option<&Action> {
        self.actions.first()
    }

    pub fn action(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.id == id)
    }
}

/// An item paired with the relevance a plugin claims for it in a global query.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RankItem {
    pub item: Item,
    pub score: u32,
}

impl RankItem {
    pub fn new(item: Item, score: u32) -> Self {
        Self { item, score }
    }
}

/// A triggered query: the raw user text (trigger already stripped by the
/// host) plus the sink results are added to.
#[derive(Debug, Default, Clone)]
pub struct TriggerQuery {
    string: String,
    items: Vec<Item>,
}

impl TriggerQuery {
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            items: Vec::new(),
        }
    }

    /// Build a query from the full text the user typed, stripping `trigger`
    /// when the text starts with it.
    pub fn from_input(input: &str, trigger: &str) -> Self {
        let string = if trigger.is_empty() {
            input
        } else if input == trigger.trim_end() {
            ""
        } else {
            input.strip_prefix(trigger).unwrap_or(input)
        };
        Self::new(string)
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn add(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items.extend(items);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

/// Plugin side of a triggered query.
pub trait TriggerQueryHandler {
    /// Plugin id, used by the host to namespace configuration.
    fn id(&self) -> &str;

    fn metadata(&self) -> &PluginMetadata;

    /// Trigger the host uses unless the user configured another one.
    fn default_trigger(&self) -> &str;

    /// Placeholder shown after the trigger while the user types.
    fn synopsis(&self, query: &str) -> &str;

    fn handle_trigger_query(&self, query: &mut TriggerQuery);
}

/// Plugin side of a global query, evaluated against every installed plugin.
pub trait GlobalQueryHandler: TriggerQueryHandler {
    fn handle_global_query(&self, query: &str) -> Vec<RankItem>;
}
