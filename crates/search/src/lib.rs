//! # Settings Search
//!
//! Maps short text queries onto GNOME Control Center pages.
//!
//! ## Query modes
//!
//! - **Triggered** (`gs <text>`): permissive substring match over page id,
//!   title and description, in catalog order. Empty text lists every page.
//! - **Global**: the query must be a single word equal to a page id. A hit is
//!   ranked at the top of the host's scale; everything else is ignored so the
//!   shared result list is not crowded by this plugin.
//!
//! ```text
//! query ──normalize──┬──> substring over Catalog ──> Vec<Item>
//!                    └──> single word? ──> Catalog::get ──> Vec<RankItem>
//! ```

mod catalog;
mod config;
mod error;
mod matcher;
mod plugin;

pub use catalog::{Catalog, SettingsPage, CONTROL_CENTER};
pub use config::{
    PluginConfig, BUNDLED_ICON_PATH, CONFIG_FILE_NAME, DEFAULT_TRIGGER, ICON_FILE_NAME,
};
pub use error::{CatalogError, ConfigError, Result, SearchError};
pub use matcher::{normalize, single_word};
pub use plugin::{plugin_metadata, SettingsPlugin, PLUGIN_ID, SYNOPSIS};
