use std::collections::HashMap;

use crate::error::CatalogError;

/// Program every built-in page is opened with.
pub const CONTROL_CENTER: &str = "gnome-control-center";

/// One settings page the plugin knows how to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPage {
    id: String,
    title: String,
    description: String,
    command: Vec<String>,
    // Lower-cased copies, matched against normalized queries.
    title_key: String,
    description_key: String,
}

impl SettingsPage {
    pub fn new<I, S>(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        command: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let title = title.into();
        let description = description.into();
        Self {
            id: id.into(),
            title_key: title.to_lowercase(),
            description_key: description.to_lowercase(),
            title,
            description,
            command: command.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Program followed by its arguments.
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// True when `needle` (already normalized) occurs in the id, the
    /// lower-cased title or the lower-cased description.
    pub fn contains(&self, needle: &str) -> bool {
        self.id.contains(needle)
            || self.title_key.contains(needle)
            || self.description_key.contains(needle)
    }
}

/// Fixed id → page table, iterated in definition order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pages: Vec<SettingsPage>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from an arbitrary table, rejecting empty ids, empty
    /// commands and duplicate ids.
    pub fn from_pages(pages: Vec<SettingsPage>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(pages.len());
        for (pos, page) in pages.iter().enumerate() {
            if page.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if page.command.is_empty() {
                return Err(CatalogError::EmptyCommand(page.id.clone()));
            }
            if index.insert(page.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicatePage(page.id.clone()));
            }
        }
        Ok(Self { pages, index })
    }

    /// The GNOME Control Center panels.
    pub fn gnome() -> Result<Self, CatalogError> {
        let pages = GNOME_PAGES
            .iter()
            .map(|&(id, title, description, panel)| {
                SettingsPage::new(id, title, description, [CONTROL_CENTER, panel])
            })
            .collect();
        Self::from_pages(pages)
    }

    pub fn get(&self, id: &str) -> Option<&SettingsPage> {
        self.index.get(id).map(|&pos| &self.pages[pos])
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SettingsPage> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// id, title, description, control center panel
static GNOME_PAGES: &[(&str, &str, &str, &str)] = &[
    ("wifi", "Wi-Fi", "Configure wireless networks", "wifi"),
    ("network", "Network", "Configure network connections", "network"),
    ("bluetooth", "Bluetooth", "Configure Bluetooth devices", "bluetooth"),
    ("display", "Displays", "Configure monitors and displays", "display"),
    ("sound", "Sound", "Configure audio devices and volume", "sound"),
    ("power", "Power", "Configure power saving options", "power"),
    (
        "multitasking",
        "Multitasking",
        "Multitasking gestures and prefrences",
        "multitasking",
    ),
    (
        "appearance",
        "Appearance",
        "Configure system theme and appearance",
        "appearance",
    ),
    (
        "applications",
        "Applications",
        "Manage installed applications",
        "applications",
    ),
    (
        "notifications",
        "Notifications",
        "Configure system notifications",
        "notifications",
    ),
    (
        "online-accounts",
        "Online Accounts",
        "Configure online service accounts",
        "online-accounts",
    ),
    ("sharing", "Sharing", "Configure file and media sharing", "sharing"),
    ("mouse", "Mouse & Touchpad", "Configure pointing devices", "mouse"),
    (
        "keyboard",
        "Keyboard",
        "Configure keyboard shortcuts and behavior",
        "keyboard",
    ),
    ("color", "Color", "Adjust the Display Color Settings", "color"),
    ("printers", "Printers", "Configure printers", "printers"),
    (
        "accessibility",
        "Accessibility",
        "Configure accessibility options",
        "universal-access",
    ),
    (
        "privacy",
        "Privacy & Security",
        "Configure privacy and security options",
        "privacy",
    ),
    (
        "system",
        "System Settings",
        "View system settings and information",
        "system",
    ),
    ("region", "Region & Language", "Configure locale and language", "region"),
    (
        "datetime",
        "Date & Time",
        "Configure system clock and timezone",
        "datetime",
    ),
    ("users", "Users", "Manage user accounts", "users"),
    ("about", "About", "System Software and Hardware details", "about"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn gnome_catalog_has_unique_ids() {
        let catalog = Catalog::gnome().unwrap();
        let ids: HashSet<_> = catalog.iter().map(SettingsPage::id).collect();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog.len(), 23);
    }

    #[test]
    fn gnome_catalog_builds_through_validation() {
        let catalog = Catalog::gnome().expect("built-in table is valid");
        assert_eq!(catalog.len(), 23);
        for page in catalog.iter() {
            assert_eq!(catalog.get(page.id()), Some(page));
            assert!(!page.command().is_empty(), "{}", page.id());
        }
    }

    #[test]
    fn keeps_definition_order() {
        let catalog = Catalog::gnome().unwrap();
        let ids: Vec<_> = catalog.iter().map(SettingsPage::id).take(4).collect();
        assert_eq!(ids, vec!["wifi", "network", "bluetooth", "display"]);
        assert_eq!(catalog.iter().last().map(SettingsPage::id), Some("about"));
    }

    #[test]
    fn accessibility_opens_universal_access_panel() {
        let catalog = Catalog::gnome().unwrap();
        let page = catalog.get("accessibility").unwrap();
        assert_eq!(page.command(), ["gnome-control-center", "universal-access"]);
    }

    #[test]
    fn contains_matches_lowercased_title_and_description() {
        let page = SettingsPage::new("mouse", "Mouse & Touchpad", "Configure pointing devices", ["x"]);
        assert!(page.contains("touchpad"));
        assert!(page.contains("pointing"));
        assert!(page.contains("mou"));
        assert!(!page.contains("Touchpad"));
        assert!(!page.contains("keyboard"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let pages = vec![
            SettingsPage::new("a", "A", "first", ["cmd"]),
            SettingsPage::new("a", "A again", "second", ["cmd"]),
        ];
        assert_eq!(
            Catalog::from_pages(pages).unwrap_err(),
            CatalogError::DuplicatePage("a".to_string())
        );
    }

    #[test]
    fn rejects_empty_id_and_command() {
        let empty_id = vec![SettingsPage::new("", "A", "a", ["cmd"])];
        assert_eq!(Catalog::from_pages(empty_id).unwrap_err(), CatalogError::EmptyId);

        let empty_command = vec![SettingsPage::new("a", "A", "a", Vec::<String>::new())];
        assert_eq!(
            Catalog::from_pages(empty_command).unwrap_err(),
            CatalogError::EmptyCommand("a".to_string())
        );
    }

    #[test]
    fn lookup_misses_return_none() {
        let catalog = Catalog::gnome().unwrap();
        assert!(catalog.get("net").is_none());
        assert!(!catalog.contains_id("Display"));
        assert!(catalog.contains_id("display"));
    }
}
