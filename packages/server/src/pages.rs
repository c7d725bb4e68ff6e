//! Compile-time registry of the dashboard's static page content.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Tab headings, section titles, paragraphs and external links live in
//! `pages/` rather than in code.

use bike_lane_server_models::{DashboardTab, PageContent};
use thiserror::Error;

/// Embedded TOML page definitions, in navigation order.
const PAGE_TOMLS: &[(&str, &str)] = &[
    ("dashboard", include_str!("../pages/dashboard.toml")),
    ("map", include_str!("../pages/map.toml")),
    ("about", include_str!("../pages/about.toml")),
    ("sources", include_str!("../pages/sources.toml")),
];

/// Errors raised while loading embedded page content.
#[derive(Debug, Error)]
pub enum PagesError {
    /// A page file is not valid TOML for [`PageContent`].
    #[error("Failed to parse page '{name}': {source}")]
    Parse {
        /// Registry name of the page.
        name: &'static str,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A page file declares a different tab than its registry name.
    #[error("Page '{name}' declares tab '{tab}'")]
    TabMismatch {
        /// Registry name of the page.
        name: &'static str,
        /// Tab the file declared.
        tab: DashboardTab,
    },
}

/// Returns every page, in navigation order.
///
/// # Errors
///
/// Returns [`PagesError`] if an embedded file fails to parse or names the
/// wrong tab. Since these are compile-time constants, a failure indicates
/// a development error.
pub fn all_pages() -> Result<Vec<PageContent>, PagesError> {
    PAGE_TOMLS
        .iter()
        .map(|&(name, toml_str)| {
            let page: PageContent = toml::de::from_str(toml_str)
                .map_err(|source| PagesError::Parse { name, source })?;
            if page.tab.as_ref() != name {
                return Err(PagesError::TabMismatch {
                    name,
                    tab: page.tab,
                });
            }
            Ok(page)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_page_per_tab_in_order() {
        let tabs: Vec<DashboardTab> = all_pages().unwrap().iter().map(|p| p.tab).collect();
        assert_eq!(tabs, DashboardTab::all());
    }

    #[test]
    fn titles_match_tab_headings() {
        for page in all_pages().unwrap() {
            assert_eq!(page.title, page.tab.title());
        }
    }

    #[test]
    fn static_pages_carry_links_and_text() {
        let pages = all_pages().unwrap();
        let about = &pages[2];
        assert_eq!(
            about.paragraphs,
            ["This app provides insights into 311 blocked bike lane service requests."]
        );
        let sources = &pages[3];
        assert_eq!(sources.links.len(), 2);
        assert!(sources.links.iter().all(|l| l.url.starts_with("https://")));
        assert_eq!(pages[0].links[0].label, "Exploratory Data Analysis Report");
    }
}
