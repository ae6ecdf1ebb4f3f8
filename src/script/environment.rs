//! Environment badge and version labels.
//!
//! The label comes from `<meta name="environment">` when the page carries
//! one, otherwise from keywords in the hostname. Matching is case-insensitive
//! and the first matching tier wins.

use std::fmt;

use crate::config::BuildInfo;
use crate::page::Document;

pub const ENVIRONMENT_META: &str = "environment";
pub const ENV_NAME_ID: &str = "env-name";
pub const APP_VERSION_ID: &str = "app-version";
pub const BUILD_NUMBER_ID: &str = "build-number";

const PROD_KEYWORDS: &[&str] = &["prod", "production"];
const STAGE_KEYWORDS: &[&str] = &["stage", "staging"];

pub const PROD_BACKGROUND: &str = "linear-gradient(135deg, #10b981, #059669)";
pub const STAGE_BACKGROUND: &str = "linear-gradient(135deg, #f59e0b, #d97706)";
pub const DEV_BACKGROUND: &str = "linear-gradient(135deg, #2563eb, #1d4ed8)";
pub const UNKNOWN_BACKGROUND: &str = "linear-gradient(135deg, #6b7280, #4b5563)";

/// Deployment tier a label normalizes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Prod,
    Stage,
    Dev,
    Unknown,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Prod => "prod",
            Tier::Stage => "stage",
            Tier::Dev => "dev",
            Tier::Unknown => "unknown",
        }
    }

    /// Badge background for this tier.
    pub fn background(self) -> &'static str {
        match self {
            Tier::Prod => PROD_BACKGROUND,
            Tier::Stage => STAGE_BACKGROUND,
            Tier::Dev => DEV_BACKGROUND,
            Tier::Unknown => UNKNOWN_BACKGROUND,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    MetaTag,
    Hostname,
}

/// The environment label as shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentLabel {
    raw: String,
    source: LabelSource,
}

impl EnvironmentLabel {
    /// The label as derived; an override keeps its original spelling.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn source(&self) -> LabelSource {
        self.source
    }

    pub fn tier(&self) -> Tier {
        tier_of(&self.raw)
    }

    pub fn badge_text(&self) -> String {
        format!("Environment: {}", self.raw.to_uppercase())
    }
}

/// Normalize any label, including the long spellings, to its tier.
///
/// Only case is folded; surrounding whitespace makes the label unrecognized.
pub fn tier_of(label: &str) -> Tier {
    match label.to_lowercase().as_str() {
        "prod" | "production" => Tier::Prod,
        "stage" | "staging" => Tier::Stage,
        "dev" | "development" => Tier::Dev,
        _ => Tier::Unknown,
    }
}

/// Background style for a label.
pub fn badge_background(label: &str) -> &'static str {
    tier_of(label).background()
}

/// Infer the tier from hostname keywords. Hosts with no keyword count as development.
pub fn tier_from_hostname(hostname: &str) -> Tier {
    let hostname = hostname.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| hostname.contains(k));

    if contains_any(PROD_KEYWORDS) {
        Tier::Prod
    } else if contains_any(STAGE_KEYWORDS) {
        Tier::Stage
    } else {
        // "dev", "development" and hosts without any keyword
        Tier::Dev
    }
}

/// Derive the label: an override always wins, the hostname is the fallback.
pub fn derive_label(hostname: &str, override_value: Option<&str>) -> EnvironmentLabel {
    match override_value {
        Some(value) => EnvironmentLabel {
            raw: value.to_string(),
            source: LabelSource::MetaTag,
        },
        None => EnvironmentLabel {
            raw: tier_from_hostname(hostname).as_str().to_string(),
            source: LabelSource::Hostname,
        },
    }
}

/// Write the badge, its background and the version labels.
///
/// Each write is skipped on its own when its element is absent.
pub fn display_environment_info(document: &mut Document, build: &BuildInfo) -> EnvironmentLabel {
    let override_value = document.meta_content(ENVIRONMENT_META);
    let label = derive_label(&document.location().hostname, override_value.as_deref());

    tracing::debug!(
        label = %label.as_str(),
        tier = %label.tier(),
        source = ?label.source(),
        "Derived environment label"
    );

    match document.get_element_by_id(ENV_NAME_ID) {
        Some(badge_text) => {
            document.set_text_content(badge_text, &label.badge_text());
            let badge = document
                .parent_element(badge_text)
                .and_then(|parent| document.element_mut(parent));
            match badge {
                Some(badge) => badge.set_style("background", label.tier().background()),
                None => tracing::debug!("Environment badge has no parent, skipping style"),
            }
        }
        None => tracing::debug!(id = ENV_NAME_ID, "Element absent, skipping badge"),
    }

    write_label(document, APP_VERSION_ID, &format!("Version: {}", build.app_version));
    write_label(document, BUILD_NUMBER_ID, &format!("Build: {}", build.build_number));

    label
}

fn write_label(document: &mut Document, id: &str, text: &str) {
    match document.get_element_by_id(id) {
        Some(element) => document.set_text_content(element, text),
        None => tracing::debug!(id, "Element absent, skipping label"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;

    fn build() -> BuildInfo {
        BuildInfo {
            app_version: "1.0.0".to_string(),
            build_number: "42".to_string(),
            environment: "unknown".to_string(),
        }
    }

    fn page_with_badge(hostname: &str) -> Document {
        let mut doc = Document::new(hostname);
        let body = doc.body();
        let badge = doc.append(body, Element::new("div").with_class("env-badge"));
        doc.append(badge, Element::new("span").with_id(ENV_NAME_ID));
        doc.append(body, Element::new("span").with_id(APP_VERSION_ID));
        doc.append(body, Element::new("span").with_id(BUILD_NUMBER_ID));
        doc
    }

    fn set_meta(doc: &mut Document, content: &str) {
        let head = doc.head();
        doc.append(
            head,
            Element::new("meta")
                .with_attr("name", ENVIRONMENT_META)
                .with_attr("content", content),
        );
    }

    #[test]
    fn test_hostname_prod() {
        let label = derive_label("api-prod-1.example.com", None);
        assert_eq!(label.as_str(), "prod");
        assert_eq!(label.source(), LabelSource::Hostname);
    }

    #[test]
    fn test_hostname_dev() {
        assert_eq!(derive_label("dev.example.com", None).as_str(), "dev");
    }

    #[test]
    fn test_hostname_priority_and_default() {
        assert_eq!(tier_from_hostname("staging.example.com"), Tier::Stage);
        assert_eq!(tier_from_hostname("stage-dev.example.com"), Tier::Stage);
        assert_eq!(tier_from_hostname("prod-staging.example.com"), Tier::Prod);
        assert_eq!(tier_from_hostname("development.internal"), Tier::Dev);
        assert_eq!(tier_from_hostname("example.com"), Tier::Dev);
        assert_eq!(tier_from_hostname(""), Tier::Dev);
        assert_eq!(tier_from_hostname("API.PROD.EXAMPLE.COM"), Tier::Prod);
    }

    #[test]
    fn test_override_wins_over_hostname() {
        let label = derive_label("api-prod-1.example.com", Some("stage"));
        assert_eq!(label.as_str(), "stage");
        assert_eq!(label.source(), LabelSource::MetaTag);
        assert_eq!(label.tier(), Tier::Stage);
    }

    #[test]
    fn test_badge_background_branches() {
        assert_eq!(badge_background("prod"), PROD_BACKGROUND);
        assert_eq!(badge_background("staging"), STAGE_BACKGROUND);
        assert_eq!(badge_background("development"), DEV_BACKGROUND);
        assert_eq!(badge_background("qa"), UNKNOWN_BACKGROUND);
        assert_eq!(badge_background("PRODUCTION"), PROD_BACKGROUND);
    }

    #[test]
    fn test_padded_label_is_unrecognized() {
        assert_eq!(tier_of(" prod "), Tier::Unknown);
        assert_eq!(badge_background("stage\n"), UNKNOWN_BACKGROUND);
    }

    #[test]
    fn test_display_writes_badge_and_labels() {
        let mut doc = page_with_badge("api-prod-1.example.com");
        let label = display_environment_info(&mut doc, &build());
        assert_eq!(label.tier(), Tier::Prod);

        let text = doc.get_element_by_id(ENV_NAME_ID).unwrap();
        assert_eq!(doc.element(text).unwrap().text_content(), "Environment: PROD");
        let badge = doc.parent_element(text).unwrap();
        assert_eq!(
            doc.element(badge).unwrap().style("background"),
            Some(PROD_BACKGROUND)
        );

        let version = doc.get_element_by_id(APP_VERSION_ID).unwrap();
        assert_eq!(doc.element(version).unwrap().text_content(), "Version: 1.0.0");
        let build_number = doc.get_element_by_id(BUILD_NUMBER_ID).unwrap();
        assert_eq!(doc.element(build_number).unwrap().text_content(), "Build: 42");
    }

    #[test]
    fn test_meta_override_keeps_spelling() {
        let mut doc = page_with_badge("dev.example.com");
        set_meta(&mut doc, "Staging");
        let label = display_environment_info(&mut doc, &build());
        assert_eq!(label.as_str(), "Staging");

        let text = doc.get_element_by_id(ENV_NAME_ID).unwrap();
        assert_eq!(doc.element(text).unwrap().text_content(), "Environment: STAGING");
        let badge = doc.parent_element(text).unwrap();
        assert_eq!(
            doc.element(badge).unwrap().style("background"),
            Some(STAGE_BACKGROUND)
        );
    }

    #[test]
    fn test_unrecognized_override_is_gray() {
        let mut doc = page_with_badge("prod.example.com");
        set_meta(&mut doc, "qa");
        let label = display_environment_info(&mut doc, &build());
        assert_eq!(label.tier(), Tier::Unknown);
        let text = doc.get_element_by_id(ENV_NAME_ID).unwrap();
        let badge = doc.parent_element(text).unwrap();
        assert_eq!(
            doc.element(badge).unwrap().style("background"),
            Some(UNKNOWN_BACKGROUND)
        );
    }

    #[test]
    fn test_badge_without_parent_keeps_text() {
        let mut doc = Document::new("api-prod-1.example.com");
        let root = doc.root();
        doc.element_mut(root).unwrap().set_attribute("id", ENV_NAME_ID);

        let label = display_environment_info(&mut doc, &build());

        assert_eq!(label.tier(), Tier::Prod);
        assert!(doc.parent_element(root).is_none());
        assert_eq!(doc.element(root).unwrap().text_content(), "Environment: PROD");
        assert_eq!(doc.element(root).unwrap().style("background"), None);
    }

    #[test]
    fn test_missing_badge_still_writes_labels() {
        let mut doc = Document::new("dev.example.com");
        let body = doc.body();
        let version = doc.append(body, Element::new("span").with_id(APP_VERSION_ID));

        display_environment_info(&mut doc, &build());

        assert_eq!(doc.element(version).unwrap().text_content(), "Version: 1.0.0");
        assert!(doc.get_element_by_id(BUILD_NUMBER_ID).is_none());
    }
}
