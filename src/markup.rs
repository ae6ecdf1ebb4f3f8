//! Markup of the status page.
//!
//! Builds the page the script runs against: environment badge, navigation,
//! content sections and the footer labels the script fills in.

use crate::page::{Document, Element};
use crate::script::environment::{APP_VERSION_ID, BUILD_NUMBER_ID, ENVIRONMENT_META, ENV_NAME_ID};
use crate::script::bootstrap::DEPLOY_TIME_ID;
use crate::script::health::HEALTH_STATUS_ID;

/// Sections in page order: (anchor id, heading, summary)
pub const SECTIONS: &[(&str, &str, &str)] = &[
    (
        "overview",
        "Overview",
        "A containerized web application delivered through an automated, security-gated pipeline.",
    ),
    (
        "pipeline",
        "CI/CD Pipeline",
        "Every push is built, tested and packaged by GitHub Actions, then promoted through environments by ArgoCD.",
    ),
    (
        "security",
        "Security",
        "Dependency, image and infrastructure scans gate each promotion.",
    ),
    (
        "infrastructure",
        "Infrastructure",
        "Workloads run on Kubernetes (AWS EKS) with configuration injected per environment.",
    ),
];

/// Build the status page for `hostname`, with the environment meta tag when an override is set.
pub fn status_page(hostname: &str, environment_override: Option<&str>) -> Document {
    let mut doc = Document::new(hostname);

    if let Some(environment) = environment_override {
        let head = doc.head();
        doc.append(
            head,
            Element::new("meta")
                .with_attr("name", ENVIRONMENT_META)
                .with_attr("content", environment),
        );
    }

    let body = doc.body();
    let header = doc.append(body, Element::new("header").with_class("site-header"));
    doc.append(header, Element::new("h1").with_text("DevSecOps Pipeline"));
    let badge = doc.append(header, Element::new("div").with_class("env-badge"));
    doc.append(badge, Element::new("span").with_id(ENV_NAME_ID).with_text("Environment: ..."));

    let nav = doc.append(body, Element::new("nav").with_class("site-nav"));
    for (index, (anchor, heading, _)) in SECTIONS.iter().enumerate() {
        let mut link = Element::new("a")
            .with_class("nav-link")
            .with_attr("href", &format!("#{anchor}"))
            .with_text(heading);
        if index == 0 {
            link.add_class("active");
        }
        doc.append(nav, link);
    }

    let main = doc.append(body, Element::new("main"));
    for (anchor, heading, summary) in SECTIONS {
        let section = doc.append(main, Element::new("section").with_id(anchor));
        doc.append(section, Element::new("h2").with_text(heading));
        doc.append(section, Element::new("p").with_text(summary));
    }

    let footer = doc.append(body, Element::new("footer").with_class("site-footer"));
    for id in [APP_VERSION_ID, BUILD_NUMBER_ID, DEPLOY_TIME_ID] {
        doc.append(footer, Element::new("span").with_id(id));
    }
    doc.append(
        footer,
        Element::new("span")
            .with_id(HEALTH_STATUS_ID)
            .with_class("status-unknown")
            .with_text("● Checking"),
    );

    doc
}
