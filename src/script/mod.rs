//! Behavior of the status page.
//!
//! `PageScript` is the callable surface: each of the four page functions can
//! be run on its own against a `Page`, and `load` wires them to the ready
//! signal the way the page does when its script is loaded.
//!
//! Ready sequence, in order:
//! 1. `initialize_app` logs the build record and stamps the deploy time
//! 2. `setup_navigation` wires the nav links
//! 3. `display_environment_info` writes the badge and version labels
//! 4. `check_health_status` writes the health indicator

pub mod bootstrap;
pub mod environment;
pub mod health;
pub mod navigation;
pub mod reveal;

use std::rc::Rc;

use crate::config::BuildInfo;
use crate::page::{Document, ElementId, EventTarget, EventType, Page};

pub use bootstrap::{Clock, SystemClock};
pub use environment::{EnvironmentLabel, Tier};
pub use health::HealthStatus;
pub use reveal::{ScrollReveal, Visibility};

/// The page script, bound to one build record and clock.
#[derive(Clone)]
pub struct PageScript {
    build: Rc<BuildInfo>,
    clock: Rc<dyn Clock>,
}

impl PageScript {
    pub fn new(build: BuildInfo) -> Self {
        Self::with_clock(build, SystemClock)
    }

    pub fn with_clock(build: BuildInfo, clock: impl Clock + 'static) -> Self {
        Self {
            build: Rc::new(build),
            clock: Rc::new(clock),
        }
    }

    pub fn build(&self) -> &BuildInfo {
        &self.build
    }

    /// What happens when the script is loaded in a browser: print the banner,
    /// start the reveal watcher and wait for the ready signal.
    pub fn load(&self, page: &mut Page) -> ScrollReveal {
        for line in banner(&self.build).lines() {
            tracing::info!("{}", line);
        }
        let reveal = ScrollReveal::install(page);
        self.on_ready(page);
        reveal
    }

    /// Run the ready sequence once, without a reveal watcher.
    ///
    /// Used when rendering on the server, where there is no viewport to reveal sections in.
    pub fn prerender(&self, page: &mut Page) {
        self.on_ready(page);
        page.dispatch_ready();
    }

    fn on_ready(&self, page: &mut Page) {
        let script = self.clone();
        page.add_event_listener(
            EventTarget::Document,
            EventType::DomContentLoaded,
            move |page, _| {
                script.initialize_app(&mut page.document);
                script.setup_navigation(page);
                script.display_environment_info(&mut page.document);
                script.check_health_status(&mut page.document);
            },
        );
    }

    pub fn initialize_app(&self, document: &mut Document) {
        bootstrap::initialize_app(document, &self.build, self.clock.as_ref());
    }

    pub fn setup_navigation(&self, page: &mut Page) -> Rc<[ElementId]> {
        navigation::setup_navigation(page)
    }

    pub fn display_environment_info(&self, document: &mut Document) -> EnvironmentLabel {
        environment::display_environment_info(document, &self.build)
    }

    pub fn check_health_status(&self, document: &mut Document) -> HealthStatus {
        health::check_health_status(document)
    }
}

impl std::fmt::Debug for PageScript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageScript")
            .field("build", &self.build)
            .finish_non_exhaustive()
    }
}

/// Startup banner naming the delivery stack.
pub fn banner(build: &BuildInfo) -> String {
    format!(
        "DevSecOps CI/CD Pipeline\n\
         Built with: Kubernetes (AWS EKS), ArgoCD (GitOps), GitHub Actions, Docker\n\
         Version: {}\n\
         Environment: {}",
        build.app_version, build.environment
    )
}
