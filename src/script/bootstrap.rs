//! Startup diagnostics and the deploy timestamp.

use chrono::{DateTime, Local};

use crate::config::BuildInfo;
use crate::page::Document;

pub const DEPLOY_TIME_ID: &str = "deploy-time";

/// Browser-default (en-US) rendering of a local date and time, e.g. `10/17/2026, 3:04:05 PM`
pub const DEPLOY_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

pub fn format_deploy_time(time: &DateTime<Local>) -> String {
    time.format(DEPLOY_TIME_FORMAT).to_string()
}

/// Log the build record and stamp the deploy time into the page.
pub fn initialize_app(document: &mut Document, build: &BuildInfo, clock: &dyn Clock) {
    tracing::info!(
        environment = %build.environment,
        version = %build.app_version,
        build = %build.build_number,
        "Pipeline page initialized"
    );

    let deploy_time = format_deploy_time(&clock.now());
    match document.get_element_by_id(DEPLOY_TIME_ID) {
        Some(element) => document.set_text_content(element, &deploy_time),
        None => tracing::debug!(id = DEPLOY_TIME_ID, "Element absent, skipping deploy time"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2026, 10, 7, 15, 4, 5).unwrap())
    }

    #[test]
    fn test_format_deploy_time() {
        assert_eq!(format_deploy_time(&clock().0), "10/7/2026, 3:04:05 PM");
        let morning = Local.with_ymd_and_hms(2026, 1, 2, 0, 30, 0).unwrap();
        assert_eq!(format_deploy_time(&morning), "1/2/2026, 12:30:00 AM");
    }

    #[test]
    fn test_stamps_deploy_time() {
        let mut doc = Document::new("localhost");
        let body = doc.body();
        let id = doc.append(body, Element::new("span").with_id(DEPLOY_TIME_ID));

        initialize_app(&mut doc, &BuildInfo::from_lookup(|_| None), &clock());

        assert_eq!(doc.element(id).unwrap().text_content(), "10/7/2026, 3:04:05 PM");
    }

    #[test]
    fn test_missing_deploy_time_is_skipped() {
        let mut doc = Document::new("localhost");
        initialize_app(&mut doc, &BuildInfo::from_lookup(|_| None), &clock());
        assert!(doc.get_element_by_id(DEPLOY_TIME_ID).is_none());
    }
}
