//! Health indicator.
//!
//! The page has no backend to ask, so the status is always healthy. A real
//! liveness check would replace `current_status`.

use crate::page::Document;

pub const HEALTH_STATUS_ID: &str = "health-status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn text(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "● Healthy",
            HealthStatus::Unhealthy => "● Unhealthy",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "status-healthy",
            HealthStatus::Unhealthy => "status-unhealthy",
        }
    }
}

fn current_status() -> HealthStatus {
    HealthStatus::Healthy
}

/// Render a status into the health element, replacing its classes.
pub fn render_health(document: &mut Document, status: HealthStatus) {
    let Some(id) = document.get_element_by_id(HEALTH_STATUS_ID) else {
        tracing::debug!(id = HEALTH_STATUS_ID, "Element absent, skipping health status");
        return;
    };
    document.set_text_content(id, status.text());
    if let Some(element) = document.element_mut(id) {
        element.set_class_name(status.class_name());
    }
}

pub fn check_health_status(document: &mut Document) -> HealthStatus {
    let status = current_status();
    render_health(document, status);
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;

    #[test]
    fn test_writes_healthy_indicator() {
        let mut doc = Document::new("localhost");
        let body = doc.body();
        let id = doc.append(
            body,
            Element::new("span")
                .with_id(HEALTH_STATUS_ID)
                .with_class("status-unknown"),
        );

        assert_eq!(check_health_status(&mut doc), HealthStatus::Healthy);

        let element = doc.element(id).unwrap();
        assert_eq!(element.text_content(), "● Healthy");
        assert_eq!(element.class_name(), "status-healthy");
    }

    #[test]
    fn test_unhealthy_rendering() {
        let mut doc = Document::new("localhost");
        let body = doc.body();
        let id = doc.append(body, Element::new("span").with_id(HEALTH_STATUS_ID));

        render_health(&mut doc, HealthStatus::Unhealthy);

        let element = doc.element(id).unwrap();
        assert_eq!(element.text_content(), "● Unhealthy");
        assert_eq!(element.class_name(), "status-unhealthy");
    }

    #[test]
    fn test_absent_element_is_skipped() {
        let mut doc = Document::new("localhost");
        assert_eq!(check_health_status(&mut doc), HealthStatus::Healthy);
    }
}
