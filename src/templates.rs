use tera::Tera;

use crate::error::AppError;

/// Name of the page layout template
pub const INDEX_TEMPLATE: &str = "index.html";

/// Initialize the Tera template engine from the templates matching `glob`
pub fn init_templates(glob: &str) -> Result<Tera, AppError> {
    let tera = Tera::new(glob)?;
    if !tera.get_template_names().any(|name| name == INDEX_TEMPLATE) {
        return Err(AppError::Internal(format!(
            "template '{}' not found under '{}'",
            INDEX_TEMPLATE, glob
        )));
    }
    Ok(tera)
}

/// Templates compiled into the binary, used by tests.
#[cfg(test)]
pub(crate) fn embedded_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))
        .unwrap();
    tera
}
