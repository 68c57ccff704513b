//! HTML templates

use minijinja::Environment;

pub(crate) const DASHBOARD: &str = "dashboard.html";

/// Template environment with every page registered.
///
/// # Errors
///
/// Returns an error if a template fails to parse.
pub(crate) fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();

    env.add_template(DASHBOARD, include_str!("../templates/dashboard.html"))?;

    Ok(env)
}
