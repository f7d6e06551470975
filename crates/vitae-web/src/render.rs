//! Server-rendered page templates.
//!
//! All templates are embedded at compile time and registered once at
//! startup; handlers render by name. The PDF export reuses the text-flavour
//! detail template as its page source.

use minijinja::Environment;
use serde::Serialize;

const LIST_TEMPLATE: &str = include_str!("../templates/list.html");
const DETAIL_TEMPLATE: &str = include_str!("../templates/detail.html");
const DETAIL_TEXT_TEMPLATE: &str = include_str!("../templates/detail.txt");
const LOGS_TEMPLATE: &str = include_str!("../templates/logs.html");

/// Pre-compiled minijinja environment for every page the site serves.
pub struct Templates {
  env: Environment<'static>,
}

impl Templates {
  /// Compile the embedded templates.
  pub fn new() -> Result<Self, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("list", LIST_TEMPLATE)?;
    env.add_template("detail", DETAIL_TEMPLATE)?;
    env.add_template("detail_text", DETAIL_TEXT_TEMPLATE)?;
    env.add_template("logs", LOGS_TEMPLATE)?;
    Ok(Self { env })
  }

  /// Render the named template with `ctx`.
  pub fn render<C>(&self, name: &str, ctx: C) -> Result<String, minijinja::Error>
  where
    C: Serialize,
  {
    self.env.get_template(name)?.render(ctx)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use minijinja::context;

  #[test]
  fn all_templates_compile() {
    Templates::new().unwrap();
  }

  #[test]
  fn unknown_template_is_an_error() {
    let templates = Templates::new().unwrap();
    assert!(templates.render("nope", context! {}).is_err());
  }
}
