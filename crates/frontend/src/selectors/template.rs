//! Markup rendering for a single option selector.
//!
//! Templates are minijinja sources rendered with `option_id`, `option_name`,
//! `option_values` and `product_id`. The template is registered under an
//! `.html` name, so interpolated values are HTML-escaped.

use minijinja::{Environment, Error, ErrorKind, Value};
use regex::RegexBuilder;

const TEMPLATE_NAME: &str = "selector.html";

/// Built-in markup satisfying the selector contract: a container with id
/// `selector-{product_id}-{option_id}`, an `.options` sub-container and one
/// child per value carrying `data-value`.
pub const DEFAULT_TEMPLATE: &str = r#"<div class="selector-wrapper" id="selector-{{ product_id }}-{{ option_id }}">
  <label class="selector-wrapper__label">{{ option_name }}</label>
  <div class="options">
    {%- for value in option_values %}
    <span class="option" data-value="{{ value }}" role="button">{{ value }}</span>
    {%- endfor %}
  </div>
</div>"#;

/// Compiled selector template.
pub struct SelectorTemplate {
    env: Environment<'static>,
}

impl SelectorTemplate {
    pub fn new(source: impl Into<String>) -> Result<Self, Error> {
        let mut env = Environment::new();
        env.add_test("eq", minijinja::tests::is_eq);
        env.add_test("matching", is_matching);
        env.add_template_owned(TEMPLATE_NAME, source.into())?;
        Ok(Self { env })
    }

    pub fn builtin() -> Result<Self, Error> {
        Self::new(DEFAULT_TEMPLATE)
    }

    pub fn render(&self, ctx: Value) -> Result<String, Error> {
        self.env.get_template(TEMPLATE_NAME)?.render(ctx)
    }
}

/// `{% if option_name is matching("olor") %}`: case-insensitive regex match.
fn is_matching(value: &str, pattern: &str) -> Result<bool, Error> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;
    Ok(regex.is_match(value))
}
