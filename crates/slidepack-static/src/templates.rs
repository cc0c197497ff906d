//! Template engine for rendering the landing page.

use minijinja::{context, Environment};

/// A deck entry on the landing page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DeckLink {
    /// Deck name, used for the link target and the displayed path
    pub name: String,
    /// Display title
    pub title: String,
}

/// Context for rendering the landing page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IndexContext {
    /// Page heading and `<title>`
    pub title: String,
    /// Inline stylesheet
    pub css: String,
    /// Decks in discovery order
    pub decks: Vec<DeckLink>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in landing page.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // The .html suffix turns on HTML autoescaping
        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        Self { env }
    }

    /// Render the landing page.
    pub fn render_index(&self, context: &IndexContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("index.html")?;

        tmpl.render(context! {
            title => &context.title,
            css => &context.css,
            decks => &context.decks,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{ title }}</title>
  <style>
{{ css | safe }}
  </style>
</head>
<body>
  <h1>📊 {{ title }}</h1>
  <p>Welcome to the collection of presentations. Click on any presentation below to view it:</p>
{% for deck in decks %}
  <a href="./{{ deck.name }}/" class="presentation">
    <div class="presentation-title">{{ deck.title }}</div>
    <div class="presentation-path">/{{ deck.name }}/</div>
  </a>
{% else %}
  <p class="empty">No presentations found.</p>
{% endfor %}
  <div class="footer">
    <p>Built with <a href="https://sli.dev" target="_blank">Slidev</a></p>
  </div>
</body>
</html>
"##;
