//! Stylesheet for the landing page.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the landing page stylesheet.
    pub fn generate_css() -> String {
        INDEX_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Stylesheet to inline into the landing page, minified when requested.
    pub fn index_css(minify: bool) -> String {
        let css = Self::generate_css();
        if !minify {
            return css;
        }

        match Self::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Falling back to unminified stylesheet: {}", e);
                css
            }
        }
    }
}

const INDEX_CSS: &str = r#"body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  max-width: 800px;
  margin: 0 auto;
  padding: 2rem;
  line-height: 1.6;
}

h1 {
  color: #2d3748;
  border-bottom: 2px solid #e2e8f0;
  padding-bottom: 0.5rem;
}

.presentation {
  display: block;
  padding: 1rem;
  margin: 1rem 0;
  border: 1px solid #e2e8f0;
  border-radius: 8px;
  text-decoration: none;
  color: #2d3748;
  transition: all 0.2s;
}

.presentation:hover {
  border-color: #3182ce;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.1);
  transform: translateY(-2px);
}

.presentation-title {
  font-size: 1.25rem;
  font-weight: 600;
  margin-bottom: 0.5rem;
}

.presentation-path {
  font-size: 0.875rem;
  color: #718096;
  font-family: 'SF Mono', Monaco, monospace;
}

.empty {
  color: #718096;
  font-style: italic;
}

.footer {
  margin-top: 3rem;
  padding-top: 1rem;
  border-top: 1px solid #e2e8f0;
  text-align: center;
  color: #718096;
  font-size: 0.875rem;
}
"#;
