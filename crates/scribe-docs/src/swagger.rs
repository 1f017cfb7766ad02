//! Swagger UI page.
//!
//! The page loads Swagger UI from a CDN and points it at the document URL,
//! so the document is fetched (and compiled) when the page opens rather than
//! embedded at render time.

use serde_json::json;

const DEFAULT_SWAGGER_VERSION: &str = "5.18.2";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>__TITLE__</title>
  <link rel="stylesheet" href="__CDN__/swagger-ui.css">
</head>
<body style="margin: 0">
  <div id="swagger-ui"></div>
  <script src="__CDN__/swagger-ui-bundle.js"></script>
  <script src="__CDN__/swagger-ui-standalone-preset.js"></script>
  <script>
    const options = __OPTIONS__;
    options.presets = [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset];
    options.layout = "StandaloneLayout";
    window.ui = SwaggerUIBundle(options);
  </script>
</body>
</html>
"#;

/// The documentation page mounted at `{path}/`.
///
/// ```rust
/// use scribe_docs::{DocExpansion, SwaggerUi};
///
/// let ui = SwaggerUi::new("/prefix/ui", "Pets").doc_expansion(DocExpansion::Full);
/// assert_eq!(ui.page_path(), "/prefix/ui/");
/// assert!(ui.html().contains(r#""url":"/prefix/ui/openapi.json""#));
/// ```
#[derive(Debug, Clone)]
pub struct SwaggerUi {
    path: String,
    title: String,
    deep_linking: bool,
    doc_expansion: DocExpansion,
    swagger_version: String,
}

/// How much of the operation list is expanded when the page opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocExpansion {
    /// Tags collapsed.
    None,
    /// Tags open, operations collapsed.
    #[default]
    List,
    /// Everything open.
    Full,
}

impl DocExpansion {
    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::List => "list",
            Self::Full => "full",
        }
    }
}

impl SwaggerUi {
    /// UI served under `path` for an API titled `api_title`.
    #[must_use]
    pub fn new(path: impl Into<String>, api_title: &str) -> Self {
        let title = if api_title.is_empty() {
            "Swagger UI".to_string()
        } else {
            format!("{api_title} - Swagger UI")
        };
        Self {
            path: path.into(),
            title,
            deep_linking: true,
            doc_expansion: DocExpansion::default(),
            swagger_version: DEFAULT_SWAGGER_VERSION.to_string(),
        }
    }

    /// Overrides the `<title>`.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Whether the URL fragment follows the selected operation.
    #[must_use]
    pub fn deep_linking(mut self, enabled: bool) -> Self {
        self.deep_linking = enabled;
        self
    }

    /// Initial expansion of the operation list.
    #[must_use]
    pub fn doc_expansion(mut self, expansion: DocExpansion) -> Self {
        self.doc_expansion = expansion;
        self
    }

    /// `swagger-ui-dist` release loaded from unpkg.
    #[must_use]
    pub fn swagger_version(mut self, version: impl Into<String>) -> Self {
        self.swagger_version = version.into();
        self
    }

    /// Mount point, as given.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path of the page itself.
    #[must_use]
    pub fn page_path(&self) -> String {
        format!("{}/", self.base())
    }

    /// Path of the OpenAPI JSON document.
    #[must_use]
    pub fn spec_path(&self) -> String {
        format!("{}/openapi.json", self.base())
    }

    fn base(&self) -> &str {
        self.path.trim_end_matches('/')
    }

    /// Renders the page.
    #[must_use]
    pub fn html(&self) -> String {
        let options = json!({
            "url": self.spec_path(),
            "dom_id": "#swagger-ui",
            "deepLinking": self.deep_linking,
            "docExpansion": self.doc_expansion.as_str(),
        });
        // `</` would end the inline script early.
        let options = options.to_string().replace("</", "<\\/");
        let cdn = format!(
            "https://unpkg.com/swagger-ui-dist@{}",
            html_escape(&self.swagger_version)
        );

        PAGE_TEMPLATE
            .replace("__TITLE__", &html_escape(&self.title))
            .replace("__CDN__", &cdn)
            .replace("__OPTIONS__", &options)
    }

    /// [`html`](Self::html) as a response body.
    #[must_use]
    pub fn html_bytes(&self) -> bytes::Bytes {
        bytes::Bytes::from(self.html())
    }
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
