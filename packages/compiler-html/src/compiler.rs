use playground_compiler_css::{scope_css, ScopeSelector};
use tracing::debug;

pub const DEFAULT_TITLE: &str = "Playground";

/// File name the external stylesheet is linked under
pub const DEFAULT_STYLESHEET_HREF: &str = "style.css";

/// Buffer contents going into a document. `None` means the buffer does not
/// exist; both absent and empty are tolerated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeInput<'a> {
    pub markup: Option<&'a str>,
    pub style: Option<&'a str>,
}

impl<'a> ComposeInput<'a> {
    pub fn new(markup: &'a str, style: &'a str) -> Self {
        Self {
            markup: Some(markup),
            style: Some(style),
        }
    }
}

/// How the stylesheet ends up in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetMode {
    /// Embedded `<style>` block
    Inline,
    /// `<link>` to a separate file; the stylesheet text is returned
    /// alongside the document
    External { href: String },
}

/// Options for document composition
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Document title
    pub title: String,
    /// Confine styles to this container. `None` keeps the author stylesheet
    /// and markup exactly as written.
    pub scope: Option<ScopeSelector>,
    pub stylesheet: StylesheetMode,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            scope: None,
            stylesheet: StylesheetMode::Inline,
        }
    }
}

impl CompileOptions {
    pub fn preview(scope: ScopeSelector) -> Self {
        Self {
            scope: Some(scope),
            ..Self::default()
        }
    }

    pub fn external(href: impl Into<String>) -> Self {
        Self {
            stylesheet: StylesheetMode::External { href: href.into() },
            ..Self::default()
        }
    }
}

/// Output of composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedDocument {
    pub html: String,
    /// Stylesheet to write next to the document in external mode
    pub stylesheet: Option<String>,
}

struct Context {
    buffer: String,
}

impl Context {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        self.add(text);
        self.add("\n");
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compose a standalone HTML document from markup and stylesheet buffers
pub fn compose(input: &ComposeInput<'_>, options: &CompileOptions) -> ComposedDocument {
    let markup = input.markup.unwrap_or("");
    let stylesheet = input
        .style
        .filter(|css| !css.is_empty())
        .map(|css| match &options.scope {
            Some(scope) => scope_css(css, scope),
            None => css.to_string(),
        });

    let mut ctx = Context::new();

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.add_line("<head>");
    ctx.add_line("<meta charset=\"UTF-8\" />");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />");
    ctx.add_line(&format!("<title>{}</title>", escape_text(&options.title)));

    let external = match (&options.stylesheet, stylesheet) {
        (_, None) => None,
        (StylesheetMode::Inline, Some(css)) => {
            ctx.add_line("<style>");
            ctx.add_line(&css);
            ctx.add_line("</style>");
            None
        }
        (StylesheetMode::External { href }, Some(css)) => {
            ctx.add_line(&format!(
                "<link rel=\"stylesheet\" href=\"{}\" />",
                escape_attribute(href)
            ));
            Some(css)
        }
    };

    ctx.add_line("</head>");
    ctx.add_line("<body>");
    compile_body(markup, options.scope.as_ref(), &mut ctx);
    ctx.add_line("</body>");
    ctx.add_line("</html>");

    let html = ctx.get_output();
    debug!(
        bytes = html.len(),
        scoped = options.scope.is_some(),
        external = external.is_some(),
        "Composed document"
    );

    ComposedDocument {
        html,
        stylesheet: external,
    }
}

/// Compose with an inline stylesheet and return the document text
pub fn compose_to_html(input: &ComposeInput<'_>, options: &CompileOptions) -> String {
    compose(input, options).html
}

fn compile_body(markup: &str, scope: Option<&ScopeSelector>, ctx: &mut Context) {
    if markup.is_empty() {
        return;
    }

    // Author markup goes in verbatim
    match scope {
        Some(scope) => {
            ctx.add_line(&scope.open_tag());
            ctx.add_line(markup);
            ctx.add_line(&scope.close_tag());
        }
        None => ctx.add_line(markup),
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
