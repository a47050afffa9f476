use crate::{compose, compose_to_html, ComposeInput, CompileOptions, StylesheetMode};
use playground_compiler_css::ScopeSelector;

const MARKUP: &str = "<p class='x'>hi</p>";
const STYLE: &str = "p { color: red; } #a { color: blue; } :root { --c: 1; }";
const SCOPED: &str = ".preview p { color: red; } #a { color: blue; } :root { --c: 1; }";

fn preview_options() -> CompileOptions {
    CompileOptions::preview(ScopeSelector::parse(".preview").unwrap())
}

#[test]
fn test_compose_preview_document() {
    let html = compose_to_html(&ComposeInput::new(MARKUP, STYLE), &preview_options());

    assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n"));
    assert!(html.contains("<title>Playground</title>"));
    assert!(html.contains(&format!("<style>\n{}\n</style>", SCOPED)));
    assert!(html.contains(&format!(
        "<body>\n<div class=\"preview\">\n{}\n</div>\n</body>",
        MARKUP
    )));
    assert!(html.ends_with("</html>\n"));
}

#[test]
fn test_compose_without_scope_embeds_raw_stylesheet() {
    let html = compose_to_html(&ComposeInput::new(MARKUP, STYLE), &CompileOptions::default());

    assert!(html.contains(&format!("<style>\n{}\n</style>", STYLE)));
    assert!(html.contains(&format!("<body>\n{}\n</body>", MARKUP)));
    assert!(!html.contains("class=\"preview\""));
}

#[test]
fn test_missing_style_buffer_omits_style_block() {
    let input = ComposeInput {
        markup: Some(MARKUP),
        style: None,
    };
    let html = compose_to_html(&input, &preview_options());
    assert!(!html.contains("<style>"));

    let html = compose_to_html(&ComposeInput::new(MARKUP, ""), &preview_options());
    assert!(!html.contains("<style>"));
}

#[test]
fn test_missing_markup_produces_empty_body() {
    let input = ComposeInput {
        markup: None,
        style: Some(STYLE),
    };
    let html = compose_to_html(&input, &preview_options());
    assert!(html.contains("<body>\n</body>"));

    let html = compose_to_html(&ComposeInput::default(), &preview_options());
    assert!(html.contains("<body>\n</body>"));
    assert!(!html.contains("<style>"));
}

#[test]
fn test_markup_is_not_sanitized() {
    let markup = "<script>alert('x')</script><div onclick=\"go()\">&nbsp;</div>";
    let html = compose_to_html(&ComposeInput::new(markup, ""), &CompileOptions::default());
    assert!(html.contains(markup));
}

#[test]
fn test_composition_is_deterministic() {
    let options = preview_options();
    let input = ComposeInput::new(MARKUP, STYLE);

    let first = compose(&input, &options);
    for _ in 0..5 {
        assert_eq!(compose(&input, &options), first);
    }
}

#[test]
fn test_external_stylesheet_mode() {
    let mut options = preview_options();
    options.stylesheet = StylesheetMode::External {
        href: "style.css".to_string(),
    };

    let doc = compose(&ComposeInput::new(MARKUP, STYLE), &options);

    assert!(doc
        .html
        .contains("<link rel=\"stylesheet\" href=\"style.css\" />"));
    assert!(!doc.html.contains("<style>"));
    assert_eq!(doc.stylesheet.as_deref(), Some(SCOPED));
}

#[test]
fn test_external_mode_without_scope_keeps_author_stylesheet() {
    let doc = compose(
        &ComposeInput::new(MARKUP, STYLE),
        &CompileOptions::external("css/app.css"),
    );

    assert!(doc.html.contains("href=\"css/app.css\""));
    assert_eq!(doc.stylesheet.as_deref(), Some(STYLE));
}

#[test]
fn test_external_mode_without_stylesheet_has_no_link() {
    let doc = compose(
        &ComposeInput::new(MARKUP, ""),
        &CompileOptions::external("style.css"),
    );

    assert!(!doc.html.contains("<link"));
    assert_eq!(doc.stylesheet, None);
}

#[test]
fn test_title_is_escaped() {
    let options = CompileOptions {
        title: "A <b> & C".to_string(),
        ..CompileOptions::default()
    };
    let html = compose_to_html(&ComposeInput::default(), &options);
    assert!(html.contains("<title>A &lt;b&gt; &amp; C</title>"));
}

#[test]
fn test_tag_scope_wraps_markup() {
    let options = CompileOptions::preview(ScopeSelector::parse("main").unwrap());
    let html = compose_to_html(&ComposeInput::new("<p>x</p>", "p { a: b }"), &options);

    assert!(html.contains("<main>\n<p>x</p>\n</main>"));
    assert!(html.contains("main p { a: b }"));
}
