use playground_stylesheet::{parse, Block, RuleKind};

const APP_STYLES: &str = r#"@import url("https://fonts.example/inter.css");

:root {
    --accent: #3366ff;
}

/* Layout */
html, body { margin: 0; }

.card > h1,
.card > h2 {
    font: 600 1.2em/1.4 Inter, sans-serif;
}

@media (max-width: 600px) {
    .card { padding: 8px; }

    @supports (display: grid) {
        .grid { display: grid; }
    }
}

@font-face {
    font-family: "Inter";
    src: url(inter.woff2) format("woff2");
}

@keyframes fade {
    from { opacity: 0 }
    to { opacity: 1 }
}
"#;

#[test]
fn test_realistic_sheet_round_trips() {
    assert_eq!(parse(APP_STYLES).to_css(), APP_STYLES);
}

#[test]
fn test_realistic_sheet_structure() {
    let sheet = parse(APP_STYLES);

    let kinds: Vec<&RuleKind> = sheet.rules.iter().map(|r| &r.kind).collect();
    assert_eq!(kinds.len(), 7);
    assert_eq!(
        kinds[0],
        &RuleKind::AtRule {
            name: "import".to_string()
        }
    );
    assert_eq!(sheet.rules[0].block, Block::Statement);
    assert_eq!(sheet.rules[1].selector_text.as_deref(), Some(":root"));
    assert_eq!(sheet.rules[2].selector_text.as_deref(), Some("html, body"));
    assert!(sheet.rules[2].leading.contains("/* Layout */"));
    assert_eq!(
        sheet.rules[3].selector_text.as_deref(),
        Some(".card > h1,\n.card > h2")
    );

    let media = &sheet.rules[4];
    assert_eq!(media.child_rules.len(), 2);
    assert_eq!(
        media.child_rules[1].kind,
        RuleKind::Group {
            name: "supports".to_string()
        }
    );
    assert_eq!(
        media.child_rules[1].child_rules[0].selector_text.as_deref(),
        Some(".grid")
    );

    assert_eq!(sheet.rules[5].selector_text, None);
    assert_eq!(sheet.rules[6].selector_text, None);
    assert!(sheet.rules[6].child_rules.is_empty());
    assert_eq!(sheet.rule_count(), 10);
}
