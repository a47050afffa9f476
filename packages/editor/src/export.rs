//! # Exports
//!
//! Turns a session snapshot into the formats collaborators hand to the
//! user. Exports always carry the author's unscoped text; scoping only
//! exists for the in-page preview.

use crate::Snapshot;
use playground_compiler_html::{
    compose, ComposeInput, CompileOptions, StylesheetMode, DEFAULT_STYLESHEET_HREF,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid share base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// File name of a downloaded page
pub const DOWNLOAD_FILE_NAME: &str = "app.html";

/// Document file name inside an archive
pub const ARCHIVE_INDEX: &str = "index.html";

/// Settings for submitting to a remote code-sharing service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOptions {
    /// Form action the payload is posted to
    #[serde(default = "default_remote_action")]
    pub action: String,

    /// External stylesheets the service should load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_external: Option<String>,

    /// External scripts the service should load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js_external: Option<String>,

    /// Editor layout flags understood by the service
    #[serde(default = "default_editors")]
    pub editors: String,
}

fn default_remote_action() -> String {
    "https://codepen.io/pen/define".to_string()
}

fn default_editors() -> String {
    "1100".to_string()
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            action: default_remote_action(),
            css_external: None,
            js_external: None,
            editors: default_editors(),
        }
    }
}

/// What the user asked to export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportAction {
    /// One standalone HTML page
    Download,
    /// Page plus a separate stylesheet file
    Archive,
    /// Payload for a remote code-sharing service
    Remote(RemoteOptions),
    /// Link carrying the buffers as query parameters
    Share { base_url: String },
}

impl ExportAction {
    pub fn kind(&self) -> &'static str {
        match self {
            ExportAction::Download => "download",
            ExportAction::Archive => "archive",
            ExportAction::Remote(_) => "remote",
            ExportAction::Share { .. } => "share",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub path: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportArtifact {
    Document(ExportFile),
    /// Files to package; archiving them is up to the caller
    Archive(Vec<ExportFile>),
    /// JSON payload to post to `action`
    Remote { action: String, payload: String },
    ShareLink(String),
}

#[derive(Serialize)]
struct RemotePayload<'a> {
    title: &'a str,
    html: &'a str,
    css: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    css_external: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    js_external: Option<&'a str>,
    editors: &'a str,
}

/// Produce the export artifact for `action`
pub fn export(snapshot: &Snapshot, action: &ExportAction, title: &str) -> ExportResult<ExportArtifact> {
    let input = ComposeInput::new(&snapshot.markup, &snapshot.style);

    match action {
        ExportAction::Download => {
            let options = CompileOptions {
                title: title.to_string(),
                ..CompileOptions::default()
            };
            Ok(ExportArtifact::Document(ExportFile {
                path: DOWNLOAD_FILE_NAME.to_string(),
                contents: compose(&input, &options).html,
            }))
        }

        ExportAction::Archive => {
            let options = CompileOptions {
                title: title.to_string(),
                stylesheet: StylesheetMode::External {
                    href: DEFAULT_STYLESHEET_HREF.to_string(),
                },
                ..CompileOptions::default()
            };
            let document = compose(&input, &options);

            let mut files = vec![ExportFile {
                path: ARCHIVE_INDEX.to_string(),
                contents: document.html,
            }];
            if let Some(stylesheet) = document.stylesheet {
                files.push(ExportFile {
                    path: DEFAULT_STYLESHEET_HREF.to_string(),
                    contents: stylesheet,
                });
            }
            Ok(ExportArtifact::Archive(files))
        }

        ExportAction::Remote(options) => {
            let payload = RemotePayload {
                title,
                html: &snapshot.markup,
                css: &snapshot.style,
                css_external: options.css_external.as_deref(),
                js_external: options.js_external.as_deref(),
                editors: &options.editors,
            };
            Ok(ExportArtifact::Remote {
                action: options.action.clone(),
                payload: serde_json::to_string(&payload)?,
            })
        }

        ExportAction::Share { base_url } => {
            let mut url = Url::parse(base_url)?;
            url.query_pairs_mut()
                .append_pair("html", &snapshot.markup)
                .append_pair("css", &snapshot.style);
            Ok(ExportArtifact::ShareLink(url.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            markup: "<p class='x'>hi</p>".to_string(),
            style: "p { color: red; }".to_string(),
        }
    }

    #[test]
    fn test_download_embeds_raw_stylesheet() {
        let ExportArtifact::Document(file) = export(&snapshot(), &ExportAction::Download, "My App").unwrap()
        else {
            panic!("expected a document");
        };

        assert_eq!(file.path, "app.html");
        assert!(file.contents.contains("<title>My App</title>"));
        assert!(file.contents.contains("<style>\np { color: red; }\n</style>"));
        assert!(file.contents.contains("<body>\n<p class='x'>hi</p>\n</body>"));
    }

    #[test]
    fn test_archive_has_separate_stylesheet() {
        let ExportArtifact::Archive(files) = export(&snapshot(), &ExportAction::Archive, "App").unwrap()
        else {
            panic!("expected an archive");
        };

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "index.html");
        assert!(files[0].contents.contains("<link rel=\"stylesheet\" href=\"style.css\" />"));
        assert_eq!(files[1].path, "style.css");
        assert_eq!(files[1].contents, "p { color: red; }");
    }

    #[test]
    fn test_archive_without_stylesheet() {
        let snapshot = Snapshot {
            markup: "<p>".to_string(),
            style: String::new(),
        };
        let ExportArtifact::Archive(files) = export(&snapshot, &ExportAction::Archive, "App").unwrap()
        else {
            panic!("expected an archive");
        };

        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_remote_payload() {
        let options = RemoteOptions {
            css_external: Some("https://example.com/lib.css".to_string()),
            ..RemoteOptions::default()
        };
        let ExportArtifact::Remote { action, payload } =
            export(&snapshot(), &ExportAction::Remote(options), "App").unwrap()
        else {
            panic!("expected a remote payload");
        };

        assert_eq!(action, "https://codepen.io/pen/define");

        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(json["title"], "App");
        assert_eq!(json["html"], "<p class='x'>hi</p>");
        assert_eq!(json["css"], "p { color: red; }");
        assert_eq!(json["css_external"], "https://example.com/lib.css");
        assert!(json.get("js_external").is_none());
        assert_eq!(json["editors"], "1100");
    }

    #[test]
    fn test_share_link_round_trips_contents() {
        let action = ExportAction::Share {
            base_url: "https://play.example.com/repl".to_string(),
        };
        let ExportArtifact::ShareLink(link) = export(&snapshot(), &action, "App").unwrap() else {
            panic!("expected a link");
        };

        let url = Url::parse(&link).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("html".to_string(), "<p class='x'>hi</p>".to_string()),
                ("css".to_string(), "p { color: red; }".to_string()),
            ]
        );
    }

    #[test]
    fn test_share_link_invalid_base() {
        let action = ExportAction::Share {
            base_url: "not a url".to_string(),
        };
        assert!(matches!(
            export(&snapshot(), &action, "App"),
            Err(ExportError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_remote_options_defaults_from_json() {
        let options: RemoteOptions = serde_json::from_str(r#"{ "jsExternal": "a.js" }"#).unwrap();
        assert_eq!(options.action, "https://codepen.io/pen/define");
        assert_eq!(options.js_external.as_deref(), Some("a.js"));
        assert_eq!(options.editors, "1100");
    }
}
