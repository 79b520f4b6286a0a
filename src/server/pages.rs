//! Minimal server-rendered HTML for the upload page.

use crate::server::handlers::Analysis;

/// Render the index page: the upload form, plus the analysis result or a
/// user-facing error when present.
pub fn render(analysis: Option<&Analysis>, error: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(error) = error {
        body.push_str(&format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(error)
        ));
    }

    if let Some(analysis) = analysis {
        body.push_str("<h2>Conversation</h2>\n<pre>");
        body.push_str(&escape_html(&analysis.conversation_text));
        body.push_str("</pre>\n<h2>Insights</h2>\n<ul>\n");
        for insight in &analysis.insights {
            body.push_str(&format!("<li><pre>{}</pre></li>\n", escape_html(insight)));
        }
        body.push_str("</ul>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>parley</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }}
pre {{ white-space: pre-wrap; background: #f4f4f4; padding: 0.5rem; }}
.error {{ color: #b00020; }}
</style>
</head>
<body>
<h1>parley</h1>
<form method="post" enctype="multipart/form-data">
<p><input type="file" name="file" required></p>
<p>
<label>File type:
<select name="file_type">
<option value="text">text</option>
<option value="audio">audio</option>
</select>
</label>
<label>Speech backend:
<select name="api_type">
<option value="deepgram">deepgram</option>
<option value="whisperx">whisperx</option>
</select>
</label>
</p>
<p><button type="submit">Analyze</button></p>
</form>
{}</body>
</html>
"#,
        body
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_page_has_form() {
        let page = render(None, None);
        assert!(page.contains("multipart/form-data"));
        assert!(page.contains("name=\"file_type\""));
        assert!(page.contains("name=\"api_type\""));
        assert!(!page.contains("<h2>Conversation</h2>"));
    }

    #[test]
    fn test_analysis_is_rendered_escaped() {
        let analysis = Analysis {
            conversation_text: "Speaker 0: <script>".to_string(),
            insights: vec!["Wary & terse".to_string()],
        };

        let page = render(Some(&analysis), None);
        assert!(page.contains("Speaker 0: &lt;script&gt;"));
        assert!(page.contains("Wary &amp; terse"));
    }

    #[test]
    fn test_error_is_rendered() {
        let page = render(None, Some("Invalid file_type: video"));
        assert!(page.contains("class=\"error\""));
        assert!(page.contains("Invalid file_type: video"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#x27;");
    }
}
