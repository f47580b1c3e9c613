//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::toc::heading_anchor;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: "base16-ocean.dark".to_string(),
        }
    }

    /// Create with a custom highlight theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render a markdown body to HTML.
    ///
    /// The pipeline is a fixed chain: parse with GFM-style extensions,
    /// assign heading ids, highlight fenced code blocks, serialize.
    /// Unrecognized markdown degrades to literal text, so this never fails.
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let events: Vec<Event> = Parser::new_ext(markdown, options).collect();

        let events = assign_heading_ids(events);
        let events = self.highlight_code_blocks(events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Replace fenced code blocks with highlighted HTML
    fn highlight_code_blocks<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        let mut in_code_block = false;
        let mut lang: Option<String> = None;
        let mut code = String::new();

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code.clear();
                    lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            let info = info.to_string();
                            if info.is_empty() {
                                None
                            } else {
                                Some(info)
                            }
                        }
                        CodeBlockKind::Indented => None,
                    };
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    let highlighted = self.highlight_code(&code, lang.take().as_deref());
                    out.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Text(text) if in_code_block => {
                    code.push_str(&text);
                }
                other => out.push(other),
            }
        }

        out
    }

    /// Highlight one code block; unknown languages fall back to a plain block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let Some(lang) = lang else {
            return plain_code_block(code, "text");
        };

        let Some(syntax) = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
        else {
            return plain_code_block(code, lang);
        };

        let Some(theme) = self.theme_set.themes.get(&self.theme_name) else {
            return plain_code_block(code, lang);
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => highlighted,
            Err(_) => plain_code_block(code, lang),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Assign a stable id to every heading, derived from its text content.
/// The anchor rule is shared with the table-of-contents generator so that
/// in-page links always resolve.
fn assign_heading_ids(mut events: Vec<Event>) -> Vec<Event> {
    let mut ids: Vec<(usize, String)> = Vec::new();
    let mut heading_start: Option<usize> = None;
    let mut text = String::new();

    for (i, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                heading_start = Some(i);
                text.clear();
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(start) = heading_start.take() {
                    ids.push((start, heading_anchor(&text)));
                }
            }
            Event::Text(t) | Event::Code(t) if heading_start.is_some() => {
                text.push_str(t);
            }
            _ => {}
        }
    }

    for (i, anchor) in ids {
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(anchor));
        }
    }

    events
}

/// Escaped, unhighlighted code block
fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        lang,
        html_escape(code)
    )
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Hello *world*.\n\nThis is a test.");
        assert!(html.contains("<em>world</em>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_headings_get_ids() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Intro\n\n## Hello, World!\n");
        assert!(html.contains(r##"<h1 id="intro">Intro</h1>"##));
        assert!(html.contains(r##"<h2 id="hello-world">Hello, World!</h2>"##));
    }

    #[test]
    fn test_heading_id_ignores_inline_markup() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Using `serde` for *fun*\n");
        assert!(html.contains(r#"id="using-serde-for-fun""#));
    }

    #[test]
    fn test_render_highlighted_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        // syntect wraps highlighted output in a styled <pre>
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_passes_through() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```nosuchlang\nplain <text>\n```");
        assert!(html.contains(r#"class="language-nosuchlang""#));
        assert!(html.contains("plain &lt;text&gt;"));
    }

    #[test]
    fn test_render_gfm_table() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_render_strikethrough() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("~~gone~~");
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_render_never_fails_on_unbalanced_input() {
        let renderer = MarkdownRenderer::new();
        for input in ["**unclosed", "``` \n", "[link](", "# \n\n~~~", "*_*_*_"] {
            let html = renderer.render(input);
            assert!(!html.is_empty() || input.trim().is_empty());
        }
    }
}
