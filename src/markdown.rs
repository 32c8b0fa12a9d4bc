//! Markdown Renderer
//!
//! pulldown-cmark with a few adjustments for user-authored content:
//! - Raw HTML is shown as text, never injected
//! - Video images (`![](clip.mp4)`) become `<video>` players
//! - `javascript:` links and images are neutralized

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag};

/// Parse markdown with extensions enabled
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Parse markdown for inline use (strips outer <p> tags)
pub fn parse_markdown_inline(text: &str) -> String {
    let html = parse_markdown(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

enum State {
    Normal,
    /// Inside an image we replaced; its alt-text events are dropped
    InMedia { dropped_depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::Image { dest_url, .. }) => {
                    let url = safe_url(&dest_url);
                    let html = if is_video_url(url) {
                        format!(r#"<video controls preload="metadata" src="{}" class="md-media"></video>"#, escape_html(url))
                    } else {
                        format!(r#"<img src="{}" class="md-media" loading="lazy" />"#, escape_html(url))
                    };
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::InMedia { dropped_depth: 0 };
                }

                Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                    let dest_url = CowStr::from(safe_url(&dest_url).to_string());
                    events.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
                }

                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

                other => events.push(other),
            },

            State::InMedia { ref mut dropped_depth } => match event {
                Event::Start(_) => *dropped_depth += 1,
                Event::End(_) => {
                    if *dropped_depth == 0 {
                        state = State::Normal;
                    } else {
                        *dropped_depth -= 1;
                    }
                }
                _ => {}
            },
        }
    }

    events
}

fn safe_url(url: &str) -> &str {
    let scheme = url.trim_start().to_ascii_lowercase();
    if scheme.starts_with("javascript:") || scheme.starts_with("data:text/html") {
        "#"
    } else {
        url
    }
}

pub fn is_video_url(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_lowercase();
    [".mp4", ".webm", ".mov", ".mkv", ".ogv"]
        .iter()
        .any(|ext| path.ends_with(ext))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = parse_markdown("Front-end **fixer**.");
        assert_eq!(html.trim(), "<p>Front-end <strong>fixer</strong>.</p>");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("hi <script>alert(1)</script>\n\n<div onclick=\"x\">block</div>");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<div onclick"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_video_image_becomes_player() {
        let html = parse_markdown("![demo](https://cdn.example/videos/a.MP4?t=3)");
        assert!(html.contains("<video controls"));
        assert!(html.contains(r#"src="https://cdn.example/videos/a.MP4?t=3""#));
        assert!(!html.contains("demo"));
    }

    #[test]
    fn test_plain_image_keeps_img() {
        let html = parse_markdown("![shot](https://cdn.example/a.png)");
        assert!(html.contains(r#"<img src="https://cdn.example/a.png""#));
    }

    #[test]
    fn test_script_links_are_neutralized() {
        let html = parse_markdown("[click](javascript:alert(1))");
        assert!(html.contains(r##"href="#""##));
        assert!(!html.contains("javascript"));
    }

    #[test]
    fn test_inline_strips_paragraph() {
        assert_eq!(parse_markdown_inline("*hi*"), "<em>hi</em>");
    }

    #[test]
    fn test_is_video_url() {
        assert!(is_video_url("https://x/y.webm"));
        assert!(is_video_url("https://x/y.mov#t=1"));
        assert!(!is_video_url("https://x/y.png"));
    }
}
