use leptos::prelude::*;
use pulldown_cmark::{html, Options, Parser};

/// Bot replies arrive as markdown; render them to HTML once per message.
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(content, options);

    let mut rendered = String::new();
    html::push_html(&mut rendered, parser);
    rendered
}

#[component]
pub fn MarkdownRenderer(content: String, #[prop(into, optional)] class: String) -> impl IntoView {
    let rendered = render_markdown(&content);
    view! { <div class=format!("markdown-body {}", class) inner_html=rendered></div> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_inline_emphasis() {
        let rendered = render_markdown("The **etch rate** doubles.");
        assert!(rendered.contains("<strong>etch rate</strong>"));
    }

    #[test]
    fn renders_lists_and_tables() {
        let rendered = render_markdown("- one\n- two\n\n|a|b|\n|-|-|\n|1|2|\n");
        assert!(rendered.contains("<li>one</li>"));
        assert!(rendered.contains("<table>"));
    }
}
