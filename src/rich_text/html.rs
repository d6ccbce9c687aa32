use crate::prismic::preview::resolve_document_link;
use crate::rich_text::{BlockKind, RichTextBlock, Span, SpanKind};
use crate::util::html::escape_html;

/// Renders a rich text field to HTML. Consecutive list items share one list
/// element and overlapping spans are split so the markup stays well formed.
pub fn as_html(blocks: &[RichTextBlock]) -> String {
    let mut html = String::new();
    let mut open_list: Option<BlockKind> = None;

    for block in blocks {
        let list = match block.kind {
            BlockKind::ListItem | BlockKind::OrderedListItem => Some(block.kind),
            _ => None,
        };

        if open_list != list {
            if let Some(kind) = open_list {
                html.push_str(list_tag(kind, true));
            }
            if let Some(kind) = list {
                html.push_str(list_tag(kind, false));
            }
            open_list = list;
        }

        html.push_str(&serialize_block(block));
    }

    if let Some(kind) = open_list {
        html.push_str(list_tag(kind, true));
    }

    html
}

fn list_tag(kind: BlockKind, closing: bool) -> &'static str {
    match (kind, closing) {
        (BlockKind::OrderedListItem, false) => "<ol>",
        (BlockKind::OrderedListItem, true) => "</ol>",
        (_, false) => "<ul>",
        (_, true) => "</ul>",
    }
}

fn heading_level(kind: BlockKind) -> Option<u8> {
    match kind {
        BlockKind::Heading1 => Some(1),
        BlockKind::Heading2 => Some(2),
        BlockKind::Heading3 => Some(3),
        BlockKind::Heading4 => Some(4),
        BlockKind::Heading5 => Some(5),
        BlockKind::Heading6 => Some(6),
        _ => None,
    }
}

fn serialize_block(block: &RichTextBlock) -> String {
    let class = block.label.as_ref()
        .map(|label| format!(r#" class="{}""#, escape_html(label)))
        .unwrap_or_default();

    if let Some(level) = heading_level(block.kind) {
        return format!("<h{0}{1}>{2}</h{0}>", level, class, serialize_spans(&block.text, &block.spans));
    }

    match block.kind {
        BlockKind::Paragraph => format!("<p{}>{}</p>", class, serialize_spans(&block.text, &block.spans)),
        BlockKind::Preformatted => format!("<pre{}>{}</pre>", class, serialize_spans(&block.text, &block.spans)),
        BlockKind::ListItem | BlockKind::OrderedListItem => {
            format!("<li{}>{}</li>", class, serialize_spans(&block.text, &block.spans))
        }
        BlockKind::Image => format!(
            r#"<p class="block-img"><img src="{}" alt="{}" /></p>"#,
            escape_html(block.url.as_deref().unwrap_or_default()),
            escape_html(block.alt.as_deref().unwrap_or_default()),
        ),
        BlockKind::Embed => {
            let embed = block.oembed.clone().unwrap_or_default();
            format!(
                r#"<div data-oembed="{}" data-oembed-type="{}" data-oembed-provider="{}">{}</div>"#,
                escape_html(embed.embed_url.as_deref().unwrap_or_default()),
                escape_html(embed.embed_type.as_deref().unwrap_or_default()),
                escape_html(embed.provider_name.as_deref().unwrap_or_default()),
                embed.html.unwrap_or_default(),
            )
        }
        _ => String::new(),
    }
}

fn span_href(span: &Span) -> String {
    let Some(ref data) = span.data else {
        return String::new();
    };
    match data.link_type.as_deref() {
        Some("Document") => resolve_document_link(data.doc_type.as_deref().unwrap_or_default(), data.uid.as_deref()),
        _ => data.url.clone().unwrap_or_default(),
    }
}

fn open_tag(span: &Span) -> String {
    match span.kind {
        SpanKind::Strong => "<strong>".to_string(),
        SpanKind::Em => "<em>".to_string(),
        SpanKind::Label => {
            let label = span.data.as_ref().and_then(|d| d.label.as_deref()).unwrap_or_default();
            format!(r#"<span class="{}">"#, escape_html(label))
        }
        SpanKind::Hyperlink => {
            let target = span.data.as_ref()
                .and_then(|d| d.target.as_deref())
                .map(|t| format!(r#" target="{}" rel="noopener""#, escape_html(t)))
                .unwrap_or_default();
            format!(r#"<a href="{}"{}>"#, escape_html(&span_href(span)), target)
        }
        SpanKind::Unknown => String::new(),
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.kind {
        SpanKind::Strong => "</strong>",
        SpanKind::Em => "</em>",
        SpanKind::Label => "</span>",
        SpanKind::Hyperlink => "</a>",
        SpanKind::Unknown => "",
    }
}

fn escape_text(chars: &[char]) -> String {
    let text: String = chars.iter().collect();
    escape_html(&text).replace('\n', "<br />")
}

/// Span offsets count characters of the block text.
fn serialize_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut spans: Vec<(usize, usize, &Span)> = spans.iter()
        .filter(|s| s.kind != SpanKind::Unknown)
        .map(|s| (s.start, s.end.min(len), s))
        .filter(|(start, end, _)| start < end)
        .collect();
    // Outer spans first so they are opened before the ones they contain
    spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut bounds: Vec<usize> = vec![0, len];
    for (start, end, _) in spans.iter() {
        bounds.push(*start);
        bounds.push(*end);
    }
    bounds.sort_unstable();
    bounds.dedup();

    let mut html = String::new();
    let mut open: Vec<usize> = vec![];
    for window in bounds.windows(2) {
        let (from, to) = (window[0], window[1]);
        let active: Vec<usize> = (0..spans.len())
            .filter(|&i| spans[i].0 <= from && spans[i].1 >= to)
            .collect();

        let common = open.iter().zip(active.iter())
            .take_while(|(a, b)| a == b)
            .count();
        for i in open.drain(common..).rev() {
            html.push_str(close_tag(spans[i].2));
        }
        for &i in &active[common..] {
            html.push_str(&open_tag(spans[i].2));
            open.push(i);
        }

        html.push_str(&escape_text(&chars[from..to]));
    }

    for i in open.into_iter().rev() {
        html.push_str(close_tag(spans[i].2));
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(json: &str) -> Vec<RichTextBlock> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_paragraph_and_heading() {
        let html = as_html(&blocks(r#"[
            {"type": "heading2", "text": "Proin et varius", "spans": []},
            {"type": "paragraph", "text": "Hello bold world", "spans": [{"start": 6, "end": 10, "type": "strong"}]}
        ]"#));
        assert_eq!(html, "<h2>Proin et varius</h2><p>Hello <strong>bold</strong> world</p>");
    }

    #[test]
    fn test_overlapping_spans() {
        let html = as_html(&blocks(r#"[
            {"type": "paragraph", "text": "abcdefgh", "spans": [
                {"start": 2, "end": 8, "type": "em"},
                {"start": 0, "end": 5, "type": "strong"}
            ]}
        ]"#));
        assert_eq!(html, "<p><strong>ab<em>cde</em></strong><em>fgh</em></p>");
    }

    #[test]
    fn test_nested_link() {
        let html = as_html(&blocks(r#"[
            {"type": "paragraph", "text": "see the docs", "spans": [
                {"start": 0, "end": 12, "type": "hyperlink", "data": {"link_type": "Web", "url": "https://nextjs.org", "target": "_blank"}},
                {"start": 4, "end": 7, "type": "strong"}
            ]}
        ]"#));
        assert_eq!(html, r#"<p><a href="https://nextjs.org" target="_blank" rel="noopener">see <strong>the</strong> docs</a></p>"#);
    }

    #[test]
    fn test_document_link() {
        let html = as_html(&blocks(r#"[
            {"type": "paragraph", "text": "other post", "spans": [
                {"start": 0, "end": 10, "type": "hyperlink", "data": {"link_type": "Document", "type": "posts", "uid": "other"}}
            ]}
        ]"#));
        assert_eq!(html, r#"<p><a href="/post/other">other post</a></p>"#);
    }

    #[test]
    fn test_escapes_and_line_breaks() {
        let html = as_html(&blocks(r#"[
            {"type": "preformatted", "text": "if a < b && c\n  return", "spans": []}
        ]"#));
        assert_eq!(html, "<pre>if a &lt; b &amp;&amp; c<br />  return</pre>");
    }

    #[test]
    fn test_multibyte_offsets() {
        let html = as_html(&blocks(r#"[
            {"type": "paragraph", "text": "Olá mundo", "spans": [{"start": 0, "end": 3, "type": "em"}]}
        ]"#));
        assert_eq!(html, "<p><em>Olá</em> mundo</p>");
    }

    #[test]
    fn test_span_past_text_end() {
        let html = as_html(&blocks(r#"[
            {"type": "paragraph", "text": "short", "spans": [{"start": 2, "end": 40, "type": "strong"}, {"start": 9, "end": 12, "type": "em"}]}
        ]"#));
        assert_eq!(html, "<p>sh<strong>ort</strong></p>");
    }

    #[test]
    fn test_lists_are_grouped() {
        let html = as_html(&blocks(r#"[
            {"type": "list-item", "text": "one", "spans": []},
            {"type": "list-item", "text": "two", "spans": []},
            {"type": "o-list-item", "text": "first", "spans": []},
            {"type": "paragraph", "text": "end", "spans": []},
            {"type": "list-item", "text": "last", "spans": []}
        ]"#));
        assert_eq!(html, "<ul><li>one</li><li>two</li></ul><ol><li>first</li></ol><p>end</p><ul><li>last</li></ul>");
    }

    #[test]
    fn test_image_embed_and_label() {
        let html = as_html(&blocks(r#"[
            {"type": "image", "url": "https://images.prismic.io/space/a.png", "alt": "A \"rocket\""},
            {"type": "embed", "oembed": {"embed_url": "https://youtu.be/x", "type": "video", "provider_name": "YouTube", "html": "<iframe></iframe>"}},
            {"type": "paragraph", "label": "quote", "text": "tip", "spans": [{"start": 0, "end": 3, "type": "label", "data": {"label": "highlight"}}]}
        ]"#));
        assert_eq!(html, concat!(
            r#"<p class="block-img"><img src="https://images.prismic.io/space/a.png" alt="A &quot;rocket&quot;" /></p>"#,
            r#"<div data-oembed="https://youtu.be/x" data-oembed-type="video" data-oembed-provider="YouTube"><iframe></iframe></div>"#,
            r#"<p class="quote"><span class="highlight">tip</span></p>"#,
        ));
    }

    #[test]
    fn test_empty() {
        assert_eq!(as_html(&[]), "");
        assert_eq!(as_html(&blocks(r#"[{"type": "paragraph", "text": "", "spans": []}]"#)), "<p></p>");
    }
}
