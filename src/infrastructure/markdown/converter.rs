// src/infrastructure/markdown/converter.rs
use crate::infrastructure::markdown::ImageNormalizer;
use lazy_static::lazy_static;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;

lazy_static! {
    // ![alt](dest =WxH "title"): CommonMark destinations cannot hold spaces,
    // so the size suffix would otherwise break the image syntax.
    static ref SIZED_IMAGE_REGEX: Regex = Regex::new(
        r#"!\[([^\]]*)\]\(\s*([^\s()<>]+?)\s*(=\s*\d+[xX]\d+)\s*((?:"[^"]*")?)\s*\)"#
    )
    .expect("Failed to compile sized image regex");
}

/// Markdown to HTML with normalized image references.
#[derive(Debug, Clone)]
pub struct MarkdownConverter {
    images: ImageNormalizer,
}

impl MarkdownConverter {
    pub fn new(base_url: &str) -> Self {
        Self {
            images: ImageNormalizer::new(base_url),
        }
    }

    pub fn to_html(&self, markdown: &str) -> String {
        let source = wrap_sized_destinations(markdown);
        let events = self.rewrite_events(Parser::new_ext(&source, parser_options()));

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Replace image spans with our own tag and turn soft breaks into hard ones.
    fn rewrite_events<'a>(&self, parser: Parser<'a>) -> Vec<Event<'a>> {
        let mut events = Vec::new();
        let mut image: Option<(CowStr<'a>, CowStr<'a>, String)> = None;
        let mut depth = 0usize;

        for event in parser {
            if let Some((_, _, alt)) = image.as_mut() {
                match event {
                    Event::Start(Tag::Image { .. }) => depth += 1,
                    Event::End(TagEnd::Image) if depth > 0 => depth -= 1,
                    Event::End(TagEnd::Image) => {
                        if let Some((dest, title, alt)) = image.take() {
                            let tag = self.images.render(&dest, &title, &alt);
                            events.push(Event::InlineHtml(tag.into()));
                        }
                    }
                    Event::Text(text) | Event::Code(text) => alt.push_str(&text),
                    Event::SoftBreak | Event::HardBreak => alt.push(' '),
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => image = Some((dest_url, title, String::new())),
                Event::SoftBreak => events.push(Event::HardBreak),
                other => events.push(other),
            }
        }
        events
    }
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Move a trailing `=WxH` inside an angle-bracket destination so the parser
/// keeps it as part of the URL. Code spans and code blocks are left as written.
fn wrap_sized_destinations(markdown: &str) -> Cow<'_, str> {
    const REPLACEMENT: &str = "![${1}](<${2} ${3}> ${4})";

    let code = code_ranges(markdown);
    if code.is_empty() {
        return SIZED_IMAGE_REGEX.replace_all(markdown, REPLACEMENT);
    }

    let mut output = String::with_capacity(markdown.len());
    let mut cursor = 0;
    for range in code {
        if range.start < cursor {
            continue;
        }
        output.push_str(&SIZED_IMAGE_REGEX.replace_all(&markdown[cursor..range.start], REPLACEMENT));
        output.push_str(&markdown[range.clone()]);
        cursor = range.end;
    }
    output.push_str(&SIZED_IMAGE_REGEX.replace_all(&markdown[cursor..], REPLACEMENT));
    Cow::Owned(output)
}

/// Byte ranges of inline code and code blocks, in source order.
fn code_ranges(markdown: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut in_block = false;

    for (event, range) in Parser::new_ext(markdown, parser_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_block = true;
                ranges.push(range);
            }
            Event::End(TagEnd::CodeBlock) => in_block = false,
            Event::Code(_) if !in_block => ranges.push(range),
            _ => {}
        }
    }
    ranges
}
