//! HTML renderer over pulldown-cmark.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::slug::SlugCounter;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from the first H1 heading (if enabled).
    pub title: Option<String>,
    /// Table of contents entries, in document order.
    pub toc: Vec<TocEntry>,
}

/// One table-of-contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor id.
    pub id: String,
}

/// Image-URL rewrite hook.
type ImageRewriter = Box<dyn Fn(&str) -> String>;

/// Markdown to HTML renderer.
///
/// Headings get slugified anchor ids and are collected into a table of
/// contents. Image destinations run through the configured rewrite hook
/// before emission; without a hook they are emitted unchanged.
pub struct HtmlRenderer {
    extract_title: bool,
    gfm: bool,
    image_rewriter: Option<ImageRewriter>,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extract_title: false,
            gfm: true,
            image_rewriter: None,
        }
    }

    /// Enable title extraction from the first H1 heading.
    ///
    /// The heading is still rendered; only its text is surfaced as
    /// [`RenderResult::title`].
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports
    /// tables, strikethrough (`~~text~~`), and task lists (`- [ ] item`).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Set the image-URL rewrite hook.
    ///
    /// The hook receives every image destination and returns the URL to
    /// emit — the hook decides what passes through unchanged.
    #[must_use]
    pub fn with_image_rewriter<F>(mut self, rewriter: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        self.image_rewriter = Some(Box::new(rewriter));
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown text to HTML.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        let mut events: Vec<Event> = Vec::new();
        let mut toc = Vec::new();
        let mut title = None;
        let mut slugs = SlugCounter::new();

        let mut iter = Parser::new_ext(markdown, self.parser_options());
        while let Some(event) = iter.next() {
            match event {
                Event::Start(tag @ Tag::Image { .. }) => {
                    events.push(Event::Start(self.rewrite_image(tag)));
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    // Buffer the heading content: the anchor id is derived
                    // from the text, which is only known at the end tag.
                    let mut inner = Vec::new();
                    let mut text = String::new();
                    for ev in iter.by_ref() {
                        match ev {
                            Event::End(TagEnd::Heading(_)) => break,
                            Event::Text(ref t) | Event::Code(ref t) => {
                                text.push_str(t);
                                inner.push(ev);
                            }
                            Event::Start(tag @ Tag::Image { .. }) => {
                                inner.push(Event::Start(self.rewrite_image(tag)));
                            }
                            other => inner.push(other),
                        }
                    }

                    let id = slugs.slug(&text);
                    let num = heading_level_to_num(level);
                    if num == 1 && self.extract_title && title.is_none() {
                        title = Some(text.clone());
                    }
                    toc.push(TocEntry {
                        level: num,
                        title: text,
                        id: id.clone(),
                    });

                    events.push(Event::Html(format!("<{level} id=\"{id}\">").into()));
                    events.extend(inner);
                    events.push(Event::Html(format!("</{level}>").into()));
                }
                other => events.push(other),
            }
        }

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        RenderResult { html, title, toc }
    }

    /// Run an image tag's destination through the rewrite hook.
    fn rewrite_image<'a>(&self, tag: Tag<'a>) -> Tag<'a> {
        match tag {
            Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            } => {
                let dest_url = match &self.image_rewriter {
                    Some(rewriter) => rewriter(&dest_url).into(),
                    None => dest_url,
                };
                Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }
            }
            other => other,
        }
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
