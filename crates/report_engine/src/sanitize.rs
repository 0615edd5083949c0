use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::ElementRef;
use thiserror::Error;
use url::Url;

/// Deep enough for any sane wiki cell; markup nested beyond this is treated
/// as hostile and the row it belongs to gets skipped.
const MAX_CELL_DEPTH: usize = 64;

/// Restricted rendition of one table cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizedCell {
    /// Fragment containing only `<a href="...">` and `<br>` markup, text
    /// escaped, whitespace collapsed and trimmed.
    pub markup: String,
    /// Absolute link targets, first-seen order, de-duplicated.
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("cell markup nested deeper than {MAX_CELL_DEPTH} levels")]
    TooDeep,
}

/// Reduce a cell to its restricted form: anchors and line breaks survive,
/// every other element is unwrapped in place, and anchor hrefs are rewritten
/// absolute against `base`.
///
/// The parsed tree is never mutated; the walk builds a fresh fragment and
/// link list in one pass.
pub fn sanitize_cell(cell: ElementRef<'_>, base: &Url) -> Result<SanitizedCell, SanitizeError> {
    let mut builder = RestrictedBuilder::new(base);
    for child in cell.children() {
        builder.visit(child, 0)?;
    }
    Ok(builder.finish())
}

struct RestrictedBuilder<'a> {
    base: &'a Url,
    out: String,
    links: Vec<String>,
    pending_space: bool,
}

impl<'a> RestrictedBuilder<'a> {
    fn new(base: &'a Url) -> Self {
        Self {
            base,
            out: String::new(),
            links: Vec::new(),
            pending_space: false,
        }
    }

    fn finish(self) -> SanitizedCell {
        SanitizedCell {
            markup: self.out,
            links: self.links,
        }
    }

    fn visit(&mut self, node: NodeRef<'_, Node>, depth: usize) -> Result<(), SanitizeError> {
        if depth > MAX_CELL_DEPTH {
            return Err(SanitizeError::TooDeep);
        }
        match node.value() {
            Node::Text(text) => {
                self.push_text(text);
                Ok(())
            }
            Node::Element(_) => match ElementRef::wrap(node) {
                Some(element) => self.visit_element(element, depth),
                None => Ok(()),
            },
            _ => {
                for child in node.children() {
                    self.visit(child, depth + 1)?;
                }
                Ok(())
            }
        }
    }

    fn visit_element(&mut self, element: ElementRef<'_>, depth: usize) -> Result<(), SanitizeError> {
        let tag = element.value().name().to_ascii_lowercase();
        match tag.as_str() {
            "a" => self.visit_anchor(element, depth),
            "br" => {
                self.push_markup("<br>");
                Ok(())
            }
            // Invisible subtrees have no business in a text report.
            "script" | "style" | "noscript" | "iframe" | "template" => Ok(()),
            _ => self.visit_children(element, depth),
        }
    }

    fn visit_children(
        &mut self,
        element: ElementRef<'_>,
        depth: usize,
    ) -> Result<(), SanitizeError> {
        for child in element.children() {
            self.visit(child, depth + 1)?;
        }
        Ok(())
    }

    fn visit_anchor(&mut self, element: ElementRef<'_>, depth: usize) -> Result<(), SanitizeError> {
        let resolved = element
            .value()
            .attr("href")
            .and_then(|href| resolve_href(href, self.base));
        let Some(resolved) = resolved else {
            // No resolvable target: unwrap like any other element.
            return self.visit_children(element, depth);
        };

        let absolute = String::from(resolved);
        self.push_markup(&format!("<a href=\"{}\">", escape_attribute(&absolute)));
        if !self.links.contains(&absolute) {
            self.links.push(absolute);
        }
        self.visit_children(element, depth)?;
        self.push_markup("</a>");
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                self.pending_space = !self.out.is_empty();
            } else {
                self.flush_space();
                self.push_escaped(ch);
            }
        }
    }

    fn push_markup(&mut self, markup: &str) {
        self.flush_space();
        self.out.push_str(markup);
    }

    fn flush_space(&mut self) {
        if self.pending_space {
            self.out.push(' ');
            self.pending_space = false;
        }
    }

    fn push_escaped(&mut self, ch: char) {
        match ch {
            '&' => self.out.push_str("&amp;"),
            '<' => self.out.push_str("&lt;"),
            '>' => self.out.push_str("&gt;"),
            _ => self.out.push(ch),
        }
    }
}

/// Resolve an href against the base origin. Fragment-only, query-only and
/// javascript targets do not count as links.
fn resolve_href(raw: &str, base: &Url) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with('?') || lower.starts_with("javascript:") {
        return None;
    }
    base.join(trimmed).ok()
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
