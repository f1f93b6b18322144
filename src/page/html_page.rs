//! Headless page context over a parsed HTML document.
//!
//! Layout is not computed. Visibility is derived from markup and inline
//! styles only: non-rendered tags, the `hidden` attribute, `display`,
//! `visibility`, hidden inputs and zero inline width/height.

use scraper::{ElementRef, Html};
use tracing::debug;

use super::PageContext;
use crate::services::validation::compile_selector;
use crate::types::errors::PageError;
use crate::types::page::ElementHandle;

/// Tags that never produce a rendered box.
const NON_RENDERED_TAGS: &[&str] = &[
    "head", "script", "style", "template", "meta", "link", "title", "noscript", "base",
];

/// A parsed document plus the log of clicks dispatched on it.
pub struct HtmlPage {
    url: String,
    document: Html,
    clicks: Vec<ElementHandle>,
}

impl HtmlPage {
    pub fn parse(url: &str, html: &str) -> Self {
        Self {
            url: url.to_string(),
            document: Html::parse_document(html),
            clicks: Vec::new(),
        }
    }

    /// Every click dispatched so far, oldest first.
    pub fn clicks(&self) -> &[ElementHandle] {
        &self.clicks
    }

    /// Number of clicks the element has received.
    pub fn click_count(&self, element: &ElementHandle) -> usize {
        self.clicks.iter().filter(|c| c.index == element.index).count()
    }

    /// All elements in document order, starting with the root `<html>`.
    fn elements(&self) -> Vec<ElementRef<'_>> {
        self.document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect()
    }

    fn handle_for(index: usize, element: ElementRef<'_>) -> ElementHandle {
        ElementHandle {
            index,
            tag: element.value().name().to_string(),
            dom_id: element.value().attr("id").map(str::to_string),
        }
    }
}

impl PageContext for HtmlPage {
    fn url(&self) -> &str {
        &self.url
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementHandle>, PageError> {
        let compiled = compile_selector(selector).map_err(|reason| PageError::InvalidSelector {
            selector: selector.to_string(),
            reason,
        })?;

        let matches = self
            .elements()
            .into_iter()
            .enumerate()
            .filter(|(_, el)| compiled.matches(el))
            .map(|(index, el)| Self::handle_for(index, el))
            .collect();
        Ok(matches)
    }

    fn is_visible(&self, element: &ElementHandle) -> bool {
        self.elements()
            .get(element.index)
            .is_some_and(|el| element_is_visible(*el))
    }

    fn click(&mut self, element: &ElementHandle) -> Result<(), PageError> {
        let handle = self
            .elements()
            .get(element.index)
            .map(|el| Self::handle_for(element.index, *el))
            .ok_or(PageError::UnknownElement(element.index))?;

        debug!(url = %self.url, index = handle.index, tag = %handle.tag, "dispatching click");
        self.clicks.push(handle);
        Ok(())
    }
}

fn element_is_visible(element: ElementRef<'_>) -> bool {
    let el = element.value();
    if NON_RENDERED_TAGS.contains(&el.name()) {
        return false;
    }
    if el.name() == "input"
        && el
            .attr("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("hidden"))
    {
        return false;
    }

    let own_style = parse_style_declarations(el.attr("style"));
    if has_zero_dimension(&own_style) {
        return false;
    }

    // Walk self then ancestors. `display: none` and `hidden` anywhere on the
    // chain hide the element; `visibility` is decided by the nearest
    // declaration.
    let mut visibility_decided = false;
    let chain = std::iter::once(element).chain(element.ancestors().filter_map(ElementRef::wrap));
    for node in chain {
        let value = node.value();
        if NON_RENDERED_TAGS.contains(&value.name()) || value.attr("hidden").is_some() {
            return false;
        }
        let style = parse_style_declarations(value.attr("style"));
        for (name, val) in &style {
            match name.as_str() {
                "display" if val == "none" => return false,
                "visibility" if !visibility_decided => {
                    if val == "hidden" || val == "collapse" {
                        return false;
                    }
                    visibility_decided = true;
                }
                _ => {}
            }
        }
    }
    true
}

fn has_zero_dimension(style: &[(String, String)]) -> bool {
    style.iter().any(|(name, value)| {
        (name == "width" || name == "height") && is_zero_length(value)
    })
}

fn is_zero_length(value: &str) -> bool {
    let number = value.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
    number.parse::<f64>().is_ok_and(|n| n == 0.0)
}

/// Splits an inline `style` attribute into lowercase `(property, value)`
/// pairs with `!important` removed.
fn parse_style_declarations(style: Option<&str>) -> Vec<(String, String)> {
    let Some(style) = style else {
        return Vec::new();
    };
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim().to_ascii_lowercase();
            let value = value.trim_end_matches("!important").trim().to_string();
            if name.is_empty() {
                None
            } else {
                Some((name, value))
            }
        })
        .collect()
}
