//! Read-only lookups over a parsed page.
//!
//! Every search starts below the element it is given, the same way a
//! `find` on a sub-tree never matches the sub-tree root itself.

use scraper::{ElementRef, Html, Selector};

pub struct Page {
    html: Html,
}

impl Page {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    pub fn find_by_id(&self, tag: &str, id: &str) -> Option<ElementRef<'_>> {
        find_by_id(self.root(), tag, id)
    }

    pub fn find_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        find_first(self.root(), selector)
    }
}

fn descendant_elements<'a>(scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    scope.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// First `<tag id="...">` below `scope`.
pub fn find_by_id<'a>(scope: ElementRef<'a>, tag: &str, id: &str) -> Option<ElementRef<'a>> {
    descendant_elements(scope).find(|el| el.value().name() == tag && el.value().id() == Some(id))
}

/// First `<tag class="... class ...">` below `scope`.
pub fn find_by_class<'a>(
    scope: ElementRef<'a>,
    tag: &str,
    class: &str,
) -> Option<ElementRef<'a>> {
    descendant_elements(scope).find(|el| el.value().name() == tag && has_class(*el, class))
}

pub fn find_first<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).find(|el| el.id() != scope.id())
}

/// First `tag` below `scope` whose trimmed text equals `label`.
pub fn find_by_text<'a>(scope: ElementRef<'a>, tag: &str, label: &str) -> Option<ElementRef<'a>> {
    descendant_elements(scope).find(|el| el.value().name() == tag && text_of(*el) == label)
}

/// First element matching `selector` that starts after `anchor` in document order.
///
/// The anchor's own children count as "after" it.
pub fn find_next<'a>(
    root: ElementRef<'a>,
    anchor: ElementRef<'a>,
    selector: &Selector,
) -> Option<ElementRef<'a>> {
    descendant_elements(root)
        .skip_while(|el| el.id() != anchor.id())
        .skip(1)
        .find(|el| selector.matches(el))
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Text of every descendant text node, each piece trimmed, empty pieces dropped.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
