//! Queryable document abstraction over fetched page content.
//!
//! Adapter extraction is a pure function over this wrapper, so the same
//! code runs against a static HTTP body and a rendered browser capture.
//! Nothing browser-specific leaks past the fetch layer.

use scraper::{ElementRef, Html, Selector};

/// A parsed page offering CSS selection and text/attribute reads.
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// All elements matching a CSS selector, in document order.
    pub fn select(&self, css: &str) -> Vec<Element<'_>> {
        let selector = parse_selector(css);
        self.html.select(&selector).map(Element).collect()
    }
}

/// One element handle: scoped selection plus text/attribute reads.
#[derive(Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl<'a> Element<'a> {
    /// First descendant matching `css`, in document order.
    pub fn select_first(&self, css: &str) -> Option<Element<'a>> {
        let selector = parse_selector(css);
        self.0.select(&selector).next().map(Element)
    }

    pub fn has(&self, css: &str) -> bool {
        self.select_first(css).is_some()
    }

    /// Concatenated descendant text, trimmed.
    pub fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// The element's outer HTML, for free-text scans across a whole card.
    pub fn html(&self) -> String {
        self.0.html()
    }
}

fn parse_selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}
