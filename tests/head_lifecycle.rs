//! End-to-end flows through the facade: a server pass with several
//! components, and a browser session driven through `HeadManager`.

use std::rc::Rc;

use waterui_head::prelude::*;
use waterui_head::{ElementLookup, HostElement, MemoryDom, Tags};

fn layout(head: &HeadCollector) {
    head.merge(
        Descriptor::new()
            .with_title("Water")
            .with_html_attributes(AttributeSet::new().with("lang", "en"))
            .with_meta(vec![
                AttributeSet::new().with("charset", "utf-8"),
                AttributeSet::new()
                    .with("name", "viewport")
                    .with("content", "width=device-width"),
            ]),
    );
}

fn article_page(head: &HeadCollector, title: &str) {
    head.merge(
        Descriptor::new()
            .with_title(title)
            .with_meta(vec![AttributeSet::new().with("name", "description").with("content", title)])
            .with_script(AttributeSet::new().with("src", "/article.js").with("defer", true)),
    );
}

#[test]
fn server_pass_merges_components_in_render_order() {
    let head = HeadCollector::with_context(ExecutionContext::Server);
    layout(&head);
    article_page(&head, "Rivers");

    assert_eq!(
        head.render().unwrap(),
        concat!(
            "<title>Rivers</title>",
            r#"<meta name="description" content="Rivers" />"#,
            r#"<script src="/article.js" defer="true" />"#,
        )
    );
    assert_eq!(head.render_html_attributes().unwrap(), r#"lang="en""#);
}

#[test]
fn requests_do_not_share_state() {
    let first = HeadCollector::with_context(ExecutionContext::Server);
    let second = HeadCollector::with_context(ExecutionContext::Server);
    article_page(&first, "One");
    layout(&second);

    assert!(first.render().unwrap().starts_with("<title>One</title>"));
    assert!(second.render().unwrap().starts_with("<title>Water</title>"));
}

#[test]
fn browser_session_reuses_shared_fields() {
    let icons: Rc<Tags> = Rc::new(Tags::from(vec![
        AttributeSet::new().with("rel", "icon").with("href", "/favicon.ico"),
        AttributeSet::new().with("rel", "manifest").with("href", "/app.webmanifest"),
    ]));
    let config = HeadConfig::new().with_lookup(ElementLookup::PerEntry);
    let mut manager = HeadManager::with_config(MemoryDom::new(), config);

    let page = |title: &str| {
        Descriptor::new()
            .with_title(title)
            .with_shared_tags(TagKind::Link, Rc::clone(&icons))
            .with_body_attributes(AttributeSet::new().with("class", "page"))
    };

    manager.mount(page("Home")).unwrap();
    assert_eq!(manager.dom().head().len(), 2);

    manager.update(page("About")).unwrap();
    let dom = manager.dom();
    assert_eq!(dom.title(), "About");
    assert_eq!(dom.head().len(), 2);
    assert_eq!(dom.host_attribute(HostElement::Body, "class"), Some("page"));

    manager.unmount();
    assert!(manager.dom().head().is_empty());
}

#[test]
fn rendering_in_browser_context_fails_without_side_effects() {
    let head = HeadCollector::with_context(ExecutionContext::Browser);
    layout(&head);
    let before = head.snapshot();

    assert_eq!(head.render(), Err(HeadError::BrowserContext));
    let after = head.snapshot();
    assert_eq!(after.title, before.title);
    assert!(Rc::ptr_eq(after.meta.as_ref().unwrap(), before.meta.as_ref().unwrap()));
}

#[cfg(feature = "serde")]
#[test]
fn descriptors_from_json() {
    let head = HeadCollector::with_context(ExecutionContext::Server);
    let descriptor: Descriptor = serde_json::from_str(
        r#"{ "title": "T", "meta": [{ "name": "d", "content": "c" }] }"#,
    )
    .unwrap();
    head.merge(descriptor);
    assert_eq!(head.render().unwrap(), r#"<title>T</title><meta name="d" content="c" />"#);
}
