//! Browser tests for the web head backend.
//!
//! Run with `wasm-pack test --headless --firefox backends/web`.

#![cfg(target_arch = "wasm32")]

use waterui_head_core::{
    AttributeSet, DEFAULT_MARKER, Descriptor, HeadConfig, HeadDom, HeadManager, HostElement,
    reconcile,
};
use waterui_head_web::{WebHead, WebHeadBuilder, WebHeadDom};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn marked(dom: &WebHeadDom, tag: &str) -> usize {
    dom.marked_elements(tag, DEFAULT_MARKER).len()
}

#[wasm_bindgen_test]
fn apply_and_teardown_against_live_document() {
    let mut dom = WebHeadDom::new().expect("document with head");
    let next = Descriptor::new()
        .with_title("Live")
        .with_meta(AttributeSet::new().with("name", "description").with("content", "c"))
        .with_html_attributes(AttributeSet::new().with("lang", "en"));

    let teardown = reconcile::apply(&mut dom, &HeadConfig::default(), &Descriptor::new(), &next)
        .expect("apply succeeds");
    assert_eq!(dom.document().title(), "Live");
    assert_eq!(marked(&dom, "meta"), 1);
    let root = dom.document().document_element().expect("root element");
    assert_eq!(root.get_attribute("lang").as_deref(), Some("en"));

    teardown.run(&mut dom);
    assert_eq!(marked(&dom, "meta"), 0);
}

#[wasm_bindgen_test]
fn manager_replaces_links_on_update() {
    let dom = WebHeadDom::new().expect("document with head");
    let mut manager = HeadManager::new(dom);
    let link = |href: &str| AttributeSet::new().with("rel", "stylesheet").with("href", href);

    manager
        .mount(Descriptor::new().with_link(vec![link("/a.css"), link("/b.css")]))
        .expect("mount succeeds");
    manager
        .update(Descriptor::new().with_link(vec![link("/c.css")]))
        .expect("update succeeds");

    let links = manager.dom().marked_elements("link", DEFAULT_MARKER);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].get_attribute("href").as_deref(), Some("/c.css"));

    manager.unmount();
    assert_eq!(marked(manager.dom(), "link"), 0);
}

#[wasm_bindgen_test]
fn body_attributes_merge_monotonically() {
    let mut dom = WebHeadDom::new().expect("document with head");
    let first = Descriptor::new()
        .with_body_attributes(AttributeSet::new().with("class", "dark").with("data-page", "home"));
    let second = Descriptor::new().with_body_attributes(AttributeSet::new().with("class", "light"));
    let config = HeadConfig::default();

    let _ = reconcile::apply(&mut dom, &config, &Descriptor::new(), &first).expect("first");
    let _ = reconcile::apply(&mut dom, &config, &first, &second).expect("second");

    let body = dom.document().body().expect("body");
    assert_eq!(body.get_attribute("class").as_deref(), Some("light"));
    assert_eq!(body.get_attribute("data-page").as_deref(), Some("home"));
    dom.remove_host_attribute(HostElement::Body, "data-page").expect("remove");
}

#[wasm_bindgen_test]
fn json_updates_from_javascript() {
    let mut head = WebHead::new().expect("web head");
    head.update_json(r#"{"title":"Json","script":[{"src":"/a.js","defer":true}]}"#)
        .expect("valid descriptor");
    let dom = head.manager().dom();
    assert_eq!(dom.document().title(), "Json");
    let scripts = dom.marked_elements("script", DEFAULT_MARKER);
    assert_eq!(scripts[0].get_attribute("defer").as_deref(), Some("true"));

    assert!(head.update_json("not json").is_err());
    head.unmount();
}

#[wasm_bindgen_test]
fn custom_marker_from_builder() {
    let mut head = WebHeadBuilder::new()
        .with_marker("data-test-head")
        .build()
        .expect("web head");
    head.update(Descriptor::new().with_style(AttributeSet::new().with("media", "print")))
        .expect("update");
    let dom = head.manager().dom();
    assert_eq!(dom.marked_elements("style", "data-test-head").len(), 1);
    head.unmount();
}

#[wasm_bindgen_test]
fn attribute_names_list_live_attributes() {
    let mut dom = WebHeadDom::new().expect("document with head");
    let element = dom.create_element("meta").expect("element");
    dom.set_attribute(&element, "name", "viewport").expect("set");
    dom.set_attribute(&element, "content", "width=device-width").expect("set");

    let mut names = dom.attribute_names(&element);
    names.sort();
    assert_eq!(names, ["content", "name"]);
}
