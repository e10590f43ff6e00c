#![cfg(target_arch = "wasm32")]

use bind_dom::{setup_bindings, BindingKind, Object, Scope, Value, ViewModel};
use std::{rc::Rc, sync::Once};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, Element};

wasm_bindgen_test_configure!(run_in_browser);

fn init_logging() {
	static LOG: Once = Once::new();
	LOG.call_once(tracing_wasm::set_as_global_default);
}

fn container(html: &str) -> Element {
	init_logging();
	let document = window().unwrap().document().unwrap();
	let container = document.create_element("div").unwrap();
	container.set_inner_html(html);
	document.body().unwrap().append_child(&container).unwrap();
	container
}

fn text(root: &Element, selector: &str) -> String {
	root.query_selector(selector).unwrap().unwrap().inner_html()
}

/// Writes without notifying, so only explicit renders reach the DOM.
fn write_silently(model: &ViewModel, key: &str, value: impl Into<Value>) {
	model.state().raw().as_object().unwrap().insert(key, value);
}

#[wasm_bindgen_test]
fn only_affected_bindings_render() {
	let user = Object::from_iter([("name", "Ada"), ("email", "ada@example.com")]);
	let model = Rc::new(ViewModel::builder("Profile").field("title", "Hi").field("user", user).build());
	let root = container(r#"<h1 bind-content="title"></h1><p id="name" bind-content="user.name"></p><p id="email" bind-content="user.email"></p><div id="user" bind-class="user"></div>"#);
	let binder = setup_bindings(&root, Rc::clone(&model) as Rc<dyn Scope>).unwrap();

	write_silently(&model, "title", "Changed");
	let user = model.get("user");
	user.as_object().unwrap().insert("name", "Grace");
	user.as_object().unwrap().insert("email", "grace@example.com");

	binder.render(Some("user.name")).unwrap();
	assert_eq!(text(&root, "h1"), "Hi");
	assert_eq!(text(&root, "#name"), "Grace");
	assert_eq!(text(&root, "#email"), "ada@example.com");

	binder.render(Some("title")).unwrap();
	assert_eq!(text(&root, "h1"), "Changed");
	assert_eq!(text(&root, "#email"), "ada@example.com");

	binder.render(Some("user")).unwrap();
	assert_eq!(text(&root, "#email"), "grace@example.com");
}

#[wasm_bindgen_test]
fn sibling_paths_do_not_match() {
	let model = Rc::new(ViewModel::builder("Siblings").field("a", Object::from_iter([("b", 1), ("c", 2)])).field("username", "x").build());
	let root = container(r#"<p bind-content="a.b"></p><p bind-content="a.c"></p><p bind-content="username"></p>"#);
	let binder = setup_bindings(&root, Rc::clone(&model) as Rc<dyn Scope>).unwrap();

	let affected_count = |path: &str| binder.affected(path).len();
	assert_eq!(affected_count("a.b"), 1);
	assert_eq!(affected_count("a"), 2);
	assert_eq!(affected_count("user"), 0);
	assert_eq!(affected_count(""), 3);
	assert!(binder.affected("a.b").iter().all(|key| key.kind == BindingKind::Content));
}

#[wasm_bindgen_test]
fn computed_bindings_always_render() {
	let model = Rc::new(
		ViewModel::builder("Converter")
			.field("miles", 1)
			.field("unrelated", 0)
			.computed("kilometers", |scope: &dyn Scope| Value::from(scope.get("miles").as_f64().unwrap_or(0.0) * 1.5))
			.build(),
	);
	let root = container(r#"<p bind-content="kilometers"></p>"#);
	let binder = setup_bindings(&root, Rc::clone(&model) as Rc<dyn Scope>).unwrap();
	assert_eq!(text(&root, "p"), "1.5");

	write_silently(&model, "miles", 2);
	binder.render(Some("unrelated")).unwrap();
	assert_eq!(text(&root, "p"), "3");
}

#[wasm_bindgen_test]
fn full_render_without_a_path() {
	let model = Rc::new(ViewModel::builder("Manual").field("a", "1").field("b", "2").build());
	let root = container(r#"<i bind-content="a"></i><b bind-content="b"></b>"#);
	let binder = setup_bindings(&root, Rc::clone(&model) as Rc<dyn Scope>).unwrap();

	write_silently(&model, "a", "x");
	write_silently(&model, "b", "y");
	binder.render(None).unwrap();
	assert_eq!(text(&root, "i"), "x");
	assert_eq!(text(&root, "b"), "y");
}

#[wasm_bindgen_test]
fn renders_requested_during_a_render_are_queued() {
	// The getter writes to the view model while its binding renders, which requests another render.
	let model = Rc::new(
		ViewModel::builder("Echo")
			.field("source", "a")
			.field("seen", "")
			.computed("upper", |scope: &dyn Scope| {
				let source = scope.get("source");
				scope.set("seen", source.clone());
				Value::from(source.to_js_string().to_uppercase())
			})
			.build(),
	);
	let root = container(r#"<p id="upper" bind-content="upper"></p><p id="seen" bind-content="seen"></p>"#);
	let binder = setup_bindings(&root, Rc::clone(&model) as Rc<dyn Scope>).unwrap();
	let weak = Rc::downgrade(&binder);
	model.subscribe(move |path| {
		if let Some(binder) = weak.upgrade() {
			binder.render(Some(path)).unwrap();
		}
	});

	model.set("source", Value::from("b"));
	assert_eq!(text(&root, "#upper"), "B");
	assert_eq!(text(&root, "#seen"), "b");
}
