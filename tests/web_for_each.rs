#![cfg(target_arch = "wasm32")]

use bind_dom::{setup_bindings, Array, Binder, Object, Scope, Value, ViewModel};
use std::{
	rc::{Rc, Weak},
	sync::Once,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, Element, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

fn init_logging() {
	static LOG: Once = Once::new();
	LOG.call_once(tracing_wasm::set_as_global_default);
}

fn bind(html: &str, view_model: &Rc<ViewModel>) -> (Element, Rc<Binder>) {
	init_logging();
	let document = window().unwrap().document().unwrap();
	let root = document.create_element("div").unwrap();
	root.set_inner_html(html);
	document.body().unwrap().append_child(&root).unwrap();

	let binder = setup_bindings(&root, Rc::clone(view_model) as Rc<dyn Scope>).unwrap();
	let weak: Weak<Binder> = Rc::downgrade(&binder);
	view_model.subscribe(move |path| {
		if let Some(binder) = weak.upgrade() {
			binder.render(Some(path)).unwrap();
		}
	});
	(root, binder)
}

fn all(root: &Element, selector: &str) -> Vec<Element> {
	let found = root.query_selector_all(selector).unwrap();
	(0..found.length()).map(|i| found.get(i).unwrap().dyn_into().unwrap()).collect()
}

fn contents(root: &Element, selector: &str) -> Vec<String> {
	all(root, selector).iter().map(Element::inner_html).collect()
}

fn todo_items(texts: &[&str]) -> Array {
	texts.iter().map(|text| Object::from_iter([("text", *text)])).collect()
}

const LIST: &str = r#"<ul><li for-each="item of items"><span bind-content="item.text"></span></li></ul>"#;

#[wasm_bindgen_test]
fn renders_one_clone_per_item_in_order() {
	let model = Rc::new(ViewModel::builder("Todo").field("items", todo_items(&["a", "b", "c"])).build());
	let (root, _binder) = bind(LIST, &model);

	assert_eq!(contents(&root, "li span"), ["a", "b", "c"]);
	for li in all(&root, "li") {
		assert!(!li.has_attribute("for-each"));
	}

	let placeholder = root.query_selector("ul").unwrap().unwrap().first_child().unwrap();
	assert_eq!(placeholder.node_type(), web_sys::Node::COMMENT_NODE);
	assert_eq!(placeholder.dyn_ref::<web_sys::Comment>().unwrap().data(), "for-each: item of items");
}

#[wasm_bindgen_test]
fn push_appends_and_pop_removes_the_last_clone() {
	let model = Rc::new(ViewModel::builder("Todo").field("items", todo_items(&["a", "b", "c"])).build());
	let (root, _binder) = bind(LIST, &model);
	let before = all(&root, "li");

	let items = model.observe("items").unwrap();
	items.push([Object::from_iter([("text", "d")])]);
	let after = all(&root, "li");
	assert_eq!(contents(&root, "li span"), ["a", "b", "c", "d"]);
	assert_eq!(after[..3], before[..]);

	items.pop();
	assert_eq!(contents(&root, "li span"), ["a", "b", "c"]);
	assert_eq!(all(&root, "li"), before);

	items.splice(0, 3, Vec::<Value>::new());
	assert!(all(&root, "li").is_empty());
	items.push([Object::from_iter([("text", "again")])]);
	assert_eq!(contents(&root, "li span"), ["again"]);
}

#[wasm_bindgen_test]
fn replacing_an_entry_reuses_the_clone_at_its_position() {
	let model = Rc::new(ViewModel::builder("Todo").field("items", todo_items(&["a", "b"])).build());
	let (root, _binder) = bind(LIST, &model);
	let before = all(&root, "li");

	model.observe("items").unwrap().set("0", Object::from_iter([("text", "z")]));
	assert_eq!(contents(&root, "li span"), ["z", "b"]);
	assert_eq!(all(&root, "li"), before);

	model.observe("items").unwrap().reverse();
	assert_eq!(contents(&root, "li span"), ["b", "z"]);

	model.set("items", Value::from(todo_items(&["x"])));
	assert_eq!(contents(&root, "li span"), ["x"]);
}

#[wasm_bindgen_test]
fn item_field_writes_re_render_the_item() {
	let model = Rc::new(ViewModel::builder("Todo").field("items", todo_items(&["a", "b"])).build());
	let (root, _binder) = bind(r#"<ul><li for-each="item of items"><input bind-value="item.text"><span bind-content="item.text"></span></li></ul>"#, &model);

	let second = all(&root, "li input").remove(1);
	second.dyn_ref::<HtmlInputElement>().unwrap().set_value("B");
	second.dispatch_event(&web_sys::Event::new("input").unwrap()).unwrap();

	assert_eq!(model.get("items.1.text").as_str(), Some("B"));
	assert_eq!(contents(&root, "li span"), ["a", "B"]);
}

#[wasm_bindgen_test]
fn clones_see_parent_properties_and_handlers() {
	let model = Rc::new(
		ViewModel::builder("Todo")
			.field("items", todo_items(&["a", "b"]))
			.field("label", "Remove")
			.field("removed", Value::Null)
			.handler("remove", |scope: &dyn Scope, _: &web_sys::Event| {
				let text = scope.get("item.text");
				scope.set("removed", text);
			})
			.build(),
	);
	let (root, _binder) = bind(r#"<ul><li for-each="item of items"><button click="remove" bind-content="label"></button></li></ul>"#, &model);

	assert_eq!(contents(&root, "button"), ["Remove", "Remove"]);
	model.set("label", Value::from("Drop"));
	assert_eq!(contents(&root, "button"), ["Drop", "Drop"]);

	all(&root, "button")[1].dyn_ref::<web_sys::HtmlElement>().unwrap().click();
	assert_eq!(model.get("removed").as_str(), Some("b"));
}

#[wasm_bindgen_test]
fn loop_element_bindings_apply_to_each_clone() {
	let items: Array = [true, false]
		.iter()
		.map(|done| Object::from_iter([("flags", Value::from(Object::from_iter([("done", *done)])))]))
		.collect();
	let model = Rc::new(ViewModel::builder("Todo").field("items", items).build());
	let (root, _binder) = bind(r#"<ul><li class="entry" for-each="entry of items" bind-class="entry.flags"></li></ul>"#, &model);

	let classes: Vec<String> = all(&root, "li").iter().map(Element::class_name).collect();
	assert_eq!(classes, ["entry done", "entry"]);
}

#[wasm_bindgen_test]
fn nested_loops_render_per_clone() {
	let groups: Array = ["x", "y"].iter().map(|name| Object::from_iter([("name", *name)])).collect();
	let tags: Array = ["1", "2", "3"].iter().copied().collect();
	let model = Rc::new(ViewModel::builder("Groups").field("groups", groups).field("tags", tags).build());
	let (root, _binder) = bind(
		r#"<div class="group" for-each="group of groups"><b bind-content="group.name"></b><i for-each="tag of tags" bind-content="tag"></i></div>"#,
		&model,
	);

	assert_eq!(contents(&root, ".group b"), ["x", "y"]);
	assert_eq!(contents(&root, ".group i"), ["1", "2", "3", "1", "2", "3"]);

	model.observe("tags").unwrap().pop();
	assert_eq!(contents(&root, ".group i"), ["1", "2", "1", "2"]);
}

#[wasm_bindgen_test]
fn primitive_items_bind_through_the_alias() {
	let names: Array = ["Ada", "Grace"].iter().copied().collect();
	let model = Rc::new(ViewModel::builder("Names").field("names", names).build());
	let (root, _binder) = bind(r#"<p for-each="name of names" bind-content="name"></p>"#, &model);

	assert_eq!(contents(&root, "p"), ["Ada", "Grace"]);
	model.observe("names").unwrap().unshift(["Barbara"]);
	assert_eq!(contents(&root, "p"), ["Barbara", "Ada", "Grace"]);
}
