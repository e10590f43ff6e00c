use crate::error::Error;
use js_sys::Function;
use tracing::{error, trace};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

type Callback = Closure<dyn FnMut(web_sys::Event) -> Result<(), JsValue>>;

/// Owns native event listeners and detaches them on drop.
///
/// A callback returning [`Err`] throws into JavaScript, so the error is reported through the platform's
/// unhandled-error channel.
#[derive(Default)]
pub(crate) struct Listeners(Vec<Listener>);

struct Listener {
	target: web_sys::EventTarget,
	event: &'static str,
	callback: Callback,
}

impl Listeners {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, target: &web_sys::EventTarget, event: &'static str, handler: impl FnMut(web_sys::Event) -> Result<(), JsValue> + 'static) -> Result<(), Error> {
		let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event) -> Result<(), JsValue>>);
		target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref::<Function>())
			.map_err(Error::dom("addEventListener"))?;
		trace!(event, "Added event listener.");
		self.0.push(Listener {
			target: target.clone(),
			event,
			callback,
		});
		Ok(())
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		if let Err(error) = self.target.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref::<Function>()) {
			error!("Failed to remove {} listener: {:?}", self.event, error);
		}
	}
}

impl core::fmt::Debug for Listeners {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_list().entries(self.0.iter().map(|listener| listener.event)).finish()
	}
}
