//! JS-facing session client.
//!
//! Wraps one [`QuoteController`] plus the project list. Async commands
//! return Promises; after each one settles, the event bus is drained,
//! failures go to the notification callback and every event is buffered
//! for `drainEvents`.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use quio_core::controller::QuoteController;
use quio_core::event_bus::EventBus;
use quio_core::notify::{dispatch_notifications, LogSink, Notification, NotificationSink};
use quio_core::projects::ProjectStore;
use quio_platform::api::HttpQuoteApi;
use quio_types::{
    QuoteError,
    config::ClientConfig,
    event::SessionEvent,
    product::MovelId,
    project::Project,
};

use crate::convert::{parse_kind, parse_mode, parse_sender};

/// Forwards notifications to a JS callback, or to the log when none is set.
#[derive(Clone, Default)]
struct JsNotifier {
    callback: Rc<RefCell<Option<Function>>>,
}

impl NotificationSink for JsNotifier {
    fn notify(&self, notification: &Notification) {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            LogSink.notify(notification);
            return;
        };
        match JsValue::from_serde(notification) {
            Ok(value) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    log::warn!("Notification dropped: {}", callback_error(&e));
                }
            }
            Err(e) => log::warn!("Failed to serialize notification: {}", e),
        }
    }
}

/// Everything an async command needs after the controller call returns.
#[derive(Clone)]
struct Pump {
    bus: EventBus,
    notifier: JsNotifier,
    events: Rc<RefCell<Vec<SessionEvent>>>,
}

impl Pump {
    fn flush(&self) {
        let drained = self.bus.drain();
        if drained.is_empty() {
            return;
        }
        dispatch_notifications(&drained, &self.notifier);
        self.events.borrow_mut().extend(drained);
    }
}

#[wasm_bindgen]
pub struct QuioClient {
    controller: Rc<QuoteController>,
    projects: RefCell<ProjectStore>,
    pump: Pump,
}

#[wasm_bindgen]
impl QuioClient {
    /// Start a new session. `api_base` overrides the build-time base URL.
    #[wasm_bindgen(constructor)]
    pub fn new(api_base: Option<String>) -> QuioClient {
        let mut config = ClientConfig::default();
        if let Some(base) = api_base.as_deref().filter(|b| !b.trim().is_empty()) {
            config = config.with_api_base(base);
        }

        let bus = EventBus::new();
        let api = Rc::new(HttpQuoteApi::new(config.clone()));
        let controller = QuoteController::new(config, api, bus.clone());

        QuioClient {
            controller: Rc::new(controller),
            projects: RefCell::new(ProjectStore::new()),
            pump: Pump {
                bus,
                notifier: JsNotifier::default(),
                events: Rc::new(RefCell::new(Vec::new())),
            },
        }
    }

    // ─── State ───────────────────────────────────────────────

    #[wasm_bindgen(getter, js_name = sessionId)]
    pub fn session_id(&self) -> String {
        self.controller.session_id()
    }

    #[wasm_bindgen(getter, js_name = displayName)]
    pub fn display_name(&self) -> String {
        self.controller.config().display_name.clone()
    }

    #[wasm_bindgen(getter, js_name = botName)]
    pub fn bot_name(&self) -> String {
        self.controller.config().bot_name.clone()
    }

    #[wasm_bindgen(getter, js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    /// Full session state as a plain JS object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.snapshot())
    }

    /// Events emitted since the last call, oldest first.
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<JsValue, JsValue> {
        self.pump.flush();
        let events: Vec<SessionEvent> = self.pump.events.borrow_mut().drain(..).collect();
        to_js(&events)
    }

    /// Register `callback(notification)` for failed operations.
    #[wasm_bindgen(js_name = onNotification)]
    pub fn on_notification(&self, callback: Option<Function>) {
        *self.pump.notifier.callback.borrow_mut() = callback;
    }

    // ─── Synchronous commands ────────────────────────────────

    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode = parse_mode(mode)
            .ok_or_else(|| js_error(&format!("Unknown chat mode: {}", mode)))?;
        self.controller.set_mode(mode);
        self.pump.flush();
        Ok(())
    }

    /// Append a message without contacting the backend. Returns its id.
    #[wasm_bindgen(js_name = addMessage)]
    pub fn add_message(
        &self,
        content: &str,
        sender: &str,
        kind: Option<String>,
    ) -> Result<String, JsValue> {
        let sender =
            parse_sender(sender).ok_or_else(|| js_error(&format!("Unknown sender: {}", sender)))?;
        let kind = parse_kind(kind.as_deref())
            .ok_or_else(|| js_error("Message type must be \"text\" or \"audio\""))?;
        Ok(self.controller.add_message(content, sender, kind))
    }

    #[wasm_bindgen(js_name = clearProductList)]
    pub fn clear_product_list(&self) {
        self.controller.clear_product_list();
        self.pump.flush();
    }

    /// Remove the list row at `index`. Returns false when out of range.
    #[wasm_bindgen(js_name = removeProduct)]
    pub fn remove_product(&self, index: usize) -> bool {
        self.controller.remove_product(index).is_some()
    }

    // ─── Async commands ──────────────────────────────────────

    /// Send typed text: extraction in multiple mode, chat otherwise.
    pub fn submit(&self, text: String) -> Promise {
        self.run(move |c| async move { c.submit(&text).await })
    }

    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self, text: String) -> Promise {
        self.run(move |c| async move { c.send_single_chat(&text).await })
    }

    #[wasm_bindgen(js_name = extractProducts)]
    pub fn extract_products(&self, text: String) -> Promise {
        self.run(move |c| async move { c.extract_products(&text).await })
    }

    #[wasm_bindgen(js_name = selectOption)]
    pub fn select_option(&self, label: String) -> Promise {
        self.run(move |c| async move { c.select_chat_option(&label).await })
    }

    #[wasm_bindgen(js_name = generateQuote)]
    pub fn generate_quote(&self) -> Promise {
        self.run(|c| async move { c.generate_multiple_quote().await })
    }

    #[wasm_bindgen(js_name = refreshQuote)]
    pub fn refresh_quote(&self) -> Promise {
        self.run(|c| async move { c.refresh_quote().await })
    }

    #[wasm_bindgen(js_name = deleteMovel)]
    pub fn delete_movel(&self, movel_id: u32) -> Promise {
        let id = MovelId(u64::from(movel_id));
        self.run(move |c| async move { c.delete_movel(id).await })
    }

    // ─── Projects ────────────────────────────────────────────

    pub fn projects(&self) -> Result<JsValue, JsValue> {
        to_js(self.projects.borrow().projects())
    }

    #[wasm_bindgen(js_name = addProject)]
    pub fn add_project(&self, name: &str, client: Option<String>) {
        let mut project = Project::new(name);
        project.client = client;
        self.projects.borrow_mut().add_project(project);
    }

    #[wasm_bindgen(js_name = setProjects)]
    pub fn set_projects(&self, projects: JsValue) -> Result<(), JsValue> {
        let projects: Vec<Project> = projects
            .into_serde()
            .map_err(|e| js_error(&QuoteError::from(e).to_string()))?;
        self.projects.borrow_mut().set_projects(projects);
        Ok(())
    }

    #[wasm_bindgen(js_name = setCurrentProject)]
    pub fn set_current_project(&self, id: Option<String>) {
        self.projects.borrow_mut().set_current_project(id);
    }

    #[wasm_bindgen(js_name = currentProject)]
    pub fn current_project(&self) -> Result<JsValue, JsValue> {
        to_js(&self.projects.borrow().current_project())
    }
}

impl QuioClient {
    /// Run a controller operation as a Promise. It resolves to the new
    /// snapshot, or rejects with the error's display text.
    fn run<F, Fut>(&self, op: F) -> Promise
    where
        F: FnOnce(Rc<QuoteController>) -> Fut + 'static,
        Fut: std::future::Future<Output = quio_types::Result<()>> + 'static,
    {
        let controller = self.controller.clone();
        let pump = self.pump.clone();
        future_to_promise(async move {
            let result = op(controller.clone()).await;
            pump.flush();
            match result {
                Ok(()) => to_js(&controller.snapshot()),
                Err(e) => Err(js_error(&e.to_string())),
            }
        })
    }
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    JsValue::from_serde(value).map_err(|e| js_error(&QuoteError::from(e).to_string()))
}

fn callback_error(thrown: &JsValue) -> QuoteError {
    let detail = thrown
        .as_string()
        .unwrap_or_else(|| format!("{:?}", thrown));
    QuoteError::JsInterop(detail)
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}
