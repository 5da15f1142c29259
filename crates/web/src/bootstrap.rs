//! Page bootstrap
//!
//! Wires the catalog's add buttons and the submit button to the booking page, then
//! renders whatever booking is already stored.

use std::{
    cell::{OnceCell, RefCell},
    fmt,
    rc::Rc,
};

use booking::{
    config::{BookingConfig, ConfigError, SurfaceConfig},
    page::{Action, BookingPage},
    render::RenderError,
    store::StorageError,
};
use thiserror::Error;
use tracing::{error, info, warn};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Document, Element, Event, EventTarget};

use crate::{notifier::AlertNotifier, storage::LocalStorage, surface::DomSurface};

type WebPage = BookingPage<LocalStorage, DomSurface, AlertNotifier>;

/// Errors raised while starting the widget.
#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    /// Not running in a browser window.
    #[error("no browser window available")]
    NoWindow,

    /// The window has no document.
    #[error("window has no document")]
    NoDocument,

    /// Local storage is not available.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The configuration is not usable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The initial render failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A listener could not be attached.
    #[error("failed to wire booking page: {0}")]
    Dom(String),
}

/// Routes page events into the booking page.
///
/// Listeners hold clones of the dispatcher; the page is bound once it exists and lives
/// for as long as any listener does.
#[derive(Clone, Default)]
pub(crate) struct Dispatcher {
    page: Rc<OnceCell<Rc<RefCell<WebPage>>>>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("bound", &self.page.get().is_some())
            .finish()
    }
}

impl Dispatcher {
    fn bind(&self, page: WebPage) -> Rc<RefCell<WebPage>> {
        let page = Rc::new(RefCell::new(page));

        if self.page.set(Rc::clone(&page)).is_err() {
            warn!("booking dispatcher was already bound");
        }

        page
    }

    pub(crate) fn dispatch(&self, action: Action) {
        let Some(page) = self.page.get() else {
            warn!(?action, "booking page not ready, dropping action");
            return;
        };

        let Ok(mut page) = page.try_borrow_mut() else {
            warn!(?action, "booking page busy, dropping action");
            return;
        };

        if let Err(error) = page.dispatch(action) {
            error!(%error, "booking action failed");
        }
    }
}

/// Attach `handler` to `event` on `target`. The listener works until the returned
/// closure is dropped.
pub(crate) fn attach(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Closure<dyn FnMut(Event)>, JsValue> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);

    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;

    Ok(callback)
}

/// Attach `handler` to `event` on `target` for the lifetime of the page.
fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    // catalog and submit controls are never replaced
    attach(target, event, handler)?.forget();

    Ok(())
}

/// Start the widget now, or once the document has finished loading.
pub(crate) fn run_when_ready(config: BookingConfig) -> Result<(), BootstrapError> {
    let document = web_sys::window()
        .ok_or(BootstrapError::NoWindow)?
        .document()
        .ok_or(BootstrapError::NoDocument)?;

    if document.ready_state() != "loading" {
        return bootstrap(&config);
    }

    let on_ready = Closure::once_into_js(move || {
        if let Err(error) = bootstrap(&config) {
            error!(%error, "failed to start booking widget");
        }
    });
    let callback: &js_sys::Function = on_ready.unchecked_ref();

    document
        .add_event_listener_with_callback("DOMContentLoaded", callback)
        .map_err(dom_error)
}

fn bootstrap(config: &BookingConfig) -> Result<(), BootstrapError> {
    let window = web_sys::window().ok_or(BootstrapError::NoWindow)?;
    let document = window.document().ok_or(BootstrapError::NoDocument)?;

    let dispatcher = Dispatcher::default();

    let page = dispatcher.bind(BookingPage::new(
        config,
        LocalStorage::from_window(&window)?,
        DomSurface::new(document.clone(), config.surface.clone(), dispatcher.clone()),
        AlertNotifier::new(window),
    )?);

    let triggers = wire_catalog(&document, &config.surface, &dispatcher)?;
    let submit = wire_submit(&document, &config.surface, &dispatcher)?;

    page.borrow_mut().render()?;

    info!(triggers, submit, "booking widget ready");

    Ok(())
}

fn wire_catalog(
    document: &Document,
    surface: &SurfaceConfig,
    dispatcher: &Dispatcher,
) -> Result<u32, BootstrapError> {
    let triggers = document
        .query_selector_all(&class_selector(&surface.add_trigger_class))
        .map_err(dom_error)?;

    let mut wired = 0;

    for index in 0..triggers.length() {
        let Some(element) = triggers
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };

        let Some(name) = element.get_attribute(&surface.item_attribute) else {
            warn!(index, "add trigger has no item name, skipping");
            continue;
        };

        let price = element
            .get_attribute(&surface.price_attribute)
            .unwrap_or_default();
        let dispatcher = dispatcher.clone();

        listen(&element, "click", move |_event| {
            dispatcher.dispatch(Action::Add {
                name: name.clone(),
                price: price.clone(),
            });
        })
        .map_err(dom_error)?;

        wired += 1;
    }

    Ok(wired)
}

fn wire_submit(
    document: &Document,
    surface: &SurfaceConfig,
    dispatcher: &Dispatcher,
) -> Result<bool, BootstrapError> {
    let Some(button) = document.get_element_by_id(&surface.submit_id) else {
        return Ok(false);
    };

    let dispatcher = dispatcher.clone();

    listen(&button, "click", move |_event| dispatcher.dispatch(Action::Submit))
        .map_err(dom_error)?;

    Ok(true)
}

fn class_selector(class: &str) -> String {
    format!(".{}", class.trim().trim_start_matches('.'))
}

fn dom_error(error: JsValue) -> BootstrapError {
    BootstrapError::Dom(
        error
            .as_string()
            .unwrap_or_else(|| format!("{error:?}")),
    )
}
