//! DOM surface
//!
//! Shows the booking in the page's existing regions. Rows are rebuilt from scratch
//! on every render, each with its own listeners bound to the row's handlers.

use std::{fmt, mem};

use booking::{
    config::SurfaceConfig,
    render::{BookingSurface, QuantityHandler, RemoveHandler, RowView, SummaryView, SurfaceError},
};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};

use crate::bootstrap::{Dispatcher, attach};

type Listener = Closure<dyn FnMut(Event)>;

/// The four regions a booking page must provide.
struct Regions {
    items: Element,
    summary: HtmlElement,
    total_items: Element,
    total_price: Element,
}

/// Listeners owned by the rendered rows.
///
/// A render usually starts from inside one of the current rows' listeners, so the
/// outgoing rows' listeners are kept for one more render before being dropped.
#[derive(Debug)]
struct RowListeners<L> {
    current: Vec<L>,
    retired: Vec<L>,
}

impl<L> Default for RowListeners<L> {
    fn default() -> Self {
        Self {
            current: Vec::new(),
            retired: Vec::new(),
        }
    }
}

impl<L> RowListeners<L> {
    /// Start a new render: the current listeners retire, the previously retired drop.
    fn renew(&mut self) {
        self.retired = mem::take(&mut self.current);
    }

    fn keep(&mut self, listener: L) {
        self.current.push(listener);
    }

    fn len(&self) -> usize {
        self.current.len() + self.retired.len()
    }
}

/// [`BookingSurface`] over the page's DOM.
pub(crate) struct DomSurface {
    document: Document,
    config: SurfaceConfig,
    dispatcher: Dispatcher,
    listeners: RowListeners<Listener>,
}

impl fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomSurface")
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl DomSurface {
    pub(crate) fn new(document: Document, config: SurfaceConfig, dispatcher: Dispatcher) -> Self {
        Self {
            document,
            config,
            dispatcher,
            listeners: RowListeners::default(),
        }
    }

    fn regions(&self) -> Option<Regions> {
        let by_id = |id: &str| self.document.get_element_by_id(id);

        Some(Regions {
            items: by_id(&self.config.items_id)?,
            summary: by_id(&self.config.summary_id)?.dyn_into::<HtmlElement>().ok()?,
            total_items: by_id(&self.config.total_items_id)?,
            total_price: by_id(&self.config.total_price_id)?,
        })
    }

    fn text_element(&self, tag: &str, text: &str) -> Result<Element, JsValue> {
        let element = self.document.create_element(tag)?;
        element.set_text_content(Some(text));

        Ok(element)
    }

    fn build_row(&mut self, row: &RowView) -> Result<Element, JsValue> {
        let container = self.document.create_element("div")?;
        container.set_class_name("booking-item");

        let name = self.text_element("span", &row.name)?;
        let price = self.text_element("span", &row.price)?;

        let input = self
            .document
            .create_element("input")?
            .dyn_into::<HtmlInputElement>()?;
        input.set_type("number");
        input.set_min("1");
        input.set_value(&row.quantity.to_string());

        let remove = self.text_element("button", "Remove")?;
        remove.set_class_name("remove-btn");
        remove.set_attribute("type", "button")?;

        container.append_child(&name)?;
        container.append_child(&price)?;
        container.append_child(&input)?;
        container.append_child(&remove)?;

        let on_quantity = self.bind_quantity(&input, row.on_quantity.clone())?;
        let on_remove = self.bind_remove(&remove, row.on_remove.clone())?;

        self.listeners.keep(on_quantity);
        self.listeners.keep(on_remove);

        Ok(container)
    }

    fn bind_quantity(
        &self,
        input: &HtmlInputElement,
        handler: QuantityHandler,
    ) -> Result<Listener, JsValue> {
        let dispatcher = self.dispatcher.clone();
        let target = input.clone();

        attach(input, "change", move |_event| {
            match handler.action_for(&target.value()) {
                Some(action) => dispatcher.dispatch(action),
                None => target.set_value(&handler.previous().to_string()),
            }
        })
    }

    fn bind_remove(&self, button: &Element, handler: RemoveHandler) -> Result<Listener, JsValue> {
        let dispatcher = self.dispatcher.clone();

        attach(button, "click", move |_event| dispatcher.dispatch(handler.action()))
    }

    fn try_show_empty(&mut self, regions: &Regions, message: &str) -> Result<(), JsValue> {
        regions.items.set_inner_html("");
        self.listeners.renew();

        let paragraph = self.text_element("p", message)?;
        regions.items.append_child(&paragraph)?;

        regions.summary.style().set_property("display", "none")
    }

    fn try_show_listing(
        &mut self,
        regions: &Regions,
        rows: &[RowView],
        summary: &SummaryView,
    ) -> Result<(), JsValue> {
        regions.items.set_inner_html("");
        self.listeners.renew();

        for row in rows {
            let element = self.build_row(row)?;
            regions.items.append_child(&element)?;
        }

        regions
            .total_items
            .set_text_content(Some(&summary.total_items.to_string()));
        regions
            .total_price
            .set_text_content(Some(&summary.total_price));
        regions.summary.style().set_property("display", "block")
    }
}

impl BookingSurface for DomSurface {
    fn has_regions(&self) -> bool {
        self.regions().is_some()
    }

    fn show_empty(&mut self, message: &str) -> Result<(), SurfaceError> {
        let Some(regions) = self.regions() else {
            return Ok(());
        };

        self.try_show_empty(&regions, message).map_err(host_error)
    }

    fn show_listing(
        &mut self,
        rows: &[RowView],
        summary: &SummaryView,
    ) -> Result<(), SurfaceError> {
        let Some(regions) = self.regions() else {
            return Ok(());
        };

        self.try_show_listing(&regions, rows, summary)
            .map_err(host_error)
    }
}

fn host_error(error: JsValue) -> SurfaceError {
    SurfaceError::Host(
        error
            .as_string()
            .unwrap_or_else(|| format!("{error:?}")),
    )
}
