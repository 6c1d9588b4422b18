//! Browser host: binds a [`PageController`] to the live DOM.
//!
//! Sections are the elements matching the configured section selector,
//! measured through `offsetTop` / `offsetHeight` on every read. Listeners
//! are installed on the window (wheel, touch, scroll, resize) and document
//! (keydown, delegated clicks). Animation frames come from
//! `requestAnimationFrame`; the cooldown is ended by a `setTimeout`.
//!
//! ```js
//! import init, { start } from "./snapscroll.js";
//! await init();
//! start({ navigation: { swipe_threshold_px: 60 } });
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    KeyboardEvent, TouchEvent, WheelEvent, Window,
};
use web_time::{Duration, Instant};

use crate::animation::AnimationHandle;
use crate::error::SnapError;
use crate::host::{ClassSink, SectionGeometry, SectionRegistry, Viewport};
use crate::input::PageEvent;
use crate::options::Options;
use crate::page::{EventOutcome, PageController};

impl From<SnapError> for JsValue {
    fn from(e: SnapError) -> Self {
        Self::from_str(&e.to_string())
    }
}

fn host_error(context: &str, e: &JsValue) -> SnapError {
    SnapError::Host(format!("{context}: {e:?}"))
}

// ── Host implementations ─────────────────────────────────────────────────

/// The window's scroll surface.
#[derive(Debug, Clone)]
pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    /// Viewport over `window`.
    #[must_use]
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Viewport for WindowViewport {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&mut self, y: f64) {
        // The browser clamps to the scrollable range.
        self.window.scroll_to_with_x_and_y(0.0, y);
    }

    fn width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }
}

/// Section elements found in the document, in document order.
#[derive(Debug, Clone, Default)]
pub struct DomSections {
    elements: Vec<HtmlElement>,
    by_id: FxHashMap<String, usize>,
}

impl DomSections {
    /// Collect the elements matching `selector`. Non-HTML matches are
    /// skipped.
    pub fn query(document: &Document, selector: &str) -> Result<Self, SnapError> {
        let nodes = document
            .query_selector_all(selector)
            .map_err(|e| host_error("invalid section selector", &e))?;
        let mut sections = Self::default();
        for i in 0..nodes.length() {
            let Some(element) = nodes
                .item(i)
                .and_then(|n| n.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let id = element.id();
            if !id.is_empty() {
                let _ = sections.by_id.entry(id).or_insert(sections.elements.len());
            }
            sections.elements.push(element);
        }
        Ok(sections)
    }
}

impl SectionRegistry for DomSections {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn geometry(&self, index: usize) -> Option<SectionGeometry> {
        self.elements.get(index).map(|el| SectionGeometry {
            top: f64::from(el.offset_top()),
            height: f64::from(el.offset_height()),
        })
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }
}

/// Applies class toggles to every element matching the target selector.
#[derive(Debug, Clone)]
pub struct DomClassSink {
    document: Document,
}

impl DomClassSink {
    /// Sink writing into `document`.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ClassSink for DomClassSink {
    fn set_class(&mut self, target: &str, class: &str, on: bool) {
        let Ok(nodes) = self.document.query_selector_all(target) else {
            log::warn!("invalid selector '{target}'");
            return;
        };
        for i in 0..nodes.length() {
            if let Some(element) =
                nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok())
            {
                let _ = element.class_list().toggle_with_force(class, on);
            }
        }
    }
}

// ── Runtime ──────────────────────────────────────────────────────────────

struct Runtime {
    page: PageController<DomSections>,
    viewport: WindowViewport,
    sink: DomClassSink,
    live: Vec<AnimationHandle>,
    frame_pending: bool,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Handle shared by every listener.
#[derive(Clone)]
struct Host {
    window: Window,
    runtime: Rc<RefCell<Runtime>>,
    tick: FrameCallback,
}

impl Host {
    fn dispatch(&self, event: &PageEvent, raw: &Event) {
        let response = {
            let mut rt = self.runtime.borrow_mut();
            let Runtime { page, viewport, .. } = &mut *rt;
            page.handle_event(event, viewport, Instant::now())
        };
        if response.prevent_default {
            raw.prevent_default();
        }
        if matches!(response.outcome, EventOutcome::Navigated(_)) {
            let cooldown = self.runtime.borrow().page.cooldown();
            self.schedule_settle(cooldown);
        }
        if let Some(handle) = response.animation() {
            self.track(handle);
        }
    }

    fn track(&self, handle: AnimationHandle) {
        let start = {
            let mut rt = self.runtime.borrow_mut();
            rt.live.push(handle);
            !std::mem::replace(&mut rt.frame_pending, true)
        };
        if start {
            self.request_frame();
        }
    }

    fn request_frame(&self) {
        if let Some(callback) = self.tick.borrow().as_ref() {
            if let Err(e) = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                log::error!("requestAnimationFrame failed: {e:?}");
                self.runtime.borrow_mut().frame_pending = false;
            }
        }
    }

    fn on_frame(&self) {
        let more = {
            let mut rt = self.runtime.borrow_mut();
            let now = Instant::now();
            let Runtime {
                page,
                viewport,
                live,
                frame_pending,
                ..
            } = &mut *rt;
            live.retain(|&handle| {
                page.on_frame(handle, viewport, now).wants_next_frame()
            });
            *frame_pending = !live.is_empty();
            *frame_pending
        };
        if more {
            self.request_frame();
        }
    }

    fn on_scroll(&self) {
        let mut rt = self.runtime.borrow_mut();
        let Runtime {
            page,
            viewport,
            sink,
            ..
        } = &mut *rt;
        page.on_scroll(viewport, sink, Instant::now());
    }

    /// End the cooldown once it has run, then resync the index in case the
    /// page moved while input was locked.
    fn schedule_settle(&self, after: Duration) {
        let host = self.clone();
        let callback = Closure::once_into_js(move || {
            let settled = host.runtime.borrow_mut().page.settle(Instant::now());
            if settled {
                host.on_scroll();
            }
        });
        let delay = i32::try_from(after.as_millis()).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay,
            )
        {
            log::error!("setTimeout failed: {e:?}");
        }
    }

    fn on_click(&self, raw: &Event) {
        let Some(target) = raw.target().and_then(|t| t.dyn_into::<Element>().ok())
        else {
            return;
        };
        let event = {
            let rt = self.runtime.borrow();
            let options = rt.page.options();
            click_event(&target, options)
        };
        if let Some(event) = event {
            self.dispatch(&event, raw);
        }
    }
}

/// Map a click on `target` to the page event it stands for, checking
/// indicator entries, then the back-to-top button, then fragment links.
fn click_event(target: &Element, options: &Options) -> Option<PageEvent> {
    let indicator = &options.indicator;
    if !indicator.selector.is_empty() {
        let entries = format!("{} [data-target]", indicator.selector);
        if let Some(landmark) = target
            .closest(&entries)
            .ok()
            .flatten()
            .and_then(|el| el.get_attribute("data-target"))
        {
            return Some(PageEvent::LandmarkClick { landmark });
        }
    }

    let back_to_top = &options.effects.back_to_top_selector;
    if !back_to_top.is_empty()
        && target.closest(back_to_top).ok().flatten().is_some()
    {
        return Some(PageEvent::BackToTop);
    }

    target
        .closest("a[href^=\"#\"]")
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute("href"))
        .map(|href| PageEvent::AnchorClick { href })
}

fn listen(
    target: &EventTarget,
    kind: &str,
    passive: bool,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), SnapError> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| host_error(&format!("failed to add {kind} listener"), &e))?;
    callback.forget();
    Ok(())
}

fn touch_y(event: &TouchEvent, changed: bool) -> Option<f64> {
    let touches = if changed {
        event.changed_touches()
    } else {
        event.touches()
    };
    touches.get(0).map(|t| f64::from(t.client_y()))
}

// ── Entry point ──────────────────────────────────────────────────────────

/// Bind the controller to the current page.
///
/// `options` is a plain object or JSON string overriding defaults field by
/// field; pass `undefined` for the stock behavior. A page with no matching
/// sections is left alone.
#[wasm_bindgen]
pub fn start(options: &JsValue) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // A second call finds the logger already installed.
    let _ = console_log::init_with_level(log::Level::Info);

    let options = options_from_js(options)?;
    mount(options)?;
    Ok(())
}

fn options_from_js(value: &JsValue) -> Result<Options, SnapError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Options::default());
    }
    let json = match value.as_string() {
        Some(json) => json,
        None => js_sys::JSON::stringify(value)
            .map_err(|e| host_error("options are not serializable", &e))?
            .into(),
    };
    Options::from_json_str(&json)
}

/// Install the controller and its listeners.
pub fn mount(options: Options) -> Result<(), SnapError> {
    let window = web_sys::window()
        .ok_or_else(|| SnapError::Host("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| SnapError::Host("window has no document".into()))?;

    let sections = DomSections::query(&document, &options.navigation.section_selector)?;
    if sections.is_empty() {
        log::warn!(
            "no elements match '{}'; snap scrolling disabled",
            options.navigation.section_selector
        );
        return Ok(());
    }

    let viewport = WindowViewport::new(window.clone());
    let mut sink = DomClassSink::new(document.clone());
    let mut page = PageController::new(sections, options);
    page.start(&viewport, &mut sink);

    let host = Host {
        window: window.clone(),
        runtime: Rc::new(RefCell::new(Runtime {
            page,
            viewport,
            sink,
            live: Vec::new(),
            frame_pending: false,
        })),
        tick: Rc::new(RefCell::new(None)),
    };

    let frame_host = host.clone();
    *host.tick.borrow_mut() =
        Some(Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
            frame_host.on_frame();
        }));

    let win: &EventTarget = window.as_ref();
    let doc: &EventTarget = document.as_ref();

    let h = host.clone();
    listen(win, "wheel", false, move |raw| {
        if let Some(wheel) = raw.dyn_ref::<WheelEvent>() {
            h.dispatch(&PageEvent::Wheel { delta_y: wheel.delta_y() }, &raw);
        }
    })?;

    let h = host.clone();
    listen(doc, "keydown", false, move |raw| {
        if let Some(key) = raw.dyn_ref::<KeyboardEvent>() {
            h.dispatch(&PageEvent::Key { key: key.key() }, &raw);
        }
    })?;

    let h = host.clone();
    listen(win, "touchstart", true, move |raw| {
        if let Some(y) = raw.dyn_ref::<TouchEvent>().and_then(|t| touch_y(t, false)) {
            h.dispatch(&PageEvent::TouchStart { y }, &raw);
        }
    })?;

    let h = host.clone();
    listen(win, "touchend", true, move |raw| {
        if let Some(y) = raw.dyn_ref::<TouchEvent>().and_then(|t| touch_y(t, true)) {
            h.dispatch(&PageEvent::TouchEnd { y }, &raw);
        }
    })?;

    let h = host.clone();
    listen(doc, "click", false, move |raw| h.on_click(&raw))?;

    for kind in ["scroll", "resize"] {
        let h = host.clone();
        listen(win, kind, true, move |_| h.on_scroll())?;
    }
    Ok(())
}
