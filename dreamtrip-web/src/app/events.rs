//! Page listeners. Each one translates a DOM event into a controller call.
use super::{Controller, SharedController, submission, with_controller};
use crate::dom::{self, DomError};
use crate::forms::{page_form_kind, read_form};
use crate::submit::FormSubmitter;
use dreamtrip_core::{
    Debouncer, FocalBand, FrameGate, IntersectionSample, OverlayEvent, SectionBounds, Viewport,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, Window,
};

type WeakController = Weak<RefCell<Controller>>;

const SECTION_QUERY: &str = "section[id]";

/// Attach every page listener.
///
/// # Errors
/// Returns an error when there is no document or a listener is refused.
pub fn install(
    controller: &SharedController,
    submitter: &Rc<dyn FormSubmitter>,
) -> Result<(), DomError> {
    let win = dom::window().ok_or(DomError::NoWindow)?;
    let doc = dom::require_document()?;
    let weak = Rc::downgrade(controller);
    let (resize_debouncer, nav_offset) = {
        let c = controller.borrow();
        (
            Debouncer::new(c.config().resize_debounce_ms),
            c.config().nav_offset_px,
        )
    };

    install_toggles(&doc, &weak)?;
    install_menu(&doc, &weak)?;
    install_navigation(&doc, &weak)?;
    install_page_forms(&doc, &weak, submitter)?;
    install_keys(&doc, weak.clone())?;
    install_scroll(&win, weak.clone())?;
    install_resize(&win, weak.clone(), resize_debouncer)?;
    install_hash(&win, weak.clone())?;
    observe_sections(&doc, weak, nav_offset)
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), DomError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|err| DomError::js("addEventListener", &err))?;
    closure.forget();
    Ok(())
}

/// Listen on every element matching `selector`.
fn on_each(
    doc: &Document,
    selector: &str,
    event: &str,
    controller: &WeakController,
    action: impl Fn(&mut Controller, &Element, &Event) + Clone + 'static,
) -> Result<(), DomError> {
    for element in dom::query_all(doc, selector) {
        let controller = controller.clone();
        let action = action.clone();
        let target = element.clone();
        listen(&element, event, move |event| {
            with_controller(&controller, |c| action(c, &target, &event));
        })?;
    }
    Ok(())
}

fn install_toggles(doc: &Document, weak: &WeakController) -> Result<(), DomError> {
    on_each(doc, "#lang-toggle", "click", weak, |c, _, _| c.toggle_language())?;
    on_each(doc, "#mobile-lang-toggle", "click", weak, |c, _, _| {
        c.toggle_language_from_menu();
    })?;
    on_each(doc, "#theme-toggle", "click", weak, |c, _, _| c.toggle_theme())?;
    on_each(doc, "#mobile-theme-toggle", "click", weak, |c, _, _| {
        c.toggle_theme_from_menu();
    })
}

fn install_menu(doc: &Document, weak: &WeakController) -> Result<(), DomError> {
    on_each(doc, ".mobile-menu-toggle", "click", weak, |c, _, _| {
        c.open_mobile_menu();
    })?;
    on_each(doc, ".mobile-menu-close", "click", weak, |c, _, _| {
        c.dispatch_overlay(OverlayEvent::CloseButton);
    })?;
    on_each(doc, "#mobile-menu", "click", weak, |c, _, event| {
        if event.target() == event.current_target() {
            c.dispatch_overlay(OverlayEvent::ScrimClick);
        }
    })?;
    // `#id` links are handled in install_navigation
    on_each(
        doc,
        ".mobile-menu-nav a:not([href^=\"#\"])",
        "click",
        weak,
        |c, _, _| c.dispatch_overlay(OverlayEvent::MenuLinkClick),
    )
}

fn install_navigation(doc: &Document, weak: &WeakController) -> Result<(), DomError> {
    on_each(doc, "a[href^=\"#\"]", "click", weak, |c, link, event| {
        let Some(href) = link.get_attribute("href") else {
            return;
        };
        let id = href.trim_start_matches('#');
        let exists = link
            .owner_document()
            .and_then(|doc| doc.get_element_by_id(id))
            .is_some();
        if id.is_empty() || !exists {
            return;
        }
        event.prevent_default();
        c.follow_section_link(id);
    })?;
    on_each(
        doc,
        ".cta-button:not([type=\"submit\"]):not([href^=\"#\"]):not([onclick])",
        "click",
        weak,
        |c, button, _| c.activate_cta(button.get_attribute("data-target").as_deref()),
    )?;
    on_each(doc, ".package", "click", weak, |c, card, _| {
        let name = card
            .query_selector("h3")
            .ok()
            .flatten()
            .and_then(|heading| heading.text_content())
            .unwrap_or_default();
        c.select_package(&name);
    })
}

fn install_page_forms(
    doc: &Document,
    weak: &WeakController,
    submitter: &Rc<dyn FormSubmitter>,
) -> Result<(), DomError> {
    let forms = dom::query_all(doc, "#contact-form, form.package-inquiry");
    for (idx, element) in forms.into_iter().enumerate() {
        let Ok(form) = element.dyn_into::<HtmlFormElement>() else {
            continue;
        };
        if form.id().is_empty() {
            form.set_id(&format!("package-inquiry-{idx}"));
        }
        let _ = form.set_attribute("novalidate", "");
        let kind = page_form_kind(&form);
        let weak = weak.clone();
        let submitter = Rc::clone(submitter);
        let target = form.clone();
        listen(&form, "submit", move |event| {
            event.prevent_default();
            let input = read_form(&target, kind);
            let weak = weak.clone();
            let submitter = Rc::clone(&submitter);
            wasm_bindgen_futures::spawn_local(async move {
                submission::run(&weak, submitter, input).await;
            });
        })?;
    }
    Ok(())
}

fn install_keys(doc: &Document, weak: WeakController) -> Result<(), DomError> {
    listen(doc, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let command = key.ctrl_key() || key.meta_key();
        let mut consumed = false;
        with_controller(&weak, |c| consumed = c.handle_key(&key.key(), command));
        if consumed {
            event.prevent_default();
        }
    })
}

/// Scroll events are coalesced to one update per animation frame.
fn install_scroll(win: &Window, weak: WeakController) -> Result<(), DomError> {
    let gate = Rc::new(RefCell::new(FrameGate::default()));
    listen(win, "scroll", move |_| {
        if !gate.borrow_mut().try_schedule() {
            return;
        }
        let frame_gate = Rc::clone(&gate);
        let weak = weak.clone();
        let scheduled = dom::request_animation_frame(move || {
            frame_gate.borrow_mut().complete();
            let offset = dom::window()
                .and_then(|w| w.scroll_y().ok())
                .unwrap_or_default();
            with_controller(&weak, |c| c.on_scroll(offset));
        });
        if let Err(err) = scheduled {
            log::warn!("scroll update skipped: {err}");
            gate.borrow_mut().complete();
        }
    })
}

/// Section geometry is re-measured once resizing has been quiet for a while.
fn install_resize(
    win: &Window,
    weak: WeakController,
    debouncer: Debouncer<i32>,
) -> Result<(), DomError> {
    let debouncer = Rc::new(RefCell::new(debouncer));
    listen(win, "resize", move |_| {
        let quiet_ms = debouncer.borrow().quiet_ms();
        let (ticket, stale) = debouncer.borrow_mut().restart();
        if let Some(handle) = stale {
            dom::clear_timeout(handle);
        }
        let pending = Rc::clone(&debouncer);
        let weak = weak.clone();
        let armed = dom::set_timeout(
            move || {
                if pending.borrow_mut().settle(ticket)
                    && let Some((sections, viewport)) = measure_sections()
                {
                    with_controller(&weak, |c| c.recompute_sections(&sections, viewport));
                }
            },
            quiet_ms,
        );
        match armed {
            Ok(handle) => {
                if let Some(stale) = debouncer.borrow_mut().arm(ticket, handle) {
                    dom::clear_timeout(stale);
                }
            }
            Err(err) => log::warn!("resize recompute skipped: {err}"),
        }
    })
}

fn measure_sections() -> Option<(Vec<SectionBounds>, Viewport)> {
    let win = dom::window()?;
    let doc = win.document()?;
    let viewport = Viewport {
        scroll_y: win.scroll_y().ok()?,
        height: win.inner_height().ok()?.as_f64()?,
    };
    let sections = dom::query_all(&doc, SECTION_QUERY)
        .into_iter()
        .filter_map(dom::as_html)
        .map(|section| {
            SectionBounds::new(
                &section.id(),
                f64::from(section.offset_top()),
                f64::from(section.offset_height()),
            )
        })
        .collect();
    Some((sections, viewport))
}

fn install_hash(win: &Window, weak: WeakController) -> Result<(), DomError> {
    listen(win, "hashchange", move |_| {
        let hash = dom::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        with_controller(&weak, |c| c.on_hash_change(&hash));
    })
}

fn observe_sections(doc: &Document, weak: WeakController, margin: f64) -> Result<(), DomError> {
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        let samples: Vec<IntersectionSample> = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
            .map(|entry| intersection_sample(&entry))
            .collect();
        with_controller(&weak, |c| c.observe_sections(&samples));
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_root_margin(&format!("-{margin}px 0px -{margin}px 0px"));
    init.set_threshold(&thresholds());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|err| DomError::js("IntersectionObserver", &err))?;
    callback.forget();

    for section in dom::query_all(doc, SECTION_QUERY) {
        observer.observe(&section);
    }
    Ok(())
}

/// Ratios are measured against the smaller of the section and the band so
/// tall sections still register.
fn intersection_sample(entry: &IntersectionObserverEntry) -> IntersectionSample {
    let ratio = if entry.is_intersecting() {
        FocalBand::ratio_from_heights(
            entry.intersection_rect().height(),
            entry.bounding_client_rect().height(),
            entry.root_bounds().map_or(0.0, |band| band.height()),
        )
    } else {
        0.0
    };
    IntersectionSample {
        id: entry.target().id(),
        ratio,
    }
}

fn thresholds() -> js_sys::Array {
    (0..=10)
        .map(|step| JsValue::from_f64(f64::from(step) / 10.0))
        .collect()
}
