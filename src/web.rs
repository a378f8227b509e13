//! Browser front end
//!
//! Binds the page's file inputs, `.portfolio-item` containers and
//! `.upload-area` drop zones to the portfolio manager, persists to
//! `localStorage`, and restores saved previews on load.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, DragEvent, Element, Event, File, FileList, HtmlAnchorElement, HtmlElement, HtmlImageElement,
    HtmlInputElement, KeyboardEvent, Storage,
};

use crate::config::PortfolioConfig;
use crate::error::{PortfolioError, Result};
use crate::events::{dispatch, EventAction, SlotEvent};
use crate::manager::PortfolioManager;
use crate::preview::PreviewSurface;
use crate::state::catalog::KeyValueStore;
use crate::state::data::FileCandidate;
use crate::state::slots::SlotRegistry;
use crate::upload::encoder::encode_data_url;

const FILE_INPUT_SELECTOR: &str = "input[type=\"file\"]";
const SLOT_ITEM_SELECTOR: &str = ".portfolio-item";
const DROP_ZONE_SELECTOR: &str = ".upload-area";

type SharedManager = Rc<RefCell<PortfolioManager<LocalStorage>>>;

fn js_err(e: JsValue) -> PortfolioError {
    PortfolioError::Storage(format!("{:?}", e))
}

/// `window.localStorage` as a key-value store
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn new() -> Result<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| PortfolioError::Storage("no window".into()))?
            .local_storage()
            .map_err(js_err)?
            .ok_or_else(|| PortfolioError::Storage("localStorage is unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_err)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(js_err)
    }
}

/// The live document as a preview surface
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl PreviewSurface for DomSurface {
    fn contains(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn show_image(&mut self, id: &str, src: &str) {
        let Some(element) = self.document.get_element_by_id(id) else { return };
        if let Some(image) = element.dyn_ref::<HtmlImageElement>() {
            image.set_src(src);
        }
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            html.set_hidden(false);
        }
    }

    fn set_link(&mut self, id: &str, href: &str, text: &str) {
        let Some(element) = self.document.get_element_by_id(id) else { return };
        if let Some(anchor) = element.dyn_ref::<HtmlAnchorElement>() {
            anchor.set_href(href);
        }
        element.set_text_content(Some(text));
    }
}

/// Entry point: wait for the DOM, then bind and restore
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                init(&document);
            }
        });
        if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref()) {
            tracing::error!("❌ Could not wait for DOMContentLoaded: {:?}", e);
            return;
        }
        closure.forget();
    } else {
        init(&document);
    }
}

fn init(document: &Document) {
    let store = match LocalStorage::new() {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!("⚠️  Portfolio storage unavailable: {}", e);
            return;
        }
    };

    let upload_ids: Vec<String> = select_all(document, FILE_INPUT_SELECTOR)
        .iter()
        .map(Element::id)
        .collect();
    let registry = SlotRegistry::from_upload_ids(upload_ids.iter().map(String::as_str));
    let manager: SharedManager = Rc::new(RefCell::new(PortfolioManager::new(
        PortfolioConfig::default(),
        registry,
        store,
    )));

    bind_events(document, &manager);

    let mut surface = DomSurface::new(document.clone());
    if let Err(e) = manager.borrow().restore_all(&mut surface) {
        tracing::warn!("⚠️  Could not restore saved images: {}", e);
    }
}

fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn first_file(files: Option<FileList>) -> Vec<File> {
    files.and_then(|files| files.get(0)).into_iter().collect()
}

fn listen<E: JsCast + 'static>(target: &Element, event_type: &str, mut handler: impl FnMut(E) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    if let Err(e) = target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref()) {
        tracing::warn!("⚠️  Could not listen for `{}`: {:?}", event_type, e);
    }
    closure.forget();
}

/// Register every page listener. Runs once per page load.
pub fn bind_events(document: &Document, manager: &SharedManager) {
    for input in select_all(document, FILE_INPUT_SELECTOR) {
        let manager = manager.clone();
        let target = input.clone();
        listen::<Event>(&input, "change", move |event| {
            let Some(input) = target.dyn_ref::<HtmlInputElement>() else { return };
            let slot_event = SlotEvent::Change {
                upload_id: input.id(),
                files: first_file(input.files()),
            };
            perform(&manager, &event, None, dispatch(slot_event));
        });
    }

    for item in select_all(document, SLOT_ITEM_SELECTOR) {
        let manager = manager.clone();
        let container = item.clone();
        listen::<KeyboardEvent>(&item, "keydown", move |event| {
            let Ok(Some(input)) = container.query_selector(FILE_INPUT_SELECTOR) else { return };
            let slot_event = SlotEvent::<File>::KeyDown {
                upload_id: input.id(),
                key: event.key(),
            };
            perform(&manager, &event, Some(&input), dispatch(slot_event));
        });
    }

    for area in select_all(document, DROP_ZONE_SELECTOR) {
        {
            let manager = manager.clone();
            let zone = area.clone();
            listen::<DragEvent>(&area, "dragover", move |event| {
                let actions = dispatch(SlotEvent::<File>::DragOver { zone: zone.id() });
                perform(&manager, &event, Some(&zone), actions);
            });
        }
        {
            let manager = manager.clone();
            let zone = area.clone();
            listen::<DragEvent>(&area, "drop", move |event| {
                let upload_id = zone
                    .query_selector(FILE_INPUT_SELECTOR)
                    .ok()
                    .flatten()
                    .map(|input| input.id());
                let files = first_file(event.data_transfer().and_then(|dt| dt.files()));
                let actions = dispatch(SlotEvent::Drop {
                    zone: zone.id(),
                    upload_id,
                    files,
                });
                perform(&manager, &event, Some(&zone), actions);
            });
        }
        for event_type in ["dragenter", "dragleave", "dragend"] {
            let manager = manager.clone();
            let zone = area.clone();
            listen::<Event>(&area, event_type, move |event| {
                let slot_event = match event_type {
                    "dragenter" => SlotEvent::<File>::DragEnter { zone: zone.id() },
                    "dragleave" => SlotEvent::DragLeave { zone: zone.id() },
                    _ => SlotEvent::DragEnd { zone: zone.id() },
                };
                let actions = dispatch(slot_event);
                perform(&manager, &event, Some(&zone), actions);
            });
        }
    }
}

/// Carry out dispatched actions. `element` is the drop zone for drag
/// events and the slot's file input for key events.
fn perform(manager: &SharedManager, event: &Event, element: Option<&Element>, actions: Vec<EventAction<File>>) {
    for action in actions {
        match action {
            EventAction::PreventDefault => event.prevent_default(),
            EventAction::OpenPicker { .. } => {
                if let Some(input) = element.and_then(|el| el.dyn_ref::<HtmlElement>()) {
                    input.click();
                }
            }
            EventAction::SetDragActive { active, .. } => {
                let Some(zone) = element else { continue };
                let class = manager.borrow().config().drag_active_class.clone();
                let classes = zone.class_list();
                let toggled = if active { classes.add_1(&class) } else { classes.remove_1(&class) };
                if let Err(e) = toggled {
                    tracing::warn!("⚠️  Could not toggle `{}` on drop zone: {:?}", class, e);
                }
            }
            EventAction::Process { upload_id, file } => process_file(manager, upload_id, file),
        }
    }
}

fn process_file(manager: &SharedManager, upload_id: String, file: File) {
    let candidate = FileCandidate::new(file.name(), file.type_(), file.size() as u64);
    if manager.borrow().check(&candidate).is_err() {
        return;
    }

    let manager = manager.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let url = match read_as_data_url(&file).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("⚠️  Failed to read `{}`: {}", candidate.name, e);
                return;
            }
        };

        let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
        let mut surface = DomSurface::new(document);
        if let Err(e) = manager
            .borrow_mut()
            .complete_upload(&mut surface, &upload_id, &candidate.name, &url)
        {
            tracing::warn!("⚠️  Could not save `{}`: {}", candidate.name, e);
        }
    });
}

async fn read_as_data_url(file: &File) -> Result<String> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_err)?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(encode_data_url(&file.type_(), &bytes))
}
