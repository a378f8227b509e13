//! Desktop portfolio page
//!
//! One card per configured slot. Cards take a picked file, a file dropped
//! while the pointer is over them, or Enter/Space when focused (Tab moves
//! focus). The catalog lives in the SQLite library.

use iced::event::{self, Event};
use iced::keyboard::{self, key};
use iced::widget::{button, column, container, row, scrollable, text, Column, Image};
use iced::{window, Alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;
use std::path::PathBuf;

use portfolio_images::events::{dispatch, EventAction, SlotEvent};
use portfolio_images::preview::PageModel;
use portfolio_images::state::catalog::{KeyValueStore, MemoryStore};
use portfolio_images::state::library::Library;
use portfolio_images::state::slots::SlotRegistry;
use portfolio_images::upload::encoder::decode_data_url;
use portfolio_images::upload::reader;
use portfolio_images::{PortfolioConfig, PortfolioManager};

mod slot_card;

/// Cards per row in the grid
const GRID_COLUMNS: usize = 3;

/// Extensions offered by the file picker (the validator still has the final word)
const PICKER_EXTENSIONS: [&str; 9] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "ico", "tiff", "svg"];

/// Main application state
struct PortfolioApp {
    manager: PortfolioManager<Box<dyn KeyValueStore>>,
    /// Preview images and links by element id
    page: PageModel,
    /// Decoded preview images by preview element id
    handles: HashMap<String, iced::widget::image::Handle>,
    /// Slot that receives Enter/Space
    focused: Option<usize>,
    /// Slot under the pointer, target for OS file drops
    hovered: Option<usize>,
    /// Drop zone currently showing drag-over styling
    drag_active: Option<String>,
    /// Only the first file of a multi-file drop is taken
    drop_taken: bool,
    /// Preview element id shown full size
    full_view: Option<String>,
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    SlotFocused(usize),
    SlotHovered(usize),
    SlotUnhovered(usize),
    /// "Choose Image" button on a card
    PickFile(usize),
    FocusNext,
    FocusPrevious,
    /// Key pressed with no widget capturing it, as a DOM key string
    KeyPressed(String),
    FileHovered,
    FileDropped(PathBuf),
    FilesHoveredLeft,
    /// Background read finished
    Encoded {
        upload_id: String,
        filename: String,
        result: Result<String, String>,
    },
    ViewFull(String),
    CloseFullView,
}

impl PortfolioApp {
    fn new() -> (Self, Task<Message>) {
        let config = PortfolioConfig::load();

        let (store, status): (Box<dyn KeyValueStore>, String) = match Library::new() {
            Ok(library) => {
                let status = format!("Saving to {}", library.path().display());
                (Box::new(library), status)
            }
            Err(e) => {
                tracing::warn!("⚠️  Library unavailable, images will not persist: {}", e);
                (Box::new(MemoryStore::new()), format!("Images will not be saved: {}", e))
            }
        };

        let registry = SlotRegistry::from_bases(config.slots.iter().map(String::as_str));
        let mut page = PageModel::new();
        for slot in registry.iter() {
            page.add_slot(slot);
        }

        let manager = PortfolioManager::new(config, registry, store);
        let mut app = PortfolioApp {
            manager,
            page,
            handles: HashMap::new(),
            focused: None,
            hovered: None,
            drag_active: None,
            drop_taken: false,
            full_view: None,
            status,
        };

        match app.manager.restore_all(&mut app.page) {
            Ok(report) => {
                for slot_id in &report.restored {
                    app.refresh_handle(slot_id);
                }
                tracing::info!("🎨 Portfolio ready with {} saved images", report.restored.len());
            }
            Err(e) => {
                tracing::warn!("⚠️  Could not restore saved images: {}", e);
                app.status = format!("Saved images could not be restored: {}", e);
            }
        }

        (app, Task::none())
    }

    fn upload_id(&self, index: usize) -> Option<String> {
        self.manager
            .registry()
            .iter()
            .nth(index)
            .map(|slot| slot.upload_id.clone())
    }

    /// Slot that should receive a file dropped right now
    fn drop_target(&self) -> Option<String> {
        self.hovered.or(self.focused).and_then(|i| self.upload_id(i))
    }

    /// Re-decode the preview image of a slot after its element changed
    fn refresh_handle(&mut self, upload_id: &str) {
        let Some(slot) = self.manager.registry().get(upload_id) else { return };
        let preview_id = slot.preview_id.clone();
        let Some(image) = self.page.image(&preview_id) else { return };

        match decode_data_url(&image.src) {
            Ok(data_url) => {
                self.handles
                    .insert(preview_id, iced::widget::image::Handle::from_bytes(data_url.bytes));
            }
            Err(e) => {
                tracing::warn!("⚠️  Stored preview for `{}` is unreadable: {}", upload_id, e);
                self.handles.remove(&preview_id);
            }
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SlotFocused(index) => {
                self.focused = Some(index);
                Task::none()
            }
            Message::SlotHovered(index) => {
                self.hovered = Some(index);
                Task::none()
            }
            Message::SlotUnhovered(index) => {
                if self.hovered == Some(index) {
                    self.hovered = None;
                }
                Task::none()
            }
            Message::PickFile(index) => {
                self.focused = Some(index);
                match self.upload_id(index) {
                    Some(upload_id) => self.perform(vec![EventAction::OpenPicker { upload_id }]),
                    None => Task::none(),
                }
            }
            Message::FocusNext | Message::FocusPrevious => {
                let count = self.manager.registry().len();
                if count > 0 {
                    self.focused = Some(match (self.focused, matches!(message, Message::FocusNext)) {
                        (None, true) => 0,
                        (None, false) => count - 1,
                        (Some(i), true) => (i + 1) % count,
                        (Some(i), false) => (i + count - 1) % count,
                    });
                }
                Task::none()
            }
            Message::KeyPressed(key) => {
                let Some(upload_id) = self.focused.and_then(|i| self.upload_id(i)) else {
                    return Task::none();
                };
                self.perform(dispatch(SlotEvent::KeyDown { upload_id, key }))
            }
            Message::FileHovered => {
                self.drop_taken = false;
                match self.drop_target() {
                    Some(zone) => self.perform(dispatch(SlotEvent::DragOver { zone })),
                    None => Task::none(),
                }
            }
            Message::FilesHoveredLeft => match self.drag_active.clone() {
                Some(zone) => self.perform(dispatch(SlotEvent::DragLeave { zone })),
                None => Task::none(),
            },
            Message::FileDropped(path) => {
                let files = if self.drop_taken { Vec::new() } else { vec![path] };
                self.drop_taken = true;

                let upload_id = self.drop_target();
                let zone = upload_id
                    .clone()
                    .or_else(|| self.drag_active.clone())
                    .unwrap_or_default();
                self.perform(dispatch(SlotEvent::Drop { zone, upload_id, files }))
            }
            Message::Encoded {
                upload_id,
                filename,
                result,
            } => {
                match result {
                    Ok(url) => match self
                        .manager
                        .complete_upload(&mut self.page, &upload_id, &filename, &url)
                    {
                        Ok(_) => {
                            self.refresh_handle(&upload_id);
                            self.focused = self.manager.registry().position(&upload_id);
                            self.status = format!("✅ Saved {}", filename);
                        }
                        Err(e) => {
                            self.refresh_handle(&upload_id);
                            tracing::warn!("⚠️  Could not save `{}`: {}", filename, e);
                            self.status = format!("Shown but not saved: {}", e);
                        }
                    },
                    Err(e) => tracing::warn!("⚠️  Failed to read `{}`: {}", filename, e),
                }
                Task::none()
            }
            Message::ViewFull(preview_id) => {
                if self.handles.contains_key(&preview_id) {
                    self.full_view = Some(preview_id);
                }
                Task::none()
            }
            Message::CloseFullView => {
                self.full_view = None;
                Task::none()
            }
        }
    }

    /// Carry out dispatched slot actions
    fn perform(&mut self, actions: Vec<EventAction<PathBuf>>) -> Task<Message> {
        let mut tasks = Vec::new();

        for action in actions {
            match action {
                // Nothing on the desktop scrolls or opens files by default
                EventAction::PreventDefault => {}
                EventAction::OpenPicker { upload_id } => {
                    // Show the native file picker dialog
                    let picked = FileDialog::new()
                        .set_title("Choose an Image")
                        .add_filter("Images", &PICKER_EXTENSIONS)
                        .pick_file();

                    if let Some(path) = picked {
                        tasks.push(self.process(upload_id, path));
                    }
                }
                EventAction::SetDragActive { zone, active } => {
                    if active {
                        self.drag_active = Some(zone);
                    } else if self.drag_active.as_deref() == Some(zone.as_str()) {
                        self.drag_active = None;
                    }
                }
                EventAction::Process { upload_id, file } => tasks.push(self.process(upload_id, file)),
            }
        }

        Task::batch(tasks)
    }

    /// Validate a file and start reading it in the background
    fn process(&mut self, upload_id: String, path: PathBuf) -> Task<Message> {
        let candidate = match reader::inspect(&path) {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::warn!("⚠️  Cannot read {}: {}", path.display(), e);
                return Task::none();
            }
        };

        if self.manager.check(&candidate).is_err() {
            return Task::none();
        }

        self.status = format!("Reading {}...", candidate.name);
        let filename = candidate.name;

        Task::perform(reader::read_as_data_url(path, candidate.mime), move |result| {
            Message::Encoded {
                upload_id: upload_id.clone(),
                filename: filename.clone(),
                result: result.map_err(|e| e.to_string()),
            }
        })
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(handle_event)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        if let Some(handle) = self.full_view.as_ref().and_then(|id| self.handles.get(id)) {
            let content = column![
                Image::new(handle.clone())
                    .width(Length::Fill)
                    .height(Length::Fill),
                button("Close").on_press(Message::CloseFullView).padding(10),
            ]
            .spacing(20)
            .padding(20)
            .align_x(Alignment::Center);

            return container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        let slots: Vec<_> = self.manager.registry().iter().collect();
        let mut grid = Column::new().spacing(20).align_x(Alignment::Center);
        for (row_index, chunk) in slots.chunks(GRID_COLUMNS).enumerate() {
            let mut cards = row![].spacing(20);
            for (offset, slot) in chunk.iter().enumerate() {
                let index = row_index * GRID_COLUMNS + offset;
                cards = cards.push(slot_card::view(
                    index,
                    slot,
                    &self.page,
                    self.handles.get(&slot.preview_id),
                    self.focused == Some(index),
                    self.drag_active.as_deref() == Some(slot.upload_id.as_str()),
                ));
            }
            grid = grid.push(cards);
        }

        let content = column![
            text("Portfolio").size(48),
            text(&self.status).size(16),
            scrollable(grid),
        ]
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Map window and keyboard events to app messages
fn handle_event(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) if status == event::Status::Ignored => {
            match key.as_ref() {
                keyboard::Key::Named(key::Named::Tab) if modifiers.shift() => Some(Message::FocusPrevious),
                keyboard::Key::Named(key::Named::Tab) => Some(Message::FocusNext),
                keyboard::Key::Named(key::Named::Enter) => Some(Message::KeyPressed("Enter".to_string())),
                keyboard::Key::Named(key::Named::Space) => Some(Message::KeyPressed(" ".to_string())),
                keyboard::Key::Named(key::Named::Escape) => Some(Message::CloseFullView),
                _ => None,
            }
        }
        _ => None,
    }
}

pub(crate) fn run() -> iced::Result {
    iced::application("Portfolio Images", PortfolioApp::update, PortfolioApp::view)
        .subscription(PortfolioApp::subscription)
        .theme(PortfolioApp::theme)
        .centered()
        .run_with(PortfolioApp::new)
}
