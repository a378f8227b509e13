//! Preview rendering
//!
//! The renderer only ever touches two elements per slot: the preview image
//! and the "view full image" link. Both are addressed by id through
//! [`PreviewSurface`], so the same code drives the browser DOM and the
//! desktop page model.

use std::collections::HashMap;

use crate::state::slots::Slot;

/// Something that holds addressable preview images and links
pub trait PreviewSurface {
    fn contains(&self, id: &str) -> bool;
    /// Set the image source and un-hide it
    fn show_image(&mut self, id: &str, src: &str);
    fn set_link(&mut self, id: &str, href: &str, text: &str);
}

/// Show `url` in the slot's preview and point its link at it.
///
/// Returns false without touching anything when either element is missing.
pub fn render_preview(surface: &mut impl PreviewSurface, slot: &Slot, url: &str, label: &str) -> bool {
    if !surface.contains(&slot.preview_id) || !surface.contains(&slot.link_id) {
        tracing::debug!("No preview/link elements for `{}`, skipping", slot.upload_id);
        return false;
    }

    surface.show_image(&slot.preview_id, url);
    surface.set_link(&slot.link_id, url, label);
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageElement {
    pub src: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkElement {
    pub href: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Image(ImageElement),
    Link(LinkElement),
}

/// In-memory page holding preview elements by id.
///
/// Used as the desktop view model; markup that lacks an element simply
/// never registers it.
#[derive(Debug, Clone, Default)]
pub struct PageModel {
    elements: HashMap<String, Element>,
}

impl PageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hidden, empty preview image
    pub fn add_image(&mut self, id: impl Into<String>) {
        self.elements.insert(
            id.into(),
            Element::Image(ImageElement {
                src: String::new(),
                hidden: true,
            }),
        );
    }

    pub fn add_link(&mut self, id: impl Into<String>) {
        self.elements.insert(id.into(), Element::Link(LinkElement::default()));
    }

    /// Add both preview elements for a slot
    pub fn add_slot(&mut self, slot: &Slot) {
        self.add_image(slot.preview_id.clone());
        self.add_link(slot.link_id.clone());
    }

    pub fn image(&self, id: &str) -> Option<&ImageElement> {
        match self.elements.get(id) {
            Some(Element::Image(image)) => Some(image),
            _ => None,
        }
    }

    pub fn link(&self, id: &str) -> Option<&LinkElement> {
        match self.elements.get(id) {
            Some(Element::Link(link)) => Some(link),
            _ => None,
        }
    }
}

impl PreviewSurface for PageModel {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn show_image(&mut self, id: &str, src: &str) {
        if let Some(Element::Image(image)) = self.elements.get_mut(id) {
            image.src = src.to_string();
            image.hidden = false;
        }
    }

    fn set_link(&mut self, id: &str, href: &str, text: &str) {
        if let Some(Element::Link(link)) = self.elements.get_mut(id) {
            link.href = href.to_string();
            link.text = text.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_updates_image_and_link() {
        let slot = Slot::from_base("photo1");
        let mut page = PageModel::new();
        page.add_slot(&slot);
        assert!(page.image("photo1Preview").unwrap().hidden);

        assert!(render_preview(&mut page, &slot, "data:image/png;base64,AA==", "View Full Image"));

        let image = page.image("photo1Preview").unwrap();
        assert_eq!(image.src, "data:image/png;base64,AA==");
        assert!(!image.hidden);
        let link = page.link("photo1Link").unwrap();
        assert_eq!(link.href, "data:image/png;base64,AA==");
        assert_eq!(link.text, "View Full Image");
    }

    #[test]
    fn test_missing_link_is_a_silent_no_op() {
        let slot = Slot::from_base("photo2");
        let mut page = PageModel::new();
        page.add_image("photo2Preview");

        assert!(!render_preview(&mut page, &slot, "data:image/png;base64,AA==", "View Full Image"));
        assert!(page.image("photo2Preview").unwrap().hidden);
    }
}
