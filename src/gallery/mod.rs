/// Frame gallery support
///
/// The gallery itself is a pure view over the catalog (see `ui::gallery`).
/// This module keeps the thumbnails that arrive in the background.

pub mod thumbnail;

use iced::widget::image::Handle;
use std::collections::HashMap;

use crate::state::data::FrameId;

/// Downloaded thumbnails, keyed by frame
#[derive(Debug, Default)]
pub struct Thumbnails {
    loaded: HashMap<FrameId, Handle>,
}

impl Thumbnails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: FrameId, handle: Handle) {
        self.loaded.insert(id, handle);
    }

    /// The thumbnail for a frame, if it has arrived
    pub fn get(&self, id: FrameId) -> Option<&Handle> {
        self.loaded.get(&id)
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }
}
