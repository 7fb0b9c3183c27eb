use std::path::{Path, PathBuf};

use super::data::{FrameDescriptor, FrameId};

const SELLER: &str = "Mirror 3D Optics";

/// Every frame the gallery offers, in display order
static FRAMES: [FrameDescriptor; 5] = [
    FrameDescriptor {
        id: FrameId::new("classic-black"),
        display_name: "Classic Black",
        price: "$129",
        seller_name: SELLER,
        image_url: "https://images.unsplash.com/photo-1574258495973-f010dfbb5371?w=400&h=300&fit=crop",
        description: "Timeless black frames for everyday wear",
    },
    FrameDescriptor {
        id: FrameId::new("modern-blue"),
        display_name: "Modern Blue",
        price: "$149",
        seller_name: SELLER,
        image_url: "https://images.unsplash.com/photo-1583394838336-acd977736f90?w=400&h=300&fit=crop",
        description: "Contemporary blue frames with style",
    },
    FrameDescriptor {
        id: FrameId::new("vintage-round"),
        display_name: "Vintage Round",
        price: "$159",
        seller_name: SELLER,
        image_url: "https://images.unsplash.com/photo-1511499767150-a48a237f0083?w=400&h=300&fit=crop",
        description: "Retro round frames for a classic look",
    },
    FrameDescriptor {
        id: FrameId::new("sport-wrap"),
        display_name: "Sport Wrap",
        price: "$179",
        seller_name: SELLER,
        image_url: "https://images.unsplash.com/photo-1473496169904-658ba7c44d8a?w=400&h=300&fit=crop",
        description: "Athletic wrap-around design",
    },
    FrameDescriptor {
        id: FrameId::new("designer-cat"),
        display_name: "Designer Cat-Eye",
        price: "$199",
        seller_name: SELLER,
        image_url: "https://images.unsplash.com/photo-1577803645773-f96470509666?w=400&h=300&fit=crop",
        description: "Elegant cat-eye frames for sophistication",
    },
];

/// The Catalog is the read-only list of frames shown in the gallery.
/// It is compiled into the binary and never changes at runtime.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    frames: &'static [FrameDescriptor],
}

impl Catalog {
    /// The built-in catalog
    pub fn builtin() -> Self {
        Catalog { frames: &FRAMES }
    }

    /// All frames in display order
    pub fn frames(&self) -> &'static [FrameDescriptor] {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Look up a frame by id
    pub fn get(&self, id: FrameId) -> Option<&'static FrameDescriptor> {
        self.frames.iter().find(|frame| frame.id == id)
    }

    pub fn contains(&self, id: FrameId) -> bool {
        self.get(id).is_some()
    }

    /// Path of the preview image for a frame.
    ///
    /// Built from the id alone; nothing guarantees a file exists there.
    pub fn preview_path(id: FrameId, preview_dir: &Path) -> PathBuf {
        preview_dir.join(id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let catalog = Catalog::builtin();
        for (i, frame) in catalog.frames().iter().enumerate() {
            let duplicates = catalog.frames()[i + 1..]
                .iter()
                .filter(|other| other.id == frame.id)
                .count();
            assert_eq!(duplicates, 0, "duplicate id {}", frame.id);
        }
    }

    #[test]
    fn test_get_and_contains() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.contains(FrameId::new("sport-wrap")));
        assert!(!catalog.contains(FrameId::new("aviator-gold")));

        let frame = catalog.get(FrameId::new("designer-cat")).unwrap();
        assert_eq!(frame.display_name, "Designer Cat-Eye");
        assert_eq!(frame.price, "$199");
    }

    #[test]
    fn test_preview_path_uses_raw_id() {
        let path = Catalog::preview_path(FrameId::new("modern-blue"), Path::new("assets/glasses"));
        assert_eq!(path, PathBuf::from("assets/glasses/modern-blue"));
    }
}
