//! Pango-based text rendering for the cairo backend
//!
//! Cairo's toy font API (select_font_face, show_text, text_extents) creates
//! internal font caches that grow unboundedly. Pango properly manages font
//! resources, integrates with fontconfig and shapes CJK labels correctly.

use cairo::Context;
use pango::FontDescription;
use pangocairo::functions::{create_layout, show_layout};
use std::cell::RefCell;
use std::collections::HashMap;

use flow_gauge_core::TextExtents;

/// Cache for FontDescription objects to avoid repeated allocations
struct FontDescriptionCache {
    cache: HashMap<FontKey, FontDescription>,
    max_entries: usize,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
struct FontKey {
    family: String,
    size_pango: i32, // Size in Pango units (points * PANGO_SCALE)
}

impl FontDescriptionCache {
    fn new() -> Self {
        Self {
            cache: HashMap::new(),
            max_entries: 32,
        }
    }

    fn get_or_create(&mut self, family: &str, size: f64) -> FontDescription {
        let key = FontKey {
            family: family.to_string(),
            size_pango: (size * pango::SCALE as f64) as i32,
        };

        if let Some(desc) = self.cache.get(&key) {
            return desc.clone();
        }

        // Evict everything when full; a gauge only uses a handful of fonts
        if self.cache.len() >= self.max_entries {
            self.cache.clear();
        }

        let mut desc = FontDescription::new();
        desc.set_family(family);
        desc.set_size(key.size_pango);

        self.cache.insert(key, desc.clone());
        desc
    }
}

// GTK objects aren't thread-safe
thread_local! {
    static FONT_DESC_CACHE: RefCell<FontDescriptionCache> = RefCell::new(FontDescriptionCache::new());
}

fn layout_for(cr: &Context, text: &str, family: &str, size: f64) -> pango::Layout {
    let font_desc = FONT_DESC_CACHE.with(|cache| cache.borrow_mut().get_or_create(family, size));
    let layout = create_layout(cr);
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);
    layout
}

/// Get ink extents of `text` using Pango.
pub fn pango_text_extents(cr: &Context, text: &str, family: &str, size: f64) -> TextExtents {
    let layout = layout_for(cr, text, family, size);
    let (ink_rect, _logical_rect) = layout.extents();
    let scale = pango::SCALE as f64;
    TextExtents {
        width: ink_rect.width() as f64 / scale,
        height: ink_rect.height() as f64 / scale,
    }
}

/// Show text with its left edge at `x` and its baseline at `y`.
///
/// Pango draws layouts from their top-left corner, so the layout is moved
/// up by its baseline to match cairo's baseline-relative positioning.
pub fn pango_show_text_at(cr: &Context, x: f64, y: f64, text: &str, family: &str, size: f64) {
    let layout = layout_for(cr, text, family, size);
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    cr.move_to(x, y - baseline);
    show_layout(cr, &layout);
    cr.new_path();
}

/// Logical advance width of `text`, used for horizontal alignment.
pub fn pango_logical_width(cr: &Context, text: &str, family: &str, size: f64) -> f64 {
    let layout = layout_for(cr, text, family, size);
    let (_ink_rect, logical_rect) = layout.extents();
    logical_rect.width() as f64 / pango::SCALE as f64
}
