use crate::gate::{unlock_key, UnlockStore};
use crate::motion::cursor::PointerCapability;
use crate::motion::geometry::{Point, Rect};
use web_sys::{window, Element, Storage};

pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn session_storage() -> Option<Storage> {
    window()?.session_storage().ok().flatten()
}

fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

pub fn system_prefers_dark() -> bool {
    media_matches("(prefers-color-scheme: dark)")
}

pub fn pointer_capability() -> PointerCapability {
    PointerCapability {
        fine: media_matches(PointerCapability::FINE_QUERY),
        hover: media_matches(PointerCapability::HOVER_QUERY),
    }
}

pub fn is_desktop() -> bool {
    media_matches("(min-width: 1024px)") && pointer_capability().supports_custom_cursor()
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

/// Monotonic milliseconds on the same clock as animation-frame timestamps.
pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub fn client_point(event: &web_sys::MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

/// Unlocks last for the tab's session. Without session storage nothing is
/// remembered and the gate asks again on every visit.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionUnlockStore;

impl UnlockStore for SessionUnlockStore {
    fn is_unlocked(&self, slug: &str) -> bool {
        session_storage()
            .and_then(|storage| storage.get_item(&unlock_key(slug)).ok().flatten())
            .is_some_and(|value| value == "1")
    }

    fn mark_unlocked(&mut self, slug: &str) {
        if let Some(storage) = session_storage() {
            let _ = storage.set_item(&unlock_key(slug), "1");
        }
    }
}
