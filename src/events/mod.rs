mod observers;
mod pointer;

pub use observers::{observe_theme, observe_visibility, read_theme, wire_resize, Observers};
pub use pointer::{wire_indicator_clicks, wire_pointer_handlers, wire_touch_handlers};
