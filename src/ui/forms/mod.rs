//! Form field rendering shared by the dialogs and the test call panel

mod field_renderer;

pub use field_renderer::draw_field;
