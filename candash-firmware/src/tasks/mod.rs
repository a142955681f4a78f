//! Embassy async tasks
//!
//! Every task shares the one `&'static Dashboard`; only the render task
//! owns flash.

pub mod buttons;
pub mod link_rx;
pub mod mock;
pub mod render;
pub mod tick;

pub use buttons::button_task;
pub use link_rx::link_rx_task;
pub use mock::mock_task;
pub use render::render_task;
pub use tick::alarm_tick_task;
