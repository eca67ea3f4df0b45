//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod buttons;
pub mod controller;
pub mod encoder;
pub mod square_wave;

pub use buttons::button_task;
pub use controller::run_controller;
pub use encoder::encoder_task;
pub use square_wave::square_wave_task;
