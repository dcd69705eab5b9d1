pub mod settings;
pub mod view;

pub use settings::{plan_frames, FrameJob, RenderSettings};
pub use view::View;
