pub mod animation;
pub mod config;
pub mod controller;
pub mod direction;
pub mod driver;
pub mod easing;
pub mod error;
pub mod host;
pub mod section;
pub mod timing;

pub use animation::{FrameOutcome, ScrollAnimator};
pub use config::{AppConfig, DemoConfig, SectionSpec, SnapConfig, UiConfig};
pub use controller::{AnimationState, ControllerState, SignalOutcome, SnapController, SnapHook};
pub use direction::ScrollDirection;
pub use driver::{DriverEvent, HostSignal, SnapCommand, SnapDriver};
pub use easing::EasingPreset;
pub use error::{Error, Result};
pub use host::{MemoryHost, ScrollHost, ScrollInput, SectionBounds};
pub use section::{Section, SectionAccessor, SectionHandle, SectionKind};
