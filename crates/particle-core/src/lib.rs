//! Platform-independent core of the particle text scene.
//!
//! Nothing here touches the DOM or the GPU; the web front-end feeds browser
//! events and loaded assets in and implements [`Renderer`] on top of wgpu.

pub mod assets;
pub mod camera;
pub mod constants;
pub mod error;
pub mod font;
pub mod frame;
pub mod particles;
pub mod pointer;
pub mod scene;
pub mod shape;
pub mod viewport;

pub use assets::{AssetJoin, LoadState, LoadedAssets, SpriteImage};
pub use camera::{PerspectiveCamera, Ray};
pub use error::{AssetKind, ParticleError};
pub use font::Font;
pub use frame::{FrameClock, LoopControl};
pub use particles::{
    build_from_text, hex_to_rgb, Displacement, FrameInput, NoDisplacement, ParticleBuffer,
    ParticleConfig, ParticleField,
};
pub use pointer::{normalize, Interaction, PointerState};
pub use scene::{Renderer, SceneHost};
pub use shape::{Contour, Segment, Shape};
pub use viewport::Viewport;
