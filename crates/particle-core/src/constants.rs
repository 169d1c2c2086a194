// Shared tuning constants for the particle text scene.

// Text and sampling
pub const TEXT: &str = "FUTURE\nIS NOW";
pub const SAMPLE_AMOUNT: usize = 1500; // halved per shape when sampling outlines
pub const TEXT_SIZE: f32 = 16.0; // world units per em

// Particle look
pub const PARTICLE_SIZE: f32 = 1.0;
pub const PARTICLE_COLOR: u32 = 0xffffff;

// Interaction
pub const INTERACTION_AREA: f32 = 250.0; // proximity radius handed to displacement
pub const EASE_RELEASED: f32 = 0.05;
pub const EASE_PRESSED: f32 = 0.01;
// Far off-screen so nothing reacts before the first pointer event.
pub const INITIAL_POINTER: [f32; 2] = [-200.0, 200.0];

// Camera
pub const CAMERA_FOV_DEG: f32 = 65.0; // vertical
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 10_000.0;
pub const CAMERA_POSITION: [f32; 3] = [0.0, 0.0, 100.0];

// Renderer
pub const MAX_PIXEL_RATIO: f64 = 2.0;
// Matches the usual `300.0 / -mvPosition.z` point attenuation.
pub const POINT_SCALE: f32 = 300.0;

// Outline sampling
pub const ARC_LENGTH_DIVISIONS: usize = 200; // per curve segment
pub const WINDING_DIVISIONS: usize = 12; // per curve when classifying contours

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after a backgrounded tab resumes

// DOM contract
pub const MOUNT_ID: &str = "magic";
pub const VERTEX_SHADER_ID: &str = "vertexshader";
pub const FRAGMENT_SHADER_ID: &str = "fragmentshader";

// Remote assets
pub const FONT_URL: &str =
    "https://res.cloudinary.com/dydre7amr/raw/upload/v1612950355/font_zsd4dr.json";
pub const SPRITE_URL: &str =
    "https://res.cloudinary.com/dfvtkoboz/image/upload/v1605013866/particle_a64uzf.png";
