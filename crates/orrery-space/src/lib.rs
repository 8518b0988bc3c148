//! Static scene data for the render collaborator: the background starfield,
//! orbit-line loops, sun and star flicker uniforms, and decoration geometry.
//!
//! Nothing here carries state across frames. Animated values are pure
//! functions of the shader time published in the frame snapshot.

pub mod decoration;
pub mod orbit;
pub mod scene;
pub mod starfield;
pub mod sun;

pub use decoration::{AtmosphereShell, RingGeometry, atmosphere_shell, ring_geometry};
pub use orbit::orbit_polyline;
pub use scene::{OrbitLine, SpaceScene};
pub use starfield::{StarPoint, StarfieldGenerator, hsl_to_rgb, star_flicker};
pub use sun::{sun_brightness, sun_flicker, sun_uv_wobble};
