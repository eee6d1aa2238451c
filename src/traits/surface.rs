use anyhow::Result;

use crate::draw::DrawList;
use crate::frame::FrameInfo;
use crate::scene::SceneGraph;

/// Token for one mount of a scene on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Render surface - hosts a mounted scene and paces its frames
///
/// The surface owns the frame clock. A mounted scene asks for ticks with
/// `next_tick` until the surface runs dry or the scene is unmounted.
pub trait RenderSurface {
    /// Mount a scene; lights, environment and camera settings are read here
    fn mount(&mut self, scene: &SceneGraph) -> Result<SurfaceHandle>;

    /// Next frame for a mounted scene, `None` once the surface stops ticking it
    fn next_tick(&mut self, handle: SurfaceHandle) -> Option<FrameInfo>;

    /// Paint one frame
    fn draw(&mut self, handle: SurfaceHandle, frame: &FrameInfo, draw: &DrawList) -> Result<()>;

    /// Viewport aspect ratio (width / height)
    fn aspect(&self) -> f32;

    /// Release the scene; no further ticks are delivered for this handle
    fn unmount(&mut self, handle: SurfaceHandle);
}
