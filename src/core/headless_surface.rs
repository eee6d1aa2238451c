use anyhow::{bail, Result};

use crate::core::clock::Clock;
use crate::draw::DrawList;
use crate::frame::{FixedStepFrames, FrameInfo};
use crate::scene::SceneGraph;
use crate::traits::{RenderSurface, SurfaceHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Deterministic steps, as fast as the caller asks
    Fixed,
    /// Steps measured on the wall clock, sleeping to hold the target rate
    Realtime,
}

/// What was painted on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRecord {
    pub handle: SurfaceHandle,
    pub frame: u64,
    pub instances: usize,
    pub lines: usize,
    pub skipped_lines: usize,
}

/// Windowless surface. Delivers a bounded run of frames and keeps a record
/// of every draw instead of putting pixels on screen.
#[derive(Debug)]
pub struct HeadlessSurface {
    fps: f32,
    frame_limit: Option<u64>,
    pacing: Pacing,
    width: u32,
    height: u32,
    mounted: Option<SurfaceHandle>,
    next_handle: u64,
    frames: FixedStepFrames,
    clock: Clock,
    delivered: u64,
    time: f32,
    records: Vec<DrawRecord>,
    last_draw: Option<DrawList>,
}

impl HeadlessSurface {
    pub fn new(fps: f32) -> Self {
        Self {
            fps,
            frame_limit: None,
            pacing: Pacing::Fixed,
            width: 1280,
            height: 720,
            mounted: None,
            next_handle: 1,
            frames: FixedStepFrames::new(fps),
            clock: Clock::new(),
            delivered: 0,
            time: 0.0,
            records: Vec::new(),
            last_draw: None,
        }
    }

    /// Stop ticking after `frames` frames per mount.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Frames delivered to the current (or last) mount.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn last_draw(&self) -> Option<&DrawList> {
        self.last_draw.as_ref()
    }

    fn is_current(&self, handle: SurfaceHandle) -> bool {
        self.mounted == Some(handle)
    }

    fn realtime_tick(&mut self) -> FrameInfo {
        let delta = if self.delivered == 0 {
            self.clock = Clock::new();
            0.0
        } else {
            self.clock.pace(1.0 / self.fps);
            self.clock.tick()
        };
        self.time += delta;
        FrameInfo::new(self.delivered, self.time, delta)
    }
}

impl RenderSurface for HeadlessSurface {
    fn mount(&mut self, scene: &SceneGraph) -> Result<SurfaceHandle> {
        if let Some(current) = self.mounted {
            bail!("Surface already hosts scene {:?}", current);
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            bail!("Frame rate must be positive, got {}", self.fps);
        }
        if !(1.0 / self.fps).is_finite() {
            bail!("Frame rate {} is too small to step", self.fps);
        }

        let handle = SurfaceHandle(self.next_handle);
        self.next_handle += 1;
        self.mounted = Some(handle);
        self.frames = FixedStepFrames::new(self.fps);
        self.delivered = 0;
        self.time = 0.0;

        log::info!(
            "Mounted {:?}: {} elements, {} connectors, {} lights, environment {:?}, {}x{} @ {} fps ({:?})",
            handle,
            scene.len(),
            scene.connectors().len(),
            scene.lights().len(),
            scene.environment(),
            self.width,
            self.height,
            self.fps,
            self.pacing,
        );
        Ok(handle)
    }

    fn next_tick(&mut self, handle: SurfaceHandle) -> Option<FrameInfo> {
        if !self.is_current(handle) {
            return None;
        }
        if self.frame_limit.is_some_and(|limit| self.delivered >= limit) {
            return None;
        }

        let frame = match self.pacing {
            Pacing::Fixed => self.frames.next()?,
            Pacing::Realtime => self.realtime_tick(),
        };
        self.delivered += 1;
        Some(frame)
    }

    fn draw(&mut self, handle: SurfaceHandle, frame: &FrameInfo, draw: &DrawList) -> Result<()> {
        if !self.is_current(handle) {
            bail!("Draw for {:?}, which is not mounted", handle);
        }

        self.records.push(DrawRecord {
            handle,
            frame: frame.number,
            instances: draw.instances.len(),
            lines: draw.lines.len(),
            skipped_lines: draw.skipped_lines,
        });
        self.last_draw = Some(draw.clone());
        Ok(())
    }

    fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    fn unmount(&mut self, handle: SurfaceHandle) {
        if self.is_current(handle) {
            log::info!("Unmounted {:?} after {} frames", handle, self.delivered);
            self.mounted = None;
        }
    }
}
