use anyhow::{bail, Context, Result};

use crate::camera::OrbitCamera;
use crate::config::CompositionConfig;
use crate::draw::DrawList;
use crate::scene::{ElementId, SceneGraph};
use crate::scenes::compose;
use crate::scheduler::{AnimationScheduler, SchedulerConfig, SchedulerState};
use crate::traits::{CameraController, RenderSurface};

/// Totals for one mounted run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    /// Scene time covered by the run, in seconds.
    pub elapsed: f64,
    pub clamped_frames: u64,
    pub faults: usize,
    pub faulted_elements: Vec<ElementId>,
    pub skipped_lines: usize,
}

/// A scene bound to its scheduler and camera. One stage runs once: after
/// the surface unmounts it the scheduler is stopped for good.
#[derive(Debug)]
pub struct Stage {
    scene: SceneGraph,
    scheduler: AnimationScheduler,
    camera: OrbitCamera,
}

impl Stage {
    pub fn new(scene: SceneGraph, config: SchedulerConfig) -> Self {
        let camera = OrbitCamera::new(*scene.camera());
        Self {
            scene,
            scheduler: AnimationScheduler::new(config),
            camera,
        }
    }

    /// Composes the hero scene. Rejected elements are already logged by the
    /// builder and are left out.
    pub fn from_config(config: &CompositionConfig) -> Self {
        let composition = compose(config);
        if !composition.rejected.is_empty() {
            log::warn!("{} elements left out of the composition", composition.rejected.len());
        }
        Self::new(composition.scene, config.scheduler)
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Mounts the scene and ticks it until the surface stops delivering
    /// frames. The scene is always unmounted, even when a draw fails.
    pub fn run<S: RenderSurface>(&mut self, surface: &mut S) -> Result<RunSummary> {
        if self.scheduler.state() != SchedulerState::Idle {
            bail!("Stage already ran; scheduler is {:?}", self.scheduler.state());
        }

        let handle = surface.mount(&self.scene).context("Failed to mount scene")?;
        let result = self.scheduler.start().map_err(anyhow::Error::from).and_then(|()| {
            let mut summary = RunSummary::default();
            while let Some(frame) = surface.next_tick(handle) {
                let report = self.scheduler.tick(&frame, &mut self.scene)?;
                self.camera.update(report.dt);

                let draw = DrawList::capture(frame.number, &self.scene, &self.camera, surface.aspect());
                surface
                    .draw(handle, &frame, &draw)
                    .with_context(|| format!("Failed to draw frame {}", frame.number))?;

                summary.frames += 1;
                summary.clamped_frames += u64::from(report.clamped);
                summary.faults += report.faults.len();
                summary.skipped_lines += draw.skipped_lines;
            }
            Ok(summary)
        });

        surface.unmount(handle);
        self.scheduler.stop();

        let mut summary = result?;
        summary.elapsed = self.scheduler.elapsed();
        summary.faulted_elements = self.scheduler.faulted().iter().cloned().collect();
        summary.faulted_elements.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        log::info!(
            "Ran {} frames ({:.2}s scene time), {} faults",
            summary.frames,
            summary.elapsed,
            summary.faults
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HeadlessSurface;

    #[test]
    fn stage_runs_once() {
        let mut stage = Stage::from_config(&CompositionConfig::default());
        let mut surface = HeadlessSurface::new(60.0).with_frame_limit(10);

        let summary = stage.run(&mut surface).unwrap();
        assert_eq!(summary.frames, 10);
        assert_eq!(summary.faults, 0);
        assert!((summary.elapsed - 9.0 / 60.0).abs() < 1e-4);
        assert_eq!(stage.scheduler().state(), SchedulerState::Stopped);
        assert!(!surface.is_mounted());

        assert!(stage.run(&mut surface).is_err());
        assert_eq!(surface.records().len(), 10);
    }

    #[test]
    fn camera_orbits_while_running() {
        let mut stage = Stage::from_config(&CompositionConfig::default());
        let start = stage.camera().position();
        stage.run(&mut HeadlessSurface::new(60.0).with_frame_limit(120)).unwrap();
        assert!((stage.camera().position() - start).length() > 0.01);
    }
}
