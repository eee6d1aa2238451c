use glam::Vec3;
use hero_scene::config::CompositionConfig;
use hero_scene::core::HeadlessSurface;
use hero_scene::draw::DrawList;
use hero_scene::frame::{FixedStepFrames, FrameInfo};
use hero_scene::math::Color;
use hero_scene::scene::SceneGraph;
use hero_scene::traits::{RenderSurface, SurfaceHandle};
use hero_scene::{
    AnimatedElement, AnimationScheduler, Behavior, FloatMotion, Material, MotionFault, SchedulerState, ShapeDescriptor,
    ShapeKind, Stage, Transform,
};

#[cfg(test)]
mod scheduler_tests {
    use super::*;

    fn cube(id: &str, behavior: Behavior) -> AnimatedElement {
        let shape = ShapeDescriptor::new(ShapeKind::Box, &[0.2, 1.0, 0.2], Material::new(Color::WHITE)).unwrap();
        AnimatedElement::new(id, shape, Transform::at(Vec3::ZERO), behavior)
    }

    fn faulty_scene() -> SceneGraph {
        let mut scene = SceneGraph::new();
        scene.add_element(cube("before", Behavior::SpinZ { rate: 1.0 })).unwrap();
        scene
            .add_element(cube("broken", Behavior::Float(FloatMotion::new(f32::NAN, 1.0, 1.0))))
            .unwrap();
        scene.add_element(cube("after", Behavior::Float(FloatMotion::default()))).unwrap();
        scene.add_element(cube("still", Behavior::Static)).unwrap();
        scene
    }

    #[test]
    fn test_fault_is_isolated_to_its_element() {
        let mut scene = faulty_scene();
        let mut scheduler = AnimationScheduler::default();
        scheduler.start().unwrap();

        let report = scheduler.tick(&FrameInfo::new(1, 0.016, 0.016), &mut scene).unwrap();

        assert_eq!(report.faults.len(), 1);
        assert!(matches!(&report.faults[0], MotionFault::NonFinite { id } if id.as_str() == "broken"));
        assert_eq!(report.advanced, 3);
        for element in scene.all_elements() {
            assert_eq!(element.advance_count(), 1, "{}", element.id());
        }
        assert!(scene.element("before").unwrap().transform().rotation.z > 0.0);
        assert_eq!(scheduler.state(), SchedulerState::Running);
    }

    #[test]
    fn test_faults_repeat_without_stopping_the_run() {
        let mut scene = faulty_scene();
        let mut scheduler = AnimationScheduler::default();
        scheduler.start().unwrap();

        for frame in FixedStepFrames::new(60.0).skip(1).take(20) {
            scheduler.tick(&frame, &mut scene).unwrap();
        }

        assert_eq!(scheduler.ticks(), 20);
        assert_eq!(scheduler.faulted().len(), 1);
        assert!(scene.all_elements().iter().all(|e| e.advance_count() == 20));
    }

    #[test]
    fn test_updates_finish_before_lines_resolve() {
        let mut stage = Stage::from_config(&CompositionConfig::default());
        let mut surface = HeadlessSurface::new(60.0).with_frame_limit(45);
        stage.run(&mut surface).unwrap();

        let draw = surface.last_draw().unwrap();
        let hub = stage.scene().element("hub").unwrap().transform().position.to_array();
        let first_node = stage.scene().element("network.node.0").unwrap().transform().position.to_array();
        assert_eq!(draw.lines[0].start, first_node);
        assert_eq!(draw.lines[0].end, hub);
    }

    #[test]
    fn test_no_ticks_after_unmount() {
        let mut stage = Stage::from_config(&CompositionConfig::default());
        let mut surface = HeadlessSurface::new(60.0).with_frame_limit(5);
        let summary = stage.run(&mut surface).unwrap();

        assert_eq!(summary.frames, 5);
        assert_eq!(stage.scheduler().state(), SchedulerState::Stopped);
        assert!(!surface.is_mounted());

        let handle = surface.records()[0].handle;
        assert!(surface.next_tick(handle).is_none());

        let ticks = stage.scheduler().ticks();
        assert!(stage.run(&mut surface).is_err());
        assert_eq!(stage.scheduler().ticks(), ticks);
    }

    /// Fails to draw on a chosen frame.
    struct FlakySurface {
        inner: HeadlessSurface,
        fail_on: u64,
    }

    impl RenderSurface for FlakySurface {
        fn mount(&mut self, scene: &SceneGraph) -> anyhow::Result<SurfaceHandle> {
            self.inner.mount(scene)
        }

        fn next_tick(&mut self, handle: SurfaceHandle) -> Option<FrameInfo> {
            self.inner.next_tick(handle)
        }

        fn draw(&mut self, handle: SurfaceHandle, frame: &FrameInfo, draw: &DrawList) -> anyhow::Result<()> {
            if frame.number == self.fail_on {
                anyhow::bail!("device lost");
            }
            self.inner.draw(handle, frame, draw)
        }

        fn aspect(&self) -> f32 {
            self.inner.aspect()
        }

        fn unmount(&mut self, handle: SurfaceHandle) {
            self.inner.unmount(handle)
        }
    }

    #[test]
    fn test_failed_draw_still_unmounts() {
        let mut stage = Stage::from_config(&CompositionConfig::default());
        let mut surface = FlakySurface {
            inner: HeadlessSurface::new(60.0).with_frame_limit(100),
            fail_on: 3,
        };

        let err = stage.run(&mut surface).unwrap_err();
        assert!(format!("{:#}", err).contains("device lost"));
        assert!(!surface.inner.is_mounted());
        assert_eq!(surface.inner.records().len(), 3);
        assert_eq!(stage.scheduler().state(), SchedulerState::Stopped);
    }
}
