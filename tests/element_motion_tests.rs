use glam::Vec3;
use hero_scene::element::FloatTuning;
use hero_scene::math::Color;
use hero_scene::{AnimatedElement, Behavior, FloatMotion, Material, ShapeDescriptor, ShapeKind, Transform};

#[cfg(test)]
mod element_motion_tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn sphere() -> ShapeDescriptor {
        ShapeDescriptor::new(ShapeKind::Sphere, &[0.15, 16.0, 16.0], Material::new(Color::WHITE)).unwrap()
    }

    fn element(behavior: Behavior) -> AnimatedElement {
        let rest = Transform::at(Vec3::new(1.0, 2.0, 3.0));
        AnimatedElement::new("subject", sphere(), rest, behavior)
    }

    #[test]
    fn test_static_never_moves() {
        let mut e = element(Behavior::Static);
        let start = *e.transform();
        for dt in [0.0, 0.016, 1.0, 1000.0, 1e-9] {
            e.advance(dt).unwrap();
            assert_eq!(*e.transform(), start);
        }
    }

    #[test]
    fn test_spin_is_additive() {
        let rate = 1.8;
        let mut e = element(Behavior::SpinZ { rate });
        let z0 = e.transform().rotation.z;

        e.advance(0.25).unwrap();
        e.advance(0.5).unwrap();

        assert!((e.transform().rotation.z - (z0 + rate * 0.75)).abs() < EPS);
    }

    #[test]
    fn test_spin_is_additive_from_a_large_angle() {
        let rate = 1.8;
        let mut rest = Transform::at(Vec3::ZERO);
        rest.rotation.z = 5.4e5;
        let mut e = AnimatedElement::new("gear", sphere(), rest, Behavior::SpinZ { rate });

        let (dt1, dt2) = (1.0 / 60.0, 0.5);
        for _ in 0..60 {
            e.advance(dt1).unwrap();
        }
        e.advance(dt2).unwrap();

        let tau = std::f64::consts::TAU;
        let expected = (5.4e5 + rate as f64 * (60.0 * dt1 as f64 + dt2 as f64)).rem_euclid(tau);
        let actual = e.transform().rotation.z as f64;
        // Compare on the circle.
        let diff = (actual - expected).rem_euclid(tau);
        assert!(diff.min(tau - diff) < 1e-4, "z = {}, expected {}", actual, expected);
    }

    #[test]
    fn test_zero_step_is_a_no_op() {
        for behavior in [
            Behavior::Static,
            Behavior::SpinZ { rate: -1.5 },
            Behavior::Float(FloatMotion::new(2.0, 0.5, 0.5).with_phase(1.1)),
        ] {
            let mut e = element(behavior);
            let before = *e.transform();
            e.advance(0.0).unwrap();
            e.advance(0.0).unwrap();
            assert_eq!(*e.transform(), before, "{:?}", behavior);

            e.advance(0.1).unwrap();
            let moved = *e.transform();
            e.advance(0.0).unwrap();
            assert_eq!(*e.transform(), moved, "{:?}", behavior);
        }
    }

    #[test]
    fn test_float_stays_in_band() {
        let intensity = 0.3;
        let mut e = element(Behavior::Float(FloatMotion::new(1.7, 1.0, intensity).with_phase(0.4)));
        let base_y = e.rest().position.y;

        for _ in 0..10_000 {
            e.advance(0.013).unwrap();
            let y = e.transform().position.y;
            assert!(y >= base_y - intensity - EPS && y <= base_y + intensity + EPS, "y = {}", y);
        }
    }

    #[test]
    fn test_float_is_continuous() {
        let motion = FloatMotion::new(3.0, 1.0, 0.5);
        let mut e = element(Behavior::Float(motion));
        let dt = 0.001;
        // |dy/dt| <= intensity * speed * bob_frequency
        let max_jump = motion.float_intensity * motion.speed * FloatTuning::default().bob_frequency * dt;

        let mut last = e.transform().position.y;
        for _ in 0..20_000 {
            e.advance(dt).unwrap();
            let y = e.transform().position.y;
            assert!((y - last).abs() <= max_jump + EPS);
            last = y;
        }
    }

    #[test]
    fn test_float_is_periodic() {
        let motion = FloatMotion::new(2.0, 0.5, 0.5);
        let mut e = element(Behavior::Float(motion));
        let start = e.transform().position.y;

        // The bob returns after 2π / (speed · bob_frequency) seconds.
        let period = std::f32::consts::TAU / motion.speed;
        e.advance(period).unwrap();
        assert!((e.transform().position.y - start).abs() < 1e-3);
    }

    #[test]
    fn test_float_keeps_x_and_z() {
        let mut e = element(Behavior::Float(FloatMotion::default()));
        e.advance(2.5).unwrap();
        assert_eq!(e.transform().position.x, 1.0);
        assert_eq!(e.transform().position.z, 3.0);
    }

    #[test]
    fn test_fault_leaves_transform_untouched() {
        let mut e = element(Behavior::SpinZ { rate: f32::MAX });
        e.advance(0.5).unwrap();
        let before = *e.transform();

        assert!(e.advance(f32::MAX).is_err());
        assert_eq!(*e.transform(), before);
        assert!(e.advance(f32::NAN).is_err());
        assert_eq!(*e.transform(), before);
        assert_eq!(e.advance_count(), 3);
    }
}
