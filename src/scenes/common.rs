use crate::math::golden_phase;
use crate::scene::ElementId;

/// Id of the `index`-th member of a generated group, e.g. `chart.bar.3`.
pub fn member_id(prefix: &str, role: &str, index: usize) -> ElementId {
    ElementId::new(format!("{prefix}.{role}.{index}"))
}

/// Phase offset for the `index`-th member of a group.
pub fn member_phase(index: usize) -> f32 {
    golden_phase(index as u32)
}
