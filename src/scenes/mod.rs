mod bar_chart;
mod builder;
mod common;
mod marketing;
mod node_network;

pub use bar_chart::{bar_chart, BarChartConfig};
pub use builder::{Composition, GeneratedGroup, SceneBuilder};
pub use common::{member_id, member_phase};
pub use marketing::{compose, gears, hub, GearPlacement, GearSetConfig, HubConfig};
pub use node_network::{node_network, NodeNetworkConfig};
