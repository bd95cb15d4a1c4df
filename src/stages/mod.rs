pub mod stage0_prepare;
pub mod stage1_annotate;
pub mod stage2_align;
pub mod stage3_render;

pub use stage0_prepare::*;
pub use stage1_annotate::*;
pub use stage2_align::*;
pub use stage3_render::*;
