/// CPU rasterizer built on `vello_cpu`.
pub mod cpu;
/// Rendered frame buffers.
pub mod frame;
/// Frame sequencing and sink driving.
pub mod pipeline;
