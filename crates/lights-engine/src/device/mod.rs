//! GPU device and surface management.
//!
//! [`Gpu`] owns the wgpu instance, adapter, device, queue and the window's
//! surface. Frames are acquired with [`Gpu::begin_frame`] and presented with
//! [`Gpu::submit`]; acquisition failures are mapped to a
//! [`SurfaceErrorAction`] the frame loop can act on.

mod gpu;
mod surface;

pub use gpu::{Gpu, GpuFrame, GpuInit};
pub use surface::SurfaceErrorAction;
