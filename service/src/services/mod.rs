//! Transform dispatch and worker pool.

pub mod pool;
pub mod transform;
