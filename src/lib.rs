//! Tiled, multi-threaded path tracer for scenes of spheres.
//!
//! A [`Camera`](camera::Camera) traces jittered, depth-of-field rays through a
//! [`HittableList`](hittable_list::HittableList); the
//! [`renderer`] splits the image into tiles and renders them on a fixed pool
//! of worker threads fed by a blocking [`WorkQueue`](work_queue::WorkQueue).

pub mod camera;
pub mod cli;
pub mod color;
pub mod error;
pub mod hittable;
pub mod hittable_list;
pub mod interval;
pub mod logger;
pub mod material;
pub mod prelude;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod sphere;
pub mod tile;
pub mod vec3;
pub mod work_queue;
