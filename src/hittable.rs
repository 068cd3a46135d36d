use crate::prelude::*;

/// Result of a successful ray/surface intersection.
///
/// The material is borrowed from the surface that was hit, so a record never
/// outlives the scene it came from.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    pub p: Point3,
    /// Unit normal, always facing against the incoming ray.
    pub normal: Vec3,
    pub t: f64,
    pub mat: &'a dyn Material,
    /// True when the ray arrived from outside the surface.
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Builds a record, orienting `outward_normal` (assumed unit length)
    /// against the direction of `r`.
    pub fn new(r: &Ray, p: Point3, t: f64, outward_normal: Vec3, mat: &'a dyn Material) -> Self {
        let front_face = r.dir.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            p,
            normal,
            t,
            mat,
            front_face,
        }
    }
}

pub trait Hittable: Send + Sync {
    /// Nearest intersection with `t` strictly inside `ray_t`, if any.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}
