use crate::prelude::*;

pub struct Sphere {
    center: Point3,
    radius: f64,
    mat: Arc<dyn Material>,
}

impl Sphere {
    /// Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f64, mat: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            mat,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - r.orig;
        let a = r.dir.length_squared();
        // A point sphere or a zero-length ray has no usable normal.
        if self.radius == 0.0 || a == 0.0 {
            return None;
        }
        let h = r.dir.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Nearest root in range, falling back to the far one.
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(r, p, root, outward_normal, self.mat.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn unit_sphere_at(center: Point3, radius: f64) -> Sphere {
        Sphere::new(center, radius, Arc::new(Lambertian::new(Color::one())))
    }

    #[test]
    fn hits_front_of_sphere_from_outside() {
        let sphere = unit_sphere_at(Point3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Point3::zero(), Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere
            .hit(&ray, Interval::new(0.001, INFINITY))
            .expect("ray aimed at the sphere must hit");
        assert!((rec.t - 0.5).abs() < 1e-9);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn inside_hit_flips_normal() {
        let sphere = unit_sphere_at(Point3::zero(), 2.0);
        let ray = Ray::new(Point3::zero(), Vec3::new(1.0, 0.0, 0.0));

        let rec = sphere.hit(&ray, Interval::new(0.001, INFINITY)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-9);
        assert!(!rec.front_face);
        assert!(rec.normal.dot(ray.dir) < 0.0);
    }

    #[test]
    fn falls_back_to_far_root_when_near_root_is_excluded() {
        let sphere = unit_sphere_at(Point3::new(0.0, 0.0, -2.0), 1.0);
        let ray = Ray::new(Point3::zero(), Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, Interval::new(1.5, INFINITY)).unwrap();
        assert!((rec.t - 3.0).abs() < 1e-9);
        assert!(!rec.front_face);

        assert!(sphere.hit(&ray, Interval::new(3.5, INFINITY)).is_none());
        assert!(sphere.hit(&ray, Interval::new(0.001, 0.9)).is_none());
    }

    #[test]
    fn misses_when_ray_points_away() {
        let sphere = unit_sphere_at(Point3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Point3::zero(), Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, INFINITY)).is_none());
    }

    #[test]
    fn negative_radius_is_clamped() {
        let sphere = unit_sphere_at(Point3::zero(), -3.0);
        assert_eq!(sphere.radius(), 0.0);
    }

    #[test]
    fn zero_radius_sphere_is_never_hit() {
        let sphere = unit_sphere_at(Point3::new(0.0, 0.0, -1.0), -0.5);
        let ray = Ray::new(Point3::zero(), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, INFINITY)).is_none());

        let world = HittableList::new_with(Arc::new(sphere));
        let mut cam = Camera::default();
        cam.initialize().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let color = cam.ray_color(&ray, 5, &world, &mut rng);
        assert!(color.x.is_finite() && color.y.is_finite() && color.z.is_finite());
        assert_eq!(color, Camera::sky(&ray));
    }

    #[test]
    fn degenerate_ray_direction_misses() {
        let sphere = unit_sphere_at(Point3::zero(), 1.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::zero());
        assert!(sphere.hit(&ray, Interval::new(0.001, INFINITY)).is_none());
    }

    #[test]
    fn random_hits_lie_on_surface_with_opposing_unit_normal() {
        let mut rng = StdRng::seed_from_u64(42);
        let center = Point3::new(0.3, -0.2, -4.0);
        let sphere = unit_sphere_at(center, 1.25);

        let mut hits = 0;
        for _ in 0..500 {
            let origin = Vec3::random_interval(&mut rng, -3.0, 3.0);
            let target = center + 1.2 * Vec3::random_in_unit_sphere(&mut rng);
            let ray = Ray::new(origin, target - origin);
            let Some(rec) = sphere.hit(&ray, Interval::new(0.001, INFINITY)) else {
                continue;
            };
            hits += 1;
            assert!(((rec.p - center).length() - 1.25).abs() < 1e-9);
            assert!((rec.normal.length() - 1.0).abs() < 1e-9);
            assert!(rec.normal.dot(ray.dir) <= 0.0);
            let outward = (rec.p - center) / 1.25;
            assert_eq!(rec.front_face, outward.dot(ray.dir) < 0.0);
        }
        assert!(hits > 0);
    }
}
