//! Demo scene: a large ground sphere, a grid of small random spheres and
//! three large feature spheres (glass, diffuse, metal).

use crate::prelude::*;

pub fn random_spheres(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();

    let ground_material = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -900.0, 0.0),
        900.0,
        ground_material,
    )));

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    for a in -5..5 {
        for b in -5..5 {
            let choose_mat = random_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * random_f64(rng),
                0.2,
                b as f64 + 0.9 * random_f64(rng),
            );

            // Keep clear of the large metal sphere.
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let sphere_material: Arc<dyn Material> = if choose_mat < 0.5 {
                let albedo = Color::random(rng) * Color::random(rng);
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.85 {
                let albedo = Color::random_interval(rng, 0.5, 1.0);
                let fuzz = random_f64_range(rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                glass.clone()
            };
            world.add(Arc::new(Sphere::new(center, 0.2, sphere_material)));
        }
    }

    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        glass,
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    world
}

/// Camera framing [`random_spheres`]; the caller still has to initialize it.
pub fn random_spheres_camera(
    image_width: usize,
    samples_per_pixel: u32,
    max_depth: u32,
    block_size: usize,
) -> Camera {
    let mut cam = Camera::default();

    cam.aspect_ratio = 30.0 / 20.0;
    cam.image_width = image_width;
    cam.samples_per_pixel = samples_per_pixel;
    cam.max_depth = max_depth;

    cam.block_size_x = block_size;
    cam.block_size_y = block_size;

    cam.vfov = 35.0;
    cam.lookfrom = Point3::new(13.0, 2.0, 3.0);
    cam.lookat = Point3::new(0.0, 0.0, 0.0);
    cam.vup = Vec3::new(0.0, 1.0, 0.0);

    cam.defocus_angle = 0.6;
    cam.focus_dist = 10.0;

    cam
}
