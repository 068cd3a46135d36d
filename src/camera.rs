use crate::prelude::*;
use log::debug;

/// Pinhole/thin-lens camera.
///
/// Set the public configuration fields, then call [`Camera::initialize`] once
/// to derive the viewport geometry. Derived state is read-only afterwards,
/// so one camera can be shared by every render thread.
#[derive(Debug, Clone)]
pub struct Camera {
    pub aspect_ratio: f64,
    pub image_width: usize,
    pub samples_per_pixel: u32,
    /// Bounce limit; a ray that exhausts it contributes black.
    pub max_depth: u32,
    pub block_size_x: usize,
    pub block_size_y: usize,

    /// Vertical field of view in degrees.
    pub vfov: f64,
    pub lookfrom: Point3,
    pub lookat: Point3,
    pub vup: Vec3,

    /// Aperture cone angle in degrees; zero gives a pinhole.
    pub defocus_angle: f64,
    /// Distance from `lookfrom` to the plane of perfect focus.
    pub focus_dist: f64,

    initialized: bool,
    /// `(image_width, block_size_x, block_size_y)` seen by the last
    /// successful [`Camera::initialize`].
    initialized_layout: (usize, usize, usize),
    image_height: usize,
    pixel_samples_scale: f64,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            block_size_x: 32,
            block_size_y: 32,
            vfov: 90.0,
            lookfrom: Point3::zero(),
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
            initialized: false,
            initialized_layout: (0, 0, 0),
            image_height: 0,
            pixel_samples_scale: 0.0,
            center: Point3::zero(),
            pixel00_loc: Point3::zero(),
            pixel_delta_u: Vec3::zero(),
            pixel_delta_v: Vec3::zero(),
            u: Vec3::zero(),
            v: Vec3::zero(),
            w: Vec3::zero(),
            defocus_disk_u: Vec3::zero(),
            defocus_disk_v: Vec3::zero(),
        }
    }
}

impl Camera {
    /// Validates the configuration and derives the viewport geometry.
    pub fn initialize(&mut self) -> Result<(), RenderError> {
        self.validate()?;

        self.image_height = ((self.image_width as f64 / self.aspect_ratio) as usize).max(1);
        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f64;
        self.center = self.lookfrom;

        let theta = degrees_to_radians(self.vfov);
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Orthonormal camera frame; w points backwards from the view direction.
        self.w = (self.lookfrom - self.lookat).normalized();
        self.u = self.vup.cross(self.w).normalized();
        self.v = self.w.cross(self.u);

        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left =
            self.center - (self.focus_dist * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = self.focus_dist * degrees_to_radians(self.defocus_angle / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        self.initialized = true;
        self.initialized_layout = self.layout();
        debug!(
            "camera initialized: {}x{} px, pixel00 at ({}), du ({}), dv ({}), defocus radius {:.4}",
            self.image_width,
            self.image_height,
            self.pixel00_loc,
            self.pixel_delta_u,
            self.pixel_delta_v,
            defocus_radius
        );
        Ok(())
    }

    fn validate(&self) -> Result<(), RenderError> {
        if self.image_width == 0 {
            return Err(RenderError::InvalidConfig("image width must be at least 1"));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(RenderError::InvalidConfig("aspect ratio must be positive"));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig("samples per pixel must be at least 1"));
        }
        if self.block_size_x == 0 || self.block_size_y == 0 {
            return Err(RenderError::InvalidConfig("tile size must be at least 1x1"));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(RenderError::InvalidConfig("vertical fov must be in (0, 180) degrees"));
        }
        if !(self.focus_dist > 0.0) {
            return Err(RenderError::InvalidConfig("focus distance must be positive"));
        }
        let view = self.lookfrom - self.lookat;
        if view.near_zero() {
            return Err(RenderError::InvalidConfig("lookfrom and lookat coincide"));
        }
        if self.vup.cross(view).near_zero() {
            return Err(RenderError::InvalidConfig("vup is parallel to the view direction"));
        }
        Ok(())
    }

    fn layout(&self) -> (usize, usize, usize) {
        (self.image_width, self.block_size_x, self.block_size_y)
    }

    /// True once [`Camera::initialize`] has succeeded and the image and tile
    /// sizes have not been changed since.
    pub fn is_initialized(&self) -> bool {
        self.initialized && self.initialized_layout == self.layout()
    }

    /// Derived image height; zero until [`Camera::initialize`] has run.
    pub fn image_height(&self) -> usize {
        self.image_height
    }

    /// Renders every pixel of `tile`, writing the sample average (linear,
    /// not gamma corrected) into the tile's slice of the output buffer.
    pub fn render_tile<W: Hittable + ?Sized>(
        &self,
        world: &W,
        tile: &mut Tile<'_>,
        rng: &mut dyn RngCore,
    ) {
        for local_y in 0..tile.height() {
            for local_x in 0..tile.width() {
                let i = tile.x0 + local_x;
                let j = tile.y0 + local_y;

                let mut pixel_color = Color::zero();
                for _sample in 0..self.samples_per_pixel {
                    let r = self.get_ray(i, j, rng);
                    pixel_color += self.ray_color(&r, self.max_depth, world, rng);
                }
                tile.set(local_x, local_y, pixel_color * self.pixel_samples_scale);
            }
        }
    }

    pub fn ray_color<W: Hittable + ?Sized>(
        &self,
        r: &Ray,
        depth: u32,
        world: &W,
        rng: &mut dyn RngCore,
    ) -> Color {
        if depth == 0 {
            return Color::zero();
        }

        // t_min above zero keeps bounced rays from re-hitting their own surface.
        if let Some(rec) = world.hit(r, Interval::new(0.001, INFINITY)) {
            if let Some((scattered, attenuation)) = rec.mat.scatter(r, &rec, rng) {
                return attenuation * self.ray_color(&scattered, depth - 1, world, rng);
            }
            return Color::zero();
        }

        Self::sky(r)
    }

    /// Vertical white-to-blue gradient used as the only light source.
    pub fn sky(r: &Ray) -> Color {
        let unit_direction = r.dir.normalized();
        let a = 0.5 * (unit_direction.y + 1.0);
        (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
    }

    /// Camera ray for pixel `(i, j)`, originating on the defocus disk and
    /// aimed at a randomly jittered point inside the pixel.
    pub fn get_ray(&self, i: usize, j: usize, rng: &mut dyn RngCore) -> Ray {
        let offset = Self::sample_square(rng);
        self.ray_through(i as f64 + offset.x, j as f64 + offset.y, rng)
    }

    /// Camera ray through continuous pixel coordinates; `(i, j)` is the
    /// center of pixel `(i, j)`.
    pub fn ray_through(&self, fx: f64, fy: f64, rng: &mut dyn RngCore) -> Ray {
        let pixel_sample = self.pixel00_loc + (fx * self.pixel_delta_u) + (fy * self.pixel_delta_v);

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };
        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Offset in the `[-0.5, 0.5)` unit square, taken for every sample.
    fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
        Vec3::new(random_f64(rng) - 0.5, random_f64(rng) - 0.5, 0.0)
    }

    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = Vec3::random_in_unit_disk(rng);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }
}
