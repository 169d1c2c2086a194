//! Perspective camera and pointer rays.
//!
//! The camera looks down −Z from its position with +Y up, which is all the
//! particle scene needs. Projection uses wgpu's 0..1 depth range.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_POSITION};
use glam::{Mat4, Vec2, Vec3, Vec4};

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov_deg,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    /// Camera used by the scene: 65° FOV placed 100 units in front of the text.
    pub fn for_scene(aspect: f32) -> Self {
        let mut cam = Self::new(CAMERA_FOV_DEG, aspect, CAMERA_NEAR, CAMERA_FAR);
        cam.position = Vec3::from(CAMERA_POSITION);
        cam
    }

    /// Recompute the cached projection after changing fov/aspect/near/far.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_deg.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    /// Ray from the camera through a point in normalized device coordinates.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inv = (self.projection * self.view_matrix()).inverse();
        let p = inv * Vec4::new(ndc.x, ndc.y, 0.5, 1.0);
        let target = p.truncate() / p.w;
        Ray {
            origin: self.position,
            direction: (target - self.position).normalize_or_zero(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Where the ray meets the plane z = `z`, if it does so in front of the origin.
    pub fn intersect_plane_z(&self, z: f32) -> Option<Vec3> {
        if self.direction.z.abs() <= 1e-6 {
            return None;
        }
        let t = (z - self.origin.z) / self.direction.z;
        (t >= 0.0).then(|| self.at(t))
    }

    /// Squared distance from `p` to the closest point on the ray.
    pub fn distance_sq_to_point(&self, p: Vec3) -> f32 {
        let t = (p - self.origin).dot(self.direction);
        if t < 0.0 {
            return self.origin.distance_squared(p);
        }
        self.at(t).distance_squared(p)
    }
}
