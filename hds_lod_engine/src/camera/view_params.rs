/// ViewParams - per-frame eye frame derived from a camera pose.
///
/// Holds the orthonormal gaze/up/right frame, the near-plane half sizes
/// and the frustum. Computed once per frame by the caller and read by
/// the boundary engine and the proxy resolver; nothing here is mutated
/// afterwards.

use glam::{Mat4, Vec3, Vec4};
use crate::error::Result;
use crate::engine_bail;
use super::frustum::Frustum;

/// Smallest accepted length for the gaze and the orthogonalized up hint
const MIN_AXIS_LENGTH: f32 = 1e-6;

/// Eye frame and frustum for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewParams {
    eye: Vec3,
    gaze: Vec3,
    up: Vec3,
    right: Vec3,
    fovy_degrees: f32,
    aspect: f32,
    half_height: f32,
    half_width: f32,
    znear: f32,
    zfar: f32,
    frustum: Frustum,
}

impl ViewParams {
    /// Derive the view frame from a camera pose.
    ///
    /// `gaze` need not be unit length. `up` is a hint: it is made
    /// orthogonal to the gaze, so it only has to be non-parallel.
    /// `fovy_degrees` is the full vertical field of view.
    pub fn new(
        eye: Vec3,
        gaze: Vec3,
        up: Vec3,
        fovy_degrees: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
    ) -> Result<Self> {
        if !eye.is_finite() || !gaze.is_finite() || !up.is_finite() {
            engine_bail!("hds::ViewParams", InvalidView,
                "non-finite pose (eye {}, gaze {}, up {})", eye, gaze, up);
        }
        if !(fovy_degrees > 0.0 && fovy_degrees < 180.0) {
            engine_bail!("hds::ViewParams", InvalidView,
                "vertical field of view must be in (0, 180) degrees, got {}", fovy_degrees);
        }
        if !(aspect > 0.0) || !aspect.is_finite() {
            engine_bail!("hds::ViewParams", InvalidView,
                "aspect ratio must be positive, got {}", aspect);
        }
        if !(znear > 0.0 && znear < zfar) || !zfar.is_finite() {
            engine_bail!("hds::ViewParams", InvalidView,
                "clip distances must satisfy 0 < near < far, got near {} far {}", znear, zfar);
        }

        if gaze.length() < MIN_AXIS_LENGTH {
            engine_bail!("hds::ViewParams", InvalidView, "gaze direction has zero length");
        }
        let gaze = gaze.normalize();

        let up = up - gaze * up.dot(gaze);
        if up.length() < MIN_AXIS_LENGTH {
            engine_bail!("hds::ViewParams", InvalidView, "up hint is parallel to the gaze");
        }
        let up = up.normalize();
        let right = gaze.cross(up);

        let half_height = znear * (0.5 * fovy_degrees).to_radians().tan();
        let half_width = half_height * aspect;

        // Near-plane corners relative to the eye
        let center = gaze * znear;
        let tr = center + up * half_height + right * half_width;
        let tl = center + up * half_height - right * half_width;
        let br = center - up * half_height + right * half_width;
        let bl = center - up * half_height - right * half_width;

        let sides = [
            br.cross(tr).normalize(),
            tl.cross(bl).normalize(),
            tr.cross(tl).normalize(),
            bl.cross(br).normalize(),
        ];

        Ok(Self {
            eye,
            gaze,
            up,
            right,
            fovy_degrees,
            aspect,
            half_height,
            half_width,
            znear,
            zfar,
            frustum: Frustum::new(eye, gaze, sides, znear, zfar),
        })
    }

    /// Camera looking from `eye` at `target`.
    pub fn look_at(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fovy_degrees: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
    ) -> Result<Self> {
        Self::new(eye, target - eye, up, fovy_degrees, aspect, znear, zfar)
    }

    /// Spherical camera orbiting the origin.
    ///
    /// `theta_degrees` turns around Y, `phi_degrees` is the elevation.
    /// Past the poles (90..=270 degrees of elevation) the up hint flips to
    /// -Y so the picture does not turn upside down.
    pub fn orbit(
        distance: f32,
        theta_degrees: f32,
        phi_degrees: f32,
        fovy_degrees: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
    ) -> Result<Self> {
        if !(distance > 0.0) || !distance.is_finite() {
            engine_bail!("hds::ViewParams", InvalidView,
                "orbit distance must be positive, got {}", distance);
        }

        let (theta, phi) = (theta_degrees.to_radians(), phi_degrees.to_radians());
        let eye = distance * Vec3::new(
            theta.cos() * phi.cos(),
            phi.sin(),
            theta.sin() * phi.cos(),
        );

        let phi_wrapped = phi_degrees.rem_euclid(360.0);
        let up = if (90.0..=270.0).contains(&phi_wrapped) { Vec3::NEG_Y } else { Vec3::Y };

        Self::new(eye, -eye, up, fovy_degrees, aspect, znear, zfar)
    }

    // ===== GETTERS =====

    /// Eye position.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Unit gaze direction.
    pub fn gaze(&self) -> Vec3 {
        self.gaze
    }

    /// Unit up direction, orthogonal to the gaze.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit right direction (gaze x up).
    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn fovy_degrees(&self) -> f32 {
        self.fovy_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Half height of the near plane.
    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    /// Half width of the near plane.
    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn znear(&self) -> f32 {
        self.znear
    }

    pub fn zfar(&self) -> f32 {
        self.zfar
    }

    /// Frustum for visibility tests.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    // ===== MATRICES =====

    /// Rotation part of the view transform.
    ///
    /// Rows are right, up and -gaze, so the model is rotated in front of
    /// a camera sitting at the origin and looking down -Z.
    pub fn view_rotation(&self) -> Mat4 {
        Mat4::from_cols(
            Vec4::new(self.right.x, self.up.x, -self.gaze.x, 0.0),
            Vec4::new(self.right.y, self.up.y, -self.gaze.y, 0.0),
            Vec4::new(self.right.z, self.up.z, -self.gaze.z, 0.0),
            Vec4::W,
        )
    }

    /// Full view matrix (world to eye), rotation applied after moving
    /// the eye to the origin.
    pub fn view_matrix(&self) -> Mat4 {
        self.view_rotation() * Mat4::from_translation(-self.eye)
    }

    /// OpenGL-style perspective projection matching the frustum.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fovy_degrees.to_radians(), self.aspect, self.znear, self.zfar)
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
#[path = "view_params_tests.rs"]
mod tests;
