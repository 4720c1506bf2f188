//! 4x4 affine transformation matrix using the row-vector convention.
//!
//! # Convention
//! - Vectors are **row vectors** on the left: `Vec3 * Mat4`
//! - Translation is stored in the **last row**
//! - Transforms chain **left-to-right**: `v * A * B` applies A first, then B
//!
//! # Example
//! ```ignore
//! let transform = scale * rotation * translation; // scale first, translation last
//! let result = vertex * transform;
//! ```

use std::ops::Mul;

use super::vec3::Vec3;

/// 4x4 matrix stored as `data[row][col]` with row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in row 3 (row-vector convention).
    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    /// Creates a translation matrix from an offset vector.
    pub fn from_translation_vec(offset: Vec3) -> Self {
        Self::from_translation(offset.x, offset.y, offset.z)
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates the combined Euler rotation for angles in radians.
    ///
    /// The entries expand the row-vector product
    /// `rotation_z(rz) * rotation_y(ry) * rotation_x(rx)`.
    pub fn from_rotation(rx: f32, ry: f32, rz: f32) -> Self {
        let (sx, cx) = rx.sin_cos();
        let (sy, cy) = ry.sin_cos();
        let (sz, cz) = rz.sin_cos();

        Mat4::new([
            [
                cy * cz,
                sx * sy * cz + cx * sz,
                -cx * sy * cz + sx * sz,
                0.0,
            ],
            [
                -cy * sz,
                -sx * sy * sz + cx * cz,
                cx * sy * sz + sx * cz,
                0.0,
            ],
            [sy, -sx * cy, cx * cy, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0f32; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4::new(data)
    }

    /// Returns the first three components of a row.
    #[inline]
    pub fn row(&self, row: usize) -> Vec3 {
        Vec3::new(self.data[row][0], self.data[row][1], self.data[row][2])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For row-vector convention, `v * A * B` applies A first, then B.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a point: Vec3 * Mat4 (row vector with an implicit w=1).
///
/// Each component scales its matching row and the translation row is added.
/// The fourth column is ignored since these matrices are affine.
impl Mul<Mat4> for Vec3 {
    type Output = Vec3;

    fn mul(self, m: Mat4) -> Self::Output {
        m.row(0) * self.x + m.row(1) * self.y + m.row(2) * self.z + m.row(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_mat_eq(a: &Mat4, b: &Mat4) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn zero_rotation_and_translation_are_identity() {
        assert_eq!(Mat4::from_rotation(0.0, 0.0, 0.0), Mat4::identity());
        assert_eq!(Mat4::from_translation(0.0, 0.0, 0.0), Mat4::identity());
        assert_eq!(Mat4::default(), Mat4::identity());
    }

    #[test]
    fn rotation_rows_are_orthonormal() {
        let angles = [
            (0.3, -1.2, 2.5),
            (std::f32::consts::PI, 0.5, -0.25),
            (-3.0, 3.0, 1.0),
            (10.0, -7.5, 0.001),
        ];
        for (rx, ry, rz) in angles {
            let m = Mat4::from_rotation(rx, ry, rz);
            for i in 0..3 {
                assert_relative_eq!(m.row(i).magnitude(), 1.0, epsilon = 1e-5);
                for j in (i + 1)..3 {
                    assert_relative_eq!(m.row(i).dot(m.row(j)), 0.0, epsilon = 1e-5);
                }
            }
        }
    }

    #[test]
    fn combined_rotation_matches_axis_product() {
        let (rx, ry, rz) = (0.4, -0.9, 1.7);
        let expected = Mat4::rotation_z(rz) * Mat4::rotation_y(ry) * Mat4::rotation_x(rx);
        assert_mat_eq(&Mat4::from_rotation(rx, ry, rz), &expected);
    }

    #[test]
    fn single_axis_rotation_matches_combined() {
        assert_mat_eq(&Mat4::from_rotation(0.7, 0.0, 0.0), &Mat4::rotation_x(0.7));
        assert_mat_eq(&Mat4::from_rotation(0.0, 0.7, 0.0), &Mat4::rotation_y(0.7));
        assert_mat_eq(&Mat4::from_rotation(0.0, 0.0, 0.7), &Mat4::rotation_z(0.7));
    }

    #[test]
    fn rotate_x_quarter_turn() {
        let v = Vec3::new(0.0, 1.0, 0.0) * Mat4::from_rotation(std::f32::consts::FRAC_PI_2, 0.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn translation_lives_in_last_row() {
        let m = Mat4::from_translation(1.0, 2.0, 3.0);
        assert_eq!(m.row(3), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Vec3::new(1.0, 1.0, 1.0) * m, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn composition_applies_left_first() {
        // Rotate a quarter turn about Z, then translate along X.
        let rotate = Mat4::from_rotation(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        let translate = Mat4::from_translation(10.0, 0.0, 0.0);
        let v = Vec3::new(1.0, 0.0, 0.0);

        let composed = v * (rotate * translate);
        let stepwise = (v * rotate) * translate;

        assert_relative_eq!(composed.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(composed.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(composed.x, stepwise.x, epsilon = 1e-5);
        assert_relative_eq!(composed.y, stepwise.y, epsilon = 1e-5);
    }

    #[test]
    fn scaling_then_translation() {
        let m = Mat4::scaling(2.0, 3.0, 4.0) * Mat4::from_translation_vec(Vec3::ONE);
        assert_eq!(Vec3::ONE * m, Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = Mat4::from_translation(1.0, 2.0, 3.0).transpose();
        assert_eq!(m.get(0, 3), 1.0);
        assert_eq!(m.get(2, 3), 3.0);
        assert_eq!(m.get(3, 0), 0.0);
    }
}
