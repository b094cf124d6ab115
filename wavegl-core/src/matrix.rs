/// 4x4 matrix helpers for the shader uniforms
///
/// Matrices are stored as 16 floats in row-major array order while following
/// the column-major OpenGL convention, so a translation lives in indices
/// 12, 13 and 14. Every function here is pure.
use nalgebra::Matrix4;

/// A 4x4 matrix laid out the way `glUniformMatrix4fv` expects it
pub type Matrix16 = [f32; 16];

/// Create an identity matrix
pub fn identity() -> Matrix16 {
    let mut m = [0.0; 16];
    m[0] = 1.0;
    m[5] = 1.0;
    m[10] = 1.0;
    m[15] = 1.0;
    m
}

/// Multiply two matrices, returning the row-major product `a * b`
pub fn multiply(a: &Matrix16, b: &Matrix16) -> Matrix16 {
    let mut m = [0.0; 16];
    for row in 0..4 {
        for col in 0..4 {
            m[row * 4 + col] = a[row * 4] * b[col]
                + a[row * 4 + 1] * b[col + 4]
                + a[row * 4 + 2] * b[col + 8]
                + a[row * 4 + 3] * b[col + 12];
        }
    }
    m
}

/// Create a translation matrix
pub fn translation(x: f32, y: f32, z: f32) -> Matrix16 {
    let mut m = identity();
    m[12] = x;
    m[13] = y;
    m[14] = z;
    m
}

/// Create a rotation about the X axis (angle in degrees)
pub fn rotation_x(angle_deg: f32) -> Matrix16 {
    let (sa, ca) = angle_deg.to_radians().sin_cos();
    let mut m = identity();
    m[5] = ca;
    m[6] = sa;
    m[9] = -sa;
    m[10] = ca;
    m
}

/// Create a rotation about the Y axis (angle in degrees)
pub fn rotation_y(angle_deg: f32) -> Matrix16 {
    let (sa, ca) = angle_deg.to_radians().sin_cos();
    let mut m = identity();
    m[0] = ca;
    m[2] = -sa;
    m[8] = sa;
    m[10] = ca;
    m
}

/// Create a right-handed OpenGL perspective projection
///
/// Degenerate frusta (zero depth range, a field of view whose half angle has
/// a zero sine, or a zero aspect ratio) yield the identity matrix.
pub fn perspective(fovy_deg: f32, aspect: f32, z_near: f32, z_far: f32) -> Matrix16 {
    let radians = (fovy_deg / 2.0).to_radians();
    let delta_z = z_far - z_near;
    let sine = radians.sin();
    if delta_z == 0.0 || sine == 0.0 || aspect == 0.0 {
        return identity();
    }
    let cotangent = radians.cos() / sine;

    let mut m = identity();
    m[0] = cotangent / aspect;
    m[5] = cotangent;
    m[10] = -(z_far + z_near) / delta_z;
    m[11] = -1.0;
    m[14] = -2.0 * z_near * z_far / delta_z;
    m[15] = 0.0;
    m
}

/// View a matrix as an nalgebra `Matrix4`
///
/// nalgebra stores matrices column-major, which is exactly the GL
/// interpretation of our array.
pub fn to_matrix4(m: &Matrix16) -> Matrix4<f32> {
    Matrix4::from_column_slice(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Matrix16, b: &Matrix16, eps: f32) {
        for i in 0..16 {
            assert!(
                (a[i] - b[i]).abs() < eps,
                "index {}: {} vs {}",
                i,
                a[i],
                b[i]
            );
        }
    }

    #[test]
    fn test_identity_layout() {
        let m = identity();
        for i in 0..16 {
            let expected = if i % 5 == 0 { 1.0 } else { 0.0 };
            assert_eq!(m[i], expected);
        }
    }

    #[test]
    fn test_translation_indices() {
        let m = translation(1.0, 2.0, 3.0);
        assert_eq!(m[12], 1.0);
        assert_eq!(m[13], 2.0);
        assert_eq!(m[14], 3.0);
        assert_eq!(m[15], 1.0);
    }

    #[test]
    fn test_multiply_is_not_commutative() {
        let r = rotation_x(30.0);
        let t = translation(0.0, 1.0, 0.0);
        assert_ne!(multiply(&r, &t), multiply(&t, &r));
    }

    #[test]
    fn test_multiply_matches_nalgebra() {
        let a = rotation_x(25.0);
        let b = translation(1.0, -2.0, 3.0);
        let ours = to_matrix4(&multiply(&a, &b));
        // Row-major a*b is the column-major product b*a
        let theirs = to_matrix4(&b) * to_matrix4(&a);
        assert!((ours - theirs).norm() < 1e-6);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let m = rotation_y(90.0);
        let p = to_matrix4(&m) * nalgebra::Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_x_quarter_turn() {
        let m = rotation_x(90.0);
        let p = to_matrix4(&m) * nalgebra::Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert!(p.y.abs() < 1e-6);
        assert!((p.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_perspective_entries() {
        let m = perspective(90.0, 2.0, 1.0, 3.0);
        assert_close(
            &m,
            &[
                0.5, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, -2.0, -1.0, //
                0.0, 0.0, -3.0, 0.0,
            ],
            1e-6,
        );
    }

    #[test]
    fn test_full_turn_fov_is_not_degenerate() {
        // sin(π) rounds to a tiny non-zero value in f32
        for fovy in [360.0, 720.0] {
            let m = perspective(fovy, 1.0, 0.1, 100.0);
            assert_ne!(m, identity());
            assert!(m.iter().all(|v| v.is_finite()));
            assert_eq!(m[11], -1.0);
            assert_eq!(m[15], 0.0);
            assert!(m[5].abs() > 1.0e6);
        }
    }

    #[test]
    fn test_perspective_matches_nalgebra() {
        let ours = to_matrix4(&perspective(50.0, 4.0 / 3.0, 0.1, 100.0));
        let theirs = Matrix4::new_perspective(4.0 / 3.0, 50.0f32.to_radians(), 0.1, 100.0);
        assert!((ours - theirs).norm() < 1e-4);
    }
}
