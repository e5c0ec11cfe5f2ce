use super::numbers::{format_number, round_to};
use kurbo::Affine;
use std::str::FromStr;
use svgtypes::Transform;

/// Precision used for the linear part of a matrix (scale, rotation, skew)
const LINEAR_PRECISION: u8 = 5;

/// Parse a transform list into a single matrix
///
/// Returns `None` for unknown functions or malformed arguments.
///
/// # Examples
/// ```
/// use fig2icon::optimizer::matrix::parse_transform;
/// use kurbo::Affine;
///
/// let m = parse_transform("translate(10 5) scale(2)").unwrap();
/// assert_eq!(m, Affine::new([2.0, 0.0, 0.0, 2.0, 10.0, 5.0]));
/// ```
pub fn parse_transform(value: &str) -> Option<Affine> {
    let ts = Transform::from_str(value).ok()?;
    Some(Affine::new([ts.a, ts.b, ts.c, ts.d, ts.e, ts.f]))
}

/// Coefficients with the linear part and the translation rounded
pub fn rounded_coeffs(matrix: &Affine, precision: u8) -> [f64; 6] {
    let [a, b, c, d, e, f] = matrix.as_coeffs();
    let linear = |v: f64| round_to(v, LINEAR_PRECISION.max(precision));
    [
        linear(a),
        linear(b),
        linear(c),
        linear(d),
        round_to(e, precision),
        round_to(f, precision),
    ]
}

/// Check if the matrix is the identity once rounded
pub fn is_identity(matrix: &Affine, precision: u8) -> bool {
    rounded_coeffs(matrix, precision) == Affine::IDENTITY.as_coeffs()
}

/// Check if the matrix only scales and translates
pub fn is_scale_translate(matrix: &Affine) -> bool {
    let [_, b, c, ..] = matrix.as_coeffs();
    b == 0.0 && c == 0.0
}

/// Write a matrix as the shortest equivalent transform list
///
/// Returns an empty string for the identity. A rotation combined with a
/// translation is written around its fixed point (`rotate(a cx cy)`) when
/// that is shorter.
///
/// # Examples
/// ```
/// use fig2icon::optimizer::matrix::format_transform;
/// use kurbo::Affine;
///
/// assert_eq!(format_transform(&Affine::translate((3.0, 0.0)), 4), "translate(3)");
/// assert_eq!(format_transform(&Affine::IDENTITY, 4), "");
/// ```
pub fn format_transform(matrix: &Affine, precision: u8) -> String {
    let [a, b, c, d, e, f] = rounded_coeffs(matrix, precision);
    let linear_precision = LINEAR_PRECISION.max(precision);
    let num = |v: f64| format_number(v, precision);
    let lin = |v: f64| format_number(v, linear_precision);

    if is_identity(matrix, precision) {
        return String::new();
    }

    let translate = if e == 0.0 && f == 0.0 {
        String::new()
    } else if f == 0.0 {
        format!("translate({})", num(e))
    } else {
        format!("translate({} {})", num(e), num(f))
    };

    if b == 0.0 && c == 0.0 {
        let scale = if a == 1.0 && d == 1.0 {
            String::new()
        } else if a == d {
            format!("scale({})", lin(a))
        } else {
            format!("scale({} {})", lin(a), lin(d))
        };
        return format!("{translate}{scale}");
    }

    // Pure rotation: a = d = cos, b = -c = sin
    if a == d && b == -c && (a * a + b * b - 1.0).abs() < 1e-5 {
        return format_rotation(matrix, precision, translate);
    }

    format!(
        "matrix({} {} {} {} {} {})",
        lin(a),
        lin(b),
        lin(c),
        lin(d),
        num(e),
        num(f)
    )
}

/// Shortest of `translate(..)rotate(a)` and `rotate(a cx cy)`
fn format_rotation(matrix: &Affine, precision: u8, translate: String) -> String {
    let [a, b, _, _, e, f] = matrix.as_coeffs();
    let degrees = b.atan2(a).to_degrees();
    let angle = format_number(degrees, precision);
    let around_origin = format!("{translate}rotate({angle})");
    if translate.is_empty() {
        return around_origin;
    }

    // Fixed point of the rotation: solve (I - R) c = (e, f)
    let (sin, cos) = degrees.to_radians().sin_cos();
    let det = (1.0 - cos) * (1.0 - cos) + sin * sin;
    if det.abs() < 1e-12 {
        return around_origin;
    }
    let cx = ((1.0 - cos) * e - sin * f) / det;
    let cy = (sin * e + (1.0 - cos) * f) / det;
    let around_center = format!(
        "rotate({angle} {} {})",
        format_number(cx, precision),
        format_number(cy, precision)
    );

    if around_center.len() <= around_origin.len() {
        around_center
    } else {
        around_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortest(value: &str) -> String {
        format_transform(&parse_transform(value).unwrap(), 4)
    }

    #[test]
    fn test_parse_single_functions() {
        assert_eq!(parse_transform("translate(5)"), Some(Affine::translate((5.0, 0.0))));
        assert_eq!(parse_transform("scale(2, 3)"), Some(Affine::scale_non_uniform(2.0, 3.0)));
        assert_eq!(
            parse_transform("matrix(1,0,0,1,2,3)"),
            Some(Affine::new([1.0, 0.0, 0.0, 1.0, 2.0, 3.0]))
        );
    }

    #[test]
    fn test_parse_list_composes_left_to_right() {
        let m = parse_transform("scale(2) translate(1 1)").unwrap();
        assert_eq!(m, Affine::new([2.0, 0.0, 0.0, 2.0, 2.0, 2.0]));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(parse_transform("perspective(2)").is_none());
        assert!(parse_transform("translate(1 2 3)").is_none());
        assert!(parse_transform("translate(1").is_none());
    }

    #[test]
    fn test_format_shortest() {
        assert_eq!(format_transform(&Affine::translate((1.5, -2.0)), 4), "translate(1.5 -2)");
        assert_eq!(format_transform(&Affine::scale(2.0), 4), "scale(2)");
        assert_eq!(format_transform(&Affine::scale_non_uniform(1.0, -1.0), 4), "scale(1 -1)");
        assert_eq!(
            format_transform(&(Affine::translate((4.0, 4.0)) * Affine::scale(0.5)), 4),
            "translate(4 4)scale(.5)"
        );
        assert_eq!(format_transform(&Affine::rotate(90f64.to_radians()), 4), "rotate(90)");
        assert_eq!(
            format_transform(&Affine::skew(45f64.to_radians().tan(), 0.0), 4),
            "matrix(1 0 1 1 0 0)"
        );
    }

    #[test]
    fn test_rotation_angle_is_exact() {
        assert_eq!(shortest("rotate(30)"), "rotate(30)");
        assert_eq!(shortest("rotate(-12.5)"), "rotate(-12.5)");
    }

    #[test]
    fn test_rotation_around_point() {
        assert_eq!(shortest("rotate(30 12 12)"), "rotate(30 12 12)");
        assert_eq!(shortest("translate(12 12) rotate(90) translate(-12 -12)"), "rotate(90 12 12)");
    }

    #[test]
    fn test_translated_rotation_uses_fixed_point() {
        assert_eq!(shortest("translate(1) rotate(90)"), "rotate(90 .5 .5)");
    }

    #[test]
    fn test_rotate_around_point_cancels() {
        assert_eq!(shortest("rotate(90 12 12) rotate(-90 12 12)"), "");
    }

    #[test]
    fn test_output_is_stable() {
        for value in ["rotate(30 12 12)", "translate(1.5 -2)scale(.5)", "rotate(45)", "matrix(1 0 1 1 0 0)"] {
            let once = shortest(value);
            assert_eq!(shortest(&once), once, "{value}");
        }
    }
}
