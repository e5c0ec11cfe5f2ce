use super::matrix::is_scale_translate;
use super::numbers::{format_number, round_to};
use kurbo::Affine;
use svgtypes::{PathParser, PathSegment};

/// A path segment with absolute coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    SmoothCubicTo {
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    QuadTo {
        x1: f64,
        y1: f64,
        x: f64,
        y: f64,
    },
    SmoothQuadTo {
        x: f64,
        y: f64,
    },
    ArcTo {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    ClosePath,
}

impl Segment {
    /// End point of the segment, `None` for close path
    pub fn end_point(&self) -> Option<(f64, f64)> {
        match *self {
            Segment::MoveTo { x, y }
            | Segment::LineTo { x, y }
            | Segment::CubicTo { x, y, .. }
            | Segment::SmoothCubicTo { x, y, .. }
            | Segment::QuadTo { x, y, .. }
            | Segment::SmoothQuadTo { x, y }
            | Segment::ArcTo { x, y, .. } => Some((x, y)),
            Segment::ClosePath => None,
        }
    }
}

/// Parse path data into absolute segments
///
/// Relative commands are resolved against the current point, `H`/`V` become
/// line segments. Returns `None` when the data is malformed or does not
/// start with a moveto, in which case callers leave the attribute alone.
///
/// # Examples
/// ```
/// use fig2icon::optimizer::path::{parse_path, Segment};
///
/// let segments = parse_path("M10 20v-6z").unwrap();
/// assert_eq!(segments[1], Segment::LineTo { x: 10.0, y: 14.0 });
/// ```
pub fn parse_path(d: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();
    let (mut cx, mut cy) = (0.0, 0.0);
    let (mut sx, mut sy) = (0.0, 0.0);

    for token in PathParser::from(d) {
        let origin = |abs: bool| if abs { (0.0, 0.0) } else { (cx, cy) };
        let segment = match token.ok()? {
            PathSegment::MoveTo { abs, x, y } => {
                let (ox, oy) = origin(abs);
                Segment::MoveTo { x: ox + x, y: oy + y }
            }
            PathSegment::LineTo { abs, x, y } => {
                let (ox, oy) = origin(abs);
                Segment::LineTo { x: ox + x, y: oy + y }
            }
            PathSegment::HorizontalLineTo { abs, x } => Segment::LineTo {
                x: origin(abs).0 + x,
                y: cy,
            },
            PathSegment::VerticalLineTo { abs, y } => Segment::LineTo {
                x: cx,
                y: origin(abs).1 + y,
            },
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let (ox, oy) = origin(abs);
                Segment::CubicTo {
                    x1: ox + x1,
                    y1: oy + y1,
                    x2: ox + x2,
                    y2: oy + y2,
                    x: ox + x,
                    y: oy + y,
                }
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let (ox, oy) = origin(abs);
                Segment::SmoothCubicTo {
                    x2: ox + x2,
                    y2: oy + y2,
                    x: ox + x,
                    y: oy + y,
                }
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                let (ox, oy) = origin(abs);
                Segment::QuadTo {
                    x1: ox + x1,
                    y1: oy + y1,
                    x: ox + x,
                    y: oy + y,
                }
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                let (ox, oy) = origin(abs);
                Segment::SmoothQuadTo { x: ox + x, y: oy + y }
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let (ox, oy) = origin(abs);
                Segment::ArcTo {
                    rx: rx.abs(),
                    ry: ry.abs(),
                    rotation: x_axis_rotation,
                    large_arc,
                    sweep,
                    x: ox + x,
                    y: oy + y,
                }
            }
            PathSegment::ClosePath { .. } => Segment::ClosePath,
        };

        if segments.is_empty() && !matches!(segment, Segment::MoveTo { .. }) {
            return None;
        }

        match segment {
            Segment::MoveTo { x, y } => {
                (sx, sy) = (x, y);
                (cx, cy) = (x, y);
            }
            Segment::ClosePath => (cx, cy) = (sx, sy),
            _ => {
                if let Some((x, y)) = segment.end_point() {
                    (cx, cy) = (x, y);
                }
            }
        }
        segments.push(segment);
    }

    Some(segments)
}

/// Write segments as the shortest path data at the given precision
///
/// Each segment is written either absolute or relative, whichever is
/// shorter (relative on ties, except for the initial moveto). Relative
/// offsets are computed from the rounded previous point so that rounding
/// errors do not accumulate. Zero-length lines are dropped unless
/// `keep_zero_length` is set (round or square line caps draw them).
pub fn write_path(segments: &[Segment], precision: u8, keep_zero_length: bool) -> String {
    let mut writer = PathWriter::new(precision);

    for segment in segments {
        let round = |v: f64| round_to(v, precision);
        let (cx, cy) = writer.cursor;

        match *segment {
            Segment::MoveTo { x, y } => {
                let (x, y) = (round(x), round(y));
                if writer.out.is_empty() {
                    writer.emit(&[('M', vec![x, y])]);
                } else {
                    writer.emit(&[('m', vec![x - cx, y - cy]), ('M', vec![x, y])]);
                }
                writer.cursor = (x, y);
                writer.start = (x, y);
            }
            Segment::LineTo { x, y } => {
                let (x, y) = (round(x), round(y));
                if x == cx && y == cy {
                    if keep_zero_length {
                        writer.emit(&[('l', vec![0.0, 0.0])]);
                    }
                    continue;
                }
                if y == cy {
                    writer.emit(&[('h', vec![x - cx]), ('H', vec![x])]);
                } else if x == cx {
                    writer.emit(&[('v', vec![y - cy]), ('V', vec![y])]);
                } else {
                    writer.emit(&[('l', vec![x - cx, y - cy]), ('L', vec![x, y])]);
                }
                writer.cursor = (x, y);
            }
            Segment::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let p = [round(x1), round(y1), round(x2), round(y2), round(x), round(y)];
                writer.emit(&[
                    (
                        'c',
                        vec![p[0] - cx, p[1] - cy, p[2] - cx, p[3] - cy, p[4] - cx, p[5] - cy],
                    ),
                    ('C', p.to_vec()),
                ]);
                writer.cursor = (p[4], p[5]);
            }
            Segment::SmoothCubicTo { x2, y2, x, y } => {
                let p = [round(x2), round(y2), round(x), round(y)];
                writer.emit(&[
                    ('s', vec![p[0] - cx, p[1] - cy, p[2] - cx, p[3] - cy]),
                    ('S', p.to_vec()),
                ]);
                writer.cursor = (p[2], p[3]);
            }
            Segment::QuadTo { x1, y1, x, y } => {
                let p = [round(x1), round(y1), round(x), round(y)];
                writer.emit(&[
                    ('q', vec![p[0] - cx, p[1] - cy, p[2] - cx, p[3] - cy]),
                    ('Q', p.to_vec()),
                ]);
                writer.cursor = (p[2], p[3]);
            }
            Segment::SmoothQuadTo { x, y } => {
                let (x, y) = (round(x), round(y));
                writer.emit(&[('t', vec![x - cx, y - cy]), ('T', vec![x, y])]);
                writer.cursor = (x, y);
            }
            Segment::ArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let (x, y) = (round(x), round(y));
                let flags = [f64::from(u8::from(large_arc)), f64::from(u8::from(sweep))];
                let (rx, ry, rotation) = (round(rx), round(ry), round(rotation));
                writer.emit(&[
                    ('a', vec![rx, ry, rotation, flags[0], flags[1], x - cx, y - cy]),
                    ('A', vec![rx, ry, rotation, flags[0], flags[1], x, y]),
                ]);
                writer.cursor = (x, y);
            }
            Segment::ClosePath => {
                writer.emit(&[('z', Vec::new())]);
                writer.cursor = writer.start;
            }
        }
    }

    writer.out
}

/// Incremental path data builder tracking the rounded current point
struct PathWriter {
    precision: u8,
    out: String,
    cursor: (f64, f64),
    start: (f64, f64),
    last_letter: Option<char>,
    last_token: Option<String>,
}

impl PathWriter {
    fn new(precision: u8) -> Self {
        Self {
            precision,
            out: String::new(),
            cursor: (0.0, 0.0),
            start: (0.0, 0.0),
            last_letter: None,
            last_token: None,
        }
    }

    /// Append the shortest of the candidate encodings (first wins on ties)
    fn emit(&mut self, candidates: &[(char, Vec<f64>)]) {
        let rendered = candidates
            .iter()
            .map(|(letter, numbers)| {
                let tokens: Vec<String> = numbers
                    .iter()
                    .map(|n| format_number(*n, self.precision))
                    .collect();
                (*letter, self.render(*letter, &tokens), tokens)
            })
            .min_by_key(|(_, text, _)| text.len());

        if let Some((letter, text, tokens)) = rendered {
            self.out.push_str(&text);
            self.last_letter = Some(letter);
            self.last_token = tokens.last().cloned();
        }
    }

    fn render(&self, letter: char, tokens: &[String]) -> String {
        let repeated = self.last_letter == Some(letter)
            && !matches!(letter, 'M' | 'm' | 'z')
            && self.last_token.is_some();

        let mut text = String::new();
        let mut previous = if repeated {
            self.last_token.clone()
        } else {
            text.push(letter);
            None
        };

        for token in tokens {
            if let Some(prev) = &previous {
                if needs_separator(prev, token) {
                    text.push(' ');
                }
            }
            text.push_str(token);
            previous = Some(token.clone());
        }
        text
    }
}

/// Check if two number tokens need a separator between them
fn needs_separator(previous: &str, next: &str) -> bool {
    if next.starts_with('-') {
        return false;
    }
    if next.starts_with('.') && (previous.contains('.') || previous.contains('e')) {
        return false;
    }
    true
}

/// Axis-aligned bounding box `(min_x, min_y, max_x, max_y)` of the segments
///
/// Control points are included and arcs are padded by their diameter, so
/// the box is conservative: it always contains the rendered geometry.
pub fn bounding_box(segments: &[Segment]) -> Option<(f64, f64, f64, f64)> {
    let mut points: Vec<(f64, f64)> = Vec::new();
    let (mut cx, mut cy) = (0.0, 0.0);
    let (mut sx, mut sy) = (0.0, 0.0);
    let mut last_control: Option<(f64, f64)> = None;

    for segment in segments {
        let mut control = None;
        match *segment {
            Segment::MoveTo { x, y } => {
                sx = x;
                sy = y;
                points.push((x, y));
            }
            Segment::LineTo { x, y } | Segment::SmoothQuadTo { x, y } => {
                if matches!(segment, Segment::SmoothQuadTo { .. }) {
                    let reflected = reflect(last_control, cx, cy);
                    points.push(reflected);
                    control = Some(reflected);
                }
                points.push((x, y));
            }
            Segment::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                points.extend([(x1, y1), (x2, y2), (x, y)]);
                control = Some((x2, y2));
            }
            Segment::SmoothCubicTo { x2, y2, x, y } => {
                points.extend([reflect(last_control, cx, cy), (x2, y2), (x, y)]);
                control = Some((x2, y2));
            }
            Segment::QuadTo { x1, y1, x, y } => {
                points.extend([(x1, y1), (x, y)]);
                control = Some((x1, y1));
            }
            Segment::ArcTo { rx, ry, x, y, .. } => {
                let chord = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                let pad = (2.0 * rx.max(ry)).max(chord);
                for (px, py) in [(cx, cy), (x, y)] {
                    points.push((px - pad, py - pad));
                    points.push((px + pad, py + pad));
                }
            }
            Segment::ClosePath => {}
        }

        match segment.end_point() {
            Some((x, y)) => {
                cx = x;
                cy = y;
            }
            None => {
                cx = sx;
                cy = sy;
            }
        }
        last_control = control;
    }

    let first = *points.first()?;
    Some(points.iter().fold(
        (first.0, first.1, first.0, first.1),
        |(min_x, min_y, max_x, max_y), &(x, y)| (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)),
    ))
}

fn reflect(control: Option<(f64, f64)>, cx: f64, cy: f64) -> (f64, f64) {
    match control {
        Some((x, y)) => (2.0 * cx - x, 2.0 * cy - y),
        None => (cx, cy),
    }
}

/// Apply a scale/translate matrix to absolute segments
///
/// Returns `None` for matrices with rotation or skew, and for arcs that a
/// non-uniform scale would distort (rotated ellipses).
pub fn apply_matrix(segments: &[Segment], matrix: &Affine) -> Option<Vec<Segment>> {
    if !is_scale_translate(matrix) {
        return None;
    }

    let [sx, _, _, sy, tx, ty] = matrix.as_coeffs();
    let px = |x: f64| sx * x + tx;
    let py = |y: f64| sy * y + ty;
    let uniform = (sx.abs() - sy.abs()).abs() < 1e-9;

    segments
        .iter()
        .map(|segment| {
            Some(match *segment {
                Segment::MoveTo { x, y } => Segment::MoveTo { x: px(x), y: py(y) },
                Segment::LineTo { x, y } => Segment::LineTo { x: px(x), y: py(y) },
                Segment::CubicTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => Segment::CubicTo {
                    x1: px(x1),
                    y1: py(y1),
                    x2: px(x2),
                    y2: py(y2),
                    x: px(x),
                    y: py(y),
                },
                Segment::SmoothCubicTo { x2, y2, x, y } => Segment::SmoothCubicTo {
                    x2: px(x2),
                    y2: py(y2),
                    x: px(x),
                    y: py(y),
                },
                Segment::QuadTo { x1, y1, x, y } => Segment::QuadTo {
                    x1: px(x1),
                    y1: py(y1),
                    x: px(x),
                    y: py(y),
                },
                Segment::SmoothQuadTo { x, y } => Segment::SmoothQuadTo { x: px(x), y: py(y) },
                Segment::ArcTo {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                } => {
                    if !uniform && rotation % 180.0 != 0.0 {
                        return None;
                    }
                    Segment::ArcTo {
                        rx: rx * sx.abs(),
                        ry: ry * sy.abs(),
                        rotation,
                        large_arc,
                        sweep: if sx * sy < 0.0 { !sweep } else { sweep },
                        x: px(x),
                        y: py(y),
                    }
                }
                Segment::ClosePath => Segment::ClosePath,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(d: &str) -> String {
        write_path(&parse_path(d).unwrap(), 4, false)
    }

    #[test]
    fn test_parse_relative_and_implicit() {
        let segments = parse_path("m1 1 2 2h3v-1z").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::MoveTo { x: 1.0, y: 1.0 },
                Segment::LineTo { x: 3.0, y: 3.0 },
                Segment::LineTo { x: 6.0, y: 3.0 },
                Segment::LineTo { x: 6.0, y: 2.0 },
                Segment::ClosePath,
            ]
        );
    }

    #[test]
    fn test_parse_arc_with_compact_flags() {
        let segments = parse_path("M0 0a5 5 0 015 5").unwrap();
        assert_eq!(
            segments[1],
            Segment::ArcTo {
                rx: 5.0,
                ry: 5.0,
                rotation: 0.0,
                large_arc: false,
                sweep: true,
                x: 5.0,
                y: 5.0,
            }
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_path("L1 1").is_none());
        assert!(parse_path("M1").is_none());
        assert!(parse_path("M1 1X2").is_none());
        assert_eq!(parse_path(""), Some(vec![]));
    }

    #[test]
    fn test_write_keeps_minimal_path() {
        assert_eq!(
            roundtrip("M10 20v-6h4v6h5v-8h3L12 3 2 12h3v8z"),
            "M10 20v-6h4v6h5v-8h3L12 3 2 12h3v8z"
        );
    }

    #[test]
    fn test_write_shortens_absolute_rect() {
        assert_eq!(roundtrip("M15 11H17V13H15Z"), "M15 11h2v2h-2z");
    }

    #[test]
    fn test_write_rounds_precision() {
        assert_eq!(roundtrip("M0.123456 0L1.000001 1.99999"), "M.1235 0L1 2");
    }

    #[test]
    fn test_write_drops_zero_length_lines() {
        assert_eq!(roundtrip("M1 1L1 1L2 1"), "M1 1h1");
        let segments = parse_path("M1 1L1 1").unwrap();
        assert_eq!(write_path(&segments, 4, true), "M1 1l0 0");
    }

    #[test]
    fn test_write_number_separators() {
        assert_eq!(roundtrip("M0 0c.5.5 1-1 1.5.5"), "M0 0c.5.5 1-1 1.5.5");
    }

    #[test]
    fn test_write_lone_moveto() {
        assert_eq!(roundtrip("M0 0"), "M0 0");
    }

    #[test]
    fn test_bounding_box() {
        let segments = parse_path("M1 2h3v4z").unwrap();
        assert_eq!(bounding_box(&segments), Some((1.0, 2.0, 4.0, 6.0)));
        assert_eq!(bounding_box(&[]), None);
    }

    #[test]
    fn test_apply_translate_scale() {
        let segments = parse_path("M1 1h2").unwrap();
        let m = Affine::new([2.0, 0.0, 0.0, 2.0, 10.0, 0.0]);
        let moved = apply_matrix(&segments, &m).unwrap();
        assert_eq!(write_path(&moved, 4, false), "M12 2h4");
    }

    #[test]
    fn test_apply_rejects_rotation() {
        let segments = parse_path("M1 1h2").unwrap();
        let m = Affine::rotate(90f64.to_radians());
        assert!(apply_matrix(&segments, &m).is_none());
    }
}
