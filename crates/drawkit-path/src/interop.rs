//! Conversion to and from other path representations.
//!
//! - [`lyon::path::Path`] for tessellation and rendering back ends
//! - SVG path data (`M L H V C Z`, absolute and relative)
//! - JSON via serde

use drawkit_core::Point;
use lyon::math::point;
use lyon::path::PathEvent;
use thiserror::Error;
use tracing::debug;

use crate::model::{validate_segments, Path, Segment};

/// Errors raised while reading SVG path data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SvgPathError {
    #[error("Path data must start with a move-to command, found '{0}'")]
    ExpectedMoveTo(String),

    #[error("Unsupported path command '{0}'")]
    UnsupportedCommand(char),

    #[error("Invalid number '{0}' in path data")]
    InvalidNumber(String),

    #[error("Command '{command}' is missing coordinates")]
    MissingArguments { command: char },
}

fn to_lyon_point(p: Point) -> lyon::math::Point {
    point(p.x as f32, p.y as f32)
}

fn from_lyon_point(p: lyon::math::Point) -> Point {
    Point::new(f64::from(p.x), f64::from(p.y))
}

impl Path {
    /// Builds the equivalent lyon path (single precision).
    pub fn to_lyon_path(&self) -> lyon::path::Path {
        let mut builder = lyon::path::Path::builder();
        let mut open = false;
        for seg in self.segments() {
            match *seg {
                Segment::MoveTo { to } => {
                    if open {
                        builder.end(false);
                    }
                    builder.begin(to_lyon_point(to));
                    open = true;
                }
                Segment::LineTo { to } => {
                    builder.line_to(to_lyon_point(to));
                }
                Segment::CurveTo { ctrl1, ctrl2, to } => {
                    builder.cubic_bezier_to(
                        to_lyon_point(ctrl1),
                        to_lyon_point(ctrl2),
                        to_lyon_point(to),
                    );
                }
                Segment::Close => {
                    if open {
                        builder.end(true);
                        open = false;
                    }
                }
            }
        }
        if open {
            builder.end(false);
        }
        builder.build()
    }

    /// Reads a lyon path. Quadratic curves are raised to cubics.
    pub fn from_lyon_path(path: &lyon::path::Path) -> Path {
        let mut segments = Vec::new();
        for event in path.iter() {
            match event {
                PathEvent::Begin { at } => segments.push(Segment::MoveTo {
                    to: from_lyon_point(at),
                }),
                PathEvent::Line { to, .. } => segments.push(Segment::LineTo {
                    to: from_lyon_point(to),
                }),
                PathEvent::Quadratic { from, ctrl, to } => {
                    let (from, ctrl, to) =
                        (from_lyon_point(from), from_lyon_point(ctrl), from_lyon_point(to));
                    segments.push(Segment::CurveTo {
                        ctrl1: from + (ctrl - from) * (2.0 / 3.0),
                        ctrl2: to + (ctrl - to) * (2.0 / 3.0),
                        to,
                    });
                }
                PathEvent::Cubic { ctrl1, ctrl2, to, .. } => segments.push(Segment::CurveTo {
                    ctrl1: from_lyon_point(ctrl1),
                    ctrl2: from_lyon_point(ctrl2),
                    to: from_lyon_point(to),
                }),
                PathEvent::End { close, .. } => {
                    if close {
                        segments.push(Segment::Close);
                    }
                }
            }
        }
        Path::from_raw(segments)
    }

    /// SVG path data using absolute commands.
    pub fn to_svg_path_data(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.len());
        for seg in self.segments() {
            parts.push(match *seg {
                Segment::MoveTo { to } => format!("M {} {}", to.x, to.y),
                Segment::LineTo { to } => format!("L {} {}", to.x, to.y),
                Segment::CurveTo { ctrl1, ctrl2, to } => format!(
                    "C {} {} {} {} {} {}",
                    ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                ),
                Segment::Close => "Z".to_string(),
            });
        }
        parts.join(" ")
    }

    /// Parses SVG path data made of `M L H V C Z` commands in either case.
    pub fn from_svg_path_data(data: &str) -> Result<Path, SvgPathError> {
        let tokens = tokenize_svg_path(data);
        let mut path = Path::new();
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        let mut i = 0;

        if let Some(first) = tokens.first() {
            if !matches!(first.as_str(), "M" | "m") {
                return Err(SvgPathError::ExpectedMoveTo(first.clone()));
            }
        }

        while i < tokens.len() {
            let token = &tokens[i];
            let Some(cmd) = command_of(token) else {
                return Err(SvgPathError::InvalidNumber(token.clone()));
            };
            i += 1;
            let relative = cmd.is_ascii_lowercase();
            let base = |current: Point| if relative { current } else { Point::ZERO };

            match cmd.to_ascii_uppercase() {
                'M' => {
                    let mut first = true;
                    loop {
                        let Some([x, y]) = take_numbers::<2>(&tokens, &mut i, cmd, first)? else {
                            break;
                        };
                        let to = base(current) + Point::new(x, y);
                        if first {
                            path.move_to(to);
                            start = to;
                            first = false;
                        } else {
                            path.line_to(to);
                        }
                        current = to;
                    }
                }
                'L' => {
                    let mut first = true;
                    while let Some([x, y]) = take_numbers::<2>(&tokens, &mut i, cmd, first)? {
                        let to = base(current) + Point::new(x, y);
                        path.line_to(to);
                        current = to;
                        first = false;
                    }
                }
                'H' => {
                    let mut first = true;
                    while let Some([x]) = take_numbers::<1>(&tokens, &mut i, cmd, first)? {
                        let to = Point::new(if relative { current.x + x } else { x }, current.y);
                        path.line_to(to);
                        current = to;
                        first = false;
                    }
                }
                'V' => {
                    let mut first = true;
                    while let Some([y]) = take_numbers::<1>(&tokens, &mut i, cmd, first)? {
                        let to = Point::new(current.x, if relative { current.y + y } else { y });
                        path.line_to(to);
                        current = to;
                        first = false;
                    }
                }
                'C' => {
                    let mut first = true;
                    while let Some([x1, y1, x2, y2, x, y]) =
                        take_numbers::<6>(&tokens, &mut i, cmd, first)?
                    {
                        let origin = base(current);
                        let to = origin + Point::new(x, y);
                        path.curve_to(origin + Point::new(x1, y1), origin + Point::new(x2, y2), to);
                        current = to;
                        first = false;
                    }
                }
                'Z' => {
                    path.close();
                    current = start;
                }
                _ => return Err(SvgPathError::UnsupportedCommand(cmd)),
            }
        }

        debug!("Parsed SVG path data into {} segments", path.len());
        Ok(path)
    }

    /// Serializes the path (id and segments) to JSON.
    pub fn to_json(&self) -> drawkit_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a path from JSON, checking the segment ordering rules.
    pub fn from_json(json: &str) -> drawkit_core::Result<Path> {
        let path: Path = serde_json::from_str(json)?;
        validate_segments(path.segments())?;
        Ok(path)
    }
}

fn command_of(token: &str) -> Option<char> {
    let mut chars = token.chars();
    let c = chars.next()?;
    (chars.next().is_none() && c.is_ascii_alphabetic()).then_some(c)
}

/// Reads the next `N` numbers of a command's argument list.
///
/// Returns `Ok(None)` when the list is exhausted, which is an error only
/// for the command's first argument group.
fn take_numbers<const N: usize>(
    tokens: &[String],
    i: &mut usize,
    command: char,
    required: bool,
) -> Result<Option<[f64; N]>, SvgPathError> {
    let available = tokens[*i..]
        .iter()
        .take_while(|t| command_of(t).is_none())
        .count();
    if available == 0 {
        return if required {
            Err(SvgPathError::MissingArguments { command })
        } else {
            Ok(None)
        };
    }
    if available < N {
        return Err(SvgPathError::MissingArguments { command });
    }
    let mut values = [0.0; N];
    for (slot, token) in values.iter_mut().zip(&tokens[*i..*i + N]) {
        *slot = token
            .parse::<f64>()
            .map_err(|_| SvgPathError::InvalidNumber(token.clone()))?;
    }
    *i += N;
    Ok(Some(values))
}

/// Splits path data into command letters and number strings.
///
/// Commas and whitespace separate tokens; a sign also starts a new number
/// unless it follows an exponent marker (`1e-5`).
fn tokenize_svg_path(data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in data.chars() {
        match ch {
            c if c.is_ascii_alphabetic() && c != 'e' && c != 'E' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
            ' ' | ',' | '\n' | '\r' | '\t' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '-' | '+' => {
                if !current.is_empty() && !matches!(current.chars().last(), Some('e' | 'E')) {
                    tokens.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
