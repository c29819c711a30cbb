use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use facewarp_geometry::{Point2d, PointSet, Triangulation};

use crate::error::IoError;

/// Read a landmark file and return its points in file order.
///
/// The file holds one point per line as two whitespace separated numbers `x y`.
/// Blank lines are ignored.
///
/// # Arguments
///
/// * `path` - The path to the landmark file.
///
/// # Errors
///
/// If the file cannot be read or a line is not a valid point. The error names
/// the offending line.
pub fn read_points(path: impl AsRef<Path>) -> Result<PointSet, IoError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileDoesNotExist(path.to_path_buf()));
    }

    // open the file and create a buffered reader
    let reader = BufReader::new(File::open(path)?);

    let points = reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(parse_point_line(&line, i + 1)),
            Err(e) => Some(Err(IoError::from(e))),
        })
        .collect::<Result<PointSet, _>>()?;

    log::debug!("read {} points from {}", points.len(), path.display());

    Ok(points)
}

/// Write the points to a landmark file, one `x y` pair per line.
///
/// # Arguments
///
/// * `path` - The path to the landmark file.
/// * `points` - The points to write.
pub fn write_points(path: impl AsRef<Path>, points: &PointSet) -> Result<(), IoError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for p in points {
        writeln!(writer, "{} {}", p.x, p.y)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a triangulation file.
///
/// The file holds one triangle per line as three whitespace separated point
/// indices. Blank lines are ignored. The indices are not checked against any
/// point set, see [`Triangulation::validate`].
///
/// # Arguments
///
/// * `path` - The path to the triangulation file.
pub fn read_triangulation(path: impl AsRef<Path>) -> Result<Triangulation, IoError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileDoesNotExist(path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(path)?);

    let triangles = reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(parse_triangle_line(&line, i + 1)),
            Err(e) => Some(Err(IoError::from(e))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("read {} triangles from {}", triangles.len(), path.display());

    Ok(Triangulation::new(triangles))
}

/// Read a triangulation file and check it against a point set of `num_points` points.
pub fn read_triangulation_checked(
    path: impl AsRef<Path>,
    num_points: usize,
) -> Result<Triangulation, IoError> {
    let triangulation = read_triangulation(path)?;
    triangulation.validate(num_points)?;
    Ok(triangulation)
}

/// Write a triangulation file, one index triple per line.
pub fn write_triangulation(
    path: impl AsRef<Path>,
    triangulation: &Triangulation,
) -> Result<(), IoError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for [a, b, c] in triangulation {
        writeln!(writer, "{a} {b} {c}")?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_point_line(line: &str, line_number: usize) -> Result<Point2d, IoError> {
    let values = parse_fields::<f32>(line, line_number, 2)?;
    Ok(Point2d::new(values[0], values[1]))
}

fn parse_triangle_line(line: &str, line_number: usize) -> Result<[usize; 3], IoError> {
    let values = parse_fields::<usize>(line, line_number, 3)?;
    Ok([values[0], values[1], values[2]])
}

fn parse_fields<T: std::str::FromStr>(
    line: &str,
    line_number: usize,
    expected: usize,
) -> Result<Vec<T>, IoError> {
    let parse_error = |message: String| IoError::ParseError {
        line: line_number,
        message,
    };

    let fields = line.split_whitespace().collect::<Vec<_>>();
    if fields.len() != expected {
        return Err(parse_error(format!(
            "expected {expected} values, found {}",
            fields.len()
        )));
    }

    fields
        .iter()
        .map(|field| {
            field
                .parse::<T>()
                .map_err(|_| parse_error(format!("invalid value '{field}'")))
        })
        .collect()
}
