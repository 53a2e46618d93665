//! Minimal OBJ position I/O.
//!
//! Only `v x y z [w]` lines are read; normals, texture coordinates, faces
//! and everything else are skipped.

use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use vertex_codec_core::Point3;

/// Reads vertex positions from an OBJ file.
pub fn read_obj_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Point3>> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|err| {
        io::Error::new(err.kind(), format!("{}: {}", path.display(), err))
    })?;
    read_obj_positions(BufReader::new(file))
}

/// Reads vertex positions from OBJ text.
///
/// A `v` line with fewer than three numeric coordinates is an
/// `InvalidData` error naming the line.
pub fn read_obj_positions<R: BufRead>(reader: R) -> io::Result<Vec<Point3>> {
    let mut positions = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let mut parts = line.split_whitespace();
        if parts.next() != Some("v") {
            continue;
        }

        let mut coords = [0.0f32; 3];
        for coord in coords.iter_mut() {
            *coord = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid_line(index + 1, &line))?;
        }
        positions.push(Point3::from(coords));
    }

    Ok(positions)
}

fn invalid_line(number: usize, line: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("line {}: expected `v x y z`, found `{}`", number, line.trim()),
    )
}

/// Writes one `v x y z` line per point.
pub fn write_obj_positions<W: Write>(writer: W, points: &[Point3]) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for p in points {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    writer.flush()
}
