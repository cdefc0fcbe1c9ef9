//! Reading and writing point tables.
//!
//! The format is comma separated text with one point per row and a header row naming
//! the columns `x,y,z`. Values are written with full round-trip precision.

use crate::{Error, Point3, Result};

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const HEADERS: [&str; 3] = ["x", "y", "z"];

pub fn read_xyz(path: impl AsRef<Path>) -> Result<Vec<Point3>> {
    let file = File::open(path)?;
    read_points(BufReader::new(file))
}

pub fn write_xyz(path: impl AsRef<Path>, points: &[Point3]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_points(&mut writer, points)?;
    writer.flush()?;
    Ok(())
}

/// Parse points from a reader, the `x,y,z` header row is optional
pub fn read_points(reader: impl BufRead) -> Result<Vec<Point3>> {
    let mut points = vec![];

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = i + 1;

        let fields = line.split(',').map(str::trim).collect::<Vec<_>>();
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        if fields.len() != HEADERS.len() {
            return Err(Error::ParseError {
                line: line_number,
                reason: format!("expected 3 columns, found {}", fields.len()),
            });
        }

        if points.is_empty() && is_header(&fields) {
            continue;
        }

        let mut coords = [0.; 3];
        for (coord, field) in coords.iter_mut().zip(&fields) {
            *coord = field.parse().map_err(|_| Error::ParseError {
                line: line_number,
                reason: format!("'{field}' is not a number"),
            })?;
        }
        points.push(coords.into());
    }
    Ok(points)
}

pub fn write_points(writer: &mut impl Write, points: &[Point3]) -> Result<()> {
    writeln!(writer, "{}", HEADERS.join(","))?;
    for p in points {
        writeln!(writer, "{},{},{}", p.x, p.y, p.z)?;
    }
    Ok(())
}

fn is_header(fields: &[&str]) -> bool {
    fields
        .iter()
        .zip(HEADERS)
        .all(|(field, header)| field.eq_ignore_ascii_case(header))
}
