use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::structure::AtomicStructure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const DEFAULT_COMMENT: &str = "Generated by mofdock";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XyzMetadata {
    /// The free-form second line of the file.
    pub comment: String,
}

impl Default for XyzMetadata {
    fn default() -> Self {
        Self {
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count (value: '{0}')")]
    InvalidCount(String),
    #[error("Invalid {axis} coordinate (value: '{value}')")]
    InvalidCoordinate { axis: char, value: String },
    #[error("Atom line needs an element and three coordinates")]
    TooFewFields,
    #[error("File ended before the comment line")]
    MissingComment,
}

/// The plain XYZ format: an atom count, a comment line, then one
/// `Element x y z` line per atom. Extra columns after the coordinates are
/// ignored on read.
pub struct XyzFile;

impl StructureFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(AtomicStructure, Self::Metadata), Self::Error> {
        let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

        let expected = loop {
            let Some((line_num, line)) = lines.next() else {
                return Err(XyzError::Inconsistency("File contains no atom count".into()));
            };
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            break trimmed.parse::<usize>().map_err(|_| XyzError::Parse {
                line: line_num,
                kind: XyzParseErrorKind::InvalidCount(trimmed.to_string()),
            })?;
        };

        let comment = match lines.next() {
            Some((_, line)) => line?.trim_end().to_string(),
            None => {
                return Err(XyzError::Parse {
                    line: 2,
                    kind: XyzParseErrorKind::MissingComment,
                });
            }
        };

        let mut structure = AtomicStructure::new();
        for (line_num, line) in lines {
            if structure.len() == expected {
                break;
            }
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            structure.push(parse_atom_line(&line, line_num)?);
        }

        if structure.len() != expected {
            return Err(XyzError::Inconsistency(format!(
                "Header declares {} atoms but {} were found",
                expected,
                structure.len()
            )));
        }
        Ok((structure, XyzMetadata { comment }))
    }

    fn write_to(
        structure: &AtomicStructure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}", structure.len())?;
        writeln!(writer, "{}", metadata.comment.replace(['\n', '\r'], " "))?;
        for atom in structure.atoms() {
            writeln!(
                writer,
                "{:<2} {:>14.6} {:>14.6} {:>14.6}",
                atom.element, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
        Ok(())
    }
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<Atom, XyzError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::TooFewFields,
        });
    }
    let coord = |axis: char, value: &str| match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::InvalidCoordinate {
                axis,
                value: value.to_string(),
            },
        }),
    };
    let position = Point3::new(
        coord('x', fields[1])?,
        coord('y', fields[2])?,
        coord('z', fields[3])?,
    );
    Ok(Atom::new(fields[0], position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    const WATER_XYZ: &str = "3
water molecule
O    0.000000    0.000000    0.117300
H    0.000000    0.757200   -0.469200
H    0.000000   -0.757200   -0.469200
";

    fn read(content: &str) -> Result<(AtomicStructure, XyzMetadata), XyzError> {
        XyzFile::read_from(&mut Cursor::new(content.as_bytes()))
    }

    #[test]
    fn reads_valid_file() {
        let (structure, metadata) = read(WATER_XYZ).unwrap();
        assert_eq!(structure.len(), 3);
        assert_eq!(metadata.comment, "water molecule");
        assert_eq!(structure.atom(0).unwrap().element, "O");
        assert_eq!(
            structure.atom(1).unwrap().position,
            Point3::new(0.0, 0.7572, -0.4692)
        );
    }

    #[test]
    fn ignores_extra_columns_and_trailing_frames() {
        let content = "1\n\nZn 1.0 2.0 3.0 0.55\n1\nsecond frame\nZn 0 0 0\n";
        let (structure, metadata) = read(content).unwrap();
        assert_eq!(structure.len(), 1);
        assert_eq!(metadata.comment, "");
        assert_eq!(structure.atom(0).unwrap().position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn invalid_count_reports_line() {
        let err = read("three\ncomment\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::InvalidCount(_)
            }
        ));
    }

    #[test]
    fn invalid_coordinate_reports_line_and_axis() {
        let err = read("2\nc\nO 0 0 0\nH 0 abc 0\n").unwrap_err();
        match err {
            XyzError::Parse { line, kind } => {
                assert_eq!(line, 4);
                assert_eq!(
                    kind,
                    XyzParseErrorKind::InvalidCoordinate {
                        axis: 'y',
                        value: "abc".into()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        for (content, axis, value) in [
            ("1\nc\nN nan 0 0\n", 'x', "nan"),
            ("1\nc\nN 0 inf 0\n", 'y', "inf"),
            ("1\nc\nN 0 0 -infinity\n", 'z', "-infinity"),
        ] {
            match read(content).unwrap_err() {
                XyzError::Parse { line, kind } => {
                    assert_eq!(line, 3);
                    assert_eq!(
                        kind,
                        XyzParseErrorKind::InvalidCoordinate {
                            axis,
                            value: value.into()
                        }
                    );
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn short_atom_line_is_rejected() {
        let err = read("1\nc\nO 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::TooFewFields
            }
        ));
    }

    #[test]
    fn count_mismatch_is_inconsistency() {
        let err = read("4\nc\nO 0 0 0\n").unwrap_err();
        assert!(matches!(err, XyzError::Inconsistency(_)));
    }

    #[test]
    fn missing_comment_line_is_rejected() {
        let err = read("1").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                kind: XyzParseErrorKind::MissingComment,
                ..
            }
        ));
    }

    #[test]
    fn write_then_read_preserves_elements_and_positions() {
        let (structure, _) = read(WATER_XYZ).unwrap();
        let mut buffer = Vec::new();
        XyzFile::write_structure_to(&structure, &mut buffer).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("3\nGenerated by mofdock\n"));

        let (reread, _) = read(&text).unwrap();
        assert_eq!(reread, structure);
    }

    #[test]
    fn comment_newlines_are_flattened() {
        let structure =
            AtomicStructure::from_parts(&["Zn"], &[Point3::new(0.0, 0.0, 0.0)]).unwrap();
        let metadata = XyzMetadata {
            comment: "two\nlines".into(),
        };
        let mut buffer = Vec::new();
        XyzFile::write_to(&structure, &metadata, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().nth(1), Some("two lines"));
    }

    #[test]
    fn path_helpers_work_with_files() {
        let (structure, metadata) = read(WATER_XYZ).unwrap();
        let file = NamedTempFile::new().unwrap();

        XyzFile::write_to_path(&structure, &metadata, file.path()).unwrap();
        let (reread, reread_meta) = XyzFile::read_from_path(file.path()).unwrap();

        assert_eq!(reread, structure);
        assert_eq!(reread_meta, metadata);
    }

    #[test]
    fn read_from_missing_path_is_io_error() {
        let result = XyzFile::read_from_path("does/not/exist.xyz");
        assert!(matches!(result, Err(XyzError::Io(_))));
    }
}
