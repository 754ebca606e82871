/// Wavefront OBJ subset parser
///
/// Only `v x y z` and `f i[/t[/n]] ...` lines are read; every other line is
/// skipped. Face indices are 1-based in the file and 0-based in the result.
/// Texture and normal references are discarded.
use nom::{
    bytes::complete::tag,
    character::complete::{char, digit0, i64 as integer, space0, space1},
    combinator::{all_consuming, opt},
    multi::many1,
    number::complete::double,
    sequence::{preceded, terminated, tuple},
    IResult,
};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::error::ObjError;
use crate::geometry::MeshData;
use crate::vector::Vec3;

/// Read and parse a geometry file
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, ObjError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ObjError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ObjError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mesh = parse_obj(&text)?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "loaded geometry"
    );
    Ok(mesh)
}

/// Parse OBJ text into vertex and face lists
///
/// Fails on the first malformed `v` or `f` line. Indices are not checked
/// against the vertex count here; see [`crate::model::Model::new`].
pub fn parse_obj(input: &str) -> Result<MeshData, ObjError> {
    let mut mesh = MeshData::new();

    for (number, line) in input.lines().enumerate() {
        let number = number + 1;
        let line = line.trim();

        if line.starts_with("v ") {
            let (_, (x, y, z)) = all_consuming(parse_vertex)(line)
                .map_err(|_| ObjError::parse(number, format!("invalid vertex `{line}`")))?;
            mesh.add_vertex(Vec3::new(x, y, z));
        } else if line.starts_with("f ") {
            let (_, indices) = all_consuming(parse_face)(line)
                .map_err(|_| ObjError::parse(number, format!("invalid face `{line}`")))?;
            let face = indices
                .into_iter()
                .map(|index| match usize::try_from(index) {
                    Ok(i) if i >= 1 => Ok(i - 1),
                    _ => Err(ObjError::FaceIndex {
                        line: number,
                        index,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            mesh.add_face(face);
        }
    }

    Ok(mesh)
}

fn parse_vertex(input: &str) -> IResult<&str, (f64, f64, f64)> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(space1, double)(input)?;
    let (input, y) = preceded(space1, double)(input)?;
    let (input, z) = preceded(space1, double)(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (x, y, z)))
}

fn parse_face(input: &str) -> IResult<&str, Vec<i64>> {
    let (input, _) = tag("f")(input)?;
    terminated(many1(preceded(space1, parse_face_vertex)), space0)(input)
}

/// `i`, `i/t`, `i//n` or `i/t/n`; only `i` is kept.
fn parse_face_vertex(input: &str) -> IResult<&str, i64> {
    let (input, (index, _)) = tuple((
        integer,
        opt(preceded(char('/'), tuple((digit0, opt(preceded(char('/'), digit0)))))),
    ))(input)?;
    Ok((input, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_triangle() {
        let mesh = parse_obj("v 1.0 2.0 3.0\nv 0 0 1\nv 1 0 1\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertices[0], Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_texture_and_normal_references_are_dropped() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1/1 2/2/2 3//3 4\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.faces, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_other_lines_are_ignored() {
        let text = "# cube\no thing\nvn 0 0 1\nvt 0.5 0.5\n  v -1 2.5e-1 3  \ns off\nusemtl red\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertices, vec![Vec3::new(-1.0, 0.25, 3.0)]);
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_indices_past_vertex_count_are_kept() {
        let mesh = parse_obj("v 1.0 2.0 3.0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertices, vec![Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
        assert_eq!(mesh.find_invalid_index(), Some((0, 1)));
    }

    #[test]
    fn test_malformed_vertex_reports_line() {
        let err = parse_obj("v 0 0 0\nv 1.0 abc 2.0\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 2, .. }));

        let err = parse_obj("v 1 2\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 1, .. }));

        let err = parse_obj("v 1 2 3 4\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_malformed_face() {
        let err = parse_obj("v 0 0 0\nf 1 x\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_non_positive_face_index() {
        let err = parse_obj("v 0 0 0\nf 0 1\n").unwrap_err();
        assert!(matches!(err, ObjError::FaceIndex { line: 2, index: 0 }));

        let err = parse_obj("f 1 -1\n").unwrap_err();
        assert!(matches!(err, ObjError::FaceIndex { line: 1, index: -1 }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_obj("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, ObjError::FileNotFound { .. }));
    }
}
