//! STL (Stereolithography) reading and writing.
//!
//! # Format Detection
//!
//! The leading 80 bytes are read as text:
//! - If they do not start with "solid" (case-insensitive, after leading
//!   whitespace) the data is binary.
//! - Otherwise the 4-byte count at offset 80 is checked: when the total size
//!   equals `84 + count * 50` the data is still treated as binary. An ASCII
//!   file that happens to satisfy that size is misclassified; this is accepted.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (ignored)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```

use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{LoadError, LoadResult};
use crate::math::vec3::Vec3;
use crate::triangle::Triangle;

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Header plus the little-endian triangle count.
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;

/// Encoding of an STL payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    Binary,
    Ascii,
}

impl std::fmt::Display for StlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StlFormat::Binary => write!(f, "binary"),
            StlFormat::Ascii => write!(f, "ascii"),
        }
    }
}

/// Classifies a complete STL payload as binary or ASCII.
pub fn detect_format(data: &[u8]) -> StlFormat {
    let lead = String::from_utf8_lossy(&data[..data.len().min(HEADER_SIZE)]);
    let starts_with_solid = lead
        .trim_start()
        .as_bytes()
        .get(..5)
        .is_some_and(|word| word.eq_ignore_ascii_case(b"solid"));

    if !starts_with_solid {
        return StlFormat::Binary;
    }

    if data.len() < PREAMBLE_SIZE {
        return StlFormat::Ascii;
    }

    let count = read_u32(data, HEADER_SIZE);
    let expected = PREAMBLE_SIZE as u64 + u64::from(count) * TRIANGLE_SIZE as u64;
    if data.len() as u64 == expected {
        StlFormat::Binary
    } else {
        StlFormat::Ascii
    }
}

/// Reads and parses an STL file from disk.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, or any parse error
/// from [`parse`].
pub fn read_triangles<P: AsRef<Path>>(path: P) -> LoadResult<Vec<Triangle>> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let triangles = parse(&data)?;
    info!(
        path = %path.display(),
        bytes = data.len(),
        triangles = triangles.len(),
        "Loaded STL"
    );
    Ok(triangles)
}

/// Parses an in-memory STL payload, detecting its format first.
///
/// The buffer length plays the role of the file size during detection.
pub fn parse(data: &[u8]) -> LoadResult<Vec<Triangle>> {
    let format = detect_format(data);
    debug!(%format, bytes = data.len(), "Detected STL format");

    match format {
        StlFormat::Binary => parse_binary(data),
        StlFormat::Ascii => {
            let text = std::str::from_utf8(data).map_err(|e| {
                let line = data[..e.valid_up_to()]
                    .iter()
                    .filter(|&&b| b == b'\n')
                    .count()
                    + 1;
                LoadError::format(line, "ASCII STL is not valid UTF-8")
            })?;
            parse_ascii(text)
        }
    }
}

/// Parses a binary STL payload.
///
/// Exactly the declared number of triangles must follow the preamble.
pub fn parse_binary(data: &[u8]) -> LoadResult<Vec<Triangle>> {
    if data.len() < PREAMBLE_SIZE {
        return Err(LoadError::TruncatedHeader {
            expected: PREAMBLE_SIZE,
            got: data.len(),
        });
    }

    let declared = read_u32(data, HEADER_SIZE);
    let body = &data[PREAMBLE_SIZE..];
    let needed = u64::from(declared) * TRIANGLE_SIZE as u64;
    let available = body.len() as u64;

    if available < needed {
        return Err(LoadError::Truncated {
            expected: declared,
            // Fewer than `declared` whole triangles, so this fits in u32.
            found: (available / TRIANGLE_SIZE as u64) as u32,
        });
    }
    if available > needed {
        return Err(LoadError::TriangleCountMismatch {
            declared,
            actual_bytes: available,
        });
    }

    let triangles = body
        .chunks_exact(TRIANGLE_SIZE)
        .map(|record| {
            Triangle::new(
                read_vec3(&record[0..12]),
                [
                    read_vec3(&record[12..24]),
                    read_vec3(&record[24..36]),
                    read_vec3(&record[36..48]),
                ],
            )
        })
        .collect();

    Ok(triangles)
}

/// Parses an ASCII STL document line by line.
pub fn parse_ascii(text: &str) -> LoadResult<Vec<Triangle>> {
    struct OpenFacet {
        normal: Vec3,
        vertices: Vec<Vec3>,
    }

    let mut triangles = Vec::new();
    let mut open: Option<OpenFacet> = None;
    let mut last_line = 0;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        last_line = line;

        let mut tokens = raw.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "solid" | "endsolid" | "outer" | "endloop" => {}
            "facet" => {
                if open.is_some() {
                    return Err(LoadError::format(line, "facet opened before `endfacet`"));
                }
                if !tokens
                    .next()
                    .is_some_and(|word| word.eq_ignore_ascii_case("normal"))
                {
                    return Err(LoadError::format(line, "expected `facet normal`"));
                }
                open = Some(OpenFacet {
                    normal: parse_coordinates(&mut tokens, line)?,
                    vertices: Vec::with_capacity(3),
                });
            }
            "vertex" => {
                let facet = open
                    .as_mut()
                    .ok_or_else(|| LoadError::format(line, "vertex outside of a facet"))?;
                if facet.vertices.len() == 3 {
                    return Err(LoadError::format(line, "facet has more than three vertices"));
                }
                facet.vertices.push(parse_coordinates(&mut tokens, line)?);
            }
            "endfacet" => {
                let facet = open
                    .take()
                    .ok_or_else(|| LoadError::format(line, "`endfacet` without a facet"))?;
                let vertices: [Vec3; 3] = facet.vertices.try_into().map_err(|v: Vec<Vec3>| {
                    LoadError::format(line, format!("facet has {} vertices, expected 3", v.len()))
                })?;
                triangles.push(Triangle::new(facet.normal, vertices));
            }
            other => {
                return Err(LoadError::format(
                    line,
                    format!("unexpected keyword `{other}`"),
                ));
            }
        }
    }

    if open.is_some() {
        return Err(LoadError::format(last_line, "unterminated facet"));
    }

    Ok(triangles)
}

/// Writes triangles as binary STL.
///
/// The header is space padded and never begins with "solid".
pub fn write_binary<W: Write>(mut writer: W, triangles: &[Triangle]) -> io::Result<()> {
    let mut header = [b' '; HEADER_SIZE];
    let text = b"binary STL written by wirestl";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;

    let count = u32::try_from(triangles.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "binary STL holds at most u32::MAX triangles",
        )
    })?;
    writer.write_all(&count.to_le_bytes())?;

    for triangle in triangles {
        write_vec3(&mut writer, triangle.normal)?;
        for &vertex in &triangle.vertices {
            write_vec3(&mut writer, vertex)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    writer.flush()
}

/// Writes triangles as ASCII STL.
///
/// Coordinates use the shortest representation that parses back to the
/// same `f32`.
pub fn write_ascii<W: Write>(mut writer: W, name: &str, triangles: &[Triangle]) -> io::Result<()> {
    writeln!(writer, "solid {name}")?;
    for triangle in triangles {
        let n = triangle.normal;
        writeln!(writer, "  facet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in &triangle.vertices {
            writeln!(writer, "      vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {name}")?;
    writer.flush()
}

fn parse_coordinates<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
) -> LoadResult<Vec3> {
    let mut next = || -> LoadResult<f32> {
        let token = tokens
            .next()
            .ok_or_else(|| LoadError::format(line, "expected three coordinates"))?;
        token
            .parse::<f32>()
            .map_err(|e| LoadError::format(line, format!("invalid number `{token}`: {e}")))
    };
    let x = next()?;
    let y = next()?;
    let z = next()?;
    Ok(Vec3::new(x, y, z))
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Read a vector from 12 bytes (3 little-endian f32s).
fn read_vec3(buf: &[u8]) -> Vec3 {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vec3::new(x, y, z)
}

fn write_vec3<W: Write>(writer: &mut W, v: Vec3) -> io::Result<()> {
    writer.write_all(&v.x.to_le_bytes())?;
    writer.write_all(&v.y.to_le_bytes())?;
    writer.write_all(&v.z.to_le_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 1.0),
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
        )
    }

    fn binary_bytes(triangles: &[Triangle]) -> Vec<u8> {
        let mut data = Vec::new();
        write_binary(&mut data, triangles).unwrap();
        data
    }

    #[test]
    fn parse_empty_binary() {
        let mut data = vec![0u8; PREAMBLE_SIZE];
        data[80..84].copy_from_slice(&0u32.to_le_bytes());

        let triangles = parse(&data).unwrap();
        assert!(triangles.is_empty());
    }

    #[test]
    fn binary_layout() {
        let data = binary_bytes(&[unit_triangle(), unit_triangle()]);
        assert_eq!(data.len(), PREAMBLE_SIZE + 2 * TRIANGLE_SIZE);
        assert_eq!(detect_format(&data), StlFormat::Binary);

        let triangles = parse(&data).unwrap();
        assert_eq!(triangles, vec![unit_triangle(), unit_triangle()]);
    }

    #[test]
    fn solid_header_with_matching_size_is_binary() {
        let mut data = binary_bytes(&[unit_triangle()]);
        data[..5].copy_from_slice(b"solid");

        assert_eq!(detect_format(&data), StlFormat::Binary);
        assert_eq!(parse(&data).unwrap(), vec![unit_triangle()]);
    }

    #[test]
    fn solid_prefix_is_case_insensitive_and_trimmed() {
        assert_eq!(detect_format(b"  SoLiD cube\nendsolid"), StlFormat::Ascii);
        assert_eq!(detect_format(b"soli"), StlFormat::Binary);
    }

    #[test]
    fn truncated_binary_is_io_error() {
        let mut data = binary_bytes(&[unit_triangle(), unit_triangle()]);
        data.truncate(data.len() - 10);

        let err = parse(&data).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Truncated {
                expected: 2,
                found: 1
            }
        ));
        assert_eq!(err.kind(), LoadErrorKind::Io);
    }

    #[test]
    fn short_binary_preamble_is_io_error() {
        let err = parse(&[0u8; 40]).unwrap_err();
        assert!(matches!(err, LoadError::TruncatedHeader { got: 40, .. }));
        assert_eq!(err.kind(), LoadErrorKind::Io);
    }

    #[test]
    fn trailing_binary_bytes_are_format_error() {
        let mut data = binary_bytes(&[unit_triangle()]);
        data.extend_from_slice(&[0u8; 7]);

        let err = parse(&data).unwrap_err();
        assert!(matches!(
            err,
            LoadError::TriangleCountMismatch { declared: 1, .. }
        ));
        assert_eq!(err.kind(), LoadErrorKind::Format);
    }

    #[test]
    fn ascii_stl_parsing() {
        let ascii_stl = b"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test
";
        assert_eq!(detect_format(ascii_stl), StlFormat::Ascii);
        assert_eq!(parse(ascii_stl).unwrap(), vec![unit_triangle()]);
    }

    #[test]
    fn ascii_accepts_scientific_notation() {
        let text = "solid s\nfacet normal 0 0 1.0e0\nouter loop\nvertex 1e-3 -2.5E+1 0\nvertex 0 0 0\nvertex 1 1 1\nendloop\nendfacet\nendsolid s\n";
        let triangles = parse_ascii(text).unwrap();
        assert_eq!(triangles[0].vertices[0], Vec3::new(0.001, -25.0, 0.0));
    }

    #[test]
    fn ascii_bad_number_is_format_error() {
        let text = "solid s\nfacet normal 0 0 1\nouter loop\nvertex 0 zero 0\n";
        let err = parse_ascii(text).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Format);
        assert!(matches!(err, LoadError::Format { line: 4, .. }));
    }

    #[test]
    fn ascii_unknown_keyword_is_format_error() {
        let text = "solid s\nfacet normal 0 0 1\nouter loop\nvertx 0 0 0\n";
        assert!(matches!(
            parse_ascii(text),
            Err(LoadError::Format { line: 4, .. })
        ));
    }

    #[test]
    fn ascii_facet_needs_three_vertices() {
        let text = "solid s\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nendloop\nendfacet\n";
        assert!(matches!(
            parse_ascii(text),
            Err(LoadError::Format { line: 7, .. })
        ));
    }

    #[test]
    fn ascii_unterminated_facet() {
        let text = "solid s\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\n";
        assert!(matches!(parse_ascii(text), Err(LoadError::Format { .. })));
    }

    #[test]
    fn ascii_invalid_utf8_is_format_error() {
        let mut data = b"solid s\nfacet normal 0 0 1\n".to_vec();
        data.push(0xFF);
        let err = parse(&data).unwrap_err();
        assert!(matches!(err, LoadError::Format { line: 3, .. }));
    }

    #[test]
    fn ascii_writer_round_trips_exactly() {
        let triangle = Triangle::new(
            Vec3::new(0.1, 0.2, 0.3),
            [
                Vec3::new(1.0 / 3.0, -7.25, 1e-7),
                Vec3::new(123456.79, 0.0, -0.0),
                Vec3::new(f32::MIN_POSITIVE, 2.5, 9.0),
            ],
        );
        let mut text = Vec::new();
        write_ascii(&mut text, "exact", &[triangle]).unwrap();

        assert_eq!(detect_format(&text), StlFormat::Ascii);
        assert_eq!(parse(&text).unwrap(), vec![triangle]);
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let err = read_triangles("nonexistent_file_12345.stl").unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Io);
        if let LoadError::Io { path, .. } = err {
            assert!(path.to_string_lossy().contains("nonexistent"));
        }
    }
}
