//! ASCII and binary STL files.

use crate::math::{Point, Real, Vector};
use crate::shape::Facet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Errors that can occur when reading an STL file.
#[derive(thiserror::Error, Debug)]
pub enum StlError {
    /// The file couldn’t be read or written.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The ASCII content is malformed.
    #[error("line {line}: {message}")]
    Parse {
        /// The 1-based line of the error.
        line: usize,
        /// What went wrong.
        message: String,
    },
    /// The binary facet count doesn’t match the file size.
    #[error("truncated binary STL: the header announces {expected} facets, found data for {found}")]
    Truncated {
        /// The facet count of the header.
        expected: usize,
        /// The number of complete facets actually present.
        found: usize,
    },
    /// The file contains no facet.
    #[error("the STL file has no facets")]
    Empty,
}

/// Metadata that can be stored into the 16-bit attribute of a binary STL facet.
pub trait StlAttribute {
    /// The attribute word written for this metadata.
    fn attribute(&self) -> u16;
}

impl StlAttribute for u16 {
    fn attribute(&self) -> u16 {
        *self
    }
}

impl StlAttribute for () {
    fn attribute(&self) -> u16 {
        0
    }
}

/// Reads the facets of an ASCII or binary STL file.
///
/// Binary facets keep their attribute word as metadata, ASCII facets get `0`.
pub fn read_stl(path: impl AsRef<Path>) -> Result<Vec<Facet<u16>>, StlError> {
    let path = path.as_ref();
    let facets = read_stl_from(File::open(path)?)?;
    log::debug!("read {} facets from {}", facets.len(), path.display());
    Ok(facets)
}

/// Reads the facets of an ASCII or binary STL stream.
///
/// The content is binary if its size is exactly `84 + 50 × count`, where `count` is the
/// little-endian facet count following the 80-byte header. Otherwise it must be ASCII,
/// starting with `solid`.
pub fn read_stl_from(mut reader: impl Read) -> Result<Vec<Facet<u16>>, StlError> {
    let mut bytes = Vec::new();
    let _ = reader.read_to_end(&mut bytes)?;

    let facets = if let Some(count) = binary_facet_count(&bytes) {
        parse_binary(&bytes, count)?
    } else if is_ascii_solid(&bytes) {
        let text = std::str::from_utf8(&bytes).map_err(|e| StlError::Parse {
            line: line_of_offset(&bytes, e.valid_up_to()),
            message: "invalid UTF-8".to_string(),
        })?;
        parse_ascii(text)?
    } else if bytes.len() >= HEADER_LEN + 4 {
        let count = header_count(&bytes);
        return Err(StlError::Truncated {
            expected: count,
            found: (bytes.len() - HEADER_LEN - 4) / FACET_LEN,
        });
    } else {
        return Err(StlError::Parse {
            line: 1,
            message: "neither a binary STL nor an ASCII STL starting with `solid`".to_string(),
        });
    };

    if facets.is_empty() {
        return Err(StlError::Empty);
    }

    Ok(facets)
}

fn header_count(bytes: &[u8]) -> usize {
    let mut count = [0; 4];
    count.copy_from_slice(&bytes[HEADER_LEN..HEADER_LEN + 4]);
    u32::from_le_bytes(count) as usize
}

fn binary_facet_count(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < HEADER_LEN + 4 {
        return None;
    }

    let count = header_count(bytes);
    let expected_len = count
        .checked_mul(FACET_LEN)
        .and_then(|len| len.checked_add(HEADER_LEN + 4))?;
    (expected_len == bytes.len()).then_some(count)
}

fn is_ascii_solid(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(b"solid")
}

fn line_of_offset(bytes: &[u8], offset: usize) -> usize {
    bytes[..offset].iter().filter(|b| **b == b'\n').count() + 1
}

fn parse_binary(bytes: &[u8], count: usize) -> Result<Vec<Facet<u16>>, StlError> {
    let mut facets = Vec::with_capacity(count);
    let read_f32 = |chunk: &[u8], i: usize| {
        let mut word = [0; 4];
        word.copy_from_slice(&chunk[i * 4..i * 4 + 4]);
        f32::from_le_bytes(word) as Real
    };

    for chunk in bytes[HEADER_LEN + 4..].chunks_exact(FACET_LEN) {
        let normal = Vector::new(read_f32(chunk, 0), read_f32(chunk, 1), read_f32(chunk, 2));
        let vertex = |k: usize| {
            Point::new(
                read_f32(chunk, 3 + k * 3),
                read_f32(chunk, 4 + k * 3),
                read_f32(chunk, 5 + k * 3),
            )
        };
        let attribute = u16::from_le_bytes([chunk[48], chunk[49]]);
        facets.push(Facet::with_normal(
            [vertex(0), vertex(1), vertex(2)],
            normal,
            attribute,
        ));
    }

    Ok(facets)
}

fn parse_ascii(text: &str) -> Result<Vec<Facet<u16>>, StlError> {
    let mut facets = Vec::new();
    let mut normal = None;
    let mut vertices = Vec::with_capacity(3);

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let error = |message: String| StlError::Parse {
            line: line_no,
            message,
        };
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            continue;
        };

        match keyword {
            "solid" | "endsolid" => {
                if normal.is_some() {
                    return Err(error(format!("unexpected `{}` inside a facet", keyword)));
                }
            }
            "facet" => {
                if normal.is_some() {
                    return Err(error("nested `facet`".to_string()));
                }
                if words.next() != Some("normal") {
                    return Err(error("expected `facet normal`".to_string()));
                }
                let [x, y, z] = parse_coords(&mut words).map_err(error)?;
                normal = Some(Vector::new(x, y, z));
            }
            "outer" => {
                if words.next() != Some("loop") {
                    return Err(error("expected `outer loop`".to_string()));
                }
            }
            "vertex" => {
                if normal.is_none() || vertices.len() == 3 {
                    return Err(error("unexpected `vertex`".to_string()));
                }
                let [x, y, z] = parse_coords(&mut words).map_err(error)?;
                vertices.push(Point::new(x, y, z));
            }
            "endloop" => {}
            "endfacet" => {
                let Some(facet_normal) = normal.take() else {
                    return Err(error("`endfacet` without `facet`".to_string()));
                };
                if vertices.len() != 3 {
                    return Err(error(format!(
                        "a facet needs 3 vertices, found {}",
                        vertices.len()
                    )));
                }
                facets.push(Facet::with_normal(
                    [vertices[0], vertices[1], vertices[2]],
                    facet_normal,
                    0,
                ));
                vertices.clear();
            }
            other => return Err(error(format!("unexpected keyword `{}`", other))),
        }
    }

    if normal.is_some() {
        return Err(StlError::Parse {
            line: text.lines().count(),
            message: "unterminated facet".to_string(),
        });
    }

    Ok(facets)
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<[Real; 3], String> {
    let mut coords = [0.0; 3];
    for coord in &mut coords {
        let word = words.next().ok_or("expected 3 coordinates")?;
        *coord = word
            .parse()
            .map_err(|_| format!("invalid number `{}`", word))?;
    }
    Ok(coords)
}

/// Writes `facets` as an ASCII STL solid named `name`.
pub fn write_ascii_stl_to<M>(
    mut writer: impl Write,
    name: &str,
    facets: &[Facet<M>],
) -> io::Result<()> {
    writeln!(writer, "solid {}", name)?;
    for facet in facets {
        let n = &facet.normal;
        writeln!(writer, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in &facet.vertices {
            writeln!(writer, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {}", name)?;
    writer.flush()
}

/// Writes `facets` as a binary STL, with `header` truncated to 80 bytes.
///
/// Coordinates are stored in single precision. The metadata of each facet is stored
/// into its attribute word.
pub fn write_binary_stl_to<M: StlAttribute>(
    mut writer: impl Write,
    header: &str,
    facets: &[Facet<M>],
) -> io::Result<()> {
    let count = u32::try_from(facets.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "too many facets for a binary STL",
        )
    })?;

    let mut header_bytes = [0u8; HEADER_LEN];
    let len = header.len().min(HEADER_LEN);
    header_bytes[..len].copy_from_slice(&header.as_bytes()[..len]);
    writer.write_all(&header_bytes)?;
    writer.write_all(&count.to_le_bytes())?;

    let mut record = [0u8; FACET_LEN];
    for facet in facets {
        let coords = facet
            .normal
            .iter()
            .chain(facet.vertices.iter().flat_map(|v| v.coords.iter()));
        for (word, coord) in record.chunks_exact_mut(4).zip(coords) {
            word.copy_from_slice(&(*coord as f32).to_le_bytes());
        }
        record[48..].copy_from_slice(&facet.metadata.attribute().to_le_bytes());
        writer.write_all(&record)?;
    }

    writer.flush()
}

/// Writes `facets` to the ASCII STL file at `path`.
///
/// The file is written next to `path` under a temporary name, then renamed, so `path` is
/// left untouched if writing fails.
pub fn write_ascii_stl<M>(path: impl AsRef<Path>, name: &str, facets: &[Facet<M>]) -> io::Result<()> {
    write_atomically(path.as_ref(), facets.len(), |file| {
        write_ascii_stl_to(BufWriter::new(file), name, facets)
    })
}

/// Writes `facets` to the binary STL file at `path`.
///
/// Same as [`write_ascii_stl`] regarding the temporary file.
pub fn write_binary_stl<M: StlAttribute>(
    path: impl AsRef<Path>,
    header: &str,
    facets: &[Facet<M>],
) -> io::Result<()> {
    write_atomically(path.as_ref(), facets.len(), |file| {
        write_binary_stl_to(BufWriter::new(file), header, facets)
    })
}

fn temp_sibling(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a file path", path.display()),
        )
    })?;
    let mut temp_name = OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

fn write_atomically(
    path: &Path,
    num_facets: usize,
    write: impl FnOnce(&mut File) -> io::Result<()>,
) -> io::Result<()> {
    let temp_path = temp_sibling(path)?;
    let mut file = File::create(&temp_path)?;

    let result = write(&mut file)
        .and_then(|()| file.sync_all())
        .and_then(|()| fs::rename(&temp_path, path));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        log::debug!("wrote {} facets to {}", num_facets, path.display());
    }

    result
}
