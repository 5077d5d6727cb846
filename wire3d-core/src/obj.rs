/// Wavefront OBJ ingestion: `v` and `f` records only
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use nom::{
    bytes::complete::tag,
    character::complete::{char, digit1, one_of, space0, space1},
    combinator::{eof, map, opt, recognize},
    multi::{many0, separated_list1},
    number::complete::float,
    sequence::{pair, preceded},
    IResult,
};

use crate::error::{IntegrityError, ObjError};
use crate::geometry::{Face, FaceList, Mesh, Vertex, VertexList};

/// Which kind of record a line holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Vertex,
    Face,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Vertex => f.write_str("vertex"),
            RecordKind::Face => f.write_str("face"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningReason {
    Malformed,
    NonFinite,
    TooFewReferences(usize),
}

/// A line that was skipped during parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number
    pub line: usize,
    pub kind: RecordKind,
    pub reason: WarningReason,
    pub text: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match self.reason {
            WarningReason::Malformed => write!(f, "malformed {} record", self.kind)?,
            WarningReason::NonFinite => write!(f, "non-finite {} coordinate", self.kind)?,
            WarningReason::TooFewReferences(n) => {
                write!(f, "{} record has {} vertex references, need at least 3", self.kind, n)?
            }
        }
        write!(f, " `{}`", self.text)
    }
}

/// Vertices and polygon faces read from a mesh description
#[derive(Debug, Clone, Default)]
pub struct ObjModel {
    pub vertices: VertexList,
    pub faces: FaceList,
}

impl ObjModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fan-triangulate every face into a mesh of resolved triangles
    pub fn to_mesh(&self) -> Result<Mesh, IntegrityError> {
        Mesh::resolve(&self.vertices, &self.faces)
    }
}

/// Parsed model plus every line that had to be skipped
#[derive(Debug, Clone, Default)]
pub struct ParsedObj {
    pub model: ObjModel,
    pub warnings: Vec<ParseWarning>,
}

/// Incremental line-by-line parser.
///
/// Malformed lines are recorded as warnings and skipped, so the model built
/// so far always stays usable.
#[derive(Debug, Default)]
pub struct ObjParser {
    parsed: ParsedObj,
    line: usize,
}

impl ObjParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model built from the lines fed so far
    pub fn model(&self) -> &ObjModel {
        &self.parsed.model
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.parsed.warnings
    }

    pub fn feed_line(&mut self, line: &str) {
        self.line += 1;
        let line = line.trim_end_matches(['\r', '\n']);

        let Some(kind) = record_kind(line) else {
            return;
        };

        let result = match kind {
            RecordKind::Vertex => self.push_vertex(line),
            RecordKind::Face => self.push_face(line),
        };

        if let Err(reason) = result {
            self.skip(kind, reason, line);
        }
    }

    /// Feed one raw line. Invalid UTF-8 is only a problem on `v` and `f`
    /// records, which are then skipped as malformed; other lines are ignored.
    pub fn feed_bytes(&mut self, bytes: &[u8]) {
        match std::str::from_utf8(bytes) {
            Ok(line) => self.feed_line(line),
            Err(_) => {
                self.line += 1;
                let text = String::from_utf8_lossy(bytes);
                let text = text.trim_end_matches(['\r', '\n']);
                if let Some(kind) = record_kind(text) {
                    self.skip(kind, WarningReason::Malformed, text);
                }
            }
        }
    }

    fn skip(&mut self, kind: RecordKind, reason: WarningReason, text: &str) {
        let warning = ParseWarning {
            line: self.line,
            kind,
            reason,
            text: text.to_string(),
        };
        warn!("skipping {}", warning);
        self.parsed.warnings.push(warning);
    }

    fn push_vertex(&mut self, line: &str) -> Result<(), WarningReason> {
        let (_, (x, y, z)) = vertex_record(line).map_err(|_| WarningReason::Malformed)?;
        if ![x, y, z].iter().all(|c| c.is_finite()) {
            return Err(WarningReason::NonFinite);
        }
        debug!("vertex {}: ({}, {}, {})", self.parsed.model.vertices.len(), x, y, z);
        self.parsed.model.vertices.push(Vertex::new(x, y, z));
        Ok(())
    }

    fn push_face(&mut self, line: &str) -> Result<(), WarningReason> {
        let (_, references) = face_record(line).map_err(|_| WarningReason::Malformed)?;
        let count = references.len();
        // OBJ references are 1-based
        let indices = references.into_iter().map(|r| r.saturating_sub(1)).collect();
        let face = Face::new(indices).ok_or(WarningReason::TooFewReferences(count))?;
        debug!("face {}: {:?}", self.parsed.model.faces.len(), face.indices());
        self.parsed.model.faces.push(face);
        Ok(())
    }

    pub fn finish(self) -> ParsedObj {
        self.parsed
    }
}

fn record_kind(line: &str) -> Option<RecordKind> {
    let mut chars = line.chars();
    let kind = match chars.next()? {
        'v' => RecordKind::Vertex,
        'f' => RecordKind::Face,
        _ => return None,
    };
    matches!(chars.next(), Some(' ' | '\t')).then_some(kind)
}

/// `v x y [z] [extra...]`; a missing z is 0 and extra numeric fields are ignored
fn vertex_record(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = tag("v")(input)?;
    let (input, _) = space1(input)?;
    let (input, x) = float(input)?;
    let (input, _) = space1(input)?;
    let (input, y) = float(input)?;
    let (input, z) = opt(preceded(space1, float))(input)?;
    let (input, _) = many0(preceded(space1, float))(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = eof(input)?;
    Ok((input, (x, y, z.unwrap_or(0.0))))
}

/// Signed integer that saturates instead of failing on overflow, so an
/// absurd reference still reaches resolution and is rejected there
fn reference_number(input: &str) -> IResult<&str, i64> {
    map(recognize(pair(opt(one_of("+-")), digit1)), |digits: &str| {
        digits.parse().unwrap_or(if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        })
    })(input)
}

/// A single face reference: `v`, `v/vt`, `v//vn` or `v/vt/vn`
fn face_reference(input: &str) -> IResult<&str, i64> {
    let (input, index) = reference_number(input)?;
    let (input, _) = many0(preceded(char('/'), opt(reference_number)))(input)?;
    Ok((input, index))
}

fn face_record(input: &str) -> IResult<&str, Vec<i64>> {
    let (input, _) = tag("f")(input)?;
    let (input, _) = space1(input)?;
    let (input, references) = separated_list1(space1, face_reference)(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = eof(input)?;
    Ok((input, references))
}

/// Parse a mesh description from any buffered reader
pub fn parse_obj<R: BufRead>(mut reader: R) -> Result<ParsedObj, ObjError> {
    let mut parser = ObjParser::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ObjError::Read {
                line: parser.line + 1,
                source,
            })?;
        if read == 0 {
            break;
        }
        parser.feed_bytes(&buf);
    }
    Ok(parser.finish())
}

/// Parse a mesh description held in memory
pub fn parse_obj_str(input: &str) -> ParsedObj {
    let mut parser = ObjParser::new();
    for line in input.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Open and parse a mesh file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<ParsedObj, ObjError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ObjError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_obj(BufReader::new(file))
}
